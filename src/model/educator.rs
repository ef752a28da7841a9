use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EducatorId;

/// Educator roster entry offered as progress-note author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Educator {
    pub id: EducatorId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Educator {
    pub fn new(id: impl Into<EducatorId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}
