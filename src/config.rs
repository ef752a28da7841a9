use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::controller::PanelOptions;
use crate::error::FixtureError;
use crate::model::{Educator, Intervention, StudentId};
use crate::view::TemplateSet;

/// Initial panel data as the server would embed it in the page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PanelFixture {
    pub student_id: StudentId,
    #[serde(default)]
    pub interventions: Vec<Intervention>,
    #[serde(default)]
    pub educators: Vec<Educator>,
    #[serde(default)]
    pub datepicker_options: Option<Value>,
}

impl PanelFixture {
    pub fn from_json(content: &str, path: &Path) -> Result<Self, FixtureError> {
        serde_json::from_str(content).map_err(|source| FixtureError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Read and parse a fixture file.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    pub fn into_options(self, templates: TemplateSet) -> PanelOptions {
        PanelOptions {
            student_id: self.student_id,
            interventions: self.interventions,
            templates,
            educators: self.educators,
            datepicker_options: self.datepicker_options,
        }
    }
}
