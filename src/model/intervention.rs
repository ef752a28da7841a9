use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{InterventionId, ProgressNoteId};

/// A top-level intervention record as created by the server.
/// Everything besides `id` and `progress_notes` is carried through to templates untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Intervention {
    pub id: InterventionId,
    /// Oldest-first
    #[serde(default)]
    pub progress_notes: Vec<ProgressNote>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Intervention {
    pub fn new(id: impl Into<InterventionId>) -> Self {
        Self {
            id: id.into(),
            progress_notes: Vec::new(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn with_progress_notes(mut self, notes: Vec<ProgressNote>) -> Self {
        self.progress_notes = notes;
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// A progress note attached to exactly one intervention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressNote {
    pub id: ProgressNoteId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ProgressNote {
    pub fn new(id: impl Into<ProgressNoteId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn opaque_fields_survive_deserialization() {
        let json = json!({
            "id": 3,
            "name": "Reading intervention",
            "number_of_hours": 10,
            "progress_notes": [{"id": 1, "content": "Going well"}]
        });

        let intervention: Intervention = serde_json::from_value(json).unwrap();

        assert_eq!(intervention.id.as_str(), "3");
        assert_eq!(intervention.field("name"), Some(&json!("Reading intervention")));
        assert_eq!(intervention.field("number_of_hours"), Some(&json!(10)));
        assert_eq!(intervention.progress_notes.len(), 1);
        assert_eq!(
            intervention.progress_notes[0].field("content"),
            Some(&json!("Going well"))
        );
    }

    #[test]
    fn missing_progress_notes_defaults_to_empty() {
        let intervention: Intervention = serde_json::from_value(json!({"id": 5})).unwrap();
        assert!(intervention.progress_notes.is_empty());
        assert!(intervention.fields.is_empty());
    }

    #[test]
    fn serialized_record_flattens_fields_next_to_id() {
        let intervention = Intervention::new("8").with_field("comment", "weekly");
        let value = serde_json::to_value(&intervention).unwrap();

        assert_eq!(value["id"], json!("8"));
        assert_eq!(value["comment"], json!("weekly"));
        assert_eq!(value["progress_notes"], json!([]));
    }

    #[test]
    fn progress_note_requires_id() {
        let result: Result<ProgressNote, _> = serde_json::from_value(json!({"content": "x"}));
        assert!(result.is_err());
    }
}
