//! Scripted interaction replay: the steps a user and the transport would produce.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::FixtureError;
use crate::event::{DomEvent, Element, Selector};
use crate::view::FormKind;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Click an element identified by `#id` or `.class`, optionally carrying `data-id`
    Click {
        selector: String,
        #[serde(default)]
        data_id: Option<String>,
    },
    /// Type into a field of a rendered form
    Type {
        form: FormKind,
        field: String,
        value: String,
    },
    SaveSucceeded { form: FormKind, record: Value },
    SaveFailed { form: FormKind, errors: Vec<String> },
}

impl ScriptStep {
    /// Host event for this step; `None` for typing and for unusable selectors.
    pub fn to_event(&self) -> Option<DomEvent> {
        match self {
            ScriptStep::Click { selector, data_id } => {
                let mut target = element_for(&Selector::parse(selector)?);
                if let Some(id) = data_id {
                    target = target.with_data("id", id);
                }
                Some(DomEvent::click(vec![target]))
            }
            ScriptStep::Type { .. } => None,
            ScriptStep::SaveSucceeded { form, record } => Some(DomEvent::save_succeeded(
                form.element(),
                record.clone(),
            )),
            ScriptStep::SaveFailed { form, errors } => Some(DomEvent::save_failed(
                form.element(),
                serde_json::json!({ "errors": errors }),
            )),
        }
    }
}

fn element_for(selector: &Selector) -> Element {
    match selector {
        Selector::Id(id) => Element::new().with_id(id),
        Selector::Classes(classes) => classes
            .iter()
            .fold(Element::new(), |element, class| element.with_class(class)),
    }
}

pub fn parse_script(content: &str, path: &Path) -> Result<Vec<ScriptStep>, FixtureError> {
    serde_json::from_str(content).map_err(|source| FixtureError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, FixtureError> {
    let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_script(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use serde_json::json;

    #[test]
    fn click_step_carries_data_id() {
        let step: ScriptStep = serde_json::from_value(json!({
            "step": "click", "selector": ".intervention-cell", "data_id": "4"
        }))
        .unwrap();

        let event = step.to_event().unwrap();

        assert_eq!(event.kind, EventKind::Click);
        assert!(event.path[0].has_class("intervention-cell"));
        assert_eq!(event.path[0].data("id"), Some("4"));
    }

    #[test]
    fn failed_step_wraps_errors() {
        let step = ScriptStep::SaveFailed {
            form: FormKind::NewProgressNote,
            errors: vec!["Content can't be blank".into()],
        };

        let event = step.to_event().unwrap();

        assert_eq!(event.kind, EventKind::SaveFailed);
        assert!(event.path[0].has_class("new-progress-note-form"));
        assert_eq!(event.payload, Some(json!({"errors": ["Content can't be blank"]})));
    }

    #[test]
    fn typing_produces_no_event() {
        let step = ScriptStep::Type {
            form: FormKind::NewIntervention,
            field: "goal".into(),
            value: "x".into(),
        };
        assert!(step.to_event().is_none());
    }

    #[test]
    fn bad_selector_produces_no_event() {
        let step = ScriptStep::Click {
            selector: "button".into(),
            data_id: None,
        };
        assert!(step.to_event().is_none());
    }
}
