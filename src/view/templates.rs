use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::error::PanelError;

/// A template: view-model in, markup out. Expected to be deterministic.
pub type TemplateFn = Box<dyn Fn(&Value) -> String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    Shell,
    InterventionCell,
    InterventionDetails,
    NewInterventionForm,
    ProgressNote,
    NewProgressNoteArea,
    ErrorList,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 7] = [
        TemplateKey::Shell,
        TemplateKey::InterventionCell,
        TemplateKey::InterventionDetails,
        TemplateKey::NewInterventionForm,
        TemplateKey::ProgressNote,
        TemplateKey::NewProgressNoteArea,
        TemplateKey::ErrorList,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TemplateKey::Shell => "shell",
            TemplateKey::InterventionCell => "interventionCell",
            TemplateKey::InterventionDetails => "interventionDetails",
            TemplateKey::NewInterventionForm => "newInterventionForm",
            TemplateKey::ProgressNote => "progressNote",
            TemplateKey::NewProgressNoteArea => "newProgressNoteArea",
            TemplateKey::ErrorList => "errorList",
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The seven templates the panel renders with, injected at construction.
pub struct TemplateSet {
    templates: HashMap<TemplateKey, TemplateFn>,
}

impl fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateSet")
            .field("keys", &TemplateKey::ALL.map(TemplateKey::name))
            .finish()
    }
}

impl TemplateSet {
    pub fn builder() -> TemplateSetBuilder {
        TemplateSetBuilder::default()
    }

    pub fn render(&self, key: TemplateKey, view_model: &Value) -> String {
        match self.templates.get(&key) {
            Some(template) => template(view_model),
            // unreachable: the builder refuses incomplete sets
            None => String::new(),
        }
    }
}

#[derive(Default)]
pub struct TemplateSetBuilder {
    templates: HashMap<TemplateKey, TemplateFn>,
}

impl TemplateSetBuilder {
    pub fn with(mut self, key: TemplateKey, template: impl Fn(&Value) -> String + 'static) -> Self {
        self.templates.insert(key, Box::new(template));
        self
    }

    /// Fails on the first key (in `TemplateKey::ALL` order) with no template.
    pub fn build(self) -> Result<TemplateSet, PanelError> {
        if let Some(missing) = TemplateKey::ALL
            .into_iter()
            .find(|key| !self.templates.contains_key(key))
        {
            return Err(PanelError::MissingTemplate(missing));
        }
        Ok(TemplateSet {
            templates: self.templates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_builder() -> TemplateSetBuilder {
        TemplateKey::ALL
            .into_iter()
            .fold(TemplateSet::builder(), |builder, key| {
                builder.with(key, move |_| key.name().to_string())
            })
    }

    #[test]
    fn complete_set_builds() {
        let templates = complete_builder().build().unwrap();
        assert_eq!(templates.render(TemplateKey::ErrorList, &json!({})), "errorList");
    }

    #[test]
    fn missing_key_is_reported() {
        let builder = TemplateKey::ALL
            .into_iter()
            .filter(|k| *k != TemplateKey::ProgressNote)
            .fold(TemplateSet::builder(), |builder, key| builder.with(key, |_| String::new()));

        let err = builder.build().unwrap_err();

        assert!(matches!(err, PanelError::MissingTemplate(TemplateKey::ProgressNote)));
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let templates = complete_builder()
            .with(TemplateKey::Shell, |_| "<main></main>".to_string())
            .build()
            .unwrap();
        assert_eq!(templates.render(TemplateKey::Shell, &json!({})), "<main></main>");
    }

    #[test]
    fn template_receives_view_model() {
        let templates = complete_builder()
            .with(TemplateKey::NewInterventionForm, |vm| {
                format!("student={}", vm["studentId"].as_str().unwrap_or(""))
            })
            .build()
            .unwrap();
        assert_eq!(
            templates.render(TemplateKey::NewInterventionForm, &json!({"studentId": "12"})),
            "student=12"
        );
    }
}
