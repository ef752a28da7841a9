use std::collections::BTreeMap;

use serde_json::Value;

pub mod binder;

pub use binder::{EventBinder, Handler};

/// Kinds of host events the panel listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    /// Transport reported a successful form submission
    SaveSucceeded,
    /// Transport reported a rejected form submission
    SaveFailed,
}

/// Minimal description of an element on an event's propagation path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// `data-*` attributes without the prefix
    pub data: BTreeMap<String, String>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// CSS-like selector limited to what the panel binds: `#id`, `.class`, `.a.b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Classes(Vec<String>),
}

impl Selector {
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(id) = raw.strip_prefix('#') {
            return (!id.is_empty()).then(|| Selector::Id(id.to_string()));
        }
        let rest = raw.strip_prefix('.')?;
        let classes: Vec<String> = rest.split('.').map(str::to_string).collect();
        if classes.iter().any(String::is_empty) {
            return None;
        }
        Some(Selector::Classes(classes))
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Selector::Classes(classes) => classes.iter().all(|c| element.has_class(c)),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{}", id),
            Selector::Classes(classes) => {
                for class in classes {
                    write!(f, ".{}", class)?;
                }
                Ok(())
            }
        }
    }
}

/// An event bubbling up to the panel root.
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    pub kind: EventKind,
    /// Target first, then its ancestors up to (not including) the root
    pub path: Vec<Element>,
    /// Record or `{errors}` for transport events
    pub payload: Option<Value>,
}

impl DomEvent {
    pub fn click(path: Vec<Element>) -> Self {
        Self {
            kind: EventKind::Click,
            path,
            payload: None,
        }
    }

    pub fn save_succeeded(form: Element, record: Value) -> Self {
        Self {
            kind: EventKind::SaveSucceeded,
            path: vec![form],
            payload: Some(record),
        }
    }

    pub fn save_failed(form: Element, payload: Value) -> Self {
        Self {
            kind: EventKind::SaveFailed,
            path: vec![form],
            payload: Some(payload),
        }
    }
}
