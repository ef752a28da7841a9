//! Error types for interventions-panel
//!
//! Domain-specific error enums using thiserror. Save rejections are the only
//! user-facing failure; everything else signals a caller or host bug.

use serde::Deserialize;

use crate::event::binder::Handler;
use crate::view::templates::TemplateKey;

/// Failure payload delivered by the transport when the server refuses a save.
/// Validation and transport failures surface identically.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, thiserror::Error)]
#[error("save rejected: {}", .errors.join("; "))]
pub struct SaveRejected {
    pub errors: Vec<String>,
}

/// Transition preconditions the UI is expected to uphold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    #[error("progress note committed with no selected intervention")]
    NoSelectedIntervention,
}

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("missing template: {0}")]
    MissingTemplate(TemplateKey),
    #[error("{handler:?}: event carried no payload")]
    MissingPayload { handler: Handler },
    #[error("{handler:?}: malformed payload: {source}")]
    MalformedPayload {
        handler: Handler,
        #[source]
        source: serde_json::Error,
    },
    #[error("selected cell has no data-id")]
    MissingDataId,
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("I/O {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
