pub mod educator;
pub mod ids;
pub mod intervention;
pub mod serde_utils;

pub use educator::Educator;
pub use ids::{EducatorId, InterventionId, ProgressNoteId, StudentId};
pub use intervention::{Intervention, ProgressNote};
