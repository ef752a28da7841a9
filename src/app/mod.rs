pub mod state;
pub mod update;

pub use state::ViewState;
pub use update::{update, PanelAction};
