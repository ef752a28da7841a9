pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod model;
pub mod script;
pub mod view;

pub use controller::{InterventionsController, PanelOptions};
