//! # Project Tracker
//!
//! Core of a two-list project tracker: a validated input form, an observable
//! project store, and "active"/"finished" lists that exchange projects by
//! drag and drop.
//!
//! The page itself is reached only through the capabilities in [`ui::surface`]
//! (element tree, drag payload, alert), so the same views run against a browser
//! binding or the in-memory [`ui::memory::MemorySurface`].

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod state;
pub mod ui;

// Re-export commonly used types
pub use app::App;
pub use config::TrackerConfig;
pub use domain::{
    project::{people_label, Project, ProjectId, ProjectStatus},
    validation::{validate, Validatable},
};
pub use error::{Result, TrackerError};
pub use state::ProjectState;
