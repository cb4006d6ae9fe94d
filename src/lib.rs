//! helmdeck library
//!
//! Orchestration core of the helmdeck Helm client: the backend contract,
//! per-screen controllers, dialog sequencing, debounced search and the
//! shared error channel. The terminal UI sits on top behind the `tui`
//! feature; everything else is usable headless and from tests.

pub mod backend;
pub mod config;
pub mod controllers;
pub mod debounce;
pub mod dialogs;
pub mod effects;
pub mod error_channel;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types for convenience
pub use backend::{BackendError, BackendResult, HelmBackend, HelmCli, SharedBackend};
pub use controllers::Route;
pub use error_channel::ErrorChannel;
