//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod config;
mod headless;
mod logging;
mod version;

pub use config::{ConfigSubcommand, handle_config_command};
pub use headless::{HeadlessCommand, handle_headless_command};
pub use logging::init_logging;
pub use version::display_version;
