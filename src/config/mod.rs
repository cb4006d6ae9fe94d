//! Configuration system for helmdeck
//!
//! A single YAML file merged over built-in defaults, with environment
//! variable overrides on top.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, HelmConfig, StartView, UiConfig};

/// Every key accepted by [`get_config_value`] and [`set_config_value`]
pub const KEYS: &[&str] = &[
    "helm.binary",
    "ui.enableMouse",
    "ui.searchDebounceMs",
    "ui.startView",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "helm.binary" => Ok(config.helm.binary.clone()),
        "ui.enableMouse" => Ok(config.ui.enable_mouse.to_string()),
        "ui.searchDebounceMs" => Ok(config.ui.search_debounce_ms.to_string()),
        "ui.startView" => Ok(config.ui.start_view.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "helm.binary" => {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("helm.binary must not be empty"));
            }
            config.helm.binary = value.to_string();
        }
        "ui.enableMouse" => {
            config.ui.enable_mouse = value
                .parse()
                .context("ui.enableMouse must be 'true' or 'false'")?;
        }
        "ui.searchDebounceMs" => {
            config.ui.search_debounce_ms = value
                .parse()
                .context("ui.searchDebounceMs must be a number of milliseconds")?;
        }
        "ui.startView" => {
            config.ui.start_view = value.parse()?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
