//! Configuration loading and merging logic
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. Root config file
//! 3. Built-in defaults

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Upper bound for `ui.searchDebounceMs`
const MAX_SEARCH_DEBOUNCE_MS: u64 = 10_000;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Same as [`load`](ConfigLoader::load), reading the file at `path`
    pub fn load_from(path: &Path) -> Result<Config> {
        let mut config = Config::default();

        if path.exists() {
            config = Self::load_file(path)?;
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
        }

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        // an empty file is a valid, empty configuration
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the root config file
    pub fn validate() -> Result<()> {
        Self::validate_file(&paths::root_config_path())
    }

    /// Fail on unreadable files, invalid YAML, wrong value types and
    /// out-of-range values
    pub fn validate_file(path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let config = Self::load_file(path)?;
        Self::check(&config)
    }

    /// Range checks serde cannot express
    pub fn check(config: &Config) -> Result<()> {
        if config.helm.binary.trim().is_empty() {
            return Err(anyhow::anyhow!("helm.binary must not be empty"));
        }
        if config.ui.search_debounce_ms > MAX_SEARCH_DEBOUNCE_MS {
            return Err(anyhow::anyhow!(
                "ui.searchDebounceMs is {}, maximum is {}",
                config.ui.search_debounce_ms,
                MAX_SEARCH_DEBOUNCE_MS
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(binary) = std::env::var("HELMDECK_HELM_BINARY")
            && !binary.is_empty()
        {
            config.helm.binary = binary;
        }

        if let Ok(delay) = std::env::var("HELMDECK_SEARCH_DEBOUNCE_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => config.ui.search_debounce_ms = ms,
                Err(_) => tracing::warn!("Ignoring HELMDECK_SEARCH_DEBOUNCE_MS={}", delay),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::StartView;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_file(&dir.path().join("config.yaml"));
        assert!(config.is_err());

        let config = ConfigLoader::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config.ui.start_view, StartView::Releases);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.ui.start_view = StartView::Catalog;
        config.ui.enable_mouse = true;
        ConfigLoader::save(&config, &path).unwrap();

        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        std::fs::write(&path, "ui:\n  searchDebounceMs: not-a-number\n").unwrap();
        assert!(ConfigLoader::validate_file(&path).is_err());

        std::fs::write(&path, "ui:\n  searchDebounceMs: 60000\n").unwrap();
        let err = ConfigLoader::validate_file(&path).unwrap_err();
        assert!(err.to_string().contains("maximum"));

        std::fs::write(&path, "helm:\n  binary: /usr/local/bin/helm\n").unwrap();
        assert!(ConfigLoader::validate_file(&path).is_ok());
    }

    #[test]
    fn test_empty_file_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "").unwrap();
        assert_eq!(ConfigLoader::load_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test reads these variables.
        unsafe {
            std::env::set_var("HELMDECK_HELM_BINARY", "/opt/helm/bin/helm");
            std::env::set_var("HELMDECK_SEARCH_DEBOUNCE_MS", "250");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.helm.binary, "/opt/helm/bin/helm");
        assert_eq!(config.ui.search_debounce_ms, 250);

        // SAFETY: see above
        unsafe {
            std::env::remove_var("HELMDECK_HELM_BINARY");
            std::env::remove_var("HELMDECK_SEARCH_DEBOUNCE_MS");
        }
    }
}
