//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// How helm is invoked
    #[serde(default)]
    pub helm: HelmConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HelmConfig {
    /// Path or name of the helm executable
    #[serde(default = "default_helm_binary")]
    pub binary: String,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Enable mouse support
    #[serde(default)]
    pub enable_mouse: bool,

    /// Quiet period before a catalog search is sent
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Screen shown on startup
    #[serde(default)]
    pub start_view: StartView,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
    #[default]
    Releases,
    Repositories,
    Catalog,
}

impl fmt::Display for StartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StartView::Releases => "releases",
            StartView::Repositories => "repositories",
            StartView::Catalog => "catalog",
        };
        f.write_str(name)
    }
}

impl FromStr for StartView {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "releases" => Ok(StartView::Releases),
            "repositories" => Ok(StartView::Repositories),
            "catalog" => Ok(StartView::Catalog),
            other => Err(anyhow::anyhow!(
                "unknown view '{}', expected releases, repositories or catalog",
                other
            )),
        }
    }
}

fn default_helm_binary() -> String {
    "helm".to_string()
}

fn default_search_debounce_ms() -> u64 {
    500
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            binary: default_helm_binary(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_mouse: false,
            search_debounce_ms: default_search_debounce_ms(),
            start_view: StartView::default(),
        }
    }
}

impl UiConfig {
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
