//! Backend abstraction
//!
//! Every remote operation the client performs goes through [`HelmBackend`].
//! The controllers never look inside a failure: they surface its display
//! text and move on, so [`BackendError`] only needs to carry a message.

pub mod executor;
pub mod helm;

pub use executor::{CommandExecutor, ProcessExecutor};
pub use helm::HelmCli;

use crate::models::{ChartDetails, ChartListItem, InstallChartRequest, Release, Repo};
use async_trait::async_trait;
use std::sync::Arc;

/// Failure of a remote call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The helm command ran and reported a failure
    #[error("{0}")]
    Command(String),
    /// The command could not be started or its I/O failed
    #[error("{0}")]
    Io(String),
    /// Output came back in a shape we could not read
    #[error("unexpected helm output: {0}")]
    Decode(String),
}

impl From<std::io::Error> for BackendError {
    fn from(value: std::io::Error) -> Self {
        BackendError::Io(value.to_string())
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(value: serde_json::Error) -> Self {
        BackendError::Decode(value.to_string())
    }
}

impl From<serde_yaml::Error> for BackendError {
    fn from(value: serde_yaml::Error) -> Self {
        BackendError::Decode(value.to_string())
    }
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// The remote operations the client depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HelmBackend: Send + Sync {
    async fn list_releases(&self) -> BackendResult<Vec<Release>>;

    async fn repos(&self) -> BackendResult<Vec<Repo>>;

    async fn version(&self) -> BackendResult<String>;

    async fn delete_repository(&self, name: &str) -> BackendResult<()>;

    async fn add_repository(&self, name: &str, url: &str) -> BackendResult<()>;

    async fn update_repository(&self, old_name: &str, name: &str, url: &str) -> BackendResult<()>;

    async fn refresh_repositories(&self) -> BackendResult<()>;

    /// Search configured repositories; an empty filter lists everything
    async fn find_charts_in_repo(&self, filter: &str) -> BackendResult<Vec<ChartListItem>>;

    async fn get_chart_details(&self, name: &str) -> BackendResult<ChartDetails>;

    async fn install_chart(&self, request: &InstallChartRequest) -> BackendResult<()>;

    async fn uninstall_chart(&self, release_name: &str, namespace: &str) -> BackendResult<()>;

    /// Values a release was installed with, as YAML text
    async fn get_values(&self, release_name: &str, namespace: &str) -> BackendResult<String>;
}

/// Backend handle shared by every controller of the process
pub type SharedBackend = Arc<dyn HelmBackend>;
