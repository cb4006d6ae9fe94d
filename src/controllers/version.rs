//! Helm version badge

use crate::backend::{BackendResult, SharedBackend};
use crate::effects::{Pending, RunOnce, take_ready};
use crate::error_channel::ErrorChannel;

pub struct HelmVersion {
    backend: SharedBackend,
    errors: ErrorChannel,
    once: RunOnce,
    fetch: Option<Pending<BackendResult<String>>>,
    version: Option<String>,
}

impl HelmVersion {
    pub fn new(backend: SharedBackend, errors: ErrorChannel) -> Self {
        Self {
            backend,
            errors,
            once: RunOnce::new(),
            fetch: None,
            version: None,
        }
    }

    pub fn mount(&mut self) {
        let backend = self.backend.clone();
        if let Some(pending) = self
            .once
            .spawn("helm version", move || async move { backend.version().await })
        {
            self.fetch = Some(pending);
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn poll(&mut self) -> anyhow::Result<bool> {
        let Some(result) = take_ready(&mut self.fetch) else {
            return Ok(false);
        };
        match result? {
            Ok(version) => {
                tracing::debug!("Using helm {}", version);
                self.version = Some(version);
            }
            Err(e) => {
                tracing::warn!("Reading helm version failed: {}", e);
                self.errors.report_error(&e);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, MockHelmBackend};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_version_is_fetched_once() {
        let mut backend = MockHelmBackend::new();
        backend
            .expect_version()
            .times(1)
            .returning(|| Ok("v3.14.2".to_string()));

        let mut badge = HelmVersion::new(Arc::new(backend), ErrorChannel::new());
        badge.mount();
        badge.mount();
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(badge.poll().unwrap());
        assert_eq!(badge.version(), Some("v3.14.2"));
        assert!(!badge.poll().unwrap());
    }

    #[tokio::test]
    async fn test_missing_binary_is_reported() {
        let mut backend = MockHelmBackend::new();
        backend
            .expect_version()
            .returning(|| Err(BackendError::Io("No such file or directory".to_string())));

        let errors = ErrorChannel::new();
        let mut badge = HelmVersion::new(Arc::new(backend), errors.clone());
        badge.mount();
        tokio::time::sleep(Duration::from_millis(5)).await;
        badge.poll().unwrap();

        assert!(badge.version().is_none());
        assert!(errors.is_set());
    }
}
