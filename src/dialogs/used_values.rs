//! Read-only view of the values a release was installed with

use super::DialogOutcome;
use crate::backend::{BackendResult, SharedBackend};
use crate::effects::RunOnChange;
use crate::error_channel::ErrorChannel;
use crate::models::ReleaseKey;

#[derive(Debug)]
pub struct UsedValuesDialog {
    errors: ErrorChannel,
    fetch: RunOnChange<ReleaseKey, BackendResult<String>>,
    values: Option<String>,
}

impl UsedValuesDialog {
    pub fn new(errors: ErrorChannel) -> Self {
        Self {
            errors,
            fetch: RunOnChange::new("get values"),
            values: None,
        }
    }

    /// Point the dialog at `release`; fetches only when the release changed
    pub fn show(&mut self, backend: &SharedBackend, release: &ReleaseKey) {
        let backend = backend.clone();
        let started = self.fetch.update(release, |key| {
            let key = key.clone();
            async move { backend.get_values(&key.name, &key.namespace).await }
        });
        if started {
            self.values = None;
        }
    }

    pub fn release(&self) -> Option<&ReleaseKey> {
        self.fetch.deps()
    }

    pub fn values(&self) -> Option<&str> {
        self.values.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_running()
    }

    /// `Some(Cancelled)` when a failed fetch closed the dialog
    pub fn poll(&mut self) -> anyhow::Result<Option<DialogOutcome>> {
        let Some(result) = self.fetch.poll() else {
            return Ok(None);
        };
        match result? {
            Ok(values) => {
                self.values = Some(values);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Fetching used values failed: {}", e);
                self.errors.report_error(&e);
                Ok(Some(DialogOutcome::Cancelled))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, MockHelmBackend};
    use mockall::predicate::eq;
    use std::sync::Arc;
    use std::time::Duration;

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    #[tokio::test]
    async fn test_fetches_once_per_release() {
        let mut backend = MockHelmBackend::new();
        backend
            .expect_get_values()
            .with(eq("web"), eq("apps"))
            .times(1)
            .returning(|_, _| Ok("replicaCount: 2\n".to_string()));
        let backend: SharedBackend = Arc::new(backend);

        let errors = ErrorChannel::new();
        let mut dialog = UsedValuesDialog::new(errors.clone());
        let key = ReleaseKey::new("web", "apps");
        dialog.show(&backend, &key);
        dialog.show(&backend, &key);
        assert!(dialog.is_loading());

        settle().await;
        assert_eq!(dialog.poll().unwrap(), None);
        assert_eq!(dialog.values(), Some("replicaCount: 2\n"));
        assert_eq!(dialog.release(), Some(&key));
        assert!(!errors.is_set());
    }

    #[tokio::test]
    async fn test_failure_reports_and_closes() {
        let mut backend = MockHelmBackend::new();
        backend
            .expect_get_values()
            .returning(|_, _| Err(BackendError::Command("release: not found".to_string())));
        let backend: SharedBackend = Arc::new(backend);

        let errors = ErrorChannel::new();
        let mut dialog = UsedValuesDialog::new(errors.clone());
        dialog.show(&backend, &ReleaseKey::new("gone", "default"));

        settle().await;
        assert_eq!(dialog.poll().unwrap(), Some(DialogOutcome::Cancelled));
        assert_eq!(errors.message().as_deref(), Some("release: not found"));
        assert!(dialog.values().is_none());
    }
}
