//! Add / edit repository dialog

use super::{DialogOutcome, Form};
use crate::backend::{BackendResult, SharedBackend};
use crate::effects::{Pending, take_ready};
use crate::models::Repo;

pub const NAME: &str = "name";
pub const URL: &str = "url";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoDialogMode {
    Add,
    /// Editing the repository currently registered as `old_name`
    Edit { old_name: String },
}

#[derive(Debug)]
pub struct RepoDialog {
    mode: RepoDialogMode,
    form: Form,
    pending: Option<Pending<BackendResult<()>>>,
    error: Option<String>,
}

impl RepoDialog {
    pub fn add() -> Self {
        Self {
            mode: RepoDialogMode::Add,
            form: Form::new(&[(NAME, "Name", ""), (URL, "Url", "")]),
            pending: None,
            error: None,
        }
    }

    /// Pre-filled from `repo`
    pub fn edit(repo: &Repo) -> Self {
        Self {
            mode: RepoDialogMode::Edit {
                old_name: repo.name.clone(),
            },
            form: Form::new(&[(NAME, "Name", &repo.name), (URL, "Url", &repo.url)]),
            pending: None,
            error: None,
        }
    }

    pub fn mode(&self) -> &RepoDialogMode {
        &self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            RepoDialogMode::Add => "Add repository",
            RepoDialogMode::Edit { .. } => "Edit repository",
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Inline error from the last failed submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        // an edit may be resubmitted unchanged
        let require_dirty = matches!(self.mode, RepoDialogMode::Add);
        self.form.can_submit(require_dirty)
    }

    pub fn can_cancel(&self) -> bool {
        !self.form.is_submitting()
    }

    /// Send the form; returns false when submit is currently disabled
    pub fn submit(&mut self, backend: &SharedBackend) -> bool {
        if !self.can_submit() {
            return false;
        }
        let name = self.form.trimmed(NAME).to_string();
        let url = self.form.trimmed(URL).to_string();
        let backend = backend.clone();

        self.error = None;
        self.form.begin_submit();
        self.pending = Some(match &self.mode {
            RepoDialogMode::Add => Pending::spawn("add repository", async move {
                backend.add_repository(&name, &url).await
            }),
            RepoDialogMode::Edit { old_name } => {
                let old_name = old_name.clone();
                Pending::spawn("update repository", async move {
                    backend.update_repository(&old_name, &name, &url).await
                })
            }
        });
        true
    }

    /// Collect the submit result; `Some(Mutated)` once the dialog should close
    pub fn poll(&mut self) -> anyhow::Result<Option<DialogOutcome>> {
        let Some(result) = take_ready(&mut self.pending) else {
            return Ok(None);
        };
        self.form.finish_submit();
        match result? {
            Ok(()) => {
                tracing::info!("Saved repository {}", self.form.trimmed(NAME));
                Ok(Some(DialogOutcome::Mutated))
            }
            Err(e) => {
                tracing::warn!("Saving repository failed: {}", e);
                self.error = Some(e.to_string());
                Ok(None)
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

    #[test]
    fn test_add_requires_changes() {
        let dialog = RepoDialog::add();
        assert!(!dialog.can_submit());
        assert_eq!(dialog.title(), "Add repository");
    }

    #[test]
    fn test_edit_can_submit_unchanged() {
        let repo = Repo {
            name: "bitnami".to_string(),
            url: "https://charts.bitnami.com/bitnami".to_string(),
        };
        let dialog = RepoDialog::edit(&repo);
        assert!(!dialog.form().is_dirty());
        assert!(dialog.can_submit());
    }

    #[tokio::test]
    async fn test_add_sends_trimmed_values() {
        let mut backend = MockHelmBackend::new();
        backend
            .expect_add_repository()
            .with(eq("stable"), eq("https://charts.example.com"))
            .times(1)
            .returning(|_, _| Ok(()));
        let backend: SharedBackend = Arc::new(backend);

        let mut dialog = RepoDialog::add();
        dialog.form_mut().set(NAME, " stable ");
        dialog.form_mut().set(URL, "https://charts.example.com  ");
        assert!(dialog.submit(&backend));
        assert!(!dialog.can_cancel());

        settle().await;
        assert_eq!(dialog.poll().unwrap(), Some(DialogOutcome::Mutated));
        assert!(dialog.can_cancel());
    }

    #[tokio::test]
    async fn test_edit_sends_old_name() {
        let mut backend = MockHelmBackend::new();
        backend
            .expect_update_repository()
            .with(eq("old"), eq("new"), eq("https://x"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        let backend: SharedBackend = Arc::new(backend);

        let repo = Repo {
            name: "old".to_string(),
            url: "https://x".to_string(),
        };
        let mut dialog = RepoDialog::edit(&repo);
        dialog.form_mut().set(NAME, "new");
        assert!(dialog.submit(&backend));

        settle().await;
        assert_eq!(dialog.poll().unwrap(), Some(DialogOutcome::Mutated));
    }

    #[tokio::test]
    async fn test_failure_stays_open_with_inline_error() {
        let mut backend = MockHelmBackend::new();
        backend.expect_add_repository().returning(|_, _| {
            Err(BackendError::Command(
                "looks like \"x\" is not a valid chart repository".to_string(),
            ))
        });
        let backend: SharedBackend = Arc::new(backend);

        let mut dialog = RepoDialog::add();
        dialog.form_mut().set(NAME, "x");
        dialog.form_mut().set(URL, "x");
        dialog.submit(&backend);

        settle().await;
        assert_eq!(dialog.poll().unwrap(), None);
        assert!(dialog.error().unwrap().contains("not a valid chart repository"));
        assert!(dialog.can_submit());
    }
}
