//! Chart repositories screen

use super::list::{ListPhase, ResourceList};
use crate::backend::SharedBackend;
use crate::dialogs::{DialogSequencer, RepoDialog};
use crate::effects::RunOnce;
use crate::error_channel::ErrorChannel;
use crate::models::Repo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoriesDialog {
    ConfirmDelete,
    Add,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoriesAction {
    Reload,
    Toggle(String),
    Refresh,
    OpenAdd,
    OpenEdit,
    SubmitRepo,
    CancelRepo,
    OpenDelete,
    ConfirmDelete,
    CloseDialog,
}

pub struct RepositoriesController {
    backend: SharedBackend,
    list: ResourceList<Repo>,
    mounted: RunOnce,
    dialogs: DialogSequencer<RepositoriesDialog>,
    repo_dialog: Option<RepoDialog>,
}

impl RepositoriesController {
    pub fn new(backend: SharedBackend, errors: ErrorChannel) -> Self {
        Self {
            backend,
            list: ResourceList::new("list repositories", errors),
            mounted: RunOnce::new(),
            dialogs: DialogSequencer::new(),
            repo_dialog: None,
        }
    }

    pub fn mount(&mut self) {
        if self.mounted.begin() {
            self.reload();
        }
    }

    pub fn reload(&mut self) {
        let backend = self.backend.clone();
        self.list.start_load(async move { backend.repos().await });
    }

    pub fn list(&self) -> &ResourceList<Repo> {
        &self.list
    }

    pub fn repos(&self) -> &[Repo] {
        self.list.items()
    }

    pub fn selected(&self) -> Option<&Repo> {
        self.list.selected()
    }

    pub fn phase(&self) -> ListPhase {
        self.list.phase()
    }

    pub fn toggle(&mut self, name: String) {
        self.list.toggle(name);
    }

    pub fn visible_dialog(&self) -> Option<RepositoriesDialog> {
        self.dialogs.visible()
    }

    pub fn repo_dialog(&self) -> Option<&RepoDialog> {
        self.repo_dialog.as_ref()
    }

    pub fn repo_dialog_mut(&mut self) -> Option<&mut RepoDialog> {
        self.repo_dialog.as_mut()
    }

    pub fn open_delete(&mut self) -> bool {
        self.list.selected().is_some() && self.dialogs.open(RepositoriesDialog::ConfirmDelete)
    }

    pub fn confirm_delete(&mut self) -> bool {
        if !self.dialogs.is_open(RepositoriesDialog::ConfirmDelete) {
            return false;
        }
        self.dialogs.close(false);
        let backend = self.backend.clone();
        self.list.start_mutation("delete repository", |name| async move {
            backend.delete_repository(&name).await
        })
    }

    pub fn open_add(&mut self) -> bool {
        if !self.dialogs.open(RepositoriesDialog::Add) {
            return false;
        }
        self.repo_dialog = Some(RepoDialog::add());
        true
    }

    /// Edit the selected repository
    pub fn open_edit(&mut self) -> bool {
        let Some(repo) = self.list.selected().cloned() else {
            return false;
        };
        if !self.dialogs.open(RepositoriesDialog::Edit) {
            return false;
        }
        self.repo_dialog = Some(RepoDialog::edit(&repo));
        true
    }

    pub fn submit_repo_dialog(&mut self) -> bool {
        match self.repo_dialog.as_mut() {
            Some(dialog) => dialog.submit(&self.backend),
            None => false,
        }
    }

    /// Close the add / edit dialog unless a submit is in flight
    pub fn cancel_repo_dialog(&mut self) -> bool {
        if self.repo_dialog.as_ref().is_some_and(|d| !d.can_cancel()) {
            return false;
        }
        self.close_dialog_with(false);
        true
    }

    /// Re-fetch the repository indexes; the list itself is left as is
    pub fn refresh_repositories(&mut self) -> bool {
        let backend = self.backend.clone();
        self.list.start_refresh("refresh repositories", async move {
            backend.refresh_repositories().await
        })
    }

    pub fn is_refreshing(&self) -> bool {
        self.list.is_refreshing()
    }

    pub fn close_dialog(&mut self) {
        if self.repo_dialog.is_some() {
            self.cancel_repo_dialog();
        } else {
            self.close_dialog_with(false);
        }
    }

    fn close_dialog_with(&mut self, did_mutate: bool) {
        self.repo_dialog = None;
        if self.dialogs.close(did_mutate) {
            self.reload();
        }
    }

    pub fn dispatch(&mut self, action: RepositoriesAction) {
        tracing::debug!("Repositories action {:?}", action);
        match action {
            RepositoriesAction::Reload => self.reload(),
            RepositoriesAction::Toggle(name) => self.toggle(name),
            RepositoriesAction::Refresh => {
                self.refresh_repositories();
            }
            RepositoriesAction::OpenAdd => {
                self.open_add();
            }
            RepositoriesAction::OpenEdit => {
                self.open_edit();
            }
            RepositoriesAction::SubmitRepo => {
                self.submit_repo_dialog();
            }
            RepositoriesAction::CancelRepo => {
                self.cancel_repo_dialog();
            }
            RepositoriesAction::OpenDelete => {
                self.open_delete();
            }
            RepositoriesAction::ConfirmDelete => {
                self.confirm_delete();
            }
            RepositoriesAction::CloseDialog => self.close_dialog(),
        }
    }

    pub fn poll(&mut self) -> anyhow::Result<bool> {
        let mut changed = self.list.poll()?;
        if let Some(dialog) = self.repo_dialog.as_mut()
            && let Some(outcome) = dialog.poll()?
        {
            self.close_dialog_with(outcome.did_mutate());
            changed = true;
        }
        Ok(changed)
    }
}
