//! Installed releases screen

use super::list::{ListPhase, ResourceList};
use crate::backend::SharedBackend;
use crate::dialogs::{DialogSequencer, UsedValuesDialog};
use crate::effects::RunOnce;
use crate::error_channel::ErrorChannel;
use crate::models::{Release, ReleaseKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasesDialog {
    ConfirmUninstall,
    UsedValues,
}

/// Every user-triggerable action of the releases screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleasesAction {
    Reload,
    Toggle(ReleaseKey),
    OpenUninstall,
    ConfirmUninstall,
    OpenUsedValues,
    CloseDialog,
}

pub struct ReleasesController {
    backend: SharedBackend,
    list: ResourceList<Release>,
    mounted: RunOnce,
    dialogs: DialogSequencer<ReleasesDialog>,
    used_values: Option<UsedValuesDialog>,
}

impl ReleasesController {
    pub fn new(backend: SharedBackend, errors: ErrorChannel) -> Self {
        Self {
            backend,
            list: ResourceList::new("list releases", errors),
            mounted: RunOnce::new(),
            dialogs: DialogSequencer::new(),
            used_values: None,
        }
    }

    /// First load; later calls do nothing
    pub fn mount(&mut self) {
        if self.mounted.begin() {
            self.reload();
        }
    }

    pub fn reload(&mut self) {
        let backend = self.backend.clone();
        self.list.start_load(async move { backend.list_releases().await });
    }

    pub fn list(&self) -> &ResourceList<Release> {
        &self.list
    }

    pub fn releases(&self) -> &[Release] {
        self.list.items()
    }

    pub fn selected(&self) -> Option<&Release> {
        self.list.selected()
    }

    pub fn phase(&self) -> ListPhase {
        self.list.phase()
    }

    pub fn toggle(&mut self, key: ReleaseKey) {
        self.list.toggle(key);
    }

    pub fn visible_dialog(&self) -> Option<ReleasesDialog> {
        self.dialogs.visible()
    }

    pub fn used_values(&self) -> Option<&UsedValuesDialog> {
        self.used_values.as_ref()
    }

    /// Ask for confirmation before uninstalling the selected release
    pub fn open_uninstall(&mut self) -> bool {
        self.list.selected().is_some() && self.dialogs.open(ReleasesDialog::ConfirmUninstall)
    }

    pub fn confirm_uninstall(&mut self) -> bool {
        if !self.dialogs.is_open(ReleasesDialog::ConfirmUninstall) {
            return false;
        }
        // removal is patched in locally once confirmed, no reload needed
        self.dialogs.close(false);
        let backend = self.backend.clone();
        self.list.start_mutation("uninstall release", |key| async move {
            backend.uninstall_chart(&key.name, &key.namespace).await
        })
    }

    pub fn open_used_values(&mut self) -> bool {
        let Some(key) = self.list.selected_key().cloned() else {
            return false;
        };
        if !self.dialogs.open(ReleasesDialog::UsedValues) {
            return false;
        }
        let mut dialog = UsedValuesDialog::new(self.list.errors().clone());
        dialog.show(&self.backend, &key);
        self.used_values = Some(dialog);
        true
    }

    pub fn close_dialog(&mut self) {
        self.used_values = None;
        // neither dialog changes the list on close
        self.dialogs.close(false);
    }

    pub fn dispatch(&mut self, action: ReleasesAction) {
        tracing::debug!("Releases action {:?}", action);
        match action {
            ReleasesAction::Reload => self.reload(),
            ReleasesAction::Toggle(key) => self.toggle(key),
            ReleasesAction::OpenUninstall => {
                self.open_uninstall();
            }
            ReleasesAction::ConfirmUninstall => {
                self.confirm_uninstall();
            }
            ReleasesAction::OpenUsedValues => {
                self.open_used_values();
            }
            ReleasesAction::CloseDialog => self.close_dialog(),
        }
    }

    /// Apply finished calls; returns whether anything changed
    pub fn poll(&mut self) -> anyhow::Result<bool> {
        let mut changed = self.list.poll()?;
        if let Some(dialog) = self.used_values.as_mut()
            && dialog.poll()?.is_some()
        {
            self.close_dialog();
            changed = true;
        }
        Ok(changed)
    }
}
