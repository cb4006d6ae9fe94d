//! Modal dialogs
//!
//! A view shows at most one modal at a time. [`DialogSequencer`] owns that
//! invariant; the individual dialogs own their form, their in-flight call and
//! their inline error, and report back through a close outcome that tells the
//! parent whether anything changed on the backend.

pub mod form;
pub mod install;
pub mod repo_form;
pub mod used_values;

pub use form::{FieldError, Form};
pub use install::{InstallDialog, ValuesSource};
pub use repo_form::{RepoDialog, RepoDialogMode};
pub use used_values::UsedValuesDialog;

use std::fmt::Debug;

/// How a dialog finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Closed without touching the backend
    Cancelled,
    /// Closed after a successful remote mutation
    Mutated,
}

impl DialogOutcome {
    pub fn did_mutate(self) -> bool {
        matches!(self, DialogOutcome::Mutated)
    }
}

/// Mutually exclusive modal visibility for one view
#[derive(Debug)]
pub struct DialogSequencer<D> {
    visible: Option<D>,
}

impl<D> Default for DialogSequencer<D> {
    fn default() -> Self {
        Self { visible: None }
    }
}

impl<D: Copy + PartialEq + Debug> DialogSequencer<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> Option<D> {
        self.visible
    }

    pub fn is_open(&self, dialog: D) -> bool {
        self.visible == Some(dialog)
    }

    pub fn is_any_open(&self) -> bool {
        self.visible.is_some()
    }

    /// Show `dialog`; refused while another modal is up
    pub fn open(&mut self, dialog: D) -> bool {
        if let Some(current) = self.visible {
            tracing::debug!("Not opening {:?}: {:?} is already visible", dialog, current);
            return false;
        }
        tracing::debug!("Opening dialog {:?}", dialog);
        self.visible = Some(dialog);
        true
    }

    /// Hide the visible modal; returns whether the owner must reload
    pub fn close(&mut self, did_mutate: bool) -> bool {
        match self.visible.take() {
            Some(dialog) => {
                tracing::debug!("Closing dialog {:?} (mutated: {})", dialog, did_mutate);
                did_mutate
            }
            None => false,
        }
    }
}
