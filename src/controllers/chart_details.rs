//! Chart details screen and install flow

use super::Route;
use crate::backend::{BackendResult, SharedBackend};
use crate::dialogs::{InstallDialog, ValuesSource};
use crate::effects::{Pending, RunOnce, take_ready};
use crate::error_channel::ErrorChannel;
use crate::models::ChartDetails;

/// A details screen was mounted without a chart to show
#[derive(Debug, thiserror::Error)]
#[error("chart name is required")]
pub struct MissingChartName;

pub struct ChartDetailsController {
    backend: SharedBackend,
    errors: ErrorChannel,
    name: String,
    mounted: RunOnce,
    fetch: Option<Pending<BackendResult<ChartDetails>>>,
    details: Option<ChartDetails>,
    install: Option<InstallDialog>,
}

impl ChartDetailsController {
    pub fn new(backend: SharedBackend, errors: ErrorChannel, name: impl Into<String>) -> Self {
        Self {
            backend,
            errors,
            name: name.into(),
            mounted: RunOnce::new(),
            fetch: None,
            details: None,
            install: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch the details once; an empty chart name is a caller bug
    pub fn mount(&mut self) -> anyhow::Result<()> {
        if !self.mounted.begin() {
            return Ok(());
        }
        if self.name.is_empty() {
            tracing::error!("Chart details mounted without a chart name");
            return Err(MissingChartName.into());
        }
        let backend = self.backend.clone();
        let name = self.name.clone();
        self.fetch = Some(Pending::spawn("chart details", async move {
            backend.get_chart_details(&name).await
        }));
        Ok(())
    }

    pub fn details(&self) -> Option<&ChartDetails> {
        self.details.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_some()
    }

    pub fn open_install(&mut self) -> bool {
        if self.install.is_some() {
            return false;
        }
        self.install = Some(InstallDialog::new(self.name.clone()));
        true
    }

    pub fn install_dialog(&self) -> Option<&InstallDialog> {
        self.install.as_ref()
    }

    pub fn install_dialog_mut(&mut self) -> Option<&mut InstallDialog> {
        self.install.as_mut()
    }

    /// Install with the values currently in `values`
    pub fn submit_install(&mut self, values: &dyn ValuesSource) -> bool {
        match self.install.as_mut() {
            Some(dialog) => dialog.submit(&self.backend, values),
            None => false,
        }
    }

    /// Close the install dialog; refused while the install is running
    pub fn cancel_install(&mut self) -> bool {
        match &self.install {
            Some(dialog) if !dialog.can_cancel() => false,
            Some(_) => {
                self.install = None;
                true
            }
            None => false,
        }
    }

    /// Apply finished calls; yields the next route once an install succeeded
    pub fn poll(&mut self) -> anyhow::Result<Option<Route>> {
        if let Some(result) = take_ready(&mut self.fetch) {
            match result? {
                Ok(details) => self.details = Some(details),
                Err(e) => {
                    tracing::warn!("Fetching details of {} failed: {}", self.name, e);
                    self.errors.report_error(&e);
                }
            }
        }

        if let Some(dialog) = self.install.as_mut()
            && dialog.poll()?.is_some()
        {
            self.install = None;
            return Ok(Some(Route::Releases));
        }
        Ok(None)
    }
}
