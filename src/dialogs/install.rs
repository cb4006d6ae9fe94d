//! Install chart dialog

use super::{DialogOutcome, Form};
use crate::backend::{BackendResult, SharedBackend};
use crate::effects::{Pending, take_ready};
use crate::models::InstallChartRequest;

pub const NAME: &str = "name";
pub const NAMESPACE: &str = "namespace";

/// Read access to the values editor, which the dialog does not own
pub trait ValuesSource {
    /// Editor content at this moment; `None` when no editor is attached
    fn current_values(&self) -> Option<String>;
}

impl ValuesSource for String {
    fn current_values(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl ValuesSource for Option<String> {
    fn current_values(&self) -> Option<String> {
        self.clone()
    }
}

#[derive(Debug)]
pub struct InstallDialog {
    chart_name: String,
    form: Form,
    pending: Option<Pending<BackendResult<()>>>,
    error: Option<String>,
}

impl InstallDialog {
    pub fn new(chart_name: impl Into<String>) -> Self {
        Self {
            chart_name: chart_name.into(),
            form: Form::new(&[(NAME, "Release name", ""), (NAMESPACE, "Namespace", "")]),
            pending: None,
            error: None,
        }
    }

    pub fn chart_name(&self) -> &str {
        &self.chart_name
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit(true)
    }

    pub fn can_cancel(&self) -> bool {
        !self.form.is_submitting()
    }

    /// Request built from the form and the editor content as of now
    pub fn request(&self, values: &dyn ValuesSource) -> InstallChartRequest {
        InstallChartRequest {
            name: self.form.trimmed(NAME).to_string(),
            chart_name: self.chart_name.clone(),
            namespace: self.form.trimmed(NAMESPACE).to_string(),
            values: values.current_values(),
        }
    }

    /// Start the install; returns false when submit is currently disabled
    pub fn submit(&mut self, backend: &SharedBackend, values: &dyn ValuesSource) -> bool {
        if !self.can_submit() {
            return false;
        }
        let request = self.request(values);
        let backend = backend.clone();
        tracing::debug!(
            "Installing {} as {}/{}",
            request.chart_name,
            request.namespace,
            request.name
        );

        self.error = None;
        self.form.begin_submit();
        self.pending = Some(Pending::spawn("install chart", async move {
            backend.install_chart(&request).await
        }));
        true
    }

    /// `Some(Mutated)` once the install succeeded; failures stay inline
    pub fn poll(&mut self) -> anyhow::Result<Option<DialogOutcome>> {
        let Some(result) = take_ready(&mut self.pending) else {
            return Ok(None);
        };
        self.form.finish_submit();
        match result? {
            Ok(()) => {
                tracing::info!(
                    "Installed {} as {}",
                    self.chart_name,
                    self.form.trimmed(NAME)
                );
                Ok(Some(DialogOutcome::Mutated))
            }
            Err(e) => {
                tracing::warn!("Install of {} failed: {}", self.chart_name, e);
                self.error = Some(e.to_string());
                Ok(None)
            }
        }
    }
}
