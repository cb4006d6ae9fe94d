//! Process-wide error slot
//!
//! One [`ErrorChannel`] is created at the composition root and cloned into
//! every controller. All clones share a single slot: the newest report
//! replaces whatever was there, and the slot is emptied only by [`clear`].
//!
//! [`clear`]: ErrorChannel::clear

use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::watch;

/// Text shown when a failure carries no message of its own
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Shared, observable holder of the current global error
#[derive(Debug, Clone)]
pub struct ErrorChannel {
    slot: Arc<watch::Sender<Option<String>>>,
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorChannel {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
        }
    }

    /// Hold `message`, or the fallback text when it is absent or empty
    ///
    /// The raw argument is always logged, even when it gets replaced.
    pub fn report(&self, message: Option<&str>) {
        tracing::error!(raw = ?message, "Error reported");
        let text = match message {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => FALLBACK_MESSAGE.to_string(),
        };
        self.slot.send_replace(Some(text));
    }

    /// Report any displayable failure
    pub fn report_error(&self, error: &impl Display) {
        let text = error.to_string();
        self.report(Some(&text));
    }

    pub fn clear(&self) {
        self.slot.send_replace(None);
    }

    pub fn is_set(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn message(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Watch the slot; every clone of the channel notifies the same receivers
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.slot.subscribe()
    }
}
