//! Async effect primitives
//!
//! Remote calls never run on the UI loop. Each one is spawned onto the
//! runtime and its result comes back through a oneshot channel that the loop
//! drains with non-blocking polls, so view state is only ever touched from
//! the loop itself.
//!
//! - [`Pending`] - one spawned call and the receiver for its result
//! - [`RunOnce`] - start an action once per owner lifetime (mount)
//! - [`RunOnChange`] - start an action whenever its dependencies change
//!
//! A task that dies without sending (panic, runtime shutdown) is an
//! unexpected failure rather than a domain error: it is logged here and
//! handed back to the caller as `Err` so the loop can propagate it.

use std::future::Future;
use tokio::sync::oneshot::{self, error::TryRecvError};

/// A spawned task ended without producing its result
#[derive(Debug, thiserror::Error)]
#[error("{0} task ended before producing a result")]
pub struct Abandoned(pub &'static str);

/// Result receiver of a spawned call
///
/// Dropping a `Pending` does not stop the call; its result is simply
/// discarded when it arrives.
#[derive(Debug)]
pub struct Pending<T> {
    label: &'static str,
    rx: oneshot::Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    /// Spawn `future` on the runtime
    pub fn spawn<F>(label: &'static str, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tracing::debug!("Spawning {} task", label);
        tokio::spawn(async move {
            if tx.send(future.await).is_err() {
                tracing::debug!("{} result dropped, receiver is gone", label);
            }
        });
        Self { label, rx }
    }
}

impl<T> Pending<T> {
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Non-blocking check for the result
    ///
    /// `None` while the call is in flight. Once this returns `Some`, the
    /// `Pending` is spent and should be dropped.
    pub fn try_take(&mut self) -> Option<anyhow::Result<T>> {
        match self.rx.try_recv() {
            Ok(value) => Some(Ok(value)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                tracing::error!("{} task ended before producing a result", self.label);
                Some(Err(Abandoned(self.label).into()))
            }
        }
    }
}

/// Take the result out of a slot, emptying the slot once it has arrived
pub fn take_ready<T>(slot: &mut Option<Pending<T>>) -> Option<anyhow::Result<T>> {
    let result = slot.as_mut()?.try_take()?;
    *slot = None;
    Some(result)
}

/// Start an action at most once over the owner's lifetime
///
/// The started flag has no reset path: re-rendering, re-mounting the same
/// owner or calling [`spawn`](RunOnce::spawn) again never re-runs it.
#[derive(Debug, Default)]
pub struct RunOnce {
    started: bool,
}

impl RunOnce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Mark as started; true only for the first call
    pub fn begin(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    /// Run a synchronous trigger the first time only
    pub fn run<R>(&mut self, action: impl FnOnce() -> R) -> Option<R> {
        self.begin().then(action)
    }

    /// Spawn the future built by `factory` the first time only
    pub fn spawn<T, F, Fut>(&mut self, label: &'static str, factory: F) -> Option<Pending<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        self.run(|| Pending::spawn(label, factory()))
    }
}

/// Re-run an action every time its dependencies change by value
///
/// Every invocation is tagged with a generation. Older invocations are not
/// cancelled; they run to completion, but only the result of the newest
/// generation is handed back. Superseded results are dropped.
#[derive(Debug)]
pub struct RunOnChange<D, T> {
    label: &'static str,
    deps: Option<D>,
    generation: u64,
    in_flight: Vec<(u64, Pending<T>)>,
}

impl<D, T> RunOnChange<D, T>
where
    D: PartialEq + Clone,
    T: Send + 'static,
{
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            deps: None,
            generation: 0,
            in_flight: Vec::new(),
        }
    }

    /// Spawn the action if `deps` differ from the previous call
    ///
    /// The very first call always spawns. Returns whether a new invocation
    /// was started.
    pub fn update<F, Fut>(&mut self, deps: &D, factory: F) -> bool
    where
        F: FnOnce(&D) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        if self.deps.as_ref() == Some(deps) {
            return false;
        }
        self.deps = Some(deps.clone());
        self.generation += 1;
        self.in_flight
            .push((self.generation, Pending::spawn(self.label, factory(deps))));
        true
    }

    /// Dependencies of the newest invocation
    pub fn deps(&self) -> Option<&D> {
        self.deps.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the newest invocation is still running
    pub fn is_running(&self) -> bool {
        let current = self.generation;
        self.in_flight.iter().any(|(generation, _)| *generation == current)
    }

    /// Number of invocations, current or superseded, still in flight
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Collect finished invocations, returning the newest generation's result
    pub fn poll(&mut self) -> Option<anyhow::Result<T>> {
        let current = self.generation;
        let label = self.label;
        let mut latest = None;
        self.in_flight.retain_mut(|(generation, pending)| match pending.try_take() {
            None => true,
            Some(result) => {
                if *generation == current {
                    latest = Some(result);
                } else {
                    tracing::debug!(
                        "Discarding superseded {} result (generation {} < {})",
                        label,
                        generation,
                        current
                    );
                }
                false
            }
        });
        latest
    }
}
