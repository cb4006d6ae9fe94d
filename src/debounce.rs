//! Value debouncing
//!
//! A [`Debouncer`] holds the last settled value and at most one timer. Each
//! new value replaces the timer; the value settles only after the delay has
//! passed without another push. The timer is a spawned task owned by a guard
//! that aborts it when the debouncer is dropped, so nothing fires into a
//! view that no longer exists.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Delay used when the caller has no preference
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Aborts the timer task on drop
#[derive(Debug)]
struct TimerGuard(JoinHandle<()>);

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    current: T,
    seq: u64,
    timer: Option<TimerGuard>,
    tx: mpsc::UnboundedSender<(u64, T)>,
    rx: mpsc::UnboundedReceiver<(u64, T)>,
}

impl<T: Clone + Send + 'static> Debouncer<T> {
    /// Create a debouncer whose settled value starts as `initial`
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            current: initial,
            seq: 0,
            timer: None,
            tx,
            rx,
        }
    }

    /// The most recently settled value
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Whether a pushed value is still waiting out its delay
    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Supply a new value, restarting the delay
    pub fn push(&mut self, value: T) {
        self.seq += 1;
        let seq = self.seq;
        // fixed now so the delay counts from the push, not from when the task first runs
        let deadline = Instant::now() + self.delay;
        let tx = self.tx.clone();

        self.timer = Some(TimerGuard(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send((seq, value));
        })));
    }

    /// Drop any pending value without emitting it
    pub fn cancel(&mut self) {
        self.seq += 1;
        self.timer = None;
    }

    /// Apply a settled value if one has arrived; returns true when it did
    pub fn poll(&mut self) -> bool {
        let mut settled = false;
        while let Ok((seq, value)) = self.rx.try_recv() {
            settled |= self.accept(seq, value);
        }
        settled
    }

    /// Wait until the pending value settles
    ///
    /// Returns immediately with the current value when nothing is pending.
    pub async fn settled(&mut self) -> &T {
        while self.timer.is_some() {
            match self.rx.recv().await {
                Some((seq, value)) => {
                    self.accept(seq, value);
                }
                None => break,
            }
        }
        &self.current
    }

    fn accept(&mut self, seq: u64, value: T) -> bool {
        // a timer that fired just before being replaced may still have sent
        if seq != self.seq {
            return false;
        }
        self.current = value;
        self.timer = None;
        true
    }
}
