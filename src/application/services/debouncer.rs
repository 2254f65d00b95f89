//! Debouncer
//!
//! Coalesces bursts of calls into one delayed invocation.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

#[derive(Debug)]
struct Pending {
    generation: u64,
    token: CancellationToken,
}

#[derive(Debug, Default)]
struct Slot {
    pending: Option<Pending>,
    generation: u64,
}

/// Delays a callback until calls have been quiet for the configured
/// interval. Scheduling again cancels the pending callback; a cancelled
/// callback never runs.
///
/// Each input source owns its own instance. At most one callback is pending
/// per instance. Scheduling spawns onto the current Tokio runtime; outside
/// one the call is dropped with a warning.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `callback` after the configured delay.
    pub fn schedule<F>(&self, callback: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_in(self.delay, callback)
    }

    /// Schedule `callback` after `delay`, superseding any pending callback.
    /// Returns whether the callback was scheduled.
    pub fn schedule_in<F>(&self, delay: Duration, callback: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            // The newer call still supersedes whatever was pending
            self.cancel();
            warn!("No runtime, debounced call dropped");
            return false;
        };

        let token = CancellationToken::new();
        let generation = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            if let Some(previous) = slot.pending.take() {
                previous.token.cancel();
                trace!(generation = previous.generation, "Debounced call superseded");
            }
            slot.pending = Some(Pending {
                generation: slot.generation,
                token: token.clone(),
            });
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        handle.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // Claim the slot under the lock; once claimed the call
                    // can no longer be cancelled.
                    let claimed = {
                        let mut slot = slot.lock();
                        let current = slot.pending.as_ref().is_some_and(|p| {
                            p.generation == generation && !p.token.is_cancelled()
                        });
                        if current {
                            slot.pending = None;
                        }
                        current
                    };
                    if claimed {
                        trace!(generation, "Debounced call fired");
                        callback();
                    }
                }
            }
        });
        true
    }

    /// Cancel the pending callback, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        match self.slot.lock().pending.take() {
            Some(pending) => {
                pending.token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.lock().pending.is_some()
    }
}
