//! Dispatch Sequence
//!
//! Monotonic sequence numbers for ordering overlapping asynchronous dispatches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues strictly increasing sequence numbers, starting at 1.
#[derive(Debug, Default)]
pub struct DispatchSequence {
    issued: AtomicU64,
}

impl DispatchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next sequence number.
    pub fn next(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Highest sequence number issued so far (0 if none).
    pub fn latest(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Whether `seq` is still the newest dispatch.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest()
    }
}
