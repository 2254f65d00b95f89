//! Storage tier contract and clock.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::shared::error::StorageError;

/// One persistence tier holding opaque string values.
///
/// Tier operations are synchronous: storage never suspends the event loop.
/// Durable tiers ignore `ttl`; short-lived tiers expire entries after it.
pub trait StorageTier: Send + Sync {
    /// Short name for logs ("durable", "cookie", ...).
    fn name(&self) -> &'static str;

    /// Retrieves a value.
    ///
    /// # Returns
    /// * `Ok(Some(value))` - If the key exists and has not expired
    /// * `Ok(None)` - If the key does not exist
    /// * `Err(StorageError)` - If the backing store failed
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores a value, optionally with an expiry horizon.
    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StorageError>;

    /// Deletes a key.
    ///
    /// # Returns
    /// * `Ok(true)` - If the key existed and was deleted
    /// * `Ok(false)` - If the key did not exist
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

/// Source of the current time for expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used to simulate expiry.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
