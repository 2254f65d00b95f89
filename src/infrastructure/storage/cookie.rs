//! Cookie-like short-lived tier.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

use super::tier::{Clock, StorageTier, SystemClock};
use crate::shared::error::StorageError;

/// Expiry used when a write carries no TTL (session-length cookie).
const SESSION_TTL_DAYS: i64 = 1;

#[derive(Debug, Clone)]
struct CookieEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Short-lived tier with per-entry expiry and a per-value size cap.
///
/// Mirrors cookie semantics: writing with a non-positive TTL deletes the
/// entry, expired entries read as absent and are purged on access.
pub struct CookieTier {
    entries: DashMap<String, CookieEntry>,
    clock: Arc<dyn Clock>,
    max_value_bytes: usize,
}

impl CookieTier {
    pub fn new(max_value_bytes: usize) -> Self {
        Self::with_clock(max_value_bytes, Arc::new(SystemClock))
    }

    pub fn with_clock(max_value_bytes: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
            max_value_bytes,
        }
    }

    /// When the entry expires, if present.
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|e| e.expires_at)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before - self.entries.len()
    }
}

impl std::fmt::Debug for CookieTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieTier")
            .field("entries", &self.entries.len())
            .field("max_value_bytes", &self.max_value_bytes)
            .finish_non_exhaustive()
    }
}

impl StorageTier for CookieTier {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            debug!(key = %key, "Cookie expired");
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StorageError> {
        let ttl = ttl.unwrap_or_else(|| Duration::days(SESSION_TTL_DAYS));
        if ttl <= Duration::zero() {
            self.entries.remove(key);
            return Ok(());
        }

        let size = key.len() + value.len();
        if size > self.max_value_bytes {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                size,
                limit: self.max_value_bytes,
            });
        }

        let expires_at = self.clock.now() + ttl;
        self.entries.insert(
            key.to_string(),
            CookieEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        debug!(key = %key, expires_at = %expires_at, "Cookie set");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.remove(key).is_some())
    }
}
