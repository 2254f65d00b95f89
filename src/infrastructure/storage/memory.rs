//! In-memory durable tier.

use chrono::Duration;
use dashmap::DashMap;
use tracing::debug;

use super::tier::StorageTier;
use crate::shared::error::StorageError;

/// Durable tier kept in process memory, with an optional total-size quota.
///
/// Stands in for browser local storage when no data directory is configured.
#[derive(Debug, Default)]
pub struct MemoryTier {
    entries: DashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryTier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse writes that would push the total stored size past `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: DashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes of keys and values currently stored.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.key().len() + entry.value().len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageTier for MemoryTier {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<(), StorageError> {
        if let Some(limit) = self.quota_bytes {
            let replaced = self
                .entries
                .get(key)
                .map(|v| key.len() + v.value().len())
                .unwrap_or(0);
            let size = self.used_bytes() - replaced + key.len() + value.len();
            if size > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size,
                    limit,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        debug!(key = %key, bytes = value.len(), "Memory tier set");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.remove(key).is_some())
    }
}
