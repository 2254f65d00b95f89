//! State Store
//!
//! One read/write/delete surface over the durable and short-lived tiers.
//!
//! # Precedence
//!
//! Every write goes to the durable tier first and fails if that write
//! fails. Writes marked [`Persistence::Mirrored`] then go to the short-lived
//! tier with an expiry horizon; a failed mirror write is logged and ignored,
//! the durable copy is authoritative.
//!
//! Reads follow an explicit [`ReadPrecedence`]. The default consults the
//! short-lived tier first and falls back to the durable tier.
//!
//! # Versioning
//!
//! Each key carries a session-local version that every write through this
//! store bumps. A read-modify-write sequence reads a [`Version`] with
//! [`StateStore::read_versioned_json`] and writes back with
//! [`StateStore::write_versioned_json`], which rejects the write with
//! [`StorageError::Conflict`] if anything else wrote the key in between.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use super::tier::StorageTier;
use crate::infrastructure::metrics;
use crate::shared::error::StorageError;

/// Which tier answers a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPrecedence {
    /// Short-lived value when present and unexpired, else durable.
    #[default]
    ShortLivedFirst,
    /// Durable value when present, else short-lived.
    DurableFirst,
    /// Durable tier only.
    DurableOnly,
}

/// Where a write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    DurableOnly,
    Mirrored { ttl: Duration },
}

/// Opaque per-key version token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Version(u64);

impl Version {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A decoded value together with the version it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub value: Option<T>,
    pub version: Version,
}

/// Two-tier store with explicit precedence and versioned writes.
pub struct StateStore {
    durable: Arc<dyn StorageTier>,
    short_lived: Arc<dyn StorageTier>,
    versions: Mutex<HashMap<String, u64>>,
}

impl StateStore {
    pub fn new(durable: Arc<dyn StorageTier>, short_lived: Arc<dyn StorageTier>) -> Self {
        Self {
            durable,
            short_lived,
            versions: Mutex::new(HashMap::new()),
        }
    }

    /// Current version of a key (zero if never written this session).
    pub fn version(&self, key: &str) -> Version {
        Version(self.versions.lock().get(key).copied().unwrap_or(0))
    }

    /// Read a raw value. Tier failures are logged and read as absent.
    #[instrument(skip(self), level = "debug")]
    pub fn read(&self, key: &str, precedence: ReadPrecedence) -> Option<String> {
        let (first, second): (&dyn StorageTier, Option<&dyn StorageTier>) = match precedence {
            ReadPrecedence::ShortLivedFirst => (&*self.short_lived, Some(&*self.durable)),
            ReadPrecedence::DurableFirst => (&*self.durable, Some(&*self.short_lived)),
            ReadPrecedence::DurableOnly => (&*self.durable, None),
        };

        if let Some(value) = Self::read_tier(first, key) {
            debug!(key = %key, tier = first.name(), "State hit");
            return Some(value);
        }
        let value = second.and_then(|tier| Self::read_tier(tier, key));
        debug!(key = %key, found = value.is_some(), "State fallback read");
        value
    }

    /// Read and decode a JSON value. A value that is present but does not
    /// decode is treated as absent.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str, precedence: ReadPrecedence) -> Option<T> {
        let raw = self.read(key, precedence)?;
        Self::decode(key, &raw)
    }

    /// Write a raw value.
    #[instrument(skip(self, value), level = "debug")]
    pub fn write(
        &self,
        key: &str,
        value: &str,
        persistence: Persistence,
    ) -> Result<Version, StorageError> {
        let mut versions = self.versions.lock();
        self.write_locked(&mut versions, key, value, persistence)
    }

    /// Encode and write a JSON value.
    pub fn write_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        persistence: Persistence,
    ) -> Result<Version, StorageError> {
        let data = serde_json::to_string(value)?;
        self.write(key, &data, persistence)
    }

    /// Read a JSON value along with its version token.
    pub fn read_versioned_json<T: DeserializeOwned>(
        &self,
        key: &str,
        precedence: ReadPrecedence,
    ) -> Versioned<T> {
        let versions = self.versions.lock();
        let version = Version(versions.get(key).copied().unwrap_or(0));
        let value = self
            .read(key, precedence)
            .and_then(|raw| Self::decode(key, &raw));
        Versioned { value, version }
    }

    /// Write a JSON value only if the key is still at `expected`.
    #[instrument(skip(self, value), level = "debug")]
    pub fn write_versioned_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        expected: Version,
        persistence: Persistence,
    ) -> Result<Version, StorageError> {
        let data = serde_json::to_string(value)?;
        let mut versions = self.versions.lock();
        let found = versions.get(key).copied().unwrap_or(0);
        if found != expected.0 {
            warn!(key = %key, expected = expected.0, found, "Rejected stale write");
            return Err(StorageError::Conflict {
                key: key.to_string(),
                expected: expected.0,
                found,
            });
        }
        self.write_locked(&mut versions, key, &data, persistence)
    }

    /// Delete a key from both tiers.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut versions = self.versions.lock();
        self.durable.remove(key)?;
        if let Err(e) = self.short_lived.remove(key) {
            warn!(key = %key, error = %e, "Short-lived delete failed");
        }
        *versions.entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn write_locked(
        &self,
        versions: &mut HashMap<String, u64>,
        key: &str,
        value: &str,
        persistence: Persistence,
    ) -> Result<Version, StorageError> {
        self.durable.set(key, value, None)?;

        if let Persistence::Mirrored { ttl } = persistence {
            if let Err(e) = self.short_lived.set(key, value, Some(ttl)) {
                warn!(
                    key = %key,
                    tier = self.short_lived.name(),
                    error = %e,
                    "Mirror write failed, durable copy kept"
                );
                // An older mirrored value must not shadow the new durable one
                if let Err(e) = self.short_lived.remove(key) {
                    warn!(
                        key = %key,
                        tier = self.short_lived.name(),
                        error = %e,
                        "Stale mirrored copy not removed"
                    );
                }
            }
        }

        let version = versions.entry(key.to_string()).or_insert(0);
        *version += 1;
        debug!(key = %key, version = *version, "State written");
        Ok(Version(*version))
    }

    fn read_tier(tier: &dyn StorageTier, key: &str) -> Option<String> {
        match tier.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, tier = tier.name(), error = %e, "Tier read failed");
                None
            }
        }
    }

    fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Stored value unparseable, treating as absent");
                metrics::record_decode_failure(key);
                None
            }
        }
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("durable", &self.durable.name())
            .field("short_lived", &self.short_lived.name())
            .finish_non_exhaustive()
    }
}
