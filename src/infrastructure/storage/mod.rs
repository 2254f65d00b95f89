//! Storage Module
//!
//! Persistence tiers and the two-tier state store.
//!
//! This module provides:
//! - A `StorageTier` trait abstracting one key/value persistence tier
//! - Durable tiers: `MemoryTier` (in-process) and `FileTier` (JSON on disk)
//! - A short-lived `CookieTier` with expiry and a per-value size cap
//! - `StateStore`, the single read/write surface over both tiers
//! - Predefined persistence keys
//!
//! # Architecture
//!
//! ```text
//! +-------------------+
//! |   Components      |
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! |   StateStore      |  <-- precedence + versioning
//! +-------------------+
//!      |         |
//!      v         v
//! +---------+ +------------+
//! | durable | | short-lived|  <-- StorageTier implementations
//! +---------+ +------------+
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use vetcare_connect::infrastructure::storage::{keys, Persistence, ReadPrecedence};
//!
//! store.write(keys::DARK_MODE, "true", Persistence::Mirrored { ttl })?;
//! let dark = store.read(keys::DARK_MODE, ReadPrecedence::ShortLivedFirst);
//! ```

mod cookie;
mod file;
mod memory;
mod state_store;
mod tier;

pub use cookie::CookieTier;
pub use file::FileTier;
pub use memory::MemoryTier;
pub use state_store::{Persistence, ReadPrecedence, StateStore, Version, Versioned};
pub use tier::{Clock, ManualClock, StorageTier, SystemClock};

use std::sync::Arc;

use tracing::info;

use crate::config::StorageSettings;
use crate::shared::error::StorageError;

/// Build the durable tier described by the settings: file-backed when a
/// data directory is configured, in-memory otherwise.
pub fn create_durable_tier(settings: &StorageSettings) -> Result<Arc<dyn StorageTier>, StorageError> {
    match &settings.data_dir {
        Some(dir) => Ok(Arc::new(FileTier::open(dir)?)),
        None => {
            info!("No data directory configured, durable tier is in-memory");
            Ok(Arc::new(MemoryTier::new()))
        }
    }
}

/// Build a state store from settings with a fresh short-lived tier.
pub fn create_state_store(settings: &StorageSettings) -> Result<StateStore, StorageError> {
    let durable = create_durable_tier(settings)?;
    let short_lived = Arc::new(CookieTier::new(settings.cookie_max_bytes));
    Ok(StateStore::new(durable, short_lived))
}

/// Persistence keys.
///
/// Use these constants to ensure consistent key naming across components.
pub mod keys {
    /// Theme preference, boolean string (both tiers)
    pub const DARK_MODE: &str = "darkMode";

    /// Appointment ledger, JSON array (both tiers)
    pub const APPOINTMENTS: &str = "appointments";

    /// Services catalog, JSON array (durable tier only)
    pub const SERVICES: &str = "services";

    /// Last form contents, JSON object (read-only here)
    pub const LAST_FORM_DATA: &str = "lastFormData";

    /// Suffix appended to a search endpoint to form its last-search key
    pub const LAST_SEARCH_SUFFIX: &str = "_lastSearch";

    /// Generates the last-search key for an endpoint
    #[inline]
    pub fn last_search(endpoint: &str) -> String {
        format!("{}{}", endpoint, LAST_SEARCH_SUFFIX)
    }
}
