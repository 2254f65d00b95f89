//! Appointment Ledger
//!
//! Append-only record of booking submissions.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::AppointmentRecord;
use crate::infrastructure::storage::{keys, Persistence, ReadPrecedence, StateStore};
use crate::shared::error::StorageError;

/// Ordered, append-only sequence of appointments. Index + 1 is the row
/// number shown in the table.
///
/// An append reads the whole sequence, pushes and writes it back through a
/// versioned write, so an interleaved writer causes a `Conflict` instead of
/// a lost update.
pub struct AppointmentLedger {
    store: Arc<StateStore>,
    mirror_ttl: chrono::Duration,
}

impl AppointmentLedger {
    pub fn new(store: Arc<StateStore>, mirror_ttl: chrono::Duration) -> Self {
        Self { store, mirror_ttl }
    }

    /// Current contents. Missing or unparseable storage reads as empty.
    pub fn list(&self) -> Vec<AppointmentRecord> {
        self.store
            .read_json(keys::APPOINTMENTS, ReadPrecedence::DurableFirst)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a record. Returns the new length.
    #[instrument(skip(self, record), level = "debug")]
    pub fn append(&self, record: AppointmentRecord) -> Result<usize, StorageError> {
        let current = self
            .store
            .read_versioned_json::<Vec<AppointmentRecord>>(keys::APPOINTMENTS, ReadPrecedence::DurableFirst);
        let mut appointments = current.value.unwrap_or_default();
        appointments.push(record);

        self.store.write_versioned_json(
            keys::APPOINTMENTS,
            &appointments,
            current.version,
            Persistence::Mirrored {
                ttl: self.mirror_ttl,
            },
        )?;

        info!(count = appointments.len(), "Appointment recorded");
        Ok(appointments.len())
    }
}
