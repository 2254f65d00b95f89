//! Form Submission Pipeline
//!
//! Appointment booking: serialize the form, append to the ledger, confirm,
//! reset, re-render the table.
//!
//! ```text
//! submit
//!   -> clear field errors
//!   -> serialize fields
//!   -> ledger.append ---- Err --> failure alert (form kept as typed)
//!          |
//!          Ok
//!   -> success alert + toast
//!   -> reset form
//!   -> render table from ledger
//! ```

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::appointment_ledger::AppointmentLedger;
use super::notifications::NotificationSurface;
use crate::config::Settings;
use crate::domain::{AppointmentRecord, FormData, Page};
use crate::infrastructure::metrics;
use crate::infrastructure::storage::{keys, ReadPrecedence, StateStore};
use crate::presentation::templates::{self, NoticeKind};
use crate::shared::error::{PageError, SubmissionError};

pub const SAVED_MESSAGE: &str = "Appointment booked successfully!";
pub const SAVED_TOAST: &str = "Appointment saved locally!";
pub const SAVE_FAILED_MESSAGE: &str = "Appointment could not be saved. Please try again.";

pub struct FormSubmissionPipeline {
    page: Arc<dyn Page>,
    store: Arc<StateStore>,
    ledger: Arc<AppointmentLedger>,
    notifications: NotificationSurface,
    form: String,
    message_region: String,
    table_body: String,
}

impl FormSubmissionPipeline {
    pub fn new(
        page: Arc<dyn Page>,
        store: Arc<StateStore>,
        ledger: Arc<AppointmentLedger>,
        notifications: NotificationSurface,
        settings: &Settings,
    ) -> Self {
        Self {
            page,
            store,
            ledger,
            notifications,
            form: settings.regions.form.clone(),
            message_region: settings.regions.form_message.clone(),
            table_body: settings.regions.appointments_body.clone(),
        }
    }

    /// Handle one submission. Returns the ledger length after the append.
    ///
    /// Fields are not validated; empty values are stored as empty strings.
    /// Confirmation is shown only once the record is durably stored.
    #[instrument(skip(self))]
    pub fn submit(&self) -> Result<usize, SubmissionError> {
        let cleared = self.page.clear_field_errors(&self.form)?;
        if cleared > 0 {
            debug!(cleared, "Cleared field errors");
        }

        let fields = self.page.form_fields(&self.form)?;
        let record = AppointmentRecord::from_form(&fields);
        let missing = record.empty_fields();
        if !missing.is_empty() {
            warn!(?missing, "Submitting appointment with empty fields");
        }

        let count = match self.ledger.append(record) {
            Ok(count) => count,
            Err(e) => {
                error!(error = %e, "Appointment was not stored");
                metrics::record_submission("failed");
                if let Err(alert_err) = self.notifications.show_alert(
                    &self.message_region,
                    SAVE_FAILED_MESSAGE,
                    NoticeKind::Danger,
                ) {
                    warn!(error = %alert_err, "Could not show failure alert");
                }
                return Err(e.into());
            }
        };

        // Persisted from here on; rendering problems are only logged
        if let Err(e) =
            self.notifications
                .show_alert(&self.message_region, SAVED_MESSAGE, NoticeKind::Success)
        {
            warn!(error = %e, "Could not show confirmation");
        }
        if let Err(e) = self.notifications.show_toast(SAVED_TOAST, NoticeKind::Success) {
            warn!(error = %e, "Could not show toast");
        }
        if let Err(e) = self.page.reset_form(&self.form) {
            warn!(error = %e, "Could not reset form");
        }
        if let Err(e) = self.render_table() {
            warn!(error = %e, "Could not render appointments");
        }

        metrics::record_submission("saved");
        info!(count, "Appointment submitted");
        Ok(count)
    }

    /// Render every ledger entry into the table body. Returns the row count.
    pub fn render_table(&self) -> Result<usize, PageError> {
        let appointments = self.ledger.list();
        self.page
            .set_html(&self.table_body, &templates::appointment_rows(&appointments))?;
        Ok(appointments.len())
    }

    /// Render the table if the page has one.
    pub fn init_table(&self) -> Result<Option<usize>, PageError> {
        if !self.page.has_region(&self.table_body) {
            return Ok(None);
        }
        self.render_table().map(Some)
    }

    /// Refill the form from the saved draft. Returns how many fields were set.
    pub fn restore_form_data(&self) -> Result<usize, PageError> {
        let Some(saved) = self
            .store
            .read_json::<FormData>(keys::LAST_FORM_DATA, ReadPrecedence::DurableFirst)
        else {
            return Ok(0);
        };

        let mut restored = 0;
        for (name, value) in &saved {
            if self.page.set_field(&self.form, name, value)? {
                restored += 1;
            }
        }
        debug!(restored, "Form data restored");
        Ok(restored)
    }
}
