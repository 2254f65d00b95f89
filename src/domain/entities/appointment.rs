//! Appointment booking entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat field-name to value mapping, as serialized from a form.
pub type FormData = BTreeMap<String, String>;

/// A booking submission.
///
/// All fields are user-supplied and unvalidated. Missing fields decode as
/// empty strings so older or partial records still render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentRecord {
    pub name: String,
    pub email: String,
    pub pet: String,
    pub service: String,
    pub date: String,
}

impl AppointmentRecord {
    /// Field names a booking form is expected to carry, in display order.
    pub const FIELDS: [&'static str; 5] = ["name", "email", "pet", "service", "date"];

    /// Build a record from serialized form fields. Unknown fields are ignored.
    pub fn from_form(data: &FormData) -> Self {
        let field = |name: &str| data.get(name).cloned().unwrap_or_default();
        Self {
            name: field("name"),
            email: field("email"),
            pet: field("pet"),
            service: field("service"),
            date: field("date"),
        }
    }

    /// Values in display order (matches [`Self::FIELDS`]).
    pub fn columns(&self) -> [&str; 5] {
        [&self.name, &self.email, &self.pet, &self.service, &self.date]
    }

    /// Names of the fields that were submitted empty.
    pub fn empty_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .zip(self.columns())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}
