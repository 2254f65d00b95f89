//! Service listing entity.

use serde::{Deserialize, Serialize};

/// One entry of the services catalog.
///
/// Immutable once seeded; the full ordered sequence is the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Display name, also the search key
    pub name: String,

    /// One-line description shown on the card
    pub description: String,

    /// Icon class list (e.g. "fas fa-syringe")
    pub icon: String,
}

impl ServiceRecord {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
        }
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn name_matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }

    /// The four services offered when nothing has been stored yet.
    pub fn defaults() -> Vec<ServiceRecord> {
        vec![
            ServiceRecord::new("Vaccination", "Keep your pets healthy", "fas fa-syringe"),
            ServiceRecord::new("Dental Cleaning", "Clean and healthy teeth", "fas fa-tooth"),
            ServiceRecord::new(
                "Surgery Consultation",
                "Expert surgical advice",
                "fas fa-stethoscope",
            ),
            ServiceRecord::new("Pet Grooming", "Make your pets shine", "fas fa-cut"),
        ]
    }
}
