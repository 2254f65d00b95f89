//! # Domain Entities
//!
//! Records the client persists and renders.
//!
//! - **ServiceRecord**: one listing of the services catalog
//! - **AppointmentRecord**: one booking submission in the ledger
//! - **Theme**: the visual theme preference

mod appointment;
mod preference;
mod service;

pub use appointment::{AppointmentRecord, FormData};
pub use preference::Theme;
pub use service::ServiceRecord;
