//! Application Services
//!
//! The client components. Each owns one concern and writes only to its own
//! regions; storage is shared through the [`StateStore`](crate::infrastructure::storage::StateStore).
//!
//! ## Available Services
//!
//! - **Debouncer**: Coalesces bursts of calls into one
//! - **NotificationSurface**: Spinners, alerts and toasts
//! - **AppointmentLedger**: Append-only appointment record
//! - **ServiceCatalog**: Services listing with built-in defaults
//! - **SearchPipeline**: Debounced search over the catalog
//! - **NavigationDispatcher**: Fetch-and-replace navigation
//! - **FormSubmissionPipeline**: Appointment booking form
//! - **ThemeToggle**: Dark mode preference
//! - **HeaderController**: Header shading and menus
//! - **AjaxButtons**: Simulated button responses

pub mod ajax_buttons;
pub mod appointment_ledger;
pub mod debouncer;
pub mod form_submission;
pub mod header;
pub mod navigation;
pub mod notifications;
pub mod search;
pub mod service_catalog;
pub mod theme;

pub use ajax_buttons::AjaxButtons;
pub use appointment_ledger::AppointmentLedger;
pub use debouncer::Debouncer;
pub use form_submission::FormSubmissionPipeline;
pub use header::HeaderController;
pub use navigation::{NavigationDispatcher, NavigationOutcome, NavigationResponse};
pub use notifications::{NotificationSurface, SpinnerGuard};
pub use search::{filter_services, SearchPipeline};
pub use service_catalog::ServiceCatalog;
pub use theme::ThemeToggle;
