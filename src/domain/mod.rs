//! # Domain Layer
//!
//! Records the client works with and the contract of the page it drives.
//! Independent of storage backends, HTTP clients and markup templates.
//!
//! ## Structure
//!
//! - **entities**: persisted records (services, appointments, theme)
//! - **page**: the `Page` trait, the seam to the document's regions and forms

pub mod entities;
pub mod page;

// Re-export commonly used types
pub use entities::*;
pub use page::{Fragment, Page};
