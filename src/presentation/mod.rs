//! Presentation Layer
//!
//! Markup templates, the client event vocabulary and the console command
//! parser used by the headless driver.

pub mod console;
pub mod events;
pub mod templates;

pub use events::ClientEvent;
