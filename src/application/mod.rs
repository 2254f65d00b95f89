//! Application Layer
//!
//! The client components. They depend on the domain `Page` seam and on
//! infrastructure storage and fetching, never on each other's internals.

pub mod services;
