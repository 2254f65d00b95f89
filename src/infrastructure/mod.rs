//! Infrastructure Layer
//!
//! Contains implementations for external collaborators:
//! - Persistence tiers and the two-tier state store
//! - HTTP client for the navigation endpoint
//! - In-memory page
//! - Prometheus metrics

pub mod http;
pub mod metrics;
pub mod page;
pub mod storage;
