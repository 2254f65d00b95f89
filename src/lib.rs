//! # VetCare Connect Client
//!
//! Client-side state sync and dispatch pipeline of a veterinary clinic
//! booking site:
//! - Two-tier preference and record persistence with explicit precedence
//! - Debounced search over the services catalog
//! - Fetch-and-replace navigation with superseding dispatches
//! - Appointment booking into an append-only ledger
//! - Theme toggle, toasts, alerts and spinners
//!
//! ## Architecture
//!
//! - **Domain Layer**: Records and the `Page` trait
//! - **Application Layer**: The client components
//! - **Infrastructure Layer**: Storage tiers, HTTP fetching, in-memory page, metrics
//! - **Presentation Layer**: Markup templates, client events, console commands
//!
//! ## Module Structure
//!
//! ```text
//! vetcare_connect/
//! +-- config/         Configuration management
//! +-- domain/         Records and the page seam
//! +-- application/    Client components
//! +-- infrastructure/ Storage, HTTP, headless page, metrics
//! +-- presentation/   Templates, events, console commands
//! +-- shared/         Errors and dispatch sequencing
//! ```

// Configuration module
pub mod config;

// Domain layer - Records and the page seam
pub mod domain;

// Application layer - Client components
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - Templates and events
pub mod presentation;

// Shared utilities
pub mod shared;

// Component wiring and the headless driver
pub mod startup;

// Telemetry and observability
pub mod telemetry;
