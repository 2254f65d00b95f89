//! Client Error Types
//!
//! Centralized error taxonomy for the client pipeline.
//!
//! Nothing here is fatal to the page: every variant is either recovered
//! locally by the component that hit it, or turned into a user-facing
//! notification by the event routing layer.

use std::time::Duration;

/// Failures of a persistence tier.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage quota exceeded for key {key}: {size} bytes (limit {limit})")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Version conflict on {key}: expected {expected}, found {found}")]
    Conflict { key: String, expected: u64, found: u64 },
}

/// Failures of the page seam (missing markup targets).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Region not found: {0}")]
    MissingRegion(String),

    #[error("Form not found: {0}")]
    MissingForm(String),
}

/// Navigation failures. All variants surface as the same generic
/// notification; they differ only in what gets logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl NavigationError {
    /// Label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NavigationError::Transport(_) => "transport",
            NavigationError::Timeout(_) => "timeout",
            NavigationError::Status(_) => "status",
            NavigationError::Protocol(_) => "protocol",
        }
    }
}

/// Form submission failures.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Appointment could not be saved: {0}")]
    Storage(#[from] StorageError),
}

/// Umbrella error for event handlers.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
