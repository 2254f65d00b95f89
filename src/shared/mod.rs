//! Shared Utilities
//!
//! Error taxonomy and the dispatch sequence counter.

pub mod error;
pub mod sequence;

pub use error::{ClientError, NavigationError, PageError, StorageError, SubmissionError};
pub use sequence::DispatchSequence;
