//! Reorder error types

use thiserror::Error;

/// Errors surfaced to the embedding application
///
/// Only misconfiguration is fatal. Everything that can go wrong during a
/// drag degrades to a retry or a no-op instead of an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// No key extractor was supplied to the list builder
    #[error("a key extractor is required to build a reorderable list")]
    MissingKeyExtractor,
}

/// Reasons a cell measurement can fail
///
/// These never reach the caller; the measurement store requeues the cell.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeasureError {
    /// The cell's view is not mounted yet
    #[error("cell `{0}` is not mounted")]
    NotMounted(String),

    /// The list container cannot be measured against yet
    #[error("list container is unavailable")]
    ContainerUnavailable,

    /// The host dropped the reply without answering
    #[error("measurement reply was dropped")]
    Dropped,

    /// Any other host-side failure
    #[error("measurement failed: {0}")]
    Failed(String),
}

/// Result type for reorder operations
pub type Result<T> = std::result::Result<T, ReorderError>;
