//! Error types for streamvec.

use thiserror::Error;

/// Errors raised by instance algebra and line parsing.
#[derive(Error, Debug)]
pub enum InstanceError {
    /// Access or update past the end of a dense instance
    #[error("Index out of range: index {index}, length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Element-wise operation between dense instances of unequal length
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Type selector other than "dense" or "sparse"
    #[error("Unknown instance variant: {0:?}")]
    UnknownVariant(String),

    /// Token that does not fit the grammar of the selected variant
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Empty input where non-empty was required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// JSON snapshot error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for streamvec operations.
pub type Result<T> = std::result::Result<T, InstanceError>;
