//! Errors reported by tree operations.

use thiserror::Error;

/// The ways a tree operation can be rejected. Everything not listed here is total: removing or
/// finding a missing value is a no-op or a negative answer, not an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The caller passed an absent value where a value is required.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Shorthand for results of tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
