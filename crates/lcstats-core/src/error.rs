//! Error types for light-curve statistics
//!
//! Provides a unified error type for all lcstats crates.

use thiserror::Error;

/// Core error type for light-curve statistical operations
///
/// The variants encode three severities that the per-trial driver treats
/// differently:
///
/// - [`Error::Undefined`] is recoverable: the statistic has no meaningful
///   value for this trial's data, a null marker is recorded and the run
///   continues.
/// - [`Error::InsufficientData`] aborts the whole trial: the input series
///   itself is unusable, so no family should record anything for it.
/// - Everything else signals a caller bug or a failed numeric backend and
///   propagates to the top of the run.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The statistic has no meaningful value for this trial's data
    #[error("Statistic undefined: {0}")]
    Undefined(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_operation: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for invalid quantile
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {p} must be in [0, 1]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for an undefined statistic
    pub fn undefined(context: &str) -> Self {
        Self::Undefined(context.to_string())
    }

    /// Whether the per-trial driver may absorb this error by recording a
    /// null observation. Only [`Error::Undefined`] qualifies;
    /// [`Error::InsufficientData`] must propagate out of the trial.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Undefined(_))
    }
}
