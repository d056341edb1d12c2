//! Error types for clustering.
//!
//! Every shape or configuration violation is rejected before any iteration
//! runs. Numerical edge cases (zero distance, empty cluster) are resolved
//! inside the engine and never surface here, and non-convergence is reported
//! through [`ClusterStatus`](crate::clustering::ClusterStatus).

use thiserror::Error;

/// Errors returned by dataset construction, configuration and fitting.
#[derive(Debug, Error)]
pub enum FcmError {
    /// Generic input violation.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: String,
    },

    /// Fewer observations than requested clusters.
    #[error("invalid input: {n} observations cannot form {clusters} clusters")]
    TooFewObservations {
        /// Number of observations supplied
        n: usize,
        /// Number of clusters requested
        clusters: usize,
    },

    /// An observation does not share the dataset's dimensionality.
    #[error("invalid input: observation {index} has {actual} features, expected {expected}")]
    DimensionMismatch {
        /// Position of the offending observation
        index: usize,
        /// Dimensionality of the dataset
        expected: usize,
        /// Dimensionality of the observation
        actual: usize,
    },

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the parameter
        field: &'static str,
        /// Constraint that was violated
        reason: String,
    },

    /// Configuration text could not be parsed.
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl FcmError {
    /// Shorthand for [`FcmError::InvalidInput`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        FcmError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Whether this error is a shape or configuration violation.
    ///
    /// Malformed configuration text is reported separately.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, FcmError::Config(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FcmError>;
