//! Fuzzy c-means parameters.
//!
//! Defaults follow the regional productivity study: three clusters,
//! fuzziness 2, at most 100 iterations and a stopping tolerance of 1e-4 on
//! the membership change.

use crate::error::{FcmError, Result};
use crate::helpers::{
    DEFAULT_FUZZINESS, DEFAULT_MAX_ITERATIONS, DEFAULT_NUM_CLUSTERS, DEFAULT_TOLERANCE,
};
use serde::{Deserialize, Serialize};

/// Default seed for the initial membership matrix.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of a fuzzy c-means run.
///
/// Missing fields take their defaults when deserialized:
///
/// ```
/// use fcmeans_core::config::FcmConfig;
///
/// let config = FcmConfig::from_json_str(r#"{"num_clusters": 4, "fuzziness": 1.8}"#).unwrap();
/// assert_eq!(config.num_clusters, 4);
/// assert_eq!(config.max_iterations, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FcmConfig {
    /// Number of clusters `c` (at least 2)
    pub num_clusters: usize,
    /// Fuzziness exponent `m` (greater than 1)
    pub fuzziness: f64,
    /// Iteration cap (at least 1)
    pub max_iterations: usize,
    /// Convergence threshold on the maximum membership change (positive)
    pub tolerance: f64,
    /// Seed of the random initial membership matrix
    pub seed: u64,
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            num_clusters: DEFAULT_NUM_CLUSTERS,
            fuzziness: DEFAULT_FUZZINESS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            seed: DEFAULT_SEED,
        }
    }
}

impl FcmConfig {
    /// Default parameters with `num_clusters` clusters.
    pub fn new(num_clusters: usize) -> Self {
        Self {
            num_clusters,
            ..Self::default()
        }
    }

    pub fn with_fuzziness(mut self, fuzziness: f64) -> Self {
        self.fuzziness = fuzziness;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every parameter constraint.
    pub fn validate(&self) -> Result<()> {
        if self.num_clusters < 2 {
            return Err(FcmError::InvalidConfig {
                field: "num_clusters",
                reason: format!("must be at least 2, got {}", self.num_clusters),
            });
        }
        if !self.fuzziness.is_finite() || self.fuzziness <= 1.0 {
            return Err(FcmError::InvalidConfig {
                field: "fuzziness",
                reason: format!("must be a finite value greater than 1, got {}", self.fuzziness),
            });
        }
        if self.max_iterations < 1 {
            return Err(FcmError::InvalidConfig {
                field: "max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(FcmError::InvalidConfig {
                field: "tolerance",
                reason: format!("must be a finite positive value, got {}", self.tolerance),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}
