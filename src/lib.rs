//! # fcmeans-core
//!
//! Fuzzy C-Means clustering of regional indicators.
//!
//! This crate provides:
//! - The fuzzy c-means engine (memberships, centers, hard labels)
//! - Dataset construction, validation and min-max normalization
//! - Validity indices (partition coefficient/entropy, Xie-Beni, silhouette)
//! - Dashboard summaries (High/Medium/Low tiers, counts, region profiles)
//! - A pluggable explanation service for natural-language summaries
//!
//! ## Data Layout
//!
//! Matrices are column-major: for n observations with d features,
//! `data[i + j * n]` is observation i, feature j. Memberships are n x c and
//! centers c x d.
//!
//! ## Example
//!
//! ```
//! use fcmeans_core::{regions, summary, FcmConfig, FuzzyCMeans};
//!
//! let dataset = regions::sample_regions().unwrap();
//! let engine = FuzzyCMeans::new(FcmConfig::default()).unwrap();
//! let result = engine.fit(&dataset).unwrap();
//! let tiers = summary::rank_tiers(&result).unwrap();
//!
//! assert_eq!(result.labels.len(), 17);
//! assert_eq!(tiers.len(), 3);
//! ```

#![allow(clippy::needless_range_loop)]

pub mod parallel;

pub mod clustering;
pub mod config;
pub mod dataset;
pub mod error;
pub mod explain;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod helpers;
pub mod matrix;
pub mod regions;
pub mod simulation;
pub mod summary;
pub mod validity;

// Re-export commonly used items
pub use clustering::{ClusterStatus, ClusteringResult, FuzzyCMeans};
pub use config::FcmConfig;
pub use dataset::{normalize_min_max, Dataset, Observation};
pub use error::{FcmError, Result};
pub use explain::{ExplanationService, ServiceError};
pub use helpers::squared_euclidean;
pub use matrix::Matrix;
pub use summary::{RegionProfile, Tier};
