//! Named observations and their preprocessing.
//!
//! A [`Dataset`] is an ordered, immutable collection of regions, each carrying
//! a feature vector of the same length. Validation happens once, at
//! construction, so the clustering engine can rely on a rectangular,
//! finite table with unique region names.

use crate::error::{FcmError, Result};
use crate::matrix::Matrix;
use std::collections::HashSet;

/// One region and its feature values.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Region name, unique within a dataset
    pub name: String,
    /// Feature values (normalized to \[0, 1\] for the regional study)
    pub features: Vec<f64>,
}

impl Observation {
    pub fn new(name: impl Into<String>, features: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            features,
        }
    }
}

/// Ordered collection of observations sharing one dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
    feature_names: Option<Vec<String>>,
    dim: usize,
}

impl Dataset {
    /// Build a dataset, rejecting empty input, empty or duplicate names,
    /// ragged feature vectors, zero-width vectors and non-finite values.
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        let dim = validate_observations(&observations)?;
        Ok(Self {
            observations,
            feature_names: None,
            dim,
        })
    }

    /// Like [`Dataset::new`], with one name per feature column.
    pub fn with_feature_names(
        observations: Vec<Observation>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        let dim = validate_observations(&observations)?;
        if feature_names.len() != dim {
            return Err(FcmError::invalid(format!(
                "{} feature names given for {} features",
                feature_names.len(),
                dim
            )));
        }
        Ok(Self {
            observations,
            feature_names: Some(feature_names),
            dim,
        })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false for a constructed dataset; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Feature dimensionality `d`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn observation(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    /// Region names in dataset order.
    pub fn names(&self) -> Vec<&str> {
        self.observations.iter().map(|o| o.name.as_str()).collect()
    }

    /// Position of a region by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.observations.iter().position(|o| o.name == name)
    }

    /// Feature names, falling back to `x1..xd` when none were given.
    pub fn feature_names(&self) -> Vec<String> {
        match &self.feature_names {
            Some(names) => names.clone(),
            None => (1..=self.dim).map(|j| format!("x{j}")).collect(),
        }
    }

    /// Observations as an n × d matrix.
    pub fn to_matrix(&self) -> Matrix {
        let n = self.observations.len();
        let mut mat = Matrix::zeros(n, self.dim);
        for (i, obs) in self.observations.iter().enumerate() {
            mat.set_row(i, &obs.features);
        }
        mat
    }
}

/// Returns the common dimensionality.
fn validate_observations(observations: &[Observation]) -> Result<usize> {
    let first = observations
        .first()
        .ok_or_else(|| FcmError::invalid("dataset must contain at least one observation"))?;
    let dim = first.features.len();
    if dim == 0 {
        return Err(FcmError::invalid("observations must have at least one feature"));
    }

    let mut seen = HashSet::with_capacity(observations.len());
    for (index, obs) in observations.iter().enumerate() {
        if obs.name.trim().is_empty() {
            return Err(FcmError::invalid(format!("observation {index} has an empty name")));
        }
        if !seen.insert(obs.name.as_str()) {
            return Err(FcmError::invalid(format!(
                "duplicate region name '{}'",
                obs.name
            )));
        }
        if obs.features.len() != dim {
            return Err(FcmError::DimensionMismatch {
                index,
                expected: dim,
                actual: obs.features.len(),
            });
        }
        if let Some(j) = obs.features.iter().position(|v| !v.is_finite()) {
            return Err(FcmError::invalid(format!(
                "observation '{}' has a non-finite value in feature {j}",
                obs.name
            )));
        }
    }
    Ok(dim)
}

/// Min-max normalize every feature column to \[0, 1\].
///
/// `x' = (x - min) / (max - min)` per column. A constant column maps to 0.
/// Names and feature names are carried over unchanged.
pub fn normalize_min_max(dataset: &Dataset) -> Dataset {
    let d = dataset.dim;
    let mut mins = vec![f64::INFINITY; d];
    let mut maxs = vec![f64::NEG_INFINITY; d];
    for obs in &dataset.observations {
        for j in 0..d {
            mins[j] = mins[j].min(obs.features[j]);
            maxs[j] = maxs[j].max(obs.features[j]);
        }
    }

    let observations = dataset
        .observations
        .iter()
        .map(|obs| {
            let features = (0..d)
                .map(|j| {
                    let range = maxs[j] - mins[j];
                    if range > 0.0 {
                        (obs.features[j] - mins[j]) / range
                    } else {
                        0.0
                    }
                })
                .collect();
            Observation::new(obs.name.clone(), features)
        })
        .collect();

    Dataset {
        observations,
        feature_names: dataset.feature_names.clone(),
        dim: d,
    }
}
