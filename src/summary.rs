//! Dashboard-facing summaries of a clustering result.
//!
//! Clusters carry no intrinsic order, so they are ranked by the mean value
//! of their center and named High / Medium / Low. Counts per cluster feed
//! the distribution chart, and [`RegionProfile`] gathers everything shown
//! for one selected region.

use crate::clustering::ClusteringResult;
use crate::dataset::Dataset;
use crate::error::{FcmError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Human-readable level of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::High => "High",
            Tier::Medium => "Medium",
            Tier::Low => "Low",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Assign a tier to every cluster, indexed by cluster.
///
/// Clusters are ordered by the mean of their center, highest first. Two
/// clusters map to High/Low, three to High/Medium/Low; other counts are
/// rejected.
pub fn rank_tiers(result: &ClusteringResult) -> Result<Vec<Tier>> {
    let c = result.num_clusters();
    let ladder: &[Tier] = match c {
        2 => &[Tier::High, Tier::Low],
        3 => &[Tier::High, Tier::Medium, Tier::Low],
        _ => {
            return Err(FcmError::invalid(format!(
                "tiers are defined for 2 or 3 clusters, got {c}"
            )))
        }
    };

    let levels: Vec<f64> = (0..c)
        .map(|j| {
            let center = result.centers.row(j);
            center.iter().sum::<f64>() / center.len().max(1) as f64
        })
        .collect();

    let mut order: Vec<usize> = (0..c).collect();
    order.sort_by(|&a, &b| {
        levels[b]
            .partial_cmp(&levels[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut tiers = vec![Tier::Low; c];
    for (rank, &cluster) in order.iter().enumerate() {
        tiers[cluster] = ladder[rank];
    }
    Ok(tiers)
}

/// Number of observations carrying each label in `0..num_clusters`.
///
/// Labels outside the range are ignored.
pub fn cluster_counts(labels: &[usize], num_clusters: usize) -> Vec<usize> {
    let mut counts = vec![0; num_clusters];
    for &label in labels {
        if let Some(slot) = counts.get_mut(label) {
            *slot += 1;
        }
    }
    counts
}

/// Number of regions in each tier, in High / Medium / Low order.
pub fn tier_counts(labels: &[usize], tiers: &[Tier]) -> Vec<(Tier, usize)> {
    [Tier::High, Tier::Medium, Tier::Low]
        .into_iter()
        .filter(|t| tiers.contains(t))
        .map(|t| {
            let count = labels
                .iter()
                .filter(|&&label| tiers.get(label) == Some(&t))
                .count();
            (t, count)
        })
        .collect()
}

/// Everything displayed for a single region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionProfile {
    pub name: String,
    /// Hard label
    pub cluster: usize,
    pub tier: Tier,
    /// Membership degree in every cluster
    pub membership: Vec<f64>,
    /// `(feature name, value)` pairs in dataset order
    pub features: Vec<(String, f64)>,
}

impl RegionProfile {
    /// The `k` highest-valued features, highest first.
    pub fn strongest(&self, k: usize) -> Vec<(String, f64)> {
        let mut sorted = self.features.clone();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        sorted.truncate(k);
        sorted
    }

    /// The `k` lowest-valued features, lowest first.
    pub fn weakest(&self, k: usize) -> Vec<(String, f64)> {
        let mut sorted = self.features.clone();
        sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        sorted.truncate(k);
        sorted
    }
}

/// Build the profile of the region called `name`.
pub fn region_profile(
    dataset: &Dataset,
    result: &ClusteringResult,
    tiers: &[Tier],
    name: &str,
) -> Result<RegionProfile> {
    if result.labels.len() != dataset.len() {
        return Err(FcmError::invalid(format!(
            "result covers {} observations, dataset has {}",
            result.labels.len(),
            dataset.len()
        )));
    }
    let index = dataset
        .position(name)
        .ok_or_else(|| FcmError::invalid(format!("unknown region '{name}'")))?;
    let cluster = result.labels[index];
    let tier = *tiers
        .get(cluster)
        .ok_or_else(|| FcmError::invalid(format!("no tier for cluster {cluster}")))?;

    let observation = &dataset.observations()[index];
    let features = dataset
        .feature_names()
        .into_iter()
        .zip(observation.features.iter().copied())
        .collect();

    Ok(RegionProfile {
        name: observation.name.clone(),
        cluster,
        tier,
        membership: result.membership_of(index),
        features,
    })
}
