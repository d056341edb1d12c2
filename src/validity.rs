//! Validity indices for fuzzy and hard partitions.
//!
//! - Partition coefficient and partition entropy measure how crisp a
//!   membership matrix is.
//! - Xie-Beni compares compactness (the FCM objective) to the separation of
//!   the closest pair of centers; lower is better.
//! - Silhouette scores judge the hard labels on Euclidean distances.

use crate::clustering::ClusteringResult;
use crate::helpers::{euclidean, squared_euclidean};
use crate::iter_maybe_parallel;
use crate::matrix::Matrix;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

/// Bezdek's partition coefficient `(1/n) Σ_i Σ_j u_ij²`.
///
/// Ranges from `1/c` (all memberships equal) to 1 (crisp partition).
/// Returns 0 for an empty matrix.
pub fn partition_coefficient(membership: &Matrix) -> f64 {
    let n = membership.nrows();
    if n == 0 {
        return 0.0;
    }
    membership.as_slice().iter().map(|u| u * u).sum::<f64>() / n as f64
}

/// Partition entropy `-(1/n) Σ_i Σ_j u_ij ln u_ij`, with `0 ln 0 = 0`.
///
/// Ranges from 0 (crisp) to `ln c` (all memberships equal).
pub fn partition_entropy(membership: &Matrix) -> f64 {
    let n = membership.nrows();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = membership
        .as_slice()
        .iter()
        .map(|&u| if u > 0.0 { -u * u.ln() } else { 0.0 })
        .sum();
    total / n as f64
}

/// Xie-Beni index `J_m / (n · min_{j≠k} ‖v_j - v_k‖²)`.
///
/// `data` must be the n x d matrix the result was fitted on. The index does
/// not depend on the scale of the data. Returns infinity when two centers
/// are identical.
pub fn xie_beni(data: &Matrix, result: &ClusteringResult) -> f64 {
    let n = data.nrows();
    let centers = result.centers.rows();
    let mut min_sep = f64::INFINITY;
    for j in 0..centers.len() {
        for k in (j + 1)..centers.len() {
            min_sep = min_sep.min(squared_euclidean(&centers[j], &centers[k]));
        }
    }
    if n == 0 || min_sep == 0.0 {
        return f64::INFINITY;
    }
    result.objective / (n as f64 * min_sep)
}

/// Group sample indices by their cluster assignment.
fn cluster_member_indices(labels: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut indices = vec![Vec::new(); k];
    for (i, &c) in labels.iter().enumerate() {
        indices[c].push(i);
    }
    indices
}

/// Mean Euclidean distance from a point to a set of rows.
fn mean_cluster_distance(point: &[f64], rows: &[Vec<f64>], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let sum: f64 = indices.iter().map(|&j| euclidean(point, &rows[j])).sum();
    sum / indices.len() as f64
}

/// Silhouette score of every observation under hard labels.
///
/// Observations alone in their cluster, or a single non-empty cluster
/// overall, score 0. Returns an empty vector on a length mismatch.
pub fn silhouette_score(data: &Matrix, labels: &[usize]) -> Vec<f64> {
    let n = data.nrows();
    if n == 0 || labels.len() != n {
        return Vec::new();
    }

    let rows = data.rows();
    let k = labels.iter().copied().max().unwrap_or(0) + 1;
    let members = cluster_member_indices(labels, k);

    iter_maybe_parallel!(0..n)
        .map(|i| {
            let own = labels[i];
            let same: Vec<usize> = members[own].iter().copied().filter(|&j| j != i).collect();
            if same.is_empty() {
                return 0.0;
            }
            let a_i = mean_cluster_distance(&rows[i], &rows, &same);

            let mut b_i = f64::INFINITY;
            for c in 0..k {
                if c != own && !members[c].is_empty() {
                    b_i = b_i.min(mean_cluster_distance(&rows[i], &rows, &members[c]));
                }
            }

            if b_i.is_infinite() {
                0.0
            } else {
                let max_ab = a_i.max(b_i);
                if max_ab > 0.0 {
                    (b_i - a_i) / max_ab
                } else {
                    0.0
                }
            }
        })
        .collect()
}

/// Mean of [`silhouette_score`], 0 for empty input.
pub fn mean_silhouette(data: &Matrix, labels: &[usize]) -> f64 {
    let scores = silhouette_score(data, labels);
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::FuzzyCMeans;
    use crate::config::FcmConfig;

    fn two_groups() -> Matrix {
        Matrix::from_rows(&[
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
        ])
        .unwrap()
    }

    #[test]
    fn test_partition_coefficient_bounds() {
        let crisp = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert!((partition_coefficient(&crisp) - 1.0).abs() < 1e-12);

        let uniform = Matrix::filled(4, 2, 0.5);
        assert!((partition_coefficient(&uniform) - 0.5).abs() < 1e-12);

        assert_eq!(partition_coefficient(&Matrix::zeros(0, 0)), 0.0);
    }

    #[test]
    fn test_partition_entropy_bounds() {
        let crisp = Matrix::from_rows(&[vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]]).unwrap();
        assert!(partition_entropy(&crisp).abs() < 1e-12);

        let uniform = Matrix::filled(5, 3, 1.0 / 3.0);
        assert!((partition_entropy(&uniform) - 3.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_xie_beni_well_separated() {
        let data = two_groups();
        let result = FuzzyCMeans::new(FcmConfig::new(2))
            .unwrap()
            .fit_matrix(&data)
            .unwrap();
        let xb = xie_beni(&data, &result);
        assert!(xb.is_finite());
        assert!(xb > 0.0 && xb < 0.1, "xie-beni {xb}");
    }

    #[test]
    fn test_xie_beni_small_scale() {
        let data = two_groups();
        let tiny = Matrix::from_column_major(
            data.as_slice().iter().map(|v| v * 1e-6).collect(),
            data.nrows(),
            data.ncols(),
        )
        .unwrap();
        let engine = FuzzyCMeans::new(FcmConfig::new(2)).unwrap();

        let xb = xie_beni(&data, &engine.fit_matrix(&data).unwrap());
        let xb_tiny = xie_beni(&tiny, &engine.fit_matrix(&tiny).unwrap());
        assert!(xb_tiny.is_finite());
        assert!((xb_tiny - xb).abs() < 1e-6 * xb, "{xb_tiny} vs {xb}");
    }

    #[test]
    fn test_xie_beni_identical_centers() {
        let data = two_groups();
        let mut result = FuzzyCMeans::new(FcmConfig::new(2))
            .unwrap()
            .fit_matrix(&data)
            .unwrap();
        result.centers = Matrix::filled(2, 2, 2.5);
        assert!(xie_beni(&data, &result).is_infinite());
    }

    #[test]
    fn test_silhouette_well_separated() {
        let data = two_groups();
        let labels = vec![0, 0, 0, 1, 1, 1];
        let scores = silhouette_score(&data, &labels);
        assert_eq!(scores.len(), 6);
        for &s in &scores {
            assert!(s > 0.9 && s <= 1.0);
        }
        assert!(mean_silhouette(&data, &labels) > 0.9);
    }

    #[test]
    fn test_silhouette_single_cluster_and_singletons() {
        let data = two_groups();
        let scores = silhouette_score(&data, &[0; 6]);
        assert!(scores.iter().all(|s| s.abs() < 1e-12));

        let scores = silhouette_score(&data, &[0, 1, 2, 3, 4, 5]);
        assert!(scores.iter().all(|s| s.abs() < 1e-12));
    }

    #[test]
    fn test_silhouette_length_mismatch() {
        assert!(silhouette_score(&two_groups(), &[0, 1]).is_empty());
        assert_eq!(mean_silhouette(&two_groups(), &[0, 1]), 0.0);
    }
}
