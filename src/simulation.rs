//! Synthetic data for tests, benchmarks and demos.

use crate::matrix::Matrix;
use rand::prelude::*;
use rand_distr::StandardNormal;

/// Draw `n_per` points around each of the given centers.
///
/// Each coordinate is `center + spread * z` with `z ~ N(0, 1)`. Rows are
/// grouped by center: rows `k * n_per .. (k + 1) * n_per` belong to
/// `centers[k]`. All centers must share one dimensionality.
///
/// # Arguments
/// * `centers` - Blob centers
/// * `n_per` - Points per blob
/// * `spread` - Standard deviation of every coordinate
/// * `seed` - Random seed
pub fn gaussian_blobs(centers: &[Vec<f64>], n_per: usize, spread: f64, seed: u64) -> Matrix {
    let d = centers.first().map_or(0, Vec::len);
    let n = centers.len() * n_per;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Matrix::zeros(n, d);

    for (k, center) in centers.iter().enumerate() {
        debug_assert_eq!(center.len(), d);
        for p in 0..n_per {
            let i = k * n_per + p;
            for j in 0..d {
                let z: f64 = rng.sample(StandardNormal);
                data[(i, j)] = center[j] + spread * z;
            }
        }
    }
    data
}

/// Ground-truth labels matching the row order of [`gaussian_blobs`].
pub fn blob_labels(num_blobs: usize, n_per: usize) -> Vec<usize> {
    (0..num_blobs * n_per).map(|i| i / n_per).collect()
}
