//! Numerical constants and distance helpers shared by the clustering code.

/// Default convergence tolerance on the maximum membership change.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default fuzziness exponent `m`.
pub const DEFAULT_FUZZINESS: f64 = 2.0;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default number of clusters (high / medium / low).
pub const DEFAULT_NUM_CLUSTERS: usize = 3;

/// Squared Euclidean distance between two feature vectors.
///
/// This is the distance used by the fuzzy c-means engine: `Σ_f (a_f - b_f)²`.
/// Using the squared form yields spherical clusters and keeps the membership
/// update free of square roots.
///
/// # Arguments
/// * `a` - First vector
/// * `b` - Second vector (same length as `a`)
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut dist_sq = 0.0;
    for i in 0..a.len() {
        let diff = a[i] - b[i];
        dist_sq += diff * diff;
    }
    dist_sq
}

/// Plain Euclidean distance between two feature vectors.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Index of the largest value, lowest index winning ties.
///
/// Returns 0 for an empty slice.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
