//! Fuzzy c-means clustering.
//!
//! Each observation holds a membership degree in every cluster. The engine
//! alternates two updates until the membership matrix stops moving:
//!
//! ```text
//! v_j  = Σ_i u_ij^m x_i / Σ_i u_ij^m
//! u_ij = 1 / Σ_k (d_ij / d_ik)^(1/(m-1))
//! ```
//!
//! where `d_ij = ‖x_i - v_j‖²` is the squared Euclidean distance. With
//! squared distances the exponent `1/(m-1)` is the same rule as
//! `(‖x_i - v_j‖ / ‖x_i - v_k‖)^(2/(m-1))` on plain distances.
//!
//! No step compares against an absolute epsilon, so the result is the same
//! partition whatever the scale of the data.

use crate::config::FcmConfig;
use crate::dataset::Dataset;
use crate::error::{FcmError, Result};
use crate::helpers::{argmax, squared_euclidean};
use crate::iter_maybe_parallel;
use crate::matrix::Matrix;
use nalgebra::DMatrix;
use rand::prelude::*;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;
use tracing::{debug, info, warn};

/// Tolerance on row sums of a caller-supplied initial membership matrix.
const INITIAL_ROW_SUM_TOL: f64 = 1e-6;

/// How a fit terminated. Both outcomes carry a usable partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterStatus {
    /// The maximum membership change fell below the tolerance
    Converged,
    /// The iteration cap was hit first
    MaxIterationsReached,
}

/// Result of fuzzy c-means clustering.
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    /// Membership matrix (n x c); each row sums to 1
    pub membership: Matrix,
    /// Cluster centers (c x d)
    pub centers: Matrix,
    /// Hard label per observation: argmax of its membership row
    pub labels: Vec<usize>,
    /// Termination state
    pub status: ClusterStatus,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final objective `J_m = Σ_i Σ_j u_ij^m d_ij`
    pub objective: f64,
}

impl ClusteringResult {
    /// Whether the run converged before the iteration cap.
    pub fn converged(&self) -> bool {
        self.status == ClusterStatus::Converged
    }

    /// Number of clusters.
    pub fn num_clusters(&self) -> usize {
        self.centers.nrows()
    }

    /// Membership row of observation `i`.
    pub fn membership_of(&self, i: usize) -> Vec<f64> {
        self.membership.row(i)
    }

    /// Count of observations per hard label.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_clusters()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Membership degrees of a new point against the fitted centers.
    ///
    /// Uses the same rule as the fitting loop, including full membership for
    /// a point that coincides with a center.
    pub fn predict(&self, point: &[f64], fuzziness: f64) -> Result<Vec<f64>> {
        if point.len() != self.centers.ncols() {
            return Err(FcmError::DimensionMismatch {
                index: 0,
                expected: self.centers.ncols(),
                actual: point.len(),
            });
        }
        if !fuzziness.is_finite() || fuzziness <= 1.0 {
            return Err(FcmError::InvalidConfig {
                field: "fuzziness",
                reason: format!("must be a finite value greater than 1, got {fuzziness}"),
            });
        }
        let centers = self.centers.rows();
        let distances: Vec<f64> = centers
            .iter()
            .map(|c| squared_euclidean(point, c))
            .collect();
        Ok(compute_fuzzy_membership(&distances, 1.0 / (fuzziness - 1.0)))
    }
}

/// Fuzzy c-means engine.
///
/// Holds only its validated configuration; every call to `fit` is
/// independent.
///
/// ```
/// use fcmeans_core::clustering::FuzzyCMeans;
/// use fcmeans_core::config::FcmConfig;
/// use fcmeans_core::matrix::Matrix;
///
/// let data = Matrix::from_rows(&[
///     vec![0.0, 0.0],
///     vec![0.0, 1.0],
///     vec![10.0, 0.0],
///     vec![10.0, 1.0],
/// ])
/// .unwrap();
/// let engine = FuzzyCMeans::new(FcmConfig::new(2)).unwrap();
/// let result = engine.fit_matrix(&data).unwrap();
///
/// assert!(result.converged());
/// assert_eq!(result.labels[0], result.labels[1]);
/// assert_ne!(result.labels[0], result.labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct FuzzyCMeans {
    config: FcmConfig,
}

impl FuzzyCMeans {
    /// Create an engine, rejecting invalid parameters.
    pub fn new(config: FcmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FcmConfig {
        &self.config
    }

    /// Cluster a dataset, initializing memberships from the configured seed.
    pub fn fit(&self, dataset: &Dataset) -> Result<ClusteringResult> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.fit_with_rng(dataset, &mut rng)
    }

    /// Cluster a dataset with a caller-supplied random generator.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<ClusteringResult> {
        self.fit_matrix_with_rng(&dataset.to_matrix(), rng)
    }

    /// Cluster a dataset starting from a given n x c membership matrix.
    ///
    /// The matrix must have entries in \[0, 1\] and rows summing to 1.
    pub fn fit_with_membership(
        &self,
        dataset: &Dataset,
        initial: Matrix,
    ) -> Result<ClusteringResult> {
        let data = dataset.to_matrix();
        self.check_data(&data)?;
        self.check_initial_membership(&initial, data.nrows())?;
        Ok(self.iterate(&data, initial))
    }

    /// Cluster raw rows of equal length.
    pub fn fit_rows(&self, rows: &[Vec<f64>]) -> Result<ClusteringResult> {
        let expected = rows.first().map_or(0, Vec::len);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(FcmError::DimensionMismatch {
                index,
                expected,
                actual: row.len(),
            });
        }
        let data = Matrix::from_rows(rows).ok_or_else(|| FcmError::invalid("ragged rows"))?;
        self.fit_matrix(&data)
    }

    /// Cluster an n x d observation matrix.
    pub fn fit_matrix(&self, data: &Matrix) -> Result<ClusteringResult> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.fit_matrix_with_rng(data, &mut rng)
    }

    /// Cluster an n x d observation matrix with a caller-supplied generator.
    pub fn fit_matrix_with_rng<R: Rng + ?Sized>(
        &self,
        data: &Matrix,
        rng: &mut R,
    ) -> Result<ClusteringResult> {
        self.check_data(data)?;
        let membership = init_random_membership(data.nrows(), self.config.num_clusters, rng);
        Ok(self.iterate(data, membership))
    }

    fn check_data(&self, data: &Matrix) -> Result<()> {
        let (n, d) = data.shape();
        let c = self.config.num_clusters;
        if n < c {
            return Err(FcmError::TooFewObservations { n, clusters: c });
        }
        if d == 0 {
            return Err(FcmError::invalid("observations must have at least one feature"));
        }
        if data.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(FcmError::invalid("observations contain non-finite values"));
        }
        Ok(())
    }

    fn check_initial_membership(&self, initial: &Matrix, n: usize) -> Result<()> {
        let c = self.config.num_clusters;
        if initial.shape() != (n, c) {
            return Err(FcmError::invalid(format!(
                "initial membership is {}x{}, expected {}x{}",
                initial.nrows(),
                initial.ncols(),
                n,
                c
            )));
        }
        if initial
            .as_slice()
            .iter()
            .any(|&u| !(0.0..=1.0).contains(&u))
        {
            return Err(FcmError::invalid("initial membership entries must lie in [0, 1]"));
        }
        for i in 0..n {
            let sum = initial.row_sum(i);
            if (sum - 1.0).abs() > INITIAL_ROW_SUM_TOL {
                return Err(FcmError::invalid(format!(
                    "initial membership row {i} sums to {sum}, expected 1"
                )));
            }
        }
        Ok(())
    }

    /// Run the alternating updates until convergence or the iteration cap.
    fn iterate(&self, data: &Matrix, mut membership: Matrix) -> ClusteringResult {
        let c = self.config.num_clusters;
        let d = data.ncols();
        let observations = data.rows();
        let design = data.to_dmatrix();
        let fuzziness = self.config.fuzziness;
        let exponent = 1.0 / (fuzziness - 1.0);

        debug!(
            observations = observations.len(),
            clusters = c,
            fuzziness,
            max_iterations = self.config.max_iterations,
            tolerance = self.config.tolerance,
            "Starting fuzzy c-means"
        );

        let mut centers = vec![vec![0.0; d]; c];
        let mut status = ClusterStatus::MaxIterationsReached;
        let mut iterations = 0;

        for iteration in 0..self.config.max_iterations {
            iterations = iteration + 1;

            centers = update_fuzzy_centers(&design, &membership, &centers, fuzziness);

            let (new_membership, max_change) =
                update_fuzzy_membership_step(&observations, &centers, &membership, exponent);
            membership = new_membership;

            debug!(iteration = iterations, max_change, "fcm iteration");

            if max_change < self.config.tolerance {
                status = ClusterStatus::Converged;
                break;
            }
        }

        let objective = fcm_objective(&observations, &centers, &membership, fuzziness);
        match status {
            ClusterStatus::Converged => {
                info!(iterations, objective, "Fuzzy c-means converged")
            }
            ClusterStatus::MaxIterationsReached => warn!(
                iterations,
                objective,
                tolerance = self.config.tolerance,
                "Fuzzy c-means stopped at the iteration cap without converging"
            ),
        }

        let labels = hard_labels(&membership);
        let mut center_matrix = Matrix::zeros(c, d);
        for (j, center) in centers.iter().enumerate() {
            center_matrix.set_row(j, center);
        }

        ClusteringResult {
            membership,
            centers: center_matrix,
            labels,
            status,
            iterations,
            objective,
        }
    }
}

/// Initialize a random membership matrix (n x c) with rows summing to 1.
fn init_random_membership<R: Rng + ?Sized>(n: usize, c: usize, rng: &mut R) -> Matrix {
    let mut membership = Matrix::zeros(n, c);
    for i in 0..n {
        let mut row: Vec<f64> = (0..c).map(|_| rng.gen::<f64>()).collect();
        let row_sum: f64 = row.iter().sum();
        if row_sum <= 0.0 {
            row.iter_mut().for_each(|u| *u = 1.0 / c as f64);
        } else {
            row.iter_mut().for_each(|u| *u /= row_sum);
        }
        membership.set_row(i, &row);
    }
    membership
}

/// Compute fuzzy membership values for a single observation.
///
/// # Arguments
/// * `distances` - Squared distances from the observation to each center
/// * `exponent` - `1 / (fuzziness - 1)`
///
/// An observation sitting on a center gets membership 1 in the
/// lowest-indexed such cluster and 0 elsewhere. "Sitting on" means the
/// distance is zero, or so small next to the farthest center that the
/// ratios below would lose all precision.
pub(crate) fn compute_fuzzy_membership(distances: &[f64], exponent: f64) -> Vec<f64> {
    let c = distances.len();
    let mut membership = vec![0.0; c];

    let farthest = distances.iter().copied().fold(0.0, f64::max);
    let coincident = f64::EPSILON * farthest;
    if let Some(hit) = distances.iter().position(|&d| d <= coincident) {
        membership[hit] = 1.0;
        return membership;
    }

    for j in 0..c {
        let sum: f64 = distances
            .iter()
            .map(|&d_k| (distances[j] / d_k).powf(exponent))
            .sum();
        membership[j] = 1.0 / sum;
    }

    membership
}

/// Membership-weighted centers `Σ_i u_ij^m x_i / Σ_i u_ij^m`.
///
/// Each cluster's memberships are divided by their largest value before
/// raising to `m`, so the weights stay representable for large `m`. The
/// common factor cancels in the ratio. A cluster with no membership at all
/// keeps its previous center.
fn update_fuzzy_centers(
    data: &DMatrix<f64>,
    membership: &Matrix,
    previous: &[Vec<f64>],
    fuzziness: f64,
) -> Vec<Vec<f64>> {
    let (n, c) = membership.shape();
    let mut weights = DMatrix::<f64>::zeros(n, c);
    let mut peaks = vec![0.0; c];

    for j in 0..c {
        let column = membership.column(j);
        let peak = column.iter().copied().fold(0.0, f64::max);
        peaks[j] = peak;
        if peak > 0.0 {
            for (i, &u) in column.iter().enumerate() {
                weights[(i, j)] = (u / peak).powf(fuzziness);
            }
        }
    }

    // c x d weighted sums in one product
    let numerator = weights.transpose() * data;

    (0..c)
        .map(|j| {
            if peaks[j] > 0.0 {
                let denominator = weights.column(j).sum();
                numerator.row(j).iter().map(|v| v / denominator).collect()
            } else {
                previous[j].clone()
            }
        })
        .collect()
}

/// Recompute memberships from the current centers and report the largest
/// absolute change against the previous matrix.
fn update_fuzzy_membership_step(
    observations: &[Vec<f64>],
    centers: &[Vec<f64>],
    old_membership: &Matrix,
    exponent: f64,
) -> (Matrix, f64) {
    let n = observations.len();
    let c = centers.len();

    let rows: Vec<Vec<f64>> = iter_maybe_parallel!(0..n)
        .map(|i| {
            let distances: Vec<f64> = centers
                .iter()
                .map(|v| squared_euclidean(&observations[i], v))
                .collect();
            compute_fuzzy_membership(&distances, exponent)
        })
        .collect();

    let mut new_membership = Matrix::zeros(n, c);
    for (i, row) in rows.iter().enumerate() {
        new_membership.set_row(i, row);
    }
    let max_change = new_membership.max_abs_diff(old_membership);

    (new_membership, max_change)
}

/// FCM objective `Σ_i Σ_j u_ij^m ‖x_i - v_j‖²`.
fn fcm_objective(
    observations: &[Vec<f64>],
    centers: &[Vec<f64>],
    membership: &Matrix,
    fuzziness: f64,
) -> f64 {
    let mut total = 0.0;
    for (i, x) in observations.iter().enumerate() {
        for (j, v) in centers.iter().enumerate() {
            total += membership[(i, j)].powf(fuzziness) * squared_euclidean(x, v);
        }
    }
    total
}

/// Argmax of each membership row, lowest index winning ties.
pub fn hard_labels(membership: &Matrix) -> Vec<usize> {
    (0..membership.nrows())
        .map(|i| argmax(&membership.row(i)))
        .collect()
}
