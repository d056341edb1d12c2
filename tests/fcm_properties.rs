//! Behavioural tests of the fuzzy c-means engine.
//!
//! Scenario datasets live in `tests/fixtures/scenarios.json`.
//!
//! Run: cargo test --test fcm_properties

use fcmeans_core::clustering::{ClusterStatus, FuzzyCMeans};
use fcmeans_core::config::FcmConfig;
use fcmeans_core::dataset::{Dataset, Observation};
use fcmeans_core::matrix::Matrix;
use fcmeans_core::simulation::{blob_labels, gaussian_blobs};
use fcmeans_core::validity::{partition_coefficient, partition_entropy};
use fcmeans_core::FcmError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

// ─── Helpers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Scenario {
    num_clusters: usize,
    fuzziness: f64,
    max_iterations: usize,
    tolerance: f64,
    rows: Vec<Vec<f64>>,
    groups: Vec<Vec<usize>>,
}

impl Scenario {
    fn config(&self) -> FcmConfig {
        FcmConfig::new(self.num_clusters)
            .with_fuzziness(self.fuzziness)
            .with_max_iterations(self.max_iterations)
            .with_tolerance(self.tolerance)
    }

    fn matrix(&self) -> Matrix {
        Matrix::from_rows(&self.rows).unwrap()
    }

    fn dataset(&self) -> Dataset {
        let observations = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| Observation::new(format!("region-{i}"), row.clone()))
            .collect();
        Dataset::new(observations).unwrap()
    }
}

fn load_scenario(name: &str) -> Scenario {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("scenarios.json");
    let data = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    let mut all: HashMap<String, Scenario> = serde_json::from_str(&data)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
    all.remove(name)
        .unwrap_or_else(|| panic!("No scenario named {name}"))
}

fn assert_partition(membership: &Matrix, tol: f64, label: &str) {
    for i in 0..membership.nrows() {
        let sum = membership.row_sum(i);
        assert!(
            (sum - 1.0).abs() < tol,
            "{label}: row {i} sums to {sum:.15}"
        );
        for j in 0..membership.ncols() {
            let u = membership[(i, j)];
            assert!(
                (0.0..=1.0).contains(&u),
                "{label}: membership ({i}, {j}) = {u} outside [0, 1]"
            );
        }
    }
}

/// Every fixture group must share one label, and different groups must not.
fn assert_groups(labels: &[usize], groups: &[Vec<usize>], label: &str) {
    let group_labels: Vec<usize> = groups.iter().map(|g| labels[g[0]]).collect();
    for (g, members) in groups.iter().enumerate() {
        for &i in members {
            assert_eq!(
                labels[i], group_labels[g],
                "{label}: observation {i} left its group (labels {labels:?})"
            );
        }
    }
    for a in 0..group_labels.len() {
        for b in (a + 1)..group_labels.len() {
            assert_ne!(
                group_labels[a], group_labels[b],
                "{label}: groups {a} and {b} merged (labels {labels:?})"
            );
        }
    }
}

// ─── Partition invariants ───────────────────────────────────────────────────

#[test]
fn test_rows_sum_to_one_and_degrees_in_range() {
    let data = gaussian_blobs(
        &[vec![0.2, 0.2, 0.2], vec![0.8, 0.8, 0.2], vec![0.5, 0.1, 0.9]],
        15,
        0.05,
        11,
    );
    for (c, m) in [(2, 1.5), (3, 2.0), (4, 2.5), (5, 3.0)] {
        let engine = FuzzyCMeans::new(FcmConfig::new(c).with_fuzziness(m)).unwrap();
        let result = engine.fit_matrix(&data).unwrap();
        assert_partition(&result.membership, 1e-9, &format!("c={c}, m={m}"));
        assert_eq!(result.labels.len(), data.nrows());
        assert!(result.labels.iter().all(|&l| l < c));
    }
}

#[test]
fn test_partition_holds_when_capped() {
    let scenario = load_scenario("three_lines");
    let config = scenario.config().with_max_iterations(2).with_tolerance(1e-15);
    let result = FuzzyCMeans::new(config)
        .unwrap()
        .fit_matrix(&scenario.matrix())
        .unwrap();
    assert_eq!(result.status, ClusterStatus::MaxIterationsReached);
    assert_eq!(result.iterations, 2);
    assert_partition(&result.membership, 1e-9, "capped");
}

// ─── Determinism ────────────────────────────────────────────────────────────

#[test]
fn test_same_seed_same_result() {
    let scenario = load_scenario("three_lines");
    let engine = FuzzyCMeans::new(scenario.config().with_seed(2024)).unwrap();
    let dataset = scenario.dataset();

    let first = engine.fit(&dataset).unwrap();
    let second = engine.fit(&dataset).unwrap();

    assert_eq!(first.membership, second.membership);
    assert_eq!(first.centers, second.centers);
    assert_eq!(first.labels, second.labels);
    assert_eq!(first.iterations, second.iterations);
    assert_eq!(first.status, second.status);
}

#[test]
fn test_injected_rng_matches_configured_seed() {
    let scenario = load_scenario("four_points");
    let engine = FuzzyCMeans::new(scenario.config().with_seed(5)).unwrap();
    let dataset = scenario.dataset();

    let seeded = engine.fit(&dataset).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let injected = engine.fit_with_rng(&dataset, &mut rng).unwrap();

    assert_eq!(seeded.membership, injected.membership);
    assert_eq!(seeded.labels, injected.labels);
}

// ─── Coincident observation and center ─────────────────────────────────────

#[test]
fn test_observation_on_center_gets_full_membership() {
    let dataset = Dataset::new(vec![
        Observation::new("a1", vec![0.0, 0.0]),
        Observation::new("a2", vec![0.0, 0.0]),
        Observation::new("b1", vec![4.0, 0.0]),
        Observation::new("b2", vec![4.0, 0.0]),
    ])
    .unwrap();
    // Stop only once memberships stop changing at all, so the centers have
    // settled exactly on the duplicated points
    let config = FcmConfig::new(2).with_tolerance(f64::MIN_POSITIVE);
    let result = FuzzyCMeans::new(config).unwrap().fit(&dataset).unwrap();

    assert!(result.converged());
    for i in 0..4 {
        let label = result.labels[i];
        let obs = &dataset.observations()[i].features;
        assert_eq!(&result.centers.row(label), obs, "center of observation {i}");
        assert_eq!(result.membership[(i, label)], 1.0);
        assert_eq!(result.membership[(i, 1 - label)], 0.0);
    }
}

// ─── Fuzziness ──────────────────────────────────────────────────────────────

#[test]
fn test_higher_fuzziness_increases_entropy() {
    let scenario = load_scenario("four_points");
    let data = scenario.matrix();

    let entropies: Vec<f64> = [1.5, 2.0, 3.0]
        .iter()
        .map(|&m| {
            let engine = FuzzyCMeans::new(scenario.config().with_fuzziness(m)).unwrap();
            partition_entropy(&engine.fit_matrix(&data).unwrap().membership)
        })
        .collect();

    assert!(
        entropies[0] < entropies[1] && entropies[1] < entropies[2],
        "entropy should grow with fuzziness: {entropies:?}"
    );
}

#[test]
fn test_higher_fuzziness_lowers_partition_coefficient() {
    let data = gaussian_blobs(&[vec![0.0, 0.0], vec![3.0, 3.0]], 20, 0.4, 8);
    let crisp = FuzzyCMeans::new(FcmConfig::new(2).with_fuzziness(1.3))
        .unwrap()
        .fit_matrix(&data)
        .unwrap();
    let soft = FuzzyCMeans::new(FcmConfig::new(2).with_fuzziness(4.0))
        .unwrap()
        .fit_matrix(&data)
        .unwrap();
    assert!(partition_coefficient(&crisp.membership) > partition_coefficient(&soft.membership));
}

// ─── Scenarios ──────────────────────────────────────────────────────────────

#[test]
fn test_four_points_grouping_any_seed() {
    let scenario = load_scenario("four_points");
    let dataset = scenario.dataset();

    for seed in 0..25 {
        let engine = FuzzyCMeans::new(scenario.config().with_seed(seed)).unwrap();
        let result = engine.fit(&dataset).unwrap();
        assert!(result.converged(), "seed {seed} did not converge");
        assert_groups(&result.labels, &scenario.groups, &format!("seed {seed}"));
    }
}

#[test]
fn test_four_points_grouping_at_small_scale() {
    // Same layout as four_points, pairs 1e-6 apart and 1e-5 between pairs
    let scenario = load_scenario("four_points_tiny");
    let dataset = scenario.dataset();

    for seed in 0..25 {
        let engine = FuzzyCMeans::new(scenario.config().with_seed(seed)).unwrap();
        let result = engine.fit(&dataset).unwrap();
        assert!(result.converged(), "seed {seed} did not converge");
        assert_groups(&result.labels, &scenario.groups, &format!("seed {seed}"));
        assert_partition(&result.membership, 1e-9, &format!("seed {seed}"));
        for i in 0..dataset.len() {
            let u = result.membership[(i, result.labels[i])];
            assert!(u > 0.5 && u < 1.0, "seed {seed}: observation {i} membership {u}");
        }
    }
}

#[test]
fn test_centers_are_weighted_means_at_high_fuzziness() {
    let data = Matrix::from_rows(&[
        vec![10.0, 10.0],
        vec![10.0, 11.0],
        vec![12.0, 10.0],
        vec![12.0, 11.0],
    ])
    .unwrap();
    let m = 30.0;
    let config = FcmConfig::new(3)
        .with_fuzziness(m)
        .with_max_iterations(10_000)
        .with_tolerance(1e-10);

    for seed in 0..10 {
        let result = FuzzyCMeans::new(config.clone().with_seed(seed))
            .unwrap()
            .fit_matrix(&data)
            .unwrap();
        assert!(result.converged(), "seed {seed} did not converge");

        for j in 0..3 {
            let weights: Vec<f64> = (0..4).map(|i| result.membership[(i, j)].powf(m)).collect();
            let total: f64 = weights.iter().sum();
            assert!(total > 0.0);
            for f in 0..2 {
                let mean = (0..4).map(|i| weights[i] * data[(i, f)]).sum::<f64>() / total;
                assert!(
                    (result.centers[(j, f)] - mean).abs() < 1e-6,
                    "seed {seed}: center ({j}, {f}) = {} but weighted mean is {mean}",
                    result.centers[(j, f)]
                );
            }
        }
    }
}

#[test]
fn test_three_groups_from_informed_start() {
    let scenario = load_scenario("three_lines");
    let dataset = scenario.dataset();
    let c = scenario.num_clusters;

    let mut initial = Matrix::filled(dataset.len(), c, 0.25);
    for (g, members) in scenario.groups.iter().enumerate() {
        for &i in members {
            initial[(i, g)] = 0.5;
        }
    }

    let result = FuzzyCMeans::new(scenario.config())
        .unwrap()
        .fit_with_membership(&dataset, initial)
        .unwrap();
    assert!(result.converged());
    assert_groups(&result.labels, &scenario.groups, "three_lines");
    assert_partition(&result.membership, 1e-9, "three_lines");
}

#[test]
fn test_blobs_recovered() {
    let n_per = 12;
    let data = gaussian_blobs(&[vec![0.0, 0.0], vec![6.0, 0.0]], n_per, 0.3, 17);
    let truth = blob_labels(2, n_per);
    let result = FuzzyCMeans::new(FcmConfig::new(2))
        .unwrap()
        .fit_matrix(&data)
        .unwrap();

    let groups: Vec<Vec<usize>> = (0..2)
        .map(|k| (0..truth.len()).filter(|&i| truth[i] == k).collect())
        .collect();
    assert_groups(&result.labels, &groups, "blobs");
}

// ─── Boundaries and errors ──────────────────────────────────────────────────

#[test]
fn test_one_cluster_per_observation() {
    let scenario = load_scenario("four_points");
    let dataset = scenario.dataset();
    let n = dataset.len();

    let mut initial = Matrix::filled(n, n, 0.1);
    for i in 0..n {
        initial[(i, i)] = 0.7;
    }

    let config = FcmConfig::new(n).with_max_iterations(100);
    let result = FuzzyCMeans::new(config)
        .unwrap()
        .fit_with_membership(&dataset, initial)
        .unwrap();

    assert_partition(&result.membership, 1e-9, "singletons");
    for i in 0..n {
        assert_eq!(result.labels[i], i);
        assert!(
            result.membership[(i, i)] > 0.99,
            "observation {i} membership {}",
            result.membership[(i, i)]
        );
    }
}

#[test]
fn test_random_start_with_as_many_clusters_as_observations() {
    let scenario = load_scenario("four_points");
    let result = FuzzyCMeans::new(FcmConfig::new(4))
        .unwrap()
        .fit(&scenario.dataset())
        .unwrap();
    assert_partition(&result.membership, 1e-9, "c = n");
}

#[test]
fn test_more_clusters_than_observations_fails() {
    let dataset = Dataset::new(vec![
        Observation::new("a", vec![0.0, 1.0]),
        Observation::new("b", vec![1.0, 0.0]),
    ])
    .unwrap();
    let engine = FuzzyCMeans::new(FcmConfig::new(3)).unwrap();

    let err = engine.fit(&dataset).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(matches!(err, FcmError::TooFewObservations { n: 2, clusters: 3 }));
}

#[test]
fn test_invalid_configuration_rejected_at_construction() {
    for config in [
        FcmConfig::new(1),
        FcmConfig::new(2).with_fuzziness(0.9),
        FcmConfig::new(2).with_max_iterations(0),
        FcmConfig::new(2).with_tolerance(0.0),
    ] {
        let err = FuzzyCMeans::new(config).unwrap_err();
        assert!(err.is_invalid_input(), "{err}");
    }
}
