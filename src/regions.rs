//! Rice productivity indicators for the 17 districts of Bireuen (2022).
//!
//! Every variable is already min-max normalized to \[0, 1\]. The published
//! study grouped the districts into High / Medium / Low clusters; those
//! labels are kept in [`PUBLISHED_TIERS`] for comparison with a fresh fit.

use crate::dataset::{Dataset, Observation};
use crate::error::Result;
use crate::summary::Tier;

/// Variable names, in column order.
pub const FEATURE_NAMES: [&str; 10] = [
    "Land",
    "Planting",
    "Harvest",
    "Production",
    "Productivity",
    "Rainfall",
    "Irrigation",
    "Seed",
    "Fertilizer",
    "Pests",
];

const DISTRICTS: [(&str, [f64; 10]); 17] = [
    ("Samalanga", [0.644, 0.867, 0.855, 0.855, 0.688, 0.223, 0.909, 0.867, 0.867, 0.627]),
    ("Sp. Mamplam", [0.686, 0.669, 0.710, 0.677, 0.531, 0.092, 0.671, 0.669, 0.669, 0.000]),
    ("Pandrah", [0.068, 0.197, 0.233, 0.203, 0.375, 0.251, 0.276, 0.197, 0.197, 0.896]),
    ("Jeunieb", [0.775, 1.000, 1.000, 0.950, 0.513, 0.187, 0.985, 1.000, 1.000, 0.522]),
    ("Peulimbang", [0.187, 0.192, 0.294, 0.255, 0.344, 0.129, 0.446, 0.192, 0.192, 1.000]),
    ("Peudada", [0.427, 0.490, 0.480, 0.431, 0.375, 0.119, 0.390, 0.490, 0.490, 0.672]),
    ("Juli", [0.010, 0.095, 0.025, 0.000, 0.188, 0.102, 0.165, 0.095, 0.095, 0.179]),
    ("Jeumpa", [0.466, 0.257, 0.359, 0.369, 0.750, 1.000, 0.673, 0.257, 0.257, 0.776]),
    ("Kota Juang", [0.034, 0.107, 0.000, 0.015, 0.938, 0.129, 0.301, 0.107, 0.107, 0.493]),
    ("Kuala", [0.194, 0.302, 0.111, 0.137, 1.000, 0.202, 0.487, 0.302, 0.302, 0.164]),
    ("Jangka", [0.309, 0.333, 0.392, 0.438, 1.000, 0.080, 0.564, 0.333, 0.333, 0.179]),
    ("Peusangan", [1.000, 0.764, 0.963, 1.000, 0.825, 0.000, 1.000, 0.764, 0.764, 0.716]),
    ("Peusangan Selatan", [0.000, 0.000, 0.040, 0.003, 0.000, 0.069, 0.000, 0.000, 0.000, 0.597]),
    ("Peusangan Sb Krueng", [0.186, 0.138, 0.169, 0.119, 0.094, 0.185, 0.000, 0.138, 0.138, 0.358]),
    ("Makmur", [0.346, 0.348, 0.542, 0.466, 0.250, 0.115, 0.394, 0.348, 0.348, 0.746]),
    ("Gandapura", [0.596, 0.614, 0.503, 0.411, 0.125, 0.122, 0.000, 0.614, 0.614, 0.254]),
    ("Kuta Blang", [0.424, 0.602, 0.558, 0.542, 0.594, 0.112, 0.580, 0.602, 0.601, 0.388]),
];

/// Tiers reported by the original study, in district order.
pub const PUBLISHED_TIERS: [Tier; 17] = [
    Tier::Medium,
    Tier::Medium,
    Tier::High,
    Tier::Medium,
    Tier::High,
    Tier::Low,
    Tier::High,
    Tier::Low,
    Tier::High,
    Tier::Low,
    Tier::Low,
    Tier::Medium,
    Tier::High,
    Tier::High,
    Tier::Low,
    Tier::Low,
    Tier::Low,
];

/// The 17-district dataset with named features.
pub fn sample_regions() -> Result<Dataset> {
    let observations = DISTRICTS
        .iter()
        .map(|(name, values)| Observation::new(*name, values.to_vec()))
        .collect();
    let feature_names = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
    Dataset::with_feature_names(observations, feature_names)
}
