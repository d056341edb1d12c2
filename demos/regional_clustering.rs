//! Regional clustering walkthrough
//!
//! Clusters the 17 Bireuen districts with the study's parameters
//! (c = 3, m = 2, 100 iterations, tolerance 1e-4), names the clusters
//! High / Medium / Low, compares them with the published grouping, and
//! prints a profile and analysis prompt for one district.
//!
//! Run: cargo run --example regional_clustering [district]
//! Set RUST_LOG=debug to trace every iteration.

use fcmeans_core::explain::build_prompt;
use fcmeans_core::regions::{sample_regions, PUBLISHED_TIERS};
use fcmeans_core::summary::{rank_tiers, region_profile, tier_counts};
use fcmeans_core::validity::{mean_silhouette, partition_coefficient, partition_entropy, xie_beni};
use fcmeans_core::{FcmConfig, FuzzyCMeans};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Rice Productivity Clustering: Bireuen 2022 ===\n");

    let dataset = sample_regions()?;
    let config = FcmConfig::default();
    println!(
        "  {} districts, {} variables",
        dataset.len(),
        dataset.dim()
    );
    println!(
        "  c={}, m={}, max_iter={}, tol={:e}, seed={}",
        config.num_clusters, config.fuzziness, config.max_iterations, config.tolerance, config.seed
    );

    let result = FuzzyCMeans::new(config.clone())?.fit(&dataset)?;
    let tiers = rank_tiers(&result)?;
    println!(
        "\n  Status: {:?} after {} iterations (J = {:.4})",
        result.status, result.iterations, result.objective
    );

    // --- Section 1: Memberships ---
    println!("\n--- Memberships ---");
    println!(
        "  {:<22} {:>7} {:>7} {:>7}  {:<7} {:<9}",
        "District", "C0", "C1", "C2", "Tier", "Published"
    );
    let mut agree = 0;
    for (i, name) in dataset.names().into_iter().enumerate() {
        let u = result.membership_of(i);
        let tier = tiers[result.labels[i]];
        if tier == PUBLISHED_TIERS[i] {
            agree += 1;
        }
        println!(
            "  {:<22} {:>7.3} {:>7.3} {:>7.3}  {:<7} {:<9}",
            name, u[0], u[1], u[2], tier, PUBLISHED_TIERS[i]
        );
    }
    println!(
        "  Agreement with published tiers: {agree}/{}",
        dataset.len()
    );

    // --- Section 2: Distribution ---
    println!("\n--- Districts per Tier ---");
    for (tier, count) in tier_counts(&result.labels, &tiers) {
        println!("  {:<7} {:>2} {}", tier, count, "#".repeat(count));
    }

    // --- Section 3: Validity ---
    let data = dataset.to_matrix();
    println!("\n--- Validity ---");
    println!("  Partition coefficient: {:.4}", partition_coefficient(&result.membership));
    println!("  Partition entropy:     {:.4}", partition_entropy(&result.membership));
    println!("  Xie-Beni:              {:.4}", xie_beni(&data, &result));
    println!("  Mean silhouette:       {:.4}", mean_silhouette(&data, &result.labels));

    // --- Section 4: One district ---
    let selected = std::env::args().nth(1).unwrap_or_else(|| "Samalanga".to_string());
    let profile = region_profile(&dataset, &result, &tiers, &selected)?;
    println!("\n--- Profile: {} ({}) ---", profile.name, profile.tier);
    for (name, value) in &profile.features {
        println!("  {:<13} {:.3} {}", name, value, "=".repeat((value * 20.0).round() as usize));
    }
    println!("  Strongest: {:?}", profile.strongest(3));
    println!("  Weakest:   {:?}", profile.weakest(3));

    println!("\n--- Analysis Prompt ---");
    println!("{}", build_prompt(&profile, dataset.len(), config.num_clusters));

    println!("=== Done ===");
    Ok(())
}
