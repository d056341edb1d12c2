//! Fuzziness sweep
//!
//! Refits the district dataset for a range of fuzziness exponents and
//! prints how crisp each partition is, and how many clusters between 2 and
//! 5 the validity indices prefer at m = 2.

use fcmeans_core::regions::sample_regions;
use fcmeans_core::validity::{mean_silhouette, partition_coefficient, partition_entropy, xie_beni};
use fcmeans_core::{FcmConfig, FuzzyCMeans};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Fuzziness Sweep ===\n");

    let dataset = sample_regions()?;
    let data = dataset.to_matrix();

    println!("--- Varying m (c = 3) ---");
    println!(
        "  {:>5} {:>6} {:>9} {:>8} {:>8}",
        "m", "iter", "converged", "PC", "PE"
    );
    for m in [1.25, 1.5, 2.0, 2.5, 3.0, 4.0] {
        let result = FuzzyCMeans::new(FcmConfig::new(3).with_fuzziness(m))?.fit(&dataset)?;
        println!(
            "  {:>5.2} {:>6} {:>9} {:>8.4} {:>8.4}",
            m,
            result.iterations,
            result.converged(),
            partition_coefficient(&result.membership),
            partition_entropy(&result.membership)
        );
    }

    println!("\n--- Varying c (m = 2) ---");
    println!("  {:>3} {:>8} {:>8} {:>10}", "c", "PC", "XB", "silhouette");
    for c in 2..=5 {
        let result = FuzzyCMeans::new(FcmConfig::new(c))?.fit(&dataset)?;
        println!(
            "  {:>3} {:>8.4} {:>8.4} {:>10.4}",
            c,
            partition_coefficient(&result.membership),
            xie_beni(&data, &result),
            mean_silhouette(&data, &result.labels)
        );
    }

    println!("\n=== Done ===");
    Ok(())
}
