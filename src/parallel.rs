//! Conditional parallel iteration.
//!
//! With the `parallel` feature (on by default) the per-observation
//! membership update of each fuzzy c-means iteration and the silhouette
//! scores run on rayon's thread pool. Without it the same code runs
//! sequentially. Every closure passed through these macros writes only its
//! own output element, so the results are identical in both modes.
//!
//! ```ignore
//! use crate::iter_maybe_parallel;
//!
//! let rows: Vec<_> = iter_maybe_parallel!(0..n)
//!     .map(|i| membership_row(i))
//!     .collect();
//! ```

/// Iterate a range (or any `IntoIterator`) in parallel when the `parallel`
/// feature is enabled, sequentially otherwise.
#[macro_export]
macro_rules! iter_maybe_parallel {
    ($expr:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::IntoParallelIterator;

            IntoParallelIterator::into_par_iter($expr)
        }
        #[cfg(not(feature = "parallel"))]
        {
            IntoIterator::into_iter($expr)
        }
    }};
}

pub use iter_maybe_parallel;
