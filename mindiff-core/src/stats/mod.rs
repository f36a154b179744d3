//! Statistical planning for experiment metrics.
//!
//! Sample-size and duration derivations are pure evaluations over their
//! arguments. Invalid inputs are signaled as [`StatsError`] rather than
//! allowed to propagate as NaN or infinity.

use thiserror::Error;

/// Default two-sided statistical significance level (alpha).
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Default statistical power target (1 - beta).
pub const DEFAULT_POWER: f64 = 0.8;

/// Errors from sample-size and duration derivations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Variance was negative or non-finite.
    #[error("variance must be a finite non-negative number, got {0}")]
    InvalidVariance(f64),

    /// Minimum detectable difference was zero, negative, or non-finite.
    #[error("minimum difference must be a finite positive number, got {0}")]
    InvalidMinDifference(f64),

    /// Monthly traffic or variation allocation cannot sustain the experiment.
    #[error(
        "traffic inputs must be finite and positive: samples_per_month={samples_per_month}, min_allocation_pct={min_allocation_pct}"
    )]
    InvalidTraffic {
        samples_per_month: f64,
        min_allocation_pct: f64,
    },
}

mod samplesize;
pub use samplesize::{experiment_duration_days, min_variation_allocation, SampleSizeCalc};
