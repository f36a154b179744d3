use statrs::distribution::{ContinuousCDF, Normal};

use super::{StatsError, DEFAULT_POWER, DEFAULT_SIGNIFICANCE};

/// Closed-form sample-size planner for a two-variation comparison.
///
/// Implements the standard two-sample proportion z-test approximation:
///
/// ```text
/// n = ceil(2 * variance * (z_alpha + z_power)^2 / min_difference^2)
/// ```
///
/// The critical values follow the conventional mix: a two-sided value for
/// significance (`z_alpha = Phi^-1(1 - significance / 2)`) and a one-sided
/// value for power (`z_power = Phi^-1(power)`).
#[derive(Debug, Clone)]
pub struct SampleSizeCalc {
    /// Two-sided significance level, alpha (default: 0.05).
    pub significance: f64,
    /// Power target, 1 - beta (default: 0.8).
    pub power: f64,
}

impl Default for SampleSizeCalc {
    fn default() -> Self {
        Self {
            significance: DEFAULT_SIGNIFICANCE,
            power: DEFAULT_POWER,
        }
    }
}

impl SampleSizeCalc {
    /// Create a planner with the specified significance level and power.
    ///
    /// # Panics
    ///
    /// Panics if either probability is not in the range (0, 1).
    pub fn new(significance: f64, power: f64) -> Self {
        assert!(
            significance > 0.0 && significance < 1.0,
            "significance must be between 0 and 1 (exclusive)"
        );
        assert!(
            power > 0.0 && power < 1.0,
            "power must be between 0 and 1 (exclusive)"
        );
        Self {
            significance,
            power,
        }
    }

    /// Combined critical value `z_{1 - alpha/2} + z_{power}`.
    fn z_total(&self) -> f64 {
        let normal = Normal::standard();
        normal.inverse_cdf(1.0 - self.significance / 2.0) + normal.inverse_cdf(self.power)
    }

    /// Minimum samples required per variation to detect an absolute
    /// difference of `min_difference` in a metric with the given variance.
    ///
    /// For a conversion-rate metric the caller supplies the Bernoulli
    /// variance `rate * (1 - rate)` and expresses `min_difference` as a
    /// rate (e.g. 0.0067 for 0.67 percentage points).
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidVariance`] for a negative or
    /// non-finite variance, and [`StatsError::InvalidMinDifference`] for a
    /// zero, negative, or non-finite difference. A zero difference never
    /// silently divides through to NaN.
    pub fn required_samples_per_variation(
        &self,
        variance: f64,
        min_difference: f64,
    ) -> Result<u64, StatsError> {
        if !variance.is_finite() || variance < 0.0 {
            return Err(StatsError::InvalidVariance(variance));
        }
        if !min_difference.is_finite() || min_difference <= 0.0 {
            return Err(StatsError::InvalidMinDifference(min_difference));
        }

        let z = self.z_total();
        let n = 2.0 * variance * z * z / (min_difference * min_difference);
        Ok(n.ceil() as u64)
    }
}

/// Estimated experiment duration in days.
///
/// `min_allocation_pct` is the smallest allocation percentage across the
/// experiment's variations; the slowest-filling variation bounds the
/// overall duration.
///
/// # Errors
///
/// Returns [`StatsError::InvalidTraffic`] when monthly traffic or the
/// allocation percentage is zero, negative, or non-finite, so a division
/// by zero cannot leak into user-facing output.
pub fn experiment_duration_days(
    samples_required: u64,
    samples_per_month: f64,
    min_allocation_pct: f64,
) -> Result<u64, StatsError> {
    if !samples_per_month.is_finite()
        || samples_per_month <= 0.0
        || !min_allocation_pct.is_finite()
        || min_allocation_pct <= 0.0
    {
        return Err(StatsError::InvalidTraffic {
            samples_per_month,
            min_allocation_pct,
        });
    }

    let samples_per_day = samples_per_month * min_allocation_pct / 100.0 / 30.0;
    Ok((samples_required as f64 / samples_per_day).ceil() as u64)
}

/// Smallest allocation percentage across an experiment's variations.
///
/// Only the minimum value matters; ties between variations are irrelevant.
/// Returns `None` for an empty allocation list.
pub fn min_variation_allocation(allocations: &[f64]) -> Option<f64> {
    allocations.iter().copied().reduce(f64::min)
}
