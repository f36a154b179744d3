//! Minimum-practical-difference estimation for experiment planning.
//!
//! The estimator turns "how many extra conversions (or how much extra
//! cash) per month would actually matter" into a minimum practical
//! difference in metric units, the implied lift over baseline, and, for
//! conversion metrics, the samples and days required to detect it.
//!
//! All outputs are pure derivations recomputed from the inputs on every
//! call. Degenerate inputs (for example zero monthly traffic) propagate
//! as NaN here; replacing NaN with a display sentinel is the report
//! layer's job, so callers can still tell a calculator bug from an
//! intentional display fallback.

use crate::format::round_half_up;
use crate::stats::{experiment_duration_days, min_variation_allocation, SampleSizeCalc};

/// Baseline behaviour of the metric being planned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Baseline {
    /// A conversion metric with the given baseline rate (fraction in [0, 1]).
    Conversion { rate: f64 },
    /// A cash-sales metric with the given baseline monthly volume in USD.
    Revenue { monthly_total: f64 },
}

/// Inputs to the minimum-practical-difference estimator.
#[derive(Debug, Clone)]
pub struct CalculatorInputs {
    /// Users entering the experimented flow per month, across variations.
    pub samples_per_month: f64,
    pub baseline: Baseline,
    /// Minimum practical difference target in absolute per-month units
    /// (extra conversions, or extra USD of cash sales).
    pub extra_per_month: f64,
    /// Allocation percentages of the experiment's variations.
    pub allocations: Vec<f64>,
}

/// Derived planning figures. See [`estimate`].
#[derive(Debug, Clone)]
pub struct CalculatorEstimate {
    pub baseline: Baseline,
    /// Baseline volume restated in the display unit: conversions per month
    /// for conversion baselines, USD average cash per user for revenue.
    pub baseline_restated: f64,
    /// Minimum practical difference, rounded to two places: percentage
    /// points for conversion baselines, USD per user for revenue.
    pub min_practical_diff: f64,
    /// The minimum practical difference as a percentage of baseline.
    pub lift_pct: f64,
    /// Bottom of the no-change band (percent for conversion, USD for revenue).
    pub no_change_low: f64,
    /// Top of the no-change band.
    pub no_change_high: f64,
    /// Samples required per variation; `None` when no variance is
    /// derivable from the inputs (revenue baselines) or the difference
    /// target is degenerate.
    pub samples_per_variation: Option<u64>,
    /// Estimated experiment duration in days; requires
    /// `samples_per_variation` and a non-empty allocation list.
    pub duration_days: Option<u64>,
}

/// Estimate the minimum practical difference and the cost of detecting it.
///
/// Conversion baselines use the Bernoulli variance `rate * (1 - rate)` to
/// derive samples per variation and duration. Revenue baselines carry no
/// per-user variance in these inputs, so those two fields stay `None`.
pub fn estimate(inputs: &CalculatorInputs, calc: &SampleSizeCalc) -> CalculatorEstimate {
    let samples = inputs.samples_per_month;

    match inputs.baseline {
        Baseline::Conversion { rate } => {
            let diff_pp = round_half_up(inputs.extra_per_month / samples * 100.0, 2);
            let variance = rate * (1.0 - rate);

            let samples_per_variation = calc
                .required_samples_per_variation(variance, diff_pp / 100.0)
                .ok();
            let duration_days = samples_per_variation.and_then(|n| {
                let min_allocation = min_variation_allocation(&inputs.allocations)?;
                experiment_duration_days(n, samples, min_allocation).ok()
            });

            CalculatorEstimate {
                baseline: inputs.baseline,
                baseline_restated: rate * samples,
                min_practical_diff: diff_pp,
                lift_pct: diff_pp / rate,
                no_change_low: rate * 100.0 - diff_pp,
                no_change_high: rate * 100.0 + diff_pp,
                samples_per_variation,
                duration_days,
            }
        }
        Baseline::Revenue { monthly_total } => {
            let diff_usd = round_half_up(inputs.extra_per_month / samples, 2);
            let cash_per_user = monthly_total / samples;

            CalculatorEstimate {
                baseline: inputs.baseline,
                baseline_restated: cash_per_user,
                min_practical_diff: diff_usd,
                lift_pct: inputs.extra_per_month / monthly_total * 100.0,
                no_change_low: cash_per_user - diff_usd,
                no_change_high: cash_per_user + diff_usd,
                samples_per_variation: None,
                duration_days: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversion_inputs() -> CalculatorInputs {
        CalculatorInputs {
            samples_per_month: 15_000.0,
            baseline: Baseline::Conversion { rate: 0.275 },
            extra_per_month: 100.0,
            allocations: vec![50.0, 50.0],
        }
    }

    #[test]
    fn test_conversion_min_practical_diff() {
        // 100 extra conversions over 15,000 users = 0.67pp.
        let estimate = estimate(&conversion_inputs(), &SampleSizeCalc::default());
        assert_eq!(estimate.min_practical_diff, 0.67);
    }

    #[test]
    fn test_conversion_lift_and_baseline() {
        let estimate = estimate(&conversion_inputs(), &SampleSizeCalc::default());
        assert!((estimate.lift_pct - 0.67 / 0.275).abs() < 1e-12);
        assert_eq!(estimate.baseline_restated, 0.275 * 15_000.0);
    }

    #[test]
    fn test_conversion_samples_and_duration() {
        let estimate = estimate(&conversion_inputs(), &SampleSizeCalc::default());
        let n = estimate.samples_per_variation.expect("variance is derivable");
        assert!(n > 0);
        let days = estimate.duration_days.expect("allocations are present");
        assert!(days > 0);
    }

    #[test]
    fn test_conversion_no_change_band() {
        let estimate = estimate(&conversion_inputs(), &SampleSizeCalc::default());
        assert!((estimate.no_change_low - 26.83).abs() < 1e-9);
        assert!((estimate.no_change_high - 28.17).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_min_practical_diff() {
        let inputs = CalculatorInputs {
            samples_per_month: 15_000.0,
            baseline: Baseline::Revenue {
                monthly_total: 9_800.0,
            },
            extra_per_month: 1_500.0,
            allocations: vec![50.0, 50.0],
        };
        let estimate = estimate(&inputs, &SampleSizeCalc::default());

        assert_eq!(estimate.min_practical_diff, 0.1);
        assert!((estimate.lift_pct - 1_500.0 / 9_800.0 * 100.0).abs() < 1e-12);
        // No per-user variance: sample size is not derivable.
        assert_eq!(estimate.samples_per_variation, None);
        assert_eq!(estimate.duration_days, None);
    }

    #[test]
    fn test_zero_extra_yields_no_sample_size() {
        let mut inputs = conversion_inputs();
        inputs.extra_per_month = 0.0;
        let estimate = estimate(&inputs, &SampleSizeCalc::default());

        assert_eq!(estimate.min_practical_diff, 0.0);
        assert_eq!(estimate.samples_per_variation, None);
        assert_eq!(estimate.duration_days, None);
    }

    #[test]
    fn test_zero_traffic_propagates_nan() {
        // NaN normalization happens at the report boundary, not here.
        let mut inputs = conversion_inputs();
        inputs.samples_per_month = 0.0;
        let estimate = estimate(&inputs, &SampleSizeCalc::default());
        assert!(estimate.min_practical_diff.is_infinite() || estimate.min_practical_diff.is_nan());
    }

    #[test]
    fn test_empty_allocations_yield_no_duration() {
        let mut inputs = conversion_inputs();
        inputs.allocations.clear();
        let estimate = estimate(&inputs, &SampleSizeCalc::default());
        assert!(estimate.samples_per_variation.is_some());
        assert_eq!(estimate.duration_days, None);
    }

    #[test]
    fn test_uneven_allocation_lengthens_duration() {
        let even = estimate(&conversion_inputs(), &SampleSizeCalc::default());
        let mut inputs = conversion_inputs();
        inputs.allocations = vec![75.0, 25.0];
        let uneven = estimate(&inputs, &SampleSizeCalc::default());

        assert!(uneven.duration_days.unwrap() > even.duration_days.unwrap());
    }
}
