//! Metric value formatting.
//!
//! Each metric kind, optionally combined with a difference and/or impact
//! flag, maps to a fixed [`FormatSpec`]: a numeric transform, a numeric
//! formatter, and the display strings wrapped around the result. The
//! mapping is closed; it is never extended or mutated at runtime.

use serde::{Deserialize, Serialize};

/// Decimal places used for metric values outside of graph contexts.
const FORMAT_PRECISION: u32 = 2;

/// The kind of value a metric measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Count,
    Conversion,
    Revenue,
}

/// Display rules for one metric format variant.
pub struct FormatSpec {
    /// Unit label used when a value and unit are rendered separately.
    pub unit: &'static str,
    /// Text placed before the numeric text when units are displayed.
    pub prefix: &'static str,
    /// Text placed after the numeric text when units are displayed.
    pub postfix: &'static str,
    /// Scaling applied to the raw value before formatting.
    pub transform: fn(f64) -> f64,
    /// Conversion of the transformed value into numeric text.
    pub formatter: fn(f64) -> String,
}

/// Round half-up (ties toward positive infinity) at `places` decimals.
pub fn round_half_up(x: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (x * factor + 0.5).floor() / factor
}

fn identity(x: f64) -> f64 {
    x
}

fn to_percentage(x: f64) -> f64 {
    x * 100.0
}

/// Insert comma separators into the integer part of a formatted number.
fn group_digits(int_part: &str) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}

/// Render an already-rounded value with up to two decimals, trailing
/// zeros trimmed, no digit grouping.
fn format_trimmed(rounded: f64) -> String {
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Standard rendering: round half-up to two places, no padding.
fn standard_formatter(n: f64) -> String {
    format_trimmed(round_half_up(n, FORMAT_PRECISION))
}

/// Grouped rendering: round half-up to two places, comma separators.
fn grouped_formatter(n: f64) -> String {
    let rounded = round_half_up(n, FORMAT_PRECISION);
    let text = format!("{rounded:.2}");
    let (int_part, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        group_digits(int_part)
    } else {
        format!("{}.{}", group_digits(int_part), frac)
    }
}

/// Currency rendering: always exactly two decimal places.
fn usd_formatter(n: f64) -> String {
    let text = format!("{n:.2}");
    match text.split_once('.') {
        Some((int_part, frac)) => format!("{}.{}", group_digits(int_part), frac),
        None => group_digits(&text),
    }
}

/// Aggregate-impact rendering, abbreviated at thousand/million scale.
///
/// Thresholds are strict: a magnitude of exactly 1,000 (or 1,000,000) is
/// not abbreviated.
fn impact_formatter(n: f64) -> String {
    if n.abs() > 1_000_000.0 {
        format!("{}M", grouped_formatter(n / 1_000_000.0))
    } else if n.abs() > 1_000.0 {
        format!("{}K", grouped_formatter(n / 1_000.0))
    } else {
        group_digits(&format!("{:.0}", round_half_up(n, 0)))
    }
}

const COUNT: FormatSpec = FormatSpec {
    unit: "",
    prefix: "",
    postfix: "",
    transform: identity,
    formatter: grouped_formatter,
};

const CONVERSION: FormatSpec = FormatSpec {
    unit: "%",
    prefix: "",
    postfix: "%",
    transform: to_percentage,
    formatter: standard_formatter,
};

// Percentage points.
const CONVERSION_DIFFERENCE: FormatSpec = FormatSpec {
    unit: "pp",
    prefix: "",
    postfix: "pp",
    transform: to_percentage,
    formatter: standard_formatter,
};

const CONVERSION_IMPACT: FormatSpec = FormatSpec {
    unit: "",
    prefix: "",
    postfix: " conversions",
    transform: identity,
    formatter: impact_formatter,
};

const REVENUE: FormatSpec = FormatSpec {
    unit: "USD",
    prefix: "",
    postfix: " USD",
    transform: identity,
    formatter: usd_formatter,
};

const REVENUE_DIFFERENCE: FormatSpec = FormatSpec {
    unit: "USD",
    prefix: "",
    postfix: " USD",
    transform: identity,
    formatter: usd_formatter,
};

const REVENUE_IMPACT: FormatSpec = FormatSpec {
    unit: "USD",
    prefix: "",
    postfix: " USD",
    transform: identity,
    formatter: impact_formatter,
};

/// Look up the display rules for a metric format variant.
///
/// Only seven variants exist: count, conversion, conversion difference,
/// conversion impact, revenue, revenue difference, and revenue impact.
///
/// # Panics
///
/// Panics for a combination with no defined format (count metrics have no
/// difference or impact variants, and a difference of impacts is not a
/// thing). Such a request is a programming error, not recoverable input.
pub fn format_spec(kind: MetricKind, is_difference: bool, is_impact: bool) -> &'static FormatSpec {
    match (kind, is_difference, is_impact) {
        (MetricKind::Count, false, false) => &COUNT,
        (MetricKind::Conversion, false, false) => &CONVERSION,
        (MetricKind::Conversion, true, false) => &CONVERSION_DIFFERENCE,
        (MetricKind::Conversion, false, true) => &CONVERSION_IMPACT,
        (MetricKind::Revenue, false, false) => &REVENUE,
        (MetricKind::Revenue, true, false) => &REVENUE_DIFFERENCE,
        (MetricKind::Revenue, false, true) => &REVENUE_IMPACT,
        (kind, is_difference, is_impact) => panic!(
            "no format variant for {kind:?} with is_difference={is_difference}, is_impact={is_impact}"
        ),
    }
}

/// Format a metric value for display outside of a graph context.
///
/// The raw value is scaled by the variant's transform and rendered by its
/// formatter. With `display_unit` the variant's prefix/postfix strings are
/// added; with `display_positive_sign` a leading `+` is added when the raw
/// value is non-negative.
pub fn format_metric_value(
    value: f64,
    kind: MetricKind,
    is_difference: bool,
    is_impact: bool,
    display_unit: bool,
    display_positive_sign: bool,
) -> String {
    let spec = format_spec(kind, is_difference, is_impact);
    let mut out = String::new();
    if display_positive_sign && value >= 0.0 {
        out.push('+');
    }
    if display_unit {
        out.push_str(spec.prefix);
    }
    out.push_str(&(spec.formatter)((spec.transform)(value)));
    if display_unit {
        out.push_str(spec.postfix);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_basic() {
        assert_eq!(
            format_metric_value(0.105, MetricKind::Conversion, false, false, true, false),
            "10.5%"
        );
    }

    #[test]
    fn test_conversion_difference_percentage_points() {
        assert_eq!(
            format_metric_value(0.1, MetricKind::Conversion, true, false, true, false),
            "10pp"
        );
    }

    #[test]
    fn test_revenue_always_two_decimals() {
        assert_eq!(
            format_metric_value(0.5, MetricKind::Revenue, false, false, true, false),
            "0.50 USD"
        );
        assert_eq!(
            format_metric_value(1234.5, MetricKind::Revenue, false, false, true, false),
            "1,234.50 USD"
        );
    }

    #[test]
    fn test_count_grouped() {
        assert_eq!(
            format_metric_value(1234567.891, MetricKind::Count, false, false, true, false),
            "1,234,567.89"
        );
        assert_eq!(
            format_metric_value(2000.0, MetricKind::Count, false, false, true, false),
            "2,000"
        );
    }

    #[test]
    fn test_impact_threshold_exactly_one_thousand() {
        // Strict greater-than: 1000 is not abbreviated, 1001 is.
        assert_eq!(
            format_metric_value(1000.0, MetricKind::Conversion, false, true, false, false),
            "1,000"
        );
        assert_eq!(
            format_metric_value(1001.0, MetricKind::Conversion, false, true, false, false),
            "1K"
        );
    }

    #[test]
    fn test_impact_million_scale() {
        assert_eq!(
            format_metric_value(1_000_001.0, MetricKind::Revenue, false, true, true, false),
            "1M USD"
        );
        assert_eq!(
            format_metric_value(1_500_000.0, MetricKind::Revenue, false, true, false, false),
            "1.5M"
        );
    }

    #[test]
    fn test_impact_just_below_million_rolls_into_grouped_k() {
        assert_eq!(
            format_metric_value(999_999.0, MetricKind::Conversion, false, true, false, false),
            "1,000K"
        );
    }

    #[test]
    fn test_impact_small_value_rounds_to_integer() {
        assert_eq!(
            format_metric_value(123.6, MetricKind::Conversion, false, true, true, false),
            "124 conversions"
        );
    }

    #[test]
    fn test_impact_negative() {
        assert_eq!(
            format_metric_value(-1500.0, MetricKind::Conversion, false, true, false, false),
            "-1.5K"
        );
    }

    #[test]
    fn test_positive_sign() {
        assert_eq!(
            format_metric_value(0.012, MetricKind::Conversion, true, false, true, true),
            "+1.2pp"
        );
        // Zero counts as non-negative.
        assert_eq!(
            format_metric_value(0.0, MetricKind::Conversion, true, false, false, true),
            "+0"
        );
        assert_eq!(
            format_metric_value(-0.012, MetricKind::Conversion, true, false, true, true),
            "-1.2pp"
        );
    }

    #[test]
    fn test_bare_numeric_without_unit() {
        assert_eq!(
            format_metric_value(0.105, MetricKind::Conversion, false, false, false, false),
            "10.5"
        );
    }

    #[test]
    fn test_round_half_up_semantics() {
        assert_eq!(round_half_up(0.125, 2), 0.13);
        assert_eq!(round_half_up(0.6666, 2), 0.67);
        // Ties go toward positive infinity, so -0.125 rounds to -0.12.
        assert_eq!(round_half_up(-0.125, 2), -0.12);
    }

    #[test]
    fn test_idempotent_formatting() {
        let a = format_metric_value(0.275, MetricKind::Conversion, false, false, true, false);
        let b = format_metric_value(0.275, MetricKind::Conversion, false, false, true, false);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "no format variant")]
    fn test_count_difference_is_undefined() {
        format_spec(MetricKind::Count, true, false);
    }

    #[test]
    #[should_panic(expected = "no format variant")]
    fn test_difference_of_impact_is_undefined() {
        format_spec(MetricKind::Conversion, true, true);
    }
}
