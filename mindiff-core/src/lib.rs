//! Core types and logic for mindiff.
//!
//! This crate holds the pure domain pieces shared by the mindiff CLI:
//! metric value formatting rules, the closed-form sample-size planner,
//! the minimum-practical-difference estimator, reporting, and the
//! experiment platform's wire types.

pub mod calculator;
pub mod format;
pub mod protocol;
pub mod report;
pub mod stats;

// Re-export main types for convenience
pub use calculator::{estimate, Baseline, CalculatorEstimate, CalculatorInputs};
pub use format::{format_metric_value, format_spec, FormatSpec, MetricKind};
pub use protocol::{
    AttributionWindow, Experiment, ExperimentStatus, Metric, MetricAssignmentRequest,
    MetricListResponse, Variation,
};
pub use report::{nan_to_zero, AssignmentRow, ReportError, Reporter, TerminalReporter};
pub use stats::{
    experiment_duration_days, min_variation_allocation, SampleSizeCalc, StatsError, DEFAULT_POWER,
    DEFAULT_SIGNIFICANCE,
};
