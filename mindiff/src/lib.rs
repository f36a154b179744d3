//! mindiff: minimum practical difference planning for experiment metrics.
//!
//! This crate wraps the mindiff-core domain logic in a CLI for planning
//! A/B-experiment metrics and assigning them through the experiment
//! platform API.

pub mod cli;
pub mod client;
pub mod config;

// Re-export core types for convenience
pub use mindiff_core::calculator::{estimate, Baseline, CalculatorEstimate, CalculatorInputs};
pub use mindiff_core::format::{format_metric_value, format_spec, FormatSpec, MetricKind};
pub use mindiff_core::protocol::{
    AttributionWindow, Experiment, ExperimentStatus, Metric, MetricAssignmentRequest,
    MetricListResponse, Variation,
};
pub use mindiff_core::report::{AssignmentRow, ReportError, Reporter, TerminalReporter};
pub use mindiff_core::stats::{SampleSizeCalc, StatsError};

// Re-export main types from this crate
pub use cli::{Cli, Command};
pub use client::{ClientError, PlatformClient};
pub use config::Config;
