//! Reporting of calculator estimates and metric assignments.

use thiserror::Error;

use crate::calculator::CalculatorEstimate;
use crate::protocol::{AttributionWindow, Metric};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Replace a non-finite value with zero before it becomes display text.
///
/// Presentation-boundary policy only: the calculator and stats layers
/// propagate NaN and errors faithfully, so a caller can still tell a
/// degenerate input from this intentional display fallback. The literal
/// text "NaN" must never reach a report.
pub fn nan_to_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// One row of the metric-assignments table: a platform metric joined with
/// its assignment settings.
#[derive(Debug, Clone)]
pub struct AssignmentRow {
    pub metric: Metric,
    pub attribution_window: AttributionWindow,
    pub change_expected: bool,
    pub is_primary: bool,
    /// Minimum difference in raw metric units (a rate for conversion
    /// metrics, USD for revenue metrics).
    pub min_difference: f64,
}

pub trait Reporter: Send + Sync {
    fn report_estimate(&self, estimate: &CalculatorEstimate) -> Result<(), ReportError>;
    fn report_assignments(&self, rows: &[AssignmentRow]) -> Result<(), ReportError>;
}

mod terminal;
pub use terminal::TerminalReporter;
