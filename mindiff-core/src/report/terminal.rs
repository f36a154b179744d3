use std::io::{self, Write};

use colored::Colorize;

use super::{nan_to_zero, AssignmentRow, ReportError, Reporter};
use crate::calculator::{Baseline, CalculatorEstimate};
use crate::format::{format_metric_value, MetricKind};

/// A reporter that prints calculator estimates and assignment tables to
/// the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn highlight(&self, text: &str) -> String {
        if self.use_colors {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Print a calculator estimate.
    fn print_estimate(
        &self,
        writer: &mut impl Write,
        estimate: &CalculatorEstimate,
    ) -> io::Result<()> {
        let diff_unit = match estimate.baseline {
            Baseline::Conversion { .. } => "pp",
            Baseline::Revenue { .. } => "USD ACPU",
        };
        let diff_text = format!(
            "{} {}",
            nan_to_zero(estimate.min_practical_diff),
            diff_unit
        );

        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.heading("Calculator: Minimum practical difference")
        )?;
        writeln!(writer)?;

        writeln!(
            writer,
            "{:<32} {}",
            "Minimum practical difference:",
            self.highlight(&diff_text)
        )?;
        writeln!(
            writer,
            "{:<32} {:.2}%",
            "Lift:",
            nan_to_zero(estimate.lift_pct)
        )?;

        match estimate.baseline {
            Baseline::Conversion { .. } => writeln!(
                writer,
                "{:<32} {} conversions / month",
                "Baseline:",
                format_metric_value(
                    nan_to_zero(estimate.baseline_restated),
                    MetricKind::Count,
                    false,
                    false,
                    true,
                    false,
                )
            )?,
            Baseline::Revenue { .. } => writeln!(
                writer,
                "{:<32} {} average cash per user",
                "Baseline:",
                format_metric_value(
                    nan_to_zero(estimate.baseline_restated),
                    MetricKind::Revenue,
                    false,
                    false,
                    true,
                    false,
                )
            )?,
        }

        if let Some(samples) = estimate.samples_per_variation {
            writeln!(
                writer,
                "{:<32} {} participants",
                "Required per variation:",
                format_metric_value(samples as f64, MetricKind::Count, false, false, true, false)
            )?;
        }
        if let Some(days) = estimate.duration_days {
            writeln!(writer, "{:<32} {} days", "Estimated duration:", days)?;
        }

        writeln!(writer)?;
        match estimate.baseline {
            Baseline::Conversion { .. } => writeln!(
                writer,
                "A conversion rate between {:.2}% and {:.2}% will be regarded as having no change.",
                nan_to_zero(estimate.no_change_low),
                nan_to_zero(estimate.no_change_high)
            )?,
            Baseline::Revenue { .. } => writeln!(
                writer,
                "An average cash per user between {:.2} USD and {:.2} USD will be regarded as having no change.",
                nan_to_zero(estimate.no_change_low),
                nan_to_zero(estimate.no_change_high)
            )?,
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Print the assignment table header.
    fn print_assignments_header(&self, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer)?;
        let header = format!(
            "{:<32} {:>20} {:>18} {:>20}",
            "Name", "Attribution Window", "Changes Expected", "Minimum Difference"
        );
        if self.use_colors {
            writeln!(writer, "{}", header.bold())?;
        } else {
            writeln!(writer, "{}", header)?;
        }
        writeln!(writer, "{}", "-".repeat(94))?;
        Ok(())
    }

    /// Print a single assignment row.
    fn print_assignment_row(&self, writer: &mut impl Write, row: &AssignmentRow) -> io::Result<()> {
        let name = if row.is_primary {
            format!("{} (primary)", row.metric.name)
        } else {
            row.metric.name.clone()
        };

        // Count metrics have no difference format variant.
        let is_difference = row.metric.parameter_type != MetricKind::Count;
        let min_difference = format_metric_value(
            nan_to_zero(row.min_difference),
            row.metric.parameter_type,
            is_difference,
            false,
            true,
            false,
        );

        writeln!(
            writer,
            "{:<32} {:>20} {:>18} {:>20}",
            name,
            row.attribution_window.label(),
            if row.change_expected { "Yes" } else { "No" },
            min_difference,
        )?;
        Ok(())
    }
}

impl Reporter for TerminalReporter {
    fn report_estimate(&self, estimate: &CalculatorEstimate) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.print_estimate(&mut writer, estimate)?;
        Ok(())
    }

    fn report_assignments(&self, rows: &[AssignmentRow]) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.print_assignments_header(&mut writer)?;
        for row in rows {
            self.print_assignment_row(&mut writer, row)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}
