//! Command-line interface for mindiff.

use crate::config::Config;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mindiff")]
#[command(about = "Minimum practical difference and sample-size planning for experiment metrics")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (defaults to .mindiff.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Statistical significance level, two-sided alpha (0.0-1.0)
    #[arg(long, global = true)]
    pub significance: Option<f64>,

    /// Statistical power target (0.0-1.0)
    #[arg(long, global = true)]
    pub power: Option<f64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan a conversion metric's minimum practical difference
    Conversion {
        /// Users entering the flow per month (total)
        #[arg(long)]
        samples_per_month: f64,

        /// Baseline conversion rate, in percent (e.g. 27.5)
        #[arg(long)]
        baseline_rate: f64,

        /// Extra conversions per month that make a practical difference
        #[arg(long)]
        extra_conversions: f64,

        /// Variation allocation percentage (repeatable; defaults to 50/50)
        #[arg(long = "allocation")]
        allocations: Vec<f64>,
    },

    /// Plan a cash-sales metric's minimum practical difference
    Revenue {
        /// Users entering the flow per month (total)
        #[arg(long)]
        samples_per_month: f64,

        /// Baseline monthly cash sales volume in USD
        #[arg(long)]
        baseline_revenue: f64,

        /// Extra monthly cash sales (USD) that make a practical difference
        #[arg(long)]
        extra_revenue: f64,

        /// Variation allocation percentage (repeatable; defaults to 50/50)
        #[arg(long = "allocation")]
        allocations: Vec<f64>,
    },

    /// List the platform's metrics
    Metrics {
        /// Base URL of the experiment platform API (overrides config)
        #[arg(long)]
        url: Option<String>,
    },

    /// Assign a metric to a staging experiment
    Assign {
        /// Base URL of the experiment platform API (overrides config)
        #[arg(long)]
        url: Option<String>,

        /// Experiment to assign the metric to
        #[arg(long)]
        experiment_id: u64,

        /// Metric to assign
        #[arg(long)]
        metric_id: u64,

        /// Attribution window in seconds (e.g. 86400 for 24 hours)
        #[arg(long)]
        attribution_window: u32,

        /// Minimum practical difference in metric units
        #[arg(long)]
        min_difference: f64,

        /// Mark this as the experiment's primary metric
        #[arg(long)]
        primary: bool,

        /// A change in this metric is expected
        #[arg(long)]
        change_expected: bool,
    },
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only non-None optional values will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(significance) = self.significance {
            config.statistics.significance = significance;
        }

        if let Some(power) = self.power {
            config.statistics.power = power;
        }

        if self.no_color {
            config.display.colors = false;
        }
    }
}
