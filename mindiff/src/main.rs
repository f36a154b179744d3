use anyhow::{ensure, Context, Result};
use clap::Parser;
use std::path::Path;
use std::time::Duration;

use mindiff::{
    estimate, AttributionWindow, Baseline, CalculatorInputs, Cli, Command, Config,
    MetricAssignmentRequest, PlatformClient, Reporter, SampleSizeCalc, TerminalReporter,
};

/// Allocation split used when the caller declares no variations.
const DEFAULT_ALLOCATIONS: [f64; 2] = [50.0, 50.0];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config and apply CLI overrides
    let mut config = Config::load_from(cli.config.as_deref().map(Path::new))?;
    cli.apply_to_config(&mut config);

    if cli.verbose {
        eprintln!("Configuration: {:?}", config);
    }

    ensure!(
        config.statistics.significance > 0.0 && config.statistics.significance < 1.0,
        "significance must be between 0 and 1 (exclusive), got {}",
        config.statistics.significance
    );
    ensure!(
        config.statistics.power > 0.0 && config.statistics.power < 1.0,
        "power must be between 0 and 1 (exclusive), got {}",
        config.statistics.power
    );
    let calc = SampleSizeCalc::new(config.statistics.significance, config.statistics.power);

    let reporter = if config.display.colors {
        TerminalReporter::new()
    } else {
        TerminalReporter::without_colors()
    };

    match &cli.command {
        Command::Conversion {
            samples_per_month,
            baseline_rate,
            extra_conversions,
            allocations,
        } => {
            let inputs = CalculatorInputs {
                samples_per_month: *samples_per_month,
                baseline: Baseline::Conversion {
                    rate: baseline_rate / 100.0,
                },
                extra_per_month: *extra_conversions,
                allocations: resolve_allocations(allocations),
            };
            let result = estimate(&inputs, &calc);
            reporter.report_estimate(&result)?;
        }

        Command::Revenue {
            samples_per_month,
            baseline_revenue,
            extra_revenue,
            allocations,
        } => {
            let inputs = CalculatorInputs {
                samples_per_month: *samples_per_month,
                baseline: Baseline::Revenue {
                    monthly_total: *baseline_revenue,
                },
                extra_per_month: *extra_revenue,
                allocations: resolve_allocations(allocations),
            };
            let result = estimate(&inputs, &calc);
            reporter.report_estimate(&result)?;
        }

        Command::Metrics { url } => {
            let client = connect(&config, url.as_deref())?;
            eprintln!("Fetching metrics...");
            let metrics = client
                .fetch_metrics()
                .await
                .context("Failed to fetch metrics")?;

            for metric in &metrics {
                println!(
                    "{:>6}  {:<32} {:<12} {}",
                    metric.metric_id,
                    metric.name,
                    format!("{:?}", metric.parameter_type).to_lowercase(),
                    metric.description,
                );
            }
        }

        Command::Assign {
            url,
            experiment_id,
            metric_id,
            attribution_window,
            min_difference,
            primary,
            change_expected,
        } => {
            let window = AttributionWindow::from_seconds(*attribution_window).with_context(
                || format!("Unsupported attribution window: {} seconds", attribution_window),
            )?;

            let client = connect(&config, url.as_deref())?;
            let request = MetricAssignmentRequest::new(
                *metric_id,
                window,
                *change_expected,
                *primary,
                min_difference.to_string(),
            );

            eprintln!(
                "Assigning metric {} to experiment {}...",
                metric_id, experiment_id
            );
            client
                .assign_metric(*experiment_id, &request)
                .await
                .context("Failed to assign metric")?;
            eprintln!(
                "Assigned metric {} to experiment {} ({} window, min difference {})",
                metric_id,
                experiment_id,
                window.label(),
                request.min_difference,
            );
        }
    }

    Ok(())
}

fn resolve_allocations(allocations: &[f64]) -> Vec<f64> {
    if allocations.is_empty() {
        DEFAULT_ALLOCATIONS.to_vec()
    } else {
        allocations.to_vec()
    }
}

fn connect(config: &Config, url_override: Option<&str>) -> Result<PlatformClient> {
    let url = url_override.unwrap_or(&config.platform.base_url);
    let client = PlatformClient::connect(url, Duration::from_millis(config.platform.timeout_ms))
        .with_context(|| format!("Failed to connect to platform at {}", url))?;
    Ok(client)
}
