//! Perf command implementation.
//!
//! Measures route source files and reports the ones over the size, length
//! or complexity thresholds.

use super::common::scan;
use anyhow::Result;
use route_core::GeneratorConfig;
use route_core::cli::{ExitCode, OutputFormat};
use route_reports::PerformanceReport;
use tracing::warn;

/// Runs the perf command.
///
/// Threshold violations are reported but do not change the exit code.
///
/// # Errors
///
/// Returns an error if discovery is misconfigured or the report cannot be
/// formatted.
pub async fn run(config: GeneratorConfig, output_format: OutputFormat) -> Result<ExitCode> {
    let table = scan(&config)?;
    let report = PerformanceReport::from_entries(table.entries());

    for warning in &report.warnings {
        warn!("{}: {}", warning.source_path.display(), warning.message);
    }

    let formatted = crate::formatters::format_output(&report, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}
