//! Analyze command implementation.
//!
//! Prints route analytics without generating anything.

use super::common::scan;
use anyhow::Result;
use route_core::GeneratorConfig;
use route_core::cli::{ExitCode, OutputFormat};
use route_reports::RouteAnalytics;
use tracing::info;

/// Runs the analyze command.
///
/// # Errors
///
/// Returns an error if discovery is misconfigured or the report cannot be
/// formatted.
pub async fn run(config: GeneratorConfig, output_format: OutputFormat) -> Result<ExitCode> {
    let table = scan(&config)?;
    let analytics = RouteAnalytics::from_entries(table.entries(), config.dialect);

    if let Some((name, count)) = analytics.most_common_param() {
        info!("Most common parameter: {name} ({count} routes)");
    }

    let formatted = crate::formatters::format_output(&analytics, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}
