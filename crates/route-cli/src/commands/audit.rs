//! Audit command implementation.
//!
//! Reports how the application source uses the generated builders and
//! where hard-coded path strings could use them instead.

use super::common::scan;
use anyhow::{Context, Result};
use route_core::GeneratorConfig;
use route_core::cli::{ExitCode, OutputFormat};
use route_reports::audit;
use std::path::Path;
use tracing::{info, warn};

/// Runs the audit command over `src_dir`.
///
/// # Errors
///
/// Returns an error if `src_dir` does not exist, if discovery is
/// misconfigured, or if the report cannot be formatted.
pub async fn run(
    config: GeneratorConfig,
    src_dir: &Path,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let table = scan(&config)?;
    let report = audit(&table, src_dir)
        .with_context(|| format!("failed to audit {}", src_dir.display()))?;

    if !report.unused.is_empty() {
        info!("{} routes are never referenced", report.unused.len());
    }
    for literal in &report.untyped_paths {
        warn!(
            "{}:{} hard-coded path {:?} could use routes.{}",
            literal.file.display(),
            literal.line,
            literal.literal,
            literal.route
        );
    }

    let formatted = crate::formatters::format_output(&report, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}
