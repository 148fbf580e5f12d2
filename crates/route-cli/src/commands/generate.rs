//! Generate command implementation.
//!
//! One full pipeline run:
//! 1. Discover routes under the input directory
//! 2. Render the route module plus any enabled companion artifacts
//! 3. Write every artifact atomically

use super::common::scan;
use anyhow::{Context, Result};
use route_codegen::{GeneratedFile, RouteCodeGenerator};
use route_core::GeneratorConfig;
use route_core::cli::{ExitCode, OutputFormat};
use route_core::Dialect;
use route_reports::RouteAnalytics;
use route_scan::NameCollision;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSummary {
    /// Number of routes emitted
    pub routes: usize,
    /// Dialect used for discovery
    pub dialect: Dialect,
    /// Files written, in write order
    pub files: Vec<PathBuf>,
    /// Name collisions resolved during discovery
    pub collisions: Vec<NameCollision>,
}

/// Runs discovery and generation once and writes the results.
///
/// # Errors
///
/// Returns an error if discovery is misconfigured, if rendering fails, or
/// if any artifact cannot be written.
pub fn generate_once(config: &GeneratorConfig) -> Result<GenerateSummary> {
    let table = scan(config)?;
    if table.is_empty() {
        warn!(
            "No routes found in {}; writing an empty route module",
            config.input_dir.display()
        );
    }

    let generator =
        RouteCodeGenerator::new(config).context("failed to initialize code generator")?;
    let mut code = generator
        .generate(&table)
        .context("failed to render route module")?;

    if config.emit_analytics {
        let analytics = RouteAnalytics::from_entries(table.entries(), config.dialect);
        code.add_file(GeneratedFile::new(
            config.sibling_output("analytics.json"),
            analytics.to_json()?,
        ));
    }

    code.write_all().context("failed to write generated files")?;

    let files: Vec<PathBuf> = code.files().map(|f| f.path().to_path_buf()).collect();
    info!("Wrote {} files for {} routes", files.len(), table.len());

    Ok(GenerateSummary {
        routes: table.len(),
        dialect: config.dialect,
        files,
        collisions: table.collisions().to_vec(),
    })
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if generation fails or the summary cannot be
/// formatted.
pub async fn run(config: GeneratorConfig, output_format: OutputFormat) -> Result<ExitCode> {
    info!(
        "Generating routes from {} into {}",
        config.input_dir.display(),
        config.output_file.display()
    );

    let summary = generate_once(&config)?;
    let formatted = crate::formatters::format_output(&summary, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(temp: &TempDir) -> GeneratorConfig {
        GeneratorConfig {
            input_dir: temp.path().join("pages"),
            output_file: temp.path().join("src/routes.ts"),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_once_writes_module() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pages/blog")).unwrap();
        fs::write(temp.path().join("pages/index.tsx"), "").unwrap();
        fs::write(temp.path().join("pages/blog/[slug].tsx"), "").unwrap();

        let summary = generate_once(&config(&temp)).unwrap();

        assert_eq!(summary.routes, 2);
        assert_eq!(summary.files, vec![temp.path().join("src/routes.ts")]);
        assert!(summary.collisions.is_empty());
        let module = fs::read_to_string(temp.path().join("src/routes.ts")).unwrap();
        assert!(module.contains("home: () => \"/\""));
    }

    #[test]
    fn test_generate_once_analytics() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pages")).unwrap();
        fs::write(temp.path().join("pages/about.tsx"), "").unwrap();

        let config = GeneratorConfig {
            emit_analytics: true,
            ..config(&temp)
        };
        let summary = generate_once(&config).unwrap();

        assert_eq!(summary.files.len(), 2);
        let json = fs::read_to_string(temp.path().join("src/routes.analytics.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalRoutes"], 1);
        assert_eq!(value["dialect"], "next-pages");
    }

    #[test]
    fn test_generate_once_missing_input_writes_empty_module() {
        let temp = TempDir::new().unwrap();
        let summary = generate_once(&config(&temp)).unwrap();

        assert_eq!(summary.routes, 0);
        let module = fs::read_to_string(temp.path().join("src/routes.ts")).unwrap();
        assert!(module.contains("export const routes = {"));
    }
}
