//! Docs command implementation.
//!
//! Renders a markdown overview of every route, to stdout or to a file.

use super::common::scan;
use anyhow::{Context, Result};
use route_codegen::GeneratedFile;
use route_core::GeneratorConfig;
use route_core::cli::{ExitCode, OutputFormat};
use route_reports::render_markdown;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Result of writing the documentation to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsSummary {
    /// Number of routes documented
    pub routes: usize,
    /// File written
    pub output: PathBuf,
}

/// Runs the docs command.
///
/// Without `output` the markdown itself is printed and `output_format`
/// is not used.
///
/// # Errors
///
/// Returns an error if discovery is misconfigured or the file cannot be
/// written.
pub async fn run(
    config: GeneratorConfig,
    output: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let table = scan(&config)?;
    let markdown = render_markdown(table.entries());

    let Some(output) = output else {
        print!("{markdown}");
        return Ok(ExitCode::SUCCESS);
    };

    GeneratedFile::new(&output, markdown)
        .write_to_disk()
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Wrote route documentation to {}", output.display());

    let summary = DocsSummary {
        routes: table.len(),
        output,
    };
    let formatted = crate::formatters::format_output(&summary, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_markdown_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pages")).unwrap();
        fs::write(temp.path().join("pages/about.tsx"), "").unwrap();

        let config = GeneratorConfig {
            input_dir: temp.path().join("pages"),
            ..Default::default()
        };
        let output = temp.path().join("docs/ROUTES.md");
        let code = run(config, Some(output.clone()), OutputFormat::Text)
            .await
            .unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        let markdown = fs::read_to_string(output).unwrap();
        assert!(markdown.starts_with("# Routes\n\n1 routes in 1 groups.\n"));
        assert!(markdown.contains("| `about` | `/about` | - | - |"));
    }
}
