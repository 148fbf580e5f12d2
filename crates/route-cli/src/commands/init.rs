//! Init command implementation.
//!
//! Writes a starter `typed-routes.toml` holding every option at its
//! default value.

use anyhow::{Context, Result};
use route_codegen::GeneratedFile;
use route_core::cli::{ExitCode, OutputFormat};
use route_core::{Dialect, Error, GeneratorConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of the init command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitSummary {
    /// Config file written
    pub path: PathBuf,
    /// Dialect recorded in the file
    pub dialect: Dialect,
    /// Whether an existing file was replaced
    pub overwritten: bool,
}

/// Writes the default configuration to `path`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `path` exists and `force` is not
/// set, or an error if the file cannot be written.
pub fn write_default_config(
    path: &Path,
    dialect: Option<Dialect>,
    force: bool,
) -> Result<InitSummary> {
    let overwritten = path.exists();
    if overwritten && !force {
        return Err(Error::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    let config = GeneratorConfig {
        dialect: dialect.unwrap_or_default(),
        ..Default::default()
    };
    GeneratedFile::new(path, config.to_toml()?)
        .write_to_disk()
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());

    Ok(InitSummary {
        path: path.to_path_buf(),
        dialect: config.dialect,
        overwritten,
    })
}

/// Runs the init command.
///
/// # Errors
///
/// Returns an error if the config file cannot be written.
pub async fn run(
    path: &Path,
    dialect: Option<Dialect>,
    force: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let summary = write_default_config(path, dialect, force)?;
    let formatted = crate::formatters::format_output(&summary, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::exit_code_for;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_writes_loadable_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("typed-routes.toml");

        let summary = write_default_config(&path, Some(Dialect::Remix), false).unwrap();
        assert!(!summary.overwritten);

        let loaded = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.dialect, Dialect::Remix);
        assert_eq!(loaded.input_dir, GeneratorConfig::default().input_dir);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("typed-routes.toml");
        fs::write(&path, "dialect = \"nuxt\"\n").unwrap();

        let err = write_default_config(&path, None, false).unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
        assert_eq!(fs::read_to_string(&path).unwrap(), "dialect = \"nuxt\"\n");

        let summary = write_default_config(&path, None, true).unwrap();
        assert!(summary.overwritten);
        assert_eq!(summary.dialect, Dialect::NextPages);
    }
}
