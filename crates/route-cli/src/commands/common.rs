//! Helpers shared by several commands.

use anyhow::{Context, Result};
use clap::Args;
use route_core::cli::ExitCode;
use route_core::{ConfigOverrides, Dialect, Error, GeneratorConfig};
use route_scan::{RouteTable, scan_routes};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Generation flags accepted by `generate` and `watch`.
///
/// Unset flags keep the value from the configuration file.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateArgs {
    /// Directory containing route files
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Path of the generated TypeScript module
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Routing convention (next-pages, next-app, remix, nuxt, tanstack)
    #[arg(short, long)]
    pub dialect: Option<Dialect>,

    /// Additional glob pattern to exclude (repeatable)
    #[arg(short, long = "exclude", value_name = "GLOB", num_args = 1)]
    pub exclude: Vec<String>,

    /// Skip `QueryParams` extraction
    #[arg(long)]
    pub no_query: bool,

    /// Also emit a vitest suite next to the module
    #[arg(long)]
    pub tests: bool,

    /// Also emit fetch helpers for /api routes
    #[arg(long)]
    pub api: bool,

    /// Also emit an analytics JSON report
    #[arg(long)]
    pub analytics: bool,

    /// Wrap path parameter values in encodeURIComponent
    #[arg(long)]
    pub encode_path_params: bool,
}

impl GenerateArgs {
    /// Converts the flags into configuration overrides.
    #[must_use]
    pub fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            input_dir: self.input,
            output_file: self.output,
            dialect: self.dialect,
            exclude: self.exclude,
            no_query: self.no_query,
            emit_tests: self.tests,
            emit_api: self.api,
            emit_analytics: self.analytics,
            encode_path_params: self.encode_path_params,
        }
    }
}

/// Loads configuration, applies `overrides`, and validates the result.
///
/// With no explicit `path`, `typed-routes.toml` in the working directory
/// is used when present.
///
/// # Errors
///
/// Returns an error if an explicit config file is missing, if any loaded
/// file is invalid, or if the merged configuration fails validation.
pub fn load_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<GeneratorConfig> {
    let config = GeneratorConfig::discover(path)
        .context("failed to load configuration")?
        .merge(overrides);
    config.validate().context("invalid configuration")?;
    debug!("Effective configuration: {config:?}");
    Ok(config)
}

/// Discovers the routes described by `config`.
///
/// # Errors
///
/// Returns an error if an exclusion pattern is invalid.
pub fn scan(config: &GeneratorConfig) -> Result<RouteTable> {
    scan_routes(config).with_context(|| {
        format!("route discovery failed in {}", config.input_dir.display())
    })
}

/// Maps a command failure to the process exit code.
///
/// The first [`route_core::Error`] in the cause chain decides: write
/// failures exit with [`ExitCode::WRITE_FAILED`], bad configuration or
/// arguments with [`ExitCode::INVALID_INPUT`]. Anything else is
/// [`ExitCode::ERROR`].
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let Some(route_err) = err.chain().find_map(|e| e.downcast_ref::<Error>()) else {
        return ExitCode::ERROR;
    };

    if route_err.is_write_failure() {
        ExitCode::WRITE_FAILED
    } else if route_err.is_config_error()
        || route_err.is_not_found()
        || matches!(route_err, Error::InvalidArgument(_))
    {
        ExitCode::INVALID_INPUT
    } else {
        ExitCode::ERROR
    }
}
