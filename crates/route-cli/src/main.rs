//! `typed-routes`: typed path builders for file-based routers.
//!
//! Scans a route directory, derives one route per file according to the
//! selected dialect, and writes a TypeScript module exposing a typed
//! builder per route.
//!
//! # Examples
//!
//! ```bash
//! # Generate src/routes.ts from pages/
//! typed-routes generate
//!
//! # App Router project, with a vitest suite
//! typed-routes generate --dialect next-app --input app --tests
//!
//! # Regenerate on every change
//! typed-routes watch
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use route_cli::commands;
use route_cli::{GenerateArgs, exit_code_for, load_config};
use route_core::cli::{ExitCode, OutputFormat};
use route_core::{ConfigOverrides, DEFAULT_CONFIG_FILE, Dialect};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Typed path builders for file-based routers.
#[derive(Parser, Debug)]
#[command(name = "typed-routes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: typed-routes.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the typed route module.
    ///
    /// Flags override the config file, which overrides the defaults.
    ///
    /// # Examples
    ///
    /// ```bash
    /// typed-routes generate --input app --dialect next-app --output lib/routes.ts
    /// typed-routes generate --tests --api --analytics
    /// ```
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Generate once, then regenerate whenever a route file changes.
    Watch {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Print route analytics: counts, depth histogram, parameter names.
    Analyze,

    /// Report builder usage and hard-coded paths in application source.
    Audit {
        /// Application source directory to scan
        #[arg(long, value_name = "DIR", default_value = "src")]
        src: PathBuf,
    },

    /// Flag route files that are large, long or branch-heavy.
    Perf,

    /// Render markdown documentation of every route.
    Docs {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write a starter config file.
    Init {
        /// Dialect to record in the config
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// typed-routes completions bash > /etc/bash_completion.d/typed-routes
    /// typed-routes completions zsh > ~/.zfunc/_typed-routes
    /// ```
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let output_format = match cli.format.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(ExitCode::INVALID_INPUT.as_i32());
        }
    };

    let exit_code = match execute_command(cli.command, cli.config, output_format).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging to stderr.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, defaulting
/// to `info`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Routes commands to their handlers and returns an exit code.
async fn execute_command(
    command: Commands,
    config_path: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let config_path = config_path.as_deref();

    match command {
        Commands::Generate { args } => {
            let config = load_config(config_path, args.into_overrides())?;
            commands::generate::run(config, output_format).await
        }
        Commands::Watch { args } => {
            let config = load_config(config_path, args.into_overrides())?;
            commands::watch::run(config, output_format).await
        }
        Commands::Analyze => {
            let config = load_config(config_path, ConfigOverrides::default())?;
            commands::analyze::run(config, output_format).await
        }
        Commands::Audit { src } => {
            let config = load_config(config_path, ConfigOverrides::default())?;
            commands::audit::run(config, &src, output_format).await
        }
        Commands::Perf => {
            let config = load_config(config_path, ConfigOverrides::default())?;
            commands::perf::run(config, output_format).await
        }
        Commands::Docs { output } => {
            let config = load_config(config_path, ConfigOverrides::default())?;
            commands::docs::run(config, output, output_format).await
        }
        Commands::Init { dialect, force } => {
            let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
            commands::init::run(path, dialect, force, output_format).await
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd).await
        }
    }
}
