//! Generator configuration.
//!
//! A single structured input drives one pipeline run: where routes live,
//! which dialect names them, what to exclude, and which optional
//! artifacts to emit. Values come from defaults, then an optional TOML
//! file, then command-line overrides.
//!
//! # Examples
//!
//! ```
//! use route_core::{Dialect, GeneratorConfig};
//!
//! let config: GeneratorConfig = toml::from_str(r#"
//!     inputDir = "app"
//!     outputFile = "src/routes.ts"
//!     dialect = "next-app"
//!     exclude = ["**/components/**"]
//! "#).unwrap();
//!
//! assert_eq!(config.dialect, Dialect::NextApp);
//! assert!(config.extract_query);
//! assert!(config.validate().is_ok());
//! ```

use crate::{Dialect, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "typed-routes.toml";

/// Exclusion patterns applied when none are configured.
pub const DEFAULT_EXCLUDES: &[&str] = &["**/node_modules/**", "**/*.test.*", "**/*.spec.*"];

/// Configuration for one route generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct GeneratorConfig {
    /// Root directory containing route files.
    ///
    /// Default: `pages`
    pub input_dir: PathBuf,

    /// Path of the generated TypeScript module.
    ///
    /// Default: `src/routes.ts`
    pub output_file: PathBuf,

    /// Naming convention used by the route files.
    pub dialect: Dialect,

    /// Glob patterns excluded from discovery.
    pub exclude: Vec<String>,

    /// Scan route files for a `QueryParams` contract.
    ///
    /// Default: true
    pub extract_query: bool,

    /// Emit a test suite next to the generated module.
    pub emit_tests: bool,

    /// Emit fetch helpers for `/api` routes.
    pub emit_api: bool,

    /// Emit an analytics report next to the generated module.
    pub emit_analytics: bool,

    /// Wrap path parameter values in `encodeURIComponent`.
    pub encode_path_params: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("pages"),
            output_file: PathBuf::from("src/routes.ts"),
            dialect: Dialect::default(),
            exclude: DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect(),
            extract_query: true,
            emit_tests: false,
            emit_api: false,
            emit_analytics: false,
            encode_path_params: false,
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_toml(&content).map_err(|e| Error::ConfigError {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown values.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("failed to parse config: {e}"),
        })
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] when it exists,
    /// else the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing, or if any
    /// loaded file is invalid.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::ResourceNotFound {
                        resource: path.display().to_string(),
                    });
                }
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(path)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    tracing::debug!("Loading config from {DEFAULT_CONFIG_FILE}");
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Serializes the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigError {
            message: format!("failed to serialize config: {e}"),
        })
    }

    /// Applies command-line overrides on top of this configuration.
    #[must_use]
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(input_dir) = overrides.input_dir {
            self.input_dir = input_dir;
        }
        if let Some(output_file) = overrides.output_file {
            self.output_file = output_file;
        }
        if let Some(dialect) = overrides.dialect {
            self.dialect = dialect;
        }
        if !overrides.exclude.is_empty() {
            self.exclude.extend(overrides.exclude);
        }
        if overrides.no_query {
            self.extract_query = false;
        }
        self.emit_tests |= overrides.emit_tests;
        self.emit_api |= overrides.emit_api;
        self.emit_analytics |= overrides.emit_analytics;
        self.encode_path_params |= overrides.encode_path_params;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the input directory or output path is empty,
    /// or if the output path has no file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_core::GeneratorConfig;
    /// use std::path::PathBuf;
    ///
    /// let mut config = GeneratorConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.output_file = PathBuf::new();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: "input directory cannot be empty".to_string(),
            });
        }

        if self.output_file.as_os_str().is_empty() || self.output_file.file_name().is_none() {
            return Err(Error::ConfigError {
                message: "output file must be a file path".to_string(),
            });
        }

        if let Some(pattern) = self.exclude.iter().find(|p| p.trim().is_empty()) {
            return Err(Error::ConfigError {
                message: format!("exclude pattern cannot be blank: {pattern:?}"),
            });
        }

        Ok(())
    }

    /// Returns the path of a sibling artifact of the output file.
    ///
    /// `src/routes.ts` with suffix `test.ts` becomes `src/routes.test.ts`.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_core::GeneratorConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = GeneratorConfig::default();
    /// assert_eq!(
    ///     config.sibling_output("analytics.json"),
    ///     PathBuf::from("src/routes.analytics.json"),
    /// );
    /// ```
    #[must_use]
    pub fn sibling_output(&self, suffix: &str) -> PathBuf {
        let stem = self
            .output_file
            .file_stem()
            .map_or_else(|| "routes".to_string(), |s| s.to_string_lossy().into_owned());
        self.output_file.with_file_name(format!("{stem}.{suffix}"))
    }
}

/// Command-line overrides merged on top of a loaded configuration.
///
/// `None` and `false` mean "keep the configured value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConfigOverrides {
    /// Override for [`GeneratorConfig::input_dir`]
    pub input_dir: Option<PathBuf>,
    /// Override for [`GeneratorConfig::output_file`]
    pub output_file: Option<PathBuf>,
    /// Override for [`GeneratorConfig::dialect`]
    pub dialect: Option<Dialect>,
    /// Extra exclusion patterns, appended to the configured ones
    pub exclude: Vec<String>,
    /// Disable query contract extraction
    pub no_query: bool,
    /// Enable test suite emission
    pub emit_tests: bool,
    /// Enable API helper emission
    pub emit_api: bool,
    /// Enable analytics emission
    pub emit_analytics: bool,
    /// Enable path parameter encoding
    pub encode_path_params: bool,
}
