//! Discovery pipeline: walk, rewrite, extract, build.

use crate::convention::rewrite;
use crate::params::extract_params;
use crate::query::{QueryContract, extract_query_from_file};
use crate::table::{RouteTable, build_route_table};
use crate::walker::{ExcludeSet, RouteWalker};
use route_core::{GeneratorConfig, Result, RouteEntry, RouteFile};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Turns a configured input directory into route entries.
///
/// Relative paths in the configuration (input directory, exclusion
/// patterns) are resolved against a base directory, the working
/// directory by default.
///
/// # Examples
///
/// ```no_run
/// use route_core::GeneratorConfig;
/// use route_scan::RouteScanner;
///
/// let scanner = RouteScanner::new(&GeneratorConfig::default())?;
/// let table = scanner.scan();
/// for route in table.routes() {
///     println!("{} -> {}", route.accessor.join("."), route.entry.route_path);
/// }
/// # Ok::<(), route_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RouteScanner {
    config: GeneratorConfig,
    exclude: ExcludeSet,
    base_dir: Option<PathBuf>,
}

impl RouteScanner {
    /// Creates a scanner for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclusion pattern is invalid.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            exclude: ExcludeSet::new(&config.exclude)?,
            base_dir: None,
        })
    }

    /// Resolves relative configuration paths against `base_dir`.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Returns the resolved input directory.
    #[must_use]
    pub fn input_dir(&self) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(&self.config.input_dir),
            None => self.config.input_dir.clone(),
        }
    }

    /// Discovers route files and returns their entries in walk order.
    ///
    /// Files whose path declares a parameter twice are skipped with a
    /// warning.
    #[must_use]
    pub fn scan_entries(&self) -> Vec<RouteEntry> {
        let mut walker = RouteWalker::new(self.input_dir(), self.config.dialect, self.exclude.clone());
        if let Some(base) = &self.base_dir {
            walker = walker.with_base_dir(base);
        }

        let files = walker.walk();
        let root = walker.root().to_path_buf();
        let entries: Vec<RouteEntry> = files
            .iter()
            .filter_map(|file| self.to_entry(file, &root))
            .collect();

        info!(
            "Discovered {} routes in {} ({} dialect)",
            entries.len(),
            self.input_dir().display(),
            self.config.dialect
        );
        entries
    }

    /// Discovers routes and builds the route table.
    #[must_use]
    pub fn scan(&self) -> RouteTable {
        build_route_table(self.scan_entries())
    }

    fn to_entry(&self, file: &RouteFile, root: &Path) -> Option<RouteEntry> {
        let parsed = rewrite(&file.path, root, self.config.dialect)
            .and_then(|route_path| Ok((extract_params(&route_path)?, route_path)));
        let (params, route_path) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Skipping {}: {e}", file.path.display());
                return None;
            }
        };

        let query = if self.config.extract_query {
            match extract_query_from_file(&file.path) {
                QueryContract::Unsupported { reason } => {
                    warn!(
                        "Ignoring QueryParams in {}: {reason}",
                        file.path.display()
                    );
                    None
                }
                contract => contract.into_fields(),
            }
        } else {
            None
        };

        debug!("{} -> {route_path}", file.path.display());
        Some(RouteEntry {
            source_path: self.display_path(&file.path),
            route_path,
            params,
            query,
        })
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        let base = match &self.base_dir {
            Some(base) => std::path::absolute(base).unwrap_or_else(|_| base.clone()),
            None => match std::env::current_dir() {
                Ok(cwd) => cwd,
                Err(_) => return path.to_path_buf(),
            },
        };
        path.strip_prefix(&base)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}

/// Runs discovery for `config` relative to the working directory.
///
/// # Errors
///
/// Returns an error if an exclusion pattern is invalid.
pub fn scan_routes(config: &GeneratorConfig) -> Result<RouteTable> {
    Ok(RouteScanner::new(config)?.scan())
}
