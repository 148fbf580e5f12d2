//! Recursive discovery of route files.
//!
//! Walks an input root depth-first in file-name order, pruning excluded
//! directories and yielding only files with a recognized extension that
//! the active dialect considers routable.
//!
//! # Exclusion patterns
//!
//! Patterns are glob-like and are tested against the candidate path made
//! relative to a base directory (the process working directory unless
//! overridden):
//!
//! - `**` matches any text, including `/`
//! - `*` matches any text except `/`
//! - `?` matches one character except `/`
//!
//! A pattern excludes a path when it matches *anywhere* in it.
//!
//! # Examples
//!
//! ```
//! use route_scan::ExcludeSet;
//!
//! let set = ExcludeSet::new(["**/drafts/**", "*.draft.tsx"]).unwrap();
//! assert!(set.is_excluded("blog/drafts/post.tsx"));
//! assert!(set.is_excluded("blog/post.draft.tsx"));
//! assert!(!set.is_excluded("blog/post.tsx"));
//! ```

use crate::convention::{convention_for, relative_route_path};
use regex::Regex;
use route_core::{Dialect, Error, ROUTE_EXTENSIONS, Result, RouteFile};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Compiled set of exclusion patterns.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<(String, Regex)>,
}

impl ExcludeSet {
    /// Compiles a list of glob patterns.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a pattern cannot be compiled.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                let regex = Regex::new(&glob_to_regex(pattern)).map_err(|e| Error::ConfigError {
                    message: format!("invalid exclude pattern '{pattern}': {e}"),
                })?;
                Ok((pattern.to_string(), regex))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Returns `true` if any pattern matches somewhere in `relative`.
    #[must_use]
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.matching_pattern(relative).is_some()
    }

    /// Returns the first pattern matching `relative`, if any.
    #[must_use]
    pub fn matching_pattern(&self, relative: &str) -> Option<&str> {
        let normalized = relative.replace('\\', "/");
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(&normalized))
            .map(|(pattern, _)| pattern.as_str())
    }

    /// Returns `true` if the set has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Translates a glob pattern into an unanchored regular expression.
///
/// A leading `**/` may also match zero directories and a trailing `/**`
/// also matches the directory itself, so `**/node_modules/**` excludes a
/// top-level `node_modules` as well as nested ones.
///
/// # Examples
///
/// ```
/// use route_scan::walker::glob_to_regex;
///
/// assert_eq!(glob_to_regex("*.tsx"), r"[^/]*\.tsx");
/// assert_eq!(glob_to_regex("a/**"), r"a(?:/.*)?");
/// ```
#[must_use]
pub fn glob_to_regex(pattern: &str) -> String {
    let pattern = pattern.replace('\\', "/");
    let chars: Vec<char> = pattern.chars().collect();
    let mut regex = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let rest = &chars[i..];
        if rest.starts_with(&['*', '*', '/']) {
            regex.push_str("(?:.*/)?");
            i += 3;
        } else if rest == ['/', '*', '*'] {
            regex.push_str("(?:/.*)?");
            i += 3;
        } else if rest.starts_with(&['*', '*']) {
            regex.push_str(".*");
            i += 2;
        } else if rest[0] == '*' {
            regex.push_str("[^/]*");
            i += 1;
        } else if rest[0] == '?' {
            regex.push_str("[^/]");
            i += 1;
        } else {
            let mut buf = [0u8; 4];
            regex.push_str(&regex::escape(rest[0].encode_utf8(&mut buf)));
            i += 1;
        }
    }

    regex
}

/// Returns `true` if `path` has one of the recognized route extensions.
#[must_use]
pub fn has_route_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ROUTE_EXTENSIONS.contains(&ext))
}

/// Recursive route file walker.
///
/// # Examples
///
/// ```no_run
/// use route_core::Dialect;
/// use route_scan::{ExcludeSet, RouteWalker};
///
/// let exclude = ExcludeSet::new(["**/components/**"]).unwrap();
/// let files = RouteWalker::new("pages", Dialect::NextPages, exclude).walk();
/// println!("found {} route files", files.len());
/// ```
#[derive(Debug, Clone)]
pub struct RouteWalker {
    root: PathBuf,
    base_dir: PathBuf,
    dialect: Dialect,
    exclude: ExcludeSet,
}

impl RouteWalker {
    /// Creates a walker rooted at `root`.
    ///
    /// Exclusion patterns are evaluated relative to the current working
    /// directory; use [`RouteWalker::with_base_dir`] to change that.
    #[must_use]
    pub fn new(root: impl AsRef<Path>, dialect: Dialect, exclude: ExcludeSet) -> Self {
        let root = absolutize(root.as_ref());
        let base_dir = std::env::current_dir().unwrap_or_else(|_| root.clone());

        Self {
            root,
            base_dir,
            dialect,
            exclude,
        }
    }

    /// Sets the directory exclusion patterns are evaluated against.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        self.base_dir = absolutize(base_dir.as_ref());
        self
    }

    /// Returns the absolute root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the root and returns every routable file.
    ///
    /// A missing root or an unreadable directory is logged and treated
    /// as empty; the walk itself never fails.
    #[must_use]
    pub fn walk(&self) -> Vec<RouteFile> {
        if !self.root.is_dir() {
            warn!("Input directory not found: {}", self.root.display());
            return Vec::new();
        }

        let convention = convention_for(self.dialect);
        let mut files = Vec::new();

        let entries = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.excluded(entry.path()));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    warn!("Skipping unreadable path {path}: {e}");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !has_route_extension(entry.path()) {
                continue;
            }

            let relative = relative_route_path(entry.path(), &self.root);
            if !convention.is_routable(&relative) {
                debug!("Skipping non-routable file: {}", entry.path().display());
                continue;
            }

            let mut file = RouteFile::new(entry.path());
            if let Some(role) = convention.role(&relative) {
                file = file.with_role(role);
            }
            files.push(file);
        }

        debug!(
            "Discovered {} route files under {}",
            files.len(),
            self.root.display()
        );
        files
    }

    fn excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        let relative = relative.to_string_lossy();
        match self.exclude.matching_pattern(&relative) {
            Some(pattern) => {
                debug!("Excluded {relative} (pattern '{pattern}')");
                true
            }
            None => false,
        }
    }
}

/// Lists route file paths under `root`, honoring `exclude` patterns.
///
/// Convenience wrapper over [`RouteWalker`] for the default dialect with
/// patterns evaluated relative to the working directory.
///
/// # Errors
///
/// Returns an error if an exclusion pattern is invalid.
pub fn walk(root: impl AsRef<Path>, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let exclude = ExcludeSet::new(exclude)?;
    Ok(RouteWalker::new(root, Dialect::NextPages, exclude)
        .walk()
        .into_iter()
        .map(|file| file.path)
        .collect())
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
