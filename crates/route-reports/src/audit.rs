//! Route usage audit.
//!
//! Walks an application source tree and reports:
//!
//! - how often each generated builder is referenced (`routes.blog.slug`)
//! - routes no source file references
//! - the most referenced routes
//! - string literals that spell out a path matching a known route, which
//!   are candidates for switching to the typed builder
//!
//! # Examples
//!
//! ```no_run
//! use route_core::GeneratorConfig;
//! use route_reports::audit::audit;
//! use route_scan::scan_routes;
//! use std::path::Path;
//!
//! let table = scan_routes(&GeneratorConfig::default())?;
//! let report = audit(&table, Path::new("src"))?;
//! for literal in &report.untyped_paths {
//!     println!("{}:{} {}", literal.file.display(), literal.line, literal.literal);
//! }
//! # Ok::<(), route_core::Error>(())
//! ```

use regex::Regex;
use route_core::{Error, ROUTE_EXTENSIONS, Result};
use route_scan::RouteTable;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Number of entries in [`AuditReport::most_used`].
pub const MOST_USED_LIMIT: usize = 10;

/// First-line marker of files written by the generator.
const GENERATED_MARKER: &str = "// Generated by typed-routes";

static ACCESSOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\broutes((?:\s*\??\.\s*[A-Za-z_$][A-Za-z0-9_$]*)+)").expect("valid regex")
});
static PATH_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["'`](/[^"'`\s]*)["'`]"#).expect("valid regex"));
static MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[A-Za-z0-9_$]+[*?]?").expect("valid regex"));

/// Reference count of one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteUsage {
    /// Dotted accessor of the builder
    pub name: String,
    /// Canonical route path
    pub route_path: String,
    /// Number of references found
    pub count: usize,
}

/// A string literal that could be replaced by a builder call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UntypedPath {
    /// File containing the literal
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The literal text, without quotes
    pub literal: String,
    /// Dotted accessor of the matching route
    pub route: String,
}

/// Result of auditing a source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Number of source files inspected
    pub scanned_files: usize,
    /// Reference count per route, in namespace order
    pub usage: Vec<RouteUsage>,
    /// Accessors of routes with no references
    pub unused: Vec<String>,
    /// Up to [`MOST_USED_LIMIT`] referenced routes, most used first
    pub most_used: Vec<RouteUsage>,
    /// Path literals matching a route pattern
    pub untyped_paths: Vec<UntypedPath>,
}

impl AuditReport {
    /// Serializes the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SerializationError {
            message: "failed to serialize audit report".to_string(),
            source: Some(e),
        })
    }
}

/// A route path compiled into a matcher for literal paths.
#[derive(Debug)]
struct RoutePattern {
    name: String,
    regex: Regex,
}

/// Audits `src_dir` against the routes in `table`.
///
/// Files with a recognized source extension are read; files the
/// generator wrote and `node_modules` are skipped. Unreadable files are
/// logged and skipped.
///
/// # Errors
///
/// Returns [`Error::ResourceNotFound`] if `src_dir` is not a directory.
pub fn audit(table: &RouteTable, src_dir: &Path) -> Result<AuditReport> {
    if !src_dir.is_dir() {
        return Err(Error::ResourceNotFound {
            resource: src_dir.display().to_string(),
        });
    }

    let names: Vec<String> = table.routes().map(|r| r.accessor.join(".")).collect();
    let mut counts: HashMap<&str, usize> = names.iter().map(|n| (n.as_str(), 0)).collect();
    let patterns: Vec<RoutePattern> = table
        .routes()
        .filter_map(|r| RoutePattern::new(r.accessor.join("."), &r.entry.route_path))
        .collect();

    let mut scanned_files = 0;
    let mut untyped_paths = Vec::new();

    let walker = WalkDir::new(src_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules");
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable path during audit: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }

        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {e}", entry.path().display());
                continue;
            }
        };
        if content.starts_with(GENERATED_MARKER) {
            debug!("Skipping generated file {}", entry.path().display());
            continue;
        }

        scanned_files += 1;
        count_references(&content, &mut counts);
        find_untyped_paths(entry.path(), &content, &patterns, &mut untyped_paths);
    }

    let usage: Vec<RouteUsage> = table
        .routes()
        .zip(&names)
        .map(|(route, name)| RouteUsage {
            name: name.clone(),
            route_path: route.entry.route_path.clone(),
            count: counts.get(name.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let unused = usage
        .iter()
        .filter(|u| u.count == 0)
        .map(|u| u.name.clone())
        .collect();

    let mut most_used: Vec<RouteUsage> = usage.iter().filter(|u| u.count > 0).cloned().collect();
    most_used.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    most_used.truncate(MOST_USED_LIMIT);

    info!(
        "Audited {scanned_files} files: {} untyped path literals",
        untyped_paths.len()
    );

    Ok(AuditReport {
        scanned_files,
        usage,
        unused,
        most_used,
        untyped_paths,
    })
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ROUTE_EXTENSIONS.contains(&ext))
}

/// Counts `routes.<accessor>` chains, crediting the longest known prefix.
fn count_references(content: &str, counts: &mut HashMap<&str, usize>) {
    for caps in ACCESSOR_REGEX.captures_iter(content) {
        let keys: Vec<&str> = caps[1]
            .split('.')
            .map(|k| k.trim().trim_end_matches('?').trim())
            .filter(|k| !k.is_empty())
            .collect();

        for len in (1..=keys.len()).rev() {
            if let Some(count) = counts.get_mut(keys[..len].join(".").as_str()) {
                *count += 1;
                break;
            }
        }
    }
}

fn find_untyped_paths(
    file: &Path,
    content: &str,
    patterns: &[RoutePattern],
    found: &mut Vec<UntypedPath>,
) {
    for (index, line) in content.lines().enumerate() {
        for caps in PATH_LITERAL_REGEX.captures_iter(line) {
            let literal = &caps[1];
            if literal.contains("${") {
                continue;
            }
            let path = literal.split(['?', '#']).next().unwrap_or(literal);
            if path == "/" {
                continue;
            }

            if let Some(pattern) = patterns.iter().find(|p| p.regex.is_match(path)) {
                found.push(UntypedPath {
                    file: file.to_path_buf(),
                    line: index + 1,
                    literal: literal.to_string(),
                    route: pattern.name.clone(),
                });
            }
        }
    }
}

impl RoutePattern {
    /// Compiles a canonical route path. Optional segments may be absent,
    /// catch-alls match any remainder.
    fn new(name: String, route_path: &str) -> Option<Self> {
        let mut source = String::from("^");

        for segment in route_path.split('/').filter(|s| !s.is_empty()) {
            let whole = MARKER_REGEX
                .find(segment)
                .filter(|m| m.start() == 0 && m.end() == segment.len());
            match whole.and_then(|m| m.as_str().chars().last()) {
                Some('?') => {
                    source.push_str("(?:/[^/]+)?");
                    continue;
                }
                Some('*') => {
                    source.push_str("(?:/.*)?");
                    continue;
                }
                _ => {}
            }

            source.push('/');
            let mut last = 0;
            for marker in MARKER_REGEX.find_iter(segment) {
                source.push_str(&regex::escape(&segment[last..marker.start()]));
                source.push_str(match marker.as_str().chars().last() {
                    Some('*') => ".*",
                    Some('?') => "[^/]*",
                    _ => "[^/]+",
                });
                last = marker.end();
            }
            source.push_str(&regex::escape(&segment[last..]));
        }

        source.push_str("/?$");
        match Regex::new(&source) {
            Ok(regex) => Some(Self { name, regex }),
            Err(e) => {
                warn!("Cannot match literals against {route_path}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(route_path: &str, path: &str) -> bool {
        RoutePattern::new("r".to_string(), route_path)
            .unwrap()
            .regex
            .is_match(path)
    }

    #[test]
    fn test_pattern_static() {
        assert!(matches("/about", "/about"));
        assert!(matches("/about", "/about/"));
        assert!(!matches("/about", "/about/team"));
    }

    #[test]
    fn test_pattern_params() {
        assert!(matches("/blog/:slug", "/blog/hello"));
        assert!(!matches("/blog/:slug", "/blog"));
        assert!(!matches("/blog/:slug", "/blog/a/b"));
        assert!(matches("/files/:id.json", "/files/42.json"));
    }

    #[test]
    fn test_pattern_optional_and_catch_all() {
        assert!(matches("/docs/:slug*", "/docs"));
        assert!(matches("/docs/:slug*", "/docs/a/b/c"));
        assert!(matches("/:lang?/about", "/about"));
        assert!(matches("/:lang?/about", "/fr/about"));
        assert!(!matches("/:lang?/about", "/a/b/about"));
    }

    #[test]
    fn test_count_references_longest_prefix() {
        let names = ["blog.slug".to_string(), "blog.index".to_string(), "home".to_string()];
        let mut counts: HashMap<&str, usize> = names.iter().map(|n| (n.as_str(), 0)).collect();

        count_references(
            "link(routes.blog.slug({ slug }));\nrouter.push(routes.home());\nroutes.blog.slug\n  .toString();\nroutes?.blog.index()",
            &mut counts,
        );

        assert_eq!(counts["blog.slug"], 2);
        assert_eq!(counts["home"], 1);
        assert_eq!(counts["blog.index"], 1);
    }

    #[test]
    fn test_find_untyped_paths() {
        let patterns = vec![
            RoutePattern::new("blog.slug".to_string(), "/blog/:slug").unwrap(),
            RoutePattern::new("about".to_string(), "/about").unwrap(),
        ];
        let mut found = Vec::new();
        find_untyped_paths(
            Path::new("src/app.tsx"),
            "const a = \"/about?tab=team\";\nconst b = '/blog/hello';\nconst c = `/blog/${slug}`;\nconst d = \"/\";\nconst e = \"/unknown\";",
            &patterns,
            &mut found,
        );

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 1);
        assert_eq!(found[0].route, "about");
        assert_eq!(found[0].literal, "/about?tab=team");
        assert_eq!(found[1].line, 2);
        assert_eq!(found[1].route, "blog.slug");
    }
}
