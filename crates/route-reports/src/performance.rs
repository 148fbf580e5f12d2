//! Route file performance heuristics.
//!
//! Large or branchy route modules slow down builds and page loads. This
//! report measures each route file and flags the ones over fixed
//! thresholds. The complexity score is a crude count of branch keywords
//! and short-circuit operators, not a parse.

use regex::Regex;
use route_core::{Error, Result, RouteEntry};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::warn;

/// Files larger than this many bytes get a warning.
pub const MAX_FILE_BYTES: u64 = 50 * 1024;

/// Files longer than this many lines get a warning.
pub const MAX_LINES: usize = 500;

/// Files scoring above this complexity get a warning.
pub const MAX_COMPLEXITY: usize = 50;

static BRANCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:if|else|for|while|switch|case|catch)\b|&&|\|\||\?\?").expect("valid regex")
});

/// Measurements of one route file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetrics {
    /// Route the file defines
    pub route_path: String,
    /// Route source file
    pub source_path: PathBuf,
    /// Size in bytes
    pub size_bytes: u64,
    /// Number of lines
    pub lines: usize,
    /// Branch keyword and operator count
    pub complexity: usize,
}

/// Which threshold a file exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// Over [`MAX_FILE_BYTES`]
    LargeFile,
    /// Over [`MAX_LINES`]
    LongFile,
    /// Over [`MAX_COMPLEXITY`]
    HighComplexity,
}

/// A threshold violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceWarning {
    /// Offending file
    pub source_path: PathBuf,
    /// Threshold exceeded
    pub kind: WarningKind,
    /// Human-readable description
    pub message: String,
}

/// Metrics for every readable route file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Per-file measurements, in route order
    pub files: Vec<FileMetrics>,
    /// Threshold violations
    pub warnings: Vec<PerformanceWarning>,
    /// Sum of file sizes
    pub total_bytes: u64,
    /// Sum of line counts
    pub total_lines: usize,
}

impl PerformanceReport {
    /// Measures the source file of every entry.
    ///
    /// Files that cannot be read are logged and left out.
    #[must_use]
    pub fn from_entries(entries: &[RouteEntry]) -> Self {
        let mut report = Self::default();

        for entry in entries {
            let content = match fs::read(&entry.source_path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    warn!("Failed to read {}: {e}", entry.source_path.display());
                    continue;
                }
            };
            report.push(measure(entry, &content));
        }

        report
    }

    /// Adds one file's metrics and any warnings they trigger.
    pub fn push(&mut self, metrics: FileMetrics) {
        self.warnings.extend(check_thresholds(&metrics));
        self.total_bytes += metrics.size_bytes;
        self.total_lines += metrics.lines;
        self.files.push(metrics);
    }

    /// Serializes the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SerializationError {
            message: "failed to serialize performance report".to_string(),
            source: Some(e),
        })
    }
}

/// Measures a route file's content.
#[must_use]
pub fn measure(entry: &RouteEntry, content: &str) -> FileMetrics {
    FileMetrics {
        route_path: entry.route_path.clone(),
        source_path: entry.source_path.clone(),
        size_bytes: content.len() as u64,
        lines: content.lines().count(),
        complexity: complexity(content),
    }
}

/// Counts branch keywords and short-circuit operators.
///
/// # Examples
///
/// ```
/// use route_reports::performance::complexity;
///
/// assert_eq!(complexity("export default function Page() {}"), 0);
/// assert_eq!(complexity("if (a && b) { x() } else { y() }"), 3);
/// ```
#[must_use]
pub fn complexity(source: &str) -> usize {
    BRANCH_REGEX.find_iter(source).count()
}

fn check_thresholds(metrics: &FileMetrics) -> Vec<PerformanceWarning> {
    let mut warnings = Vec::new();
    let mut warn_on = |kind, message: String| {
        warnings.push(PerformanceWarning {
            source_path: metrics.source_path.clone(),
            kind,
            message,
        });
    };

    if metrics.size_bytes > MAX_FILE_BYTES {
        warn_on(
            WarningKind::LargeFile,
            format!(
                "{} bytes exceeds the {MAX_FILE_BYTES} byte limit",
                metrics.size_bytes
            ),
        );
    }
    if metrics.lines > MAX_LINES {
        warn_on(
            WarningKind::LongFile,
            format!("{} lines exceeds the {MAX_LINES} line limit", metrics.lines),
        );
    }
    if metrics.complexity > MAX_COMPLEXITY {
        warn_on(
            WarningKind::HighComplexity,
            format!(
                "complexity {} exceeds the limit of {MAX_COMPLEXITY}",
                metrics.complexity
            ),
        );
    }

    warnings
}
