//! Reports over discovered routes.
//!
//! Every report is computed from scratch on each call. None of them keep
//! state between runs.
//!
//! - [`analytics`]: counts, depth histogram and parameter frequency
//! - [`audit`]: builder usage and untyped path literals in a source tree
//! - [`performance`]: size, length and complexity of route files
//! - [`docs`]: markdown overview grouped by first path segment

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod analytics;
pub mod audit;
pub mod docs;
pub mod performance;

pub use analytics::RouteAnalytics;
pub use audit::{AuditReport, RouteUsage, UntypedPath, audit};
pub use docs::render_markdown;
pub use performance::{FileMetrics, PerformanceReport, PerformanceWarning, WarningKind};
