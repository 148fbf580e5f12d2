//! Route analytics.
//!
//! A snapshot of the route set: how many routes of each shape exist, how
//! deep they nest, and which parameter names recur.
//!
//! # Examples
//!
//! ```
//! use route_core::{Dialect, ParamSpec, RouteEntry};
//! use route_reports::analytics::RouteAnalytics;
//!
//! let entries = vec![
//!     RouteEntry {
//!         source_path: "pages/index.tsx".into(),
//!         route_path: "/".to_string(),
//!         params: vec![],
//!         query: None,
//!     },
//!     RouteEntry {
//!         source_path: "pages/blog/[slug].tsx".into(),
//!         route_path: "/blog/:slug".to_string(),
//!         params: vec![ParamSpec::scalar("slug")],
//!         query: None,
//!     },
//! ];
//!
//! let analytics = RouteAnalytics::from_entries(&entries, Dialect::NextPages);
//! assert_eq!(analytics.total_routes, 2);
//! assert_eq!(analytics.dynamic_routes, 1);
//! assert_eq!(analytics.param_frequency["slug"], 1);
//! ```

use chrono::{DateTime, Utc};
use route_core::{Dialect, Error, Result, RouteEntry};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate statistics over a set of routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAnalytics {
    /// When the snapshot was taken (UTC)
    pub generated_at: DateTime<Utc>,
    /// Dialect the routes were discovered with
    pub dialect: Dialect,
    /// Number of routes
    pub total_routes: usize,
    /// Routes without parameters
    pub static_routes: usize,
    /// Routes with at least one parameter
    pub dynamic_routes: usize,
    /// Routes with a catch-all parameter
    pub catch_all_routes: usize,
    /// Routes with a declared query contract
    pub routes_with_query: usize,
    /// Deepest route, in path segments
    pub max_depth: usize,
    /// Number of routes per path depth
    pub depth_histogram: BTreeMap<usize, usize>,
    /// Number of routes using each parameter name
    pub param_frequency: BTreeMap<String, usize>,
}

impl RouteAnalytics {
    /// Computes analytics for `entries`, stamped with the current time.
    #[must_use]
    pub fn from_entries(entries: &[RouteEntry], dialect: Dialect) -> Self {
        Self::at(entries, dialect, Utc::now())
    }

    /// Computes analytics for `entries` with an explicit timestamp.
    #[must_use]
    pub fn at(entries: &[RouteEntry], dialect: Dialect, generated_at: DateTime<Utc>) -> Self {
        let mut depth_histogram = BTreeMap::new();
        let mut param_frequency = BTreeMap::new();

        for entry in entries {
            *depth_histogram.entry(entry.depth()).or_insert(0) += 1;
            for param in &entry.params {
                *param_frequency.entry(param.name.clone()).or_insert(0) += 1;
            }
        }

        let dynamic_routes = entries.iter().filter(|e| e.is_dynamic()).count();

        Self {
            generated_at,
            dialect,
            total_routes: entries.len(),
            static_routes: entries.len() - dynamic_routes,
            dynamic_routes,
            catch_all_routes: entries.iter().filter(|e| e.has_catch_all()).count(),
            routes_with_query: entries
                .iter()
                .filter(|e| !e.query_fields().is_empty())
                .count(),
            max_depth: depth_histogram.keys().next_back().copied().unwrap_or(0),
            depth_histogram,
            param_frequency,
        }
    }

    /// Returns the most used parameter name, ties broken alphabetically.
    #[must_use]
    pub fn most_common_param(&self) -> Option<(&str, usize)> {
        self.param_frequency
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, count)| (name.as_str(), *count))
    }

    /// Serializes the analytics as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SerializationError {
            message: "failed to serialize route analytics".to_string(),
            source: Some(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use route_core::{ParamSpec, QueryParamSpec, QueryType};
    use std::path::PathBuf;

    fn entry(route_path: &str, params: Vec<ParamSpec>) -> RouteEntry {
        RouteEntry {
            source_path: PathBuf::from(format!("pages{route_path}.tsx")),
            route_path: route_path.to_string(),
            params,
            query: None,
        }
    }

    fn sample() -> Vec<RouteEntry> {
        let mut search = entry("/search", vec![]);
        search.query = Some(vec![QueryParamSpec::new("q", QueryType::String, false)]);
        vec![
            entry("/", vec![]),
            entry("/about", vec![]),
            entry("/blog/:slug", vec![ParamSpec::scalar("slug")]),
            entry("/docs/:slug*", vec![ParamSpec::catch_all("slug")]),
            entry(
                "/shop/:category/:id",
                vec![ParamSpec::scalar("category"), ParamSpec::scalar("id")],
            ),
            search,
        ]
    }

    #[test]
    fn test_counts() {
        let analytics = RouteAnalytics::from_entries(&sample(), Dialect::NextPages);

        assert_eq!(analytics.total_routes, 6);
        assert_eq!(analytics.static_routes, 3);
        assert_eq!(analytics.dynamic_routes, 3);
        assert_eq!(analytics.catch_all_routes, 1);
        assert_eq!(analytics.routes_with_query, 1);
    }

    #[test]
    fn test_depth_histogram() {
        let analytics = RouteAnalytics::from_entries(&sample(), Dialect::NextPages);

        assert_eq!(analytics.depth_histogram[&0], 1);
        assert_eq!(analytics.depth_histogram[&1], 2);
        assert_eq!(analytics.depth_histogram[&2], 2);
        assert_eq!(analytics.depth_histogram[&3], 1);
        assert_eq!(analytics.max_depth, 3);
    }

    #[test]
    fn test_param_frequency() {
        let analytics = RouteAnalytics::from_entries(&sample(), Dialect::NextPages);

        assert_eq!(analytics.param_frequency["slug"], 2);
        assert_eq!(analytics.param_frequency["id"], 1);
        assert_eq!(analytics.most_common_param(), Some(("slug", 2)));
    }

    #[test]
    fn test_empty_route_set() {
        let analytics = RouteAnalytics::from_entries(&[], Dialect::Remix);

        assert_eq!(analytics.total_routes, 0);
        assert_eq!(analytics.max_depth, 0);
        assert!(analytics.depth_histogram.is_empty());
        assert!(analytics.most_common_param().is_none());
    }

    #[test]
    fn test_json_shape() {
        let at = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        let analytics = RouteAnalytics::at(&sample(), Dialect::NextApp, at);
        let json: serde_json::Value = serde_json::from_str(&analytics.to_json().unwrap()).unwrap();

        assert_eq!(json["generatedAt"], "2025-01-15T10:30:00Z");
        assert_eq!(json["dialect"], "next-app");
        assert_eq!(json["totalRoutes"], 6);
        assert_eq!(json["depthHistogram"]["2"], 2);
        assert_eq!(json["paramFrequency"]["slug"], 2);
    }
}
