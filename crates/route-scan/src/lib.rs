//! Route discovery for file-based routers.
//!
//! Turns a directory of route files into a [`RouteTable`]:
//!
//! 1. [`RouteWalker`] lists candidate files, pruning excluded paths
//! 2. [`rewrite`] maps each file to a canonical route path for its [`Dialect`]
//! 3. [`extract_params`] and [`extract_query`] derive the route's inputs
//! 4. [`build_route_table`] files entries into the namespace tree
//!
//! [`RouteScanner`] runs all four steps from a [`GeneratorConfig`].
//!
//! # Examples
//!
//! ```no_run
//! use route_core::GeneratorConfig;
//! use route_scan::scan_routes;
//!
//! let table = scan_routes(&GeneratorConfig::default())?;
//! println!("{} routes", table.len());
//! # Ok::<(), route_core::Error>(())
//! ```
//!
//! [`Dialect`]: route_core::Dialect
//! [`GeneratorConfig`]: route_core::GeneratorConfig

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod convention;
pub mod params;
pub mod query;
pub mod scanner;
pub mod table;
pub mod walker;

pub use convention::{RouteConvention, convention_for, relative_route_path, rewrite};
pub use params::extract_params;
pub use query::{QueryContract, extract_query, extract_query_from_file};
pub use scanner::{RouteScanner, scan_routes};
pub use table::{
    INDEX_KEY, NameCollision, NamedRoute, NamespaceNode, RouteNamespace, RouteTable,
    build_route_table,
};
pub use walker::{ExcludeSet, RouteWalker, walk};
