//! Command implementations for the `typed-routes` CLI.
//!
//! Each module exposes an async `run` that takes already-merged
//! configuration, does its work, prints a summary in the requested
//! output format, and returns an exit code.

pub mod analyze;
pub mod audit;
pub mod common;
pub mod completions;
pub mod docs;
pub mod generate;
pub mod init;
pub mod perf;
pub mod watch;
