//! `typed-routes` CLI library.
//!
//! Command implementations and output formatters, exposed as a library so
//! they can be tested without spawning the binary.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]

pub mod commands;
pub mod formatters;

pub use commands::common::{GenerateArgs, exit_code_for, load_config};
