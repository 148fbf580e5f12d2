//! Core types, configuration, and errors for typed route generation.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - The route IR (`RouteFile`, `ParamSpec`, `QueryParamSpec`, `RouteEntry`)
//! - The closed set of routing dialects (`Dialect`)
//! - Error hierarchy with contextual information
//! - Generator configuration and CLI primitives

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;

pub use config::{ConfigOverrides, DEFAULT_CONFIG_FILE, DEFAULT_EXCLUDES, GeneratorConfig};
pub use error::{Error, Result};
pub use types::{
    Dialect, HOME_ROUTE_NAME, ParamKind, ParamSpec, QueryParamSpec, QueryType, ROUTE_EXTENSIONS,
    RouteEntry, RouteFile, RouteRole, is_param_char,
};
