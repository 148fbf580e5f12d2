//! TypeScript path-builder generation for discovered routes.
//!
//! Renders a [`RouteTable`](route_scan::RouteTable) into a module that
//! exposes one typed builder per route, nested the way the route files
//! are nested on disk:
//!
//! ```text
//! export const routes = {
//!   home: () => "/",
//!   blog: {
//!     slug: (params: { slug: string }) => `/blog/${params.slug}`,
//!   },
//! } as const;
//! ```
//!
//! [`evaluate`](evaluate::evaluate) reproduces what a generated builder
//! returns, so the builder semantics are testable without a JavaScript
//! runtime.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod evaluate;
pub mod generator;
pub mod path_template;
pub mod template_engine;
pub mod types;
pub mod typescript;

pub use generator::{RouteCodeGenerator, emit};
pub use types::{GeneratedCode, GeneratedFile};
