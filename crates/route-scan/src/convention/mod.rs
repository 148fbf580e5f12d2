//! File-path naming conventions.
//!
//! Each [`Dialect`] maps to one [`RouteConvention`] strategy that turns a
//! relative, extension-less file path into a path with normalized
//! dynamic markers:
//!
//! | Marker    | Meaning                          |
//! |-----------|----------------------------------|
//! | `:name`   | required scalar segment          |
//! | `:name?`  | optional scalar segment          |
//! | `:name*`  | optional catch-all list segments |
//!
//! [`rewrite`] wraps a strategy with the dialect-independent steps
//! (relativization, extension stripping, `index` collapsing and slash
//! normalization). It is pure: the same inputs always produce the same
//! canonical path, which keeps generated names stable across runs.
//!
//! Parameter names must consist of ASCII letters, digits, `_` and `$`.
//! Anything else (`[post-id]`) would make the marker end early, so such
//! files are rejected with [`Error::InvalidParamName`].
//!
//! # Examples
//!
//! ```
//! use route_core::Dialect;
//! use route_scan::rewrite;
//! use std::path::Path;
//!
//! let root = Path::new("/site/pages");
//! let path = rewrite(Path::new("/site/pages/blog/[slug].tsx"), root, Dialect::NextPages)?;
//! assert_eq!(path, "/blog/:slug");
//!
//! let path = rewrite(Path::new("/site/pages/index.tsx"), root, Dialect::Remix)?;
//! assert_eq!(path, "/");
//!
//! let err = rewrite(Path::new("/site/pages/[post-id].tsx"), root, Dialect::NextPages);
//! assert!(err.unwrap_err().is_invalid_param_name());
//! # Ok::<(), route_core::Error>(())
//! ```

mod next_app;
mod next_pages;
mod nuxt;
mod remix;
mod tanstack;

pub use next_app::NextAppConvention;
pub use next_pages::NextPagesConvention;
pub use nuxt::NuxtConvention;
pub use remix::RemixConvention;
pub use tanstack::TanStackConvention;

use regex::Regex;
use route_core::{Dialect, Error, ROUTE_EXTENSIONS, Result, RouteRole, is_param_char};
use std::path::Path;

/// A routing dialect's rewriting strategy.
///
/// Implementations only perform the dialect-specific token substitution;
/// [`rewrite`] handles everything shared.
pub trait RouteConvention: Send + Sync + std::fmt::Debug {
    /// Rewrites a relative, extension-less path (using `/` separators)
    /// into marker form. The result does not need a leading slash and
    /// may still end in `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParamName`] if a dynamic segment name is
    /// not made of parameter characters.
    fn rewrite_relative(&self, relative: &str) -> Result<String>;

    /// Returns `true` if the file defines a navigable path.
    fn is_routable(&self, _relative: &str) -> bool {
        true
    }

    /// Returns the role tag for App-Router-style dialects.
    fn role(&self, _relative: &str) -> Option<RouteRole> {
        None
    }
}

static NEXT_PAGES: NextPagesConvention = NextPagesConvention;
static NEXT_APP: NextAppConvention = NextAppConvention;
static REMIX: RemixConvention = RemixConvention;
static NUXT: NuxtConvention = NuxtConvention;
static TANSTACK: TanStackConvention = TanStackConvention;

/// Returns the strategy for a dialect.
#[must_use]
pub fn convention_for(dialect: Dialect) -> &'static dyn RouteConvention {
    match dialect {
        Dialect::NextPages => &NEXT_PAGES,
        Dialect::NextApp => &NEXT_APP,
        Dialect::Remix => &REMIX,
        Dialect::Nuxt => &NUXT,
        Dialect::TanStack => &TANSTACK,
    }
}

/// Maps a route file to its canonical route path.
///
/// Steps, in order:
/// 1. make `file` relative to `root` and strip the route extension
/// 2. apply the dialect strategy
/// 3. collapse a sole `index` to the root and drop a trailing `/index`
/// 4. drop empty segments and prefix exactly one `/`
///
/// # Errors
///
/// Returns [`Error::InvalidParamName`] if the file declares a dynamic
/// segment whose name cannot be expressed as a marker.
pub fn rewrite(file: &Path, root: &Path, dialect: Dialect) -> Result<String> {
    let relative = relative_route_path(file, root);
    let rewritten = convention_for(dialect).rewrite_relative(&relative)?;
    Ok(normalize(collapse_index(&rewritten)))
}

/// Returns `file` relative to `root` with `/` separators and the route
/// extension removed.
///
/// Falls back to the full path when `file` is not under `root`.
#[must_use]
pub fn relative_route_path(file: &Path, root: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .filter(|c| c != "/" && c != "\\")
        .collect::<Vec<_>>()
        .join("/");
    strip_route_extension(&relative).to_string()
}

/// Removes a trailing recognized extension.
fn strip_route_extension(path: &str) -> &str {
    let basename_start = path.rfind('/').map_or(0, |i| i + 1);
    match path.rfind('.') {
        Some(dot) if dot > basename_start => {
            let ext = &path[dot + 1..];
            if ROUTE_EXTENSIONS.contains(&ext) {
                &path[..dot]
            } else {
                path
            }
        }
        _ => path,
    }
}

fn collapse_index(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed == "index" || trimmed == "/index" {
        ""
    } else {
        trimmed.strip_suffix("/index").unwrap_or(trimmed)
    }
}

fn normalize(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Builds a `:name` marker with `suffix` (`""`, `"?"` or `"*"`).
pub(crate) fn param_marker(relative: &str, name: &str, suffix: &str) -> Result<String> {
    if !name.is_empty() && name.chars().all(is_param_char) {
        Ok(format!(":{name}{suffix}"))
    } else {
        Err(Error::InvalidParamName {
            path: relative.to_string(),
            name: name.to_string(),
        })
    }
}

/// Replaces every match of `pattern` with a marker built from capture 1.
pub(crate) fn replace_markers(
    pattern: &Regex,
    relative: &str,
    path: &str,
    suffix: &str,
) -> Result<String> {
    let mut out = String::with_capacity(path.len());
    let mut last = 0;

    for caps in pattern.captures_iter(path) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&path[last..whole.start()]);
        out.push_str(&param_marker(relative, name.as_str(), suffix)?);
        last = whole.end();
    }

    out.push_str(&path[last..]);
    Ok(out)
}

/// Returns the last `/`-separated segment of a relative path.
pub(crate) fn basename(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}

/// Splits a path on `/` and then each segment on `.`, keeping text inside
/// `[...]` together so escaped dots survive.
pub(crate) fn flat_route_tokens(relative: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        let mut current = String::new();
        let mut bracket_depth = 0usize;

        for c in segment.chars() {
            match c {
                '[' => {
                    bracket_depth += 1;
                    current.push(c);
                }
                ']' => {
                    bracket_depth = bracket_depth.saturating_sub(1);
                    current.push(c);
                }
                '.' if bracket_depth == 0 => tokens.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        tokens.push(current);
    }

    tokens.retain(|t| !t.is_empty());
    tokens
}
