//! Next.js `pages/` directory convention.

use super::{RouteConvention, basename, replace_markers};
use regex::Regex;
use route_core::Result;
use std::sync::LazyLock;

static OPTIONAL_CATCH_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[\.\.\.([^\]]+)\]\]").expect("valid regex"));
static CATCH_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\.\.\.([^\]]+)\]").expect("valid regex"));
static DYNAMIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("valid regex"));

/// `[id]` → `:id`, `[...slug]` and `[[...slug]]` → `:slug*`.
///
/// Files whose basename starts with `_` (`_app`, `_document`, `_error`)
/// are framework hooks, not routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextPagesConvention;

impl RouteConvention for NextPagesConvention {
    fn rewrite_relative(&self, relative: &str) -> Result<String> {
        substitute_brackets(relative, relative)
    }

    fn is_routable(&self, relative: &str) -> bool {
        !basename(relative).starts_with('_')
    }
}

/// Applies the Next.js bracket rules, most specific first.
///
/// `relative` is the original file path, used only in errors.
pub(crate) fn substitute_brackets(relative: &str, path: &str) -> Result<String> {
    let path = replace_markers(&OPTIONAL_CATCH_ALL, relative, path, "*")?;
    let path = replace_markers(&CATCH_ALL, relative, &path, "*")?;
    replace_markers(&DYNAMIC, relative, &path, "")
}
