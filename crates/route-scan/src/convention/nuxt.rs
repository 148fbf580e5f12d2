//! Nuxt `pages/` convention.

use super::{RouteConvention, replace_markers};
use regex::Regex;
use route_core::Result;
use std::sync::LazyLock;

static OPTIONAL_CATCH_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[\.\.\.([^\]]+)\]\]").expect("valid regex"));
static CATCH_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\.\.\.([^\]]+)\]").expect("valid regex"));
static OPTIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid regex"));
static DYNAMIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("valid regex"));

/// `[id]` → `:id`, `[[id]]` → `:id?`, `[...slug]` and `[[...slug]]` →
/// `:slug*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NuxtConvention;

impl RouteConvention for NuxtConvention {
    fn rewrite_relative(&self, relative: &str) -> Result<String> {
        let path = replace_markers(&OPTIONAL_CATCH_ALL, relative, relative, "*")?;
        let path = replace_markers(&CATCH_ALL, relative, &path, "*")?;
        let path = replace_markers(&OPTIONAL, relative, &path, "?")?;
        replace_markers(&DYNAMIC, relative, &path, "")
    }
}
