//! Canonical route paths split into literal text and parameter slots.
//!
//! Both the TypeScript emitter and the reference evaluator walk the same
//! [`PathTemplate`], so what the generated code returns and what the
//! evaluator predicts cannot drift apart.

use regex::Regex;
use route_core::ParamKind;
use std::sync::LazyLock;

static MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z0-9_$]+)([*?])?").expect("valid regex"));
static OPTIONAL_SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([A-Za-z0-9_$]+)\?$").expect("valid regex"));

/// One piece of a route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPart {
    /// Literal text, including `/` separators
    Literal(String),
    /// A parameter embedded in a segment
    Param {
        /// Parameter name
        name: String,
        /// Scalar or catch-all
        kind: ParamKind,
        /// Whether the value may be absent
        optional: bool,
    },
    /// A whole `/:name?` segment, separator included, that disappears
    /// when the value is absent
    OptionalSegment(String),
}

/// A parsed canonical route path.
///
/// # Examples
///
/// ```
/// use route_codegen::path_template::{PathPart, PathTemplate};
///
/// let template = PathTemplate::parse("/blog/:slug");
/// assert_eq!(template.parts()[0], PathPart::Literal("/blog/".to_string()));
/// assert!(!template.is_static());
/// assert_eq!(template.type_literal(false), "`/blog/${string}`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    parts: Vec<PathPart>,
}

impl PathTemplate {
    /// Parses a canonical route path.
    #[must_use]
    pub fn parse(route_path: &str) -> Self {
        let mut parts = Vec::new();

        for segment in route_path.split('/').filter(|s| !s.is_empty()) {
            if let Some(caps) = OPTIONAL_SEGMENT_REGEX.captures(segment) {
                parts.push(PathPart::OptionalSegment(caps[1].to_string()));
                continue;
            }

            push_literal(&mut parts, "/");
            let mut last = 0;
            for caps in MARKER_REGEX.captures_iter(segment) {
                let Some(marker) = caps.get(0) else { continue };
                push_literal(&mut parts, &segment[last..marker.start()]);
                let (kind, optional) = match caps.get(2).map(|m| m.as_str()) {
                    Some("*") => (ParamKind::CatchAllList, true),
                    Some("?") => (ParamKind::Scalar, true),
                    _ => (ParamKind::Scalar, false),
                };
                parts.push(PathPart::Param {
                    name: caps[1].to_string(),
                    kind,
                    optional,
                });
                last = marker.end();
            }
            push_literal(&mut parts, &segment[last..]);
        }

        if parts.is_empty() {
            parts.push(PathPart::Literal("/".to_string()));
        }

        Self { parts }
    }

    /// Returns the parts in path order.
    #[must_use]
    pub fn parts(&self) -> &[PathPart] {
        &self.parts
    }

    /// Returns `true` if the path has no parameter slots.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.parts.iter().all(|p| matches!(p, PathPart::Literal(_)))
    }

    /// Returns `true` if every part can render as empty text, in which
    /// case the builder falls back to `/`.
    #[must_use]
    pub fn may_render_empty(&self) -> bool {
        self.parts
            .iter()
            .all(|p| matches!(p, PathPart::OptionalSegment(_)))
    }

    /// Renders the TypeScript type of the strings this path produces.
    ///
    /// Static paths become string literal types; anything with a slot
    /// becomes a template literal type with `${string}` placeholders.
    #[must_use]
    pub fn type_literal(&self, has_query: bool) -> String {
        if self.is_static() && !has_query {
            let text: String = self
                .parts
                .iter()
                .filter_map(|p| match p {
                    PathPart::Literal(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            return crate::typescript::string_literal(&text);
        }

        let mut body = String::new();
        for part in &self.parts {
            match part {
                PathPart::Literal(text) => {
                    body.push_str(&crate::typescript::escape_template_text(text));
                }
                PathPart::Param { .. } | PathPart::OptionalSegment(_) => placeholder(&mut body),
            }
        }
        if has_query {
            placeholder(&mut body);
        }

        format!("`{body}`")
    }
}

fn placeholder(body: &mut String) {
    if !body.ends_with("${string}") {
        body.push_str("${string}");
    }
}

fn push_literal(parts: &mut Vec<PathPart>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(PathPart::Literal(last)) = parts.last_mut() {
        last.push_str(text);
    } else {
        parts.push(PathPart::Literal(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(text: &str) -> PathPart {
        PathPart::Literal(text.to_string())
    }

    #[test]
    fn test_root_is_single_slash() {
        let template = PathTemplate::parse("/");
        assert_eq!(template.parts(), &[literal("/")]);
        assert!(template.is_static());
        assert_eq!(template.type_literal(false), "\"/\"");
    }

    #[test]
    fn test_static_literals_merge() {
        let template = PathTemplate::parse("/docs/getting-started");
        assert_eq!(template.parts(), &[literal("/docs/getting-started")]);
        assert_eq!(template.type_literal(false), "\"/docs/getting-started\"");
    }

    #[test]
    fn test_catch_all_slot() {
        let template = PathTemplate::parse("/docs/:slug*");
        assert_eq!(
            template.parts(),
            &[
                literal("/docs/"),
                PathPart::Param {
                    name: "slug".to_string(),
                    kind: ParamKind::CatchAllList,
                    optional: true,
                },
            ]
        );
        assert_eq!(template.type_literal(false), "`/docs/${string}`");
    }

    #[test]
    fn test_optional_segment() {
        let template = PathTemplate::parse("/:lang?/about");
        assert_eq!(
            template.parts(),
            &[PathPart::OptionalSegment("lang".to_string()), literal("/about")]
        );
        assert!(!template.may_render_empty());
        assert_eq!(template.type_literal(false), "`${string}/about`");
        assert!(PathTemplate::parse("/:lang?").may_render_empty());
    }

    #[test]
    fn test_inline_markers() {
        let template = PathTemplate::parse("/files/:id.json");
        assert_eq!(template.parts().len(), 3);
        assert_eq!(template.parts()[2], literal(".json"));
        assert_eq!(template.type_literal(true), "`/files/${string}.json${string}`");
    }

    #[test]
    fn test_adjacent_placeholders_collapse() {
        let template = PathTemplate::parse("/shop/:category/:item");
        assert_eq!(template.type_literal(false), "`/shop/${string}/${string}`");
        assert_eq!(
            PathTemplate::parse("/docs/:slug*").type_literal(true),
            "`/docs/${string}`"
        );
    }

    #[test]
    fn test_static_with_query_uses_template_type() {
        assert_eq!(
            PathTemplate::parse("/search").type_literal(true),
            "`/search${string}`"
        );
    }
}
