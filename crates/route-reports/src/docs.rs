//! Markdown route documentation.
//!
//! Routes are grouped by their first path segment, one table per group.

use route_core::{ParamKind, RouteEntry};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Renders a markdown overview of `entries`.
///
/// # Examples
///
/// ```
/// use route_core::{ParamSpec, RouteEntry};
/// use route_reports::docs::render_markdown;
///
/// let entries = vec![RouteEntry {
///     source_path: "pages/blog/[slug].tsx".into(),
///     route_path: "/blog/:slug".to_string(),
///     params: vec![ParamSpec::scalar("slug")],
///     query: None,
/// }];
///
/// let markdown = render_markdown(&entries);
/// assert!(markdown.contains("## /blog"));
/// assert!(markdown.contains("| `blog.slug` | `/blog/:slug` | `slug` | - |"));
/// ```
#[must_use]
pub fn render_markdown(entries: &[RouteEntry]) -> String {
    let mut groups: BTreeMap<&str, Vec<&RouteEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.first_segment()).or_default().push(entry);
    }

    let mut out = String::from("# Routes\n\n");
    let _ = writeln!(
        out,
        "{} routes in {} groups.",
        entries.len(),
        groups.len()
    );

    for (segment, routes) in groups {
        let heading = if segment == "/" {
            "/".to_string()
        } else {
            format!("/{segment}")
        };
        let _ = write!(
            out,
            "\n## {heading}\n\n| Name | Path | Params | Query |\n|------|------|--------|-------|\n"
        );
        for entry in routes {
            let _ = writeln!(
                out,
                "| `{}` | `{}` | {} | {} |",
                entry.dotted_name(),
                entry.route_path,
                params_cell(entry),
                query_cell(entry)
            );
        }
    }

    out
}

fn params_cell(entry: &RouteEntry) -> String {
    if entry.params.is_empty() {
        return "-".to_string();
    }
    entry
        .params
        .iter()
        .map(|p| {
            let list = if p.kind == ParamKind::CatchAllList { "[]" } else { "" };
            let optional = if p.optional { "?" } else { "" };
            format!("`{}{list}{optional}`", p.name)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn query_cell(entry: &RouteEntry) -> String {
    let fields = entry.query_fields();
    if fields.is_empty() {
        return "-".to_string();
    }
    fields
        .iter()
        .map(|f| {
            let optional = if f.optional { "?" } else { "" };
            format!("`{}{optional}: {}`", f.name, f.ty.as_ts().replace('|', "\\|"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::{ParamSpec, QueryParamSpec, QueryType};
    use std::path::PathBuf;

    fn entry(route_path: &str, params: Vec<ParamSpec>) -> RouteEntry {
        RouteEntry {
            source_path: PathBuf::from("x.tsx"),
            route_path: route_path.to_string(),
            params,
            query: None,
        }
    }

    #[test]
    fn test_groups_sorted_by_first_segment() {
        let markdown = render_markdown(&[
            entry("/docs/:slug*", vec![ParamSpec::catch_all("slug")]),
            entry("/", vec![]),
            entry("/blog", vec![]),
            entry("/blog/:slug", vec![ParamSpec::scalar("slug")]),
        ]);

        assert!(markdown.starts_with("# Routes\n\n4 routes in 3 groups.\n"));
        let root = markdown.find("\n## /\n").unwrap();
        let blog = markdown.find("\n## /blog\n").unwrap();
        let docs = markdown.find("\n## /docs\n").unwrap();
        assert!(root < blog && blog < docs);
        assert!(markdown.contains("| `home` | `/` | - | - |"));
        assert!(markdown.contains("| `docs.slug` | `/docs/:slug*` | `slug[]?` | - |"));
    }

    #[test]
    fn test_query_cell_escapes_pipes() {
        let mut search = entry("/search", vec![]);
        search.query = Some(vec![
            QueryParamSpec::new("q", QueryType::String, false),
            QueryParamSpec::new("sort", QueryType::from_text("'asc' | 'desc'"), true),
        ]);

        let markdown = render_markdown(&[search]);
        assert!(markdown.contains("| `search` | `/search` | - | `q: string`, `sort?: 'asc' \\| 'desc'` |"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(render_markdown(&[]), "# Routes\n\n0 routes in 0 groups.\n");
    }
}
