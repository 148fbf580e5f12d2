//! Path builder rendering for a single route.
//!
//! A builder is an arrow function whose signature follows the route's
//! inputs:
//!
//! | Route                         | Builder                                      |
//! |-------------------------------|----------------------------------------------|
//! | `/about`                      | `() => "/about"`                             |
//! | `/blog/:slug`                 | `(params: { slug: string }) => ...`          |
//! | `/docs/:slug*`                | `(params?: { slug?: string[] }) => ...`      |
//! | `/search` + `QueryParams`     | `(query: { q: string; ... }) => ...`         |
//! | `/shop/:id` + `QueryParams`   | `(params: { id: string }, query?: ...) => ...` |
//!
//! Query strings are assembled with the `scalarPair`, `listPairs` and
//! `buildQuery` helpers emitted once at the top of the module.

use crate::path_template::{PathPart, PathTemplate};
use crate::typescript::{escape_template_text, object_key, property_access, string_literal};
use route_core::{ParamKind, ParamSpec, QueryParamSpec, RouteEntry};

/// Identifier of the path parameter record argument.
pub const PARAMS_ARG: &str = "params";

/// Identifier of the query record argument.
pub const QUERY_ARG: &str = "query";

/// One declared argument of a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Argument identifier
    pub name: &'static str,
    /// Full declaration, e.g. `params?: { slug?: string[] }`
    pub declaration: String,
}

/// Returns the builder's arguments in call order.
///
/// The params record is optional when every param is optional; the query
/// record likewise. An optional params record followed by a required
/// query record is declared `T | undefined`, since TypeScript does not
/// allow a required argument after an optional one.
#[must_use]
pub fn arguments(entry: &RouteEntry) -> Vec<Argument> {
    let fields = entry.query_fields();
    let query_required = fields.iter().any(|f| !f.optional);
    let mut args = Vec::with_capacity(2);

    if !entry.params.is_empty() {
        let ty = params_type(&entry.params);
        let declaration = if !params_optional(entry) {
            format!("{PARAMS_ARG}: {ty}")
        } else if query_required {
            format!("{PARAMS_ARG}: {ty} | undefined")
        } else {
            format!("{PARAMS_ARG}?: {ty}")
        };
        args.push(Argument {
            name: PARAMS_ARG,
            declaration,
        });
    }

    if !fields.is_empty() {
        let ty = query_type(fields);
        let declaration = if query_required {
            format!("{QUERY_ARG}: {ty}")
        } else {
            format!("{QUERY_ARG}?: {ty}")
        };
        args.push(Argument {
            name: QUERY_ARG,
            declaration,
        });
    }

    args
}

/// Renders the params record type, e.g. `{ slug: string; rest?: string[] }`.
#[must_use]
pub fn params_type(params: &[ParamSpec]) -> String {
    let fields: Vec<String> = params
        .iter()
        .map(|param| {
            let ty = match param.kind {
                ParamKind::Scalar => "string",
                ParamKind::CatchAllList => "string[]",
            };
            let marker = if param.optional { "?" } else { "" };
            format!("{}{marker}: {ty}", object_key(&param.name))
        })
        .collect();
    format!("{{ {} }}", fields.join("; "))
}

/// Renders the query record type from the declared fields.
#[must_use]
pub fn query_type(fields: &[QueryParamSpec]) -> String {
    let fields: Vec<String> = fields
        .iter()
        .map(|field| {
            let marker = if field.optional { "?" } else { "" };
            format!("{}{marker}: {}", object_key(&field.name), field.ty.as_ts())
        })
        .collect();
    format!("{{ {} }}", fields.join("; "))
}

/// Renders the complete builder arrow function for `entry`.
///
/// # Examples
///
/// ```
/// use route_codegen::builder::render_builder;
/// use route_core::{ParamSpec, RouteEntry};
///
/// let entry = RouteEntry {
///     source_path: "pages/blog/[slug].tsx".into(),
///     route_path: "/blog/:slug".to_string(),
///     params: vec![ParamSpec::scalar("slug")],
///     query: None,
/// };
///
/// assert_eq!(
///     render_builder(&entry, false),
///     "(params: { slug: string }) => `/blog/${params.slug}`"
/// );
/// ```
#[must_use]
pub fn render_builder(entry: &RouteEntry, encode_path_params: bool) -> String {
    let template = PathTemplate::parse(&entry.route_path);
    let args = arguments(entry);

    if args.is_empty() && template.is_static() {
        let literal: String = template
            .parts()
            .iter()
            .filter_map(|part| match part {
                PathPart::Literal(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        return format!("() => {}", string_literal(&literal));
    }

    let params_optional = params_optional(entry);
    let mut body = render_path(&template, params_optional, encode_path_params);
    if template.may_render_empty() {
        body = format!("${{`{body}` || \"/\"}}");
    }

    let fields = entry.query_fields();
    if !fields.is_empty() {
        let query_optional = fields.iter().all(|f| f.optional);
        body.push_str(&render_query(fields, query_optional));
    }

    let declarations: Vec<&str> = args.iter().map(|a| a.declaration.as_str()).collect();
    format!("({}) => `{body}`", declarations.join(", "))
}

fn params_optional(entry: &RouteEntry) -> bool {
    entry.params.iter().all(|p| p.optional)
}

/// Renders the path portion of the template literal (without backticks).
fn render_path(template: &PathTemplate, params_optional: bool, encode: bool) -> String {
    let mut out = String::new();

    for part in template.parts() {
        match part {
            PathPart::Literal(text) => out.push_str(&escape_template_text(text)),
            PathPart::Param {
                name,
                kind: ParamKind::Scalar,
                optional: false,
            } => {
                let value = property_access(PARAMS_ARG, name, params_optional);
                out.push_str(&format!("${{{}}}", encoded(&value, encode)));
            }
            PathPart::Param {
                name,
                kind: ParamKind::Scalar,
                optional: true,
            } => {
                let access = property_access(PARAMS_ARG, name, params_optional);
                if encode {
                    let value = property_access(PARAMS_ARG, name, false);
                    out.push_str(&format!(
                        "${{{access} === undefined ? \"\" : encodeURIComponent({value})}}"
                    ));
                } else {
                    out.push_str(&format!("${{{access} ?? \"\"}}"));
                }
            }
            PathPart::Param {
                name,
                kind: ParamKind::CatchAllList,
                ..
            } => {
                let access = property_access(PARAMS_ARG, name, params_optional);
                let mapped = if encode { "?.map(encodeURIComponent)" } else { "" };
                let join = if encode { ".join(\"/\")" } else { "?.join(\"/\")" };
                out.push_str(&format!("${{{access}{mapped}{join} ?? \"\"}}"));
            }
            PathPart::OptionalSegment(name) => {
                let access = property_access(PARAMS_ARG, name, params_optional);
                let value = property_access(PARAMS_ARG, name, false);
                out.push_str(&format!(
                    "${{{access} === undefined ? \"\" : `/${{{}}}`}}",
                    encoded(&value, encode)
                ));
            }
        }
    }

    out
}

fn encoded(value: &str, encode: bool) -> String {
    if encode {
        format!("encodeURIComponent({value})")
    } else {
        value.to_string()
    }
}

fn render_query(fields: &[QueryParamSpec], query_optional: bool) -> String {
    let pairs: Vec<String> = fields
        .iter()
        .map(|field| {
            let value = property_access(QUERY_ARG, &field.name, query_optional);
            let helper = if field.ty.is_list() {
                "listPairs"
            } else {
                "scalarPair"
            };
            format!("...{helper}({}, {value})", string_literal(&field.name))
        })
        .collect();
    format!("${{buildQuery([{}])}}", pairs.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::QueryType;

    fn entry(route_path: &str, params: Vec<ParamSpec>, query: Option<Vec<QueryParamSpec>>) -> RouteEntry {
        RouteEntry {
            source_path: "pages/x.tsx".into(),
            route_path: route_path.to_string(),
            params,
            query,
        }
    }

    #[test]
    fn test_static_builder() {
        assert_eq!(render_builder(&entry("/", vec![], None), false), "() => \"/\"");
        assert_eq!(
            render_builder(&entry("/about", vec![], None), false),
            "() => \"/about\""
        );
    }

    #[test]
    fn test_catch_all_builder_is_optional() {
        let builder = render_builder(
            &entry("/docs/:slug*", vec![ParamSpec::catch_all("slug")], None),
            false,
        );
        assert_eq!(
            builder,
            "(params?: { slug?: string[] }) => `/docs/${params?.slug?.join(\"/\") ?? \"\"}`"
        );
    }

    #[test]
    fn test_encoded_params() {
        let builder = render_builder(
            &entry("/blog/:slug", vec![ParamSpec::scalar("slug")], None),
            true,
        );
        assert_eq!(
            builder,
            "(params: { slug: string }) => `/blog/${encodeURIComponent(params.slug)}`"
        );

        let builder = render_builder(
            &entry("/docs/:slug*", vec![ParamSpec::catch_all("slug")], None),
            true,
        );
        assert!(builder.contains("params?.slug?.map(encodeURIComponent).join(\"/\") ?? \"\""));
    }

    #[test]
    fn test_optional_segment_builder() {
        let builder = render_builder(
            &entry("/:lang?/about", vec![ParamSpec::optional_scalar("lang")], None),
            false,
        );
        assert_eq!(
            builder,
            "(params?: { lang?: string }) => `${params?.lang === undefined ? \"\" : `/${params.lang}`}/about`"
        );
    }

    #[test]
    fn test_optional_only_path_falls_back_to_root() {
        let builder = render_builder(
            &entry("/:lang?", vec![ParamSpec::optional_scalar("lang")], None),
            false,
        );
        assert!(builder.contains("|| \"/\""));
    }

    #[test]
    fn test_query_only_builder() {
        let query = vec![
            QueryParamSpec::new("q", QueryType::String, false),
            QueryParamSpec::new("page", QueryType::Number, true),
        ];
        let builder = render_builder(&entry("/search", vec![], Some(query)), false);
        assert_eq!(
            builder,
            "(query: { q: string; page?: number }) => `/search${buildQuery([...scalarPair(\"q\", query.q), ...scalarPair(\"page\", query.page)])}`"
        );
    }

    #[test]
    fn test_optional_query_uses_optional_access() {
        let query = vec![QueryParamSpec::new("tags", QueryType::StringList, true)];
        let builder = render_builder(&entry("/posts", vec![], Some(query)), false);
        assert!(builder.starts_with("(query?: { tags?: string[] })"));
        assert!(builder.contains("...listPairs(\"tags\", query?.tags)"));
    }

    #[test]
    fn test_optional_params_before_required_query() {
        let query = vec![QueryParamSpec::new("q", QueryType::String, false)];
        let args = arguments(&entry(
            "/docs/:slug*",
            vec![ParamSpec::catch_all("slug")],
            Some(query),
        ));
        assert_eq!(args[0].declaration, "params: { slug?: string[] } | undefined");
        assert_eq!(args[1].declaration, "query: { q: string }");
    }

    #[test]
    fn test_required_params_with_optional_query() {
        let query = vec![QueryParamSpec::new("tab", QueryType::String, true)];
        let args = arguments(&entry("/users/:id", vec![ParamSpec::scalar("id")], Some(query)));
        let names: Vec<_> = args.iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["params", "query"]);
        assert_eq!(args[1].declaration, "query?: { tab?: string }");
    }

    #[test]
    fn test_non_identifier_names_are_quoted() {
        let query = vec![QueryParamSpec::new("sort-by", QueryType::String, true)];
        let builder = render_builder(&entry("/list", vec![], Some(query)), false);
        assert!(builder.contains("{ \"sort-by\"?: string }"));
        assert!(builder.contains("query?.[\"sort-by\"]"));
    }

    #[test]
    fn test_empty_query_list_is_static() {
        assert_eq!(
            render_builder(&entry("/about", vec![], Some(vec![])), false),
            "() => \"/about\""
        );
    }
}
