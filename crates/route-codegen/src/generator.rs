//! Route module generator.
//!
//! Renders the route table into `routes.ts` and, when enabled, the
//! sibling `routes.test.ts` suite and `routes.api.ts` fetch helpers.
//!
//! # Examples
//!
//! ```
//! use route_codegen::RouteCodeGenerator;
//! use route_core::{GeneratorConfig, ParamSpec, RouteEntry};
//! use route_scan::build_route_table;
//!
//! let table = build_route_table(vec![RouteEntry {
//!     source_path: "pages/blog/[slug].tsx".into(),
//!     route_path: "/blog/:slug".to_string(),
//!     params: vec![ParamSpec::scalar("slug")],
//!     query: None,
//! }]);
//!
//! let generator = RouteCodeGenerator::new(&GeneratorConfig::default()).unwrap();
//! let module = generator.render_routes(&table).unwrap();
//! assert!(module.contains("slug: (params: { slug: string }) => `/blog/${params.slug}`,"));
//! ```

use crate::builder::{arguments, render_builder};
use crate::evaluate::{QueryValue, RouteArgs, evaluate};
use crate::path_template::PathTemplate;
use crate::template_engine::TemplateEngine;
use crate::types::{
    ApiContext, Endpoint, GeneratedCode, GeneratedFile, NodeContext, RoutesContext, TestCase,
    TestSuiteContext,
};
use crate::typescript::{accessor_expression, object_key, string_literal, to_camel_case};
use route_core::{GeneratorConfig, ParamKind, QueryType, Result, RouteEntry};
use route_scan::{INDEX_KEY, NamedRoute, RouteNamespace, RouteTable};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Root identifier of the exported routes object.
const ROUTES_IDENT: &str = "routes";

/// Path prefix of routes that get fetch helpers.
const API_PREFIX: &str = "/api";

/// Sample catch-all value used by the emitted test suite.
const SAMPLE_LIST: [&str; 2] = ["a", "b"];

/// Generator for the TypeScript route module and its satellites.
///
/// # Examples
///
/// ```
/// use route_codegen::RouteCodeGenerator;
/// use route_core::GeneratorConfig;
///
/// let generator = RouteCodeGenerator::new(&GeneratorConfig::default()).unwrap();
/// ```
#[derive(Debug)]
pub struct RouteCodeGenerator<'a> {
    engine: TemplateEngine<'a>,
    config: GeneratorConfig,
}

impl RouteCodeGenerator<'_> {
    /// Creates a generator for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            config: config.clone(),
        })
    }

    /// Generates every enabled artifact.
    ///
    /// The route module is always produced. The test suite and the API
    /// helpers follow `emit_tests` and `emit_api`; each is skipped when
    /// it would be empty.
    ///
    /// # Errors
    ///
    /// Returns error if template rendering fails.
    pub fn generate(&self, table: &RouteTable) -> Result<GeneratedCode> {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile::new(
            &self.config.output_file,
            self.render_routes(table)?,
        ));

        if self.config.emit_tests {
            if table.is_empty() {
                warn!("No routes found, skipping test suite");
            } else {
                code.add_file(GeneratedFile::new(
                    self.config.sibling_output("test.ts"),
                    self.render_tests(table)?,
                ));
            }
        }

        if self.config.emit_api {
            let endpoints = self.endpoints(table);
            if endpoints.is_empty() {
                info!("No routes under {API_PREFIX}, skipping API helpers");
            } else {
                code.add_file(GeneratedFile::new(
                    self.config.sibling_output("api.ts"),
                    self.render_endpoints(endpoints)?,
                ));
            }
        }

        info!(
            "Generated {} files for {} routes",
            code.file_count(),
            table.len()
        );
        Ok(code)
    }

    /// Renders the route module.
    ///
    /// # Errors
    ///
    /// Returns error if template rendering fails.
    pub fn render_routes(&self, table: &RouteTable) -> Result<String> {
        let context = RoutesContext {
            source: self.config.input_dir.display().to_string(),
            dialect: self.config.dialect.to_string(),
            has_query: table.entries().iter().any(|e| !e.query_fields().is_empty()),
            nodes: self.node_contexts(table.namespace(), 0),
            route_path_type: route_path_type(table.entries()),
        };

        self.engine.render("routes", &context)
    }

    /// Renders the vitest suite.
    ///
    /// Each route gets one assertion with every input filled in and, when
    /// it has optional inputs, one with only the required ones. Expected
    /// strings come from [`evaluate`].
    ///
    /// # Errors
    ///
    /// Returns error if template rendering fails.
    pub fn render_tests(&self, table: &RouteTable) -> Result<String> {
        let cases = table
            .routes()
            .flat_map(|route| self.test_cases(route))
            .collect();

        let context = TestSuiteContext {
            import_path: self.import_path(),
            cases,
        };
        self.engine.render("routes_test", &context)
    }

    /// Renders fetch helpers for every route under `/api`.
    ///
    /// # Errors
    ///
    /// Returns error if template rendering fails.
    pub fn render_api(&self, table: &RouteTable) -> Result<String> {
        self.render_endpoints(self.endpoints(table))
    }

    fn render_endpoints(&self, endpoints: Vec<Endpoint>) -> Result<String> {
        let context = ApiContext {
            import_path: self.import_path(),
            endpoints,
        };
        self.engine.render("routes_api", &context)
    }

    fn node_contexts(&self, namespace: &RouteNamespace, depth: usize) -> Vec<NodeContext> {
        let mut nodes = Vec::with_capacity(namespace.len());

        for (key, node) in namespace.iter() {
            let key = object_key(key);
            if node.is_leaf() {
                if let Some(entry) = node.entry() {
                    nodes.push(NodeContext::leaf(key, depth, self.builder(entry)));
                }
                continue;
            }

            let mut children = Vec::with_capacity(node.children().len() + 1);
            if let Some(entry) = node.entry().filter(|_| !node.has_index_child()) {
                children.push(NodeContext::leaf(
                    INDEX_KEY.to_string(),
                    depth + 1,
                    self.builder(entry),
                ));
            }
            children.extend(self.node_contexts(node.children(), depth + 1));
            nodes.push(NodeContext::group(key, depth, children));
        }

        nodes
    }

    fn builder(&self, entry: &RouteEntry) -> String {
        render_builder(entry, self.config.encode_path_params)
    }

    fn test_cases(&self, route: NamedRoute<'_>) -> Vec<TestCase> {
        let name = route.accessor.join(".");
        let callee = accessor_expression(ROUTES_IDENT, route.accessor);

        let Some(full) = SampleCall::build(route.entry, true) else {
            debug!("No sample values for route {name}, skipping its tests");
            return Vec::new();
        };
        let minimal = SampleCall::build(route.entry, false)
            .filter(|minimal| minimal.args_text != full.args_text);
        let calls = std::iter::once(full).chain(minimal);

        calls
            .filter_map(|call| {
                match evaluate(route.entry, &call.args, self.config.encode_path_params) {
                    Ok(expected) => Some(TestCase {
                        title: string_literal(&format!("{name} -> {expected}")),
                        call: format!("{callee}({})", call.args_text),
                        expected: string_literal(&expected),
                    }),
                    Err(e) => {
                        warn!("Skipping test case for {name}: {e}");
                        None
                    }
                }
            })
            .collect()
    }

    fn endpoints(&self, table: &RouteTable) -> Vec<Endpoint> {
        let mut seen = HashSet::new();
        let mut endpoints = Vec::new();

        for route in table.routes().filter(|r| is_api_route(&r.entry.route_path)) {
            let name: Vec<&str> = route
                .accessor
                .iter()
                .skip(1)
                .map(String::as_str)
                .filter(|key| *key != INDEX_KEY)
                .collect();
            let key = match to_camel_case(&name.join(".")) {
                key if key.is_empty() => INDEX_KEY.to_string(),
                key => key,
            };

            if !seen.insert(key.clone()) {
                warn!(
                    "API helper '{key}' for {} already defined, skipping",
                    route.entry.route_path
                );
                continue;
            }

            let args = arguments(route.entry);
            let mut declarations: Vec<String> = args.iter().map(|a| a.declaration.clone()).collect();
            declarations.push("options?: ApiRequestOptions".to_string());
            let names: Vec<&str> = args.iter().map(|a| a.name).collect();

            endpoints.push(Endpoint {
                key: object_key(&key),
                declarations: declarations.join(", "),
                call: format!(
                    "{}({})",
                    accessor_expression(ROUTES_IDENT, route.accessor),
                    names.join(", ")
                ),
            });
        }

        endpoints
    }

    fn import_path(&self) -> String {
        let stem = self
            .config
            .output_file
            .file_stem()
            .map_or_else(|| ROUTES_IDENT.to_string(), |s| s.to_string_lossy().into_owned());
        string_literal(&format!("./{stem}"))
    }
}

/// Renders the generated route module for `table`.
///
/// The header names `config`'s input directory and dialect, and
/// `config.encode_path_params` controls path encoding. Other settings
/// are ignored.
///
/// # Errors
///
/// Returns error if template rendering fails.
///
/// # Examples
///
/// ```
/// use route_codegen::emit;
/// use route_core::{Dialect, GeneratorConfig, RouteEntry};
/// use route_scan::build_route_table;
///
/// let table = build_route_table(vec![RouteEntry {
///     source_path: "pages/about.vue".into(),
///     route_path: "/about".to_string(),
///     params: vec![],
///     query: None,
/// }]);
///
/// let config = GeneratorConfig {
///     dialect: Dialect::Nuxt,
///     ..Default::default()
/// };
/// let module = emit(&table, &config).unwrap();
/// assert!(module.starts_with("// Generated by typed-routes from pages (nuxt)."));
/// assert!(module.contains("about: () => \"/about\","));
/// assert!(module.contains("export type RoutePath = \"/about\";"));
/// ```
pub fn emit(table: &RouteTable, config: &GeneratorConfig) -> Result<String> {
    RouteCodeGenerator::new(config)?.render_routes(table)
}

fn is_api_route(route_path: &str) -> bool {
    route_path == API_PREFIX
        || route_path
            .strip_prefix(API_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Renders the `RoutePath` union, one member per distinct pattern.
fn route_path_type(entries: &[RouteEntry]) -> String {
    let mut seen = HashSet::new();
    let members: Vec<String> = entries
        .iter()
        .map(|e| PathTemplate::parse(&e.route_path).type_literal(!e.query_fields().is_empty()))
        .filter(|member| seen.insert(member.clone()))
        .collect();

    if members.is_empty() {
        "never".to_string()
    } else {
        members.join("\n  | ")
    }
}

/// Argument text and matching evaluator arguments for one sample call.
#[derive(Debug)]
struct SampleCall {
    args_text: String,
    args: RouteArgs,
}

impl SampleCall {
    /// Fills in sample values for the route's inputs.
    ///
    /// Returns `None` when a required query field has a type no sample
    /// value can be derived for.
    fn build(entry: &RouteEntry, include_optional: bool) -> Option<Self> {
        let mut args = RouteArgs::new();
        let mut records: Vec<Option<String>> = Vec::with_capacity(2);

        if !entry.params.is_empty() {
            let mut fields = Vec::new();
            for param in entry.params.iter().filter(|p| include_optional || !p.optional) {
                let key = object_key(&param.name);
                match param.kind {
                    ParamKind::Scalar => {
                        let value = format!("{}-value", param.name);
                        fields.push(format!("{key}: {}", string_literal(&value)));
                        args = args.param(&param.name, value);
                    }
                    ParamKind::CatchAllList => {
                        fields.push(format!("{key}: {}", list_literal(&SAMPLE_LIST)));
                        args = args.list(&param.name, SAMPLE_LIST);
                    }
                }
            }
            records.push(object_literal(&fields));
        }

        let query = entry.query_fields();
        if !query.is_empty() {
            let mut fields = Vec::new();
            for field in query.iter().filter(|f| include_optional || !f.optional) {
                match sample_query_value(&field.ty) {
                    Some((literal, value)) => {
                        fields.push(format!("{}: {literal}", object_key(&field.name)));
                        args = args.query(&field.name, value);
                    }
                    None if field.optional => {}
                    None => return None,
                }
            }
            records.push(object_literal(&fields));
        }

        while records.last().is_some_and(Option::is_none) {
            records.pop();
        }
        let args_text = records
            .into_iter()
            .map(|r| r.unwrap_or_else(|| "undefined".to_string()))
            .collect::<Vec<_>>()
            .join(", ");

        Some(Self { args_text, args })
    }
}

fn object_literal(fields: &[String]) -> Option<String> {
    if fields.is_empty() {
        None
    } else {
        Some(format!("{{ {} }}", fields.join(", ")))
    }
}

fn list_literal(values: &[&str]) -> String {
    let items: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
    format!("[{}]", items.join(", "))
}

/// Returns a TypeScript literal and its evaluator value for a query type.
fn sample_query_value(ty: &QueryType) -> Option<(String, QueryValue)> {
    match ty {
        QueryType::String => Some((string_literal("value"), "value".into())),
        QueryType::Number => Some(("1".to_string(), QueryValue::Number(1.0))),
        QueryType::Boolean => Some(("true".to_string(), true.into())),
        QueryType::StringList => Some((list_literal(&SAMPLE_LIST), SAMPLE_LIST.to_vec().into())),
        QueryType::Raw(text) => {
            let first = first_string_literal(text)?;
            Some((string_literal(&first), first.into()))
        }
    }
}

/// Returns the first member of a union of string literal types, such as
/// `'asc' | 'desc'`.
fn first_string_literal(text: &str) -> Option<String> {
    let members: Vec<&str> = text
        .split('|')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .collect();

    if members.is_empty() || !members.iter().all(|m| unquote(m).is_some()) {
        return None;
    }
    unquote(members[0]).map(ToString::to_string)
}

fn unquote(member: &str) -> Option<&str> {
    ['"', '\'']
        .into_iter()
        .find_map(|q| member.strip_prefix(q)?.strip_suffix(q))
        .filter(|inner| !inner.contains(['"', '\'', '\\']))
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::{ParamSpec, QueryParamSpec};
    use route_scan::build_route_table;
    use std::path::PathBuf;

    fn entry(route_path: &str, params: Vec<ParamSpec>, query: Option<Vec<QueryParamSpec>>) -> RouteEntry {
        RouteEntry {
            source_path: PathBuf::from(format!("pages{route_path}.tsx")),
            route_path: route_path.to_string(),
            params,
            query,
        }
    }

    fn generator(config: &GeneratorConfig) -> RouteCodeGenerator<'static> {
        RouteCodeGenerator::new(config).unwrap()
    }

    #[test]
    fn test_group_with_own_route_gets_index_key() {
        let table = build_route_table(vec![
            entry("/blog", vec![], None),
            entry("/blog/:slug", vec![ParamSpec::scalar("slug")], None),
        ]);
        let module = generator(&GeneratorConfig::default()).render_routes(&table).unwrap();

        assert!(module.contains("  blog: {\n    index: () => \"/blog\",\n    slug: "));
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let table = build_route_table(vec![entry("/getting-started", vec![], None)]);
        let module = generator(&GeneratorConfig::default()).render_routes(&table).unwrap();

        assert!(module.contains("\"getting-started\": () => \"/getting-started\","));
    }

    #[test]
    fn test_route_path_union() {
        let entries = vec![
            entry("/", vec![], None),
            entry("/blog/:slug", vec![ParamSpec::scalar("slug")], None),
            entry("/news/:slug", vec![ParamSpec::scalar("slug")], None),
        ];
        assert_eq!(
            route_path_type(&entries),
            "\"/\"\n  | `/blog/${string}`\n  | `/news/${string}`"
        );
        assert_eq!(route_path_type(&[]), "never");
    }

    #[test]
    fn test_query_helpers_only_when_needed() {
        let plain = build_route_table(vec![entry("/about", vec![], None)]);
        let module = generator(&GeneratorConfig::default()).render_routes(&plain).unwrap();
        assert!(!module.contains("buildQuery"));

        let query = vec![QueryParamSpec::new("q", QueryType::String, true)];
        let with_query = build_route_table(vec![entry("/search", vec![], Some(query))]);
        let module = generator(&GeneratorConfig::default())
            .render_routes(&with_query)
            .unwrap();
        assert!(module.contains("const buildQuery"));
        assert!(module.contains("`/search${string}`"));
    }

    #[test]
    fn test_sample_calls() {
        let query = vec![
            QueryParamSpec::new("q", QueryType::String, false),
            QueryParamSpec::new("page", QueryType::Number, true),
        ];
        let e = entry("/docs/:slug*", vec![ParamSpec::catch_all("slug")], Some(query));

        let full = SampleCall::build(&e, true).unwrap();
        assert_eq!(full.args_text, "{ slug: [\"a\", \"b\"] }, { q: \"value\", page: 1 }");

        let minimal = SampleCall::build(&e, false).unwrap();
        assert_eq!(minimal.args_text, "undefined, { q: \"value\" }");
    }

    #[test]
    fn test_sample_call_drops_trailing_empty_records() {
        let e = entry("/docs/:slug*", vec![ParamSpec::catch_all("slug")], None);
        assert_eq!(SampleCall::build(&e, false).unwrap().args_text, "");
    }

    #[test]
    fn test_unsampleable_required_field_skips_route() {
        let query = vec![QueryParamSpec::new("at", QueryType::Raw("Date".to_string()), false)];
        let e = entry("/calendar", vec![], Some(query));
        assert!(SampleCall::build(&e, true).is_none());
    }

    #[test]
    fn test_first_string_literal() {
        assert_eq!(first_string_literal("'asc' | 'desc'").as_deref(), Some("asc"));
        assert_eq!(first_string_literal("\"new\"").as_deref(), Some("new"));
        assert_eq!(first_string_literal("'a' | number"), None);
        assert_eq!(first_string_literal("Date"), None);
    }

    #[test]
    fn test_test_suite_cases() {
        let table = build_route_table(vec![
            entry("/", vec![], None),
            entry("/docs/:slug*", vec![ParamSpec::catch_all("slug")], None),
        ]);
        let suite = generator(&GeneratorConfig::default()).render_tests(&table).unwrap();

        assert!(suite.contains("import { routes } from \"./routes\";"));
        assert!(suite.contains("expect(routes.home()).toBe(\"/\");"));
        assert!(suite.contains("expect(routes.docs.slug({ slug: [\"a\", \"b\"] })).toBe(\"/docs/a/b\");"));
        assert!(suite.contains("expect(routes.docs.slug()).toBe(\"/docs/\");"));
    }

    #[test]
    fn test_api_endpoints() {
        let table = build_route_table(vec![
            entry("/api/users/:id", vec![ParamSpec::scalar("id")], None),
            entry("/api", vec![], None),
            entry("/about", vec![], None),
            entry("/apiary", vec![], None),
        ]);
        let api = generator(&GeneratorConfig::default()).render_api(&table).unwrap();

        assert!(api.contains("import { routes } from \"./routes\";"));
        assert!(api.contains(
            "usersId: <T = unknown>(params: { id: string }, options?: ApiRequestOptions): Promise<T> =>"
        ));
        assert!(api.contains("request<T>(routes.api.users.id(params), options),"));
        assert!(api.contains("index: <T = unknown>(options?: ApiRequestOptions): Promise<T> =>"));
        assert!(!api.contains("routes.about"));
        assert!(!api.contains("apiary"));
    }

    #[test]
    fn test_generate_respects_flags() {
        let table = build_route_table(vec![entry("/about", vec![], None)]);

        let code = generator(&GeneratorConfig::default()).generate(&table).unwrap();
        assert_eq!(code.file_count(), 1);

        let config = GeneratorConfig {
            output_file: PathBuf::from("out/paths.ts"),
            emit_tests: true,
            emit_api: true,
            ..GeneratorConfig::default()
        };
        let code = generator(&config).generate(&table).unwrap();
        assert_eq!(code.file_count(), 2);
        assert!(code.get("out/paths.ts").is_some());
        let suite = code.get("out/paths.test.ts").unwrap();
        assert!(suite.content().contains("from \"./paths\""));
    }
}
