//! Reference evaluator for generated path builders.
//!
//! [`evaluate`] computes, in Rust, the string a generated builder returns
//! for the given arguments. It follows the same [`PathTemplate`] the
//! emitter renders and reproduces the JavaScript runtime behavior the
//! emitted code relies on (`String(value)`, `encodeURIComponent`,
//! `Array.prototype.join`).
//!
//! The evaluator produces the expectations of the emitted test suite and
//! lets this crate check builder semantics without a JavaScript runtime.
//!
//! # Examples
//!
//! ```
//! use route_codegen::evaluate::{RouteArgs, evaluate};
//! use route_core::{ParamSpec, QueryParamSpec, QueryType, RouteEntry};
//!
//! let entry = RouteEntry {
//!     source_path: "pages/search.tsx".into(),
//!     route_path: "/search".to_string(),
//!     params: vec![],
//!     query: Some(vec![
//!         QueryParamSpec::new("q", QueryType::String, false),
//!         QueryParamSpec::new("page", QueryType::Number, true),
//!     ]),
//! };
//!
//! let args = RouteArgs::new().query("q", "typescript");
//! assert_eq!(evaluate(&entry, &args, false).unwrap(), "/search?q=typescript");
//! ```

use crate::path_template::{PathPart, PathTemplate};
use route_core::{Error, ParamKind, Result, RouteEntry};
use std::collections::HashMap;
use std::fmt;

/// A path parameter argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Value of a scalar parameter
    Scalar(String),
    /// Values of a catch-all parameter
    List(Vec<String>),
}

/// A query field argument, mirroring the JavaScript values a caller passes.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// A string
    String(String),
    /// A number
    Number(f64),
    /// A boolean
    Bool(bool),
    /// An array
    List(Vec<QueryValue>),
}

impl fmt::Display for QueryValue {
    /// Formats the value the way JavaScript's `String(value)` does.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&js_number(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(values) => {
                let items: Vec<String> = values.iter().map(ToString::to_string).collect();
                f.write_str(&items.join(","))
            }
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Arguments for one builder call. Absent keys are `undefined`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteArgs {
    params: HashMap<String, ParamValue>,
    query: HashMap<String, QueryValue>,
}

impl RouteArgs {
    /// Creates an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a scalar path parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .insert(name.into(), ParamValue::Scalar(value.into()));
        self
    }

    /// Sets a catch-all path parameter.
    #[must_use]
    pub fn list<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.params.insert(name.into(), ParamValue::List(values));
        self
    }

    /// Sets a query field.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Returns a path parameter, if set.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Returns a query field, if set.
    #[must_use]
    pub fn get_query(&self, name: &str) -> Option<&QueryValue> {
        self.query.get(name)
    }
}

/// Computes the string the generated builder for `entry` returns.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for calls the generated signature
/// would reject at compile time: a missing required param or query
/// field, a list passed for a scalar param (or the reverse), or a scalar
/// passed for a list-typed query field.
pub fn evaluate(entry: &RouteEntry, args: &RouteArgs, encode_path_params: bool) -> Result<String> {
    let template = PathTemplate::parse(&entry.route_path);
    let mut path = String::new();

    for part in template.parts() {
        match part {
            PathPart::Literal(text) => path.push_str(text),
            PathPart::Param {
                name,
                kind: ParamKind::Scalar,
                optional,
            } => match (scalar_param(entry, args, name)?, *optional) {
                (Some(value), _) => path.push_str(&encode_path(value, encode_path_params)),
                (None, true) => {}
                (None, false) => return Err(missing(entry, "param", name)),
            },
            PathPart::Param {
                name,
                kind: ParamKind::CatchAllList,
                ..
            } => match args.get_param(name) {
                Some(ParamValue::List(values)) => {
                    let encoded: Vec<String> = values
                        .iter()
                        .map(|v| encode_path(v, encode_path_params))
                        .collect();
                    path.push_str(&encoded.join("/"));
                }
                Some(ParamValue::Scalar(_)) => {
                    return Err(mismatch(entry, name, "a list"));
                }
                None => {}
            },
            PathPart::OptionalSegment(name) => {
                if let Some(value) = scalar_param(entry, args, name)? {
                    path.push('/');
                    path.push_str(&encode_path(value, encode_path_params));
                }
            }
        }
    }

    if path.is_empty() && template.may_render_empty() {
        path.push('/');
    }

    let mut pairs = Vec::new();
    for field in entry.query_fields() {
        match (args.get_query(&field.name), field.ty.is_list()) {
            (None, _) if field.optional => {}
            (None, _) => return Err(missing(entry, "query field", &field.name)),
            (Some(QueryValue::List(values)), true) => {
                pairs.extend(values.iter().map(|v| pair(&field.name, v)));
            }
            (Some(_), true) => return Err(mismatch(entry, &field.name, "a list")),
            (Some(value), false) => pairs.push(pair(&field.name, value)),
        }
    }

    if !pairs.is_empty() {
        path.push('?');
        path.push_str(&pairs.join("&"));
    }

    Ok(path)
}

fn scalar_param<'a>(entry: &RouteEntry, args: &'a RouteArgs, name: &str) -> Result<Option<&'a str>> {
    match args.get_param(name) {
        Some(ParamValue::Scalar(value)) => Ok(Some(value)),
        Some(ParamValue::List(_)) => Err(mismatch(entry, name, "a single value")),
        None => Ok(None),
    }
}

fn pair(name: &str, value: &QueryValue) -> String {
    format!(
        "{}={}",
        encode_uri_component(name),
        encode_uri_component(&value.to_string())
    )
}

fn encode_path(value: &str, encode: bool) -> String {
    if encode {
        encode_uri_component(value)
    } else {
        value.to_string()
    }
}

fn missing(entry: &RouteEntry, what: &str, name: &str) -> Error {
    Error::InvalidArgument(format!(
        "route '{}' requires {what} '{name}'",
        entry.route_path
    ))
}

fn mismatch(entry: &RouteEntry, name: &str, expected: &str) -> Error {
    Error::InvalidArgument(format!(
        "route '{}' expects {expected} for '{name}'",
        entry.route_path
    ))
}

/// Percent-encodes text exactly like JavaScript's `encodeURIComponent`.
///
/// # Examples
///
/// ```
/// use route_codegen::evaluate::encode_uri_component;
///
/// assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
/// assert_eq!(encode_uri_component("(it's)*~"), "(it's)*~");
/// assert_eq!(encode_uri_component("é"), "%C3%A9");
/// ```
#[must_use]
pub fn encode_uri_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric()
            || matches!(byte, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
        {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Formats a number like JavaScript's `String(number)` for the common
/// cases: integers print without a fraction.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::{ParamSpec, QueryParamSpec, QueryType};

    fn entry(route_path: &str, params: Vec<ParamSpec>, query: Option<Vec<QueryParamSpec>>) -> RouteEntry {
        RouteEntry {
            source_path: "pages/x.tsx".into(),
            route_path: route_path.to_string(),
            params,
            query,
        }
    }

    fn search() -> RouteEntry {
        entry(
            "/search",
            vec![],
            Some(vec![
                QueryParamSpec::new("q", QueryType::String, false),
                QueryParamSpec::new("page", QueryType::Number, true),
                QueryParamSpec::new("category", QueryType::StringList, true),
            ]),
        )
    }

    #[test]
    fn test_static_routes() {
        let args = RouteArgs::new();
        assert_eq!(evaluate(&entry("/", vec![], None), &args, false).unwrap(), "/");
        assert_eq!(
            evaluate(&entry("/about", vec![], None), &args, false).unwrap(),
            "/about"
        );
    }

    #[test]
    fn test_scalar_substitution() {
        let blog = entry("/blog/:slug", vec![ParamSpec::scalar("slug")], None);
        let args = RouteArgs::new().param("slug", "hello-world");
        assert_eq!(evaluate(&blog, &args, false).unwrap(), "/blog/hello-world");
    }

    #[test]
    fn test_missing_required_param() {
        let blog = entry("/blog/:slug", vec![ParamSpec::scalar("slug")], None);
        let err = evaluate(&blog, &RouteArgs::new(), false).unwrap_err();
        assert!(err.to_string().contains("slug"));
    }

    #[test]
    fn test_catch_all_absent_empty_and_given() {
        let docs = entry("/docs/:slug*", vec![ParamSpec::catch_all("slug")], None);
        assert_eq!(evaluate(&docs, &RouteArgs::new(), false).unwrap(), "/docs/");
        let empty = RouteArgs::new().list("slug", Vec::<String>::new());
        assert_eq!(evaluate(&docs, &empty, false).unwrap(), "/docs/");
        let given = RouteArgs::new().list("slug", ["a", "b"]);
        assert_eq!(evaluate(&docs, &given, false).unwrap(), "/docs/a/b");
    }

    #[test]
    fn test_query_single_field_has_no_trailing_separator() {
        let args = RouteArgs::new().query("q", "typescript");
        assert_eq!(evaluate(&search(), &args, false).unwrap(), "/search?q=typescript");
    }

    #[test]
    fn test_query_declaration_order_and_lists() {
        let args = RouteArgs::new()
            .query("category", vec!["tutorial", "beginner"])
            .query("page", 2)
            .query("q", "react");
        assert_eq!(
            evaluate(&search(), &args, false).unwrap(),
            "/search?q=react&page=2&category=tutorial&category=beginner"
        );
    }

    #[test]
    fn test_all_optional_query_absent_has_no_question_mark() {
        let posts = entry(
            "/posts",
            vec![],
            Some(vec![QueryParamSpec::new("tag", QueryType::String, true)]),
        );
        assert_eq!(evaluate(&posts, &RouteArgs::new(), false).unwrap(), "/posts");
        let empty_list = entry(
            "/posts",
            vec![],
            Some(vec![QueryParamSpec::new("tags", QueryType::StringList, true)]),
        );
        let args = RouteArgs::new().query("tags", Vec::<String>::new());
        assert_eq!(evaluate(&empty_list, &args, false).unwrap(), "/posts");
    }

    #[test]
    fn test_query_values_are_percent_encoded() {
        let args = RouteArgs::new().query("q", "c++ & rust");
        assert_eq!(
            evaluate(&search(), &args, false).unwrap(),
            "/search?q=c%2B%2B%20%26%20rust"
        );
    }

    #[test]
    fn test_boolean_and_fractional_numbers() {
        let route = entry(
            "/x",
            vec![],
            Some(vec![
                QueryParamSpec::new("draft", QueryType::Boolean, true),
                QueryParamSpec::new("ratio", QueryType::Number, true),
            ]),
        );
        let args = RouteArgs::new().query("draft", true).query("ratio", 0.5);
        assert_eq!(evaluate(&route, &args, false).unwrap(), "/x?draft=true&ratio=0.5");
    }

    #[test]
    fn test_path_encoding_is_opt_in() {
        let blog = entry("/blog/:slug", vec![ParamSpec::scalar("slug")], None);
        let args = RouteArgs::new().param("slug", "a b");
        assert_eq!(evaluate(&blog, &args, false).unwrap(), "/blog/a b");
        assert_eq!(evaluate(&blog, &args, true).unwrap(), "/blog/a%20b");
    }

    #[test]
    fn test_optional_segment() {
        let about = entry("/:lang?/about", vec![ParamSpec::optional_scalar("lang")], None);
        assert_eq!(evaluate(&about, &RouteArgs::new(), false).unwrap(), "/about");
        let args = RouteArgs::new().param("lang", "fr");
        assert_eq!(evaluate(&about, &args, false).unwrap(), "/fr/about");

        let root = entry("/:lang?", vec![ParamSpec::optional_scalar("lang")], None);
        assert_eq!(evaluate(&root, &RouteArgs::new(), false).unwrap(), "/");
    }

    #[test]
    fn test_type_mismatches_rejected() {
        let blog = entry("/blog/:slug", vec![ParamSpec::scalar("slug")], None);
        assert!(evaluate(&blog, &RouteArgs::new().list("slug", ["a"]), false).is_err());

        let args = RouteArgs::new().query("q", "x").query("category", "single");
        assert!(evaluate(&search(), &args, false).is_err());
    }

    #[test]
    fn test_js_number_formatting() {
        assert_eq!(js_number(2.0), "2");
        assert_eq!(js_number(-3.0), "-3");
        assert_eq!(js_number(1.25), "1.25");
        assert_eq!(js_number(f64::NAN), "NaN");
    }
}
