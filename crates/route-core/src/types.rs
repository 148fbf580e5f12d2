//! Domain types for discovered routes.
//!
//! These types form the intermediate representation handed from
//! discovery to code generation and reporting. All of them are plain
//! values created fresh on every pipeline run.
//!
//! # Examples
//!
//! ```
//! use route_core::{ParamKind, ParamSpec, RouteEntry};
//! use std::path::PathBuf;
//!
//! let entry = RouteEntry {
//!     source_path: PathBuf::from("/app/pages/blog/[slug].tsx"),
//!     route_path: "/blog/:slug".to_string(),
//!     params: vec![ParamSpec::scalar("slug")],
//!     query: None,
//! };
//!
//! assert_eq!(entry.dotted_name(), "blog.slug");
//! assert_eq!(entry.params[0].kind, ParamKind::Scalar);
//! ```

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// File extensions recognized as route sources.
pub const ROUTE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "mdx", "vue", "svelte", "astro"];

/// Namespace key reserved for the root route.
pub const HOME_ROUTE_NAME: &str = "home";

/// Returns `true` if `c` may appear in a parameter name.
#[inline]
#[must_use]
pub const fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// File-based routing convention.
///
/// Each dialect has its own bracket or prefix syntax for dynamic,
/// optional and catch-all segments.
///
/// # Examples
///
/// ```
/// use route_core::Dialect;
///
/// let dialect: Dialect = "next-app".parse().unwrap();
/// assert_eq!(dialect, Dialect::NextApp);
/// assert_eq!(dialect.as_str(), "next-app");
/// assert!("rails".parse::<Dialect>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Next.js `pages/` directory: `[id]`, `[...slug]`, `[[...slug]]`.
    #[default]
    NextPages,
    /// Next.js `app/` directory: bracket segments plus route groups and
    /// `page`/`route` role files.
    NextApp,
    /// Remix v2 flat routes: `$id`, `($lang)`, `$` splat, `.` separators.
    Remix,
    /// Nuxt `pages/`: `[id]`, `[[id]]`, `[...slug]`.
    Nuxt,
    /// TanStack Router file routes: `$id`, `{-$id}`, `$` splat.
    #[serde(rename = "tanstack")]
    TanStack,
}

impl Dialect {
    /// All supported dialects.
    pub const ALL: [Self; 5] = [
        Self::NextPages,
        Self::NextApp,
        Self::Remix,
        Self::Nuxt,
        Self::TanStack,
    ];

    /// Returns the kebab-case name of the dialect.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NextPages => "next-pages",
            Self::NextApp => "next-app",
            Self::Remix => "remix",
            Self::Nuxt => "nuxt",
            Self::TanStack => "tanstack",
        }
    }

    /// Returns `true` for App-Router-style dialects that tag files with roles.
    #[must_use]
    pub const fn uses_file_roles(&self) -> bool {
        matches!(self, Self::NextApp)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let expected: Vec<_> = Self::ALL.iter().map(Dialect::as_str).collect();
                Error::InvalidArgument(format!(
                    "unknown dialect: '{s}' (expected one of: {})",
                    expected.join(", ")
                ))
            })
    }
}

/// Role of an App-Router file, derived from its basename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteRole {
    /// `page.*` - a navigable page
    Page,
    /// `route.*` - a request handler
    Route,
    /// `layout.*`
    Layout,
    /// `loading.*`
    Loading,
    /// `error.*` and `global-error.*`
    Error,
    /// `not-found.*`
    NotFound,
    /// `template.*`
    Template,
    /// `default.*` (parallel route fallback)
    Default,
    /// Any other file
    Other,
}

impl RouteRole {
    /// Classifies a file stem (basename without extension).
    ///
    /// # Examples
    ///
    /// ```
    /// use route_core::RouteRole;
    ///
    /// assert_eq!(RouteRole::from_stem("page"), RouteRole::Page);
    /// assert_eq!(RouteRole::from_stem("not-found"), RouteRole::NotFound);
    /// assert_eq!(RouteRole::from_stem("button"), RouteRole::Other);
    /// ```
    #[must_use]
    pub fn from_stem(stem: &str) -> Self {
        match stem {
            "page" => Self::Page,
            "route" => Self::Route,
            "layout" => Self::Layout,
            "loading" => Self::Loading,
            "error" | "global-error" => Self::Error,
            "not-found" => Self::NotFound,
            "template" => Self::Template,
            "default" => Self::Default,
            _ => Self::Other,
        }
    }

    /// Returns `true` if files with this role define navigable paths.
    ///
    /// A layout shares its URL with the page beside it, so only `page`
    /// and `route` count.
    #[must_use]
    pub const fn is_routable(&self) -> bool {
        matches!(self, Self::Page | Self::Route)
    }

    /// Returns `true` if `stem` names any convention role (not `Other`).
    #[must_use]
    pub fn is_role_stem(stem: &str) -> bool {
        Self::from_stem(stem) != Self::Other
    }
}

/// A discovered candidate route file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFile {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Role tag for App-Router-style dialects
    pub role: Option<RouteRole>,
}

impl RouteFile {
    /// Creates a route file without a role tag.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            role: None,
        }
    }

    /// Attaches a role tag.
    #[must_use]
    pub const fn with_role(mut self, role: RouteRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Shape of a dynamic path parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKind {
    /// Matches exactly one path segment
    Scalar,
    /// Matches zero or more remaining segments as a list
    CatchAllList,
}

/// One dynamic path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter identifier
    pub name: String,
    /// Scalar or catch-all list
    pub kind: ParamKind,
    /// Whether the caller may omit it
    pub optional: bool,
}

impl ParamSpec {
    /// Creates a required scalar parameter.
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Scalar,
            optional: false,
        }
    }

    /// Creates an optional scalar parameter.
    #[must_use]
    pub fn optional_scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Scalar,
            optional: true,
        }
    }

    /// Creates a catch-all parameter. Catch-alls are always optional.
    #[must_use]
    pub fn catch_all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::CatchAllList,
            optional: true,
        }
    }

    /// Returns `true` for catch-all list parameters.
    #[inline]
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.kind == ParamKind::CatchAllList
    }
}

/// Declared type of a query field.
///
/// Recognized literals get their own variant; anything else is kept
/// verbatim as `Raw`.
///
/// # Examples
///
/// ```
/// use route_core::QueryType;
///
/// assert_eq!(QueryType::from_text("number"), QueryType::Number);
/// assert!(QueryType::from_text("string[]").is_list());
/// assert!(QueryType::from_text("Array<number>").is_list());
/// assert_eq!(QueryType::from_text("'asc' | 'desc'").as_ts(), "'asc' | 'desc'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum QueryType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `string[]`
    StringList,
    /// Unrecognized type text, preserved verbatim
    Raw(String),
}

impl QueryType {
    /// Classifies raw type text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match text.trim() {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "string[]" | "Array<string>" => Self::StringList,
            other => Self::Raw(other.to_string()),
        }
    }

    /// Returns the TypeScript type text.
    #[must_use]
    pub fn as_ts(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::StringList => "string[]",
            Self::Raw(text) => text,
        }
    }

    /// Returns `true` if values of this type encode as repeated pairs.
    #[must_use]
    pub fn is_list(&self) -> bool {
        match self {
            Self::StringList => true,
            Self::Raw(text) => {
                let text = text.trim();
                text.ends_with("[]") || text.starts_with("Array<") || text.starts_with("ReadonlyArray<")
            }
            _ => false,
        }
    }
}

impl From<QueryType> for String {
    fn from(ty: QueryType) -> Self {
        ty.as_ts().to_string()
    }
}

impl From<String> for QueryType {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

/// One field of a declared query contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryParamSpec {
    /// Field name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: QueryType,
    /// Whether the field was declared with `?`
    pub optional: bool,
}

impl QueryParamSpec {
    /// Creates a query field spec.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: QueryType, optional: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            optional,
        }
    }
}

/// One discovered route: the unit the builder and emitter operate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    /// File the route was discovered from
    pub source_path: PathBuf,
    /// Canonical route path, always starting with `/`
    pub route_path: String,
    /// Dynamic parameters in order of appearance
    pub params: Vec<ParamSpec>,
    /// Declared query contract, when one was found
    pub query: Option<Vec<QueryParamSpec>>,
}

impl RouteEntry {
    /// Derives the namespace key path for this route.
    ///
    /// Markers are reduced to bare parameter names and the root path
    /// becomes [`HOME_ROUTE_NAME`].
    ///
    /// # Examples
    ///
    /// ```
    /// use route_core::RouteEntry;
    /// use std::path::PathBuf;
    ///
    /// let entry = RouteEntry {
    ///     source_path: PathBuf::from("docs/[[...slug]].tsx"),
    ///     route_path: "/docs/:slug*".to_string(),
    ///     params: vec![],
    ///     query: None,
    /// };
    /// assert_eq!(entry.name_segments(), vec!["docs", "slug"]);
    /// ```
    #[must_use]
    pub fn name_segments(&self) -> Vec<String> {
        let segments: Vec<String> = self
            .route_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(strip_markers)
            .collect();

        if segments.is_empty() {
            vec![HOME_ROUTE_NAME.to_string()]
        } else {
            segments
        }
    }

    /// Returns the dot-separated route name (e.g. `blog.slug`).
    #[must_use]
    pub fn dotted_name(&self) -> String {
        self.name_segments().join(".")
    }

    /// Returns the declared query fields, or an empty slice.
    #[must_use]
    pub fn query_fields(&self) -> &[QueryParamSpec] {
        self.query.as_deref().unwrap_or_default()
    }

    /// Returns `true` if the route has at least one dynamic parameter.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        !self.params.is_empty()
    }

    /// Returns `true` if the route has a catch-all parameter.
    #[must_use]
    pub fn has_catch_all(&self) -> bool {
        self.params.iter().any(ParamSpec::is_catch_all)
    }

    /// Returns the number of path segments (`/` has depth 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.route_path.split('/').filter(|s| !s.is_empty()).count()
    }

    /// Returns the first path segment, or `/` for the root route.
    #[must_use]
    pub fn first_segment(&self) -> &str {
        self.route_path
            .split('/')
            .find(|s| !s.is_empty())
            .unwrap_or("/")
    }
}

/// Removes `:` prefixes and `*`/`?` suffixes from every marker in a segment.
fn strip_markers(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ':' {
            out.push(c);
            continue;
        }
        while let Some(&next) = chars.peek() {
            if !is_param_char(next) {
                break;
            }
            out.push(next);
            chars.next();
        }
        if matches!(chars.peek(), Some('*' | '?')) {
            chars.next();
        }
    }

    out
}
