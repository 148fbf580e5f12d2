//! TypeScript source text helpers.
//!
//! Small, pure functions for turning route names and paths into valid
//! TypeScript tokens.
//!
//! # Examples
//!
//! ```
//! use route_codegen::typescript;
//!
//! assert_eq!(typescript::object_key("about"), "about");
//! assert_eq!(typescript::object_key("getting-started"), "\"getting-started\"");
//! assert_eq!(typescript::property_access("params", "slug", false), "params.slug");
//! ```

/// Returns `true` if `name` can be used as a bare identifier key.
///
/// # Examples
///
/// ```
/// use route_codegen::typescript::is_identifier;
///
/// assert!(is_identifier("slug"));
/// assert!(is_identifier("$id"));
/// assert!(!is_identifier("sitemap.xml"));
/// assert!(!is_identifier("404"));
/// ```
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Returns a double-quoted TypeScript string literal.
#[must_use]
pub fn string_literal(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Returns `name` as an object literal key, quoted when needed.
#[must_use]
pub fn object_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Renders a property read on `object`, using `?.` when `optional`.
///
/// # Examples
///
/// ```
/// use route_codegen::typescript::property_access;
///
/// assert_eq!(property_access("query", "page", true), "query?.page");
/// assert_eq!(property_access("query", "sort-by", false), "query[\"sort-by\"]");
/// assert_eq!(property_access("query", "sort-by", true), "query?.[\"sort-by\"]");
/// ```
#[must_use]
pub fn property_access(object: &str, name: &str, optional: bool) -> String {
    match (is_identifier(name), optional) {
        (true, false) => format!("{object}.{name}"),
        (true, true) => format!("{object}?.{name}"),
        (false, false) => format!("{object}[{}]", string_literal(name)),
        (false, true) => format!("{object}?.[{}]", string_literal(name)),
    }
}

/// Renders a chain of keys from a root object (`routes.blog.slug`).
#[must_use]
pub fn accessor_expression(root: &str, keys: &[String]) -> String {
    keys.iter()
        .fold(root.to_string(), |expr, key| property_access(&expr, key, false))
}

/// Escapes literal text for use inside a template literal.
///
/// # Examples
///
/// ```
/// use route_codegen::typescript::escape_template_text;
///
/// assert_eq!(escape_template_text("/blog"), "/blog");
/// assert_eq!(escape_template_text("/a`b"), "/a\\`b");
/// assert_eq!(escape_template_text("/${x}"), "/\\${x}");
/// ```
#[must_use]
pub fn escape_template_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Converts a dotted or dashed name to camelCase.
///
/// # Examples
///
/// ```
/// use route_codegen::typescript::to_camel_case;
///
/// assert_eq!(to_camel_case("users.id"), "usersId");
/// assert_eq!(to_camel_case("getting-started"), "gettingStarted");
/// assert_eq!(to_camel_case("send_message"), "sendMessage");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for ch in name.chars() {
        if matches!(ch, '_' | '-' | '.' | '/' | ' ') {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.push(ch.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}
