//! Query contract extraction.
//!
//! A route file may declare the query string it accepts:
//!
//! ```typescript
//! export interface QueryParams {
//!   q: string;
//!   page?: number;
//!   category?: string[];
//! }
//! ```
//!
//! The declaration is located with a regular expression over the
//! comment-free source, then its body is read by a single-pass tokenizer
//! that tracks string literals and bracket depth. Anything the tokenizer
//! cannot represent faithfully (nested object types, an unterminated
//! block) is reported as [`QueryContract::Unsupported`] rather than
//! silently truncated.
//!
//! Extraction never fails: read errors and unsupported shapes are logged
//! and the route simply gets no query contract.

use regex::Regex;
use route_core::{QueryParamSpec, QueryType};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Largest route file scanned for a query contract (1MB).
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

static DECLARATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w$])(?:export\s+)?(?:interface\s+QueryParams\b|type\s+QueryParams\s*=)")
        .expect("valid regex")
});
static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)^(?:readonly\s+)?(?:([A-Za-z_$][\w$]*)|"([^"]+)"|'([^']+)')\s*(\?)?\s*:\s*(.+)$"#,
    )
    .expect("valid regex")
});
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Outcome of looking for a query contract in one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryContract {
    /// No `QueryParams` declaration present
    Absent,
    /// A declaration with its fields in source order
    Declared(Vec<QueryParamSpec>),
    /// A declaration exists but its shape cannot be represented
    Unsupported {
        /// Why the contract was rejected
        reason: String,
    },
}

impl QueryContract {
    /// Converts the contract into the optional field list stored on a
    /// route entry. Empty and unsupported contracts yield `None`.
    #[must_use]
    pub fn into_fields(self) -> Option<Vec<QueryParamSpec>> {
        match self {
            Self::Declared(fields) if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }

    /// Returns `true` for [`QueryContract::Unsupported`].
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Extracts the query contract declared in `source`.
///
/// # Examples
///
/// ```
/// use route_scan::{QueryContract, extract_query};
///
/// let source = "export interface QueryParams { q: string; page?: number }";
/// let QueryContract::Declared(fields) = extract_query(source) else {
///     panic!("expected a declared contract");
/// };
/// assert_eq!(fields.len(), 2);
/// assert!(fields[1].optional);
///
/// assert_eq!(extract_query("export default function Page() {}"), QueryContract::Absent);
/// ```
#[must_use]
pub fn extract_query(source: &str) -> QueryContract {
    let source = strip_comments(source);
    let Some(decl) = DECLARATION_REGEX.find(&source) else {
        return QueryContract::Absent;
    };

    let after = &source[decl.end()..];
    let Some(open) = after.find('{') else {
        return unsupported("missing body");
    };

    let is_type_alias = decl.as_str().trim_end().ends_with('=');
    if is_type_alias && !after[..open].trim().is_empty() {
        return unsupported("not an object literal type");
    }

    match split_fields(&after[open + 1..]) {
        Ok(raw_fields) => QueryContract::Declared(
            raw_fields.iter().filter_map(|raw| parse_field(raw)).collect(),
        ),
        Err(reason) => unsupported(reason),
    }
}

/// Reads `path` and extracts its query contract.
///
/// Unreadable files are logged and treated as [`QueryContract::Absent`].
#[must_use]
pub fn extract_query_from_file(path: &Path) -> QueryContract {
    match fs::metadata(path) {
        Ok(metadata) if metadata.len() > MAX_FILE_SIZE => {
            return unsupported("file too large");
        }
        Ok(_) => {}
        Err(e) => {
            warn!("Cannot stat {}: {e}", path.display());
            return QueryContract::Absent;
        }
    }

    match fs::read_to_string(path) {
        Ok(source) => extract_query(&source),
        Err(e) => {
            warn!("Cannot read {}: {e}", path.display());
            QueryContract::Absent
        }
    }
}

fn unsupported(reason: &str) -> QueryContract {
    QueryContract::Unsupported {
        reason: reason.to_string(),
    }
}

/// Splits a declaration body (text after the opening brace) into raw
/// field texts.
///
/// Fields end at `;`, at `,` outside brackets, or at a newline outside
/// brackets unless the type continues with a leading or trailing `|`/`&`.
fn split_fields(body: &str) -> Result<Vec<String>, &'static str> {
    let chars: Vec<char> = body.chars().collect();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(q) = quote {
            current.push(c);
            if c == '\n' && q != '`' {
                quote = None;
            } else if c == '\\' {
                if let Some(&next) = chars.get(i + 1) {
                    current.push(next);
                    i += 1;
                }
            } else if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match c {
            '"' | '\'' | '`' => {
                quote = Some(c);
                current.push(c);
            }
            '{' => return Err("nested braces"),
            '}' if depth == 0 => {
                fields.push(std::mem::take(&mut current));
                return Ok(fields.into_iter().filter(|f| !f.trim().is_empty()).collect());
            }
            '(' | '[' | '<' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '>' if depth > 0 => {
                depth -= 1;
                current.push(c);
            }
            ';' => fields.push(std::mem::take(&mut current)),
            ',' if depth == 0 => fields.push(std::mem::take(&mut current)),
            '\n' if depth == 0 => {
                if continues_on_next_line(&current, &chars[i + 1..]) {
                    current.push(' ');
                } else {
                    fields.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
        i += 1;
    }

    Err("unterminated block")
}

fn continues_on_next_line(current: &str, rest: &[char]) -> bool {
    let trimmed = current.trim_end();
    if trimmed.trim_start().is_empty() {
        return true;
    }
    if trimmed.ends_with(['|', '&', ':']) || trimmed.ends_with("=>") {
        return true;
    }
    rest.iter()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| matches!(c, '|' | '&'))
}

fn parse_field(raw: &str) -> Option<QueryParamSpec> {
    let raw = raw.trim();
    let Some(caps) = FIELD_REGEX.captures(raw) else {
        debug!("Skipping unrecognized query field: {raw}");
        return None;
    };

    let name = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str();
    let optional = caps.get(4).is_some();
    let ty = WHITESPACE_REGEX.replace_all(caps[5].trim(), " ");
    let ty = ty.trim_start_matches('|').trim();

    Some(QueryParamSpec::new(name, QueryType::from_text(ty), optional))
}

/// Replaces `//` and `/* */` comments with whitespace, keeping newlines
/// and leaving string literals intact.
fn strip_comments(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if let Some(q) = quote {
            out.push(c);
            if c == '\n' && q != '`' {
                quote = None;
            } else if c == '\\' {
                if let Some(n) = next {
                    out.push(n);
                    i += 1;
                }
            } else if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match (c, next) {
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                continue;
            }
            ('/', Some('*')) => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    if chars[i] == '\n' {
                        out.push('\n');
                    }
                    i += 1;
                }
                i += 2;
                out.push(' ');
                continue;
            }
            ('"' | '\'' | '`', _) => {
                quote = Some(c);
                out.push(c);
            }
            _ => out.push(c),
        }
        i += 1;
    }

    out
}
