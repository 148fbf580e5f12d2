//! Output formatters for CLI commands.
//!
//! Every command builds a serializable summary and hands it to
//! [`format_output`], so `--format` behaves the same everywhere.

use anyhow::Result;
use colored::Colorize;
use route_core::cli::OutputFormat;
use serde::Serialize;

/// Formats `data` according to `format`.
///
/// # Errors
///
/// Returns an error if `data` cannot be serialized.
///
/// # Examples
///
/// ```
/// use route_cli::formatters::format_output;
/// use route_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     routes: usize,
///     output: String,
/// }
///
/// let summary = Summary { routes: 4, output: "src/routes.ts".to_string() };
///
/// let json = format_output(&summary, OutputFormat::Json)?;
/// assert!(json.contains("\"routes\": 4"));
///
/// let text = format_output(&summary, OutputFormat::Text)?;
/// assert_eq!(text, "output=src/routes.ts\nroutes=4");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Formats data as single-line JSON.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Plain text output formatting.
///
/// One `path=value` line per scalar, where `path` joins object keys and
/// array indices with dots. Object keys are sorted.
pub mod text {
    use super::{Result, Serialize};
    use serde_json::Value;

    /// Formats data as flattened `path=value` lines.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten(&value, "", &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(value: &Value, path: &str, lines: &mut Vec<String>) {
        let child = |key: &str| {
            if path.is_empty() {
                key.to_string()
            } else {
                format!("{path}.{key}")
            }
        };

        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, val) in map {
                    flatten(val, &child(key), lines);
                }
            }
            Value::Array(items) if !items.is_empty() => {
                for (i, item) in items.iter().enumerate() {
                    flatten(item, &child(&i.to_string()), lines);
                }
            }
            Value::Object(_) | Value::Array(_) => lines.push(format!("{path}=")),
            Value::String(s) => lines.push(format!("{path}={s}")),
            other => lines.push(format!("{path}={other}")),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Formats data as an indented, colorized outline.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        match &value {
            Value::Object(_) | Value::Array(_) => write_nested(&value, 0, &mut out),
            scalar => out.push_str(&scalar_text(scalar)),
        }
        Ok(out.trim_end().to_string())
    }

    fn write_nested(value: &Value, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    let label = format!("{indent}{}:", key.blue().bold());
                    write_field(&label, val, depth, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    let label = format!("{indent}{}", "-".dimmed());
                    write_field(&label, item, depth, out);
                }
            }
            scalar => {
                out.push_str(&indent);
                out.push_str(&scalar_text(scalar));
                out.push('\n');
            }
        }
    }

    fn write_field(label: &str, value: &Value, depth: usize, out: &mut String) {
        out.push_str(label);
        match value {
            Value::Object(map) if !map.is_empty() => {
                out.push('\n');
                write_nested(value, depth + 1, out);
            }
            Value::Array(items) if !items.is_empty() => {
                out.push('\n');
                write_nested(value, depth + 1, out);
            }
            other => {
                out.push(' ');
                out.push_str(&scalar_text(other));
                out.push('\n');
            }
        }
    }

    fn scalar_text(value: &Value) -> String {
        match value {
            Value::Null => "none".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(_) => "[]".dimmed().to_string(),
            Value::Object(_) => "{}".dimmed().to_string(),
        }
    }
}
