//! Dynamic parameter extraction from canonical route paths.

use regex::Regex;
use route_core::{Error, ParamSpec, Result};
use std::collections::HashSet;
use std::sync::LazyLock;

static PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z0-9_$]+)([*?])?").expect("valid regex"));

/// Extracts parameter specs from a canonical route path, left to right.
///
/// - `:name` is a required scalar
/// - `:name?` is an optional scalar
/// - `:name*` is an optional catch-all list
///
/// # Errors
///
/// Returns [`Error::DuplicateParam`] if a name appears more than once,
/// since the generated `params` record could not hold both values.
///
/// # Examples
///
/// ```
/// use route_scan::extract_params;
///
/// let params = extract_params("/shop/:category/:item").unwrap();
/// assert_eq!(params.len(), 2);
/// assert_eq!(params[0].name, "category");
/// assert!(!params[0].optional);
///
/// let params = extract_params("/docs/:slug*").unwrap();
/// assert!(params[0].is_catch_all());
///
/// assert!(extract_params("/about").unwrap().is_empty());
/// assert!(extract_params("/:id/x/:id").is_err());
/// ```
pub fn extract_params(route_path: &str) -> Result<Vec<ParamSpec>> {
    let mut seen = HashSet::new();
    let mut params = Vec::new();

    for caps in PARAM_REGEX.captures_iter(route_path) {
        let name = &caps[1];
        if !seen.insert(name.to_string()) {
            return Err(Error::DuplicateParam {
                route: route_path.to_string(),
                name: name.to_string(),
            });
        }

        let spec = match caps.get(2).map(|m| m.as_str()) {
            Some("*") => ParamSpec::catch_all(name),
            Some("?") => ParamSpec::optional_scalar(name),
            _ => ParamSpec::scalar(name),
        };
        params.push(spec);
    }

    Ok(params)
}
