//! Remix v2 flat-routes convention.

use super::{RouteConvention, flat_route_tokens, param_marker};
use route_core::Result;

/// Flat routes: `blog.$slug.tsx` and `blog.$slug/route.tsx` both map to
/// `/blog/:slug`.
///
/// | Token      | Result           |
/// |------------|------------------|
/// | `_index`   | `index`          |
/// | `_auth`    | dropped          |
/// | `posts_`   | `posts`          |
/// | `$`        | `:splat*`        |
/// | `($lang)`  | `:lang?`         |
/// | `$id`      | `:id`            |
/// | `(static)` | `static`         |
/// | `[a.b]`    | `a.b` (escaped)  |
#[derive(Debug, Clone, Copy, Default)]
pub struct RemixConvention;

impl RouteConvention for RemixConvention {
    fn rewrite_relative(&self, relative: &str) -> Result<String> {
        let mut tokens = flat_route_tokens(relative);
        if relative.contains('/') && tokens.last().is_some_and(|t| t == "route") {
            tokens.pop();
        }

        let mut segments = Vec::with_capacity(tokens.len());
        for token in &tokens {
            if let Some(segment) = rewrite_token(relative, token)? {
                segments.push(segment);
            }
        }
        Ok(segments.join("/"))
    }
}

fn rewrite_token(relative: &str, token: &str) -> Result<Option<String>> {
    if token == "_index" {
        return Ok(Some("index".to_string()));
    }
    if token.starts_with('_') {
        return Ok(None);
    }

    let token = token.strip_suffix('_').unwrap_or(token);
    let rewritten = if token == "$" {
        ":splat*".to_string()
    } else if let Some(inner) = token.strip_prefix("($").and_then(|t| t.strip_suffix(')')) {
        param_marker(relative, inner, "?")?
    } else if let Some(name) = token.strip_prefix('$') {
        param_marker(relative, name, "")?
    } else if let Some(inner) = token.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        unescape(inner)
    } else {
        unescape(token)
    };

    Ok((!rewritten.is_empty()).then_some(rewritten))
}

fn unescape(token: &str) -> String {
    token.chars().filter(|c| *c != '[' && *c != ']').collect()
}
