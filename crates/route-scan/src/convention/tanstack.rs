//! TanStack Router file-based convention.

use super::{RouteConvention, basename, flat_route_tokens, param_marker};
use route_core::Result;

/// `posts.$postId.tsx` → `/posts/:postId`, `{-$lang}` → `:lang?`,
/// `$` → `:splat*`.
///
/// `__root` is the layout shell and files or folders prefixed with `-`
/// are ignored by the router, so neither is routable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TanStackConvention;

impl RouteConvention for TanStackConvention {
    fn rewrite_relative(&self, relative: &str) -> Result<String> {
        let mut tokens = flat_route_tokens(relative);
        if tokens.len() > 1 && tokens.last().is_some_and(|t| t == "route") {
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

    fn is_routable(&self, relative: &str) -> bool {
        basename(relative) != "__root" && !relative.split('/').any(|s| s.starts_with('-'))
    }
}

fn rewrite_token(relative: &str, token: &str) -> Result<Option<String>> {
    if token.starts_with('_') {
        return Ok(None);
    }

    let token = token.strip_suffix('_').unwrap_or(token);
    let rewritten = if token == "$" {
        ":splat*".to_string()
    } else if let Some(name) = token.strip_prefix("{-$").and_then(|t| t.strip_suffix('}')) {
        param_marker(relative, name, "?")?
    } else if let Some(name) = token.strip_prefix('$') {
        param_marker(relative, name, "")?
    } else {
        token.chars().filter(|c| *c != '[' && *c != ']').collect()
    };

    Ok((!rewritten.is_empty()).then_some(rewritten))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rw(relative: &str) -> String {
        TanStackConvention.rewrite_relative(relative).unwrap()
    }

    #[test]
    fn test_flat_and_directory_routes() {
        assert_eq!(rw("posts.$postId"), "posts/:postId");
        assert_eq!(rw("posts/$postId"), "posts/:postId");
        assert_eq!(rw("posts/index"), "posts/index");
        assert_eq!(rw("posts/route"), "posts");
        assert_eq!(rw("posts.route"), "posts");
    }

    #[test]
    fn test_pathless_layouts() {
        assert_eq!(rw("_layout.dashboard"), "dashboard");
        assert_eq!(rw("posts_.$postId.edit"), "posts/:postId/edit");
    }

    #[test]
    fn test_splat_and_optional() {
        assert_eq!(rw("files.$"), "files/:splat*");
        assert_eq!(rw("{-$lang}.about"), ":lang?/about");
    }

    #[test]
    fn test_invalid_param_names() {
        let err = TanStackConvention.rewrite_relative("posts.$post-id").unwrap_err();
        assert!(err.is_invalid_param_name());
        assert!(TanStackConvention.rewrite_relative("{-$}.about").is_err());
    }

    #[test]
    fn test_root_and_ignored_files() {
        let c = TanStackConvention;
        assert!(!c.is_routable("__root"));
        assert!(!c.is_routable("posts/-components/card"));
        assert!(c.is_routable("posts.$postId"));
    }
}
