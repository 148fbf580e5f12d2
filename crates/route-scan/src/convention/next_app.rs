//! Next.js `app/` directory convention.

use super::next_pages::substitute_brackets;
use super::{RouteConvention, basename};
use route_core::{Result, RouteRole};

/// Bracket segments as in `pages/`, plus App Router structure:
///
/// - `(group)` route groups and `@slot` parallel routes add no URL segment
/// - the role basename (`page`, `route`, `layout`, ...) is dropped
/// - only `page` and `route` files are routable
/// - `_private` folders are excluded from routing
#[derive(Debug, Clone, Copy, Default)]
pub struct NextAppConvention;

impl RouteConvention for NextAppConvention {
    fn rewrite_relative(&self, relative: &str) -> Result<String> {
        let mut segments: Vec<&str> = relative
            .split('/')
            .filter(|s| !s.is_empty())
            .filter(|s| !is_route_group(s) && !s.starts_with('@'))
            .collect();

        if segments.last().is_some_and(|s| RouteRole::is_role_stem(s)) {
            segments.pop();
        }

        substitute_brackets(relative, &segments.join("/"))
    }

    fn is_routable(&self, relative: &str) -> bool {
        let private = relative
            .split('/')
            .any(|segment| segment.starts_with('_'));
        !private && RouteRole::from_stem(basename(relative)).is_routable()
    }

    fn role(&self, relative: &str) -> Option<RouteRole> {
        Some(RouteRole::from_stem(basename(relative)))
    }
}

fn is_route_group(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('(') && segment.ends_with(')')
}
