//! Request routing.
//!
//! Routes are a fixed table checked in order. Page routes carry a path
//! prefix and an action; the title is whatever follows the prefix and must
//! be ASCII alphanumeric, so files with any other name are unreachable
//! over HTTP even if present on disk.

use crate::storage::is_valid_title;

/// The three operations on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    View,
    Edit,
    Save,
}

/// Outcome of matching a request path against the route table.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    /// The root path, redirected to the front page.
    Root,
    /// A page operation on a validated title.
    Page { action: PageAction, title: &'a str },
    /// A static asset path, relative to the static directory.
    Static { rest: &'a str },
    NotFound,
}

/// Path prefix for static assets.
pub const STATIC_PREFIX: &str = "/static/";

/// Page routes, checked in order.
const PAGE_ROUTES: &[(&str, PageAction)] = &[
    ("/view/", PageAction::View),
    ("/edit/", PageAction::Edit),
    ("/save/", PageAction::Save),
];

/// Match a request path against the route table.
pub fn match_path(path: &str) -> RouteMatch<'_> {
    if path == "/" {
        return RouteMatch::Root;
    }

    if let Some(rest) = path.strip_prefix(STATIC_PREFIX) {
        return RouteMatch::Static { rest };
    }

    for (prefix, action) in PAGE_ROUTES {
        if let Some(title) = path.strip_prefix(prefix) {
            if is_valid_title(title) {
                return RouteMatch::Page {
                    action: *action,
                    title,
                };
            }
            // A page prefix with a bad title is a 404, not a fallthrough.
            return RouteMatch::NotFound;
        }
    }

    RouteMatch::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        assert_eq!(match_path("/"), RouteMatch::Root);
    }

    #[test]
    fn test_page_routes() {
        assert_eq!(
            match_path("/view/FrontPage"),
            RouteMatch::Page {
                action: PageAction::View,
                title: "FrontPage"
            }
        );
        assert_eq!(
            match_path("/edit/Page2"),
            RouteMatch::Page {
                action: PageAction::Edit,
                title: "Page2"
            }
        );
        assert_eq!(
            match_path("/save/x"),
            RouteMatch::Page {
                action: PageAction::Save,
                title: "x"
            }
        );
    }

    #[test]
    fn test_invalid_titles_rejected() {
        assert_eq!(match_path("/view/"), RouteMatch::NotFound);
        assert_eq!(match_path("/view/Front Page"), RouteMatch::NotFound);
        assert_eq!(match_path("/view/Front/Page"), RouteMatch::NotFound);
        assert_eq!(match_path("/view/page.txt"), RouteMatch::NotFound);
        assert_eq!(match_path("/save/../etc"), RouteMatch::NotFound);
    }

    #[test]
    fn test_unknown_paths_rejected() {
        assert_eq!(match_path("/bogus path!"), RouteMatch::NotFound);
        assert_eq!(match_path("/delete/FrontPage"), RouteMatch::NotFound);
        assert_eq!(match_path("/view"), RouteMatch::NotFound);
        assert_eq!(match_path(""), RouteMatch::NotFound);
    }

    #[test]
    fn test_static_paths() {
        assert_eq!(
            match_path("/static/style.css"),
            RouteMatch::Static { rest: "style.css" }
        );
        assert_eq!(
            match_path("/static/img/logo.png"),
            RouteMatch::Static {
                rest: "img/logo.png"
            }
        );
        // No trailing slash, no static route.
        assert_eq!(match_path("/static"), RouteMatch::NotFound);
    }
}
