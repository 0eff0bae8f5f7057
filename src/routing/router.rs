//! Route lookup.
//!
//! # Responsibilities
//! - Name the three wiki routes and their URL shapes
//! - Look up the route and title for a request path
//! - Build redirect locations between routes
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Explicit NoMatch (`None`) rather than a silent default

use std::fmt;

use crate::routing::matcher::{Title, TitleMatcher};

/// One of the wiki's routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    View,
    Edit,
    Save,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::View, Route::Edit, Route::Save];

    pub fn as_str(self) -> &'static str {
        match self {
            Route::View => "view",
            Route::Edit => "edit",
            Route::Save => "save",
        }
    }

    /// Path template used when registering the route with axum.
    pub fn path_template(self) -> &'static str {
        match self {
            Route::View => "/view/{title}",
            Route::Edit => "/edit/{title}",
            Route::Save => "/save/{title}",
        }
    }

    /// Route named by a path's first segment, if any.
    pub fn from_segment(segment: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.as_str() == segment)
    }

    /// Value of the `Allow` header for this route.
    pub fn allowed_methods(self) -> &'static str {
        match self {
            Route::View | Route::Edit => "GET, HEAD",
            Route::Save => "POST",
        }
    }

    /// Concrete path of this route for a title, e.g. `/edit/FrontPage`.
    pub fn location(self, title: &Title) -> String {
        format!("/{}/{}", self.as_str(), title)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub title: Title,
}

/// Route table for the wiki.
#[derive(Debug, Clone, Default)]
pub struct Router {
    matcher: TitleMatcher,
}

impl Router {
    pub fn new() -> Self {
        Self {
            matcher: TitleMatcher::new(),
        }
    }

    /// Find the route and title for a request path.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        let (segment, title) = self.matcher.captures(path)?;
        let route = Route::from_segment(segment)?;
        Some(RouteMatch { route, title })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_each_route() {
        let router = Router::new();

        for route in Route::ALL {
            let path = format!("/{}/Home", route);
            let m = router.match_path(&path).unwrap();
            assert_eq!(m.route, route);
            assert_eq!(m.title.as_str(), "Home");
        }
    }

    #[test]
    fn test_no_match() {
        let router = Router::new();
        assert_eq!(router.match_path("/view/"), None);
        assert_eq!(router.match_path("/delete/foo"), None);
        assert_eq!(router.match_path("/view/bad name"), None);
    }

    #[test]
    fn test_from_segment() {
        assert_eq!(Route::from_segment("view"), Some(Route::View));
        assert_eq!(Route::from_segment("save"), Some(Route::Save));
        assert_eq!(Route::from_segment("VIEW"), None);
        assert_eq!(Route::from_segment(""), None);
    }

    #[test]
    fn test_location() {
        let router = Router::new();
        let m = router.match_path("/view/Home").unwrap();
        assert_eq!(Route::Edit.location(&m.title), "/edit/Home");
        assert_eq!(Route::View.location(&m.title), "/view/Home");
    }

    #[test]
    fn test_path_template_agrees_with_as_str() {
        for route in Route::ALL {
            assert_eq!(
                route.path_template(),
                format!("/{}/{{title}}", route.as_str())
            );
        }
    }
}
