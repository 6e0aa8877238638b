//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Look up the first route matching a request
//! - Return the matched route or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) pattern scan (acceptable for typical route counts)
//! - First match wins; order is the order routes were configured in
//! - Explicit `None` rather than a silent default route

use axum::body::Body;
use axum::http::Request;
use serde::Serialize;

use crate::config::RouteConfig;
use crate::routing::matcher::{Matcher, PatternMatcher};
use crate::routing::path;

/// Static response served when a route matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

/// A compiled route.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    /// Route identifier for logging/metrics.
    pub name: String,
    /// Uppercased method token, or `*` for any method.
    pub method: String,
    /// Normalized path pattern.
    pub path: String,
    pub response: RouteResponse,
    #[serde(skip)]
    matcher: PatternMatcher,
}

impl Route {
    pub fn new(
        name: impl Into<String>,
        method: &str,
        path: &str,
        response: RouteResponse,
    ) -> Self {
        let method = method.to_ascii_uppercase();
        let path = path::normalize(path).into_owned();
        let matcher = PatternMatcher::new(&method, &path);

        Self {
            name: name.into(),
            method,
            path,
            response,
            matcher,
        }
    }

    /// The compiled `<METHOD><path>` pattern text.
    pub fn pattern(&self) -> &str {
        self.matcher.pattern().as_str()
    }

    /// True if the route has no wildcards in its method or path.
    pub fn is_literal(&self) -> bool {
        self.matcher.pattern().is_literal()
    }

    /// Match a prebuilt candidate string.
    pub fn matches_candidate(&self, candidate: &str) -> bool {
        self.matcher.matches_candidate(candidate)
    }
}

impl From<&RouteConfig> for Route {
    fn from(config: &RouteConfig) -> Self {
        Route::new(
            config.name.clone(),
            &config.method,
            &config.pattern,
            RouteResponse {
                status: config.status,
                content_type: config.content_type.clone(),
                body: config.body.clone(),
            },
        )
    }
}

impl Matcher for Route {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matcher.matches(req)
    }
}

/// Ordered route table.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Compile a route table from configuration, preserving order.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        Self::new(routes.iter().map(Route::from).collect())
    }

    /// First route whose pattern matches `candidate`.
    pub fn find(&self, candidate: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.matches_candidate(candidate))
    }

    /// First route matching `method` and `path`.
    pub fn resolve(&self, method: &str, path: &str) -> Option<&Route> {
        self.find(&path::candidate(method, path))
    }

    /// First route matching the request.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(req))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, method: &str, path: &str) -> Route {
        Route::new(
            name,
            method,
            path,
            RouteResponse {
                status: 200,
                content_type: "text/plain".into(),
                body: name.into(),
            },
        )
    }

    fn names(router: &Router, method: &str, path: &str) -> Option<String> {
        router.resolve(method, path).map(|r| r.name.clone())
    }

    #[test]
    fn test_first_match_wins() {
        let router = Router::new(vec![
            route("exact", "GET", "/api/users/me"),
            route("one", "GET", "/api/users/*"),
            route("any", "*", "/api/**"),
        ]);

        assert_eq!(names(&router, "GET", "/api/users/me").as_deref(), Some("exact"));
        assert_eq!(names(&router, "GET", "/api/users/42").as_deref(), Some("one"));
        assert_eq!(names(&router, "DELETE", "/api/users/42").as_deref(), Some("any"));
        assert_eq!(names(&router, "GET", "/api").as_deref(), Some("any"));
        assert_eq!(names(&router, "GET", "/other"), None);
    }

    #[test]
    fn test_route_normalizes_method_and_path() {
        let r = route("docs", "get", "docs//index.html/");
        assert_eq!(r.method, "GET");
        assert_eq!(r.path, "/docs/index.html");
        assert_eq!(r.pattern(), "GET/docs/index.html");
    }

    #[test]
    fn test_match_request() {
        let router = Router::new(vec![route("js", "GET", "/**/*.js")]);

        let req = Request::builder()
            .uri("/js/lib/jquery.js")
            .body(Body::default())
            .unwrap();
        assert_eq!(router.match_request(&req).map(|r| r.name.as_str()), Some("js"));

        let req = Request::builder()
            .method("PUT")
            .uri("/f1.js")
            .body(Body::default())
            .unwrap();
        assert!(router.match_request(&req).is_none());
    }

    #[test]
    fn test_from_config() {
        let configs: Vec<RouteConfig> = vec![
            RouteConfig {
                name: "a".into(),
                method: "GET".into(),
                pattern: "/a/**".into(),
                status: 201,
                body: "A".into(),
                content_type: "text/plain".into(),
            },
            RouteConfig {
                name: "b".into(),
                method: "*".into(),
                pattern: "/**".into(),
                status: 200,
                body: "B".into(),
                content_type: "text/plain".into(),
            },
        ];
        let router = Router::from_config(&configs);

        assert_eq!(router.len(), 2);
        let matched = router.resolve("GET", "/a/b/c").unwrap();
        assert_eq!(matched.name, "a");
        assert_eq!(matched.response.status, 201);
        assert_eq!(router.resolve("POST", "/a/b").unwrap().name, "b");
    }

    #[test]
    fn test_empty_router() {
        let router = Router::default();
        assert!(router.is_empty());
        assert!(router.resolve("GET", "/").is_none());
    }
}
