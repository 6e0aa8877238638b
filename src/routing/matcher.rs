//! Route matching logic.
//!
//! # Responsibilities
//! - Build the `<METHOD><path>` candidate from a request
//! - Test the candidate against a route's compiled Ant pattern
//!
//! # Design Decisions
//! - Method and path are matched as one string; the method is the first segment
//! - Path matching is case-sensitive, the method is uppercased
//! - No regex: patterns are matched by a segment walk with `**` backtracking

use axum::body::Body;
use axum::http::Request;

use crate::pattern::Pattern;
use crate::routing::path;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches the request method and path against an Ant pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
}

impl PatternMatcher {
    /// Create a matcher for `method` + `path`.
    /// The path is normalized and the method uppercased before compiling.
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            pattern: Pattern::compile(path::candidate(method, path)),
        }
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Match a prebuilt candidate string.
    pub fn matches_candidate(&self, candidate: &str) -> bool {
        self.pattern.matches(candidate)
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        let candidate = path::candidate(req.method().as_str(), req.uri().path());
        self.matches_candidate(&candidate)
    }
}
