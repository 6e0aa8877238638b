//! Path normalization and candidate construction.
//!
//! Registered route paths and incoming request paths both go through
//! [`normalize`] so `/docs/`, `docs` and `//docs` all address the same route.

use std::borrow::Cow;

/// Normalize a request or route path.
///
/// - Ensures a leading `/`
/// - Collapses runs of `/`
/// - Drops a trailing `/` (except for the root)
///
/// Borrows when the input is already normal.
pub fn normalize(path: &str) -> Cow<'_, str> {
    if is_normal(path) {
        return Cow::Borrowed(path);
    }

    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    Cow::Owned(normalized)
}

fn is_normal(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains("//")
        && (path.len() == 1 || !path.ends_with('/'))
}

/// Build the `<METHOD><path>` string a route pattern is matched against.
pub fn candidate(method: &str, path: &str) -> String {
    let path = normalize(path);
    let mut candidate = String::with_capacity(method.len() + path.len());
    candidate.push_str(&method.to_ascii_uppercase());
    candidate.push_str(&path);
    candidate
}
