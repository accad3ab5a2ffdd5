//! Request path matching.
//!
//! # Responsibilities
//! - Match exact paths and path prefixes (case-sensitive)
//! - Recognize static assets by file extension
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching

use axum::body::Body;
use axum::http::Request;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches one exact path.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        req.uri().path() == self.path
    }
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        req.uri().path().starts_with(&self.prefix)
    }
}

/// Matches paths whose last segment carries a file extension
/// (`/images/logo.png`, `/favicon.ico`).
#[derive(Debug, Clone, Default)]
pub struct StaticAssetMatcher;

impl Matcher for StaticAssetMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        has_file_extension(req.uri().path())
    }
}

fn has_file_extension(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or("");
    match last.rfind('.') {
        // Leading dot (".well-known") is a hidden name, not an extension.
        Some(idx) if idx > 0 => idx + 1 < last.len(),
        _ => false,
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matchers.iter().any(|m| m.matches(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::default()).unwrap()
    }

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPathMatcher::new("/");
        assert!(matcher.matches(&req("http://example.com/")));
        assert!(matcher.matches(&req("/?utm=1")));
        assert!(!matcher.matches(&req("/en")));
    }

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api/");

        assert!(matcher.matches(&req("http://example.com/api/faq")));
        assert!(!matcher.matches(&req("http://example.com/apis")));
        assert!(!matcher.matches(&req("http://example.com/API/faq")));
    }

    #[test]
    fn test_static_asset_matcher() {
        let matcher = StaticAssetMatcher;
        assert!(matcher.matches(&req("/favicon.ico")));
        assert!(matcher.matches(&req("/images/hero.webp")));
        assert!(!matcher.matches(&req("/en/faq")));
        assert!(!matcher.matches(&req("/.well-known")));
        assert!(!matcher.matches(&req("/file.")));
        assert!(!matcher.matches(&req("/v1.2/")));
    }

    #[test]
    fn test_any_matcher() {
        let matcher = AnyMatcher::new(vec![
            Box::new(PathPrefixMatcher::new("/_next/")),
            Box::new(StaticAssetMatcher),
        ]);
        assert!(matcher.matches(&req("/_next/data")));
        assert!(matcher.matches(&req("/logo.svg")));
        assert!(!matcher.matches(&req("/en")));
    }
}
