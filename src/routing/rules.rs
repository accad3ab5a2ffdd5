//! Ordered gate rules.
//!
//! # Responsibilities
//! - Store rules as (matcher, action) pairs in evaluation order
//! - Return the action of the first matching rule, or the fallback
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins; the fallback is explicit rather than implied

use axum::body::Body;
use axum::http::Request;

use crate::locale::Locale;
use crate::routing::matcher::{
    AnyMatcher, ExactPathMatcher, Matcher, PathPrefixMatcher, StaticAssetMatcher,
};

/// What the auth gate does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Forward without consulting the identity provider.
    PassThrough,
    /// Answer with a temporary redirect to the given location.
    Redirect(String),
    /// Let the identity provider decide.
    Delegate,
}

#[derive(Debug)]
pub struct GateRule {
    pub name: &'static str,
    matcher: Box<dyn Matcher>,
    pub action: GateAction,
}

/// Rule list evaluated by the auth gate.
#[derive(Debug)]
pub struct GateRules {
    rules: Vec<GateRule>,
    fallback: GateAction,
}

impl GateRules {
    /// Empty rule list with the given fallback action.
    pub fn new(fallback: GateAction) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule. Earlier rules take precedence.
    pub fn rule(mut self, name: &'static str, matcher: impl Matcher + 'static, action: GateAction) -> Self {
        self.rules.push(GateRule {
            name,
            matcher: Box::new(matcher),
            action,
        });
        self
    }

    /// The site's rule set:
    /// 1. API and RPC paths are always delegated
    /// 2. static assets and framework-internal paths pass through
    /// 3. the bare root redirects to the default-locale home
    /// 4. everything else is delegated
    pub fn standard(default_locale: Locale) -> Self {
        Self::new(GateAction::Delegate)
            .rule(
                "api",
                AnyMatcher::new(vec![
                    Box::new(PathPrefixMatcher::new("/api/")),
                    Box::new(ExactPathMatcher::new("/api")),
                    Box::new(PathPrefixMatcher::new("/trpc/")),
                ]),
                GateAction::Delegate,
            )
            .rule(
                "static",
                AnyMatcher::new(vec![
                    Box::new(PathPrefixMatcher::new("/_next/")),
                    Box::new(PathPrefixMatcher::new("/static/")),
                    Box::new(PathPrefixMatcher::new("/assets/")),
                    Box::new(StaticAssetMatcher),
                ]),
                GateAction::PassThrough,
            )
            .rule(
                "root",
                ExactPathMatcher::new("/"),
                GateAction::Redirect(format!("/{}", default_locale)),
            )
    }

    /// Action for `req` and the name of the rule that produced it
    /// (`"fallback"` when none matched).
    pub fn evaluate(&self, req: &Request<Body>) -> (&'static str, &GateAction) {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(req))
            .map(|rule| (rule.name, &rule.action))
            .unwrap_or(("fallback", &self.fallback))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::DEFAULT_LOCALE;

    fn action_for(rules: &GateRules, uri: &str) -> GateAction {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        rules.evaluate(&req).1.clone()
    }

    #[test]
    fn test_standard_rules() {
        let rules = GateRules::standard(DEFAULT_LOCALE);
        assert_eq!(rules.len(), 3);

        assert_eq!(action_for(&rules, "/"), GateAction::Redirect("/en".into()));
        assert_eq!(action_for(&rules, "/favicon.ico"), GateAction::PassThrough);
        assert_eq!(action_for(&rules, "/_next/static/chunk"), GateAction::PassThrough);
        assert_eq!(action_for(&rules, "/en/dashboard"), GateAction::Delegate);
        assert_eq!(action_for(&rules, "/en"), GateAction::Delegate);
    }

    #[test]
    fn test_api_paths_always_delegated() {
        let rules = GateRules::standard(DEFAULT_LOCALE);
        // Would otherwise look like a static asset
        assert_eq!(action_for(&rules, "/api/export.csv"), GateAction::Delegate);
        assert_eq!(action_for(&rules, "/trpc/faq.list"), GateAction::Delegate);
    }

    #[test]
    fn test_first_match_wins() {
        let rules = GateRules::new(GateAction::Delegate)
            .rule("a", PathPrefixMatcher::new("/x"), GateAction::PassThrough)
            .rule("b", PathPrefixMatcher::new("/x/y"), GateAction::Redirect("/z".into()));

        let req = Request::builder().uri("/x/y").body(Body::empty()).unwrap();
        assert_eq!(rules.evaluate(&req), ("a", &GateAction::PassThrough));

        let req = Request::builder().uri("/other").body(Body::empty()).unwrap();
        assert_eq!(rules.evaluate(&req).0, "fallback");
    }

    #[test]
    fn test_redirect_uses_configured_locale() {
        let rules = GateRules::standard(Locale::parse("ar").unwrap());
        assert_eq!(action_for(&rules, "/"), GateAction::Redirect("/ar".into()));
    }
}
