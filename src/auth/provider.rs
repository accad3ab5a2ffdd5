//! Identity providers consulted by the auth gate.
//!
//! The provider's decision is authoritative: the gate forwards, redirects
//! or blocks exactly as told, and treats a provider error as fatal to the
//! request.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::session::{session_token, Session};
use crate::config::IdentityConfig;
use crate::locale::{resolve_locale, Locale};

/// What the gate knows about a request when delegating.
#[derive(Debug, Clone)]
pub struct GateRequest {
    pub method: Method,
    pub path: String,
    pub locale: Locale,
    pub token: Option<String>,
}

impl GateRequest {
    pub fn from_request(req: &Request<Body>) -> Self {
        let path = req.uri().path().to_string();
        Self {
            method: req.method().clone(),
            locale: resolve_locale(&path),
            token: session_token(req.headers()),
            path,
        }
    }
}

/// Provider verdict for a delegated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Forward, attaching the session when there is one.
    Pass(Option<Session>),
    /// Send the caller elsewhere (typically the login page).
    Redirect(String),
    /// Refuse with the given status.
    Block(StatusCode),
}

/// Errors that can occur while talking to an identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Transport failure reaching the provider.
    #[error("identity provider unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Provider answered with a status we do not understand.
    #[error("identity provider returned status {0}")]
    UnexpectedStatus(u16),

    /// Provider does not support the operation.
    #[error("operation not supported by the {0} identity provider")]
    Unsupported(&'static str),

    /// Requested session lifetime cannot be represented.
    #[error("session lifetime out of range")]
    LifetimeOutOfRange,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Establish or validate the caller's session for a delegated request.
    async fn authorize(&self, request: &GateRequest) -> Result<GateDecision, IdentityError>;

    /// End the session behind `token`. Unknown or missing tokens are a no-op.
    async fn sign_out(&self, token: Option<&str>) -> Result<(), IdentityError>;

    /// Mint a session token for `user_id`, if the provider issues its own.
    async fn issue_session(&self, _user_id: &str, _ttl: Duration) -> Result<String, IdentityError> {
        Err(IdentityError::Unsupported(self.name()))
    }
}

/// Which locale-relative sections need a session, and where to log in.
#[derive(Debug, Clone)]
pub struct ProtectedSections {
    sections: Vec<String>,
    login_section: String,
}

impl ProtectedSections {
    pub fn new(sections: Vec<String>, login_section: impl Into<String>) -> Self {
        Self {
            sections,
            login_section: login_section.into(),
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(config.protected_sections.clone(), config.login_section.clone())
    }

    /// True for `/{locale}/{section}[/...]` and `/{section}[/...]`.
    pub fn is_protected(&self, path: &str) -> bool {
        let mut segments = path.trim_start_matches('/').split('/');
        let first = segments.next().unwrap_or("");
        let section = if Locale::parse(first).is_some() {
            segments.next().unwrap_or("")
        } else {
            first
        };
        self.sections.iter().any(|s| s == section)
    }

    /// Localized login URL that returns to `request.path` afterwards.
    pub fn login_redirect(&self, request: &GateRequest) -> String {
        let target: String = url::form_urlencoded::byte_serialize(request.path.as_bytes()).collect();
        format!(
            "/{}/{}?redirect_url={}",
            request.locale, self.login_section, target
        )
    }
}

/// Sessions tracked in-process.
pub struct CookieSessionProvider {
    sections: ProtectedSections,
    sessions: DashMap<String, Session>,
}

impl CookieSessionProvider {
    pub fn new(sections: ProtectedSections) -> Self {
        Self {
            sections,
            sessions: DashMap::new(),
        }
    }

    /// Make `token` a valid session token.
    pub fn register(&self, token: impl Into<String>, session: Session) {
        self.sessions.insert(token.into(), session);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop every session expired at `now`. Returns how many were dropped.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        before.saturating_sub(self.sessions.len())
    }

    fn lookup(&self, token: &str) -> Option<Session> {
        let session = self.sessions.get(token).map(|s| s.clone())?;
        if session.is_expired_at(Utc::now()) {
            self.sessions.remove(token);
            tracing::debug!(user_id = %session.user_id, "Dropped expired session");
            return None;
        }
        Some(session)
    }
}

#[async_trait]
impl IdentityProvider for CookieSessionProvider {
    fn name(&self) -> &'static str {
        "cookie"
    }

    async fn authorize(&self, request: &GateRequest) -> Result<GateDecision, IdentityError> {
        let session = request.token.as_deref().and_then(|t| self.lookup(t));

        if session.is_none() && self.sections.is_protected(&request.path) {
            return Ok(GateDecision::Redirect(self.sections.login_redirect(request)));
        }
        Ok(GateDecision::Pass(session))
    }

    async fn sign_out(&self, token: Option<&str>) -> Result<(), IdentityError> {
        if let Some((_, session)) = token.and_then(|t| self.sessions.remove(t)) {
            tracing::info!(user_id = %session.user_id, "Session signed out");
        }
        Ok(())
    }

    async fn issue_session(&self, user_id: &str, ttl: Duration) -> Result<String, IdentityError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(IdentityError::LifetimeOutOfRange)?;

        let purged = self.purge_expired(now);
        if purged > 0 {
            tracing::debug!(purged, "Purged expired sessions");
        }

        let token = Uuid::new_v4().simple().to_string();
        self.register(token.clone(), Session::new(user_id).expiring_at(expires_at));
        Ok(token)
    }
}

/// Sessions verified by an external HTTP endpoint.
///
/// Only protected sections are verified remotely; other paths pass
/// without a network call.
pub struct RemoteIdentityProvider {
    client: reqwest::Client,
    verify_url: String,
    revoke_url: Option<String>,
    sections: ProtectedSections,
}

impl RemoteIdentityProvider {
    pub fn new(
        client: reqwest::Client,
        verify_url: impl Into<String>,
        revoke_url: Option<String>,
        sections: ProtectedSections,
    ) -> Self {
        Self {
            client,
            verify_url: verify_url.into(),
            revoke_url,
            sections,
        }
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn authorize(&self, request: &GateRequest) -> Result<GateDecision, IdentityError> {
        if !self.sections.is_protected(&request.path) {
            return Ok(GateDecision::Pass(None));
        }
        let Some(token) = request.token.as_deref() else {
            return Ok(GateDecision::Redirect(self.sections.login_redirect(request)));
        };

        let response = self
            .client
            .get(&self.verify_url)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let session: Session = response.json().await?;
                Ok(GateDecision::Pass(Some(session)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Ok(GateDecision::Redirect(self.sections.login_redirect(request)))
            }
            status => Err(IdentityError::UnexpectedStatus(status.as_u16())),
        }
    }

    async fn sign_out(&self, token: Option<&str>) -> Result<(), IdentityError> {
        let (Some(url), Some(token)) = (self.revoke_url.as_deref(), token) else {
            return Ok(());
        };
        let response = self.client.post(url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            return Err(IdentityError::UnexpectedStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> ProtectedSections {
        ProtectedSections::new(vec!["dashboard".into()], "login")
    }

    fn gate_request(path: &str, token: Option<&str>) -> GateRequest {
        GateRequest {
            method: Method::GET,
            path: path.into(),
            locale: resolve_locale(path),
            token: token.map(String::from),
        }
    }

    #[test]
    fn test_protected_sections() {
        let s = sections();
        assert!(s.is_protected("/en/dashboard"));
        assert!(s.is_protected("/ar/dashboard/bookings"));
        assert!(s.is_protected("/dashboard/"));
        assert!(!s.is_protected("/en/faq"));
        assert!(!s.is_protected("/en/dashboards"));
        assert!(!s.is_protected("/api/faq"));
    }

    #[test]
    fn test_login_redirect_is_localized() {
        let url = sections().login_redirect(&gate_request("/ar/dashboard/trips", None));
        assert_eq!(url, "/ar/login?redirect_url=%2Far%2Fdashboard%2Ftrips");
    }

    #[tokio::test]
    async fn test_cookie_provider_redirects_without_session() {
        let provider = CookieSessionProvider::new(sections());
        let decision = provider.authorize(&gate_request("/en/dashboard", None)).await.unwrap();
        assert_eq!(
            decision,
            GateDecision::Redirect("/en/login?redirect_url=%2Fen%2Fdashboard".into())
        );

        let decision = provider.authorize(&gate_request("/en/faq", Some("bogus"))).await.unwrap();
        assert_eq!(decision, GateDecision::Pass(None));
    }

    #[tokio::test]
    async fn test_cookie_provider_passes_registered_session() {
        let provider = CookieSessionProvider::new(sections());
        provider.register("t1", Session::new("user-1"));

        let decision = provider.authorize(&gate_request("/en/dashboard", Some("t1"))).await.unwrap();
        assert_eq!(decision, GateDecision::Pass(Some(Session::new("user-1"))));
    }

    #[tokio::test]
    async fn test_cookie_provider_drops_expired_session() {
        let provider = CookieSessionProvider::new(sections());
        provider.register("old", Session::new("user-1").expiring_at(Utc::now() - Duration::minutes(1)));

        let decision = provider.authorize(&gate_request("/en/dashboard", Some("old"))).await.unwrap();
        assert!(matches!(decision, GateDecision::Redirect(_)));
        assert_eq!(provider.session_count(), 0);
    }

    #[tokio::test]
    async fn test_cookie_provider_sign_out_and_issue() {
        let provider = CookieSessionProvider::new(sections());
        let token = provider.issue_session("user-2", Duration::hours(1)).await.unwrap();
        assert_eq!(provider.session_count(), 1);

        provider.sign_out(Some(&token)).await.unwrap();
        assert_eq!(provider.session_count(), 0);

        // No-op for unknown and missing tokens
        provider.sign_out(Some("unknown")).await.unwrap();
        provider.sign_out(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_issue_session_purges_expired() {
        let provider = CookieSessionProvider::new(sections());
        provider.register("stale-1", Session::new("a").expiring_at(Utc::now() - Duration::minutes(5)));
        provider.register("stale-2", Session::new("b").expiring_at(Utc::now() - Duration::hours(2)));
        provider.register("forever", Session::new("c"));

        provider.issue_session("user-3", Duration::hours(1)).await.unwrap();
        assert_eq!(provider.session_count(), 2);
    }

    #[tokio::test]
    async fn test_issue_session_rejects_unrepresentable_lifetime() {
        let provider = CookieSessionProvider::new(sections());
        let result = provider.issue_session("user-4", Duration::days(100_000_000)).await;
        assert!(matches!(result, Err(IdentityError::LifetimeOutOfRange)));
        assert_eq!(provider.session_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_provider_skips_public_paths() {
        // Unroutable endpoint: any network call would fail the test.
        let provider = RemoteIdentityProvider::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/verify",
            None,
            sections(),
        );
        let decision = provider.authorize(&gate_request("/en/faq", Some("t"))).await.unwrap();
        assert_eq!(decision, GateDecision::Pass(None));

        let decision = provider.authorize(&gate_request("/en/dashboard", None)).await.unwrap();
        assert!(matches!(decision, GateDecision::Redirect(_)));

        assert!(provider.issue_session("u", Duration::hours(1)).await.is_err());
    }
}
