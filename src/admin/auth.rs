//! Bearer key check for the admin surface.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};

/// The configured admin API key.
#[derive(Clone)]
pub struct AdminKey(Arc<str>);

impl AdminKey {
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    fn matches(&self, authorization: &str) -> bool {
        authorization
            .strip_prefix("Bearer ")
            .map(|token| token == &*self.0)
            .unwrap_or(false)
    }
}

pub async fn admin_auth_middleware(
    State(key): State<AdminKey>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|value| key.matches(value))
        .unwrap_or(false);

    if authorized {
        return Ok(next.run(request).await);
    }

    tracing::warn!(path = %request.uri().path(), "Rejected admin request");
    Err(StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matching() {
        let key = AdminKey::new("s3cret");
        assert!(key.matches("Bearer s3cret"));
        assert!(!key.matches("Bearer wrong"));
        assert!(!key.matches("s3cret"));
        assert!(!key.matches("Basic s3cret"));
    }
}
