//! Auth gate middleware.
//!
//! # Responsibilities
//! - Evaluate the ordered gate rules for every request
//! - Consult the identity provider for delegated requests
//! - Attach the resulting session to request extensions
//!
//! # Design Decisions
//! - The gate never mutates persisted state
//! - Provider errors are fatal to the request (500, handler not reached)
//! - Redirects are temporary (307) so clients re-check on every visit

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::provider::{GateDecision, GateRequest, IdentityProvider};
use crate::routing::{GateAction, GateRules};

/// State shared by every invocation of the gate.
#[derive(Clone)]
pub struct AuthGate {
    rules: Arc<GateRules>,
    provider: Arc<dyn IdentityProvider>,
}

impl AuthGate {
    pub fn new(rules: GateRules, provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            rules: Arc::new(rules),
            provider,
        }
    }

    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.provider
    }
}

pub async fn auth_gate_middleware(
    State(gate): State<AuthGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let (rule, action) = gate.rules.evaluate(&request);

    match action {
        GateAction::PassThrough => next.run(request).await,
        GateAction::Redirect(location) => {
            tracing::debug!(rule, path = %request.uri().path(), to = %location, "Gate redirect");
            Redirect::temporary(location).into_response()
        }
        GateAction::Delegate => {
            let gate_request = GateRequest::from_request(&request);
            match gate.provider.authorize(&gate_request).await {
                Ok(GateDecision::Pass(session)) => {
                    if let Some(session) = session {
                        request.extensions_mut().insert(session);
                    }
                    next.run(request).await
                }
                Ok(GateDecision::Redirect(location)) => {
                    tracing::debug!(
                        rule,
                        provider = gate.provider.name(),
                        path = %gate_request.path,
                        to = %location,
                        "Identity provider redirect"
                    );
                    Redirect::temporary(&location).into_response()
                }
                Ok(GateDecision::Block(status)) => {
                    tracing::info!(
                        provider = gate.provider.name(),
                        path = %gate_request.path,
                        status = status.as_u16(),
                        "Identity provider blocked request"
                    );
                    status.into_response()
                }
                Err(e) => {
                    tracing::error!(
                        provider = gate.provider.name(),
                        method = %gate_request.method,
                        path = %gate_request.path,
                        error = %e,
                        "Identity provider failed"
                    );
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
    }
}
