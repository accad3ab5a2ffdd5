//! JSON API handlers under `/api`.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::{cleared_session_cookie, session_token};
use crate::http::response::{self, ApiError};
use crate::http::server::AppState;

/// `GET /api/faq`
pub async fn list_faqs(State(state): State<AppState>) -> Result<Response, ApiError> {
    let faqs = state.faqs.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch FAQ list");
        ApiError::internal("Failed to fetch FAQ list")
    })?;
    Ok(response::data(faqs).into_response())
}

/// `GET /api/debug/locations`
pub async fn debug_locations(State(state): State<AppState>) -> Result<Response, ApiError> {
    let locations = state.locations.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch locations");
        ApiError::internal("Failed to fetch locations")
    })?;
    Ok(response::counted(&locations).into_response())
}

/// `GET|POST /api/auth/logout`
///
/// The session cookie is cleared even when the provider fails to end the
/// session.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = session_token(&headers);
    let cleared = [(header::SET_COOKIE, cleared_session_cookie().to_string())];

    match state.identity.sign_out(token.as_deref()).await {
        Ok(()) => (cleared, response::message("Logged out successfully")).into_response(),
        Err(e) => {
            tracing::error!(provider = state.identity.name(), error = %e, "Logout failed");
            (cleared, ApiError::internal("Logout failed")).into_response()
        }
    }
}

/// `GET /api/webhooks/ping-search`
pub async fn ping_search(State(state): State<AppState>) -> Response {
    match state.pinger.ping_all().await {
        Ok(outcomes) => {
            tracing::info!(
                sitemap = %state.pinger.sitemap_url(),
                google = outcomes[0].status,
                bing = outcomes[1].status,
                "Sitemap ping delivered"
            );
            response::message("Search engines pinged successfully").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to ping search engines");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to ping search engines" })),
            )
                .into_response()
        }
    }
}

/// `GET /api/payments/config`
pub async fn payment_config(State(state): State<AppState>) -> Result<Response, ApiError> {
    let client = state.payments.get().map_err(|e| {
        tracing::error!(error = %e, "Payment client unavailable");
        ApiError::internal("Payment provider is not configured")
    })?;
    Ok(response::data(client.as_ref()).into_response())
}

/// `GET /api/health`
pub async fn health() -> Json<serde_json::Value> {
    response::message("ok")
}
