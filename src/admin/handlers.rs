use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::IdentityError;
use crate::http::response::{self, ApiError};
use crate::http::server::AppState;
use crate::store::NewFaq;

/// Session lifetime when the request does not name one.
const DEFAULT_SESSION_MINUTES: i64 = 60 * 24;
/// Longest session lifetime that can be issued (one year).
const MAX_SESSION_MINUTES: i64 = 60 * 24 * 365;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub store: &'static str,
    pub identity_provider: &'static str,
    pub payments_loaded: bool,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        store: state.store_backend,
        identity_provider: state.identity.name(),
        payments_loaded: state.payments.is_loaded(),
    })
}

pub async fn list_faqs(State(state): State<AppState>) -> Result<Response, ApiError> {
    let faqs = state.faqs.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch FAQ list");
        ApiError::internal("Failed to fetch FAQ list")
    })?;
    Ok(response::counted(&faqs).into_response())
}

pub async fn create_faq(
    State(state): State<AppState>,
    Json(faq): Json<NewFaq>,
) -> Result<Response, ApiError> {
    let created = state.faqs.create(faq).await.map_err(|e| {
        tracing::warn!(error = %e, "FAQ create rejected");
        ApiError::from_store(&e, "Failed to create FAQ")
    })?;
    tracing::info!(id = %created.id, "FAQ created");
    Ok((StatusCode::CREATED, response::data(created)).into_response())
}

pub async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(faq): Json<NewFaq>,
) -> Result<Response, ApiError> {
    let updated = state.faqs.update(&id, faq).await.map_err(|e| {
        tracing::warn!(id = %id, error = %e, "FAQ update rejected");
        ApiError::from_store(&e, "Failed to update FAQ")
    })?;
    tracing::info!(id = %id, "FAQ updated");
    Ok(response::data(updated).into_response())
}

pub async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state.faqs.delete(&id).await.map_err(|e| {
        tracing::warn!(id = %id, error = %e, "FAQ delete rejected");
        ApiError::from_store(&e, "Failed to delete FAQ")
    })?;
    tracing::info!(id = %id, "FAQ deleted");
    Ok(response::message("FAQ deleted").into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSession {
    pub user_id: String,
    #[serde(default)]
    pub ttl_minutes: Option<i64>,
}

fn ttl_out_of_range() -> ApiError {
    ApiError::new(
        StatusCode::BAD_REQUEST,
        format!("ttlMinutes must be between 1 and {MAX_SESSION_MINUTES}"),
    )
}

/// Mint a session token, for providers that track sessions themselves.
pub async fn issue_session(
    State(state): State<AppState>,
    Json(request): Json<IssueSession>,
) -> Result<Response, ApiError> {
    let user_id = request.user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "userId must not be empty"));
    }
    let minutes = request.ttl_minutes.unwrap_or(DEFAULT_SESSION_MINUTES);
    let ttl = Some(minutes)
        .filter(|m| (1..=MAX_SESSION_MINUTES).contains(m))
        .and_then(Duration::try_minutes)
        .ok_or_else(ttl_out_of_range)?;

    match state.identity.issue_session(user_id, ttl).await {
        Ok(token) => {
            tracing::info!(user_id, "Session issued");
            Ok((
                StatusCode::CREATED,
                response::data(json!({ "token": token, "userId": user_id })),
            )
                .into_response())
        }
        Err(IdentityError::LifetimeOutOfRange) => Err(ttl_out_of_range()),
        Err(IdentityError::Unsupported(provider)) => Err(ApiError::new(
            StatusCode::NOT_IMPLEMENTED,
            format!("The {} identity provider does not issue sessions", provider),
        )),
        Err(e) => {
            tracing::error!(error = %e, "Failed to issue session");
            Err(ApiError::internal("Failed to issue session"))
        }
    }
}
