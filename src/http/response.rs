//! JSON envelope for API responses.
//!
//! Every API answer has the shape `{ success, data?, count?, message? }`.
//! Failures carry a fixed, user-safe message; the underlying error is
//! logged where it happens and never leaves the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::store::StoreError;

/// `{ success: true, data }`
pub fn data<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// `{ success: true, count, data }`
pub fn counted<T: Serialize>(items: &[T]) -> Json<Value> {
    Json(json!({ "success": true, "count": items.len(), "data": items }))
}

/// `{ success: true, message }`
pub fn message(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": message }))
}

/// An API failure: status plus a message safe to show to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a store error from an admin write. Validation and missing
    /// records are the caller's fault; everything else is ours.
    pub fn from_store(error: &StoreError, fallback: &str) -> Self {
        match error {
            StoreError::Validation { .. } => Self::new(StatusCode::BAD_REQUEST, error.to_string()),
            StoreError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "FAQ not found"),
            _ => Self::internal(fallback),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "success": false, "message": self.message })),
        )
            .into_response()
    }
}
