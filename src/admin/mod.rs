//! Admin surface: FAQ management and session issuing behind a bearer key.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use self::auth::{admin_auth_middleware, AdminKey};
use self::handlers::*;
use crate::config::AdminConfig;
use crate::http::server::AppState;

pub fn admin_router(config: &AdminConfig) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/faqs", get(list_faqs).post(create_faq))
        .route("/admin/faqs/{id}", put(update_faq).delete(delete_faq))
        .route("/admin/sessions", post(issue_session))
        .route_layer(middleware::from_fn_with_state(
            AdminKey::new(&config.api_key),
            admin_auth_middleware,
        ))
}
