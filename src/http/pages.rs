//! HTML page handlers and generated text files.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::CurrentSession;
use crate::http::server::AppState;
use crate::layout::{pages, render_document};
use crate::locale::{resolve_locale, t, Locale, Msg};
use crate::seo::{render_robots, render_sitemap};

fn page(locale: Locale, title: &str, body: String) -> Response {
    Html(render_document(locale, title, &body)).into_response()
}

fn not_found_page(locale: Locale) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(render_document(locale, t(locale, Msg::NotFoundHeading), &pages::not_found(locale))),
    )
        .into_response()
}

fn error_page(locale: Locale, path: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render_document(locale, t(locale, Msg::ErrorHeading), &pages::error(locale, path))),
    )
        .into_response()
}

/// The `{locale}` path segment, or the 404 page if it is not a locale code.
fn page_locale(segment: &str) -> Result<Locale, Response> {
    Locale::parse(segment).ok_or_else(|| not_found_page(resolve_locale(segment)))
}

/// `GET /`. Normally answered by the auth gate; kept for routers built
/// without it.
pub async fn root(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&format!("/{}", state.default_locale()))
}

pub async fn home(Path(segment): Path<String>) -> Response {
    match page_locale(&segment) {
        Ok(locale) => page(locale, t(locale, Msg::NavHome), pages::home(locale)),
        Err(response) => response,
    }
}

pub async fn faq(State(state): State<AppState>, Path(segment): Path<String>, uri: Uri) -> Response {
    let locale = match page_locale(&segment) {
        Ok(locale) => locale,
        Err(response) => return response,
    };

    match state.faqs.list().await {
        Ok(faqs) => page(
            locale,
            t(locale, Msg::FaqHeading),
            pages::faq(locale, &faqs, &state.sanitizer),
        ),
        Err(e) => {
            tracing::error!(error = %e, path = %uri.path(), "Failed to render FAQ page");
            error_page(locale, uri.path())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    redirect_url: Option<String>,
}

pub async fn login(Path(segment): Path<String>, Query(query): Query<LoginQuery>) -> Response {
    match page_locale(&segment) {
        Ok(locale) => page(
            locale,
            t(locale, Msg::LoginHeading),
            pages::login(locale, query.redirect_url.as_deref()),
        ),
        Err(response) => response,
    }
}

pub async fn register(Path(segment): Path<String>) -> Response {
    match page_locale(&segment) {
        Ok(locale) => page(locale, t(locale, Msg::RegisterHeading), pages::register(locale)),
        Err(response) => response,
    }
}

pub async fn dashboard(
    Path(segment): Path<String>,
    CurrentSession(session): CurrentSession,
) -> Response {
    match page_locale(&segment) {
        Ok(locale) => page(
            locale,
            t(locale, Msg::DashboardHeading),
            pages::dashboard(locale, session.as_ref()),
        ),
        Err(response) => response,
    }
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> Response {
    not_found_page(resolve_locale(uri.path()))
}

/// `GET /robots.txt`
pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&state.config.site),
    )
}

/// `GET /sitemap.xml`
pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&state.config.site, Utc::now().date_naive()),
    )
}
