//! API and generated-file tests against the in-process router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use tour_site::auth::{CookieSessionProvider, ProtectedSections, Session};
use tour_site::payments::{KeySource, PaymentClientLoader};
use tour_site::store::{Faq, Location, MemoryFaqRepository, MemoryLocationRepository};

mod common;
use common::*;

fn faq(id: &str, order: i32, age_minutes: i64) -> Faq {
    let at = Utc::now() - Duration::minutes(age_minutes);
    Faq {
        id: id.into(),
        question: format!("Question {id}?"),
        answer: format!("<p>Answer {id}</p>"),
        order,
        created_at: at,
        updated_at: at,
    }
}

#[tokio::test]
async fn test_faq_list_is_ordered() {
    let repo = MemoryFaqRepository::with_faqs(vec![
        faq("second-group", 2, 30),
        faq("older", 1, 20),
        faq("newer", 1, 10),
    ]);
    let app = app(test_state(test_config()).with_faqs(Arc::new(repo)));

    let response = get(&app, "/api/faq").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["newer", "older", "second-group"]);
    assert!(body["data"][0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_faq_list_failure() {
    let app = app(test_state(test_config()).with_faqs(Arc::new(FailingFaqRepository)));

    let response = get(&app, "/api/faq").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "success": false, "message": "Failed to fetch FAQ list" })
    );
}

#[tokio::test]
async fn test_debug_locations() {
    let repo = MemoryLocationRepository::new(vec![
        Location {
            id: "1".into(),
            name: "Jericho".into(),
            attributes: Default::default(),
        },
        Location {
            id: "2".into(),
            name: String::new(),
            attributes: Default::default(),
        },
    ]);
    let app = app(test_state(test_config()).with_locations(Arc::new(repo)));

    let body = body_json(get(&app, "/api/debug/locations").await).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["name"], "Jericho");
}

#[tokio::test]
async fn test_debug_locations_failure() {
    let app = app(test_state(test_config()).with_locations(Arc::new(FailingLocationRepository)));

    let response = get(&app, "/api/debug/locations").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "success": false, "message": "Failed to fetch locations" })
    );
}

#[tokio::test]
async fn test_debug_routes_can_be_hidden() {
    let mut config = test_config();
    config.debug.expose_routes = false;
    let app = app(test_state(config));

    assert_eq!(get(&app, "/api/debug/locations").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_clears_cookie_for_get_and_post() {
    let provider = Arc::new(CookieSessionProvider::new(ProtectedSections::new(
        vec!["dashboard".into()],
        "login",
    )));
    provider.register("live-token", Session::new("guide-1"));
    let app = app(test_state(test_config()).with_identity(provider.clone()));

    for method in ["GET", "POST"] {
        let request = Request::builder()
            .method(method)
            .uri("/api/auth/logout")
            .header(header::COOKIE, "token=live-token")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));

        assert_eq!(
            body_json(response).await,
            json!({ "success": true, "message": "Logged out successfully" })
        );
    }
    assert_eq!(provider.session_count(), 0);
}

#[tokio::test]
async fn test_payment_config() {
    let app = app(test_state(test_config()));

    let body = body_json(get(&app, "/api/payments/config").await).await;
    assert_eq!(
        body,
        json!({ "success": true, "data": { "publishableKey": "pk_test_51Example", "mode": "test" } })
    );
}

#[tokio::test]
async fn test_payment_config_missing_key() {
    let loader = PaymentClientLoader::new(KeySource::Env("TOUR_SITE_TEST_NO_SUCH_KEY".into()));
    let app = app(test_state(test_config()).with_payments(Arc::new(loader)));

    let response = get(&app, "/api/payments/config").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "success": false, "message": "Payment provider is not configured" })
    );
}

#[tokio::test]
async fn test_ping_search_success_even_on_non_2xx() {
    let google = start_mock_backend(200, "").await;
    let bing = start_mock_backend(500, "").await;

    let mut config = test_config();
    config.seo.google_ping_url = format!("http://{google}/ping");
    config.seo.bing_ping_url = format!("http://{bing}/ping");
    let app = app(test_state(config));

    let response = get(&app, "/api/webhooks/ping-search").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "success": true, "message": "Search engines pinged successfully" })
    );
}

#[tokio::test]
async fn test_ping_search_transport_failure() {
    let google = start_mock_backend(200, "").await;
    let unreachable = closed_addr().await;

    let mut config = test_config();
    config.seo.google_ping_url = format!("http://{google}/ping");
    config.seo.bing_ping_url = format!("http://{unreachable}/ping");
    let app = app(test_state(config));

    let response = get(&app, "/api/webhooks/ping-search").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "success": false, "error": "Failed to ping search engines" })
    );
}

#[tokio::test]
async fn test_health() {
    let app = app(test_state(test_config()));
    let body = body_json(get(&app, "/api/health").await).await;
    assert_eq!(body, json!({ "success": true, "message": "ok" }));
}

#[tokio::test]
async fn test_robots_uses_configured_base_url() {
    let app = app(test_state(test_config()));

    let response = get(&app, "/robots.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(
        body_text(response).await,
        "User-Agent: *\nAllow: /\nDisallow: /dashboard/\nDisallow: /api/\n\nSitemap: https://tours.example.org/sitemap.xml\n"
    );
}

#[tokio::test]
async fn test_sitemap() {
    let app = app(test_state(test_config()));

    let response = get(&app, "/sitemap.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    let xml = body_text(response).await;
    assert!(xml.contains("<loc>https://tours.example.org/ar/faq</loc>"));
    assert!(xml.contains("hreflang=\"en\""));
    assert!(!xml.contains("dashboard"));
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = app(test_state(test_config()));

    let response = get(&app, "/api/health").await;
    let headers = response.headers();
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert!(headers.contains_key("x-request-id"));
}
