//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

use tour_site::config::SiteConfig;
use tour_site::payments::{KeySource, PaymentClientLoader};
use tour_site::seo::SearchEnginePinger;
use tour_site::store::{
    Faq, FaqRepository, Location, LocationRepository, NewFaq, StoreError, StoreResult,
};
use tour_site::{AppState, HttpServer};

pub const ADMIN_KEY: &str = "test-admin-key";

/// Start a programmable mock backend on an ephemeral port.
///
/// Every connection is answered with the `(status, body)` produced by `f`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain the request head before answering.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock backend that always returns a fixed response.
pub async fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    start_programmable_backend(move || async move { (status, body.to_string()) }).await
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn test_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.site.base_url = "https://tours.example.org/".to_string();
    config.admin.enabled = true;
    config.admin.api_key = ADMIN_KEY.to_string();
    config
}

/// Client that never goes through a system proxy.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub fn test_state(config: SiteConfig) -> AppState {
    let pinger = SearchEnginePinger::new(direct_client(), &config.seo, config.site.sitemap_url());
    AppState::from_config(config)
        .with_pinger(pinger)
        .with_payments(Arc::new(PaymentClientLoader::new(KeySource::Fixed(
            "pk_test_51Example".to_string(),
        ))))
}

pub fn app(state: AppState) -> Router {
    HttpServer::new(state).router()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// FAQ repository whose every call fails.
pub struct FailingFaqRepository;

#[async_trait]
impl FaqRepository for FailingFaqRepository {
    async fn list(&self) -> StoreResult<Vec<Faq>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn create(&self, _faq: NewFaq) -> StoreResult<Faq> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn update(&self, _id: &str, _faq: NewFaq) -> StoreResult<Faq> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _id: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// Location repository whose every call fails.
pub struct FailingLocationRepository;

#[async_trait]
impl LocationRepository for FailingLocationRepository {
    async fn list(&self) -> StoreResult<Vec<Location>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}
