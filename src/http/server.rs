//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the application state from configuration
//! - Create the Axum router with API, page and admin routes
//! - Wire up middleware (request ID, tracing, security headers, body
//!   limit, metrics, auth gate)
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::admin;
use crate::auth::{
    auth_gate_middleware, AuthGate, CookieSessionProvider, IdentityProvider, ProtectedSections,
    RemoteIdentityProvider,
};
use crate::config::SiteConfig;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::{api, pages};
use crate::locale::{Locale, DEFAULT_LOCALE};
use crate::observability::metrics::request_metrics_middleware;
use crate::payments::{KeySource, PaymentClientLoader};
use crate::routing::GateRules;
use crate::security::headers::security_headers_middleware;
use crate::security::sanitizer::HtmlSanitizer;
use crate::seo::SearchEnginePinger;
use crate::store::{
    FaqRepository, LocationRepository, MemoryFaqRepository, MemoryLocationRepository,
    MongoConnection, MongoFaqRepository, MongoLocationRepository,
};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub faqs: Arc<dyn FaqRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub pinger: SearchEnginePinger,
    pub payments: Arc<PaymentClientLoader>,
    pub sanitizer: Arc<HtmlSanitizer>,
    /// Name of the content store backend, for status output.
    pub store_backend: &'static str,
}

impl AppState {
    /// Build every collaborator from configuration. Nothing is dialed here:
    /// the database connects on first use.
    pub fn from_config(config: SiteConfig) -> Self {
        let client = reqwest::Client::new();

        let (faqs, locations, store_backend) = match &config.database.uri {
            Some(uri) => {
                let connection = Arc::new(MongoConnection::new(uri.clone(), config.database.name.clone()));
                let faqs: Arc<dyn FaqRepository> = Arc::new(MongoFaqRepository::new(connection.clone()));
                let locations: Arc<dyn LocationRepository> =
                    Arc::new(MongoLocationRepository::new(connection));
                (faqs, locations, "mongodb")
            }
            None => {
                tracing::warn!("No database configured, using the in-memory store");
                let faqs: Arc<dyn FaqRepository> = Arc::new(MemoryFaqRepository::new());
                let locations: Arc<dyn LocationRepository> =
                    Arc::new(MemoryLocationRepository::default());
                (faqs, locations, "memory")
            }
        };

        let sections = ProtectedSections::from_config(&config.identity);
        let identity: Arc<dyn IdentityProvider> = match &config.identity.verify_url {
            Some(verify_url) => Arc::new(RemoteIdentityProvider::new(
                client.clone(),
                verify_url.clone(),
                config.identity.revoke_url.clone(),
                sections,
            )),
            None => Arc::new(CookieSessionProvider::new(sections)),
        };

        let pinger = SearchEnginePinger::new(client, &config.seo, config.site.sitemap_url());
        let payments = Arc::new(PaymentClientLoader::new(KeySource::Env(
            config.payments.publishable_key_env.clone(),
        )));

        Self {
            config: Arc::new(config),
            faqs,
            locations,
            identity,
            pinger,
            payments,
            sanitizer: Arc::new(HtmlSanitizer::new()),
            store_backend,
        }
    }

    pub fn with_faqs(mut self, faqs: Arc<dyn FaqRepository>) -> Self {
        self.faqs = faqs;
        self
    }

    pub fn with_locations(mut self, locations: Arc<dyn LocationRepository>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_pinger(mut self, pinger: SearchEnginePinger) -> Self {
        self.pinger = pinger;
        self
    }

    pub fn with_payments(mut self, payments: Arc<PaymentClientLoader>) -> Self {
        self.payments = payments;
        self
    }

    /// Configured default locale; validation guarantees it parses.
    pub fn default_locale(&self) -> Locale {
        Locale::parse(&self.config.site.default_locale).unwrap_or(DEFAULT_LOCALE)
    }
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    config: Arc<SiteConfig>,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        let config = state.config.clone();
        let gate = AuthGate::new(GateRules::standard(state.default_locale()), state.identity.clone());

        let mut api_routes = Router::new()
            .route("/api/faq", get(api::list_faqs))
            .route("/api/auth/logout", get(api::logout).post(api::logout))
            .route("/api/webhooks/ping-search", get(api::ping_search))
            .route("/api/payments/config", get(api::payment_config))
            .route("/api/health", get(api::health));

        if config.debug.expose_routes {
            tracing::warn!("Debug routes are exposed without authentication: /api/debug/locations");
            api_routes = api_routes.route("/api/debug/locations", get(api::debug_locations));
        }

        let page_routes = Router::new()
            .route("/", get(pages::root))
            .route("/robots.txt", get(pages::robots))
            .route("/sitemap.xml", get(pages::sitemap))
            .route("/{locale}", get(pages::home))
            .route("/{locale}/faq", get(pages::faq))
            .route("/{locale}/login", get(pages::login))
            .route("/{locale}/register", get(pages::register))
            .route("/{locale}/dashboard", get(pages::dashboard));

        let mut router = Router::new().merge(api_routes).merge(page_routes);
        if config.admin.enabled {
            router = router.merge(admin::admin_router(&config.admin));
        }

        let router = router
            .fallback(pages::not_found)
            .with_state(state)
            .layer(middleware::from_fn_with_state(gate, auth_gate_middleware))
            .layer(middleware::from_fn(request_metrics_middleware))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size));

        let router = if config.security.enable_headers {
            router.layer(middleware::from_fn(security_headers_middleware))
        } else {
            router
        };

        router
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// A clone of the router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}
