//! Search engine sitemap pings.
//!
//! # Design Decisions
//! - Both engines are pinged concurrently; the operation fails as a whole
//!   if either request cannot be delivered
//! - A non-2xx answer is logged as a warning and still counts as delivered
//! - No timeouts or retries beyond what the HTTP client does by default

use thiserror::Error;
use url::Url;

use crate::config::SeoConfig;
use crate::observability::metrics;

/// Errors that can occur while pinging a search engine.
#[derive(Debug, Error)]
pub enum PingError {
    #[error("invalid ping endpoint for {engine}: {source}")]
    InvalidEndpoint {
        engine: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to reach {engine}: {source}")]
    Request {
        engine: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// A search engine ping endpoint.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    pub name: &'static str,
    pub endpoint: String,
}

impl SearchEngine {
    pub fn new(name: &'static str, endpoint: impl Into<String>) -> Self {
        Self {
            name,
            endpoint: endpoint.into(),
        }
    }

    /// `{endpoint}?sitemap=<encoded sitemap url>`
    pub fn ping_url(&self, sitemap_url: &str) -> Result<Url, PingError> {
        Url::parse_with_params(&self.endpoint, &[("sitemap", sitemap_url)]).map_err(|source| {
            PingError::InvalidEndpoint {
                engine: self.name,
                source,
            }
        })
    }
}

/// Result of one delivered ping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingOutcome {
    pub engine: &'static str,
    pub status: u16,
}

/// Notifies Google and Bing of the sitemap location.
#[derive(Clone)]
pub struct SearchEnginePinger {
    client: reqwest::Client,
    google: SearchEngine,
    bing: SearchEngine,
    sitemap_url: String,
}

impl SearchEnginePinger {
    pub fn new(client: reqwest::Client, seo: &SeoConfig, sitemap_url: impl Into<String>) -> Self {
        Self {
            client,
            google: SearchEngine::new("google", seo.google_ping_url.clone()),
            bing: SearchEngine::new("bing", seo.bing_ping_url.clone()),
            sitemap_url: sitemap_url.into(),
        }
    }

    pub fn sitemap_url(&self) -> &str {
        &self.sitemap_url
    }

    /// Ping both engines concurrently.
    pub async fn ping_all(&self) -> Result<[PingOutcome; 2], PingError> {
        let (google, bing) = tokio::try_join!(self.ping(&self.google), self.ping(&self.bing))?;
        Ok([google, bing])
    }

    async fn ping(&self, engine: &SearchEngine) -> Result<PingOutcome, PingError> {
        let url = engine.ping_url(&self.sitemap_url)?;
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(source) => {
                metrics::record_search_ping(engine.name, false);
                return Err(PingError::Request {
                    engine: engine.name,
                    source,
                });
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::info!(engine = engine.name, status = status.as_u16(), "Search engine pinged");
        } else {
            tracing::warn!(
                engine = engine.name,
                status = status.as_u16(),
                "Search engine answered ping with non-success status"
            );
        }
        metrics::record_search_ping(engine.name, true);

        Ok(PingOutcome {
            engine: engine.name,
            status: status.as_u16(),
        })
    }
}
