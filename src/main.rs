//! Tour site server.
//!
//! # Startup
//!
//! ```text
//! SITE_CONFIG (TOML, optional) + environment overrides
//!     → validated SiteConfig (all errors reported at once)
//!     → logging, optional metrics exporter
//!     → AppState (store, identity provider, pinger, payment loader)
//!     → bind listener → serve until SIGINT/SIGTERM
//! ```

use std::path::PathBuf;

use tokio::net::TcpListener;

use tour_site::config::{load_config, load_from_env};
use tour_site::lifecycle::{shutdown_signal, Shutdown};
use tour_site::observability::{logging, metrics};
use tour_site::{AppState, HttpServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::var_os("SITE_CONFIG") {
        Some(path) => load_config(&PathBuf::from(path))?,
        None => load_from_env()?,
    };

    logging::init_logging(&config.observability)?;
    tracing::info!("tour-site v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_url = %config.site.base_url,
        locales = ?config.site.locales,
        database = config.database.uri.is_some(),
        admin = config.admin.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(AppState::from_config(config));
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
