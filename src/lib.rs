//! Localized tour-booking site.
//!
//! Public pages and a small JSON API served by one Axum process, with an
//! auth gate in front of every route and MongoDB behind the content API.

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;

// Site features
pub mod admin;
pub mod auth;
pub mod layout;
pub mod locale;
pub mod payments;
pub mod seo;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::SiteConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
