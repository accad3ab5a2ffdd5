//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs, socket addresses and locale codes
//! - Refuse placeholder secrets on enabled surfaces
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{SiteConfig, PLACEHOLDER_ADMIN_KEY};
use crate::locale::is_locale_code;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("listener.bind_address: invalid socket address '{0}'")]
    InvalidBindAddress(String),

    #[error("{field}: '{value}' is not a two-letter lowercase locale code")]
    InvalidLocale { field: &'static str, value: String },

    #[error("site.locales must contain the default locale '{0}'")]
    DefaultLocaleNotPublished(String),

    #[error("database.name must not be empty")]
    EmptyDatabaseName,

    #[error("admin.api_key must be changed from the placeholder when admin is enabled")]
    PlaceholderAdminKey,

    #[error("observability.metrics_address: invalid socket address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    check_http_url(&mut errors, "site.base_url", &config.site.base_url);
    check_http_url(&mut errors, "seo.google_ping_url", &config.seo.google_ping_url);
    check_http_url(&mut errors, "seo.bing_ping_url", &config.seo.bing_ping_url);
    if let Some(url) = &config.identity.verify_url {
        check_http_url(&mut errors, "identity.verify_url", url);
    }
    if let Some(url) = &config.identity.revoke_url {
        check_http_url(&mut errors, "identity.revoke_url", url);
    }

    if !is_locale_code(&config.site.default_locale) {
        errors.push(ValidationError::InvalidLocale {
            field: "site.default_locale",
            value: config.site.default_locale.clone(),
        });
    } else if !config.site.locales.contains(&config.site.default_locale) {
        errors.push(ValidationError::DefaultLocaleNotPublished(
            config.site.default_locale.clone(),
        ));
    }
    for locale in &config.site.locales {
        if !is_locale_code(locale) {
            errors.push(ValidationError::InvalidLocale {
                field: "site.locales",
                value: locale.clone(),
            });
        }
    }

    if config.database.name.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabaseName);
    }

    if config.admin.enabled && config.admin.api_key == PLACEHOLDER_ADMIN_KEY {
        errors.push(ValidationError::PlaceholderAdminKey);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let ok = Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !ok {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}
