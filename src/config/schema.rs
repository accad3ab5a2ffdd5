//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Placeholder admin key shipped in defaults. Validation rejects it when the
/// admin surface is enabled.
pub const PLACEHOLDER_ADMIN_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Root configuration for the site.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Public site settings (base URL, locales).
    pub site: SiteSettings,

    /// MongoDB connection settings.
    pub database: DatabaseConfig,

    /// Identity provider used by the auth gate.
    pub identity: IdentityConfig,

    /// Payment provider client settings.
    pub payments: PaymentConfig,

    /// Search engine endpoints notified by the ping webhook.
    pub seo: SeoConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin surface settings.
    pub admin: AdminConfig,

    /// Security hardening settings.
    pub security: SecurityConfig,

    /// Debug endpoints.
    pub debug: DebugConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Public site settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Canonical base URL used for robots.txt and the sitemap.
    pub base_url: String,

    /// Locale used when a path carries none.
    pub default_locale: String,

    /// Locales published in the sitemap.
    pub locales: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.watermelontours.com".to_string(),
            default_locale: "en".to_string(),
            locales: vec!["en".to_string(), "ar".to_string()],
        }
    }
}

impl SiteSettings {
    /// Base URL without a trailing slash.
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute URL of the generated sitemap.
    pub fn sitemap_url(&self) -> String {
        format!("{}/sitemap.xml", self.base_url_trimmed())
    }
}

/// MongoDB settings.
///
/// When `uri` is absent the site runs on the in-memory store.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub uri: Option<String>,
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: None,
            name: "watermelon".to_string(),
        }
    }
}

/// Identity provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Remote session verification endpoint. When unset, sessions are
    /// tracked in-process.
    pub verify_url: Option<String>,

    /// Remote session revocation endpoint, called on logout.
    pub revoke_url: Option<String>,

    /// Locale-relative sections that require a session (e.g. "dashboard").
    pub protected_sections: Vec<String>,

    /// Locale-relative login page used for sign-in redirects.
    pub login_section: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            verify_url: None,
            revoke_url: None,
            protected_sections: vec!["dashboard".to_string()],
            login_section: "login".to_string(),
        }
    }
}

/// Payment provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Environment variable holding the publishable key.
    pub publishable_key_env: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            publishable_key_env: "STRIPE_PUBLISHABLE_KEY".to_string(),
        }
    }
}

/// Search engine ping endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeoConfig {
    pub google_ping_url: String,
    pub bing_ping_url: String,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            google_ping_url: "https://www.google.com/ping".to_string(),
            bing_ping_url: "https://www.bing.com/ping".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Admin surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the admin routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: PLACEHOLDER_ADMIN_KEY.to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 256 * 1024,
        }
    }
}

/// Debug endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Mount `/api/debug/*`. These routes are not behind the admin key.
    pub expose_routes: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            expose_routes: true,
        }
    }
}
