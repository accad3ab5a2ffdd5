//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SiteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    finalize(config, |key| std::env::var(key).ok())
}

/// Build configuration from defaults plus environment overrides.
pub fn load_from_env() -> Result<SiteConfig, ConfigError> {
    finalize(SiteConfig::default(), |key| std::env::var(key).ok())
}

/// Apply overrides from `lookup` and validate.
pub fn finalize<F>(mut config: SiteConfig, lookup: F) -> Result<SiteConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    apply_env_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment values onto a parsed configuration.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut SiteConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("SITE_BASE_URL") {
        config.site.base_url = v;
    }
    if let Some(v) = get("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = get("MONGODB_URI") {
        config.database.uri = Some(v);
    }
    if let Some(v) = get("MONGODB_DATABASE") {
        config.database.name = v;
    }
    if let Some(v) = get("ADMIN_API_KEY") {
        config.admin.api_key = v;
    }
}
