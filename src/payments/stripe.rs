//! Payment provider client loader.
//!
//! # Responsibilities
//! - Build the payment client from the publishable key on first use
//! - Hand out the same client afterwards until `reset()`
//!
//! # Design Decisions
//! - A missing key is an error at the point of use, not at startup, so the
//!   rest of the site keeps working without payments configured
//! - Initialization is serialized; concurrent first callers build once

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use serde::Serialize;
use thiserror::Error;

const KEY_PREFIX: &str = "pk_";
const TEST_KEY_PREFIX: &str = "pk_test_";

/// Errors that can occur while loading the payment client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The key source yielded nothing.
    #[error("payment publishable key is not set ({0})")]
    MissingKey(String),

    /// The key is not a publishable key.
    #[error("payment publishable key must start with \"pk_\"")]
    InvalidKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Test,
    Live,
}

/// Client-side view of the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeClient {
    pub publishable_key: String,
    pub mode: PaymentMode,
}

impl StripeClient {
    pub fn from_key(key: &str) -> Result<Self, PaymentError> {
        let key = key.trim();
        if !key.starts_with(KEY_PREFIX) {
            return Err(PaymentError::InvalidKey);
        }
        let mode = if key.starts_with(TEST_KEY_PREFIX) {
            PaymentMode::Test
        } else {
            PaymentMode::Live
        };
        Ok(Self {
            publishable_key: key.to_string(),
            mode,
        })
    }
}

/// Where the publishable key comes from.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// Read the named environment variable at load time.
    Env(String),
    /// A fixed key.
    Fixed(String),
}

impl KeySource {
    fn read(&self) -> Result<String, PaymentError> {
        let (value, origin) = match self {
            KeySource::Env(var) => (std::env::var(var).ok(), var.as_str()),
            KeySource::Fixed(key) => (Some(key.clone()), "fixed key"),
        };
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PaymentError::MissingKey(origin.to_string()))
    }
}

/// Lazily initialized, resettable slot for the payment client.
pub struct PaymentClientLoader {
    source: KeySource,
    client: ArcSwapOption<StripeClient>,
    init: Mutex<()>,
}

impl PaymentClientLoader {
    pub fn new(source: KeySource) -> Self {
        Self {
            source,
            client: ArcSwapOption::empty(),
            init: Mutex::new(()),
        }
    }

    /// Return the client, building it first if needed.
    pub fn get(&self) -> Result<Arc<StripeClient>, PaymentError> {
        if let Some(client) = self.client.load_full() {
            return Ok(client);
        }

        let _guard = self.init.lock().expect("payment loader lock poisoned");
        if let Some(client) = self.client.load_full() {
            return Ok(client);
        }

        let client = Arc::new(StripeClient::from_key(&self.source.read()?)?);
        tracing::info!(mode = ?client.mode, "Payment client initialized");
        self.client.store(Some(client.clone()));
        Ok(client)
    }

    pub fn is_loaded(&self) -> bool {
        self.client.load().is_some()
    }

    /// Drop the cached client; the next `get()` rebuilds it.
    pub fn reset(&self) {
        self.client.store(None);
    }
}
