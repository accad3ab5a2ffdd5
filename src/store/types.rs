//! Content model and store error definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A published FAQ entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    /// May contain HTML; sanitize before rendering.
    pub answer: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write model for creating or replacing an FAQ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub order: Option<i32>,
}

impl NewFaq {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            order: None,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Trim and check required fields.
    pub fn validate(self) -> StoreResult<ValidFaq> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(StoreError::Validation { field: "question" });
        }
        let answer = self.answer.trim();
        if answer.is_empty() {
            return Err(StoreError::Validation { field: "answer" });
        }
        Ok(ValidFaq {
            question: question.to_string(),
            answer: answer.to_string(),
            order: self.order.unwrap_or(0),
        })
    }
}

/// An FAQ write that passed validation. Only constructed by
/// [`NewFaq::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFaq {
    pub question: String,
    pub answer: String,
    pub order: i32,
}

/// A tour location. Only `_id` and `name` are interpreted; everything else
/// is carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Sort FAQs for display: `order` ascending, newest first within an order.
pub fn sort_faqs(faqs: &mut [Faq]) {
    faqs.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Errors that can occur in the content store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was empty after trimming.
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    /// No record with the given id.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Database driver or connection failure.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Stored data could not be mapped to the content model.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// Store not reachable for another reason.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
