//! Repository interfaces, one per entity.
//!
//! Handlers depend on these traits only; the concrete store is chosen at
//! startup.

use async_trait::async_trait;

use crate::store::types::{Faq, Location, NewFaq, StoreResult};

#[async_trait]
pub trait FaqRepository: Send + Sync {
    /// All FAQs, `order` ascending then newest first.
    async fn list(&self) -> StoreResult<Vec<Faq>>;

    /// Validate and insert a new FAQ.
    async fn create(&self, faq: NewFaq) -> StoreResult<Faq>;

    /// Validate and replace the fields of an existing FAQ.
    async fn update(&self, id: &str, faq: NewFaq) -> StoreResult<Faq>;

    /// Remove an FAQ.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Location>>;
}
