//! In-process store used when no database is configured, and in tests.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::store::repository::{FaqRepository, LocationRepository};
use crate::store::types::{sort_faqs, Faq, Location, NewFaq, StoreError, StoreResult};

/// FAQ repository backed by a concurrent map.
#[derive(Clone, Default)]
pub struct MemoryFaqRepository {
    faqs: Arc<DashMap<String, Faq>>,
}

impl MemoryFaqRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (timestamps are kept as given).
    pub fn with_faqs(faqs: impl IntoIterator<Item = Faq>) -> Self {
        let repo = Self::new();
        for faq in faqs {
            repo.faqs.insert(faq.id.clone(), faq);
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.faqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faqs.is_empty()
    }
}

#[async_trait]
impl FaqRepository for MemoryFaqRepository {
    async fn list(&self) -> StoreResult<Vec<Faq>> {
        let mut faqs: Vec<Faq> = self.faqs.iter().map(|r| r.value().clone()).collect();
        sort_faqs(&mut faqs);
        Ok(faqs)
    }

    async fn create(&self, faq: NewFaq) -> StoreResult<Faq> {
        let valid = faq.validate()?;
        let now = Utc::now();
        let faq = Faq {
            id: Uuid::new_v4().simple().to_string(),
            question: valid.question,
            answer: valid.answer,
            order: valid.order,
            created_at: now,
            updated_at: now,
        };
        self.faqs.insert(faq.id.clone(), faq.clone());
        Ok(faq)
    }

    async fn update(&self, id: &str, faq: NewFaq) -> StoreResult<Faq> {
        let valid = faq.validate()?;
        let mut entry = self
            .faqs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.question = valid.question;
        entry.answer = valid.answer;
        entry.order = valid.order;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.faqs
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Location repository over a fixed list.
#[derive(Clone, Default)]
pub struct MemoryLocationRepository {
    locations: Arc<RwLock<Vec<Location>>>,
}

impl MemoryLocationRepository {
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations: Arc::new(RwLock::new(locations)),
        }
    }

    pub fn push(&self, location: Location) {
        self.locations
            .write()
            .expect("location store lock poisoned")
            .push(location);
    }
}

#[async_trait]
impl LocationRepository for MemoryLocationRepository {
    async fn list(&self) -> StoreResult<Vec<Location>> {
        Ok(self
            .locations
            .read()
            .expect("location store lock poisoned")
            .clone())
    }
}
