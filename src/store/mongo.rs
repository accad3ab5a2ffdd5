//! MongoDB-backed repositories.
//!
//! # Responsibilities
//! - Lazily establish one process-wide connection, reuse it afterwards
//! - Map `faqs` / `locations` documents to the content model
//!
//! # Design Decisions
//! - Connecting is idempotent: every repository call asks for the
//!   database handle, the first caller connects, later callers reuse it
//! - Initialization is serialized so concurrent first requests connect once
//! - `reset()` drops the cached handle; the next call reconnects
//! - Connection pooling is left to the driver; no retries here

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use tokio::sync::Mutex;

use crate::store::repository::{FaqRepository, LocationRepository};
use crate::store::types::{Faq, Location, NewFaq, StoreError, StoreResult};

pub const FAQ_COLLECTION: &str = "faqs";
pub const LOCATION_COLLECTION: &str = "locations";

/// Process-wide, lazily established database handle.
pub struct MongoConnection {
    uri: String,
    database_name: String,
    database: ArcSwapOption<Database>,
    init: Mutex<()>,
}

impl MongoConnection {
    /// Describe a connection. Nothing is dialed until first use.
    pub fn new(uri: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database_name: database_name.into(),
            database: ArcSwapOption::empty(),
            init: Mutex::new(()),
        }
    }

    /// Return the cached handle, connecting first if needed.
    pub async fn database(&self) -> StoreResult<Arc<Database>> {
        if let Some(db) = self.database.load_full() {
            return Ok(db);
        }

        let _guard = self.init.lock().await;
        // Another task may have connected while we waited.
        if let Some(db) = self.database.load_full() {
            return Ok(db);
        }

        let client = Client::with_uri_str(&self.uri).await?;
        let db = client.database(&self.database_name);
        db.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database = %self.database_name, "MongoDB connection established");

        let db = Arc::new(db);
        self.database.store(Some(db.clone()));
        Ok(db)
    }

    pub fn is_connected(&self) -> bool {
        self.database.load().is_some()
    }

    /// Drop the cached handle.
    pub fn reset(&self) {
        if self.database.swap(None).is_some() {
            tracing::info!(database = %self.database_name, "MongoDB connection reset");
        }
    }

    async fn collection(&self, name: &str) -> StoreResult<Collection<Document>> {
        Ok(self.database().await?.collection::<Document>(name))
    }
}

/// FAQ repository over the `faqs` collection.
#[derive(Clone)]
pub struct MongoFaqRepository {
    connection: Arc<MongoConnection>,
}

impl MongoFaqRepository {
    pub fn new(connection: Arc<MongoConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl FaqRepository for MongoFaqRepository {
    async fn list(&self) -> StoreResult<Vec<Faq>> {
        let cursor = self
            .connection
            .collection(FAQ_COLLECTION)
            .await?
            .find(doc! {})
            .sort(doc! { "order": 1, "createdAt": -1 })
            .await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.iter().map(faq_from_document).collect()
    }

    async fn create(&self, faq: NewFaq) -> StoreResult<Faq> {
        let valid = faq.validate()?;
        let id = ObjectId::new();
        let now = bson::DateTime::now();
        let document = doc! {
            "_id": id,
            "question": valid.question,
            "answer": valid.answer,
            "order": valid.order,
            "createdAt": now,
            "updatedAt": now,
        };

        self.connection
            .collection(FAQ_COLLECTION)
            .await?
            .insert_one(&document)
            .await?;
        faq_from_document(&document)
    }

    async fn update(&self, id: &str, faq: NewFaq) -> StoreResult<Faq> {
        let valid = faq.validate()?;
        let oid = parse_id(id)?;
        let updated = self
            .connection
            .collection(FAQ_COLLECTION)
            .await?
            .find_one_and_update(
                doc! { "_id": oid },
                doc! { "$set": {
                    "question": valid.question,
                    "answer": valid.answer,
                    "order": valid.order,
                    "updatedAt": bson::DateTime::now(),
                }},
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        faq_from_document(&updated)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let oid = parse_id(id)?;
        let result = self
            .connection
            .collection(FAQ_COLLECTION)
            .await?
            .delete_one(doc! { "_id": oid })
            .await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Location repository over the `locations` collection.
#[derive(Clone)]
pub struct MongoLocationRepository {
    connection: Arc<MongoConnection>,
}

impl MongoLocationRepository {
    pub fn new(connection: Arc<MongoConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl LocationRepository for MongoLocationRepository {
    async fn list(&self) -> StoreResult<Vec<Location>> {
        let cursor = self
            .connection
            .collection(LOCATION_COLLECTION)
            .await?
            .find(doc! {})
            .await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(location_from_document).collect())
    }
}

fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))
}

fn faq_from_document(doc: &Document) -> StoreResult<Faq> {
    let malformed = |e: bson::document::ValueAccessError| StoreError::Malformed(e.to_string());

    let order = match doc.get("order") {
        None | Some(Bson::Null) => 0,
        Some(Bson::Int32(n)) => *n,
        Some(Bson::Int64(n)) => i32::try_from(*n)
            .map_err(|_| StoreError::Malformed(format!("order out of range: {}", n)))?,
        Some(Bson::Double(n)) => *n as i32,
        Some(other) => {
            return Err(StoreError::Malformed(format!("order has type {:?}", other.element_type())))
        }
    };

    Ok(Faq {
        id: doc.get_object_id("_id").map_err(malformed)?.to_hex(),
        question: doc.get_str("question").map_err(malformed)?.to_string(),
        answer: doc.get_str("answer").map_err(malformed)?.to_string(),
        order,
        created_at: to_chrono(doc.get_datetime("createdAt").map_err(malformed)?)?,
        updated_at: to_chrono(doc.get_datetime("updatedAt").map_err(malformed)?)?,
    })
}

fn location_from_document(doc: Document) -> Location {
    let mut location = Location {
        id: String::new(),
        name: String::new(),
        attributes: serde_json::Map::new(),
    };
    for (key, value) in doc {
        match key.as_str() {
            "_id" => {
                location.id = match value {
                    Bson::ObjectId(oid) => oid.to_hex(),
                    other => other.to_string(),
                }
            }
            "name" => {
                location.name = match value {
                    Bson::String(name) => name,
                    other => other.to_string(),
                }
            }
            _ => {
                location.attributes.insert(key, value.into_relaxed_extjson());
            }
        }
    }
    location
}

fn to_chrono(value: &bson::DateTime) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| StoreError::Malformed(format!("timestamp out of range: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faq_mapping() {
        let oid = ObjectId::new();
        let now = bson::DateTime::from_millis(1_700_000_000_000);
        let doc = doc! {
            "_id": oid,
            "question": "Is lunch included?",
            "answer": "<p>Yes</p>",
            "order": 2.0,
            "createdAt": now,
            "updatedAt": now,
            "__v": 0,
        };
        let faq = faq_from_document(&doc).unwrap();
        assert_eq!(faq.id, oid.to_hex());
        assert_eq!(faq.order, 2);
        assert_eq!(faq.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_faq_mapping_defaults_order() {
        let now = bson::DateTime::now();
        let doc = doc! {
            "_id": ObjectId::new(),
            "question": "q",
            "answer": "a",
            "createdAt": now,
            "updatedAt": now,
        };
        assert_eq!(faq_from_document(&doc).unwrap().order, 0);
    }

    #[test]
    fn test_faq_mapping_rejects_missing_fields() {
        let doc = doc! { "_id": ObjectId::new(), "question": "q" };
        assert!(matches!(faq_from_document(&doc), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_location_mapping() {
        let oid = ObjectId::new();
        let location = location_from_document(doc! {
            "_id": oid,
            "name": "Nablus",
            "featured": true,
        });
        assert_eq!(location.id, oid.to_hex());
        assert_eq!(location.name, "Nablus");
        assert_eq!(location.attributes["featured"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_invalid_id_is_not_found() {
        assert!(matches!(parse_id("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_connection_is_lazy() {
        let connection = MongoConnection::new("mongodb://127.0.0.1:1", "test");
        assert!(!connection.is_connected());
        connection.reset();
        assert!(!connection.is_connected());
    }
}
