//! Content store subsystem.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → repository.rs (FaqRepository / LocationRepository traits)
//!     → mongo.rs (MongoConnection, lazy and shared) or memory.rs
//!     → types.rs (Faq, Location, validation, ordering)
//! ```
//!
//! # Design Decisions
//! - Handlers only see the traits; the backend is chosen at startup
//! - Validation runs in the store layer, before anything is persisted
//! - FAQ ordering is `order` ascending, then newest first

pub mod memory;
pub mod mongo;
pub mod repository;
pub mod types;

pub use memory::{MemoryFaqRepository, MemoryLocationRepository};
pub use mongo::{MongoConnection, MongoFaqRepository, MongoLocationRepository};
pub use repository::{FaqRepository, LocationRepository};
pub use types::{sort_faqs, Faq, Location, NewFaq, StoreError, StoreResult, ValidFaq};
