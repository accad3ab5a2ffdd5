//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → auth gate (pass / redirect / delegate)
//!     → api.rs (JSON) or pages.rs (HTML)
//!     → response.rs (JSON envelope, error mapping)
//!     → Send to client
//! ```

pub mod api;
pub mod pages;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
