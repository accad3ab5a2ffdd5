//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Admin-supplied HTML (FAQ answers):
//!     → sanitizer.rs (allow-list, deny-list, event handler filter)
//!     → rendered into pages
//!
//! Outgoing response:
//!     → headers.rs (nosniff, frame options, HSTS, referrer policy)
//! ```
//!
//! # Design Decisions
//! - Fail closed: anything not explicitly allowed is stripped
//! - Sanitize at render time so stored content is never trusted

pub mod headers;
pub mod sanitizer;

pub use sanitizer::{sanitize_html, HtmlSanitizer};
