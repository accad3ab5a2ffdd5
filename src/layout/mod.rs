//! Server-rendered HTML.
//!
//! # Data Flow
//! ```text
//! Page handler (Locale, data)
//!     → pages.rs (page body; admin HTML through the sanitizer)
//!     → document.rs (html shell: lang, dir, font class, chrome)
//!     → Html<String>
//! ```
//!
//! # Design Decisions
//! - Interface strings come from the locale tables and are trusted
//! - Stored text is escaped; stored HTML is sanitized, never both
//! - Rendering is infallible; data failures select the fallback view

pub mod document;
pub mod pages;

pub use document::{escape_text, render_document};
