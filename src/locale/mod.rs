//! Locale subsystem.
//!
//! # Data Flow
//! ```text
//! Request path ("/ar/faq")
//!     → resolver.rs (leading two-letter segment or default)
//!     → Locale → Direction (ltr/rtl) → FontMode
//!     → messages.rs (translated interface strings)
//! ```

pub mod messages;
pub mod resolver;

pub use messages::{t, Msg};
pub use resolver::{
    is_locale_code, resolve_locale, resolve_locale_or, Direction, FontMode, Locale,
    DEFAULT_LOCALE,
};
