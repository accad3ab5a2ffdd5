//! Routing rules for the auth gate.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → rules.rs (ordered rule list)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: GateAction (pass-through, redirect, delegate)
//!
//! Rule Compilation (at startup):
//!     default locale
//!     → GateRules::standard
//!     → Freeze as immutable rule list
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same rule
//! - First match wins

pub mod matcher;
pub mod rules;

pub use matcher::Matcher;
pub use rules::{GateAction, GateRules};
