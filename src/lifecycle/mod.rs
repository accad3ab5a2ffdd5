//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → server stops accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//!
//! Cleanup (cleanup.rs):
//!     site-cli cleanup → remove generated artifact directories
//! ```

pub mod cleanup;
pub mod shutdown;
pub mod signals;

pub use cleanup::{remove_paths, CleanupError, CleanupReport, DEFAULT_CLEANUP_PATHS};
pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
