//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Request
//!     → gate.rs (GateRules: pass-through / redirect / delegate)
//!     → provider.rs (IdentityProvider decides for delegated requests)
//!     → session.rs (Session attached to request extensions)
//!     → handler (CurrentSession extractor)
//! ```

pub mod gate;
pub mod provider;
pub mod session;

pub use gate::{auth_gate_middleware, AuthGate};
pub use provider::{
    CookieSessionProvider, GateDecision, GateRequest, IdentityError, IdentityProvider,
    ProtectedSections, RemoteIdentityProvider,
};
pub use session::{cleared_session_cookie, session_token, CurrentSession, Session, SESSION_COOKIE};
