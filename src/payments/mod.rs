//! Payment provider integration.
//!
//! Only the client loader lives here; booking and charging are handled by
//! the provider's hosted pages.

pub mod stripe;

pub use stripe::{KeySource, PaymentClientLoader, PaymentError, PaymentMode, StripeClient};
