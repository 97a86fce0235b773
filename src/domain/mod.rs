//! Domain layer - Quote types and fetch errors.
//!
//! Pure value types shared by every other layer. Nothing here performs
//! I/O (hexagonal architecture inner ring).

pub mod error;
pub mod quote;

// Re-export core types for convenience
pub use error::FetchError;
pub use quote::{HealthStatus, PriceQuote, RequestContext, ServiceStatus, Ticker};
