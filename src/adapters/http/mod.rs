//! JSON API Adapter
//!
//! The service's own HTTP surface and a typed client for it.
//!
//! Sub-modules:
//! - `server`: axum router and handlers
//! - `client`: reqwest client for a running instance
//! - `types`: request/response type definitions

pub mod client;
pub mod server;
pub mod types;

pub use client::PriceClient;
pub use server::{create_router, ApiServer, AppState};
