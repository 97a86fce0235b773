//! CoinGecko API Adapter
//!
//! Implements the upstream side of the service: the HTTP client for
//! the CoinGecko REST API and the `FetchService` built on top of it.
//!
//! Sub-modules:
//! - `client`: reqwest client with a bounded timeout
//! - `service`: `FetchService` implementation over the client
//! - `types`: upstream response type definitions

pub mod client;
pub mod service;
pub mod types;

pub use client::{CoinGeckoClient, CoinGeckoConfig};
pub use service::CoinGeckoService;
