//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP clients, HTTP server, metrics export).
//!
//! Adapter categories:
//! - `coingecko`: Upstream CoinGecko REST client and `FetchService`
//! - `http`: Local JSON API server and client
//! - `metrics`: Prometheus metrics registry

pub mod coingecko;
pub mod http;
pub mod metrics;
