//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the HTTP layer and the
//! decorators require from the outside world. Adapters implement them.
//!
//! Port categories:
//! - `FetchService`: Price lookup and upstream health check

pub mod fetch_service;

pub use fetch_service::FetchService;
