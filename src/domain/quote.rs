//! Core quote domain types.
//!
//! Defines the values that flow through the fetch pipeline: price quotes,
//! upstream health snapshots and the per-request correlation context.
//! All of them are built once per request and never mutated afterwards.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Coin identifier as understood by the upstream (e.g. "bitcoin").
pub type Ticker = String;

/// Upper bound (exclusive) for generated correlation ids.
pub const REQUEST_ID_RANGE: u32 = 10_000_000;

// ────────────────────────────────────────────
// Request correlation
// ────────────────────────────────────────────

/// Per-request correlation data attached before the decorator chain.
///
/// Read-only downstream: every layer receives it by shared reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Random correlation id used to tie log lines to one inbound request.
    pub request_id: u32,
}

impl RequestContext {
    /// Create a context with a fresh random correlation id.
    pub fn new() -> Self {
        Self {
            request_id: rand::thread_rng().gen_range(0..REQUEST_ID_RANGE),
        }
    }

    /// Create a context with a fixed correlation id.
    pub const fn with_id(request_id: u32) -> Self {
        Self { request_id }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────
// Price
// ────────────────────────────────────────────

/// A single USD price observation for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Coin identifier the quote was requested for.
    pub ticker: Ticker,
    /// Price in USD.
    pub price: f64,
    /// Trading volume over the last 24 hours, in USD.
    pub vol_24hr: f64,
    /// Time the upstream last updated this price.
    pub timestamp: DateTime<Utc>,
}

impl PriceQuote {
    /// Create a new quote.
    pub fn new(ticker: impl Into<Ticker>, price: f64, vol_24hr: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            vol_24hr,
            timestamp,
        }
    }
}

// ────────────────────────────────────────────
// Health
// ────────────────────────────────────────────

/// Whether the upstream API answered its ping with a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[serde(rename = "Running")]
    Running,
    #[serde(rename = "Not Running")]
    NotRunning,
}

impl ServiceStatus {
    /// Derive the status from the raw upstream ping message.
    ///
    /// Any non-empty message counts as running.
    pub fn from_upstream(raw: &str) -> Self {
        if raw.is_empty() {
            Self::NotRunning
        } else {
            Self::Running
        }
    }

    /// Human-readable label, identical to the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::NotRunning => "Not Running",
        }
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the upstream API health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Derived running state.
    pub status: ServiceStatus,
    /// Raw status message returned by the upstream ping.
    pub upstream_status: String,
    /// Time the check was performed.
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    /// Build a health snapshot from the raw upstream message.
    pub fn from_upstream(upstream_status: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let upstream_status = upstream_status.into();
        Self {
            status: ServiceStatus::from_upstream(&upstream_status),
            upstream_status,
            timestamp,
        }
    }
}
