//! Fetch error kinds.
//!
//! Every failure of an upstream call maps to exactly one of these
//! variants. The HTTP layer surfaces all of them as a flat 400, so the
//! display messages are what API clients actually see.

use thiserror::Error;

/// Failure of a single price or health fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure or timeout before a response arrived.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-200 status.
    #[error("HTTP request failed with status code: {0}")]
    UpstreamStatus(u16),

    /// Response body was not the JSON shape we expect.
    #[error("failed to decode JSON response: {0}")]
    Decode(String),

    /// Upstream mapping had no entry for the requested ticker.
    #[error("could not find data for ticker {0}")]
    NotFound(String),
}

impl FetchError {
    /// Short label for metrics and log fields.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::UpstreamStatus(_) => "upstream_status",
            Self::Decode(_) => "decode",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
