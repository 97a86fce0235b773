//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from an optional `config.toml`.
//! Every field has a default, so the service runs without any file;
//! command-line flags override whatever the file says.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

use crate::adapters::coingecko::client::DEFAULT_BASE_URL;
use crate::adapters::coingecko::CoinGeckoConfig;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Local HTTP listener.
  pub server: ServerConfig,
  /// CoinGecko endpoint and timeout.
  pub upstream: UpstreamConfig,
  /// Log output.
  pub logging: LoggingConfig,
  /// Metrics decorator and export.
  pub metrics: MetricsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  /// Listen address; `:PORT` binds all interfaces.
  pub listen_addr: String,
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
  /// CoinGecko API root (no trailing slash).
  pub base_url: String,
  /// Request timeout in seconds.
  pub timeout_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
  pub level: String,
  /// Emit JSON lines instead of human-readable text.
  pub json: bool,
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
  /// Record Prometheus metrics and serve `/metrics`.
  pub enabled: bool,
  /// Print per-request outcome summaries to stdout.
  pub console: bool,
}

/// Values given on the command line, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub listen_addr: Option<String>,
  pub log_level: Option<String>,
}

impl AppConfig {
  /// Apply command-line overrides.
  pub fn apply(&mut self, overrides: ConfigOverrides) {
    if let Some(addr) = overrides.listen_addr {
      self.server.listen_addr = addr;
    }
    if let Some(level) = overrides.log_level {
      self.logging.level = level;
    }
  }

  /// Client settings for the upstream adapter.
  pub fn coingecko(&self) -> CoinGeckoConfig {
    CoinGeckoConfig {
      base_url: self.upstream.base_url.trim_end_matches('/').to_string(),
      timeout: Duration::from_secs(self.upstream.timeout_seconds),
      ..CoinGeckoConfig::default()
    }
  }
}

impl ServerConfig {
  /// Socket address to bind, with `:PORT` expanded to `0.0.0.0:PORT`.
  pub fn bind_addr(&self) -> String {
    normalize_listen_addr(&self.listen_addr)
  }
}

/// Expand a Go-style `:PORT` listen address to all interfaces.
pub fn normalize_listen_addr(addr: &str) -> String {
  if addr.starts_with(':') {
    format!("0.0.0.0{addr}")
  } else {
    addr.to_string()
  }
}

// Default values

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      listen_addr: ":9899".to_string(),
    }
  }
}

impl Default for UpstreamConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout_seconds: 10,
    }
  }
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "info".to_string(),
      json: true,
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      console: true,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize_listen_addr() {
    assert_eq!(normalize_listen_addr(":9899"), "0.0.0.0:9899");
    assert_eq!(normalize_listen_addr("127.0.0.1:8080"), "127.0.0.1:8080");
  }

  #[test]
  fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.server.bind_addr(), "0.0.0.0:9899");
    assert_eq!(config.coingecko().timeout, Duration::from_secs(10));
    assert_eq!(config.coingecko().base_url, "https://api.coingecko.com/api/v3");
    assert_eq!(config.coingecko().max_body_bytes, crate::adapters::coingecko::client::DEFAULT_MAX_BODY_BYTES);
  }

  #[test]
  fn test_overrides_win() {
    let mut config = AppConfig::default();
    config.apply(ConfigOverrides {
      listen_addr: Some("127.0.0.1:1234".to_string()),
      log_level: None,
    });
    assert_eq!(config.server.listen_addr, "127.0.0.1:1234");
    assert_eq!(config.logging.level, "info");
  }
}
