//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, applying command-line overrides,
//! validating all parameters, and providing clear error messages for
//! misconfiguration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use super::{AppConfig, ConfigOverrides};

/// Config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Load, override and validate configuration.
///
/// Returns the config together with the file it was read from, if any.
///
/// # Arguments
/// * `path` - Explicit config file; `None` tries `config.toml` and falls
///   back to defaults when it does not exist
/// * `overrides` - Command-line values applied after the file
///
/// # Errors
/// Returns detailed error if:
/// - An explicitly given file doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: Option<&str>, overrides: ConfigOverrides) -> Result<(AppConfig, Option<PathBuf>)> {
  let source = match path {
    Some(p) => Some(PathBuf::from(p)),
    None => Some(PathBuf::from(DEFAULT_CONFIG_PATH)).filter(|p| p.exists()),
  };

  let mut config = match &source {
    Some(p) => parse_file(p)?,
    None => AppConfig::default(),
  };

  config.apply(overrides);
  validate_config(&config)?;

  Ok((config, source))
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  toml::from_str(content).context("Failed to parse config.toml")
}

fn parse_file(path: &Path) -> Result<AppConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  parse_config(&content)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty listen address
/// - http(s) upstream base URL
/// - Timeout within (0, 300] seconds
/// - Known log level
pub fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.server.listen_addr.trim().is_empty(),
    "server.listen_addr must not be empty"
  );

  let base = &config.upstream.base_url;
  anyhow::ensure!(
    base.starts_with("http://") || base.starts_with("https://"),
    "upstream.base_url must be an http(s) URL, got {base:?}"
  );
  anyhow::ensure!(
    config.upstream.timeout_seconds > 0 && config.upstream.timeout_seconds <= 300,
    "upstream.timeout_seconds must be in (0, 300], got {}",
    config.upstream.timeout_seconds
  );

  let level = config.logging.level.to_ascii_lowercase();
  anyhow::ensure!(
    LOG_LEVELS.contains(&level.as_str()),
    "logging.level must be one of {LOG_LEVELS:?}, got {:?}",
    config.logging.level
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config(Some("nonexistent.toml"), ConfigOverrides::default());
    assert!(result.is_err());
  }

  #[test]
  fn test_load_reports_source_file() {
    let path = std::env::temp_dir().join(format!("coin-fetcher-{}.toml", std::process::id()));
    std::fs::write(&path, "[server]\nlisten_addr = \":7001\"\n").unwrap();

    let (config, source) = load_config(
      path.to_str(),
      ConfigOverrides {
        log_level: Some("debug".to_string()),
        ..ConfigOverrides::default()
      },
    )
    .unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(source.as_deref(), Some(path.as_path()));
    assert_eq!(config.server.bind_addr(), "0.0.0.0:7001");
    assert_eq!(config.logging.level, "debug");
  }

  #[test]
  fn test_partial_file_keeps_defaults() {
    let config = parse_config(
      r#"
        [server]
        listen_addr = "127.0.0.1:7000"

        [logging]
        json = false
      "#,
    )
    .unwrap();

    assert_eq!(config.server.listen_addr, "127.0.0.1:7000");
    assert!(!config.logging.json);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.upstream.timeout_seconds, 10);
    assert!(validate_config(&config).is_ok());
  }

  #[test]
  fn test_rejects_zero_timeout() {
    let config = parse_config("[upstream]\ntimeout_seconds = 0\n").unwrap();
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("timeout_seconds"));
  }

  #[test]
  fn test_rejects_non_http_base_url() {
    let config = parse_config("[upstream]\nbase_url = \"ftp://example.com\"\n").unwrap();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_rejects_unknown_log_level() {
    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();
    assert!(validate_config(&config).is_err());
  }
}
