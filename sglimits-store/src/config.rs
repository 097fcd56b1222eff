//! Configuration management.

use serde::{Deserialize, Serialize};
use sglimits_core::StatusMode;
use sglimits_fetch::{
    CollectSettings, DEFAULT_STATUS_CONCURRENCY, DEFAULT_TENANT_CONCURRENCY, DEFAULT_TIMEOUT_SECS,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_config_path, default_credentials_path, DEFAULT_OUTPUT_PATH};

/// Default provider API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.sendgrid.com";

/// Application configuration.
///
/// Every field has a default, so a partial (or missing) file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tenant credentials file.
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
    /// Metrics file written at the end of a run.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Provider API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Tenants collected concurrently.
    #[serde(default = "default_tenant_concurrency")]
    pub tenant_concurrency: usize,
    /// Status checks in flight per tenant.
    #[serde(default = "default_status_concurrency")]
    pub status_concurrency: usize,
    /// Whether status checks re-enable sub-accounts first.
    #[serde(default)]
    pub status_mode: StatusMode,
    /// Upper bound for the whole collection run, in seconds.
    #[serde(default)]
    pub run_deadline_secs: Option<u64>,
    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_tenant_concurrency() -> usize {
    DEFAULT_TENANT_CONCURRENCY
}

fn default_status_concurrency() -> usize {
    DEFAULT_STATUS_CONCURRENCY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            output_path: default_output_path(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            tenant_concurrency: default_tenant_concurrency(),
            status_concurrency: default_status_concurrency(),
            status_mode: StatusMode::default(),
            run_deadline_secs: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults. The result is validated.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.tenant_concurrency == 0 {
            return Err(StoreError::Config("tenant_concurrency must be at least 1".into()));
        }
        if self.status_concurrency == 0 {
            return Err(StoreError::Config("status_concurrency must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(StoreError::Config("request_timeout_secs must be at least 1".into()));
        }
        if self.run_deadline_secs == Some(0) {
            return Err(StoreError::Config("run_deadline_secs must be at least 1".into()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(StoreError::Config("api_base_url is empty".into()));
        }
        Ok(())
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Settings for the collection run.
    pub fn collect_settings(&self) -> CollectSettings {
        let settings = CollectSettings::default()
            .with_status_mode(self.status_mode)
            .with_tenant_concurrency(self.tenant_concurrency)
            .with_status_concurrency(self.status_concurrency);

        match self.run_deadline_secs {
            Some(secs) => settings.with_deadline(Duration::from_secs(secs)),
            None => settings,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.request_timeout_secs, 8);
        assert_eq!(config.status_mode, StatusMode::Heal);
        assert!(config.run_deadline_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"output_path": "/tmp/out.prom", "status_mode": "read_only", "run_deadline_secs": 60}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.prom"));
        assert_eq!(config.status_mode, StatusMode::ReadOnly);
        assert_eq!(config.tenant_concurrency, DEFAULT_TENANT_CONCURRENCY);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        let settings = config.collect_settings();
        assert_eq!(settings.status_mode, StatusMode::ReadOnly);
        assert_eq!(settings.deadline, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"tenant_concurrency": 0}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(Config::load_from(&path), Err(StoreError::Config(_))));
    }
}
