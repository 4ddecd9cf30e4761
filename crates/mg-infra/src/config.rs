//! Client configuration loading.
//!
//! Values resolve in three layers, later sources winning: built-in
//! defaults, an optional config file, then `MINGLE_`-prefixed environment
//! variables (`MINGLE_API_BASE_URL`, `MINGLE_RETRY_ATTEMPTS`, ...).

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::net::StatusClientConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
    pub status_cache_ttl_secs: u64,
    pub startup_budget_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.mingle.app".to_string(),
            request_timeout_secs: 10,
            retry_attempts: 3,
            retry_backoff_ms: 200,
            status_cache_ttl_secs: 5,
            startup_budget_secs: 8,
        }
    }
}

impl ClientConfig {
    /// Load configuration, optionally merging a config file under the
    /// environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix("MINGLE").try_parsing(true))
            .build()
            .context("Failed to assemble client configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse client configuration")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn status_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.status_cache_ttl_secs)
    }

    /// How long startup routing may stay on the loading screen before the
    /// gate falls back to the auth stack.
    pub fn startup_budget(&self) -> Duration {
        Duration::from_secs(self.startup_budget_secs)
    }

    pub fn status_client_config(&self) -> StatusClientConfig {
        StatusClientConfig {
            base_url: self.api_base_url.clone(),
            timeout: self.request_timeout(),
            retry_attempts: self.retry_attempts,
            retry_backoff: self.retry_backoff(),
            cache_ttl: self.status_cache_ttl(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // load() reads process environment, so tests that touch it serialize.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_are_sane() {
        let config = ClientConfig::default();

        assert!(config.api_base_url.starts_with("https://"));
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.status_cache_ttl(), Duration::from_secs(5));
        assert!(config.startup_budget() > Duration::ZERO);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config = ClientConfig::load(Some(&temp_dir.path().join("nope.toml"))).unwrap();

        assert_eq!(config.api_base_url, ClientConfig::default().api_base_url);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mingle.toml");
        std::fs::write(
            &path,
            "api_base_url = \"https://staging.mingle.app\"\nretry_attempts = 1\n",
        )
        .unwrap();

        let config = ClientConfig::load(Some(&path)).unwrap();

        assert_eq!(config.api_base_url, "https://staging.mingle.app");
        assert_eq!(config.retry_attempts, 1);
        // Untouched keys keep their defaults.
        assert_eq!(config.retry_backoff_ms, 200);
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mingle.toml");
        std::fs::write(&path, "retry_attempts = 1\n").unwrap();

        std::env::set_var("MINGLE_RETRY_ATTEMPTS", "5");
        let config = ClientConfig::load(Some(&path));
        std::env::remove_var("MINGLE_RETRY_ATTEMPTS");

        assert_eq!(config.unwrap().retry_attempts, 5);
    }

    #[test]
    fn test_status_client_config_mirrors_the_loaded_values() {
        let config = ClientConfig {
            api_base_url: "https://api.mingle.app".to_string(),
            request_timeout_secs: 3,
            retry_attempts: 2,
            retry_backoff_ms: 50,
            status_cache_ttl_secs: 1,
            startup_budget_secs: 4,
        };

        let client_config = config.status_client_config();

        assert_eq!(client_config.base_url, "https://api.mingle.app");
        assert_eq!(client_config.timeout, Duration::from_secs(3));
        assert_eq!(client_config.retry_attempts, 2);
        assert_eq!(client_config.retry_backoff, Duration::from_millis(50));
        assert_eq!(client_config.cache_ttl, Duration::from_secs(1));
    }
}
