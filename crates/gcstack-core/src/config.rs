//! Service configuration.
//!
//! [`ServerConfig`] carries everything the server binary needs: the listen
//! address, the optional externally advertised URL, startup bucket seeding,
//! and the log level. Values load from environment variables with defaults
//! matching the emulator's conventions.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Server configuration.
///
/// # Examples
///
/// ```
/// use gcstack_core::config::ServerConfig;
///
/// let config = ServerConfig::default();
/// assert_eq!(config.listen_addr, "0.0.0.0:4443");
/// assert!(config.external_url.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Bind address for the RPC listener (e.g. `"0.0.0.0:4443"`).
    #[builder(default = String::from("0.0.0.0:4443"))]
    pub listen_addr: String,

    /// Externally advertised URL. When empty, callers are given the bound
    /// listen address instead.
    #[builder(default = String::new())]
    pub external_url: String,

    /// Comma-separated bucket names created at startup.
    #[builder(default = String::new())]
    pub initial_buckets: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: String::from("0.0.0.0:4443"),
            external_url: String::new(),
            initial_buckets: String::new(),
            log_level: String::from("info"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LISTEN_ADDR` | `0.0.0.0:4443` |
    /// | `EXTERNAL_URL` | *(empty)* |
    /// | `INITIAL_BUCKETS` | *(empty)* |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("LISTEN_ADDR") {
            config.listen_addr = v;
        }
        if let Ok(v) = std::env::var("EXTERNAL_URL") {
            config.external_url = v;
        }
        if let Ok(v) = std::env::var("INITIAL_BUCKETS") {
            config.initial_buckets = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// The bucket names to create at startup.
    #[must_use]
    pub fn seed_buckets(&self) -> Vec<&str> {
        self.initial_buckets
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
