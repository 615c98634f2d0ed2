//! CryptoNote RPC Proxy Configuration Module
//!
//! This module provides the proxy configuration and the daemon RPC routes and
//! status strings the proxy relies on.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default daemon RPC host
pub const DEFAULT_NODE_HOST: &str = "127.0.0.1";
/// Default daemon RPC port
pub const DEFAULT_NODE_PORT: u16 = 8081;
/// Default delay between two node status polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;
/// Default per-request timeout
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 10_000;

/// Status string of a successful daemon response
pub const CORE_RPC_STATUS_OK: &str = "OK";
/// Status string of a daemon that is still synchronizing
pub const CORE_RPC_STATUS_BUSY: &str = "BUSY";

/// Daemon RPC routes
pub mod routes {
    /// Single endpoint for JSON-RPC enveloped calls
    pub const JSON_RPC: &str = "/json_rpc";
    /// Node info (connection counts, height)
    pub const GET_INFO: &str = "/getinfo";
    /// Relay a hex-encoded transaction
    pub const SEND_RAW_TRANSACTION: &str = "/sendrawtransaction";
    /// Random outputs for mixing
    pub const GET_RANDOM_OUTS: &str = "/getrandom_outs.bin";
    /// Blocks following the known block ids
    pub const GET_BLOCKS: &str = "/getblocks.bin";
    /// Global output indices of a transaction
    pub const GET_OUTPUT_INDEXES: &str = "/get_o_indexes.bin";
    /// Blocks following the known block ids, filtered by timestamp
    pub const QUERY_BLOCKS: &str = "/queryblocks.bin";
}

/// JSON-RPC method names
pub mod methods {
    /// Header of the chain tip
    pub const GET_LAST_BLOCK_HEADER: &str = "getlastblockheader";
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds an unusable value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Node RPC proxy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Daemon RPC host name or address
    pub node_host: String,
    /// Daemon RPC port
    pub node_port: u16,
    /// Delay between the end of one status poll and the start of the next
    pub poll_interval_ms: u64,
    /// Timeout applied to every HTTP exchange
    pub rpc_timeout_ms: u64,
    /// Optional basic-auth user
    pub rpc_user: Option<String>,
    /// Optional basic-auth password
    pub rpc_password: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            node_host: DEFAULT_NODE_HOST.to_string(),
            node_port: DEFAULT_NODE_PORT,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            rpc_timeout_ms: DEFAULT_RPC_TIMEOUT_MS,
            rpc_user: None,
            rpc_password: None,
        }
    }
}

impl ProxyConfig {
    /// Creates a configuration for the given daemon with default timings.
    pub fn new(node_host: impl Into<String>, node_port: u16) -> Self {
        Self {
            node_host: node_host.into(),
            node_port,
            ..Self::default()
        }
    }

    /// Sets the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the RPC timeout.
    #[must_use]
    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets basic-auth credentials.
    #[must_use]
    pub fn with_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.rpc_user = Some(user.into());
        self.rpc_password = Some(password.into());
        self
    }

    /// Poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// RPC timeout as a `Duration`.
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    /// Base URL of the daemon, e.g. `http://127.0.0.1:8081/`.
    pub fn base_url(&self) -> ConfigResult<Url> {
        Url::parse(&format!("http://{}:{}/", self.node_host, self.node_port))
            .map_err(|e| ConfigError::Invalid(format!("node address: {e}")))
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.node_host.trim().is_empty() {
            return Err(ConfigError::Invalid("node_host is empty".to_string()));
        }
        if self.node_port == 0 {
            return Err(ConfigError::Invalid("node_port must be non-zero".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be non-zero".to_string(),
            ));
        }
        if self.rpc_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "rpc_timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.rpc_user.is_some() != self.rpc_password.is_some() {
            return Err(ConfigError::Invalid(
                "rpc_user and rpc_password must be set together".to_string(),
            ));
        }
        self.base_url().map(|_| ())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: ProxyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("Loading proxy configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_daemon_conventions() {
        let config = ProxyConfig::default();
        assert_eq!(config.node_host, "127.0.0.1");
        assert_eq!(config.node_port, 8081);
        assert_eq!(config.poll_interval(), Duration::from_millis(10_000));
        assert_eq!(config.rpc_timeout(), Duration::from_millis(10_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_url_joins_routes() {
        let config = ProxyConfig::new("node.example", 18081);
        let url = config.base_url().unwrap().join(routes::GET_INFO).unwrap();
        assert_eq!(url.as_str(), "http://node.example:18081/getinfo");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = ProxyConfig::from_toml_str(
            r#"
            node_host = "10.0.0.5"
            poll_interval_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.node_host, "10.0.0.5");
        assert_eq!(config.node_port, DEFAULT_NODE_PORT);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn validation_rejects_unusable_values() {
        assert!(ProxyConfig::new("", 8081).validate().is_err());
        assert!(ProxyConfig::new("localhost", 0).validate().is_err());
        assert!(ProxyConfig::default()
            .with_poll_interval(Duration::ZERO)
            .validate()
            .is_err());

        let mut half_auth = ProxyConfig::default();
        half_auth.rpc_user = Some("user".to_string());
        assert!(matches!(half_auth.validate(), Err(ConfigError::Invalid(_))));

        assert!(matches!(
            ProxyConfig::from_toml_str("node_port = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ProxyConfig::from_toml_str("node_port = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proxy.toml");
        let config = ProxyConfig::new("daemon.local", 28081)
            .with_poll_interval(Duration::from_secs(3))
            .with_auth("user", "secret");

        config.save_to_file(&path).unwrap();
        let loaded = ProxyConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
