//! Configuration loading for the daemon
//!
//! A single JSON file covers:
//! - The binary RPC listener
//! - The HTTP gateway (listener, upstream endpoint, default deadline)
//! - Engine seed state (exchanges, forex rates, portfolio)
//!
//! Every section has defaults, so `{}` is a valid configuration.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use helm_engine::EngineConfig;
use helm_gateway::GatewayConfig;
use helm_rpc::TransportConfig;
use helm_rpc::transport::DEFAULT_MAX_FRAME_BYTES;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root configuration for the daemon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub rpc: RpcSettings,
    pub gateway: GatewaySettings,
    pub engine: EngineConfig,
}

/// Binary RPC listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcSettings {
    pub listen: SocketAddr,
    pub max_frame_bytes: usize,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 4444)),
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

/// HTTP gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub enabled: bool,
    pub listen: SocketAddr,
    /// Upstream RPC endpoint; the daemon's own listener when absent
    pub rpc_endpoint: Option<SocketAddr>,
    pub request_timeout_ms: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            listen: SocketAddr::from(([127, 0, 0, 1], 4445)),
            rpc_endpoint: None,
            request_timeout_ms: 30_000,
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::with_max_frame_bytes(self.rpc.max_frame_bytes)
    }

    /// Gateway settings resolved against the RPC address actually bound
    pub fn gateway_config(&self, bound_rpc: SocketAddr) -> GatewayConfig {
        GatewayConfig {
            rpc_endpoint: self.gateway.rpc_endpoint.unwrap_or(bound_rpc),
            request_timeout: Duration::from_millis(self.gateway.request_timeout_ms),
            transport: self.transport(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = DaemonConfig::from_json("{}").unwrap();
        assert_eq!(config, DaemonConfig::default());
        assert_eq!(config.rpc.listen.to_string(), "127.0.0.1:4444");
        assert_eq!(config.gateway.listen.to_string(), "127.0.0.1:4445");
        assert!(config.gateway.enabled);
    }

    #[test]
    fn test_gateway_endpoint_defaults_to_bound_rpc() {
        let config = DaemonConfig::default();
        let bound: SocketAddr = "127.0.0.1:5555".parse().unwrap();
        let gateway = config.gateway_config(bound);
        assert_eq!(gateway.rpc_endpoint, bound);
        assert_eq!(gateway.request_timeout, Duration::from_secs(30));
        assert_eq!(gateway.transport.max_frame_bytes, DEFAULT_MAX_FRAME_BYTES);
    }

    #[test]
    fn test_parse_error() {
        let err = DaemonConfig::from_json("{\"rpc\": 5}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
