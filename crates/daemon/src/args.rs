//! Command-line flags for helmd

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, DaemonConfig};

#[derive(Debug, Parser)]
#[command(name = "helmd", author, version, about = "helm trading daemon")]
pub struct DaemonArgs {
    /// JSON configuration file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Override the RPC listen address.
    #[arg(long, env = "HELM_RPC_LISTEN")]
    pub rpc_listen: Option<SocketAddr>,

    /// Override the gateway listen address.
    #[arg(long, env = "HELM_GATEWAY_LISTEN")]
    pub gateway_listen: Option<SocketAddr>,

    /// Run without the HTTP gateway.
    #[arg(long)]
    pub no_gateway: bool,
}

impl DaemonArgs {
    /// Load the configuration file (or defaults) and apply flag overrides
    pub fn load_config(&self) -> Result<DaemonConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => DaemonConfig::from_file(path)?,
            None => DaemonConfig::default(),
        };
        Ok(self.apply(config))
    }

    pub fn apply(&self, mut config: DaemonConfig) -> DaemonConfig {
        if let Some(addr) = self.rpc_listen {
            config.rpc.listen = addr;
        }
        if let Some(addr) = self.gateway_listen {
            config.gateway.listen = addr;
        }
        if self.no_gateway {
            config.gateway.enabled = false;
        }
        config
    }
}
