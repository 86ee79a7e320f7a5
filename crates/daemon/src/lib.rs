//! Helm Daemon
//!
//! Wires the in-memory engine, the RPC server and the HTTP gateway into one
//! process. The `helmd` binary is a thin shell around [`Daemon`]: it parses
//! [`DaemonArgs`], loads [`DaemonConfig`], starts the daemon and shuts it
//! down on Ctrl-C.

pub mod args;
pub mod config;
mod daemon;

pub use args::DaemonArgs;
pub use config::{ConfigError, DaemonConfig, GatewaySettings, RpcSettings};
pub use daemon::{Daemon, DaemonError};
