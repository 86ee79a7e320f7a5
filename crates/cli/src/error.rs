use helm_rpc::{ClientError, RpcStatus, TransportError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot resolve {host}: {reason}")]
    Resolve { host: String, reason: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{}", .0.message)]
    Status(RpcStatus),

    #[error(transparent)]
    Client(ClientError),

    #[error(transparent)]
    Output(#[from] serde_json::Error),
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(e) => CliError::Transport(e),
            ClientError::Status(status) => CliError::Status(status),
            other => CliError::Client(other),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Resolve { .. } | Self::Transport(_) => 2,
            Self::Status(_) | Self::Client(_) => 1,
            Self::Output(_) => 3,
        }
    }
}
