//! Error types for the RPC crate

use helm_ports::EngineError;
use thiserror::Error;

use crate::status::RpcStatus;

/// A wire value could not be turned into a domain value (or back)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

/// Outcome of a failed service call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// Reserved sentinel for operations that are declared but not served
    #[error("not yet implemented")]
    NotYetImplemented,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("forex rates is empty")]
    ForexRatesEmpty,

    #[error("call cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Transport-level errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    #[error("Frame of {size} bytes exceeds limit of {max} bytes")]
    FrameTooLarge { size: usize, max: usize },

    #[error("Channel closed")]
    ChannelClosed,
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        TransportError::Connection(e.to_string())
    }
}

/// Errors seen by an RPC client
///
/// `Transport` means the call never produced an answer; `Status` is the
/// answer the service gave.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Status(RpcStatus),

    #[error("unexpected {got} response to {expected}")]
    UnexpectedResponse {
        expected: &'static str,
        got: &'static str,
    },
}

impl ClientError {
    /// The service status, if the call reached the service
    pub fn status(&self) -> Option<&RpcStatus> {
        match self {
            ClientError::Status(status) => Some(status),
            _ => None,
        }
    }
}

pub type RpcResult<T> = std::result::Result<T, RpcError>;
