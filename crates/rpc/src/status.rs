//! Wire form of a failed call

use std::fmt;

use helm_ports::EngineError;
use serde::{Deserialize, Serialize};

use crate::error::RpcError;

/// Closed set of failure kinds a caller can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    FailedPrecondition,
    Unimplemented,
    Internal,
    Unavailable,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Cancelled => "CANCELLED",
            StatusCode::Unknown => "UNKNOWN",
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::AlreadyExists => "ALREADY_EXISTS",
            StatusCode::FailedPrecondition => "FAILED_PRECONDITION",
            StatusCode::Unimplemented => "UNIMPLEMENTED",
            StatusCode::Internal => "INTERNAL",
            StatusCode::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcStatus {
    pub code: StatusCode,
    pub message: String,
}

impl RpcStatus {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_not_yet_implemented(&self) -> bool {
        *self == RpcStatus::from(&RpcError::NotYetImplemented)
    }
}

impl fmt::Display for RpcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

fn engine_code(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UnknownExchange(_)
        | EngineError::NoTickerData { .. }
        | EngineError::NoOrderbookData { .. }
        | EngineError::UnknownEvent(_) => StatusCode::NotFound,
        EngineError::ExchangeAlreadyEnabled(_) => StatusCode::AlreadyExists,
        EngineError::ExchangeNotEnabled(_) => StatusCode::FailedPrecondition,
        EngineError::InvalidEvent(_) => StatusCode::InvalidArgument,
        EngineError::Unavailable(_) => StatusCode::Unavailable,
        EngineError::Cancelled => StatusCode::Cancelled,
    }
}

impl From<&RpcError> for RpcStatus {
    fn from(err: &RpcError) -> Self {
        let code = match err {
            RpcError::NotYetImplemented => StatusCode::Unimplemented,
            RpcError::Engine(e) => engine_code(e),
            RpcError::Translation(_) => StatusCode::InvalidArgument,
            RpcError::ForexRatesEmpty => StatusCode::Unavailable,
            RpcError::Cancelled => StatusCode::Cancelled,
            RpcError::DeadlineExceeded => StatusCode::DeadlineExceeded,
        };
        RpcStatus::new(code, err.to_string())
    }
}

impl From<RpcError> for RpcStatus {
    fn from(err: RpcError) -> Self {
        RpcStatus::from(&err)
    }
}
