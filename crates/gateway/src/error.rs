use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use helm_rpc::{ClientError, RpcStatus, StatusCode as RpcCode};
use serde::{Deserialize, Serialize};

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError {
            code: "INVALID_JSON".to_string(),
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn invalid_header(name: &str, reason: impl std::fmt::Display) -> Self {
        ApiError {
            code: RpcCode::InvalidArgument.as_str().to_string(),
            message: format!("Illegal header '{}': {}", name, reason),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn gateway_unavailable(message: impl Into<String>) -> Self {
        ApiError {
            code: "GATEWAY_UNAVAILABLE".to_string(),
            message: message.into(),
            status: StatusCode::BAD_GATEWAY,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            code: RpcCode::Internal.as_str().to_string(),
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// HTTP status for an RPC status code
pub fn http_status(code: RpcCode) -> StatusCode {
    match code {
        RpcCode::InvalidArgument | RpcCode::FailedPrecondition => StatusCode::BAD_REQUEST,
        RpcCode::NotFound => StatusCode::NOT_FOUND,
        RpcCode::AlreadyExists => StatusCode::CONFLICT,
        // Client closed request
        RpcCode::Cancelled => StatusCode::from_u16(499).unwrap_or(StatusCode::BAD_REQUEST),
        RpcCode::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        RpcCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        RpcCode::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        RpcCode::Unknown | RpcCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<RpcStatus> for ApiError {
    fn from(status: RpcStatus) -> Self {
        ApiError {
            code: status.code.as_str().to_string(),
            status: http_status(status.code),
            message: status.message,
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status(status) => ApiError::from(status),
            ClientError::Transport(e) => ApiError::gateway_unavailable(e.to_string()),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            code: self.code,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(http_status(RpcCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(http_status(RpcCode::Cancelled).as_u16(), 499);
        assert_eq!(
            http_status(RpcCode::Unimplemented),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            http_status(RpcCode::FailedPrecondition),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_message_is_kept() {
        let err = ApiError::from(RpcStatus::new(RpcCode::NotFound, "exchange Nope not found"));
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(err.message, "exchange Nope not found");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
