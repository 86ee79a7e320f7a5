use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{Json, body::Bytes, http::HeaderMap};
use helm_rpc::{Method, Request};
use log::debug;
use serde_json::Value;

use super::error::ApiError;
use super::router::AppState;

/// Per-call deadline override, in milliseconds
pub const TIMEOUT_HEADER: &str = "x-request-timeout-ms";

/// POST /v1/<method>
///
/// An empty body is the all-default request.
pub async fn post_call(
    method: Method,
    state: Arc<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::invalid_json(e.to_string()))?
    };
    invoke(method, &state, &headers, value).await
}

/// GET /v1/<method>, query parameters become request fields
pub async fn get_call(
    method: Method,
    state: Arc<AppState>,
    headers: HeaderMap,
    params: HashMap<String, String>,
) -> Result<Json<Value>, ApiError> {
    invoke(method, &state, &headers, query_to_json(params)).await
}

async fn invoke(
    method: Method,
    state: &AppState,
    headers: &HeaderMap,
    value: Value,
) -> Result<Json<Value>, ApiError> {
    let request =
        Request::from_json(method, value).map_err(|e| ApiError::invalid_json(e.to_string()))?;
    let timeout = request_timeout(headers)?.unwrap_or(state.default_timeout);

    debug!("Gateway -> {} (timeout {:?})", method, timeout);
    let response = state.rpc.request(request, Some(timeout)).await?;
    let body = response
        .to_json()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(body))
}

fn request_timeout(headers: &HeaderMap) -> Result<Option<Duration>, ApiError> {
    let Some(raw) = headers.get(TIMEOUT_HEADER) else {
        return Ok(None);
    };
    let ms = raw
        .to_str()
        .map_err(|e| ApiError::invalid_header(TIMEOUT_HEADER, e))?
        .trim()
        .parse::<u64>()
        .map_err(|e| ApiError::invalid_header(TIMEOUT_HEADER, e))?;
    Ok(Some(Duration::from_millis(ms)))
}

fn query_to_json(params: HashMap<String, String>) -> Value {
    let fields = params
        .into_iter()
        .map(|(key, raw)| {
            let value = match raw.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(raw),
            };
            (key, value)
        })
        .collect();
    Value::Object(fields)
}
