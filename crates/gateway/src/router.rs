use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
    routing::post,
};
use helm_rpc::{Method, Requester};
use tower_http::trace::TraceLayer;

use super::handlers;

/// State shared across handlers
pub struct AppState {
    pub rpc: Arc<dyn Requester>,
    /// Deadline when the request carries none
    pub default_timeout: Duration,
}

impl AppState {
    pub fn new(rpc: Arc<dyn Requester>, default_timeout: Duration) -> Self {
        AppState {
            rpc,
            default_timeout,
        }
    }
}

/// Create the gateway router: one route per operation
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router: Router<Arc<AppState>> = Router::new();

    for &method in Method::ALL {
        let mut route = post(
            move |State(state): State<Arc<AppState>>, headers: HeaderMap, body: Bytes| {
                handlers::post_call(method, state, headers, body)
            },
        );
        if method.allows_get() {
            route = route.get(
                move |State(state): State<Arc<AppState>>,
                      headers: HeaderMap,
                      Query(params): Query<HashMap<String, String>>| {
                    handlers::get_call(method, state, headers, params)
                },
            );
        }
        router = router.route(&method.http_path(), route);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
