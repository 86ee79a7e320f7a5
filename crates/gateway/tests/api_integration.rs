//! Integration tests for the HTTP gateway
//!
//! Drives the axum router with tower's `oneshot` against a real RpcServer
//! backed by the in-memory engine:
//! - Successful calls return the wire struct as JSON
//! - Service errors keep their message and map to HTTP status codes
//! - Malformed bodies and an unreachable RPC endpoint
//! - A dropped HTTP request cancels its RPC call

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use helm_core::{
    AssetType, CurrencyPair, EventId, EventWatch, ExchangeTickers, Orderbook, PortfolioAddress,
    Ticker,
};
use helm_engine::InMemoryEngine;
use helm_gateway::{Gateway, GatewayConfig, TIMEOUT_HEADER};
use helm_ports::{EngineError, EngineFacade, EngineResult, ForexRates};
use helm_rpc::{RpcServer, RpcService, TransportConfig};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

// ============================================================================
// Test Fixtures
// ============================================================================

fn seeded_engine() -> Arc<InMemoryEngine> {
    let engine = InMemoryEngine::new();
    engine.register_exchange("Bitstamp", true);
    engine.register_exchange("Kraken", false);
    engine.update_ticker(
        "Bitstamp",
        AssetType::spot(),
        Ticker {
            pair: CurrencyPair::with_delimiter("BTC", "USD", "-"),
            last_updated: Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap(),
            last: dec!(30000),
            high: dec!(31000),
            low: dec!(29000),
            bid: dec!(29999.5),
            ask: dec!(30000.5),
            volume: dec!(12.5),
            price_ath: dec!(69000),
        },
    );
    Arc::new(engine)
}

/// Facade whose calls park until cancelled
#[derive(Default)]
struct ParkedEngine {
    calls: AtomicUsize,
    /// Calls that have left the engine
    finished: Arc<AtomicUsize>,
}

struct ExitCounter(Arc<AtomicUsize>);

impl Drop for ExitCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl ParkedEngine {
    async fn park(&self, cancel: &CancellationToken) -> EngineError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _exit = ExitCounter(Arc::clone(&self.finished));
        cancel.cancelled().await;
        EngineError::Cancelled
    }
}

#[async_trait]
impl EngineFacade for ParkedEngine {
    async fn list_exchanges(
        &self,
        _enabled_only: bool,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<String>> {
        Err(self.park(cancel).await)
    }

    async fn load_exchange(&self, _name: &str, cancel: &CancellationToken) -> EngineResult<()> {
        Err(self.park(cancel).await)
    }

    async fn unload_exchange(&self, _name: &str, cancel: &CancellationToken) -> EngineResult<()> {
        Err(self.park(cancel).await)
    }

    async fn get_ticker(
        &self,
        _pair: &CurrencyPair,
        _exchange: &str,
        _asset_type: &AssetType,
        cancel: &CancellationToken,
    ) -> EngineResult<Ticker> {
        Err(self.park(cancel).await)
    }

    async fn all_active_tickers(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<ExchangeTickers>> {
        Err(self.park(cancel).await)
    }

    async fn get_orderbook(
        &self,
        _pair: &CurrencyPair,
        _exchange: &str,
        _asset_type: &AssetType,
        cancel: &CancellationToken,
    ) -> EngineResult<Orderbook> {
        Err(self.park(cancel).await)
    }

    async fn exchange_rates(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Option<ForexRates>> {
        Err(self.park(cancel).await)
    }

    async fn list_addresses(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<PortfolioAddress>> {
        Err(self.park(cancel).await)
    }

    async fn add_address(
        &self,
        _address: PortfolioAddress,
        cancel: &CancellationToken,
    ) -> EngineResult<()> {
        Err(self.park(cancel).await)
    }

    async fn remove_address(
        &self,
        _address: &str,
        _coin_type: &str,
        _description: &str,
        cancel: &CancellationToken,
    ) -> EngineResult<()> {
        Err(self.park(cancel).await)
    }

    async fn add_event(
        &self,
        _watch: EventWatch,
        cancel: &CancellationToken,
    ) -> EngineResult<EventId> {
        Err(self.park(cancel).await)
    }

    async fn remove_event(&self, _id: EventId, cancel: &CancellationToken) -> EngineResult<()> {
        Err(self.park(cancel).await)
    }
}

/// Poll `cond` until it holds or two seconds pass
async fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}

async fn start_rpc(engine: Arc<dyn EngineFacade>) -> (SocketAddr, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    let server = RpcServer::new(RpcService::new(engine), TransportConfig::default());
    tokio::spawn(server.serve(listener, shutdown.clone()));
    (addr, shutdown)
}

async fn create_app() -> (Router, Arc<InMemoryEngine>, CancellationToken) {
    let engine = seeded_engine();
    let (addr, shutdown) = start_rpc(engine.clone()).await;
    let gateway = Gateway::connect(GatewayConfig::new(addr)).await.unwrap();
    (gateway.router(), engine, shutdown)
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// ============================================================================
// Successful calls
// ============================================================================

#[tokio::test]
async fn test_get_exchanges_post_and_get() {
    let _ = env_logger::try_init();
    let (app, _engine, _shutdown) = create_app().await;

    let (status, body) = post_json(&app, "/v1/getexchanges", json!({"enabled": true})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"exchanges": "Bitstamp"}));

    let (status, body) = get(&app, "/v1/getexchanges?enabled=false").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exchanges"], "Bitstamp,Kraken");
}

#[tokio::test]
async fn test_get_ticker_field_names() {
    let (app, _engine, _shutdown) = create_app().await;

    let (status, body) = post_json(
        &app,
        "/v1/getticker",
        json!({
            "exchange": "Bitstamp",
            "pair": {"delimiter": "-", "first_currency": "BTC", "second_currency": "USD"},
            "asset_type": "SPOT"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_updated"], 1_700_000_000);
    assert_eq!(body["last"], "30000");
    assert_eq!(body["price_ath"], "69000");
    assert_eq!(body["pair"]["first_currency"], "BTC");
}

#[tokio::test]
async fn test_portfolio_round_trip() {
    let (app, _engine, _shutdown) = create_app().await;

    let (status, body) = post_json(
        &app,
        "/v1/addportfolioaddress",
        json!({"address": "addr1", "coin_type": "BTC", "description": "cold", "balance": "2.5"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, body) = get(&app, "/v1/getportfolio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"portfolio": [
            {"address": "addr1", "coin_type": "BTC", "description": "cold", "balance": "2.5"}
        ]})
    );
}

#[tokio::test]
async fn test_empty_body_is_default_request() {
    let (app, _engine, _shutdown) = create_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/gettickers")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tickers"][0]["exchange"], "Bitstamp");
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_engine_error_keeps_message() {
    let (app, _engine, _shutdown) = create_app().await;

    let (status, body) =
        post_json(&app, "/v1/enableexchange", json!({"exchange": "Nope"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"code": "NOT_FOUND", "message": "exchange Nope not found"})
    );

    let (status, body) =
        post_json(&app, "/v1/disableexchange", json!({"exchange": "Kraken"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "FAILED_PRECONDITION");
}

#[tokio::test]
async fn test_missing_pair_is_invalid_argument() {
    let (app, _engine, _shutdown) = create_app().await;

    let (status, body) =
        post_json(&app, "/v1/getticker", json!({"exchange": "Bitstamp"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert_eq!(body["message"], "missing required field: pair");
}

#[tokio::test]
async fn test_unimplemented_is_501() {
    let (app, _engine, _shutdown) = create_app().await;

    for path in ["/v1/getconfig", "/v1/submitorder", "/v1/withdrawfiatfunds"] {
        let (status, body) = post_json(&app, path, json!({})).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{}", path);
        assert_eq!(
            body,
            json!({"code": "UNIMPLEMENTED", "message": "not yet implemented"})
        );
    }
}

#[tokio::test]
async fn test_forex_unavailable_is_503() {
    let (app, engine, _shutdown) = create_app().await;

    let (status, body) = get(&app, "/v1/getforexrates").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "forex rates is empty");

    engine.set_exchange_rates([("EUR".to_string(), dec!(0.92))].into_iter().collect());
    let (status, body) = get(&app, "/v1/getforexrates").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forex_rates"]["EUR"], "0.92");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (app, _engine, _shutdown) = create_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/getexchanges")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");

    // Well-formed JSON of the wrong shape
    let (status, body) = post_json(&app, "/v1/getexchanges", json!({"enabled": "yes"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_timeout_header_is_validated() {
    let (app, _engine, _shutdown) = create_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/getexchanges")
        .header(TIMEOUT_HEADER, "later")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/getexchanges")
        .header(TIMEOUT_HEADER, "5000")
        .body(Body::empty())
        .unwrap();
    let (status, _body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let (app, _engine, _shutdown) = create_app().await;
    let (status, _body) = get(&app, "/v1/nosuchmethod").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_not_allowed_on_mutations() {
    let (app, _engine, _shutdown) = create_app().await;
    let (status, _body) = get(&app, "/v1/enableexchange").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// RPC availability
// ============================================================================

#[tokio::test]
async fn test_connect_requires_serving_rpc() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    assert!(Gateway::connect(GatewayConfig::new(addr)).await.is_err());
}

#[tokio::test]
async fn test_rpc_down_is_502() {
    let (app, _engine, shutdown) = create_app().await;
    shutdown.cancel();

    // Let the server close the connection, then fail to redial
    tokio::time::sleep(Duration::from_millis(200)).await;
    let (status, body) = get(&app, "/v1/gettickers").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "GATEWAY_UNAVAILABLE");
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_dropped_http_request_cancels_rpc_call() {
    let engine = Arc::new(ParkedEngine::default());
    let (addr, _shutdown) = start_rpc(engine.clone()).await;
    let gateway = Gateway::connect(GatewayConfig::new(addr)).await.unwrap();
    let app = gateway.router();

    let request = Request::builder()
        .uri("/v1/getexchanges")
        .body(Body::empty())
        .unwrap();
    let timed_out = tokio::time::timeout(Duration::from_millis(100), app.oneshot(request)).await;
    assert!(timed_out.is_err());

    assert!(wait_until(|| engine.finished.load(Ordering::SeqCst) == 1).await);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
}
