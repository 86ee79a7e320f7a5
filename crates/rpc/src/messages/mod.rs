//! Wire message types for the control-plane RPC
//!
//! These are the request/response shapes of every operation, shared by the
//! binary transport (bincode) and the HTTP/JSON gateway (serde_json), so
//! field names are identical on both.
//!
//! Every struct is `#[serde(default)]`: an absent JSON field decodes to its
//! zero value and the translation layer decides whether that is acceptable.
//! Decimals travel as strings, timestamps as whole Unix seconds.

pub mod account;
pub mod event;
pub mod exchange;
pub mod market_data;
pub mod order;
pub mod portfolio;

pub use account::{
    GetConfigRequest, GetConfigResponse, GetCryptocurrencyDepositAddressRequest,
    GetCryptocurrencyDepositAddressResponse, GetCryptocurrencyDepositAddressesRequest,
    GetCryptocurrencyDepositAddressesResponse, WithdrawCurrencyRequest, WithdrawResponse,
};
pub use event::{
    AddEventRequest, AddEventResponse, ConditionParams, GetEventsRequest, GetEventsResponse,
    RemoveEventRequest, RemoveEventResponse,
};
pub use exchange::{
    GenericExchangeNameRequest, GenericExchangeNameResponse, GetExchangesRequest,
    GetExchangesResponse,
};
pub use market_data::{
    CurrencyPair, GetForexRatesRequest, GetForexRatesResponse, GetOrderbookRequest,
    GetOrderbooksRequest, GetOrderbooksResponse, GetTickerRequest, GetTickersRequest,
    GetTickersResponse, OrderbookItem, OrderbookResponse, Orderbooks, TickerResponse, Tickers,
};
pub use order::{
    CancelAllOrdersRequest, CancelAllOrdersResponse, CancelOrderRequest, CancelOrderResponse,
    GetOrderRequest, GetOrdersRequest, GetOrdersResponse, OrderDetails, SubmitOrderRequest,
    SubmitOrderResponse,
};
pub use portfolio::{
    AddPortfolioAddressRequest, AddPortfolioAddressResponse, GetPortfolioRequest,
    GetPortfolioResponse, PortfolioAddress, RemovePortfolioAddressRequest,
    RemovePortfolioAddressResponse,
};
