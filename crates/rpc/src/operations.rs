//! Operation table
//!
//! Every control-plane operation is listed exactly once in the
//! `operations!` invocation below. The method identity, the request and
//! response enums, the HTTP path and the zero-valued response all derive
//! from that table, so the transports can never disagree about which
//! operations exist.

use serde::{Deserialize, Serialize};

use crate::messages::*;

macro_rules! operations {
    ($(
        $method:ident($req:ty) -> $resp:ty, implemented = $implemented:literal;
    )*) => {
        /// Identity of an operation
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Method {
            $($method,)*
        }

        impl Method {
            pub const ALL: &'static [Method] = &[$(Method::$method,)*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Method::$method => stringify!($method),)*
                }
            }

            /// Whether the operation is backed by the engine
            pub fn is_implemented(&self) -> bool {
                match self {
                    $(Method::$method => $implemented,)*
                }
            }
        }

        /// A request for any operation
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum Request {
            $($method($req),)*
        }

        impl Request {
            pub fn method(&self) -> Method {
                match self {
                    $(Request::$method(_) => Method::$method,)*
                }
            }

            /// Decode the JSON body of `method`
            pub fn from_json(
                method: Method,
                value: serde_json::Value,
            ) -> Result<Self, serde_json::Error> {
                match method {
                    $(Method::$method => serde_json::from_value::<$req>(value).map(Request::$method),)*
                }
            }

            /// All-default request for `method`
            pub fn empty(method: Method) -> Self {
                match method {
                    $(Method::$method => Request::$method(<$req>::default()),)*
                }
            }
        }

        /// A successful response of any operation
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum Response {
            $($method($resp),)*
        }

        impl Response {
            pub fn method(&self) -> Method {
                match self {
                    $(Response::$method(_) => Method::$method,)*
                }
            }

            /// Zero-valued response of `method`
            pub fn zero(method: Method) -> Self {
                match method {
                    $(Method::$method => Response::$method(<$resp>::default()),)*
                }
            }

            pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
                match self {
                    $(Response::$method(inner) => serde_json::to_value(inner),)*
                }
            }
        }
    };
}

operations! {
    GetExchanges(GetExchangesRequest) -> GetExchangesResponse, implemented = true;
    EnableExchange(GenericExchangeNameRequest) -> GenericExchangeNameResponse, implemented = true;
    DisableExchange(GenericExchangeNameRequest) -> GenericExchangeNameResponse, implemented = true;
    GetTicker(GetTickerRequest) -> TickerResponse, implemented = true;
    GetTickers(GetTickersRequest) -> GetTickersResponse, implemented = true;
    GetOrderbook(GetOrderbookRequest) -> OrderbookResponse, implemented = true;
    GetOrderbooks(GetOrderbooksRequest) -> GetOrderbooksResponse, implemented = false;
    GetConfig(GetConfigRequest) -> GetConfigResponse, implemented = false;
    GetPortfolio(GetPortfolioRequest) -> GetPortfolioResponse, implemented = true;
    AddPortfolioAddress(AddPortfolioAddressRequest) -> AddPortfolioAddressResponse, implemented = true;
    RemovePortfolioAddress(RemovePortfolioAddressRequest) -> RemovePortfolioAddressResponse, implemented = true;
    GetForexRates(GetForexRatesRequest) -> GetForexRatesResponse, implemented = true;
    GetOrders(GetOrdersRequest) -> GetOrdersResponse, implemented = false;
    GetOrder(GetOrderRequest) -> OrderDetails, implemented = false;
    SubmitOrder(SubmitOrderRequest) -> SubmitOrderResponse, implemented = false;
    CancelOrder(CancelOrderRequest) -> CancelOrderResponse, implemented = false;
    CancelAllOrders(CancelAllOrdersRequest) -> CancelAllOrdersResponse, implemented = false;
    GetEvents(GetEventsRequest) -> GetEventsResponse, implemented = false;
    AddEvent(AddEventRequest) -> AddEventResponse, implemented = true;
    RemoveEvent(RemoveEventRequest) -> RemoveEventResponse, implemented = true;
    GetCryptocurrencyDepositAddresses(GetCryptocurrencyDepositAddressesRequest) -> GetCryptocurrencyDepositAddressesResponse, implemented = false;
    GetCryptocurrencyDepositAddress(GetCryptocurrencyDepositAddressRequest) -> GetCryptocurrencyDepositAddressResponse, implemented = false;
    WithdrawCryptocurrencyFunds(WithdrawCurrencyRequest) -> WithdrawResponse, implemented = false;
    WithdrawFiatFunds(WithdrawCurrencyRequest) -> WithdrawResponse, implemented = false;
}

impl Method {
    /// HTTP path served by the gateway, `/v1/<lowercase name>`
    pub fn http_path(&self) -> String {
        format!("/v1/{}", self.name().to_lowercase())
    }

    /// Read-only and parameterless, so also reachable with `GET`
    pub fn allows_get(&self) -> bool {
        matches!(
            self,
            Method::GetExchanges
                | Method::GetTickers
                | Method::GetPortfolio
                | Method::GetForexRates
                | Method::GetOrderbooks
                | Method::GetConfig
                | Method::GetEvents
        )
    }

    pub fn from_name(name: &str) -> Option<Method> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
