//! Order management messages
//!
//! The daemon accepts these shapes but does not route orders yet; every
//! order operation answers "not yet implemented".

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::market_data::CurrencyPair;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetOrdersRequest {
    pub exchange: String,
    pub asset_type: String,
    pub pair: Option<CurrencyPair>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetails {
    pub exchange: String,
    pub id: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub asset_type: String,
    pub order_side: String,
    pub order_type: String,
    /// Unix seconds
    pub creation_time: i64,
    pub status: String,
    pub price: Decimal,
    pub amount: Decimal,
    pub open_volume: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetOrdersResponse {
    pub orders: Vec<OrderDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetOrderRequest {
    pub exchange: String,
    pub order_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitOrderRequest {
    pub exchange: String,
    pub pair: Option<CurrencyPair>,
    pub side: String,
    pub order_type: String,
    pub amount: Decimal,
    pub price: Decimal,
    pub client_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitOrderResponse {
    pub order_placed: bool,
    pub order_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelOrderRequest {
    pub exchange: String,
    pub account_id: String,
    pub order_id: String,
    pub pair: Option<CurrencyPair>,
    pub asset_type: String,
    pub wallet_address: String,
    pub side: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderResponse {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelAllOrdersRequest {
    pub exchange: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelAllOrdersResponse {
    pub orders_cancelled: Vec<String>,
}
