//! Event watch messages

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::market_data::CurrencyPair;

/// Trigger condition of an event watch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionParams {
    pub check_bids: bool,
    pub check_bids_and_asks: bool,
    pub condition: String,
    pub orderbook_amount: Decimal,
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddEventRequest {
    pub exchange: String,
    pub item: String,
    pub condition_params: Option<ConditionParams>,
    pub pair: Option<CurrencyPair>,
    pub asset_type: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddEventResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveEventRequest {
    pub id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveEventResponse {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEventsRequest {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetEventsResponse {
    pub events: Vec<AddEventRequest>,
}
