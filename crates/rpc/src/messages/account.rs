//! Config, deposit address and withdrawal messages
//!
//! Accepted on the wire, answered with "not yet implemented".

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetConfigRequest {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetConfigResponse {
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetCryptocurrencyDepositAddressesRequest {
    pub exchange: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetCryptocurrencyDepositAddressesResponse {
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetCryptocurrencyDepositAddressRequest {
    pub exchange: String,
    pub cryptocurrency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetCryptocurrencyDepositAddressResponse {
    pub address: String,
}

/// Shared by crypto and fiat withdrawals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WithdrawCurrencyRequest {
    pub exchange: String,
    pub currency: String,
    pub address: String,
    pub address_tag: String,
    pub amount: Decimal,
    pub fee: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WithdrawResponse {
    pub id: String,
    pub status: String,
}
