//! Exchange availability messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetExchangesRequest {
    /// Only list enabled exchanges
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetExchangesResponse {
    /// Comma-joined exchange names
    pub exchanges: String,
}

impl GetExchangesResponse {
    /// Split the comma-joined list back into names
    pub fn names(&self) -> Vec<&str> {
        if self.exchanges.is_empty() {
            return Vec::new();
        }
        self.exchanges.split(',').collect()
    }
}

/// Request naming a single exchange (enable/disable)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericExchangeNameRequest {
    pub exchange: String,
}

impl GenericExchangeNameRequest {
    pub fn new(exchange: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericExchangeNameResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let resp = GetExchangesResponse {
            exchanges: "A,B".to_string(),
        };
        assert_eq!(resp.names(), vec!["A", "B"]);
        assert!(GetExchangesResponse::default().names().is_empty());
    }
}
