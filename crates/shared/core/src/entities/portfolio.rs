use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tracked portfolio address
///
/// Identity is `(address, coin_type, description)`; the balance is the only
/// mutable part. Uniqueness is enforced by the engine holding the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioAddress {
    pub address: String,
    pub coin_type: String,
    #[serde(default)]
    pub description: String,
    pub balance: Decimal,
}

impl PortfolioAddress {
    pub fn new(
        address: impl Into<String>,
        coin_type: impl Into<String>,
        description: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        Self {
            address: address.into(),
            coin_type: coin_type.into(),
            description: description.into(),
            balance,
        }
    }

    /// Whether this entry has the given identity
    pub fn matches(&self, address: &str, coin_type: &str, description: &str) -> bool {
        self.address == address && self.coin_type == coin_type && self.description == description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_identity_ignores_balance() {
        let addr = PortfolioAddress::new("x", "BTC", "cold", dec!(1.5));
        assert!(addr.matches("x", "BTC", "cold"));
        assert!(!addr.matches("x", "BTC", "hot"));
        assert!(!addr.matches("x", "LTC", "cold"));
    }

    #[test]
    fn test_description_defaults_when_absent() {
        let addr: PortfolioAddress =
            serde_json::from_str(r#"{"address":"x","coin_type":"BTC","balance":"2"}"#).unwrap();
        assert_eq!(addr.description, "");
        assert_eq!(addr.balance, dec!(2));
    }
}
