use helm_core::PortfolioAddress;
use log::debug;
use parking_lot::RwLock;

/// Tracked portfolio addresses in insertion order
#[derive(Debug, Default)]
pub struct PortfolioStore {
    addresses: RwLock<Vec<PortfolioAddress>>,
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn addresses(&self) -> Vec<PortfolioAddress> {
        self.addresses.read().clone()
    }

    /// Add an address, or update the balance if the identity is already tracked
    pub fn add(&self, address: PortfolioAddress) {
        let mut addresses = self.addresses.write();
        match addresses
            .iter_mut()
            .find(|a| a.matches(&address.address, &address.coin_type, &address.description))
        {
            Some(existing) => {
                debug!(
                    "Updating balance of {} {} to {}",
                    existing.address, existing.coin_type, address.balance
                );
                existing.balance = address.balance;
            }
            None => {
                debug!("Tracking {} {}", address.address, address.coin_type);
                addresses.push(address);
            }
        }
    }

    /// Remove an address; unknown identities are ignored
    pub fn remove(&self, address: &str, coin_type: &str, description: &str) -> bool {
        let mut addresses = self.addresses.write();
        let before = addresses.len();
        addresses.retain(|a| !a.matches(address, coin_type, description));
        addresses.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_keeps_identity_unique() {
        let store = PortfolioStore::new();
        store.add(PortfolioAddress::new("x", "BTC", "cold", dec!(1.5)));
        store.add(PortfolioAddress::new("x", "BTC", "cold", dec!(2)));
        store.add(PortfolioAddress::new("x", "BTC", "hot", dec!(3)));

        let addresses = store.addresses();
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].balance, dec!(2));
        assert_eq!(addresses[1].description, "hot");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let store = PortfolioStore::new();
        store.add(PortfolioAddress::new("x", "BTC", "cold", dec!(1.5)));

        assert!(!store.remove("y", "BTC", "cold"));
        assert_eq!(store.addresses().len(), 1);
        assert!(store.remove("x", "BTC", "cold"));
        assert!(store.addresses().is_empty());
    }
}
