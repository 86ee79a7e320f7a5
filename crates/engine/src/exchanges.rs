use dashmap::DashMap;
use helm_ports::{EngineError, EngineResult};
use log::info;

/// Exchange availability registry
///
/// Thread-safe map of exchange name -> enabled flag.
#[derive(Debug, Default)]
pub struct ExchangeRegistry {
    exchanges: DashMap<String, bool>,
}

impl ExchangeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) an exchange
    pub fn register(&self, name: impl Into<String>, enabled: bool) {
        self.exchanges.insert(name.into(), enabled);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.exchanges.contains_key(name)
    }

    /// `None` if the exchange is unknown
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.exchanges.get(name).map(|entry| *entry.value())
    }

    /// Exchange names sorted alphabetically
    pub fn names(&self, enabled_only: bool) -> Vec<String> {
        let mut names: Vec<String> = self
            .exchanges
            .iter()
            .filter(|entry| !enabled_only || *entry.value())
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    pub fn enable(&self, name: &str) -> EngineResult<()> {
        let mut entry = self
            .exchanges
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownExchange(name.to_string()))?;
        if *entry {
            return Err(EngineError::ExchangeAlreadyEnabled(name.to_string()));
        }
        *entry = true;
        info!("Exchange {} enabled", name);
        Ok(())
    }

    pub fn disable(&self, name: &str) -> EngineResult<()> {
        let mut entry = self
            .exchanges
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownExchange(name.to_string()))?;
        if !*entry {
            return Err(EngineError::ExchangeNotEnabled(name.to_string()));
        }
        *entry = false;
        info!("Exchange {} disabled", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ExchangeRegistry {
        let registry = ExchangeRegistry::new();
        registry.register("Kraken", false);
        registry.register("Bitstamp", true);
        registry.register("Binance", true);
        registry
    }

    #[test]
    fn test_names_sorted_and_filtered() {
        let registry = registry();
        assert_eq!(registry.names(false), vec!["Binance", "Bitstamp", "Kraken"]);
        assert_eq!(registry.names(true), vec!["Binance", "Bitstamp"]);
    }

    #[test]
    fn test_enable_disable_toggle() {
        let registry = registry();

        registry.enable("Kraken").unwrap();
        assert_eq!(registry.is_enabled("Kraken"), Some(true));
        assert_eq!(
            registry.enable("Kraken"),
            Err(EngineError::ExchangeAlreadyEnabled("Kraken".into()))
        );

        registry.disable("Kraken").unwrap();
        assert_eq!(
            registry.disable("Kraken"),
            Err(EngineError::ExchangeNotEnabled("Kraken".into()))
        );
    }

    #[test]
    fn test_unknown_exchange() {
        let registry = registry();
        assert_eq!(
            registry.enable("Nope"),
            Err(EngineError::UnknownExchange("Nope".into()))
        );
        assert_eq!(
            registry.disable("Nope"),
            Err(EngineError::UnknownExchange("Nope".into()))
        );
        assert_eq!(registry.is_enabled("Nope"), None);
    }
}
