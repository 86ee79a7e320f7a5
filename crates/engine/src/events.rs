use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use helm_core::{EventId, EventWatch};
use helm_ports::{EngineError, EngineResult};

/// Items an event can watch
pub const EVENT_ITEMS: &[&str] = &["PRICE", "ORDERBOOK"];

/// Comparison operators an event condition can use
pub const EVENT_CONDITIONS: &[&str] = &[">", ">=", "<", "<=", "=="];

/// Registry of conditional events
///
/// Ids come from a monotonically increasing counter, so an id is never
/// reused while the registry lives.
#[derive(Debug)]
pub struct EventRegistry {
    events: DashMap<EventId, EventWatch>,
    next_id: AtomicI64,
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self {
            events: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the item, condition and action of a watch
    pub fn validate(watch: &EventWatch) -> EngineResult<()> {
        if !EVENT_ITEMS.contains(&watch.item.as_str()) {
            return Err(EngineError::InvalidEvent(format!(
                "unsupported item {:?}",
                watch.item
            )));
        }
        if !EVENT_CONDITIONS.contains(&watch.condition.condition.as_str()) {
            return Err(EngineError::InvalidEvent(format!(
                "unsupported condition {:?}",
                watch.condition.condition
            )));
        }
        if watch.action.trim().is_empty() {
            return Err(EngineError::InvalidEvent("action is empty".to_string()));
        }
        Ok(())
    }

    /// Validate and register a watch
    pub fn add(&self, watch: EventWatch) -> EngineResult<EventId> {
        Self::validate(&watch)?;
        let id = EventId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.events.insert(id, watch);
        Ok(id)
    }

    pub fn remove(&self, id: EventId) -> EngineResult<()> {
        self.events
            .remove(&id)
            .map(|_| ())
            .ok_or(EngineError::UnknownEvent(id.value()))
    }

    /// Registered watches ordered by id
    pub fn list(&self) -> Vec<(EventId, EventWatch)> {
        let mut events: Vec<(EventId, EventWatch)> = self
            .events
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        events.sort_by_key(|(id, _)| *id);
        events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
