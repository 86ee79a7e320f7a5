//! Helm Ports
//!
//! Port definitions (traits) for the helm control plane.
//! The trading engine sits behind [`EngineFacade`]; the RPC layer only ever
//! talks to it through this trait, so tests can substitute their own engine.

mod engine;
mod error;

pub use engine::{EngineFacade, ForexRates};
pub use error::{EngineError, EngineResult};
