//! Simulation events and the subscriber bus

pub mod bus;
pub mod types;

pub use bus::{EventBus, Listener, SubscriptionId};
pub use types::{EventKind, SimulationEvent};
