//! Scenario Simulator Core - Rust Engine
//!
//! Deterministic workplace-pressure simulator for coding challenges:
//! stakeholder messages, interruptions, requirement churn and deadlines
//! scheduled on a virtual clock.
//!
//! # Architecture
//!
//! - **config**: Per-challenge config resolution, presets, validation, loading
//! - **core**: Virtual time
//! - **events**: Typed simulation events and the subscription bus
//! - **models**: Domain types (messages, interruptions, changes, constraints, state)
//! - **scheduler**: Scenario planning and the event timeline
//! - **simulation**: The `ScenarioSimulation` engine and snapshots
//! - **templates**: Authored content library
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All time is virtual milliseconds (`SimClock`)
//! 2. All randomness is deterministic (seeded RNG, RNG-derived UUIDs)
//! 3. Nothing fires after a run stops

pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod models;
pub mod rng;
pub mod scheduler;
pub mod simulation;
pub mod templates;

pub use config::{
    create_custom_config, get_config_for_challenge, ConfigBuilder, CustomOptions,
    InterruptionFrequency, RequirementStability, ScenarioSimulationConfig, SimulationOptions,
    StakeholderActivity,
};
pub use core::time::SimClock;
pub use error::ScenarioError;
pub use events::{EventKind, SimulationEvent, SubscriptionId};
pub use models::{
    event::{EventLog, LoggedEvent},
    state::ScenarioState,
    InterruptionAction, InterruptionEvent, RequirementChange, StakeholderMessage, TimeConstraint,
};
pub use rng::RngManager;
pub use simulation::{
    create_scenario_simulation, ScenarioSimulation, SimulationPhase, SimulationSnapshot,
    SimulationStatus,
};
