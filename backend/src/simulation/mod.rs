//! Simulation module
//!
//! The `ScenarioSimulation` engine, its status and snapshot types, and the
//! `create_scenario_simulation` factory.

mod engine;
mod snapshot;

pub use engine::{ScenarioSimulation, SimulationPhase, SimulationStatus};
pub use snapshot::{compute_config_hash, validate_snapshot, SimulationSnapshot, SNAPSHOT_VERSION};

use crate::config::{ConfigBuilder, SimulationOptions};
use crate::rng::{RngManager, DEFAULT_SEED};

/// Build an idle simulation for a challenge
///
/// Options override the challenge's resolved defaults field by field. The
/// RNG is seeded with `options.seed`, or `DEFAULT_SEED` when absent.
pub fn create_scenario_simulation(
    challenge_id: &str,
    duration: u32,
    options: SimulationOptions,
) -> ScenarioSimulation {
    let config = options
        .apply_to(ConfigBuilder::for_challenge(challenge_id, duration))
        .build();
    let seed = options.seed.unwrap_or(DEFAULT_SEED);
    tracing::debug!(%challenge_id, duration, seed, "creating scenario simulation");
    ScenarioSimulation::new(config, RngManager::new(seed))
}
