//! Snapshot - Save/Restore Simulation State
//!
//! Captures everything a run needs to continue: config, phase, clock,
//! RNG state, queues, undelivered messages and pending timeline entries.
//! Listeners and the event log are not part of a snapshot.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored run fires the same events as the original
//! - **Config Matching**: the stored config hash must match the config
//! - **Queue Integrity**: no duplicate ids, no timer pointing at a missing message

use super::engine::{ScenarioSimulation, SimulationPhase};
use crate::config::ScenarioSimulationConfig;
use crate::core::time::SimClock;
use crate::error::ScenarioError;
use crate::models::{ScenarioState, StakeholderMessage};
use crate::rng::RngManager;
use crate::scheduler::{Timeline, TimerAction, TimerEntry};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Current snapshot layout
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable checkpoint of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    pub version: u32,
    /// SHA-256 of the canonical JSON of `config`
    pub config_hash: String,
    pub config: ScenarioSimulationConfig,
    pub phase: SimulationPhase,
    pub clock: SimClock,
    pub start_time: Option<u64>,
    pub stopped_at: Option<u64>,
    pub rng: RngManager,
    pub state: ScenarioState,
    pub scheduled_messages: Vec<StakeholderMessage>,
    pub timers: Vec<TimerEntry>,
    pub next_timer_handle: u64,
}

impl SimulationSnapshot {
    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Compute SHA256 hash of a config
///
/// Object keys are sorted before hashing, so the hash does not depend on
/// field order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, ScenarioError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let value = serde_json::to_value(config)?;
    let json = serde_json::to_string(&canonicalize(value))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

fn check_unique<'a>(
    label: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ScenarioError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ScenarioError::SnapshotInvalid(format!(
                "duplicate id {} in {}",
                id, label
            )));
        }
    }
    Ok(())
}

/// Validate snapshot integrity
///
/// Checks:
/// - version is supported
/// - queue uniqueness (no duplicate ids per queue)
/// - every `DeliverMessage` timer refers to a scheduled message
/// - a stopped run has no timers, an idle run has no start time
/// - a running run still has its end-of-simulation timer
pub fn validate_snapshot(snapshot: &SimulationSnapshot) -> Result<(), ScenarioError> {
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(ScenarioError::SnapshotInvalid(format!(
            "unsupported snapshot version {}",
            snapshot.version
        )));
    }

    let state = &snapshot.state;
    check_unique("pending messages", state.pending_messages().iter().map(|m| m.id.as_str()))?;
    check_unique(
        "active interruptions",
        state.active_interruptions().iter().map(|i| i.id.as_str()),
    )?;
    check_unique(
        "requirement changes",
        state.requirement_changes().iter().map(|c| c.id.as_str()),
    )?;
    check_unique(
        "scheduled messages",
        snapshot.scheduled_messages.iter().map(|m| m.id.as_str()),
    )?;
    let mut handles = HashSet::new();
    for timer in &snapshot.timers {
        if !handles.insert(timer.handle) {
            return Err(ScenarioError::SnapshotInvalid(format!(
                "duplicate timer handle {}",
                timer.handle.value()
            )));
        }
    }

    let scheduled: HashSet<&str> = snapshot
        .scheduled_messages
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    for timer in &snapshot.timers {
        if let TimerAction::DeliverMessage { message_id } = &timer.action {
            if !scheduled.contains(message_id.as_str()) {
                return Err(ScenarioError::SnapshotInvalid(format!(
                    "timer {} delivers unknown message {}",
                    timer.handle.value(),
                    message_id
                )));
            }
        }
    }

    match snapshot.phase {
        SimulationPhase::Stopped if !snapshot.timers.is_empty() => Err(
            ScenarioError::SnapshotInvalid("stopped run has pending timers".to_string()),
        ),
        SimulationPhase::Running
            if !snapshot
                .timers
                .iter()
                .any(|t| matches!(t.action, TimerAction::EndOfSimulation)) =>
        {
            Err(ScenarioError::SnapshotInvalid(
                "running snapshot has no end-of-simulation timer".to_string(),
            ))
        }
        SimulationPhase::Idle if snapshot.start_time.is_some() => Err(
            ScenarioError::SnapshotInvalid("idle run has a start time".to_string()),
        ),
        _ => Ok(()),
    }
}

impl ScenarioSimulation {
    /// Capture the current state
    pub fn snapshot(&self) -> Result<SimulationSnapshot, ScenarioError> {
        let timeline = self.timeline();
        Ok(SimulationSnapshot {
            version: SNAPSHOT_VERSION,
            config_hash: compute_config_hash(self.config())?,
            config: self.config().clone(),
            phase: self.phase(),
            clock: SimClock::starting_at(self.now()),
            start_time: self.start_time(),
            stopped_at: self.stopped_at(),
            rng: self.rng().clone(),
            state: self.state().clone(),
            scheduled_messages: self.scheduled_messages().to_vec(),
            timers: timeline.entries(),
            next_timer_handle: timeline.next_handle(),
        })
    }

    /// Rebuild a simulation from a snapshot
    ///
    /// Fails with `SnapshotMismatch` if the stored hash does not match the
    /// stored config, and `SnapshotInvalid` if queues or timers are
    /// inconsistent. The restored instance has no listeners and an empty
    /// event log.
    pub fn restore(snapshot: SimulationSnapshot) -> Result<Self, ScenarioError> {
        let actual = compute_config_hash(&snapshot.config)?;
        if actual != snapshot.config_hash {
            return Err(ScenarioError::SnapshotMismatch {
                expected: snapshot.config_hash,
                actual,
            });
        }
        validate_snapshot(&snapshot)?;

        tracing::info!(
            challenge_id = %snapshot.config.challenge_id,
            now = snapshot.clock.now(),
            timers = snapshot.timers.len(),
            "restored scenario simulation"
        );

        let timeline = Timeline::from_entries(snapshot.timers, snapshot.next_timer_handle);
        Ok(ScenarioSimulation::from_parts(
            snapshot.config,
            snapshot.phase,
            snapshot.clock,
            snapshot.rng,
            snapshot.state,
            snapshot.scheduled_messages,
            timeline,
            snapshot.start_time,
            snapshot.stopped_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::get_config_for_challenge;

    #[test]
    fn test_compute_config_hash_deterministic() {
        let config = get_config_for_challenge("two-sum", 30);
        let a = compute_config_hash(&config).unwrap();
        let b = compute_config_hash(&config.clone()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_compute_config_hash_different_for_different_configs() {
        let a = compute_config_hash(&get_config_for_challenge("two-sum", 30)).unwrap();
        let b = compute_config_hash(&get_config_for_challenge("two-sum", 31)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_orphaned_delivery_timer_rejected() {
        let mut sim = ScenarioSimulation::new(get_config_for_challenge("two-sum", 30), RngManager::new(2));
        sim.start();
        let mut snapshot = sim.snapshot().unwrap();
        assert!(!snapshot.scheduled_messages.is_empty());
        snapshot.scheduled_messages.clear();

        let err = ScenarioSimulation::restore(snapshot).unwrap_err();
        assert!(matches!(err, ScenarioError::SnapshotInvalid(_)));
    }

    #[test]
    fn test_running_without_end_timer_rejected() {
        let mut sim = ScenarioSimulation::new(get_config_for_challenge("two-sum", 30), RngManager::new(2));
        sim.start();
        let mut snapshot = sim.snapshot().unwrap();
        snapshot
            .timers
            .retain(|t| !matches!(t.action, TimerAction::EndOfSimulation));

        match ScenarioSimulation::restore(snapshot) {
            Err(ScenarioError::SnapshotInvalid(reason)) => {
                assert!(reason.contains("end-of-simulation"));
            }
            other => panic!("expected SnapshotInvalid, got {:?}", other.map(|_| ())),
        }
    }
}
