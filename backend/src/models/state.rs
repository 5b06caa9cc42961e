//! Scenario state
//!
//! The mutable queues of one simulation run.
//!
//! # Critical Invariants
//!
//! 1. **Id uniqueness**: an id appears at most once in each queue
//! 2. **Insertion order**: queues keep arrival order; removal may happen
//!    anywhere
//! 3. **Constraints persist**: time constraints are mutated, never removed

use crate::models::{InterruptionEvent, RequirementChange, StakeholderMessage, TimeConstraint};
use serde::{Deserialize, Serialize};

/// Queues owned by one simulation instance
///
/// # Example
///
/// ```rust
/// use scenario_simulator_core_rs::models::{ConstraintType, ScenarioState, Severity, TimeConstraint};
///
/// let mut state = ScenarioState::new(vec![TimeConstraint::new(
///     "deadline",
///     ConstraintType::Deadline,
///     "Ship it",
///     30,
///     Severity::Warning,
/// )]);
/// state.reduce_constraints(5);
/// assert_eq!(state.time_constraints()[0].time_remaining, 25);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioState {
    pending_messages: Vec<StakeholderMessage>,
    active_interruptions: Vec<InterruptionEvent>,
    requirement_changes: Vec<RequirementChange>,
    time_constraints: Vec<TimeConstraint>,
}

impl ScenarioState {
    pub fn new(time_constraints: Vec<TimeConstraint>) -> Self {
        Self {
            time_constraints,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    pub fn pending_messages(&self) -> &[StakeholderMessage] {
        &self.pending_messages
    }

    /// Append a delivered message. Returns false on a duplicate id.
    pub fn push_message(&mut self, message: StakeholderMessage) -> bool {
        if self.pending_messages.iter().any(|m| m.id == message.id) {
            return false;
        }
        self.pending_messages.push(message);
        true
    }

    /// Remove and return the message with `id`
    pub fn take_message(&mut self, id: &str) -> Option<StakeholderMessage> {
        let idx = self.pending_messages.iter().position(|m| m.id == id)?;
        Some(self.pending_messages.remove(idx))
    }

    // ------------------------------------------------------------------
    // Interruptions
    // ------------------------------------------------------------------

    pub fn active_interruptions(&self) -> &[InterruptionEvent] {
        &self.active_interruptions
    }

    /// Append a triggered interruption. Returns false on a duplicate id.
    pub fn push_interruption(&mut self, interruption: InterruptionEvent) -> bool {
        if self
            .active_interruptions
            .iter()
            .any(|i| i.id == interruption.id)
        {
            return false;
        }
        self.active_interruptions.push(interruption);
        true
    }

    pub fn take_interruption(&mut self, id: &str) -> Option<InterruptionEvent> {
        let idx = self.active_interruptions.iter().position(|i| i.id == id)?;
        Some(self.active_interruptions.remove(idx))
    }

    // ------------------------------------------------------------------
    // Requirement changes
    // ------------------------------------------------------------------

    pub fn requirement_changes(&self) -> &[RequirementChange] {
        &self.requirement_changes
    }

    /// Append a proposed change. Returns false on a duplicate id.
    pub fn push_change(&mut self, change: RequirementChange) -> bool {
        if self.requirement_changes.iter().any(|c| c.id == change.id) {
            return false;
        }
        self.requirement_changes.push(change);
        true
    }

    pub fn take_change(&mut self, id: &str) -> Option<RequirementChange> {
        let idx = self.requirement_changes.iter().position(|c| c.id == id)?;
        Some(self.requirement_changes.remove(idx))
    }

    // ------------------------------------------------------------------
    // Time constraints
    // ------------------------------------------------------------------

    pub fn time_constraints(&self) -> &[TimeConstraint] {
        &self.time_constraints
    }

    /// Shorten every constraint by `minutes` (floored at zero)
    ///
    /// Returns the total minutes actually removed across all constraints.
    pub fn reduce_constraints(&mut self, minutes: u32) -> u32 {
        self.time_constraints
            .iter_mut()
            .map(|c| c.reduce(minutes))
            .sum()
    }
}
