//! Scenario template library
//!
//! Static, hand-authored data the scheduler draws from:
//!
//! - **Challenge scripts**: per-challenge stakeholder messages and
//!   requirement-change vocabulary
//! - **Challenge presets**: per-challenge difficulty/urgency knobs used by
//!   the config resolver
//! - **Interruption archetypes**: the pool interruptions are sampled from
//! - **Ambient chatter**: filler messages added for busy stakeholder
//!   activity levels
//!
//! Templates hold `&'static str` and are turned into owned model values
//! (with ids and timestamps) by the scheduler.

mod archetypes;
mod challenges;

pub use archetypes::{AMBIENT_CHATTER, CLARIFICATION_FOLLOWUP, GENERIC_REQUIREMENTS, INTERRUPTION_ARCHETYPES};
pub use challenges::{CHALLENGE_CATALOG, DEFAULT_SCRIPT};

use crate::config::{InterruptionFrequency, RequirementStability, StakeholderActivity};
use crate::models::{
    ChangeImpact, ChangeType, ConstraintType, InterruptionEvent, InterruptionType, MessageImpact,
    MessageTiming, Priority, RequirementChange, Severity, StakeholderMessage, TimeConstraint,
};

/// A scripted stakeholder message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MessageTemplate {
    pub from: &'static str,
    pub role: &'static str,
    pub message: &'static str,
    pub priority: Priority,
    pub timing: MessageTiming,
    pub requires_response: bool,
    pub impact: Option<MessageImpact>,
}

impl MessageTemplate {
    pub fn instantiate(&self, id: String, timestamp: u64) -> StakeholderMessage {
        StakeholderMessage {
            id,
            from: self.from.to_string(),
            role: self.role.to_string(),
            message: self.message.to_string(),
            priority: self.priority,
            timestamp,
            requires_response: self.requires_response,
            impact: self.impact,
        }
    }
}

/// One entry in the interruption pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterruptionArchetype {
    pub interruption_type: InterruptionType,
    pub title: &'static str,
    pub description: &'static str,
    /// Seconds
    pub duration: u32,
    pub can_defer: bool,
    pub priority: Priority,
}

impl InterruptionArchetype {
    pub fn instantiate(&self, id: String) -> InterruptionEvent {
        InterruptionEvent {
            id,
            interruption_type: self.interruption_type,
            title: self.title.to_string(),
            description: self.description.to_string(),
            duration: self.duration,
            can_defer: self.can_defer,
            priority: self.priority,
        }
    }
}

/// Vocabulary entry for a requirement change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequirementTemplate {
    pub change_type: ChangeType,
    pub description: &'static str,
    pub impact: ChangeImpact,
    /// Minutes
    pub time_to_implement: u32,
    pub stakeholder: &'static str,
    pub justification: &'static str,
}

impl RequirementTemplate {
    pub fn instantiate(&self, id: String) -> RequirementChange {
        RequirementChange {
            id,
            change_type: self.change_type,
            description: self.description.to_string(),
            impact: self.impact,
            time_to_implement: self.time_to_implement,
            stakeholder: self.stakeholder.to_string(),
            justification: self.justification.to_string(),
        }
    }
}

/// A time constraint expressed relative to the run duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintTemplate {
    pub id: &'static str,
    pub constraint_type: ConstraintType,
    pub description: &'static str,
    /// Share of the run duration the countdown starts at
    pub fraction_of_duration: f64,
    pub severity: Severity,
}

impl ConstraintTemplate {
    /// Resolve against a duration in minutes (rounded, at least 1 minute)
    pub fn instantiate(&self, duration: u32) -> TimeConstraint {
        let minutes = (f64::from(duration) * self.fraction_of_duration).round().max(1.0) as u32;
        TimeConstraint::new(
            self.id,
            self.constraint_type,
            self.description,
            minutes,
            self.severity,
        )
    }
}

/// Hand-authored difficulty/urgency knobs for one challenge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChallengePreset {
    pub interruption_frequency: InterruptionFrequency,
    pub stakeholder_activity: StakeholderActivity,
    pub requirement_stability: RequirementStability,
    pub constraints: &'static [ConstraintTemplate],
}

/// Everything the library knows about a challenge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChallengeScript {
    pub challenge_id: &'static str,
    pub title: &'static str,
    pub messages: &'static [MessageTemplate],
    pub requirements: &'static [RequirementTemplate],
    pub preset: Option<ChallengePreset>,
}

/// Look up a challenge by id
pub fn find_challenge(challenge_id: &str) -> Option<&'static ChallengeScript> {
    CHALLENGE_CATALOG
        .iter()
        .find(|script| script.challenge_id == challenge_id)
}

/// Script for a challenge, falling back to the generic one
pub fn script_for(challenge_id: &str) -> &'static ChallengeScript {
    find_challenge(challenge_id).unwrap_or(&DEFAULT_SCRIPT)
}

/// Override preset for a challenge, if one was authored
pub fn challenge_preset(challenge_id: &str) -> Option<&'static ChallengePreset> {
    find_challenge(challenge_id).and_then(|script| script.preset.as_ref())
}

/// Requirement vocabulary for a challenge (generic pool if none authored)
pub fn requirement_pool(challenge_id: &str) -> &'static [RequirementTemplate] {
    let own = script_for(challenge_id).requirements;
    if own.is_empty() {
        GENERIC_REQUIREMENTS
    } else {
        own
    }
}

/// Ids of every authored challenge
pub fn known_challenges() -> impl Iterator<Item = &'static str> {
    CHALLENGE_CATALOG.iter().map(|script| script.challenge_id)
}
