//! Stakeholder message model
//!
//! A synthetic chat message from a workplace persona (product manager,
//! tech lead, client). Messages are generated from templates at start and
//! enter the pending queue when their delivery timer fires.

use serde::{Deserialize, Serialize};

/// How urgently a message (or interruption) wants attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// What part of the task a message affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageImpact {
    Scope,
    Timeline,
    /// Handling this message spawns a follow-up requirement change
    Requirements,
    Constraints,
}

/// Which window of the run a templated message lands in
///
/// - `Early`: [0%, 30%) of the duration
/// - `Mid`: [30%, 70%)
/// - `Late`: [70%, 100%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageTiming {
    Early,
    Mid,
    Late,
}

impl MessageTiming {
    /// Bucket bounds as whole percentages of the total duration
    pub fn window_percent(self) -> (u64, u64) {
        match self {
            MessageTiming::Early => (0, 30),
            MessageTiming::Mid => (30, 70),
            MessageTiming::Late => (70, 100),
        }
    }

    pub const ALL: [MessageTiming; 3] = [MessageTiming::Early, MessageTiming::Mid, MessageTiming::Late];
}

/// A message from a stakeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderMessage {
    pub id: String,
    pub from: String,
    pub role: String,
    pub message: String,
    pub priority: Priority,
    /// Absolute virtual time (ms) at which the message is delivered
    pub timestamp: u64,
    #[serde(default)]
    pub requires_response: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<MessageImpact>,
}

impl StakeholderMessage {
    /// True if handling this message spawns a clarification change
    pub fn triggers_requirement_followup(&self) -> bool {
        self.impact == Some(MessageImpact::Requirements)
    }
}
