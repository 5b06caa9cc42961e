//! Interruption model

use crate::models::message::Priority;
use serde::{Deserialize, Serialize};

/// Channel the interruption arrives through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterruptionType {
    Slack,
    Email,
    Meeting,
    Phone,
    SystemAlert,
}

/// What the user chose to do with an interruption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterruptionAction {
    /// Deal with it now; it is consumed
    Handle,
    /// Push it back 5-15 minutes (only if `can_defer`)
    Defer,
}

/// An event demanding the user's attention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterruptionEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub interruption_type: InterruptionType,
    pub title: String,
    pub description: String,
    /// Expected time to deal with it, in seconds
    pub duration: u32,
    pub can_defer: bool,
    pub priority: Priority,
}
