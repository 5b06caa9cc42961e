//! Time constraint model
//!
//! Constraints are countdowns (deadline, demo, release). They are never
//! removed during a run; accepted requirement changes shrink them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintType {
    Deadline,
    Meeting,
    Demo,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// A named countdown tracked by the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeConstraint {
    pub id: String,
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,
    pub description: String,
    /// Minutes left on the countdown
    pub time_remaining: u32,
    pub severity: Severity,
}

impl TimeConstraint {
    pub fn new(
        id: impl Into<String>,
        constraint_type: ConstraintType,
        description: impl Into<String>,
        time_remaining: u32,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            constraint_type,
            description: description.into(),
            time_remaining,
            severity,
        }
    }

    /// Shorten the countdown by `minutes`, flooring at zero
    ///
    /// Returns the minutes actually removed.
    pub fn reduce(&mut self, minutes: u32) -> u32 {
        let before = self.time_remaining;
        self.time_remaining = before.saturating_sub(minutes);
        before - self.time_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_floors_at_zero() {
        let mut c = TimeConstraint::new("c1", ConstraintType::Demo, "Demo", 3, Severity::Critical);
        assert_eq!(c.reduce(10), 3);
        assert_eq!(c.time_remaining, 0);
        assert_eq!(c.reduce(2), 0);
    }

    #[test]
    fn test_reduce_partial() {
        let mut c = TimeConstraint::new("c1", ConstraintType::Deadline, "Ship", 30, Severity::Warning);
        assert_eq!(c.reduce(5), 5);
        assert_eq!(c.time_remaining, 25);
    }
}
