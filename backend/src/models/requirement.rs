//! Requirement change model

use serde::{Deserialize, Serialize};

/// Kind of scope change being proposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    Addition,
    Modification,
    Removal,
    Clarification,
}

/// Size of a requirement change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeImpact {
    Minor,
    Moderate,
    Major,
}

impl ChangeImpact {
    /// Minutes removed from every time constraint when a change of this
    /// size is accepted
    pub fn timeline_reduction(self) -> u32 {
        match self {
            ChangeImpact::Minor => 2,
            ChangeImpact::Moderate => 5,
            ChangeImpact::Major => 10,
        }
    }
}

/// A proposed change to the task's requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementChange {
    pub id: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub description: String,
    pub impact: ChangeImpact,
    /// Estimated implementation effort in minutes
    pub time_to_implement: u32,
    pub stakeholder: String,
    pub justification: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_reduction_table() {
        assert_eq!(ChangeImpact::Minor.timeline_reduction(), 2);
        assert_eq!(ChangeImpact::Moderate.timeline_reduction(), 5);
        assert_eq!(ChangeImpact::Major.timeline_reduction(), 10);
    }

    #[test]
    fn test_type_field_renamed() {
        let change = RequirementChange {
            id: "r1".to_string(),
            change_type: ChangeType::Addition,
            description: "Add pagination".to_string(),
            impact: ChangeImpact::Moderate,
            time_to_implement: 10,
            stakeholder: "Sarah Chen".to_string(),
            justification: "Customers asked".to_string(),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["type"], "addition");
        assert_eq!(json["timeToImplement"], 10);
    }
}
