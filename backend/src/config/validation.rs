//! Advisory config validation
//!
//! Nothing in the engine calls these automatically. `validate_config`
//! inspects raw JSON (as received from a UI or file) so it can report enum
//! typos that would otherwise surface as an opaque deserialization error;
//! `ScenarioSimulationConfig::validate` checks a typed value.

use super::{
    InterruptionFrequency, RequirementStability, ScenarioSimulationConfig, StakeholderActivity,
    MAX_DURATION_MINUTES,
};
use crate::error::ScenarioError;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Outcome of a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Convert to `Err(InvalidConfig)` when invalid
    pub fn into_result(self) -> Result<(), ScenarioError> {
        if self.valid {
            Ok(())
        } else {
            Err(ScenarioError::InvalidConfig(self.errors))
        }
    }
}

fn check_enum_field<'a>(
    errors: &mut Vec<String>,
    obj: &serde_json::Map<String, Value>,
    field: &str,
    allowed: impl Iterator<Item = &'a str>,
) {
    match obj.get(field) {
        None | Some(Value::Null) => errors.push(format!("{} is required", field)),
        Some(Value::String(s)) => {
            let allowed: Vec<&str> = allowed.collect();
            if !allowed.contains(&s.as_str()) {
                errors.push(format!(
                    "{} must be one of: {} (got '{}')",
                    field,
                    allowed.join(", "),
                    s
                ));
            }
        }
        Some(_) => errors.push(format!("{} must be a string", field)),
    }
}

/// Check required fields and enum membership of a raw config object
///
/// # Example
/// ```
/// use scenario_simulator_core_rs::config::validate_config;
/// use serde_json::json;
///
/// let report = validate_config(&json!({
///     "challengeId": "two-sum",
///     "duration": 30,
///     "interruptionFrequency": "sometimes",
///     "stakeholderActivity": "normal",
///     "requirementStability": "stable",
/// }));
/// assert!(!report.valid);
/// assert_eq!(report.errors.len(), 1);
/// ```
pub fn validate_config(raw: &Value) -> ValidationReport {
    let Some(obj) = raw.as_object() else {
        return ValidationReport::from_errors(vec!["config must be an object".to_string()]);
    };
    let mut errors = Vec::new();

    match obj.get("challengeId") {
        Some(Value::String(s)) if !s.trim().is_empty() => {}
        Some(Value::String(_)) => errors.push("challengeId must not be empty".to_string()),
        None | Some(Value::Null) => errors.push("challengeId is required".to_string()),
        Some(_) => errors.push("challengeId must be a string".to_string()),
    }

    match obj.get("duration") {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(d) if d > 0 => {}
            _ => errors.push("duration must be a positive integer".to_string()),
        },
        None | Some(Value::Null) => errors.push("duration is required".to_string()),
        Some(_) => errors.push("duration must be a positive integer".to_string()),
    }

    check_enum_field(
        &mut errors,
        obj,
        "interruptionFrequency",
        InterruptionFrequency::names(),
    );
    check_enum_field(
        &mut errors,
        obj,
        "stakeholderActivity",
        StakeholderActivity::names(),
    );
    check_enum_field(
        &mut errors,
        obj,
        "requirementStability",
        RequirementStability::names(),
    );

    if let Some(constraints) = obj.get("timeConstraints") {
        if !constraints.is_array() {
            errors.push("timeConstraints must be an array".to_string());
        }
    }

    ValidationReport::from_errors(errors)
}

impl ScenarioSimulationConfig {
    /// Semantic checks on a typed config
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        if self.challenge_id.trim().is_empty() {
            errors.push("challengeId must not be empty".to_string());
        }
        if self.duration == 0 {
            errors.push("duration must be positive".to_string());
        } else if self.duration > MAX_DURATION_MINUTES {
            errors.push(format!(
                "duration must be at most {} minutes (got {})",
                MAX_DURATION_MINUTES, self.duration
            ));
        }

        let mut seen = HashSet::new();
        for constraint in &self.time_constraints {
            if constraint.id.trim().is_empty() {
                errors.push("time constraint id must not be empty".to_string());
            } else if !seen.insert(constraint.id.as_str()) {
                errors.push(format!("duplicate time constraint id '{}'", constraint.id));
            }
        }

        ValidationReport::from_errors(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::get_config_for_challenge;
    use crate::models::{ConstraintType, Severity, TimeConstraint};
    use serde_json::json;

    #[test]
    fn test_missing_everything() {
        let report = validate_config(&json!({}));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 5);
    }

    #[test]
    fn test_non_object_rejected() {
        let report = validate_config(&json!([1, 2, 3]));
        assert_eq!(report.errors, vec!["config must be an object".to_string()]);
    }

    #[test]
    fn test_bad_types() {
        let report = validate_config(&json!({
            "challengeId": 7,
            "duration": -5,
            "interruptionFrequency": 3,
            "stakeholderActivity": "normal",
            "requirementStability": "stable",
            "timeConstraints": "soon",
        }));
        assert!(report.errors.contains(&"challengeId must be a string".to_string()));
        assert!(report.errors.contains(&"duration must be a positive integer".to_string()));
        assert!(report.errors.contains(&"interruptionFrequency must be a string".to_string()));
        assert!(report.errors.contains(&"timeConstraints must be an array".to_string()));
        assert_eq!(report.errors.len(), 4);
    }

    #[test]
    fn test_resolved_config_passes_both_checks() {
        let config = get_config_for_challenge("fix-login-bug", 45);
        assert!(config.validate().valid);
        let raw = serde_json::to_value(&config).unwrap();
        assert!(validate_config(&raw).valid);
    }

    #[test]
    fn test_typed_duplicate_constraint_ids() {
        let mut config = get_config_for_challenge("unknown", 30);
        config.time_constraints.push(TimeConstraint::new(
            "deadline",
            ConstraintType::Release,
            "Dup",
            5,
            Severity::Info,
        ));
        config.duration = 0;
        let report = config.validate();
        assert_eq!(report.errors.len(), 2);
        assert!(report.into_result().is_err());
    }
}
