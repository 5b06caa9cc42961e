//! Difficulty, focus and environment presets
//!
//! A preset is a `ConfigOverlay`: a set of optional field overwrites plus
//! constraints to add. Overlays do not know about each other; when several
//! are applied the last one to set a field wins.

use super::{wire_enum, InterruptionFrequency, RequirementStability, StakeholderActivity};
use crate::models::{ConstraintType, Severity};
use crate::templates::ConstraintTemplate;
use serde::{Deserialize, Serialize};

/// Field overwrites applied by `ConfigBuilder::apply`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverlay {
    pub interruption_frequency: Option<InterruptionFrequency>,
    pub stakeholder_activity: Option<StakeholderActivity>,
    pub requirement_stability: Option<RequirementStability>,
    /// Added (or replaced by id) after the field overwrites
    pub extra_constraints: &'static [ConstraintTemplate],
}

const fn knobs(
    interruption_frequency: InterruptionFrequency,
    stakeholder_activity: StakeholderActivity,
    requirement_stability: RequirementStability,
) -> ConfigOverlay {
    ConfigOverlay {
        interruption_frequency: Some(interruption_frequency),
        stakeholder_activity: Some(stakeholder_activity),
        requirement_stability: Some(requirement_stability),
        extra_constraints: &[],
    }
}

const EMPTY: ConfigOverlay = ConfigOverlay {
    interruption_frequency: None,
    stakeholder_activity: None,
    requirement_stability: None,
    extra_constraints: &[],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

wire_enum!(Difficulty {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
    Expert => "expert",
});

impl Difficulty {
    pub fn overlay(self) -> ConfigOverlay {
        use InterruptionFrequency as F;
        use RequirementStability as R;
        use StakeholderActivity as A;
        match self {
            Difficulty::Beginner => knobs(F::Low, A::Quiet, R::Stable),
            Difficulty::Intermediate => knobs(F::Medium, A::Normal, R::Evolving),
            Difficulty::Advanced => knobs(F::High, A::Active, R::Evolving),
            Difficulty::Expert => knobs(F::Extreme, A::Chaotic, R::Volatile),
        }
    }
}

/// Which workplace skill the run stresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Focus {
    /// Fewer interruptions
    Technical,
    /// More stakeholder chatter
    Communication,
    /// Requirements keep moving
    Adaptability,
    /// Extra demo countdown at two thirds of the run
    TimePressure,
}

wire_enum!(Focus {
    Technical => "technical",
    Communication => "communication",
    Adaptability => "adaptability",
    TimePressure => "time-pressure",
});

static TIME_PRESSURE_DEMO: [ConstraintTemplate; 1] = [ConstraintTemplate {
    id: "surprise-demo",
    constraint_type: ConstraintType::Demo,
    description: "Surprise demo for leadership",
    fraction_of_duration: 2.0 / 3.0,
    severity: Severity::Critical,
}];

impl Focus {
    pub fn overlay(self) -> ConfigOverlay {
        match self {
            Focus::Technical => ConfigOverlay {
                interruption_frequency: Some(InterruptionFrequency::Low),
                ..EMPTY
            },
            Focus::Communication => ConfigOverlay {
                stakeholder_activity: Some(StakeholderActivity::Active),
                ..EMPTY
            },
            Focus::Adaptability => ConfigOverlay {
                requirement_stability: Some(RequirementStability::Volatile),
                ..EMPTY
            },
            Focus::TimePressure => ConfigOverlay {
                extra_constraints: &TIME_PRESSURE_DEMO,
                ..EMPTY
            },
        }
    }
}

/// Kind of workplace being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    Startup,
    Enterprise,
    Agency,
    Remote,
}

wire_enum!(Environment {
    Startup => "startup",
    Enterprise => "enterprise",
    Agency => "agency",
    Remote => "remote",
});

static ENTERPRISE_SYNC: [ConstraintTemplate; 1] = [ConstraintTemplate {
    id: "architecture-review",
    constraint_type: ConstraintType::Meeting,
    description: "Architecture review board",
    fraction_of_duration: 0.5,
    severity: Severity::Info,
}];

impl Environment {
    pub fn overlay(self) -> ConfigOverlay {
        use InterruptionFrequency as F;
        use RequirementStability as R;
        use StakeholderActivity as A;
        match self {
            Environment::Startup => knobs(F::High, A::Active, R::Volatile),
            Environment::Enterprise => ConfigOverlay {
                extra_constraints: &ENTERPRISE_SYNC,
                ..knobs(F::Medium, A::Normal, R::Stable)
            },
            Environment::Agency => knobs(F::High, A::Chaotic, R::Evolving),
            Environment::Remote => knobs(F::Low, A::Active, R::Evolving),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_overlays_touch_one_knob() {
        for focus in Focus::ALL {
            let overlay = focus.overlay();
            let set = [
                overlay.interruption_frequency.is_some(),
                overlay.stakeholder_activity.is_some(),
                overlay.requirement_stability.is_some(),
                !overlay.extra_constraints.is_empty(),
            ]
            .iter()
            .filter(|b| **b)
            .count();
            assert_eq!(set, 1, "{} should change exactly one thing", focus);
        }
    }

    #[test]
    fn test_time_pressure_parses_kebab() {
        assert_eq!("time-pressure".parse::<Focus>().unwrap(), Focus::TimePressure);
        let json = serde_json::to_string(&Focus::TimePressure).unwrap();
        assert_eq!(json, "\"time-pressure\"");
    }
}
