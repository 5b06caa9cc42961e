//! Configuration resolver
//!
//! Turns a challenge id + duration (+ optional presets) into a concrete
//! `ScenarioSimulationConfig`.
//!
//! # Resolution order
//!
//! 1. Per-challenge preset from the template library, or the global
//!    default (`medium` / `normal` / `evolving`, one deadline)
//! 2. Difficulty preset
//! 3. Focus preset
//! 4. Environment preset
//!
//! Each step goes through `ConfigBuilder`, which consumes and returns a new
//! value; nothing is mutated in place. Later steps overwrite earlier ones
//! field by field.
//!
//! # Example
//!
//! ```
//! use scenario_simulator_core_rs::config::{
//!     create_custom_config, get_config_for_challenge, CustomOptions, Difficulty,
//!     InterruptionFrequency,
//! };
//!
//! let base = get_config_for_challenge("unknown-challenge", 30);
//! assert_eq!(base.interruption_frequency, InterruptionFrequency::Medium);
//!
//! let hard = create_custom_config(
//!     "unknown-challenge",
//!     30,
//!     &CustomOptions {
//!         difficulty: Some(Difficulty::Expert),
//!         ..Default::default()
//!     },
//! );
//! assert_eq!(hard.interruption_frequency, InterruptionFrequency::Extreme);
//! ```

use crate::models::{ConstraintType, Severity, TimeConstraint};
use crate::templates;
use serde::{Deserialize, Serialize};

/// Default run length in minutes
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Longest run `validate()` accepts, in minutes
pub const MAX_DURATION_MINUTES: u32 = 480;

/// Implements `ALL`, `as_str`, `Display` and `FromStr` for a kebab-case
/// wire enum.
macro_rules! wire_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }

            /// Wire names of every variant
            pub fn names() -> impl Iterator<Item = &'static str> {
                Self::ALL.iter().map(|v| v.as_str())
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::ScenarioError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        $crate::error::ScenarioError::Parse(format!(
                            "unknown {} '{}' (expected one of: {})",
                            stringify!($ty),
                            s,
                            Self::names().collect::<Vec<_>>().join(", ")
                        ))
                    })
            }
        }
    };
}

pub(crate) use wire_enum;

mod loader;
mod presets;
mod validation;

pub use loader::{load_config, load_options, parse_config, ConfigFormat};
pub use presets::{ConfigOverlay, Difficulty, Environment, Focus};
pub use validation::{validate_config, ValidationReport};

/// How often interruptions fire during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterruptionFrequency {
    Low,
    Medium,
    High,
    Extreme,
}

wire_enum!(InterruptionFrequency {
    Low => "low",
    Medium => "medium",
    High => "high",
    Extreme => "extreme",
});

impl InterruptionFrequency {
    /// Interruptions scheduled per run, independent of duration
    pub fn interruption_count(self) -> usize {
        match self {
            InterruptionFrequency::Low => 2,
            InterruptionFrequency::Medium => 4,
            InterruptionFrequency::High => 6,
            InterruptionFrequency::Extreme => 10,
        }
    }
}

/// How chatty stakeholders are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StakeholderActivity {
    /// Low-priority scripted messages are dropped
    Quiet,
    Normal,
    /// Two ambient chatter messages on top of the script
    Active,
    /// Four ambient chatter messages on top of the script
    Chaotic,
}

wire_enum!(StakeholderActivity {
    Quiet => "quiet",
    Normal => "normal",
    Active => "active",
    Chaotic => "chaotic",
});

impl StakeholderActivity {
    pub fn ambient_message_count(self) -> usize {
        match self {
            StakeholderActivity::Quiet | StakeholderActivity::Normal => 0,
            StakeholderActivity::Active => 2,
            StakeholderActivity::Chaotic => 4,
        }
    }

    pub fn drops_low_priority(self) -> bool {
        self == StakeholderActivity::Quiet
    }
}

/// How much the requirements move during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequirementStability {
    Stable,
    Evolving,
    Volatile,
}

wire_enum!(RequirementStability {
    Stable => "stable",
    Evolving => "evolving",
    Volatile => "volatile",
});

impl RequirementStability {
    /// Requirement changes generated at start
    pub fn change_count(self) -> usize {
        match self {
            RequirementStability::Stable => 0,
            RequirementStability::Evolving => 1,
            RequirementStability::Volatile => 3,
        }
    }
}

/// Concrete input to a simulation run
///
/// Immutable once built; use [`ConfigBuilder`] to derive variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSimulationConfig {
    pub challenge_id: String,
    /// Run length in minutes
    pub duration: u32,
    pub interruption_frequency: InterruptionFrequency,
    pub stakeholder_activity: StakeholderActivity,
    pub requirement_stability: RequirementStability,
    #[serde(default)]
    pub time_constraints: Vec<TimeConstraint>,
}

impl ScenarioSimulationConfig {
    /// Run length in milliseconds
    pub fn duration_ms(&self) -> u64 {
        crate::core::time::minutes_to_ms(self.duration)
    }
}

/// Global fallback used for challenges without an authored preset
fn default_config(challenge_id: &str, duration: u32) -> ScenarioSimulationConfig {
    ScenarioSimulationConfig {
        challenge_id: challenge_id.to_string(),
        duration,
        interruption_frequency: InterruptionFrequency::Medium,
        stakeholder_activity: StakeholderActivity::Normal,
        requirement_stability: RequirementStability::Evolving,
        time_constraints: vec![TimeConstraint::new(
            "deadline",
            ConstraintType::Deadline,
            "Challenge deadline",
            duration,
            Severity::Warning,
        )],
    }
}

/// Resolve the base config for a challenge
pub fn get_config_for_challenge(challenge_id: &str, duration: u32) -> ScenarioSimulationConfig {
    match templates::challenge_preset(challenge_id) {
        Some(preset) => ScenarioSimulationConfig {
            challenge_id: challenge_id.to_string(),
            duration,
            interruption_frequency: preset.interruption_frequency,
            stakeholder_activity: preset.stakeholder_activity,
            requirement_stability: preset.requirement_stability,
            time_constraints: preset
                .constraints
                .iter()
                .map(|c| c.instantiate(duration))
                .collect(),
        },
        None => default_config(challenge_id, duration),
    }
}

/// Preset selection for [`create_custom_config`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOptions {
    pub difficulty: Option<Difficulty>,
    pub focus: Option<Focus>,
    pub environment: Option<Environment>,
}

/// Base config with difficulty, focus and environment presets layered on
pub fn create_custom_config(
    challenge_id: &str,
    duration: u32,
    options: &CustomOptions,
) -> ScenarioSimulationConfig {
    let mut builder = ConfigBuilder::for_challenge(challenge_id, duration);
    if let Some(difficulty) = options.difficulty {
        builder = builder.apply(&difficulty.overlay());
    }
    if let Some(focus) = options.focus {
        builder = builder.apply(&focus.overlay());
    }
    if let Some(environment) = options.environment {
        builder = builder.apply(&environment.overlay());
    }
    builder.build()
}

/// Caller overrides accepted by `create_scenario_simulation`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationOptions {
    pub interruption_frequency: Option<InterruptionFrequency>,
    pub stakeholder_activity: Option<StakeholderActivity>,
    pub requirement_stability: Option<RequirementStability>,
    pub time_constraints: Option<Vec<TimeConstraint>>,
    /// RNG seed; `rng::DEFAULT_SEED` when absent
    pub seed: Option<u64>,
}

impl SimulationOptions {
    /// Overwrite every field that is set
    pub fn apply_to(&self, mut builder: ConfigBuilder) -> ConfigBuilder {
        if let Some(f) = self.interruption_frequency {
            builder = builder.interruption_frequency(f);
        }
        if let Some(a) = self.stakeholder_activity {
            builder = builder.stakeholder_activity(a);
        }
        if let Some(s) = self.requirement_stability {
            builder = builder.requirement_stability(s);
        }
        if let Some(constraints) = &self.time_constraints {
            builder = builder.time_constraints(constraints.clone());
        }
        builder
    }
}

/// Value-returning builder for `ScenarioSimulationConfig`
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ConfigBuilder {
    config: ScenarioSimulationConfig,
}

impl ConfigBuilder {
    /// Start from the resolved base config for a challenge
    pub fn for_challenge(challenge_id: &str, duration: u32) -> Self {
        Self {
            config: get_config_for_challenge(challenge_id, duration),
        }
    }

    pub fn from_config(config: ScenarioSimulationConfig) -> Self {
        Self { config }
    }

    pub fn interruption_frequency(mut self, frequency: InterruptionFrequency) -> Self {
        self.config.interruption_frequency = frequency;
        self
    }

    pub fn stakeholder_activity(mut self, activity: StakeholderActivity) -> Self {
        self.config.stakeholder_activity = activity;
        self
    }

    pub fn requirement_stability(mut self, stability: RequirementStability) -> Self {
        self.config.requirement_stability = stability;
        self
    }

    pub fn time_constraints(mut self, constraints: Vec<TimeConstraint>) -> Self {
        self.config.time_constraints = constraints;
        self
    }

    /// Add a constraint, replacing any existing one with the same id
    pub fn with_time_constraint(mut self, constraint: TimeConstraint) -> Self {
        match self
            .config
            .time_constraints
            .iter_mut()
            .find(|c| c.id == constraint.id)
        {
            Some(existing) => *existing = constraint,
            None => self.config.time_constraints.push(constraint),
        }
        self
    }

    /// Layer a preset overlay on top
    pub fn apply(mut self, overlay: &ConfigOverlay) -> Self {
        if let Some(f) = overlay.interruption_frequency {
            self = self.interruption_frequency(f);
        }
        if let Some(a) = overlay.stakeholder_activity {
            self = self.stakeholder_activity(a);
        }
        if let Some(s) = overlay.requirement_stability {
            self = self.requirement_stability(s);
        }
        let duration = self.config.duration;
        for template in overlay.extra_constraints {
            self = self.with_time_constraint(template.instantiate(duration));
        }
        self
    }

    pub fn build(self) -> ScenarioSimulationConfig {
        self.config
    }
}
