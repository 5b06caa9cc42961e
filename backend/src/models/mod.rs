//! Domain models for the scenario engine

pub mod constraint;
pub mod event;
pub mod interruption;
pub mod message;
pub mod requirement;
pub mod state;

// Re-exports
pub use constraint::{ConstraintType, Severity, TimeConstraint};
pub use event::{EventLog, LoggedEvent};
pub use interruption::{InterruptionAction, InterruptionEvent, InterruptionType};
pub use message::{MessageImpact, MessageTiming, Priority, StakeholderMessage};
pub use requirement::{ChangeImpact, ChangeType, RequirementChange};
pub use state::ScenarioState;
