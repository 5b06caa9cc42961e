//! Event scheduler
//!
//! Decides *what* happens during a run and *when*, from the config and the
//! template library. Planning is pure: given the same config, start time and
//! RNG state it yields the same plan. The simulation then loads the plan
//! into its `Timeline`.
//!
//! # Timing rules
//!
//! ```text
//! messages        early [0, 30%)  mid [30%, 70%)  late [70%, 100%)
//! interruptions   N uniform offsets in [0, duration), N by frequency
//! requirements    change i of n at (i+1) * duration / (n+1)
//! defer           re-trigger 5..=15 minutes later
//! end of run      at duration
//! ```

mod timeline;

pub use timeline::{Timeline, TimerAction, TimerEntry, TimerHandle};

use crate::config::ScenarioSimulationConfig;
use crate::core::time::MS_PER_MINUTE;
use crate::models::{
    InterruptionEvent, MessageTiming, Priority, RequirementChange, StakeholderMessage,
};
use crate::rng::{next_uuid, RngManager};
use crate::templates::{self, MessageTemplate, RequirementTemplate};

/// Shortest defer, in minutes
pub const DEFER_MIN_MINUTES: u64 = 5;

/// Longest defer, in minutes
pub const DEFER_MAX_MINUTES: u64 = 15;

/// Everything generated for one run at `start()`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioPlan {
    /// `timestamp` is absolute delivery time
    pub messages: Vec<StakeholderMessage>,
    /// (absolute trigger time, interruption)
    pub interruptions: Vec<(u64, InterruptionEvent)>,
    /// (absolute proposal time, change)
    pub requirement_changes: Vec<(u64, RequirementChange)>,
}

/// Offset (ms) for a message in the given timing bucket
///
/// The result lies in `[lo%, hi%)` of `duration_ms`. Bounds are rounded up
/// so the half-open interval holds exactly in integer arithmetic.
pub fn message_delay(timing: MessageTiming, duration_ms: u64, rng: &mut RngManager) -> u64 {
    let (lo_pct, hi_pct) = timing.window_percent();
    let lo = (duration_ms * lo_pct).div_ceil(100);
    let hi = (duration_ms * hi_pct).div_ceil(100);
    rng.range_u64(lo, hi)
}

/// Independent uniform offsets in `[0, duration_ms)`, one per interruption
pub fn interruption_offsets(count: usize, duration_ms: u64, rng: &mut RngManager) -> Vec<u64> {
    (0..count).map(|_| rng.range_u64(0, duration_ms)).collect()
}

/// Evenly spaced offsets for `count` requirement proposals
pub fn requirement_offsets(count: usize, duration_ms: u64) -> Vec<u64> {
    let slots = count as u64 + 1;
    (1..=count as u64).map(|i| i * duration_ms / slots).collect()
}

/// Delay (ms) before a deferred interruption comes back
pub fn defer_delay(rng: &mut RngManager) -> u64 {
    rng.range_inclusive(
        DEFER_MIN_MINUTES * MS_PER_MINUTE,
        DEFER_MAX_MINUTES * MS_PER_MINUTE,
    )
}

fn select_message_templates(
    config: &ScenarioSimulationConfig,
    rng: &mut RngManager,
) -> Vec<(MessageTemplate, MessageTiming)> {
    let script = templates::script_for(&config.challenge_id);
    let activity = config.stakeholder_activity;

    let mut selected: Vec<(MessageTemplate, MessageTiming)> = script
        .messages
        .iter()
        .filter(|t| !(activity.drops_low_priority() && t.priority == Priority::Low))
        .map(|t| (*t, t.timing))
        .collect();

    for _ in 0..activity.ambient_message_count() {
        let Some(template) = rng.pick(templates::AMBIENT_CHATTER) else {
            break;
        };
        let timing = rng
            .pick(&MessageTiming::ALL)
            .copied()
            .unwrap_or(template.timing);
        selected.push((*template, timing));
    }
    selected
}

/// Draw `count` requirement templates, preferring ones not used yet
fn select_requirement_templates(
    challenge_id: &str,
    count: usize,
    rng: &mut RngManager,
) -> Vec<&'static RequirementTemplate> {
    let pool = templates::requirement_pool(challenge_id);
    let mut remaining: Vec<&'static RequirementTemplate> = Vec::new();
    for template in pool.iter().chain(templates::GENERIC_REQUIREMENTS.iter()) {
        if !remaining.iter().any(|r| r.description == template.description) {
            remaining.push(template);
        }
    }

    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        if remaining.is_empty() {
            remaining = pool.iter().collect();
            if remaining.is_empty() {
                break;
            }
        }
        let idx = rng.range_u64(0, remaining.len() as u64) as usize;
        chosen.push(remaining.remove(idx));
    }
    chosen
}

/// Build the full plan for a run starting at `start_time`
pub fn plan_scenario(
    config: &ScenarioSimulationConfig,
    start_time: u64,
    rng: &mut RngManager,
) -> ScenarioPlan {
    let duration_ms = config.duration_ms();

    let mut messages = Vec::new();
    for (template, timing) in select_message_templates(config, rng) {
        let delay = message_delay(timing, duration_ms, rng);
        let id = next_uuid(rng).to_string();
        messages.push(template.instantiate(id, start_time.saturating_add(delay)));
    }

    let count = config.interruption_frequency.interruption_count();
    let mut interruptions = Vec::with_capacity(count);
    for offset in interruption_offsets(count, duration_ms, rng) {
        let Some(archetype) = rng.pick(templates::INTERRUPTION_ARCHETYPES) else {
            break;
        };
        let id = next_uuid(rng).to_string();
        interruptions.push((start_time.saturating_add(offset), archetype.instantiate(id)));
    }

    let change_count = config.requirement_stability.change_count();
    let offsets = requirement_offsets(change_count, duration_ms);
    let picks = select_requirement_templates(&config.challenge_id, change_count, rng);
    let requirement_changes = offsets
        .into_iter()
        .zip(picks)
        .map(|(offset, template)| {
            let change = template.instantiate(next_uuid(rng).to_string());
            (start_time.saturating_add(offset), change)
        })
        .collect();

    tracing::trace!(
        challenge_id = %config.challenge_id,
        messages = messages.len(),
        interruptions = interruptions.len(),
        "planned scenario"
    );

    ScenarioPlan {
        messages,
        interruptions,
        requirement_changes,
    }
}
