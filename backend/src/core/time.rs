//! Virtual time for the scenario engine
//!
//! The engine never reads the wall clock. All time is measured in
//! milliseconds on a `SimClock` that only moves forward when the caller
//! advances it, which makes every run reproducible.

use serde::{Deserialize, Serialize};

/// Milliseconds in one minute
pub const MS_PER_MINUTE: u64 = 60_000;

/// Milliseconds in one second
pub const MS_PER_SECOND: u64 = 1_000;

/// Convert a duration in minutes to milliseconds
pub fn minutes_to_ms(minutes: u32) -> u64 {
    u64::from(minutes) * MS_PER_MINUTE
}

/// Monotonic virtual clock in milliseconds
///
/// # Example
/// ```
/// use scenario_simulator_core_rs::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.now(), 0);
///
/// clock.advance_by(1_500);
/// assert_eq!(clock.now(), 1_500);
///
/// // Moving backwards is ignored
/// clock.advance_to(1_000);
/// assert_eq!(clock.now(), 1_500);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    now_ms: u64,
}

impl SimClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock already positioned at `now_ms`
    pub fn starting_at(now_ms: u64) -> Self {
        Self { now_ms }
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock to `target_ms`
    ///
    /// Targets in the past leave the clock unchanged.
    pub fn advance_to(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }

    /// Move the clock forward by `delta_ms`
    pub fn advance_by(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }

    /// Milliseconds elapsed since `since_ms` (0 if `since_ms` is in the future)
    pub fn elapsed_since(&self, since_ms: u64) -> u64 {
        self.now_ms.saturating_sub(since_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_ms() {
        assert_eq!(minutes_to_ms(0), 0);
        assert_eq!(minutes_to_ms(1), 60_000);
        assert_eq!(minutes_to_ms(30), 1_800_000);
    }

    #[test]
    fn test_elapsed_since_future_is_zero() {
        let clock = SimClock::starting_at(100);
        assert_eq!(clock.elapsed_since(500), 0);
        assert_eq!(clock.elapsed_since(40), 60);
    }

    #[test]
    fn test_advance_by_saturates() {
        let mut clock = SimClock::starting_at(u64::MAX - 1);
        clock.advance_by(10);
        assert_eq!(clock.now(), u64::MAX);
    }
}
