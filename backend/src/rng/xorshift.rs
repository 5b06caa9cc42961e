//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG used for every random decision the scenario
//! engine makes: message offsets, interruption picks, defer delays and
//! entity ids.
//!
//! # Determinism
//!
//! Same seed → same sequence → same scenario. Tests and replays rely on it.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use scenario_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let offset = rng.range_u64(0, 60_000); // [0, 60000)
/// assert!(offset < 60_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced with 1 (xorshift cannot leave the zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Next raw 64-bit value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform integer in [min, max)
    ///
    /// Returns `min` when the range is empty, so callers can pass
    /// degenerate windows (e.g. a zero-length simulation) without guarding.
    pub fn range_u64(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        min + self.next_u64() % (max - min)
    }

    /// Uniform integer in [min, max] (both ends inclusive)
    pub fn range_inclusive(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        match (max - min).checked_add(1) {
            Some(span) => min + self.next_u64() % span,
            None => self.next_u64(),
        }
    }

    /// Pick one element uniformly, `None` for an empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.range_u64(0, items.len() as u64) as usize;
        items.get(idx)
    }

    /// 16 random bytes, used to build ids
    pub fn next_bytes16(&mut self) -> [u8; 16] {
        let hi = self.next_u64().to_be_bytes();
        let lo = self.next_u64().to_be_bytes();
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&hi);
        out[8..].copy_from_slice(&lo);
        out
    }

    /// Current internal state (for snapshots)
    ///
    /// `RngManager::new(rng.get_state())` continues the same sequence.
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
