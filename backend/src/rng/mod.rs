//! Deterministic random number generation
//!
//! CRITICAL: All randomness in the scenario engine MUST go through this
//! module. Nothing reads an OS entropy source.

mod xorshift;

pub use xorshift::RngManager;

/// Seed used when the caller does not supply one
pub const DEFAULT_SEED: u64 = 0x5EED_5AC4;

/// Build a UUID from the RNG so ids are reproducible per seed
pub fn next_uuid(rng: &mut RngManager) -> uuid::Uuid {
    uuid::Builder::from_random_bytes(rng.next_bytes16()).into_uuid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_is_v4_and_deterministic() {
        let mut a = RngManager::new(5);
        let mut b = RngManager::new(5);
        let ua = next_uuid(&mut a);
        assert_eq!(ua, next_uuid(&mut b));
        assert_eq!(ua.get_version_num(), 4);
        assert_ne!(ua, next_uuid(&mut a));
    }
}
