// ============================================================================
// Random Source Interface
// Defines the contract for supplying random digit groups
// ============================================================================

use crate::numeric::BASE;
use parking_lot::Mutex;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};

/// Supplier of uniformly distributed 14-digit groups for random values
pub trait RandomSource: Send + Sync {
    /// Next group, uniform in `0..10^14`
    fn next_group(&self) -> u64;

    /// Whether the groups come from a cryptographically secure generator
    fn is_cryptographic(&self) -> bool;

    /// Fill `groups` slots (optional optimization)
    fn fill_groups(&self, groups: &mut [u64]) {
        for slot in groups {
            *slot = self.next_group();
        }
    }
}

/// Operating-system entropy
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn next_group(&self) -> u64 {
        OsRng.gen_range(0..BASE)
    }

    fn is_cryptographic(&self) -> bool {
        true
    }
}

/// Thread-local generator; fast, not for secrets
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn next_group(&self) -> u64 {
        rand::thread_rng().gen_range(0..BASE)
    }

    fn is_cryptographic(&self) -> bool {
        false
    }

    fn fill_groups(&self, groups: &mut [u64]) {
        let mut rng = rand::thread_rng();
        for slot in groups {
            *slot = rng.gen_range(0..BASE);
        }
    }
}

/// Deterministic generator for reproducible sequences
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    /// Create from a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_group(&self) -> u64 {
        self.rng.lock().gen_range(0..BASE)
    }

    fn is_cryptographic(&self) -> bool {
        false
    }

    fn fill_groups(&self, groups: &mut [u64]) {
        let mut rng = self.rng.lock();
        for slot in groups {
            *slot = rng.gen_range(0..BASE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_in_range() {
        let sources: [&dyn RandomSource; 3] =
            [&OsRandomSource, &ThreadRandomSource, &SeededRandomSource::new(7)];
        for source in sources {
            for _ in 0..100 {
                assert!(source.next_group() < BASE);
            }
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededRandomSource::new(42);
        let b = SeededRandomSource::new(42);
        let mut ga = [0u64; 8];
        let mut gb = [0u64; 8];
        a.fill_groups(&mut ga);
        b.fill_groups(&mut gb);
        assert_eq!(ga, gb);
    }

    #[test]
    fn test_cryptographic_flags() {
        assert!(OsRandomSource.is_cryptographic());
        assert!(!ThreadRandomSource.is_cryptographic());
        assert!(!SeededRandomSource::new(1).is_cryptographic());
    }
}
