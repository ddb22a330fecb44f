// ============================================================================
// Random Values
// ============================================================================

use crate::domain::{BigNumber, Config};
use crate::interfaces::RandomSource;
use crate::numeric::{Magnitude, LOG_BASE};

/// Uniform value in `[0, 1)` with at most `dp` decimal places.
///
/// Digits are drawn in groups of 14 and the excess of the last group is
/// discarded.
pub fn random(dp: u32, source: &dyn RandomSource, config: &Config) -> BigNumber {
    let dp = dp as usize;
    let mut groups = vec![0u64; dp.div_ceil(LOG_BASE)];
    source.fill_groups(&mut groups);

    let mut digits = Vec::with_capacity(groups.len() * LOG_BASE);
    for group in groups {
        let text = format!("{:014}", group);
        digits.extend(text.bytes().map(|b| b - b'0'));
    }
    digits.truncate(dp);
    if digits.is_empty() {
        return BigNumber::zero(false);
    }
    BigNumber::from_scaled(
        false,
        Magnitude::from_digits(&digits),
        -(dp as i64),
        &config.range,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{SeededRandomSource, ThreadRandomSource};

    #[test]
    fn test_random_bounds_and_places() {
        let cfg = Config::default();
        let source = ThreadRandomSource;
        let one = BigNumber::one();
        for dp in [0u32, 1, 5, 14, 15, 40] {
            for _ in 0..50 {
                let r = random(dp, &source, &cfg);
                assert!(r >= BigNumber::zero(false));
                assert!(r < one);
                assert!(r.decimal_places().unwrap() <= u64::from(dp));
            }
        }
    }

    #[test]
    fn test_zero_places_is_zero() {
        let r = random(0, &ThreadRandomSource, &Config::default());
        assert!(r.is_zero());
    }

    #[test]
    fn test_seeded_sequences_match() {
        let cfg = Config::default();
        let a = SeededRandomSource::new(9);
        let b = SeededRandomSource::new(9);
        for _ in 0..10 {
            assert!(random(30, &a, &cfg).is_identical(&random(30, &b, &cfg)));
        }
    }
}
