// ============================================================================
// Multiplicative Engine
// ============================================================================

use crate::domain::{BigNumber, Config};

/// x × y, exact up to the configured exponent range.
pub fn mul(x: &BigNumber, y: &BigNumber, config: &Config) -> BigNumber {
    let negative = x.is_negative() != y.is_negative();
    match (x, y) {
        (BigNumber::NaN, _) | (_, BigNumber::NaN) => BigNumber::NaN,
        (BigNumber::Infinity { .. }, _) | (_, BigNumber::Infinity { .. }) => {
            if x.is_zero() || y.is_zero() {
                BigNumber::NaN
            } else {
                BigNumber::infinity(negative)
            }
        }
        (BigNumber::Finite(a), BigNumber::Finite(b)) => {
            if a.is_zero() || b.is_zero() {
                return BigNumber::zero(negative);
            }
            BigNumber::from_scaled(
                negative,
                a.coefficient().mul(b.coefficient()),
                a.scale().saturating_add(b.scale()),
                &config.range,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Range;
    use proptest::prelude::*;

    fn dec(s: &str) -> BigNumber {
        s.parse().unwrap()
    }

    #[test]
    fn test_mul_basic() {
        let cfg = Config::default();
        assert_eq!(mul(&dec("1.5"), &dec("-0.2"), &cfg), dec("-0.3"));
        assert_eq!(
            mul(&dec("123456789012345678901234567890"), &dec("1e-10"), &cfg),
            dec("12345678901234567890.123456789")
        );
    }

    #[test]
    fn test_mul_signed_zero() {
        let cfg = Config::default();
        let r = mul(&dec("-3"), &dec("0"), &cfg);
        assert!(r.is_zero() && r.is_negative());
    }

    #[test]
    fn test_mul_infinity() {
        let cfg = Config::default();
        let inf = BigNumber::infinity(false);
        assert!(mul(&inf, &dec("0"), &cfg).is_nan());
        assert_eq!(mul(&inf, &dec("-2"), &cfg), BigNumber::infinity(true));
        assert_eq!(mul(&BigNumber::infinity(true), &BigNumber::infinity(true), &cfg), inf);
    }

    #[test]
    fn test_mul_range() {
        let cfg = Config::default().with_range(Range::symmetric(5));
        assert_eq!(mul(&dec("1000"), &dec("1000"), &cfg), BigNumber::infinity(false));
        let tiny = mul(&dec("-0.001"), &dec("0.001"), &cfg);
        assert!(tiny.is_zero() && tiny.is_negative());
    }

    proptest! {
        #[test]
        fn prop_matches_i128(a in any::<i64>(), b in any::<i64>()) {
            let cfg = Config::default();
            let product = i128::from(a) * i128::from(b);
            let expected: BigNumber = product.to_string().parse().unwrap();
            prop_assert_eq!(mul(&BigNumber::from(a), &BigNumber::from(b), &cfg), expected);
        }
    }
}
