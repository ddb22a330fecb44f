// ============================================================================
// Additive Engine
// Exact sums and differences with IEEE-style special values
// ============================================================================

use crate::domain::{BigNumber, Config, Finite};
use crate::numeric::{Magnitude, RoundingMode};

/// x + y, exact up to the configured exponent range.
///
/// An exactly-zero sum of opposite-signed operands is `+0`, or `-0` when
/// the rounding mode is `Floor`.
pub fn add(x: &BigNumber, y: &BigNumber, config: &Config) -> BigNumber {
    match (x, y) {
        (BigNumber::NaN, _) | (_, BigNumber::NaN) => BigNumber::NaN,
        (BigNumber::Infinity { negative: a }, BigNumber::Infinity { negative: b }) => {
            if a == b {
                x.clone()
            } else {
                BigNumber::NaN
            }
        }
        (BigNumber::Infinity { .. }, _) => x.clone(),
        (_, BigNumber::Infinity { .. }) => y.clone(),
        (BigNumber::Finite(a), BigNumber::Finite(b)) => add_finite(a, b, config),
    }
}

/// x - y
pub fn sub(x: &BigNumber, y: &BigNumber, config: &Config) -> BigNumber {
    add(x, &y.negated(), config)
}

fn add_finite(a: &Finite, b: &Finite, config: &Config) -> BigNumber {
    if a.is_zero() && b.is_zero() {
        let negative = if a.is_negative() == b.is_negative() {
            a.is_negative()
        } else {
            cancelled_sign(config)
        };
        return BigNumber::zero(negative);
    }
    if b.is_zero() {
        return BigNumber::Finite(a.clone());
    }
    if a.is_zero() {
        return BigNumber::Finite(b.clone());
    }

    let scale = a.scale().min(b.scale());
    let ca = align(a, scale);
    let cb = align(b, scale);

    if a.is_negative() == b.is_negative() {
        return BigNumber::from_scaled(a.is_negative(), ca.add(&cb), scale, &config.range);
    }

    let (diff, b_larger) = ca.abs_diff(&cb);
    if diff.is_zero() {
        return BigNumber::zero(cancelled_sign(config));
    }
    let negative = if b_larger {
        b.is_negative()
    } else {
        a.is_negative()
    };
    BigNumber::from_scaled(negative, diff, scale, &config.range)
}

fn align(f: &Finite, scale: i64) -> Magnitude {
    let shift = usize::try_from(f.scale() - scale).unwrap_or(usize::MAX);
    f.coefficient().mul_pow10(shift)
}

fn cancelled_sign(config: &Config) -> bool {
    config.rounding_mode == RoundingMode::Floor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Range;

    fn dec(s: &str) -> BigNumber {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_aligns_scales() {
        let cfg = Config::default();
        assert_eq!(add(&dec("0.1"), &dec("0.2"), &cfg), dec("0.3"));
        assert_eq!(add(&dec("123.456"), &dec("-0.456"), &cfg), dec("123"));
        assert_eq!(add(&dec("1e20"), &dec("1"), &cfg), dec("100000000000000000001"));
        assert_eq!(sub(&dec("1"), &dec("0.0000001"), &cfg), dec("0.9999999"));
    }

    #[test]
    fn test_sign_of_difference() {
        let cfg = Config::default();
        let r = sub(&dec("3"), &dec("10"), &cfg);
        assert_eq!(r, dec("-7"));
        assert!(r.is_negative());
        assert_eq!(add(&dec("-3"), &dec("10"), &cfg), dec("7"));
    }

    #[test]
    fn test_zero_sums() {
        let cfg = Config::default();
        let r = sub(&dec("5"), &dec("5"), &cfg);
        assert!(r.is_zero() && !r.is_negative());

        let floor = Config::default().with_rounding_mode(RoundingMode::Floor);
        let r = sub(&dec("5"), &dec("5"), &floor);
        assert!(r.is_zero() && r.is_negative());

        let r = add(&BigNumber::zero(true), &BigNumber::zero(true), &cfg);
        assert!(r.is_negative());
        let r = add(&BigNumber::zero(true), &BigNumber::zero(false), &cfg);
        assert!(!r.is_negative());
    }

    #[test]
    fn test_zero_operand_returns_other() {
        let cfg = Config::default();
        let r = add(&BigNumber::zero(true), &dec("-2.5"), &cfg);
        assert_eq!(r, dec("-2.5"));
    }

    #[test]
    fn test_infinities() {
        let cfg = Config::default();
        let pinf = BigNumber::infinity(false);
        let ninf = BigNumber::infinity(true);
        assert!(add(&pinf, &ninf, &cfg).is_nan());
        assert_eq!(add(&pinf, &pinf, &cfg), pinf);
        assert_eq!(sub(&dec("1"), &pinf, &cfg), ninf);
        assert!(add(&BigNumber::NaN, &dec("1"), &cfg).is_nan());
    }

    #[test]
    fn test_overflow_to_infinity() {
        let cfg = Config::default().with_range(Range::symmetric(3));
        assert_eq!(add(&dec("9999"), &dec("1"), &cfg), BigNumber::infinity(false));
    }
}
