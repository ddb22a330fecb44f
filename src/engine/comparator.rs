// ============================================================================
// Comparator
// Total order over finite values and infinities; NaN is unordered
// ============================================================================

use crate::domain::{BigNumber, Finite};
use std::cmp::Ordering;

/// Compare two values.
///
/// Returns None if either is NaN. `-0` and `+0` compare equal, and the
/// infinities are equal to themselves.
pub fn compare(x: &BigNumber, y: &BigNumber) -> Option<Ordering> {
    let (rx, ry) = (rank(x)?, rank(y)?);
    if rx != ry {
        return Some(rx.cmp(&ry));
    }
    match (x, y) {
        (BigNumber::Finite(a), BigNumber::Finite(b)) if rx != 0 => {
            let order = compare_magnitude(a, b);
            Some(if a.is_negative() { order.reverse() } else { order })
        }
        _ => Some(Ordering::Equal),
    }
}

/// Coarse position on the number line: -2 = -Infinity, -1 negative,
/// 0 zero, 1 positive, 2 = +Infinity.
fn rank(value: &BigNumber) -> Option<i8> {
    match value {
        BigNumber::NaN => None,
        BigNumber::Infinity { negative: true } => Some(-2),
        BigNumber::Infinity { negative: false } => Some(2),
        BigNumber::Finite(f) if f.is_zero() => Some(0),
        BigNumber::Finite(f) if f.is_negative() => Some(-1),
        BigNumber::Finite(_) => Some(1),
    }
}

/// Compare |a| with |b| for non-zero finite values.
pub(crate) fn compare_magnitude(a: &Finite, b: &Finite) -> Ordering {
    a.exponent().cmp(&b.exponent()).then_with(|| {
        // Same leading power: align coefficients on the shorter digit count
        let (la, lb) = (a.digits().len(), b.digits().len());
        match la.cmp(&lb) {
            Ordering::Equal => a.coefficient().cmp(b.coefficient()),
            Ordering::Less => a.coefficient().mul_pow10(lb - la).cmp(b.coefficient()),
            Ordering::Greater => a.coefficient().cmp(&b.coefficient().mul_pow10(la - lb)),
        }
    })
}

/// Largest of the values; NaN if any is NaN or the slice is empty.
pub fn max_of(values: &[BigNumber]) -> BigNumber {
    extreme(values, Ordering::Greater)
}

/// Smallest of the values; NaN if any is NaN or the slice is empty.
pub fn min_of(values: &[BigNumber]) -> BigNumber {
    extreme(values, Ordering::Less)
}

fn extreme(values: &[BigNumber], wanted: Ordering) -> BigNumber {
    let Some((first, rest)) = values.split_first() else {
        return BigNumber::NaN;
    };
    let mut best = first;
    for candidate in rest {
        match compare(candidate, best) {
            None => return BigNumber::NaN,
            Some(order) if order == wanted => best = candidate,
            Some(_) => {}
        }
    }
    if best.is_nan() {
        BigNumber::NaN
    } else {
        best.clone()
    }
}

// ============================================================================
// Operator traits
// ============================================================================

impl PartialEq for BigNumber {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for BigNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        compare(self, other)
    }
}

impl BigNumber {
    /// Numeric comparison: None if either value is NaN.
    pub fn compare(&self, other: &BigNumber) -> Option<Ordering> {
        compare(self, other)
    }

    /// Equal in value and in sign, so `-0` and `+0` differ; NaN matches NaN.
    pub fn is_identical(&self, other: &BigNumber) -> bool {
        match (self, other) {
            (BigNumber::NaN, BigNumber::NaN) => true,
            (BigNumber::Finite(a), BigNumber::Finite(b)) => a == b,
            _ => self == other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Range;
    use quickcheck::{quickcheck, TestResult};

    fn num(v: i64) -> BigNumber {
        BigNumber::from_i64(v)
    }

    fn dec(digits: &[u8], exponent: i64, negative: bool) -> BigNumber {
        BigNumber::from_parts(negative, digits, exponent, &Range::default()).unwrap()
    }

    #[test]
    fn test_nan_is_unordered() {
        assert_eq!(compare(&BigNumber::NaN, &num(1)), None);
        assert_eq!(compare(&num(1), &BigNumber::NaN), None);
        assert_eq!(compare(&BigNumber::NaN, &BigNumber::NaN), None);
        assert_ne!(BigNumber::NaN, BigNumber::NaN);
        assert!(BigNumber::NaN.is_identical(&BigNumber::NaN));
    }

    #[test]
    fn test_signed_zero_equal() {
        let pz = BigNumber::zero(false);
        let nz = BigNumber::zero(true);
        assert_eq!(compare(&pz, &nz), Some(Ordering::Equal));
        assert_eq!(pz, nz);
        assert!(!pz.is_identical(&nz));
    }

    #[test]
    fn test_infinities() {
        let pinf = BigNumber::infinity(false);
        let ninf = BigNumber::infinity(true);
        assert_eq!(compare(&pinf, &pinf), Some(Ordering::Equal));
        assert_eq!(compare(&ninf, &num(-1_000_000)), Some(Ordering::Less));
        assert_eq!(compare(&pinf, &num(1_000_000)), Some(Ordering::Greater));
        assert!(ninf < pinf);
    }

    #[test]
    fn test_magnitude_alignment() {
        // 0.5 vs 0.45
        let a = dec(&[5], -1, false);
        let b = dec(&[4, 5], -1, false);
        assert_eq!(compare(&a, &b), Some(Ordering::Greater));
        // -0.5 vs -0.45
        assert_eq!(compare(&a.negated(), &b.negated()), Some(Ordering::Less));
        // 1.2 vs 1.20000001
        let c = dec(&[1, 2], 0, false);
        let d = dec(&[1, 2, 0, 0, 0, 0, 0, 0, 0, 1], 0, false);
        assert!(c < d);
        // 100 vs 99.999
        assert!(num(100) > dec(&[9, 9, 9, 9, 9], 1, false));
    }

    #[test]
    fn test_max_min() {
        let values = [num(3), num(-7), dec(&[3, 5], 0, false)];
        assert_eq!(max_of(&values), dec(&[3, 5], 0, false));
        assert_eq!(min_of(&values), num(-7));
        assert!(max_of(&[num(1), BigNumber::NaN]).is_nan());
        assert!(min_of(&[BigNumber::NaN, num(1)]).is_nan());
        assert!(max_of(&[]).is_nan());
    }

    quickcheck! {
        fn prop_matches_integer_order(a: i64, b: i64) -> bool {
            compare(&num(a), &num(b)) == Some(a.cmp(&b))
        }

        fn prop_antisymmetric(a: i64, b: i32) -> TestResult {
            let (x, y) = (num(a), dec(&[1, 5], i64::from(b % 40), b < 0));
            match (compare(&x, &y), compare(&y, &x)) {
                (Some(o1), Some(o2)) => TestResult::from_bool(o1 == o2.reverse()),
                _ => TestResult::failed(),
            }
        }
    }
}
