// ============================================================================
// Decimal Value
// Tagged representation: NaN | Infinity | Finite(sign, digits, exponent)
// ============================================================================

use super::config::{clamp_safe, ExponentialAt, Range};
use crate::numeric::{DigitBuffer, Magnitude, NumericError, NumericResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// An arbitrary-precision decimal value.
///
/// Values are immutable; every operation returns a new value. Arithmetic
/// lives on [`crate::engine::Context`], which supplies the configuration.
/// `==` and `<` are numeric: NaN equals nothing and `-0 == +0`.
#[derive(Clone)]
pub enum BigNumber {
    /// Not a number. Unordered, and unequal to everything including itself.
    NaN,

    /// Signed infinity
    Infinity {
        /// True for -Infinity
        negative: bool,
    },

    /// A finite value, including signed zero
    Finite(Finite),
}

/// Finite value: `±0.d1d2d3… × 10^(exponent + 1)`.
///
/// `exponent` is the power of ten of the first significant digit, so
/// `123.45` has digits `12345` and exponent `2`. Zero has digits `0` and
/// exponent `0`, and keeps its sign.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Finite {
    negative: bool,
    digits: DigitBuffer,
    exponent: i64,
}

impl Finite {
    /// Sign flag (true for values below zero and for -0)
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Significant digits
    #[inline]
    pub fn digits(&self) -> &DigitBuffer {
        &self.digits
    }

    /// Power of ten of the first significant digit
    #[inline]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Check if value is ±0.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits.is_zero()
    }

    /// The digits as an integer coefficient
    #[inline]
    pub fn coefficient(&self) -> &Magnitude {
        self.digits.coefficient()
    }

    /// Power of ten of the last significant digit: value = coefficient × 10^scale
    #[inline]
    pub fn scale(&self) -> i64 {
        self.exponent - self.digits.len() as i64 + 1
    }
}

// ============================================================================
// Construction
// ============================================================================

impl BigNumber {
    /// NaN
    #[inline]
    pub const fn nan() -> Self {
        BigNumber::NaN
    }

    /// Signed infinity
    #[inline]
    pub const fn infinity(negative: bool) -> Self {
        BigNumber::Infinity { negative }
    }

    /// Signed zero
    pub fn zero(negative: bool) -> Self {
        BigNumber::Finite(Finite {
            negative,
            digits: DigitBuffer::zero(),
            exponent: 0,
        })
    }

    /// One
    pub fn one() -> Self {
        Self::from_scaled(false, Magnitude::one(), 0, &Range::unbounded())
    }

    /// Build a normalized value from a sign, raw digits and exponent.
    ///
    /// The value is `±0.d1d2… × 10^(exponent + 1)`; leading and trailing
    /// zeros are stripped and the exponent adjusted. The exponent is clamped
    /// to ±`MAX_SAFE_INTEGER`; exponents outside `range` overflow to Infinity
    /// or underflow to signed zero.
    ///
    /// # Errors
    /// Returns `InvalidValue` for an empty sequence or a digit above 9.
    pub fn from_parts(
        negative: bool,
        digits: &[u8],
        exponent: i64,
        range: &Range,
    ) -> NumericResult<Self> {
        let normalized = DigitBuffer::normalize(digits)?;
        if normalized.buffer.is_zero() {
            return Ok(Self::zero(negative));
        }
        let exponent = clamp_safe(exponent.saturating_sub(normalized.leading_zeros as i64));
        Ok(Self::bounded(negative, normalized.buffer, exponent, range))
    }

    /// Build from an integer coefficient and a power-of-ten scale:
    /// `±coefficient × 10^scale`. Trailing zeros are stripped and `range`
    /// applied.
    pub fn from_scaled(negative: bool, coefficient: Magnitude, scale: i64, range: &Range) -> Self {
        let (digits, zeros) = DigitBuffer::from_magnitude(coefficient);
        if digits.is_zero() {
            return Self::zero(negative);
        }
        let exponent = scale
            .saturating_add(zeros as i64)
            .saturating_add(digits.len() as i64 - 1);
        Self::bounded(negative, digits, exponent, range)
    }

    fn bounded(negative: bool, digits: DigitBuffer, exponent: i64, range: &Range) -> Self {
        if exponent > range.max {
            BigNumber::Infinity { negative }
        } else if exponent < range.min {
            Self::zero(negative)
        } else {
            BigNumber::Finite(Finite {
                negative,
                digits,
                exponent,
            })
        }
    }

    /// Create from a machine integer.
    pub fn from_i64(value: i64) -> Self {
        Self::from_scaled(
            value < 0,
            Magnitude::from_u64(value.unsigned_abs()),
            0,
            &Range::unbounded(),
        )
    }

    /// Create from an unsigned machine integer.
    pub fn from_u64(value: u64) -> Self {
        Self::from_scaled(false, Magnitude::from_u64(value), 0, &Range::unbounded())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The finite payload, if any
    #[inline]
    pub fn as_finite(&self) -> Option<&Finite> {
        match self {
            BigNumber::Finite(f) => Some(f),
            _ => None,
        }
    }

    /// Check if value is NaN.
    #[inline]
    pub fn is_nan(&self) -> bool {
        matches!(self, BigNumber::NaN)
    }

    /// Check if value is neither NaN nor ±Infinity.
    #[inline]
    pub fn is_finite(&self) -> bool {
        matches!(self, BigNumber::Finite(_))
    }

    /// Check if value is ±Infinity.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, BigNumber::Infinity { .. })
    }

    /// Check if the sign is negative (including -0 and -Infinity; never NaN).
    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            BigNumber::NaN => false,
            BigNumber::Infinity { negative } => *negative,
            BigNumber::Finite(f) => f.negative,
        }
    }

    /// Check if value is ±0.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.as_finite().is_some_and(Finite::is_zero)
    }

    /// Check if value is a whole number.
    pub fn is_integer(&self) -> bool {
        self.as_finite().is_some_and(|f| f.scale() >= 0)
    }

    /// Number of digits after the decimal point, or None if not finite.
    pub fn decimal_places(&self) -> Option<u64> {
        self.as_finite().map(|f| (-f.scale()).max(0) as u64)
    }

    /// Number of significant digits, or None if not finite.
    ///
    /// With `include_integer_zeros`, trailing zeros of the integer part
    /// count as significant (`1200` has precision 4 instead of 2).
    pub fn precision(&self, include_integer_zeros: bool) -> Option<u64> {
        self.as_finite().map(|f| {
            let len = f.digits.len() as u64;
            if include_integer_zeros && !f.is_zero() && f.exponent + 1 > len as i64 {
                (f.exponent + 1) as u64
            } else {
                len
            }
        })
    }

    // ========================================================================
    // Exact sign operations
    // ========================================================================

    /// Magnitude of the value. Always exact.
    pub fn abs(&self) -> Self {
        match self {
            BigNumber::NaN => BigNumber::NaN,
            BigNumber::Infinity { .. } => BigNumber::Infinity { negative: false },
            BigNumber::Finite(f) => BigNumber::Finite(Finite {
                negative: false,
                ..f.clone()
            }),
        }
    }

    /// Value multiplied by -1. Always exact.
    pub fn negated(&self) -> Self {
        match self {
            BigNumber::NaN => BigNumber::NaN,
            BigNumber::Infinity { negative } => BigNumber::Infinity {
                negative: !negative,
            },
            BigNumber::Finite(f) => BigNumber::Finite(Finite {
                negative: !f.negative,
                ..f.clone()
            }),
        }
    }
}

impl std::ops::Neg for BigNumber {
    type Output = BigNumber;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl std::ops::Neg for &BigNumber {
    type Output = BigNumber;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Default for BigNumber {
    fn default() -> Self {
        Self::zero(false)
    }
}

impl From<i64> for BigNumber {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for BigNumber {
    fn from(value: i32) -> Self {
        Self::from_i64(i64::from(value))
    }
}

impl From<u64> for BigNumber {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

// ============================================================================
// Conversion to and from rust_decimal (for API boundaries)
// ============================================================================

impl BigNumber {
    /// Convert from rust_decimal::Decimal. Always exact.
    pub fn from_rust_decimal(d: rust_decimal::Decimal) -> Self {
        let mantissa = d.mantissa();
        Self::from_scaled(
            d.is_sign_negative(),
            Magnitude::from_u128(mantissa.unsigned_abs()),
            -i64::from(d.scale()),
            &Range::unbounded(),
        )
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// Returns None for NaN, Infinity, or values that need more than 28
    /// decimal places or 96 bits of mantissa.
    pub fn to_rust_decimal(&self) -> Option<rust_decimal::Decimal> {
        let f = self.as_finite()?;
        // 96-bit mantissas stay below 10^29
        if f.exponent() > 28 {
            return None;
        }
        let (coefficient, scale) = if f.scale() >= 0 {
            let places = usize::try_from(f.scale()).ok()?;
            (f.coefficient().mul_pow10(places), 0u32)
        } else {
            (f.coefficient().clone(), u32::try_from(-f.scale()).ok()?)
        };
        let mantissa = i128::try_from(coefficient.to_u128()?).ok()?;
        let mantissa = if f.negative { -mantissa } else { mantissa };
        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, scale).ok()
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for BigNumber {
    /// Formats with the default exponential-notation thresholds.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::engine::format::to_string(
            self,
            &ExponentialAt::default(),
        ))
    }
}

impl fmt::Debug for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BigNumber::NaN => write!(f, "BigNumber(NaN)"),
            BigNumber::Infinity { negative } => {
                write!(f, "BigNumber({}Infinity)", if *negative { "-" } else { "" })
            }
            BigNumber::Finite(v) => write!(f, "BigNumber({:?})", v),
        }
    }
}

impl fmt::Debug for Finite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}0.{}e{}",
            if self.negative { "-" } else { "+" },
            self.digits,
            self.exponent + 1
        )
    }
}

impl std::str::FromStr for BigNumber {
    type Err = NumericError;

    /// Parse with the default configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::engine::parse::parse(s, &super::config::Config::default())
    }
}

// ============================================================================
// Serde
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for BigNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&crate::engine::format::value_of(
            self,
            &ExponentialAt::default(),
        ))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for BigNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finite(value: &BigNumber) -> &Finite {
        value.as_finite().expect("finite value")
    }

    #[test]
    fn test_from_parts_normalizes() {
        // 0.0012300 × 10^1 = 0.0123
        let x = BigNumber::from_parts(false, &[0, 0, 1, 2, 3, 0, 0], 0, &Range::default()).unwrap();
        let f = finite(&x);
        assert_eq!(f.digits().digits(), vec![1, 2, 3]);
        assert_eq!(f.exponent(), -2);
        assert_eq!(f.scale(), -4);
    }

    #[test]
    fn test_from_parts_invalid() {
        assert_eq!(
            BigNumber::from_parts(false, &[], 0, &Range::default()),
            Err(NumericError::InvalidValue)
        );
        assert_eq!(
            BigNumber::from_parts(false, &[1, 12], 0, &Range::default()),
            Err(NumericError::InvalidValue)
        );
    }

    #[test]
    fn test_range_overflow_and_underflow() {
        let range = Range::symmetric(10);
        let big = BigNumber::from_parts(true, &[5], 11, &range).unwrap();
        assert_eq!(big, BigNumber::infinity(true));

        let tiny = BigNumber::from_parts(true, &[5], -11, &range).unwrap();
        assert!(tiny.is_zero());
        assert!(tiny.is_negative());

        let edge = BigNumber::from_parts(false, &[5], 10, &range).unwrap();
        assert!(edge.is_finite());
    }

    #[test]
    fn test_extreme_exponents_are_clamped() {
        let range = Range::new(i64::MIN, i64::MAX);
        let huge = BigNumber::from_parts(false, &[1], i64::MAX, &range).unwrap();
        let tiny = BigNumber::from_parts(true, &[1], i64::MIN, &range).unwrap();
        let limit = crate::domain::MAX_SAFE_INTEGER;
        assert_eq!(finite(&huge).exponent(), limit);
        assert_eq!(finite(&tiny).exponent(), -limit);
        assert!(tiny < huge);
        assert!(finite(&huge).scale() > finite(&tiny).scale());
    }

    #[test]
    fn test_signed_zero() {
        let neg_zero = BigNumber::zero(true);
        assert!(neg_zero.is_zero());
        assert!(neg_zero.is_negative());
        assert!(!neg_zero.abs().is_negative());
        assert!(!(-neg_zero).is_negative());
    }

    #[test]
    fn test_from_i64() {
        let x = BigNumber::from_i64(-1200);
        let f = finite(&x);
        assert!(f.is_negative());
        assert_eq!(f.digits().digits(), vec![1, 2]);
        assert_eq!(f.exponent(), 3);
        assert!(x.is_integer());
        assert_eq!(BigNumber::from_i64(i64::MIN).precision(false), Some(19));
    }

    #[test]
    fn test_decimal_places_and_precision() {
        let x = BigNumber::from_parts(false, &[1, 2, 3, 4, 5], 1, &Range::default()).unwrap(); // 12.345
        assert_eq!(x.decimal_places(), Some(3));
        assert_eq!(x.precision(false), Some(5));
        assert!(!x.is_integer());

        let y = BigNumber::from_i64(1200);
        assert_eq!(y.decimal_places(), Some(0));
        assert_eq!(y.precision(false), Some(2));
        assert_eq!(y.precision(true), Some(4));

        assert_eq!(BigNumber::NaN.decimal_places(), None);
        assert_eq!(BigNumber::infinity(false).precision(true), None);
    }

    #[test]
    fn test_predicates() {
        assert!(BigNumber::NaN.is_nan());
        assert!(!BigNumber::NaN.is_negative());
        assert!(BigNumber::infinity(true).is_negative());
        assert!(BigNumber::infinity(true).is_infinite());
        assert!(!BigNumber::infinity(false).is_finite());
        assert!(!BigNumber::infinity(false).is_integer());
        assert!(BigNumber::zero(false).is_integer());
    }

    #[test]
    fn test_rust_decimal_roundtrip() {
        use rust_decimal::Decimal;

        let d = Decimal::new(-12345, 2); // -123.45
        let x = BigNumber::from_rust_decimal(d);
        let f = finite(&x);
        assert!(f.is_negative());
        assert_eq!(f.exponent(), 2);
        assert_eq!(x.to_rust_decimal(), Some(d));

        assert_eq!(BigNumber::from_i64(500).to_rust_decimal(), Some(Decimal::from(500)));
        assert_eq!(BigNumber::NaN.to_rust_decimal(), None);
    }

    #[test]
    fn test_debug_format() {
        let x = BigNumber::from_i64(-42);
        assert_eq!(format!("{:?}", x), "BigNumber(-0.42e2)");
        assert_eq!(format!("{:?}", BigNumber::NaN), "BigNumber(NaN)");
    }
}
