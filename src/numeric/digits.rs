// ============================================================================
// Digit Buffer
// Normalized significant-digit storage shared by every engine
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::magnitude::Magnitude;
use std::fmt;

/// The significant digits of a finite value.
///
/// Semantically a sequence of decimal digits, most significant first, with
/// no leading or trailing zeros. The canonical zero is the single digit `0`.
/// Digits are held as a [`Magnitude`] (groups of 14) so arithmetic can run
/// on whole groups.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DigitBuffer {
    coefficient: Magnitude,
    len: usize,
}

/// Result of normalizing a raw digit sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The stripped digits
    pub buffer: DigitBuffer,
    /// How many leading zeros were removed
    pub leading_zeros: usize,
}

impl DigitBuffer {
    /// The canonical zero buffer `[0]`.
    pub fn zero() -> Self {
        Self {
            coefficient: Magnitude::zero(),
            len: 1,
        }
    }

    /// Normalize a raw digit sequence.
    ///
    /// # Errors
    /// Returns `InvalidValue` if the sequence is empty or a digit is outside `0..=9`.
    pub fn normalize(raw: &[u8]) -> NumericResult<Normalized> {
        if raw.is_empty() || raw.iter().any(|&d| d > 9) {
            return Err(NumericError::InvalidValue);
        }
        let Some(first) = raw.iter().position(|&d| d != 0) else {
            return Ok(Normalized {
                buffer: Self::zero(),
                leading_zeros: 0,
            });
        };
        let last = raw.iter().rposition(|&d| d != 0).unwrap_or(first);
        let significant = &raw[first..=last];
        Ok(Normalized {
            buffer: Self {
                coefficient: Magnitude::from_digits(significant),
                len: significant.len(),
            },
            leading_zeros: first,
        })
    }

    /// Wrap an integer coefficient, stripping its trailing zeros.
    ///
    /// Returns the buffer and the number of zeros removed.
    pub fn from_magnitude(coefficient: Magnitude) -> (Self, usize) {
        if coefficient.is_zero() {
            return (Self::zero(), 0);
        }
        let zeros = coefficient.trailing_zeros();
        let coefficient = if zeros > 0 {
            coefficient.div_rem_pow10(zeros).0
        } else {
            coefficient
        };
        let len = coefficient.digit_count();
        (Self { coefficient, len }, zeros)
    }

    /// Check whether this is the canonical zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Number of significant digits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true: a buffer always holds at least one digit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The digits as an integer
    #[inline]
    pub fn coefficient(&self) -> &Magnitude {
        &self.coefficient
    }

    /// All digits, most significant first
    pub fn digits(&self) -> Vec<u8> {
        self.coefficient.to_digits()
    }
}

impl fmt::Display for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coefficient)
    }
}

impl fmt::Debug for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigitBuffer({}, len={})", self.coefficient, self.len)
    }
}
