// ============================================================================
// Rounding Engine
// Mode-parameterized rounding shared by every inexact operation
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::magnitude::Magnitude;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rounding modes, also used as modulo modes.
///
/// The discriminants are the numeric codes accepted by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum RoundingMode {
    /// Away from zero
    Up = 0,
    /// Toward zero (truncate)
    Down = 1,
    /// Toward +Infinity
    Ceil = 2,
    /// Toward -Infinity
    Floor = 3,
    /// Nearest neighbour; ties away from zero
    HalfUp = 4,
    /// Nearest neighbour; ties toward zero
    HalfDown = 5,
    /// Nearest neighbour; ties to the even neighbour
    HalfEven = 6,
    /// Nearest neighbour; ties toward +Infinity
    HalfCeil = 7,
    /// Nearest neighbour; ties toward -Infinity
    HalfFloor = 8,
    /// Modulo only: quotient = sign(divisor) * floor(dividend / |divisor|)
    Euclid = 9,
}

impl RoundingMode {
    /// Every mode in code order
    pub const ALL: [RoundingMode; 10] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceil,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::HalfCeil,
        RoundingMode::HalfFloor,
        RoundingMode::Euclid,
    ];

    /// Numeric code (0-9)
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Mode for a numeric code, if one exists.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Whether the mode may be used for rounding (codes 0-8).
    /// `Euclid` is only meaningful as a modulo mode.
    #[inline]
    pub const fn is_rounding_mode(self) -> bool {
        !matches!(self, RoundingMode::Euclid)
    }

    /// Decide whether the retained digits move one unit away from zero.
    ///
    /// `negative` is the sign of the value being rounded and `kept_odd` the
    /// parity of the last retained digit. `Euclid` behaves as `Floor`.
    pub fn rounds_away(self, negative: bool, kept_odd: bool, discarded: Discarded) -> bool {
        use Discarded::*;

        if discarded == Zero {
            return false;
        }
        match self {
            RoundingMode::Up => true,
            RoundingMode::Down => false,
            RoundingMode::Ceil => !negative,
            RoundingMode::Floor | RoundingMode::Euclid => negative,
            RoundingMode::HalfUp => discarded != BelowHalf,
            RoundingMode::HalfDown => discarded == AboveHalf,
            RoundingMode::HalfEven => discarded == AboveHalf || (discarded == Half && kept_odd),
            RoundingMode::HalfCeil => discarded == AboveHalf || (discarded == Half && !negative),
            RoundingMode::HalfFloor => discarded == AboveHalf || (discarded == Half && negative),
        }
    }
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::HalfUp
    }
}

impl TryFrom<u8> for RoundingMode {
    type Error = NumericError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(NumericError::InvalidOperand("rounding mode"))
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::Up => "ROUND_UP",
            RoundingMode::Down => "ROUND_DOWN",
            RoundingMode::Ceil => "ROUND_CEIL",
            RoundingMode::Floor => "ROUND_FLOOR",
            RoundingMode::HalfUp => "ROUND_HALF_UP",
            RoundingMode::HalfDown => "ROUND_HALF_DOWN",
            RoundingMode::HalfEven => "ROUND_HALF_EVEN",
            RoundingMode::HalfCeil => "ROUND_HALF_CEIL",
            RoundingMode::HalfFloor => "ROUND_HALF_FLOOR",
            RoundingMode::Euclid => "EUCLID",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Discarded-part classification
// ============================================================================

/// How the dropped part of a value compares with half a unit in the last
/// retained place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discarded {
    /// Nothing non-zero was dropped
    Zero,
    /// Non-zero but below half
    BelowHalf,
    /// Exactly half
    Half,
    /// Above half
    AboveHalf,
}

impl Discarded {
    /// Classify the remainder `rem` of a division by `divisor`.
    ///
    /// `sticky` records that further non-zero digits exist below `rem`
    /// (e.g. a non-zero long-division remainder beyond the guard digit).
    pub fn classify(rem: &Magnitude, divisor: &Magnitude, sticky: bool) -> Self {
        if rem.is_zero() {
            return if sticky {
                Discarded::BelowHalf
            } else {
                Discarded::Zero
            };
        }
        match rem.mul_small(2).cmp(divisor) {
            Ordering::Less => Discarded::BelowHalf,
            Ordering::Equal if sticky => Discarded::AboveHalf,
            Ordering::Equal => Discarded::Half,
            Ordering::Greater => Discarded::AboveHalf,
        }
    }

    /// True when nothing was dropped.
    #[inline]
    pub fn is_exact(self) -> bool {
        self == Discarded::Zero
    }
}

/// Round `coefficient × 10^scale` to a multiple of `10^target_scale`.
///
/// Returns the new coefficient, whose scale is `target_scale`. The result is
/// not normalized: a carry such as 999 → 1000 leaves trailing zeros for the
/// caller to strip. `sticky` marks non-zero digits below `coefficient` that
/// the caller already dropped; callers keep at least one guard digit so that
/// the sticky part is always below half a unit of `coefficient`'s last digit.
pub fn round_scaled(
    negative: bool,
    coefficient: &Magnitude,
    scale: i64,
    target_scale: i64,
    mode: RoundingMode,
    sticky: bool,
) -> (Magnitude, i64) {
    if scale >= target_scale {
        if !sticky {
            return (coefficient.clone(), scale);
        }
        let discarded = Discarded::BelowHalf;
        let bump = mode.rounds_away(negative, coefficient.is_odd(), discarded);
        let kept = if bump {
            coefficient.add_small(1)
        } else {
            coefficient.clone()
        };
        return (kept, scale);
    }

    let drop = usize::try_from(target_scale - scale).unwrap_or(usize::MAX);
    let (kept, rem) = coefficient.div_rem_pow10(drop);
    let discarded = if rem.is_zero() {
        Discarded::classify(&rem, &Magnitude::zero(), sticky)
    } else if rem.digit_count() < drop {
        Discarded::BelowHalf
    } else {
        Discarded::classify(&rem, &Magnitude::pow10(drop), sticky)
    };

    let kept = if mode.rounds_away(negative, kept.is_odd(), discarded) {
        kept.add_small(1)
    } else {
        kept
    };
    (kept, target_scale)
}
