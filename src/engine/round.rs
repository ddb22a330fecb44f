// ============================================================================
// Value Rounding
// Decimal-place and significant-digit rounding of whole values
// ============================================================================

use crate::domain::{BigNumber, Range};
use crate::numeric::{round_scaled, RoundingMode};

/// Round to a multiple of `10^target_scale`. Non-finite values pass through.
pub(crate) fn round_to_scale(
    x: &BigNumber,
    target_scale: i64,
    mode: RoundingMode,
    range: &Range,
) -> BigNumber {
    let BigNumber::Finite(f) = x else {
        return x.clone();
    };
    if f.is_zero() || f.scale() >= target_scale {
        return x.clone();
    }
    let (kept, scale) = round_scaled(
        f.is_negative(),
        f.coefficient(),
        f.scale(),
        target_scale,
        mode,
        false,
    );
    BigNumber::from_scaled(f.is_negative(), kept, scale, range)
}

/// Round to `dp` digits after the decimal point.
pub fn round_dp(x: &BigNumber, dp: u32, mode: RoundingMode, range: &Range) -> BigNumber {
    round_to_scale(x, -i64::from(dp), mode, range)
}

/// Round to `sd` significant digits (`sd >= 1`).
pub fn round_sd(x: &BigNumber, sd: u32, mode: RoundingMode, range: &Range) -> BigNumber {
    match x.as_finite() {
        Some(f) if !f.is_zero() => {
            round_to_scale(x, f.exponent() - i64::from(sd) + 1, mode, range)
        }
        _ => x.clone(),
    }
}

/// Largest integer not above `x`
pub fn floor(x: &BigNumber, range: &Range) -> BigNumber {
    round_dp(x, 0, RoundingMode::Floor, range)
}

/// Smallest integer not below `x`
pub fn ceil(x: &BigNumber, range: &Range) -> BigNumber {
    round_dp(x, 0, RoundingMode::Ceil, range)
}

/// Integer part of `x`
pub fn trunc(x: &BigNumber, range: &Range) -> BigNumber {
    round_dp(x, 0, RoundingMode::Down, range)
}

/// Multiply by `10^n` exactly, subject to `range`.
pub fn shift(x: &BigNumber, n: i64, range: &Range) -> BigNumber {
    match x {
        BigNumber::Finite(f) if !f.is_zero() => BigNumber::from_scaled(
            f.is_negative(),
            f.coefficient().clone(),
            f.scale().saturating_add(n),
            range,
        ),
        _ => x.clone(),
    }
}
