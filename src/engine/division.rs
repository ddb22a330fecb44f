// ============================================================================
// Division Engine
// Correctly rounded quotients, integer division and modulo
// ============================================================================

use super::additive::sub;
use super::multiplicative::mul;
use crate::domain::{BigNumber, Config, ErrorPolicy, Range};
use crate::numeric::{round_scaled, Magnitude, NumericError, NumericResult, RoundingMode};

/// x ÷ y rounded to the configured decimal places and rounding mode.
///
/// # Errors
/// `0 ÷ 0` returns `DivisionUndefined` under the strict policy and NaN
/// otherwise.
pub fn div(x: &BigNumber, y: &BigNumber, config: &Config) -> NumericResult<BigNumber> {
    div_rounded(
        x,
        y,
        config.decimal_places,
        config.rounding_mode,
        config.error_policy,
        &config.range,
    )
}

/// Integer part of x ÷ y (zero places, rounded toward zero).
pub fn div_to_int(x: &BigNumber, y: &BigNumber, config: &Config) -> NumericResult<BigNumber> {
    div_rounded(
        x,
        y,
        0,
        RoundingMode::Down,
        config.error_policy,
        &config.range,
    )
}

/// x ÷ y rounded to `dp` places with `mode`.
pub(crate) fn div_rounded(
    x: &BigNumber,
    y: &BigNumber,
    dp: u32,
    mode: RoundingMode,
    policy: ErrorPolicy,
    range: &Range,
) -> NumericResult<BigNumber> {
    let negative = x.is_negative() != y.is_negative();
    let (a, b) = match (x, y) {
        (BigNumber::NaN, _) | (_, BigNumber::NaN) => return Ok(BigNumber::NaN),
        (BigNumber::Infinity { .. }, BigNumber::Infinity { .. }) => return Ok(BigNumber::NaN),
        (BigNumber::Infinity { .. }, _) => return Ok(BigNumber::infinity(negative)),
        (_, BigNumber::Infinity { .. }) => return Ok(BigNumber::zero(negative)),
        (BigNumber::Finite(a), BigNumber::Finite(b)) => (a, b),
    };
    if b.is_zero() {
        if a.is_zero() {
            return undefined(policy);
        }
        return Ok(BigNumber::infinity(negative));
    }
    if a.is_zero() {
        return Ok(BigNumber::zero(negative));
    }

    // Quotient with one guard digit beyond the target place
    let dp = i64::from(dp);
    let shift = a.scale() - b.scale() + dp + 1;
    let (quotient, remainder) = if shift >= 0 {
        let dividend = a.coefficient().mul_pow10(to_usize(shift));
        dividend.div_rem(b.coefficient())
    } else {
        let divisor = b.coefficient().mul_pow10(to_usize(-shift));
        a.coefficient().div_rem(&divisor)
    };

    let (kept, scale) = round_scaled(
        negative,
        &quotient,
        -(dp + 1),
        -dp,
        mode,
        !remainder.is_zero(),
    );
    Ok(BigNumber::from_scaled(negative, kept, scale, range))
}

/// x mod y under the configured modulo mode.
///
/// The quotient is `x ÷ y` rounded to an integer with the modulo mode, or
/// `sign(y) × floor(x ÷ |y|)` for `Euclid`; the result is `x - y × quotient`.
///
/// # Errors
/// A zero divisor returns `DivisionUndefined` under the strict policy and NaN
/// otherwise.
pub fn modulo(x: &BigNumber, y: &BigNumber, config: &Config) -> NumericResult<BigNumber> {
    if !x.is_finite() || y.is_nan() {
        return Ok(BigNumber::NaN);
    }
    if y.is_zero() {
        return undefined(config.error_policy);
    }
    if y.is_infinite() || x.is_zero() {
        return Ok(x.clone());
    }

    let quotient = if config.modulo_mode == RoundingMode::Euclid {
        let q = div_rounded(
            x,
            &y.abs(),
            0,
            RoundingMode::Floor,
            config.error_policy,
            &Range::unbounded(),
        )?;
        if y.is_negative() {
            q.negated()
        } else {
            q
        }
    } else {
        div_rounded(
            x,
            y,
            0,
            config.modulo_mode,
            config.error_policy,
            &Range::unbounded(),
        )?
    };

    let exact = Config {
        range: Range::unbounded(),
        ..config.clone()
    };
    let product = mul(&quotient, y, &exact);
    let remainder = sub(x, &product, &exact);
    Ok(match remainder.as_finite() {
        Some(f) if !f.is_zero() => BigNumber::from_scaled(
            f.is_negative(),
            f.coefficient().clone(),
            f.scale(),
            &config.range,
        ),
        // Truncated division keeps the dividend's sign on a zero remainder
        Some(_) if config.modulo_mode == RoundingMode::Down => BigNumber::zero(x.is_negative()),
        _ => remainder,
    })
}

/// Remainder of non-negative integers, for modular exponentiation.
pub(crate) fn rem_integer(x: &Magnitude, m: &Magnitude) -> Magnitude {
    x.div_rem(m).1
}

fn undefined(policy: ErrorPolicy) -> NumericResult<BigNumber> {
    if policy.is_strict() {
        Err(NumericError::DivisionUndefined)
    } else {
        tracing::warn!("undefined division, returning NaN");
        Ok(BigNumber::NaN)
    }
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}
