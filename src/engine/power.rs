// ============================================================================
// Power Engine
// Integer exponents, optional modulus, precision-capped intermediates
// ============================================================================

use super::division::{div_rounded, modulo, rem_integer};
use super::multiplicative::mul;
use super::round::{round_sd, round_to_scale};
use crate::domain::{BigNumber, Config, Finite, MAX_SAFE_INTEGER};
use crate::numeric::{Magnitude, NumericError, NumericResult, RoundingMode};
use std::cmp::Ordering;

/// Extra significant digits kept on intermediates when the result is
/// limited to `pow_precision` digits.
const GUARD_DIGITS: u32 = 28;

/// x^n, optionally reduced modulo `modulus`.
///
/// Without a modulus and with a non-zero `pow_precision`, intermediates are
/// truncated to `pow_precision + 28` significant digits and the result is
/// rounded to `pow_precision` digits. Negative exponents take the reciprocal
/// at the configured decimal places.
///
/// # Errors
/// `InvalidOperand("exponent")` if `|n|` exceeds 2^53 - 1 under the strict
/// policy; `DivisionUndefined` for a zero modulus under the strict policy.
pub fn pow(
    x: &BigNumber,
    n: i64,
    modulus: Option<&BigNumber>,
    config: &Config,
) -> NumericResult<BigNumber> {
    if n.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
        if config.error_policy.is_strict() {
            return Err(NumericError::InvalidOperand("exponent"));
        }
        tracing::warn!(n, "exponent beyond safe integer range, treating as infinite");
        return pow_infinite(x, n > 0, modulus, config);
    }

    if n == 0 {
        let one = BigNumber::one();
        return match modulus {
            Some(m) => modulo(&one, m, config),
            None => Ok(one),
        };
    }

    if let Some(m) = modulus {
        if let (Some(base), Some(m)) = (positive_integer(x), positive_integer(m)) {
            if n > 1 && !base.is_one() && !m.is_one() {
                return Ok(pow_mod_integer(&base, n.unsigned_abs(), &m, config));
            }
        }
        let exact = pow_exact(x, n, config)?;
        return modulo(&exact, m, config);
    }

    if config.pow_precision == 0 {
        return pow_exact(x, n, config);
    }

    let cap = config.pow_precision + GUARD_DIGITS;
    let y = square_and_multiply(x, n.unsigned_abs(), config, |v| truncate_sd(v, cap, config));
    let y = if n < 0 { reciprocal(&y, config)? } else { y };
    Ok(round_sd(&y, config.pow_precision, config.rounding_mode, &config.range))
}

/// x^n for a floating-point exponent.
///
/// Integral exponents within ±(2^53 - 1) delegate to [`pow`]. Under the
/// permissive policy a fractional exponent is truncated, an out-of-range or
/// infinite exponent follows the infinite-exponent rules, and NaN gives NaN.
///
/// # Errors
/// `InvalidOperand("exponent")` for any other exponent under the strict policy.
pub fn pow_f64(
    x: &BigNumber,
    n: f64,
    modulus: Option<&BigNumber>,
    config: &Config,
) -> NumericResult<BigNumber> {
    let safe = MAX_SAFE_INTEGER as f64;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= safe {
        return pow(x, n as i64, modulus, config);
    }
    if config.error_policy.is_strict() {
        return Err(NumericError::InvalidOperand("exponent"));
    }
    tracing::warn!(n, "invalid exponent under permissive policy");
    if n.is_nan() {
        Ok(BigNumber::NaN)
    } else if n.abs() > safe {
        pow_infinite(x, n > 0.0, modulus, config)
    } else {
        pow(x, n.trunc() as i64, modulus, config)
    }
}

/// x^(±Infinity): NaN when |x| = 1, otherwise 0 or +Infinity depending on
/// whether |x| is above or below one.
fn pow_infinite(
    x: &BigNumber,
    positive: bool,
    modulus: Option<&BigNumber>,
    config: &Config,
) -> NumericResult<BigNumber> {
    let result = match x.abs().compare(&BigNumber::one()) {
        None | Some(Ordering::Equal) => BigNumber::NaN,
        Some(Ordering::Greater) if positive => BigNumber::infinity(false),
        Some(Ordering::Less) if !positive => BigNumber::infinity(false),
        Some(_) => BigNumber::zero(false),
    };
    match modulus {
        Some(m) if !result.is_nan() => modulo(&result, m, config),
        _ => Ok(result),
    }
}

/// Exact x^n (reciprocal at the configured places for negative n).
fn pow_exact(x: &BigNumber, n: i64, config: &Config) -> NumericResult<BigNumber> {
    let y = square_and_multiply(x, n.unsigned_abs(), config, |v| v);
    if n < 0 {
        reciprocal(&y, config)
    } else {
        Ok(y)
    }
}

fn square_and_multiply(
    x: &BigNumber,
    mut n: u64,
    config: &Config,
    limit: impl Fn(BigNumber) -> BigNumber,
) -> BigNumber {
    let mut acc = BigNumber::one();
    let mut base = x.clone();
    let mut steps = 0u32;
    loop {
        if n & 1 == 1 {
            acc = limit(mul(&acc, &base, config));
            if !acc.is_finite() {
                break;
            }
        }
        n >>= 1;
        if n == 0 {
            break;
        }
        base = limit(mul(&base, &base, config));
        steps += 1;
    }
    tracing::trace!(steps, "power by squaring");
    acc
}

fn reciprocal(y: &BigNumber, config: &Config) -> NumericResult<BigNumber> {
    div_rounded(
        &BigNumber::one(),
        y,
        config.decimal_places,
        config.rounding_mode,
        config.error_policy,
        &config.range,
    )
}

/// Cut to `sd` significant digits toward zero.
fn truncate_sd(v: BigNumber, sd: u32, config: &Config) -> BigNumber {
    match v.as_finite() {
        Some(f) if f.digits().len() > sd as usize => round_to_scale(
            &v,
            f.exponent() - i64::from(sd) + 1,
            RoundingMode::Down,
            &config.range,
        ),
        _ => v,
    }
}

/// The integer value of `x` if it is a positive whole number.
fn positive_integer(x: &BigNumber) -> Option<Magnitude> {
    let f: &Finite = x.as_finite()?;
    if f.is_negative() || f.is_zero() || f.scale() < 0 {
        return None;
    }
    Some(f.coefficient().mul_pow10(usize::try_from(f.scale()).ok()?))
}

/// base^n mod m, reducing after every step; exact for any precision.
fn pow_mod_integer(base: &Magnitude, mut n: u64, m: &Magnitude, config: &Config) -> BigNumber {
    let mut acc = Magnitude::one();
    let mut b = rem_integer(base, m);
    while n > 0 {
        if n & 1 == 1 {
            acc = rem_integer(&acc.mul(&b), m);
        }
        n >>= 1;
        if n > 0 {
            b = rem_integer(&b.mul(&b), m);
        }
    }
    BigNumber::from_scaled(false, acc, 0, &config.range)
}
