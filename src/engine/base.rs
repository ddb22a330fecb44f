// ============================================================================
// Base Converter
// Digit strings in bases 2-64 to and from decimal values
// ============================================================================

use super::round::round_dp;
use crate::domain::{BigNumber, Config};
use crate::numeric::{Discarded, Magnitude, NumericError, NumericResult};

/// Digit symbols in value order. Bases up to 36 read letters case-insensitively.
pub const ALPHABET: &[u8; 64] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$_";

/// Smallest supported base
pub const MIN_BASE: u32 = 2;

/// Largest supported base
pub const MAX_BASE: u32 = 64;

/// True if `base` is in 2..=64.
#[inline]
pub fn is_valid_base(base: u32) -> bool {
    (MIN_BASE..=MAX_BASE).contains(&base)
}

/// Value of a digit symbol in `base`, if it is one.
pub fn digit_value(symbol: u8, base: u32) -> Option<u32> {
    let symbol = if base <= 36 {
        symbol.to_ascii_lowercase()
    } else {
        symbol
    };
    let value = ALPHABET.iter().position(|&c| c == symbol)? as u32;
    (value < base).then_some(value)
}

/// Build a value from digit values in `base`.
///
/// The value is `±0.d1d2… × base^(exponent + 1)`. Results with a fractional
/// part are rounded to the configured decimal places.
///
/// # Errors
/// `InvalidValue` if the base is outside 2..=64, `digits` is empty, or a digit
/// is not below the base.
pub fn from_radix_parts(
    negative: bool,
    digits: &[u32],
    exponent: i64,
    base: u32,
    config: &Config,
) -> NumericResult<BigNumber> {
    if !is_valid_base(base) || digits.is_empty() || digits.iter().any(|&d| d >= base) {
        return Err(NumericError::InvalidValue);
    }

    let integer = digits.iter().fold(Magnitude::zero(), |acc, &d| {
        acc.mul_small(u64::from(base)).add_small(u64::from(d))
    });
    if integer.is_zero() {
        return Ok(BigNumber::zero(negative));
    }

    // Decimal exponent estimate; far outside the range or the decimal places
    // the result is known without computing base^places.
    let dp = config.decimal_places;
    let leading_zeros = digits.iter().take_while(|&&d| d == 0).count();
    let magnitude = (exponent as f64 + 1.0 - leading_zeros as f64) * f64::from(base).log10();
    if magnitude > config.range.max as f64 + 3.0 {
        return Ok(BigNumber::infinity(negative));
    }
    if magnitude < -f64::from(dp) - 2.0 {
        let up = config
            .rounding_mode
            .rounds_away(negative, false, Discarded::BelowHalf);
        let units = if up { Magnitude::one() } else { Magnitude::zero() };
        return Ok(BigNumber::from_scaled(negative, units, -i64::from(dp), &config.range));
    }

    // value = integer × base^places
    let places = exponent.saturating_add(1).saturating_sub(digits.len() as i64);
    let radix = Magnitude::from_u64(u64::from(base));
    if places >= 0 {
        let scaled = integer.mul(&radix.pow(places as u64));
        return Ok(BigNumber::from_scaled(negative, scaled, 0, &config.range));
    }

    let denominator = radix.pow(places.unsigned_abs());
    let numerator = integer.mul_pow10(dp as usize);
    let (quotient, remainder) = numerator.div_rem(&denominator);
    let discarded = Discarded::classify(&remainder, &denominator, false);
    let quotient = if config
        .rounding_mode
        .rounds_away(negative, quotient.is_odd(), discarded)
    {
        quotient.add_small(1)
    } else {
        quotient
    };
    Ok(BigNumber::from_scaled(
        negative,
        quotient,
        -i64::from(dp),
        &config.range,
    ))
}

/// Render `x` in `base`, rounding any fraction to the configured decimal
/// places and rounding mode. Base 10 uses plain fixed-point notation.
///
/// # Errors
/// `InvalidOperand("base")` if the base is outside 2..=64.
pub fn to_radix_string(x: &BigNumber, base: u32, config: &Config) -> NumericResult<String> {
    if !is_valid_base(base) {
        return Err(NumericError::InvalidOperand("base"));
    }
    let f = match x {
        BigNumber::Finite(f) => f,
        _ => return Ok(super::format::to_string(x, &config.exponential_at)),
    };
    let sign = if f.is_negative() && !f.is_zero() { "-" } else { "" };

    if base == 10 {
        let rounded = round_dp(x, config.decimal_places, config.rounding_mode, &config.range);
        let body = match rounded.as_finite() {
            Some(r) => super::format::fixed_point(&r.digits().digits(), r.exponent()),
            None => return Ok(super::format::to_string(&rounded, &config.exponential_at)),
        };
        return Ok(format!("{}{}", sign, body));
    }

    let radix = Magnitude::from_u64(u64::from(base));
    let (units, places) = if f.scale() >= 0 {
        let shift = usize::try_from(f.scale()).unwrap_or(usize::MAX);
        (f.coefficient().mul_pow10(shift), 0usize)
    } else {
        // units of base^-dp: round(|x| × base^dp)
        let dp = config.decimal_places as usize;
        let denominator = Magnitude::pow10(f.scale().unsigned_abs() as usize);
        let numerator = f.coefficient().mul(&radix.pow(dp as u64));
        let (quotient, remainder) = numerator.div_rem(&denominator);
        let discarded = Discarded::classify(&remainder, &denominator, false);
        let quotient = if config
            .rounding_mode
            .rounds_away(f.is_negative(), quotient.is_odd(), discarded)
        {
            quotient.add_small(1)
        } else {
            quotient
        };
        (quotient, dp)
    };

    let mut symbols = radix_digits(&units, base);
    if symbols.len() <= places {
        let pad = places + 1 - symbols.len();
        symbols.splice(0..0, std::iter::repeat(b'0').take(pad));
    }
    let point = symbols.len() - places;
    let (int_part, frac_part) = symbols.split_at(point);
    let frac_len = frac_part.len() - frac_part.iter().rev().take_while(|&&c| c == b'0').count();

    let mut out = String::with_capacity(symbols.len() + 2);
    out.push_str(sign);
    out.extend(int_part.iter().map(|&c| c as char));
    if frac_len > 0 {
        out.push('.');
        out.extend(frac_part[..frac_len].iter().map(|&c| c as char));
    }
    Ok(out)
}

/// Symbols of a non-negative integer in `base`, most significant first.
fn radix_digits(value: &Magnitude, base: u32) -> Vec<u8> {
    if value.is_zero() {
        return vec![b'0'];
    }
    let mut out = Vec::new();
    let mut rest = value.clone();
    while !rest.is_zero() {
        let (q, r) = rest.div_rem_small(u64::from(base));
        out.push(ALPHABET[r as usize]);
        rest = q;
    }
    out.reverse();
    out
}
