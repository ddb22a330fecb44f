// ============================================================================
// Formatting
// Normal, exponential, fixed, precision and grouped string renderings
// ============================================================================

use super::round::{round_dp, round_sd};
use crate::domain::{BigNumber, ExponentialAt, Format, Range};
use crate::numeric::RoundingMode;

/// Plain rendering, switching to exponential notation when the exponent is
/// at or beyond `at`. `-0` renders as `"0"`.
pub fn to_string(x: &BigNumber, at: &ExponentialAt) -> String {
    render(x, at, false)
}

/// Like [`to_string`], but `-0` renders as `"-0"`.
pub fn value_of(x: &BigNumber, at: &ExponentialAt) -> String {
    render(x, at, true)
}

fn render(x: &BigNumber, at: &ExponentialAt, signed_zero: bool) -> String {
    let f = match x {
        BigNumber::Finite(f) => f,
        _ => return non_finite(x).to_owned(),
    };
    let digits = f.digits().digits();
    let e = f.exponent();
    let body = if e <= at.negative || e >= at.positive {
        exponential(&digits, e)
    } else {
        fixed_point(&digits, e)
    };
    let sign = if f.is_negative() && (signed_zero || !f.is_zero()) {
        "-"
    } else {
        ""
    };
    format!("{}{}", sign, body)
}

fn non_finite(x: &BigNumber) -> &'static str {
    match x {
        BigNumber::Infinity { negative: true } => "-Infinity",
        BigNumber::Infinity { negative: false } => "Infinity",
        _ => "NaN",
    }
}

/// Sign prefix shared by the rounded renderings: taken from the value before
/// rounding, so `-0.001` to zero places prints `"-0"`.
fn sign_of(x: &BigNumber) -> &'static str {
    if x.is_negative() && !x.is_zero() {
        "-"
    } else {
        ""
    }
}

fn symbols(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

/// Unsigned fixed-point text of `0.d1d2… × 10^(exponent + 1)`.
pub(crate) fn fixed_point(digits: &[u8], exponent: i64) -> String {
    let s = symbols(digits);
    let len = s.len() as i64;
    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("0.{}{}", zeros, s)
    } else if exponent + 1 >= len {
        let zeros = "0".repeat((exponent + 1 - len) as usize);
        format!("{}{}", s, zeros)
    } else {
        let (int_part, frac_part) = s.split_at((exponent + 1) as usize);
        format!("{}.{}", int_part, frac_part)
    }
}

/// Unsigned exponential text: `d.ddde+N`.
pub(crate) fn exponential(digits: &[u8], exponent: i64) -> String {
    let s = symbols(digits);
    let (lead, rest) = s.split_at(1);
    let sign = if exponent < 0 { '-' } else { '+' };
    if rest.is_empty() {
        format!("{}e{}{}", lead, sign, exponent.unsigned_abs())
    } else {
        format!("{}.{}e{}{}", lead, rest, sign, exponent.unsigned_abs())
    }
}

fn padded_digits(x: &BigNumber, width: usize) -> Option<(Vec<u8>, i64)> {
    let f = x.as_finite()?;
    let mut digits = f.digits().digits();
    if digits.len() < width {
        digits.resize(width, 0);
    }
    Some((digits, f.exponent()))
}

/// Normal notation with exactly `dp` places, or every digit when `dp` is None.
pub fn to_fixed(x: &BigNumber, dp: Option<u32>, mode: RoundingMode, range: &Range) -> String {
    if !x.is_finite() {
        return non_finite(x).to_owned();
    }
    let rounded = match dp {
        Some(places) => round_dp(x, places, mode, range),
        None => x.clone(),
    };
    let Some(f) = rounded.as_finite() else {
        return non_finite(&rounded).to_owned();
    };
    let mut body = fixed_point(&f.digits().digits(), f.exponent());
    if let Some(places) = dp.filter(|&p| p > 0) {
        let current = body.find('.').map_or(0, |i| body.len() - i - 1);
        if current == 0 && !body.contains('.') {
            body.push('.');
        }
        body.push_str(&"0".repeat(places as usize - current));
    }
    format!("{}{}", sign_of(x), body)
}

/// Exponential notation with `dp` digits after the point, or every digit
/// when `dp` is None.
pub fn to_exponential(
    x: &BigNumber,
    dp: Option<u32>,
    mode: RoundingMode,
    range: &Range,
) -> String {
    if !x.is_finite() {
        return non_finite(x).to_owned();
    }
    let (rounded, width) = match dp {
        Some(places) => (round_sd(x, places + 1, mode, range), places as usize + 1),
        None => (x.clone(), 0),
    };
    match padded_digits(&rounded, width) {
        Some((digits, e)) => format!("{}{}", sign_of(x), exponential(&digits, e)),
        None => non_finite(&rounded).to_owned(),
    }
}

/// `sd` significant digits, in exponential notation if `sd` does not reach
/// the exponent or the exponent is at or below the negative threshold.
pub fn to_precision(
    x: &BigNumber,
    sd: Option<u32>,
    mode: RoundingMode,
    at: &ExponentialAt,
    range: &Range,
) -> String {
    let Some(sd) = sd else {
        return to_string(x, at);
    };
    if !x.is_finite() {
        return non_finite(x).to_owned();
    }
    let rounded = round_sd(x, sd, mode, range);
    let Some((digits, e)) = padded_digits(&rounded, sd as usize) else {
        return non_finite(&rounded).to_owned();
    };
    let body = if i64::from(sd) <= e || e <= at.negative {
        exponential(&digits, e)
    } else {
        fixed_point(&digits, e)
    };
    format!("{}{}", sign_of(x), body)
}

/// [`to_fixed`] with the integer part grouped and the separators of `format`.
pub fn to_format(
    x: &BigNumber,
    dp: Option<u32>,
    mode: RoundingMode,
    format: &Format,
    range: &Range,
) -> String {
    let fixed = to_fixed(x, dp, mode, range);
    if !x.is_finite() || fixed.ends_with("Infinity") {
        return fixed;
    }
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_digits, frac_digits) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let int_part = group_integer(int_digits, format);
    match frac_digits {
        Some(frac) => format!(
            "{}{}{}{}",
            sign,
            int_part,
            format.decimal_separator,
            group_fraction(frac, format)
        ),
        None => format!("{}{}", sign, int_part),
    }
}

fn group_integer(digits: &str, format: &Format) -> String {
    let (mut primary, mut secondary) = (format.group_size, format.secondary_group_size);
    let mut len = digits.len() as i64;
    if secondary > 0 {
        // The last group uses the primary size, the rest the secondary size
        std::mem::swap(&mut primary, &mut secondary);
        len -= secondary as i64;
    }
    if primary == 0 || len <= 0 {
        return digits.to_owned();
    }

    let len = len as usize;
    let mut i = match len % primary {
        0 => primary,
        r => r,
    };
    let mut out = String::with_capacity(digits.len() * 2);
    out.push_str(&digits[..i]);
    while i < len {
        out.push_str(&format.group_separator);
        out.push_str(&digits[i..i + primary]);
        i += primary;
    }
    if secondary > 0 {
        out.push_str(&format.group_separator);
        out.push_str(&digits[i..]);
    }
    out
}

fn group_fraction(digits: &str, format: &Format) -> String {
    let size = format.fraction_group_size;
    if size == 0 {
        return digits.to_owned();
    }
    let mut out = String::with_capacity(digits.len() * 2);
    for (n, chunk) in digits.as_bytes().chunks(size).enumerate() {
        if n > 0 {
            out.push_str(&format.fraction_group_separator);
        }
        out.extend(chunk.iter().map(|&c| char::from(c)));
    }
    out
}

impl BigNumber {
    /// Nearest double-precision value. Correctly rounded by the standard
    /// float parser from the full-precision exponential text.
    pub fn to_f64(&self) -> f64 {
        match self {
            BigNumber::NaN => f64::NAN,
            BigNumber::Infinity { negative: true } => f64::NEG_INFINITY,
            BigNumber::Infinity { negative: false } => f64::INFINITY,
            BigNumber::Finite(f) => {
                let digits = symbols(&f.digits().digits());
                let (lead, rest) = digits.split_at(1);
                let text = format!(
                    "{}{}.{}e{}",
                    if f.is_negative() { "-" } else { "" },
                    lead,
                    if rest.is_empty() { "0" } else { rest },
                    f.exponent()
                );
                text.parse().unwrap_or(f64::NAN)
            }
        }
    }
}
