// ============================================================================
// Literal Parsing
// Decimal, prefixed and radix literals
// ============================================================================

use super::base::{digit_value, from_radix_parts, is_valid_base};
use super::round::round_dp;
use crate::domain::{BigNumber, Config};
use crate::numeric::{NumericError, NumericResult};

/// Parse a decimal literal.
///
/// Accepts surrounding whitespace, an optional sign, `Infinity` and `NaN`,
/// `.5` and `5.` forms, `e` notation, and `0x`/`0o`/`0b` prefixed integers
/// or fractions.
///
/// # Errors
/// `InvalidValue` for a malformed literal under the strict policy; the
/// permissive policy returns NaN instead.
pub fn parse(text: &str, config: &Config) -> NumericResult<BigNumber> {
    permissive_nan(parse_literal(text.trim(), config), text, config)
}

/// Parse a literal written in `base` (2-64).
///
/// Base 10 accepts everything [`parse`] does; other bases accept digits with
/// an optional fraction. The result is rounded to the configured decimal
/// places.
///
/// # Errors
/// `InvalidValue` for an unsupported base or malformed literal under the
/// strict policy.
pub fn parse_radix(text: &str, base: u32, config: &Config) -> NumericResult<BigNumber> {
    let trimmed = text.trim();
    let parsed = if !is_valid_base(base) {
        Err(NumericError::InvalidValue)
    } else if base == 10 {
        parse_literal(trimmed, config).map(|x| {
            round_dp(&x, config.decimal_places, config.rounding_mode, &config.range)
        })
    } else {
        let (negative, body) = split_sign(trimmed);
        match special(body, negative) {
            Some(value) => Ok(value),
            None => parse_radix_digits(negative, body, base, true, config),
        }
    };
    permissive_nan(parsed, text, config)
}

fn permissive_nan(
    parsed: NumericResult<BigNumber>,
    text: &str,
    config: &Config,
) -> NumericResult<BigNumber> {
    match parsed {
        Err(NumericError::InvalidValue) if !config.error_policy.is_strict() => {
            tracing::warn!(literal = text, "invalid literal, returning NaN");
            Ok(BigNumber::NaN)
        }
        other => other,
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

fn special(body: &str, negative: bool) -> Option<BigNumber> {
    match body {
        "Infinity" => Some(BigNumber::infinity(negative)),
        "NaN" => Some(BigNumber::NaN),
        _ => None,
    }
}

fn parse_literal(text: &str, config: &Config) -> NumericResult<BigNumber> {
    let (negative, body) = split_sign(text);
    if let Some(value) = special(body, negative) {
        return Ok(value);
    }

    let prefixed = body.get(..2).and_then(|p| match p {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    });
    if let Some(base) = prefixed {
        return parse_radix_digits(negative, &body[2..], base, false, config);
    }

    parse_decimal(negative, body, config)
}

/// `digits[.digits][e[±]digits]` with at least one mantissa digit.
fn parse_decimal(negative: bool, body: &str, config: &Config) -> NumericResult<BigNumber> {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(NumericError::InvalidValue);
    }

    let exponent = match exponent {
        Some(e) => parse_exponent(e)?,
        None => 0,
    };

    let digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();
    let leading = (int_part.len() as i64 - 1).saturating_add(exponent);
    BigNumber::from_parts(negative, &digits, leading, &config.range)
}

/// Exponent digits with optional sign. Values too large for i64 saturate;
/// the exponent range turns them into Infinity or zero.
fn parse_exponent(text: &str) -> NumericResult<i64> {
    let (negative, digits) = split_sign(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NumericError::InvalidValue);
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Ok(if negative { -magnitude } else { magnitude })
}

/// `digits[.digits]` in `base`. Without `strict_form`, `.5` and `5.` are
/// also accepted.
fn parse_radix_digits(
    negative: bool,
    body: &str,
    base: u32,
    strict_form: bool,
    config: &Config,
) -> NumericResult<BigNumber> {
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => {
            if strict_form && (i.is_empty() || f.is_empty()) {
                return Err(NumericError::InvalidValue);
            }
            (i, f)
        }
        None => (body, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(NumericError::InvalidValue);
    }

    let digits = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| digit_value(b, base).ok_or(NumericError::InvalidValue))
        .collect::<NumericResult<Vec<u32>>>()?;
    from_radix_parts(negative, &digits, int_part.len() as i64 - 1, base, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorPolicy, Range};
    use proptest::prelude::*;

    fn parsed(text: &str) -> String {
        parse(text, &Config::default()).unwrap().to_string()
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(parsed("123.456"), "123.456");
        assert_eq!(parsed("  -0.00120  "), "-0.0012");
        assert_eq!(parsed("+5"), "5");
        assert_eq!(parsed(".5"), "0.5");
        assert_eq!(parsed("5."), "5");
        assert_eq!(parsed("1.5e3"), "1500");
        assert_eq!(parsed("1.5E-3"), "0.0015");
        assert_eq!(parsed("000123"), "123");
        assert_eq!(parsed("12e+2"), "1200");
    }

    #[test]
    fn test_special_literals() {
        assert!(parse("NaN", &Config::default()).unwrap().is_nan());
        assert!(parse("-NaN", &Config::default()).unwrap().is_nan());
        assert_eq!(
            parse("-Infinity", &Config::default()).unwrap(),
            BigNumber::infinity(true)
        );
        let nz = parse("-0", &Config::default()).unwrap();
        assert!(nz.is_zero() && nz.is_negative());
    }

    #[test]
    fn test_prefixed_literals() {
        assert_eq!(parsed("0xff"), "255");
        assert_eq!(parsed("-0b101"), "-5");
        assert_eq!(parsed("0o17"), "15");
        assert_eq!(parsed("0x.8"), "0.5");
    }

    #[test]
    fn test_malformed_literals() {
        let cfg = Config::default();
        for bad in ["", "-", "abc", "1.2.3", "1e", "e5", "--1", "1 2", ".", "0xg", "+-1", "infinity"] {
            assert_eq!(parse(bad, &cfg), Err(NumericError::InvalidValue), "{:?}", bad);
        }
    }

    #[test]
    fn test_permissive_policy_yields_nan() {
        let cfg = Config::default().with_error_policy(ErrorPolicy::Permissive);
        assert!(parse("abc", &cfg).unwrap().is_nan());
        assert!(parse_radix("zz", 2, &cfg).unwrap().is_nan());
        assert!(parse_radix("1", 99, &cfg).unwrap().is_nan());
    }

    #[test]
    fn test_exponent_range() {
        let cfg = Config::default().with_range(Range::symmetric(100));
        assert_eq!(parse("1e101", &cfg).unwrap(), BigNumber::infinity(false));
        assert!(parse("-1e-101", &cfg).unwrap().is_zero());
        assert_eq!(
            parse("1e99999999999999999999999", &cfg).unwrap(),
            BigNumber::infinity(false)
        );
    }

    #[test]
    fn test_radix_literals() {
        let cfg = Config::default();
        assert_eq!(parse_radix("ff", 16, &cfg).unwrap().to_string(), "255");
        assert_eq!(parse_radix("FF", 16, &cfg).unwrap().to_string(), "255");
        assert_eq!(parse_radix("-101.1", 2, &cfg).unwrap().to_string(), "-5.5");
        assert_eq!(parse_radix("z", 36, &cfg).unwrap().to_string(), "35");
        assert_eq!(parse_radix("Z", 62, &cfg).unwrap().to_string(), "61");
        assert!(parse_radix("Infinity", 2, &cfg).unwrap().is_infinite());
        assert_eq!(parse_radix("ff", 10, &cfg), Err(NumericError::InvalidValue));
        assert_eq!(parse_radix("1", 1, &cfg), Err(NumericError::InvalidValue));
        assert_eq!(parse_radix(".1", 2, &cfg), Err(NumericError::InvalidValue));
    }

    #[test]
    fn test_radix_ten_rounds_to_decimal_places() {
        let cfg = Config::default().with_decimal_places(2);
        assert_eq!(parse_radix("1.005", 10, &cfg).unwrap().to_string(), "1.01");
        assert_eq!(parse("1.005", &cfg).unwrap().to_string(), "1.005");
        assert_eq!(parse_radix("0.1", 3, &cfg).unwrap().to_string(), "0.33");
    }

    proptest! {
        #[test]
        fn prop_integer_text_roundtrip(v in any::<i64>()) {
            let text = v.to_string();
            prop_assert_eq!(parsed(&text), text);
        }

        #[test]
        fn prop_rejects_non_numeric(s in "[a-df-z]{1,8}") {
            prop_assume!(s != "NaN");
            prop_assert_eq!(parse(&s, &Config::default()), Err(NumericError::InvalidValue));
        }
    }
}
