// ============================================================================
// Decimal Context
// Configuration-bearing entry point for every operation
// ============================================================================

use super::{additive, base, comparator, division, format, fraction, multiplicative, parse};
use super::{power, random, round, sqrt};
use crate::domain::{BigNumber, Config, MAX_LIMIT, MAX_SAFE_INTEGER};
use crate::interfaces::{OsRandomSource, RandomSource, ThreadRandomSource};
use crate::numeric::{Magnitude, NumericError, NumericResult, RoundingMode};
use parking_lot::RwLock;
use std::sync::Arc;

/// Performs decimal arithmetic under a configuration.
///
/// Each call reads one snapshot of the configuration, so a concurrent
/// [`Context::set_config`] is seen either entirely or not at all.
/// Independent contexts never share settings.
pub struct Context {
    /// Current settings, replaced as a whole
    config: RwLock<Arc<Config>>,

    /// Source for `random`; None selects OS or thread randomness by `crypto`
    random_source: Option<Arc<dyn RandomSource>>,
}

impl Context {
    /// Create a context.
    ///
    /// # Errors
    /// Under the strict policy, `InvalidConfiguration` for a setting out of
    /// range. The permissive policy replaces invalid settings with defaults.
    pub fn new(config: Config) -> NumericResult<Self> {
        Self::assemble(config, None)
    }

    pub(crate) fn assemble(
        config: Config,
        random_source: Option<Arc<dyn RandomSource>>,
    ) -> NumericResult<Self> {
        let config = checked(config, &Config::default(), random_source.as_deref())?;
        Ok(Self::from_checked(config, random_source))
    }

    fn from_checked(config: Config, random_source: Option<Arc<dyn RandomSource>>) -> Self {
        tracing::debug!(?config, "created decimal context");
        Self {
            config: RwLock::new(Arc::new(config)),
            random_source,
        }
    }

    /// An independent context starting from this one's settings.
    ///
    /// # Errors
    /// As [`Context::new`].
    pub fn another(&self, changes: impl FnOnce(Config) -> Config) -> NumericResult<Context> {
        let config = changes((*self.config()).clone());
        Self::assemble(config, self.random_source.clone())
    }

    /// Snapshot of the current settings
    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config.read())
    }

    /// Replace the settings atomically.
    ///
    /// # Errors
    /// Under the new policy, `InvalidConfiguration` for a setting out of range
    /// and `UnsupportedRandomness` when `crypto` is requested but the random
    /// source is not cryptographic. Nothing is applied on error. The
    /// permissive policy keeps the previous value of each invalid setting.
    pub fn set_config(&self, config: Config) -> NumericResult<()> {
        let current = self.config();
        let config = checked(config, &current, self.random_source.as_deref())?;
        tracing::debug!(?config, "decimal context reconfigured");
        *self.config.write() = Arc::new(config);
        Ok(())
    }

    /// Apply `changes` to the current settings and replace them.
    ///
    /// # Errors
    /// As [`Context::set_config`].
    pub fn update(&self, changes: impl FnOnce(Config) -> Config) -> NumericResult<()> {
        self.set_config(changes((*self.config()).clone()))
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Parse a decimal literal.
    pub fn parse(&self, text: &str) -> NumericResult<BigNumber> {
        parse::parse(text, &self.config())
    }

    /// Parse a literal in `base` (2-64), rounding to the configured places.
    pub fn parse_radix(&self, text: &str, base: u32) -> NumericResult<BigNumber> {
        parse::parse_radix(text, base, &self.config())
    }

    /// Build from a sign, decimal digits and exponent:
    /// `±0.d1d2… × 10^(exponent + 1)`.
    pub fn from_parts(
        &self,
        negative: bool,
        digits: &[u8],
        exponent: i64,
    ) -> NumericResult<BigNumber> {
        let config = self.config();
        policy_value(
            BigNumber::from_parts(negative, digits, exponent, &config.range),
            &config,
        )
    }

    /// Build from digit values in `base`: `±0.d1d2… × base^(exponent + 1)`.
    pub fn from_radix_parts(
        &self,
        negative: bool,
        digits: &[u32],
        exponent: i64,
        base: u32,
    ) -> NumericResult<BigNumber> {
        let config = self.config();
        policy_value(
            base::from_radix_parts(negative, digits, exponent, base, &config),
            &config,
        )
    }

    /// Convert a machine integer.
    pub fn from_i64(&self, value: i64) -> BigNumber {
        BigNumber::from_scaled(
            value < 0,
            Magnitude::from_u64(value.unsigned_abs()),
            0,
            &self.config().range,
        )
    }

    /// Convert a double from its shortest round-trip decimal text.
    ///
    /// # Errors
    /// `InvalidValue` under the strict policy when that text has more than
    /// 15 significant digits.
    pub fn from_f64(&self, value: f64) -> NumericResult<BigNumber> {
        if value.is_nan() {
            return Ok(BigNumber::NaN);
        }
        if value.is_infinite() {
            return Ok(BigNumber::infinity(value < 0.0));
        }
        let config = self.config();
        let text = format!("{:e}", value);
        let mantissa = text.split('e').next().unwrap_or_default();
        let significant = mantissa.bytes().filter(u8::is_ascii_digit).count();
        if significant > 15 {
            if config.error_policy.is_strict() {
                return Err(NumericError::InvalidValue);
            }
            tracing::warn!(value, "more than 15 significant digits");
        }
        parse::parse(&text, &config)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// x + y
    pub fn add(&self, x: &BigNumber, y: &BigNumber) -> BigNumber {
        additive::add(x, y, &self.config())
    }

    /// x - y
    pub fn sub(&self, x: &BigNumber, y: &BigNumber) -> BigNumber {
        additive::sub(x, y, &self.config())
    }

    /// x × y
    pub fn mul(&self, x: &BigNumber, y: &BigNumber) -> BigNumber {
        multiplicative::mul(x, y, &self.config())
    }

    /// x ÷ y to the configured decimal places
    pub fn div(&self, x: &BigNumber, y: &BigNumber) -> NumericResult<BigNumber> {
        division::div(x, y, &self.config())
    }

    /// Integer part of x ÷ y
    pub fn div_to_int(&self, x: &BigNumber, y: &BigNumber) -> NumericResult<BigNumber> {
        division::div_to_int(x, y, &self.config())
    }

    /// x mod y under the configured modulo mode
    pub fn modulo(&self, x: &BigNumber, y: &BigNumber) -> NumericResult<BigNumber> {
        division::modulo(x, y, &self.config())
    }

    /// x^n
    pub fn pow(&self, x: &BigNumber, n: i64) -> NumericResult<BigNumber> {
        power::pow(x, n, None, &self.config())
    }

    /// x^n mod m
    pub fn pow_mod(&self, x: &BigNumber, n: i64, m: &BigNumber) -> NumericResult<BigNumber> {
        power::pow(x, n, Some(m), &self.config())
    }

    /// x^n for a floating-point exponent
    pub fn pow_f64(&self, x: &BigNumber, n: f64) -> NumericResult<BigNumber> {
        power::pow_f64(x, n, None, &self.config())
    }

    /// Square root to the configured decimal places
    pub fn sqrt(&self, x: &BigNumber) -> BigNumber {
        sqrt::sqrt(x, &self.config())
    }

    /// x × 10^n
    ///
    /// # Errors
    /// `InvalidOperand("shift")` if `|n|` exceeds 2^53 - 1 under the strict policy.
    pub fn shift(&self, x: &BigNumber, n: i64) -> NumericResult<BigNumber> {
        let config = self.config();
        let n = if n.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
            invalid_operand(&config, "shift")?;
            n.clamp(-MAX_SAFE_INTEGER, MAX_SAFE_INTEGER)
        } else {
            n
        };
        Ok(round::shift(x, n, &config.range))
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Round to `dp` decimal places (0 when None) with `mode` (configured
    /// mode when None).
    ///
    /// # Errors
    /// Under the strict policy, `InvalidOperand` for `dp` above 10^9 or the
    /// `Euclid` mode.
    pub fn round(
        &self,
        x: &BigNumber,
        dp: Option<u32>,
        mode: Option<RoundingMode>,
    ) -> NumericResult<BigNumber> {
        let config = self.config();
        let dp = places_arg(&config, dp, "decimal places")?.unwrap_or(0);
        let mode = mode_arg(&config, mode)?;
        Ok(round::round_dp(x, dp, mode, &config.range))
    }

    /// Round to `sd` significant digits; unchanged when None.
    ///
    /// # Errors
    /// Under the strict policy, `InvalidOperand` for `sd` outside 1..=10^9 or
    /// the `Euclid` mode.
    pub fn to_digits(
        &self,
        x: &BigNumber,
        sd: Option<u32>,
        mode: Option<RoundingMode>,
    ) -> NumericResult<BigNumber> {
        let config = self.config();
        let sd = digits_arg(&config, sd, "significant digits")?;
        let mode = mode_arg(&config, mode)?;
        Ok(match sd {
            Some(sd) => round::round_sd(x, sd, mode, &config.range),
            None => x.clone(),
        })
    }

    /// Largest integer not above x
    pub fn floor(&self, x: &BigNumber) -> BigNumber {
        round::floor(x, &self.config().range)
    }

    /// Smallest integer not below x
    pub fn ceil(&self, x: &BigNumber) -> BigNumber {
        round::ceil(x, &self.config().range)
    }

    /// Integer part of x
    pub fn trunc(&self, x: &BigNumber) -> BigNumber {
        round::trunc(x, &self.config().range)
    }

    // ========================================================================
    // Selection and randomness
    // ========================================================================

    /// Largest value; NaN if any is NaN
    pub fn max(&self, values: &[BigNumber]) -> BigNumber {
        comparator::max_of(values)
    }

    /// Smallest value; NaN if any is NaN
    pub fn min(&self, values: &[BigNumber]) -> BigNumber {
        comparator::min_of(values)
    }

    /// Uniform random value in `[0, 1)` with up to `dp` places (configured
    /// places when None).
    ///
    /// # Errors
    /// `InvalidOperand("decimal places")` for `dp` above 10^9 under the
    /// strict policy.
    pub fn random(&self, dp: Option<u32>) -> NumericResult<BigNumber> {
        let config = self.config();
        let dp = places_arg(&config, dp, "decimal places")?.unwrap_or(config.decimal_places);
        let source: Arc<dyn RandomSource> = match &self.random_source {
            Some(source) => Arc::clone(source),
            None if config.crypto => Arc::new(OsRandomSource),
            None => Arc::new(ThreadRandomSource),
        };
        Ok(random::random(dp, source.as_ref(), &config))
    }

    // ========================================================================
    // Conversion to text and other types
    // ========================================================================

    /// Normal or exponential notation per the configured thresholds
    pub fn to_string(&self, x: &BigNumber) -> String {
        format::to_string(x, &self.config().exponential_at)
    }

    /// Text in `base` (2-64), fractions rounded to the configured places.
    ///
    /// # Errors
    /// `InvalidOperand("base")` under the strict policy; the permissive
    /// policy falls back to base 10 notation.
    pub fn to_string_radix(&self, x: &BigNumber, base: u32) -> NumericResult<String> {
        let config = self.config();
        if !base::is_valid_base(base) {
            invalid_operand(&config, "base")?;
            return Ok(format::to_string(x, &config.exponential_at));
        }
        base::to_radix_string(x, base, &config)
    }

    /// Like `to_string`, but `-0` renders as `"-0"`.
    pub fn value_of(&self, x: &BigNumber) -> String {
        format::value_of(x, &self.config().exponential_at)
    }

    /// Normal notation with `dp` places
    pub fn to_fixed(
        &self,
        x: &BigNumber,
        dp: Option<u32>,
        mode: Option<RoundingMode>,
    ) -> NumericResult<String> {
        let config = self.config();
        let dp = places_arg(&config, dp, "decimal places")?;
        let mode = mode_arg(&config, mode)?;
        Ok(format::to_fixed(x, dp, mode, &config.range))
    }

    /// Exponential notation with `dp` places after the point
    pub fn to_exponential(
        &self,
        x: &BigNumber,
        dp: Option<u32>,
        mode: Option<RoundingMode>,
    ) -> NumericResult<String> {
        let config = self.config();
        let dp = places_arg(&config, dp, "decimal places")?;
        let mode = mode_arg(&config, mode)?;
        Ok(format::to_exponential(x, dp, mode, &config.range))
    }

    /// `sd` significant digits
    pub fn to_precision(
        &self,
        x: &BigNumber,
        sd: Option<u32>,
        mode: Option<RoundingMode>,
    ) -> NumericResult<String> {
        let config = self.config();
        let sd = digits_arg(&config, sd, "significant digits")?;
        let mode = mode_arg(&config, mode)?;
        Ok(format::to_precision(
            x,
            sd,
            mode,
            &config.exponential_at,
            &config.range,
        ))
    }

    /// Grouped normal notation using the configured format
    pub fn to_format(
        &self,
        x: &BigNumber,
        dp: Option<u32>,
        mode: Option<RoundingMode>,
    ) -> NumericResult<String> {
        let config = self.config();
        let dp = places_arg(&config, dp, "decimal places")?;
        let mode = mode_arg(&config, mode)?;
        Ok(format::to_format(x, dp, mode, &config.format, &config.range))
    }

    /// Numerator and denominator, optionally with a denominator limit
    pub fn to_fraction(
        &self,
        x: &BigNumber,
        max_denominator: Option<&BigNumber>,
    ) -> NumericResult<(BigNumber, BigNumber)> {
        fraction::to_fraction(x, max_denominator, &self.config())
    }

    /// Nearest double
    pub fn to_number(&self, x: &BigNumber) -> f64 {
        x.to_f64()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::from_checked(Config::default(), None)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config())
            .field("custom_random_source", &self.random_source.is_some())
            .finish()
    }
}

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate `config` under its own policy, falling back to `previous` for
/// invalid settings when permissive.
fn checked(
    config: Config,
    previous: &Config,
    source: Option<&dyn RandomSource>,
) -> NumericResult<Config> {
    let strict = config.error_policy.is_strict();
    let mut config = match config.validate() {
        Ok(()) => config,
        Err(e) if strict => return Err(e),
        Err(e) => {
            tracing::warn!(%e, "ignoring invalid settings");
            config.sanitize(previous)
        }
    };
    if config.crypto && source.is_some_and(|s| !s.is_cryptographic()) {
        if strict {
            return Err(NumericError::UnsupportedRandomness);
        }
        tracing::warn!("random source is not cryptographic, crypto disabled");
        config.crypto = false;
    }
    Ok(config)
}

/// Permissive construction failures become NaN.
fn policy_value(value: NumericResult<BigNumber>, config: &Config) -> NumericResult<BigNumber> {
    match value {
        Err(NumericError::InvalidValue) if !config.error_policy.is_strict() => {
            tracing::warn!("invalid value, returning NaN");
            Ok(BigNumber::NaN)
        }
        other => other,
    }
}

/// Err under the strict policy; logs and returns Ok when permissive.
fn invalid_operand(config: &Config, what: &'static str) -> NumericResult<()> {
    if config.error_policy.is_strict() {
        return Err(NumericError::InvalidOperand(what));
    }
    tracing::warn!(operand = what, "invalid argument, using default");
    Ok(())
}

fn places_arg(config: &Config, dp: Option<u32>, what: &'static str) -> NumericResult<Option<u32>> {
    match dp {
        Some(v) if v > MAX_LIMIT => invalid_operand(config, what).map(|()| None),
        other => Ok(other),
    }
}

fn digits_arg(config: &Config, sd: Option<u32>, what: &'static str) -> NumericResult<Option<u32>> {
    match sd {
        Some(v) if v == 0 || v > MAX_LIMIT => invalid_operand(config, what).map(|()| None),
        other => Ok(other),
    }
}

fn mode_arg(config: &Config, mode: Option<RoundingMode>) -> NumericResult<RoundingMode> {
    match mode {
        Some(m) if m.is_rounding_mode() => Ok(m),
        Some(_) => invalid_operand(config, "rounding mode").map(|()| config.rounding_mode),
        None => Ok(config.rounding_mode),
    }
}
