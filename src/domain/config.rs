// ============================================================================
// Engine Configuration
// Precision, rounding, notation, range and error-policy settings
// ============================================================================

use crate::numeric::{NumericError, NumericResult, RoundingMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound for decimal places, precision and exponent limits
pub const MAX_LIMIT: u32 = 1_000_000_000;

/// Largest integer exactly representable in a double (2^53 - 1)
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

const MAX_EXPONENT: i64 = MAX_LIMIT as i64;

// ============================================================================
// Error Policy
// ============================================================================

/// How invalid input is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorPolicy {
    /// Invalid values, operands and settings fail the call
    #[default]
    Strict,

    /// Invalid values become NaN, invalid arguments fall back to defaults
    /// and invalid settings are ignored
    Permissive,
}

impl ErrorPolicy {
    /// True for [`ErrorPolicy::Strict`]
    #[inline]
    pub const fn is_strict(self) -> bool {
        matches!(self, ErrorPolicy::Strict)
    }
}

// ============================================================================
// Exponent Thresholds
// ============================================================================

/// Exponents at which `to_string` switches to exponential notation.
///
/// Exponential notation is used when the exponent is `<= negative` or
/// `>= positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExponentialAt {
    /// -1e9 to 0 inclusive
    pub negative: i64,
    /// 0 to 1e9 inclusive
    pub positive: i64,
}

impl ExponentialAt {
    /// Explicit `[negative, positive]` pair
    pub const fn new(negative: i64, positive: i64) -> Self {
        Self { negative, positive }
    }

    /// Single magnitude applied to both sides
    pub const fn symmetric(magnitude: i64) -> Self {
        let m = magnitude.abs();
        Self {
            negative: -m,
            positive: m,
        }
    }

    fn is_valid(&self) -> bool {
        (-MAX_EXPONENT..=0).contains(&self.negative) && (0..=MAX_EXPONENT).contains(&self.positive)
    }
}

impl Default for ExponentialAt {
    fn default() -> Self {
        Self::new(-7, 20)
    }
}

// ============================================================================
// Exponent Range
// ============================================================================

/// Exponent limits beyond which values overflow to Infinity or underflow to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Range {
    /// -1e9 to -1 inclusive; smaller exponents become signed zero
    pub min: i64,
    /// 1 to 1e9 inclusive; larger exponents become Infinity
    pub max: i64,
}

impl Range {
    /// Explicit `[min, max]` pair, each clamped to ±`MAX_SAFE_INTEGER`
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min: clamp_safe(min),
            max: clamp_safe(max),
        }
    }

    /// Single magnitude applied to both sides
    pub const fn symmetric(magnitude: i64) -> Self {
        let m = clamp_safe(magnitude.saturating_abs());
        Self { min: -m, max: m }
    }

    /// A range that never overflows or underflows (internal computations)
    pub(crate) const fn unbounded() -> Self {
        Self {
            min: i64::MIN,
            max: i64::MAX,
        }
    }

    fn is_valid(&self) -> bool {
        (-MAX_EXPONENT..=-1).contains(&self.min) && (1..=MAX_EXPONENT).contains(&self.max)
    }
}

/// Clamp an exponent to ±`MAX_SAFE_INTEGER`.
pub(crate) const fn clamp_safe(exponent: i64) -> i64 {
    if exponent > MAX_SAFE_INTEGER {
        MAX_SAFE_INTEGER
    } else if exponent < -MAX_SAFE_INTEGER {
        -MAX_SAFE_INTEGER
    } else {
        exponent
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::symmetric(MAX_EXPONENT)
    }
}

// ============================================================================
// Output Format
// ============================================================================

/// Separators and grouping used by `to_format`. Not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Format {
    /// Decimal separator
    pub decimal_separator: String,
    /// Grouping separator of the integer part
    pub group_separator: String,
    /// Primary grouping size of the integer part
    pub group_size: usize,
    /// Secondary grouping size of the integer part (0 = none)
    pub secondary_group_size: usize,
    /// Grouping separator of the fraction part
    pub fraction_group_separator: String,
    /// Grouping size of the fraction part (0 = none)
    pub fraction_group_size: usize,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            group_size: 3,
            secondary_group_size: 0,
            fraction_group_separator: "\u{a0}".to_string(),
            fraction_group_size: 0,
        }
    }
}

// ============================================================================
// Complete Configuration
// ============================================================================

/// Settings read by every operation that needs a default.
///
/// A configuration is a plain value. Contexts hold an immutable snapshot
/// and replace it as a whole, so an operation never sees a half-applied
/// update.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Decimal places of division, square root, base conversion and
    /// negative-power results
    pub decimal_places: u32,

    /// Default rounding mode (codes 0-8)
    pub rounding_mode: RoundingMode,

    /// Exponential notation thresholds of `to_string`
    pub exponential_at: ExponentialAt,

    /// Overflow/underflow exponent limits
    pub range: Range,

    /// Whether invalid input fails or degrades
    pub error_policy: ErrorPolicy,

    /// Use a cryptographically secure random source
    pub crypto: bool,

    /// Rounding mode of the modulo quotient (codes 0-9)
    pub modulo_mode: RoundingMode,

    /// Significant digits kept by `pow` without a modulus (0 = unlimited)
    pub pow_precision: u32,

    /// Output format of `to_format`
    pub format: Format,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decimal_places: 20,
            rounding_mode: RoundingMode::HalfUp,
            exponential_at: ExponentialAt::default(),
            range: Range::default(),
            error_policy: ErrorPolicy::Strict,
            crypto: false,
            modulo_mode: RoundingMode::Down,
            pow_precision: 100,
            format: Format::default(),
        }
    }
}

impl Config {
    /// Builder method: Set decimal places
    pub fn with_decimal_places(mut self, dp: u32) -> Self {
        self.decimal_places = dp;
        self
    }

    /// Builder method: Set rounding mode
    pub fn with_rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.rounding_mode = mode;
        self
    }

    /// Builder method: Set exponential notation thresholds
    pub fn with_exponential_at(mut self, at: ExponentialAt) -> Self {
        self.exponential_at = at;
        self
    }

    /// Builder method: Set exponent range
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Builder method: Set error policy
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Builder method: Request cryptographic randomness
    pub fn with_crypto(mut self, crypto: bool) -> Self {
        self.crypto = crypto;
        self
    }

    /// Builder method: Set modulo mode
    pub fn with_modulo_mode(mut self, mode: RoundingMode) -> Self {
        self.modulo_mode = mode;
        self
    }

    /// Builder method: Set power precision
    pub fn with_pow_precision(mut self, precision: u32) -> Self {
        self.pow_precision = precision;
        self
    }

    /// Builder method: Set output format
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the first field out of range.
    pub fn validate(&self) -> NumericResult<()> {
        if self.decimal_places > MAX_LIMIT {
            return Err(NumericError::InvalidConfiguration("decimal places"));
        }
        if !self.rounding_mode.is_rounding_mode() {
            return Err(NumericError::InvalidConfiguration("rounding mode"));
        }
        if !self.exponential_at.is_valid() {
            return Err(NumericError::InvalidConfiguration("exponential at"));
        }
        if !self.range.is_valid() {
            return Err(NumericError::InvalidConfiguration("range"));
        }
        if self.pow_precision > MAX_LIMIT {
            return Err(NumericError::InvalidConfiguration("pow precision"));
        }
        Ok(())
    }

    /// Replace every invalid field with the value from `fallback`.
    pub fn sanitize(mut self, fallback: &Config) -> Config {
        if self.decimal_places > MAX_LIMIT {
            self.decimal_places = fallback.decimal_places;
        }
        if !self.rounding_mode.is_rounding_mode() {
            self.rounding_mode = fallback.rounding_mode;
        }
        if !self.exponential_at.is_valid() {
            self.exponential_at = fallback.exponential_at;
        }
        if !self.range.is_valid() {
            self.range = fallback.range;
        }
        if self.pow_precision > MAX_LIMIT {
            self.pow_precision = fallback.pow_precision;
        }
        self
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl Config {
    /// Notation thresholds and range of double-precision numbers
    /// - Exponential notation below 1e-7 and from 1e21
    /// - Underflow below 1e-324, overflow above 1e308
    pub fn javascript_number() -> Self {
        Self::default()
            .with_exponential_at(ExponentialAt::new(-7, 20))
            .with_range(Range::new(-324, 308))
    }

    /// Financial ledger settings
    /// - Two decimal places, banker's rounding
    /// - Floor-style modulo
    pub fn ledger() -> Self {
        Self::default()
            .with_decimal_places(2)
            .with_rounding_mode(RoundingMode::HalfEven)
            .with_modulo_mode(RoundingMode::Floor)
    }

    /// Defaults with the permissive error policy
    pub fn permissive() -> Self {
        Self::default().with_error_policy(ErrorPolicy::Permissive)
    }
}
