// ============================================================================
// Context Factory
// Creates decimal contexts with proper configuration
// ============================================================================

use crate::domain::{Config, ErrorPolicy, ExponentialAt, Format, Range};
use crate::engine::Context;
use crate::interfaces::RandomSource;
use crate::numeric::{NumericResult, RoundingMode};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a context from configuration
///
/// # Arguments
/// * `config` - Decimal configuration
///
/// # Returns
/// * `NumericResult<Context>` - Configured context or error
///
/// # Example
/// ```
/// use decimal_engine::prelude::*;
///
/// let ctx = create_from_config(Config::ledger()).unwrap();
/// assert_eq!(ctx.config().decimal_places, 2);
/// ```
pub fn create_from_config(config: Config) -> NumericResult<Context> {
    Context::new(config)
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating contexts with fluent API
///
/// # Example
/// ```
/// use decimal_engine::prelude::*;
///
/// let ctx = ContextBuilder::new()
///     .decimal_places(4)
///     .rounding_mode(RoundingMode::HalfEven)
///     .euclidean_modulo()
///     .build()
///     .unwrap();
///
/// let x = ctx.parse("-7").unwrap();
/// let y = ctx.parse("3").unwrap();
/// assert_eq!(ctx.modulo(&x, &y).unwrap().to_string(), "2");
/// ```
pub struct ContextBuilder {
    config: Config,
    random_source: Option<Arc<dyn RandomSource>>,
}

impl ContextBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            random_source: None,
        }
    }

    // ========================================================================
    // Precision and Rounding
    // ========================================================================

    /// Set decimal places of inexact results
    pub fn decimal_places(mut self, dp: u32) -> Self {
        self.config.decimal_places = dp;
        self
    }

    /// Set the default rounding mode
    pub fn rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.config.rounding_mode = mode;
        self
    }

    /// Set significant digits of powers (0 = unlimited)
    pub fn pow_precision(mut self, precision: u32) -> Self {
        self.config.pow_precision = precision;
        self
    }

    // ========================================================================
    // Modulo Configuration
    // ========================================================================

    /// Set the modulo quotient rounding mode
    pub fn modulo_mode(mut self, mode: RoundingMode) -> Self {
        self.config.modulo_mode = mode;
        self
    }

    /// Remainders always non-negative
    pub fn euclidean_modulo(self) -> Self {
        self.modulo_mode(RoundingMode::Euclid)
    }

    /// Remainder takes the sign of the divisor
    pub fn floored_modulo(self) -> Self {
        self.modulo_mode(RoundingMode::Floor)
    }

    // ========================================================================
    // Notation and Range
    // ========================================================================

    /// Set exponential notation thresholds
    pub fn exponential_at(mut self, at: ExponentialAt) -> Self {
        self.config.exponential_at = at;
        self
    }

    /// Set overflow/underflow exponent limits
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Set the output format of `to_format`
    pub fn format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    // ========================================================================
    // Errors and Randomness
    // ========================================================================

    /// Fail on invalid input (default)
    pub fn strict_errors(mut self) -> Self {
        self.config.error_policy = ErrorPolicy::Strict;
        self
    }

    /// Degrade invalid input to NaN or defaults
    pub fn permissive_errors(mut self) -> Self {
        self.config.error_policy = ErrorPolicy::Permissive;
        self
    }

    /// Require cryptographically secure randomness
    pub fn crypto(mut self, crypto: bool) -> Self {
        self.config.crypto = crypto;
        self
    }

    /// Use a specific random source
    pub fn random_source(mut self, source: Arc<dyn RandomSource>) -> Self {
        self.random_source = Some(source);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Apply double-precision notation and range
    pub fn javascript_number() -> Self {
        Self::from_config(Config::javascript_number())
    }

    /// Apply ledger configuration
    pub fn ledger() -> Self {
        Self::from_config(Config::ledger())
    }

    /// Start from an existing configuration
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            random_source: None,
        }
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the context
    pub fn build(self) -> NumericResult<Context> {
        Context::assemble(self.config, self.random_source)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::SeededRandomSource;
    use crate::numeric::NumericError;

    #[test]
    fn test_create_from_config() {
        let ctx = create_from_config(Config::javascript_number()).unwrap();
        assert_eq!(ctx.config().range, Range::new(-324, 308));
        let x = ctx.parse("1e309").unwrap();
        assert!(x.is_infinite());
    }

    #[test]
    fn test_create_rejects_invalid() {
        let config = Config::default().with_range(Range::new(-5, 0));
        assert_eq!(
            create_from_config(config).unwrap_err(),
            NumericError::InvalidConfiguration("range")
        );
    }

    #[test]
    fn test_builder_pattern() {
        let ctx = ContextBuilder::new()
            .decimal_places(3)
            .rounding_mode(RoundingMode::Down)
            .exponential_at(ExponentialAt::new(-1, 3))
            .build()
            .unwrap();
        let x = ctx.parse("2").unwrap();
        let y = ctx.parse("3").unwrap();
        assert_eq!(ctx.to_string(&ctx.div(&x, &y).unwrap()), "6.66e-1");
    }

    #[test]
    fn test_builder_modulo_presets() {
        let floored = ContextBuilder::new().floored_modulo().build().unwrap();
        let x = floored.parse("7").unwrap();
        let y = floored.parse("-3").unwrap();
        assert_eq!(floored.modulo(&x, &y).unwrap().to_string(), "-2");
    }

    #[test]
    fn test_builder_random_source() {
        let build = || {
            ContextBuilder::new()
                .random_source(Arc::new(SeededRandomSource::new(11)))
                .build()
                .unwrap()
        };
        let (a, b) = (build(), build());
        let ra = a.random(Some(25)).unwrap();
        let rb = b.random(Some(25)).unwrap();
        assert!(ra.is_identical(&rb));

        let crypto = ContextBuilder::new()
            .crypto(true)
            .random_source(Arc::new(SeededRandomSource::new(11)))
            .build();
        assert_eq!(crypto.unwrap_err(), NumericError::UnsupportedRandomness);
    }

    #[test]
    fn test_preset_builders() {
        let ledger = ContextBuilder::ledger().build().unwrap();
        assert_eq!(ledger.config().decimal_places, 2);
        assert_eq!(ledger.config().rounding_mode, RoundingMode::HalfEven);

        let lenient = ContextBuilder::new().permissive_errors();
        assert!(!lenient.get_config().error_policy.is_strict());
        let ctx = lenient.strict_errors().build().unwrap();
        assert!(ctx.config().error_policy.is_strict());
    }
}
