// ============================================================================
// Decimal Engine Library
// Arbitrary-precision decimal arithmetic with configurable rounding
// ============================================================================

//! # Decimal Engine
//!
//! Arbitrary-precision signed decimal numbers with IEEE-style special values.
//!
//! ## Features
//!
//! - **Exact** addition, subtraction and multiplication
//! - **Correctly rounded** division, square root and base conversion
//!   under ten rounding modes
//! - **Modular exponentiation** and precision-limited powers
//! - **Bases 2-64** for parsing and rendering
//! - **Signed zero, NaN and ±Infinity** with overflow/underflow limits
//! - **Atomic configuration** shared safely between threads
//!
//! ## Example
//!
//! ```rust
//! use decimal_engine::prelude::*;
//!
//! let ctx = ContextBuilder::new().decimal_places(2).build().unwrap();
//!
//! let x = ctx.parse("123.456").unwrap();
//! let y = ctx.parse("3").unwrap();
//! assert_eq!(ctx.div(&x, &y).unwrap().to_string(), "41.15");
//!
//! let hex = ctx.parse_radix("ff", 16).unwrap();
//! assert_eq!(ctx.to_string_radix(&hex, 2).unwrap(), "11111111");
//!
//! ctx.update(|c| c.with_decimal_places(10)).unwrap();
//! let two = BigNumber::from(2);
//! assert_eq!(ctx.sqrt(&two).to_string(), "1.4142135624");
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        BigNumber, Config, ErrorPolicy, ExponentialAt, Format, Range,
    };
    pub use crate::engine::{create_from_config, Context, ContextBuilder};
    pub use crate::interfaces::{
        OsRandomSource, RandomSource, SeededRandomSource, ThreadRandomSource,
    };
    pub use crate::numeric::{NumericError, NumericResult, RoundingMode};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use proptest::prelude::*;

    fn ctx_with(config: Config) -> Context {
        Context::new(config).unwrap()
    }

    #[test]
    fn test_division_scenario() {
        let ctx = ctx_with(Config::default().with_decimal_places(2));
        let x = ctx.parse("123.456").unwrap();
        let y = ctx.parse("3").unwrap();
        assert_eq!(ctx.div(&x, &y).unwrap().to_string(), "41.15");
    }

    #[test]
    fn test_radix_scenario() {
        let ctx = Context::default();
        let n = ctx.parse_radix("ff", 16).unwrap();
        assert_eq!(n.to_string(), "255");
        assert_eq!(ctx.to_string_radix(&n, 16).unwrap(), "ff");
        assert_eq!(ctx.to_string_radix(&n, 36).unwrap(), "73");
    }

    #[test]
    fn test_sqrt_scenario() {
        let ctx = ctx_with(Config::default().with_decimal_places(10));
        assert_eq!(ctx.sqrt(&BigNumber::from(2)).to_string(), "1.4142135624");
    }

    #[test]
    fn test_modulo_scenario() {
        let ctx = Context::default();
        let x = BigNumber::from(-7);
        let y = BigNumber::from(3);
        assert_eq!(ctx.modulo(&x, &y).unwrap().to_string(), "-1");
        ctx.update(|c| c.with_modulo_mode(RoundingMode::Euclid)).unwrap();
        assert_eq!(ctx.modulo(&x, &y).unwrap().to_string(), "2");
    }

    #[test]
    fn test_power_scenarios() {
        let ctx = ctx_with(Config::default().with_decimal_places(4));
        let two = BigNumber::from(2);
        assert_eq!(ctx.pow(&two, 10).unwrap().to_string(), "1024");
        assert_eq!(ctx.pow(&two, -2).unwrap().to_string(), "0.25");
        assert_eq!(
            ctx.pow_mod(&BigNumber::from(3), 200, &BigNumber::from(50)).unwrap().to_string(),
            "1"
        );
    }

    #[test]
    fn test_error_policies() {
        let strict = Context::default();
        assert_eq!(strict.parse("12abc"), Err(NumericError::InvalidValue));
        let zero = BigNumber::zero(false);
        assert_eq!(strict.div(&zero, &zero), Err(NumericError::DivisionUndefined));

        let lenient = ctx_with(Config::permissive());
        assert!(lenient.parse("12abc").unwrap().is_nan());
        assert!(lenient.div(&zero, &zero).unwrap().is_nan());
    }

    #[test]
    fn test_formatting_round_trip() {
        let ctx = Context::default();
        let x = ctx.parse("-1234567.891").unwrap();
        assert_eq!(ctx.to_fixed(&x, Some(1), None).unwrap(), "-1234567.9");
        assert_eq!(ctx.to_exponential(&x, Some(2), None).unwrap(), "-1.23e+6");
        assert_eq!(ctx.to_precision(&x, Some(9), None).unwrap(), "-1234567.89");
        assert_eq!(ctx.to_format(&x, Some(2), None).unwrap(), "-1,234,567.89");
        assert_eq!(ctx.value_of(&x), "-1234567.891");
        let (n, d) = ctx.to_fraction(&x, None).unwrap();
        assert_eq!((n.to_string(), d.to_string()), ("-1234567891".into(), "1000".into()));
    }

    #[test]
    fn test_overflow_and_underflow() {
        let ctx = ctx_with(Config::default().with_range(Range::symmetric(10)));
        let big = ctx.parse("9e10").unwrap();
        assert!(ctx.mul(&big, &BigNumber::from(10)).is_infinite());
        let small = ctx.parse("-1e-10").unwrap();
        let product = ctx.mul(&small, &ctx.parse("0.1").unwrap());
        assert!(product.is_zero() && product.is_negative());
        assert_eq!(ctx.value_of(&product), "-0");
    }

    #[test]
    fn test_rust_decimal_interop() {
        let ctx = Context::default();
        let x = ctx.parse("19.99").unwrap();
        let d = x.to_rust_decimal().unwrap();
        assert_eq!(d.to_string(), "19.99");
        assert_eq!(BigNumber::from_rust_decimal(d), x);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_string() {
        let x: BigNumber = "-0".parse().unwrap();
        assert_eq!(serde_json::to_string(&x).unwrap(), "\"-0\"");
        let y: BigNumber = serde_json::from_str("\"1.5e-30\"").unwrap();
        assert_eq!(y.to_string(), "1.5e-30");
        let config = Config::ledger();
        let text = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    proptest! {
        #[test]
        fn prop_add_sub_inverse(a in -1_000_000_000i64..1_000_000_000, b in -1_000_000i64..1_000_000, scale in 0i64..30) {
            let ctx = Context::default();
            let x = ctx.shift(&BigNumber::from(a), -scale).unwrap();
            let y = BigNumber::from(b);
            let back = ctx.sub(&ctx.add(&x, &y), &y);
            prop_assert_eq!(back, x);
        }

        #[test]
        fn prop_div_mul_within_half_ulp(a in 1i64..1_000_000_000, b in 1i64..1_000_000) {
            // |q × b - a| <= b / 2 × 10^-dp for a correctly rounded quotient
            let ctx = ctx_with(Config::default().with_decimal_places(8));
            let (x, y) = (BigNumber::from(a), BigNumber::from(b));
            let q = ctx.div(&x, &y).unwrap();
            let err = ctx.sub(&ctx.mul(&q, &y), &x).abs();
            let bound = ctx.shift(&BigNumber::from(b * 5), -9).unwrap();
            prop_assert!(err <= bound);
        }

        #[test]
        fn prop_sqrt_squares_back(a in 1i64..1_000_000_000) {
            let ctx = ctx_with(Config::default().with_decimal_places(0).with_rounding_mode(RoundingMode::Down));
            let x = BigNumber::from(a);
            let r = ctx.sqrt(&x);
            let next = ctx.add(&r, &BigNumber::from(1));
            prop_assert!(ctx.mul(&r, &r) <= x);
            prop_assert!(ctx.mul(&next, &next) > x);
        }

        #[test]
        fn prop_sqrt_of_square_is_exact(s in 0i64..10_000_000, places in 0i64..6, code in 0u8..=8) {
            // s × 10^-places has at most dp places, so its square is recovered exactly
            let mode = RoundingMode::from_code(code).unwrap();
            let ctx = ctx_with(Config::default().with_decimal_places(8).with_rounding_mode(mode));
            let root = ctx.shift(&BigNumber::from(s), -places).unwrap();
            let a = ctx.mul(&root, &root);
            let r = ctx.sqrt(&a);
            let squared = ctx.round(&ctx.mul(&r, &r), Some(16), None).unwrap();
            prop_assert_eq!(squared, ctx.round(&a, Some(16), None).unwrap());
        }

        #[test]
        fn prop_sqrt_squares_within_tolerance(v in 1i64..1_000_000_000_000, scale in 0i64..12, code in 0u8..=8) {
            // |r - sqrt(a)| < 10^-dp, so |r^2 - a| < (2r + 1) × 10^-dp
            let mode = RoundingMode::from_code(code).unwrap();
            let ctx = ctx_with(Config::default().with_decimal_places(10).with_rounding_mode(mode));
            let a = ctx.shift(&BigNumber::from(v), -scale).unwrap();
            let r = ctx.sqrt(&a);
            let err = ctx.sub(&ctx.mul(&r, &r), &a).abs();
            let ulp = ctx.shift(&BigNumber::one(), -10).unwrap();
            let bound = ctx.mul(&ctx.add(&ctx.add(&r, &r), &BigNumber::one()), &ulp);
            prop_assert!(err < bound, "a = {}, r = {}", a, r);
        }

        #[test]
        fn prop_radix_fraction_round_trip(v in any::<i64>(), scale in 0i64..8, base in 2u32..=64) {
            // Rendering rounds to base^-dp and parsing back to 10^-dp
            let ctx = ctx_with(Config::default().with_decimal_places(10).with_pow_precision(0));
            let x = ctx.shift(&BigNumber::from(v), -scale).unwrap();
            let text = ctx.to_string_radix(&x, base).unwrap();
            let back = ctx.parse_radix(&text, base).unwrap();
            let units = ctx.pow(&BigNumber::from(u64::from(base)), 10).unwrap();
            let err = ctx.mul(&ctx.sub(&back, &x).abs(), &units);
            let ulp = ctx.shift(&BigNumber::one(), -10).unwrap();
            let bound = ctx.add(&BigNumber::one(), &ctx.mul(&units, &ulp));
            prop_assert!(err <= bound, "{} in base {} is {}", x, base, text);
        }

        #[test]
        fn prop_radix_round_trip(v in any::<i64>(), base in 2u32..=64) {
            let ctx = Context::default();
            let x = BigNumber::from(v);
            let text = ctx.to_string_radix(&x, base).unwrap();
            prop_assert_eq!(ctx.parse_radix(&text, base).unwrap(), x);
        }
    }
}
