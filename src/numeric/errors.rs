// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision decimal operations
// ============================================================================

use thiserror::Error;

/// Errors raised by decimal operations under the strict error policy.
///
/// Under the permissive policy the same conditions degrade to `NaN`,
/// signed `Infinity` or a documented default instead of being returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Malformed literal, bad digit or out-of-range base
    #[error("invalid value: not a number in the requested base")]
    InvalidValue,

    /// A configuration field is outside its permitted range
    #[error("invalid configuration: {0} out of range")]
    InvalidConfiguration(&'static str),

    /// An operation argument is outside its permitted range
    #[error("invalid operand: {0} out of range")]
    InvalidOperand(&'static str),

    /// Zero divided by zero, or a modulus of zero
    #[error("division undefined: zero divisor")]
    DivisionUndefined,

    /// Cryptographic randomness was requested but the source is not cryptographic
    #[error("cryptographically secure randomness unavailable")]
    UnsupportedRandomness,
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
