// ============================================================================
// Numeric Module
// Digit storage and rounding primitives for arbitrary-precision decimals
// ============================================================================
//
// This module provides:
// - Magnitude: unsigned integers in base-1e14 digit groups
// - DigitBuffer: normalized significant digits of a finite value
// - RoundingMode / round_scaled: the rounding engine
// - NumericError: Error types for decimal operations
//
// Design principles:
// - No floating-point operations in arithmetic
// - Digit-level code never sees NaN or Infinity
// - All fallible entry points return Result (no panics on user input)

mod digits;
mod errors;
mod magnitude;
mod rounding;

pub use digits::{DigitBuffer, Normalized};
pub use errors::{NumericError, NumericResult};
pub use magnitude::{Magnitude, BASE, LOG_BASE};
pub use rounding::{round_scaled, Discarded, RoundingMode};
