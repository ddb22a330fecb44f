// ============================================================================
// Engine Module
// Contains the arithmetic, rounding, conversion and formatting engines
// ============================================================================

mod additive;
mod comparator;
mod context;
mod division;
mod fraction;
mod multiplicative;
mod power;
mod random;
mod round;
mod sqrt;

pub mod base;
pub mod factory;
pub mod format;
pub mod parse;

pub use comparator::compare;
pub use context::Context;
pub use factory::{create_from_config, ContextBuilder};
