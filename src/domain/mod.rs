// ============================================================================
// Domain Models Module
// The decimal value type and the configuration it is computed under
// ============================================================================

pub mod config;
pub mod value;

pub use config::{
    Config, ErrorPolicy, ExponentialAt, Format, Range, MAX_LIMIT, MAX_SAFE_INTEGER,
};
pub use value::{BigNumber, Finite};
