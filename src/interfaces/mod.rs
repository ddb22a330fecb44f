// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod random_source;

pub use random_source::{OsRandomSource, RandomSource, SeededRandomSource, ThreadRandomSource};
