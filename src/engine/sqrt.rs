// ============================================================================
// Square Root Engine
// ============================================================================

use crate::domain::{BigNumber, Config};
use crate::numeric::round_scaled;

/// Square root rounded to the configured decimal places and rounding mode.
///
/// NaN for NaN and for negative values other than `-0`; `±0` and
/// `+Infinity` are returned unchanged.
pub fn sqrt(x: &BigNumber, config: &Config) -> BigNumber {
    let f = match x {
        BigNumber::NaN => return BigNumber::NaN,
        BigNumber::Infinity { negative: true } => return BigNumber::NaN,
        BigNumber::Infinity { negative: false } => return x.clone(),
        BigNumber::Finite(f) if f.is_zero() => return x.clone(),
        BigNumber::Finite(f) if f.is_negative() => return BigNumber::NaN,
        BigNumber::Finite(f) => f,
    };

    // Root at scale -p, with p past the target place and large enough that
    // the radicand is an integer: N = C × 10^(q + 2p)
    let dp = i64::from(config.decimal_places);
    let q = f.scale();
    let p = (dp + 1).max((-q + 1).div_euclid(2));
    let shift = usize::try_from(q + 2 * p).unwrap_or(usize::MAX);
    let radicand = f.coefficient().mul_pow10(shift);
    let root = radicand.isqrt();
    let inexact = root.mul(&root) != radicand;

    let (kept, scale) = round_scaled(false, &root, -p, -dp, config.rounding_mode, inexact);
    BigNumber::from_scaled(false, kept, scale, &config.range)
}
