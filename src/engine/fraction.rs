// ============================================================================
// Fraction Conversion
// Best rational approximation by continued fractions
// ============================================================================

use super::round::round_to_scale;
use crate::domain::{BigNumber, Config, Range};
use crate::numeric::{Magnitude, NumericError, NumericResult, RoundingMode};
use std::cmp::Ordering;

/// Express `x` as `numerator / denominator` in lowest terms.
///
/// With `max_denominator`, returns the closest fraction whose denominator
/// does not exceed it (ties prefer the last convergent). The numerator
/// carries the sign of `x`. Non-finite values return `(x, 1)`.
///
/// # Errors
/// `InvalidOperand("max denominator")` under the strict policy if the limit
/// is not a whole number of at least 1 (Infinity included). The permissive
/// policy truncates a fractional limit and ignores one below 1 or non-finite.
pub fn to_fraction(
    x: &BigNumber,
    max_denominator: Option<&BigNumber>,
    config: &Config,
) -> NumericResult<(BigNumber, BigNumber)> {
    let limit = match max_denominator {
        None => None,
        Some(md) => match denominator_limit(md, config.error_policy.is_strict()) {
            Some(m) => Some(m),
            None if config.error_policy.is_strict() => {
                return Err(NumericError::InvalidOperand("max denominator"));
            }
            None => {
                tracing::warn!(?md, "ignoring invalid max denominator");
                None
            }
        },
    };

    let f = match x.as_finite() {
        Some(f) if f.scale() < 0 => f,
        _ => return Ok((x.clone(), BigNumber::one())),
    };

    let n = f.coefficient().clone();
    let d = Magnitude::pow10(f.scale().unsigned_abs() as usize);
    let limit = match limit {
        Some(m) if m < d => m,
        _ => d.clone(),
    };
    let (p, q) = best_rational(&n, &d, &limit);

    let unbounded = Range::unbounded();
    Ok((
        BigNumber::from_scaled(f.is_negative(), p, 0, &unbounded),
        BigNumber::from_scaled(false, q, 0, &unbounded),
    ))
}

/// Finite limit of at least 1; fractions are truncated unless `exact`.
fn denominator_limit(md: &BigNumber, exact: bool) -> Option<Magnitude> {
    let whole = if exact {
        md.clone()
    } else {
        round_to_scale(md, 0, RoundingMode::Down, &Range::unbounded())
    };
    let f = whole.as_finite()?;
    if f.is_negative() || f.is_zero() || f.scale() < 0 {
        return None;
    }
    Some(f.coefficient().mul_pow10(usize::try_from(f.scale()).ok()?))
}

/// Closest p/q to n/d with q <= limit, by convergents and a final
/// semiconvergent.
fn best_rational(n: &Magnitude, d: &Magnitude, limit: &Magnitude) -> (Magnitude, Magnitude) {
    let (mut p0, mut q0) = (Magnitude::zero(), Magnitude::one());
    let (mut p1, mut q1) = (Magnitude::one(), Magnitude::zero());
    let (mut num, mut den) = (n.clone(), d.clone());
    let mut terms = 0usize;

    while !den.is_zero() {
        let (a, r) = num.div_rem(&den);
        let q2 = q0.add(&a.mul(&q1));
        if &q2 > limit {
            break;
        }
        let p2 = p0.add(&a.mul(&p1));
        (p0, q0, p1, q1) = (p1, q1, p2, q2);
        (num, den) = (den, r);
        terms += 1;
    }
    tracing::trace!(terms, "continued fraction expansion");

    // Largest k keeping (q0 + k q1) within the limit
    let (k, _) = limit.sub(&q0).div_rem(&q1);
    let ps = p0.add(&k.mul(&p1));
    let qs = q0.add(&k.mul(&q1));

    // |p/q - n/d| compared exactly: |p d - n q| / q
    let error = |p: &Magnitude, q: &Magnitude| p.mul(d).abs_diff(&n.mul(q)).0;
    let convergent = error(&p1, &q1).mul(&qs);
    let semiconvergent = error(&ps, &qs).mul(&q1);
    match convergent.cmp(&semiconvergent) {
        Ordering::Greater => (ps, qs),
        _ => (p1, q1),
    }
}
