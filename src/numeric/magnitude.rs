// ============================================================================
// Magnitude
// Unsigned arbitrary-size integers stored in base 1e14 digit groups
// ============================================================================

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// Decimal digits per limb
pub const LOG_BASE: usize = 14;

/// Limb radix (10^LOG_BASE)
pub const BASE: u64 = 100_000_000_000_000;

const BASE_WIDE: u128 = BASE as u128;

/// Powers of ten that fit in a single limb (10^0 ..= 10^14)
pub(crate) const POWS_TEN: [u64; LOG_BASE + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
];

type Limbs = SmallVec<[u64; 4]>;

/// Non-negative integer of arbitrary size.
///
/// Limbs are little-endian (least significant group first), each holding
/// 14 decimal digits. There is never a most-significant zero limb, so zero
/// is the empty limb vector.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Magnitude {
    limbs: Limbs,
}

/// Number of decimal digits in a single non-zero limb value.
#[inline]
fn limb_digits(limb: u64) -> usize {
    POWS_TEN.iter().take_while(|&&p| p <= limb).count()
}

impl Magnitude {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Zero
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// One
    #[inline]
    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Create from a machine integer of any size.
    pub fn from_u64(mut value: u64) -> Self {
        let mut limbs = Limbs::new();
        while value > 0 {
            limbs.push(value % BASE);
            value /= BASE;
        }
        Self { limbs }
    }

    /// Create from a 128-bit machine integer.
    pub fn from_u128(mut value: u128) -> Self {
        let mut limbs = Limbs::new();
        while value > 0 {
            limbs.push((value % BASE_WIDE) as u64);
            value /= BASE_WIDE;
        }
        Self { limbs }
    }

    /// Create from decimal digit values, most significant first.
    ///
    /// Every element must already be in `0..=9`.
    pub fn from_digits(digits: &[u8]) -> Self {
        let mut limbs = Limbs::with_capacity(digits.len() / LOG_BASE + 1);
        for chunk in digits.rchunks(LOG_BASE) {
            let limb = chunk
                .iter()
                .fold(0u64, |acc, &d| acc * 10 + u64::from(d));
            limbs.push(limb);
        }
        let mut m = Self { limbs };
        m.trim();
        m
    }

    /// 10^n
    pub fn pow10(n: usize) -> Self {
        let mut limbs: Limbs = SmallVec::from_elem(0, n / LOG_BASE);
        limbs.push(POWS_TEN[n % LOG_BASE]);
        Self { limbs }
    }

    fn from_limbs(limbs: &[u64]) -> Self {
        let mut m = Self {
            limbs: Limbs::from_slice(limbs),
        };
        m.trim();
        m
    }

    #[inline]
    fn trim(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Check if value is one.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 1
    }

    /// Check if the least significant digit is odd.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.limbs.first().is_some_and(|l| l & 1 == 1)
    }

    /// Number of limbs in use
    #[inline]
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    /// Number of decimal digits. Zero has one digit.
    pub fn digit_count(&self) -> usize {
        match self.limbs.last() {
            None => 1,
            Some(&top) => (self.limbs.len() - 1) * LOG_BASE + limb_digits(top),
        }
    }

    /// Number of trailing decimal zeros. Zero reports none.
    pub fn trailing_zeros(&self) -> usize {
        let mut count = 0;
        for &limb in &self.limbs {
            if limb == 0 {
                count += LOG_BASE;
                continue;
            }
            let mut l = limb;
            while l % 10 == 0 {
                l /= 10;
                count += 1;
            }
            return count;
        }
        0
    }

    /// Decimal digits, most significant first. Zero yields `[0]`.
    pub fn to_digits(&self) -> Vec<u8> {
        let Some((&top, rest)) = self.limbs.split_last() else {
            return vec![0];
        };
        let mut out = Vec::with_capacity(self.digit_count());
        push_limb_digits(&mut out, top, limb_digits(top));
        for &limb in rest.iter().rev() {
            push_limb_digits(&mut out, limb, LOG_BASE);
        }
        out
    }

    /// Convert to u64 if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        match self.limbs.len() {
            0 => Some(0),
            1 => Some(self.limbs[0]),
            2 => {
                let wide = u128::from(self.limbs[1]) * BASE_WIDE + u128::from(self.limbs[0]);
                u64::try_from(wide).ok()
            }
            _ => None,
        }
    }

    /// Convert to u128 if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        self.limbs.iter().rev().try_fold(0u128, |acc, &limb| {
            acc.checked_mul(BASE_WIDE)?.checked_add(u128::from(limb))
        })
    }

    // ========================================================================
    // Additive Operations
    // ========================================================================

    /// self + other
    pub fn add(&self, other: &Self) -> Self {
        let (long, short) = if self.limbs.len() >= other.limbs.len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut limbs = Limbs::with_capacity(long.limbs.len() + 1);
        let mut carry = 0u64;
        for (i, &a) in long.limbs.iter().enumerate() {
            let sum = a + short.limbs.get(i).copied().unwrap_or(0) + carry;
            if sum >= BASE {
                limbs.push(sum - BASE);
                carry = 1;
            } else {
                limbs.push(sum);
                carry = 0;
            }
        }
        if carry > 0 {
            limbs.push(carry);
        }
        Self { limbs }
    }

    /// self + value
    pub fn add_small(&self, value: u64) -> Self {
        self.add(&Self::from_u64(value))
    }

    /// self - other, requiring `self >= other`.
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert!(*self >= *other, "magnitude subtraction underflow");

        let mut limbs = Limbs::with_capacity(self.limbs.len());
        let mut borrow = 0u64;
        for (i, &a) in self.limbs.iter().enumerate() {
            let b = other.limbs.get(i).copied().unwrap_or(0) + borrow;
            if a >= b {
                limbs.push(a - b);
                borrow = 0;
            } else {
                limbs.push(a + BASE - b);
                borrow = 1;
            }
        }
        let mut m = Self { limbs };
        m.trim();
        m
    }

    /// |self - other| together with whether `self < other`.
    pub fn abs_diff(&self, other: &Self) -> (Self, bool) {
        if *self >= *other {
            (self.sub(other), false)
        } else {
            (other.sub(self), true)
        }
    }

    // ========================================================================
    // Multiplicative Operations
    // ========================================================================

    /// Schoolbook product.
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        if other.limbs.len() == 1 {
            return self.mul_small(other.limbs[0]);
        }
        if self.limbs.len() == 1 {
            return other.mul_small(self.limbs[0]);
        }

        let m = other.limbs.len();
        let mut acc = vec![0u64; self.limbs.len() + m];
        for (i, &a) in self.limbs.iter().enumerate() {
            let mut carry: u128 = 0;
            for (j, &b) in other.limbs.iter().enumerate() {
                let cur = u128::from(acc[i + j]) + u128::from(a) * u128::from(b) + carry;
                acc[i + j] = (cur % BASE_WIDE) as u64;
                carry = cur / BASE_WIDE;
            }
            let mut k = i + m;
            while carry > 0 {
                let cur = u128::from(acc[k]) + carry;
                acc[k] = (cur % BASE_WIDE) as u64;
                carry = cur / BASE_WIDE;
                k += 1;
            }
        }
        Self::from_limbs(&acc)
    }

    /// self * factor for a machine-word factor.
    pub fn mul_small(&self, factor: u64) -> Self {
        if factor == 0 || self.is_zero() {
            return Self::zero();
        }
        let mut limbs = Limbs::with_capacity(self.limbs.len() + 2);
        let mut carry: u128 = 0;
        for &a in &self.limbs {
            let cur = u128::from(a) * u128::from(factor) + carry;
            limbs.push((cur % BASE_WIDE) as u64);
            carry = cur / BASE_WIDE;
        }
        while carry > 0 {
            limbs.push((carry % BASE_WIDE) as u64);
            carry /= BASE_WIDE;
        }
        Self { limbs }
    }

    /// self * 10^n
    pub fn mul_pow10(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }
        let shifted = match n % LOG_BASE {
            0 => self.clone(),
            r => self.mul_small(POWS_TEN[r]),
        };
        let whole = n / LOG_BASE;
        let mut limbs: Limbs = SmallVec::from_elem(0, whole);
        limbs.extend_from_slice(&shifted.limbs);
        Self { limbs }
    }

    // ========================================================================
    // Division
    // ========================================================================

    /// Quotient and remainder for a non-zero machine-word divisor.
    pub fn div_rem_small(&self, divisor: u64) -> (Self, u64) {
        debug_assert!(divisor > 0, "division by zero");
        let d = u128::from(divisor);
        let mut limbs: Limbs = SmallVec::from_elem(0, self.limbs.len());
        let mut rem: u128 = 0;
        for i in (0..self.limbs.len()).rev() {
            let cur = rem * BASE_WIDE + u128::from(self.limbs[i]);
            limbs[i] = (cur / d) as u64;
            rem = cur % d;
        }
        let mut q = Self { limbs };
        q.trim();
        (q, rem as u64)
    }

    /// Truncating division by 10^n: `(self / 10^n, self % 10^n)`.
    pub fn div_rem_pow10(&self, n: usize) -> (Self, Self) {
        let whole = n / LOG_BASE;
        if whole >= self.limbs.len() {
            return (Self::zero(), self.clone());
        }
        let upper = Self::from_limbs(&self.limbs[whole..]);
        let (q, r) = match n % LOG_BASE {
            0 => (upper, 0),
            k => upper.div_rem_small(POWS_TEN[k]),
        };
        let mut rem: Limbs = Limbs::from_slice(&self.limbs[..whole]);
        rem.push(r);
        let mut rem = Self { limbs: rem };
        rem.trim();
        (q, rem)
    }

    /// Long division: `(self / divisor, self % divisor)`.
    ///
    /// Works limb by limb. Both operands are first scaled so the divisor's
    /// leading limb is at least half the radix, which bounds each trial
    /// quotient limb to within one of the true value.
    ///
    /// # Panics
    /// Panics if `divisor` is zero; callers resolve zero divisors before
    /// reaching digit arithmetic.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "magnitude division by zero");

        if *self < *divisor {
            return (Self::zero(), self.clone());
        }
        if divisor.limbs.len() == 1 {
            let (q, r) = self.div_rem_small(divisor.limbs[0]);
            return (q, Self::from_u64(r));
        }

        let top = divisor.limbs[divisor.limbs.len() - 1];
        let factor = BASE / (top + 1);
        let v = divisor.mul_small(factor);
        let mut u: Vec<u64> = self.mul_small(factor).limbs.to_vec();
        u.push(0);

        let n = v.limbs.len();
        let m = u.len() - n - 1;
        let v_top = u128::from(v.limbs[n - 1]);
        let v_next = u128::from(v.limbs[n - 2]);
        let mut quotient = vec![0u64; m + 1];

        for j in (0..=m).rev() {
            let num = u128::from(u[j + n]) * BASE_WIDE + u128::from(u[j + n - 1]);
            let mut qhat = num / v_top;
            let mut rhat = num % v_top;
            while qhat >= BASE_WIDE || qhat * v_next > rhat * BASE_WIDE + u128::from(u[j + n - 2]) {
                qhat -= 1;
                rhat += v_top;
                if rhat >= BASE_WIDE {
                    break;
                }
            }

            // Subtract qhat * v from the current window.
            let mut borrow: i128 = 0;
            let mut carry: u128 = 0;
            for i in 0..n {
                let p = qhat * u128::from(v.limbs[i]) + carry;
                carry = p / BASE_WIDE;
                let t = i128::from(u[i + j]) - (p % BASE_WIDE) as i128 + borrow;
                if t < 0 {
                    u[i + j] = (t + BASE_WIDE as i128) as u64;
                    borrow = -1;
                } else {
                    u[i + j] = t as u64;
                    borrow = 0;
                }
            }
            let t = i128::from(u[j + n]) - carry as i128 + borrow;
            if t < 0 {
                // Trial quotient was one too large: add the divisor back.
                u[j + n] = (t + BASE_WIDE as i128) as u64;
                qhat -= 1;
                let mut c = 0u64;
                for i in 0..n {
                    let s = u[i + j] + v.limbs[i] + c;
                    if s >= BASE {
                        u[i + j] = s - BASE;
                        c = 1;
                    } else {
                        u[i + j] = s;
                        c = 0;
                    }
                }
                u[j + n] = (u[j + n] + c) % BASE;
            } else {
                u[j + n] = t as u64;
            }
            quotient[j] = qhat as u64;
        }

        let (rem, _) = Self::from_limbs(&u[..n]).div_rem_small(factor);
        (Self::from_limbs(&quotient), rem)
    }

    /// Floor of the square root, by Newton iteration from above.
    pub fn isqrt(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        // 10^ceil(d/2) exceeds the root of any d-digit number.
        let mut x = Self::pow10(self.digit_count().div_ceil(2));
        let mut steps = 0usize;
        loop {
            let (q, _) = self.div_rem(&x);
            let (y, _) = x.add(&q).div_rem_small(2);
            steps += 1;
            if y >= x {
                tracing::trace!(steps, digits = self.digit_count(), "integer square root converged");
                return x;
            }
            x = y;
        }
    }

    /// self^exp by repeated squaring (exact).
    pub fn pow(&self, mut exp: u64) -> Self {
        let mut base = self.clone();
        let mut acc = Self::one();
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }
        acc
    }
}

fn push_limb_digits(out: &mut Vec<u8>, limb: u64, width: usize) {
    let start = out.len();
    out.resize(start + width, 0);
    let mut l = limb;
    for slot in out[start..].iter_mut().rev() {
        *slot = (l % 10) as u8;
        l /= 10;
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Ord for Magnitude {
    fn cmp(&self, other: &Self) -> Ordering {
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl PartialOrd for Magnitude {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((top, rest)) = self.limbs.split_last() else {
            return f.write_str("0");
        };
        write!(f, "{}", top)?;
        for limb in rest.iter().rev() {
            write!(f, "{:0width$}", limb, width = LOG_BASE)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Magnitude({}, limbs={})", self, self.limbs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mag(s: &str) -> Magnitude {
        let digits: Vec<u8> = s.bytes().map(|b| b - b'0').collect();
        Magnitude::from_digits(&digits)
    }

    #[test]
    fn test_from_digits_and_display() {
        assert_eq!(mag("0").to_string(), "0");
        assert_eq!(mag("000123").to_string(), "123");
        let long = "123456789012345678901234567890";
        assert_eq!(mag(long).to_string(), long);
        assert_eq!(mag(long).limb_count(), 3);
        assert_eq!(mag(long).digit_count(), 30);
    }

    #[test]
    fn test_to_digits() {
        assert_eq!(Magnitude::zero().to_digits(), vec![0]);
        assert_eq!(mag("100000000000000").to_digits().len(), 15);
        assert_eq!(mag("907").to_digits(), vec![9, 0, 7]);
    }

    #[test]
    fn test_trailing_zeros() {
        assert_eq!(mag("1000").trailing_zeros(), 3);
        assert_eq!(mag("1").mul_pow10(31).trailing_zeros(), 31);
        assert_eq!(Magnitude::zero().trailing_zeros(), 0);
    }

    #[test]
    fn test_add_with_carry() {
        let a = mag("99999999999999");
        let b = Magnitude::one();
        assert_eq!(a.add(&b).to_string(), "100000000000000");
        assert_eq!(a.add(&b).limb_count(), 2);
    }

    #[test]
    fn test_sub_with_borrow() {
        let a = mag("100000000000000000000000000000");
        let b = Magnitude::one();
        assert_eq!(a.sub(&b).to_string(), "9".repeat(29));
        let (d, negative) = b.abs_diff(&a);
        assert!(negative);
        assert_eq!(d.to_string(), "9".repeat(29));
    }

    #[test]
    fn test_mul() {
        let nines = mag(&"9".repeat(20));
        let expected = format!("{}8{}1", "9".repeat(19), "0".repeat(19));
        assert_eq!(nines.mul(&nines).to_string(), expected);
        assert_eq!(mag("12345").mul(&mag("6789")).to_string(), "83810205");
        assert!(mag("5").mul(&Magnitude::zero()).is_zero());
    }

    #[test]
    fn test_pow10_shifts() {
        assert_eq!(Magnitude::pow10(0).to_string(), "1");
        assert_eq!(Magnitude::pow10(15).to_string(), format!("1{}", "0".repeat(15)));
        let (q, r) = mag("123456789012345678").div_rem_pow10(5);
        assert_eq!(q.to_string(), "1234567890123");
        assert_eq!(r.to_string(), "45678");
        let (q, r) = mag("42").div_rem_pow10(30);
        assert!(q.is_zero());
        assert_eq!(r.to_string(), "42");
    }

    #[test]
    fn test_div_rem_small() {
        let (q, r) = mag("1000000000000000000001").div_rem_small(7);
        assert_eq!(q.mul_small(7).add_small(r).to_string(), "1000000000000000000001");
        assert!(r < 7);
    }

    #[test]
    fn test_div_rem_identity() {
        let cases = [
            ("123456789012345678901234567890123456789", "98765432109876543210"),
            ("100000000000000000000000000000000000000000", "100000000000000000001"),
            ("99999999999999999999999999999999", "99999999999999999999"),
            ("18446744073709551616000000000000000000000", "1000000000000007"),
            ("5", "123456789012345678901"),
        ];
        for (n, d) in cases {
            let (n, d) = (mag(n), mag(d));
            let (q, r) = n.div_rem(&d);
            assert!(r < d, "remainder must be below divisor");
            assert_eq!(q.mul(&d).add(&r), n);
        }
    }

    #[test]
    fn test_div_rem_exact() {
        let a = mag("123456789012345678901234567");
        let b = mag("987654321098765432109");
        let (q, r) = a.mul(&b).div_rem(&b);
        assert_eq!(q, a);
        assert!(r.is_zero());
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(Magnitude::pow10(40).isqrt(), Magnitude::pow10(20));
        assert_eq!(mag("2").mul_pow10(20).isqrt().to_string(), "14142135623");
        assert_eq!(mag("15").isqrt().to_string(), "3");
        assert_eq!(mag("16").isqrt().to_string(), "4");
        assert!(Magnitude::zero().isqrt().is_zero());
    }

    #[test]
    fn test_pow() {
        assert_eq!(mag("2").pow(10).to_string(), "1024");
        assert_eq!(mag("10").pow(20), Magnitude::pow10(20));
        assert!(mag("7").pow(0).is_one());
    }

    #[test]
    fn test_ordering() {
        assert!(mag("100000000000000") > mag("99999999999999"));
        assert!(mag("5") < mag("6"));
        assert_eq!(mag("0"), Magnitude::zero());
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(mag("18446744073709551615").to_u64(), Some(u64::MAX));
        assert_eq!(mag("18446744073709551616").to_u64(), None);
        assert_eq!(Magnitude::from_u128(u128::from(u64::MAX) + 1).to_string(), "18446744073709551616");
    }
}
