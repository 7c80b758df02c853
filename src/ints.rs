//! Integer toolkit: factorization, GCF/LCM, primality, and overflow-checked
//! arithmetic over the fixed-width `Int`.

use num_integer::{Integer, Roots};
use num_traits::checked_pow;

use crate::value::{Notation, Radical};

pub type Int = i64;

/// Outcome of an overflow-checked integer operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checked {
    Exact(Int),
    Huge { negative: bool },
}

impl Checked {
    pub fn exact(self) -> Option<Int> {
        match self {
            Checked::Exact(value) => Some(value),
            Checked::Huge { .. } => None,
        }
    }
}

impl From<Checked> for Notation {
    fn from(checked: Checked) -> Notation {
        match checked {
            Checked::Exact(value) => Notation::Number(value),
            Checked::Huge { negative } => Notation::Huge { negative },
        }
    }
}

/// Positive divisors of |n| in ascending order. Zero has none.
pub fn divisors(n: Int) -> Vec<Int> {
    let target = n.unsigned_abs();
    let mut low = Vec::new();
    let mut high = Vec::new();
    let mut d: u64 = 1;
    while d * d <= target {
        if target % d == 0 {
            low.push(d as Int);
            if d * d != target {
                high.push((target / d) as Int);
            }
        }
        d += 1;
    }
    high.reverse();
    low.extend(high);
    low
}

/// Every positive common factor of `values` in ascending order, paired with
/// the cofactors. The first entry is always `(1, originals)` and the last is
/// `(gcf, originals/gcf)`.
pub fn common_factors(values: &[Int]) -> Vec<(Int, Vec<Int>)> {
    match gcd_fold(values) {
        0 => vec![(1, values.to_vec())],
        g => divisors(g)
            .into_iter()
            .map(|common| (common, values.iter().map(|v| v / common).collect()))
            .collect(),
    }
}

/// Greatest common factor; 1 when every value is zero.
pub fn gcf(values: &[Int]) -> Int {
    match gcd_fold(values) {
        0 => 1,
        g => g,
    }
}

/// Gcd of the whole slice, computed wide: `Integer::gcd` on Int overflows
/// when an operand is Int::MIN and the gcd is 2^63. A gcd of 2^63 does not
/// fit Int either and falls back to the largest representable divisor, 2^62.
fn gcd_fold(values: &[Int]) -> Int {
    let wide = values
        .iter()
        .fold(0i128, |acc, &v| acc.gcd(&(v as i128)));
    if wide > Int::MAX as i128 {
        (wide / 2) as Int
    } else {
        wide as Int
    }
}

/// Least common multiple, overflow-checked.
pub fn lcm(values: &[Int]) -> Checked {
    let mut acc: Int = 1;
    for &v in values {
        if v == 0 {
            return Checked::Exact(0);
        }
        let g = acc.gcd(&v);
        let step = (acc / g) as i128 * v.unsigned_abs() as i128;
        match Int::try_from(step) {
            Ok(next) => acc = next,
            Err(_) => return Checked::Huge { negative: false },
        }
    }
    Checked::Exact(acc)
}

/// Smallest factor of `n` greater than 1, or `None` below 2.
pub fn smallest_factor(n: Int) -> Option<Int> {
    if n < 2 {
        return None;
    }
    let target = n as u64;
    let mut d: u64 = 2;
    while d * d <= target {
        if target % d == 0 {
            return Some(d as Int);
        }
        d += 1;
    }
    Some(n)
}

/// Ascending `(prime, exponent)` pairs whose product reconstructs `n`.
/// Negative inputs prepend `(-1, 1)`; the result is never empty
/// (`0 -> [(0, 1)]`, `1 -> [(1, 1)]`).
pub fn prime_factors(n: Int) -> Vec<(Int, u32)> {
    if n == 0 {
        return vec![(0, 1)];
    }
    let mut factors = Vec::new();
    if n < 0 {
        factors.push((-1, 1));
    }
    if n == Int::MIN {
        factors.push((2, 63));
        return factors;
    }
    let mut remaining = n.abs();
    if remaining == 1 {
        if factors.is_empty() {
            factors.push((1, 1));
        }
        return factors;
    }
    while remaining > 1 {
        let prime = match smallest_factor(remaining) {
            Some(prime) => prime,
            None => break,
        };
        let mut exponent = 0;
        while remaining % prime == 0 {
            remaining /= prime;
            exponent += 1;
        }
        factors.push((prime, exponent));
    }
    factors
}

/// Factor-count primality test: a prime has exactly the trivial factor pair.
pub fn is_prime(n: Int) -> bool {
    n > 1 && divisors(n).len() == 2
}

pub fn checked_add(a: Int, b: Int) -> Checked {
    match a.checked_add(b) {
        Some(value) => Checked::Exact(value),
        // Addition only overflows when both operands share a sign.
        None => Checked::Huge { negative: a < 0 },
    }
}

pub fn checked_mul(a: Int, b: Int) -> Checked {
    match a.checked_mul(b) {
        Some(value) => Checked::Exact(value),
        None => Checked::Huge {
            negative: (a < 0) != (b < 0),
        },
    }
}

pub fn checked_sum(values: &[Int]) -> Checked {
    let mut acc: Int = 0;
    for &v in values {
        match checked_add(acc, v) {
            Checked::Exact(next) => acc = next,
            huge => return huge,
        }
    }
    Checked::Exact(acc)
}

pub fn checked_product(values: &[Int]) -> Checked {
    let mut acc: Int = 1;
    for &v in values {
        match checked_mul(acc, v) {
            Checked::Exact(next) => acc = next,
            huge => return huge,
        }
    }
    Checked::Exact(acc)
}

pub fn checked_power(base: Int, exp: u32) -> Checked {
    match checked_pow(base, exp as usize) {
        Some(value) => Checked::Exact(value),
        None => Checked::Huge {
            negative: base < 0 && exp % 2 == 1,
        },
    }
}

/// Integer power as a value: `Number` or `Huge` for non-negative exponents,
/// a raw reciprocal `Fraction` (or `Tiny` on saturation) for negative ones.
/// `power(b, 0)` is 1 for every base, including 0.
pub fn power(base: Int, exp: Int) -> Notation {
    if exp == 0 {
        return Notation::Number(1);
    }
    if exp > 0 {
        let exp = u32::try_from(exp).unwrap_or(u32::MAX);
        return checked_power(base, exp).into();
    }
    if base == 0 {
        return Notation::Undefined;
    }
    let exp = u32::try_from(-exp).unwrap_or(u32::MAX);
    match checked_power(base, exp) {
        Checked::Exact(value) => Notation::Fraction {
            numerator: 1,
            denominator: value,
        },
        Checked::Huge { negative } => Notation::Tiny { negative },
    }
}

/// Exact square root where one exists: `Number` for a perfect square,
/// `Imaginary` for the negation of one, otherwise an unreduced `Radical`.
pub fn sqrt(n: Int) -> Notation {
    if n == 0 {
        return Notation::Number(0);
    }
    if n == Int::MIN {
        return Notation::Radical(Radical::new(1, n));
    }
    let magnitude = n.abs();
    let root = magnitude.sqrt();
    if root * root == magnitude {
        if n > 0 {
            Notation::Number(root)
        } else {
            Notation::Imaginary { coefficient: root }
        }
    } else {
        Notation::Radical(Radical::new(1, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisors_ascend() {
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(-9), vec![1, 3, 9]);
        assert_eq!(divisors(1), vec![1]);
    }

    #[test]
    fn smallest_factor_finds_least_prime() {
        assert_eq!(smallest_factor(12), Some(2));
        assert_eq!(smallest_factor(35), Some(5));
        assert_eq!(smallest_factor(13), Some(13));
        assert_eq!(smallest_factor(1), None);
    }

    #[test]
    fn lcm_of_zero_is_zero() {
        assert_eq!(lcm(&[4, 0, 6]), Checked::Exact(0));
    }

    #[test]
    fn power_of_min_exponent_handled() {
        assert_eq!(power(2, -3), Notation::Fraction { numerator: 1, denominator: 8 });
    }
}
