//! The canonical value model: one closed union of algebraic shapes with a
//! uniform, total operation contract.
//!
//! Raw operations combine operands without canonicalizing; [`Notation::simplified`]
//! is the explicit reduction step and only ever moves *down* the promotion
//! lattice Number < Fraction < {Radical, Imaginary} < {RadicalFraction,
//! Complex} < Algebraic. Instead of one hand-written rule per ordered pair of
//! shapes, each binary operation promotes both operands to the join of their
//! shapes and operates there.

use std::fmt;

use crate::algebraic::Algebraic;
use crate::error::Result;
use crate::ints::{self, Checked, Int};
use crate::simplify;

/// `coefficient · √radicand`. A negative radicand encodes an imaginary
/// radical: `Radical::new(c, -r)` stands for `c·i·√r`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Radical {
    pub coefficient: Int,
    pub radicand: Int,
}

impl Radical {
    pub fn new(coefficient: Int, radicand: Int) -> Self {
        Radical {
            coefficient,
            radicand,
        }
    }

    pub fn is_rational(&self) -> bool {
        self.radicand == 1
    }

    pub fn is_imaginary(&self) -> bool {
        self.radicand < 0
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient == 0 || self.radicand == 0
    }

    pub(crate) fn negated(&self) -> Option<Radical> {
        self.coefficient
            .checked_neg()
            .map(|c| Radical::new(c, self.radicand))
    }
}

impl fmt::Display for Radical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::radical(self))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Notation {
    Number(Int),
    Fraction { numerator: Int, denominator: Int },
    Radical(Radical),
    RadicalFraction { numerator: Radical, denominator: Int },
    Imaginary { coefficient: Int },
    Complex { real: Int, imaginary: Int },
    Algebraic(Algebraic),
    Undefined,
    Huge { negative: bool },
    Tiny { negative: bool },
    NotEnoughInfo,
}

/// Shape a pair of finite operands is promoted to before combining.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Join {
    Number,
    Fraction,
    Complex,
    Algebraic,
}

impl Notation {
    pub fn number(value: Int) -> Self {
        Notation::Number(value)
    }

    pub fn fraction(numerator: Int, denominator: Int) -> Self {
        Notation::Fraction {
            numerator,
            denominator,
        }
    }

    pub fn radical(coefficient: Int, radicand: Int) -> Self {
        Notation::Radical(Radical::new(coefficient, radicand))
    }

    pub fn radical_fraction(coefficient: Int, radicand: Int, denominator: Int) -> Self {
        Notation::RadicalFraction {
            numerator: Radical::new(coefficient, radicand),
            denominator,
        }
    }

    pub fn imaginary(coefficient: Int) -> Self {
        Notation::Imaginary { coefficient }
    }

    pub fn complex(real: Int, imaginary: Int) -> Self {
        Notation::Complex { real, imaginary }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            Notation::Undefined
                | Notation::Huge { .. }
                | Notation::Tiny { .. }
                | Notation::NotEnoughInfo
        )
    }

    /// Structural zero test on the raw representation. A zero denominator
    /// disqualifies (the value is Undefined, not zero).
    pub fn is_zero(&self) -> bool {
        match self {
            Notation::Number(n) => *n == 0,
            Notation::Fraction {
                numerator,
                denominator,
            } => *numerator == 0 && *denominator != 0,
            Notation::Radical(r) => r.is_zero(),
            Notation::RadicalFraction {
                numerator,
                denominator,
            } => numerator.is_zero() && *denominator != 0,
            Notation::Imaginary { coefficient } => *coefficient == 0,
            Notation::Complex { real, imaginary } => *real == 0 && *imaginary == 0,
            Notation::Algebraic(a) => a.denominator != 0 && a.terms.iter().all(Radical::is_zero),
            _ => false,
        }
    }

    /// Sign of a finite value when it can be read off the raw shape:
    /// `Some(-1 | 0 | 1)`, or `None` when the value is imaginary, mixed, or
    /// sits over a zero denominator.
    fn definite_sign(&self) -> Option<i32> {
        match self {
            Notation::Number(n) => Some(n.signum() as i32),
            Notation::Fraction {
                numerator,
                denominator,
            } => {
                if *denominator == 0 {
                    None
                } else {
                    Some((numerator.signum() * denominator.signum()) as i32)
                }
            }
            Notation::Radical(r) => {
                if r.is_zero() {
                    Some(0)
                } else if r.is_imaginary() {
                    None
                } else {
                    Some(r.coefficient.signum() as i32)
                }
            }
            Notation::RadicalFraction {
                numerator,
                denominator,
            } => {
                if *denominator == 0 {
                    None
                } else if numerator.is_zero() {
                    Some(0)
                } else if numerator.is_imaginary() {
                    None
                } else {
                    Some((numerator.coefficient.signum() * denominator.signum()) as i32)
                }
            }
            Notation::Imaginary { coefficient } => {
                if *coefficient == 0 {
                    Some(0)
                } else {
                    None
                }
            }
            Notation::Complex { real, imaginary } => {
                if *imaginary == 0 {
                    Some(real.signum() as i32)
                } else {
                    None
                }
            }
            Notation::Algebraic(a) => {
                if a.denominator == 0 {
                    return None;
                }
                let live: Vec<&Radical> = a.terms.iter().filter(|t| !t.is_zero()).collect();
                if live.is_empty() {
                    return Some(0);
                }
                if live.iter().all(|t| t.is_rational()) {
                    let coefficients: Vec<Int> = live.iter().map(|t| t.coefficient).collect();
                    if let Checked::Exact(sum) = ints::checked_sum(&coefficients) {
                        return Some((sum.signum() * a.denominator.signum()) as i32);
                    }
                }
                None
            }
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Notation::Number(_) => 0,
            Notation::Fraction { .. } => 1,
            Notation::Radical(_) | Notation::Imaginary { .. } => 2,
            Notation::RadicalFraction { .. } | Notation::Complex { .. } => 3,
            Notation::Algebraic(_) => 4,
            _ => 5,
        }
    }

    fn join(&self, other: &Notation) -> Join {
        let fraction_like =
            |n: &Notation| matches!(n, Notation::Number(_) | Notation::Fraction { .. });
        let complex_like = |n: &Notation| {
            matches!(
                n,
                Notation::Number(_) | Notation::Imaginary { .. } | Notation::Complex { .. }
            )
        };
        if matches!(self, Notation::Number(_)) && matches!(other, Notation::Number(_)) {
            Join::Number
        } else if fraction_like(self) && fraction_like(other) {
            Join::Fraction
        } else if complex_like(self) && complex_like(other) {
            Join::Complex
        } else {
            Join::Algebraic
        }
    }

    fn as_fraction(&self) -> (Int, Int) {
        match self {
            Notation::Number(n) => (*n, 1),
            Notation::Fraction {
                numerator,
                denominator,
            } => (*numerator, *denominator),
            _ => unreachable!("fraction join only covers Number and Fraction"),
        }
    }

    fn as_complex(&self) -> (Int, Int) {
        match self {
            Notation::Number(n) => (*n, 0),
            Notation::Imaginary { coefficient } => (0, *coefficient),
            Notation::Complex { real, imaginary } => (*real, *imaginary),
            _ => unreachable!("complex join only covers Number, Imaginary, Complex"),
        }
    }

    /// Embedding into the richest shape. Every finite shape is exactly
    /// representable as a sum of radical terms over a denominator.
    pub fn as_algebraic(&self) -> Algebraic {
        match self {
            Notation::Number(n) => Algebraic::new(vec![Radical::new(*n, 1)], 1),
            Notation::Fraction {
                numerator,
                denominator,
            } => Algebraic::new(vec![Radical::new(*numerator, 1)], *denominator),
            Notation::Radical(r) => Algebraic::new(vec![*r], 1),
            Notation::RadicalFraction {
                numerator,
                denominator,
            } => Algebraic::new(vec![*numerator], *denominator),
            Notation::Imaginary { coefficient } => {
                Algebraic::new(vec![Radical::new(*coefficient, -1)], 1)
            }
            Notation::Complex { real, imaginary } => Algebraic::new(
                vec![Radical::new(*real, 1), Radical::new(*imaginary, -1)],
                1,
            ),
            Notation::Algebraic(a) => a.clone(),
            _ => unreachable!("sentinels are screened before promotion"),
        }
    }

    pub fn add(&self, rhs: &Notation) -> Notation {
        if let Some(sentinel) = sentinel_add(self, rhs) {
            return sentinel;
        }
        match self.join(rhs) {
            Join::Number => {
                let (a, b) = (self.as_fraction().0, rhs.as_fraction().0);
                ints::checked_add(a, b).into()
            }
            Join::Fraction => {
                let (a, b) = self.as_fraction();
                let (c, d) = rhs.as_fraction();
                wide_fraction(a as i128 * d as i128 + c as i128 * b as i128, b as i128 * d as i128)
            }
            Join::Complex => {
                let (ar, ai) = self.as_complex();
                let (br, bi) = rhs.as_complex();
                wide_complex(ar as i128 + br as i128, ai as i128 + bi as i128)
            }
            Join::Algebraic => self.as_algebraic().add(&rhs.as_algebraic()),
        }
    }

    pub fn sub(&self, rhs: &Notation) -> Notation {
        self.add(&rhs.negated())
    }

    pub fn mul(&self, rhs: &Notation) -> Notation {
        if let Some(sentinel) = sentinel_mul(self, rhs) {
            return sentinel;
        }
        // i·i folds straight to a real number.
        if let (
            Notation::Imaginary { coefficient: a },
            Notation::Imaginary { coefficient: b },
        ) = (self, rhs)
        {
            return wide_number(-(*a as i128) * *b as i128);
        }
        match self.join(rhs) {
            Join::Number => {
                let (a, b) = (self.as_fraction().0, rhs.as_fraction().0);
                ints::checked_mul(a, b).into()
            }
            Join::Fraction => {
                let (a, b) = self.as_fraction();
                let (c, d) = rhs.as_fraction();
                wide_fraction(a as i128 * c as i128, b as i128 * d as i128)
            }
            Join::Complex => {
                let (ar, ai) = self.as_complex();
                let (br, bi) = rhs.as_complex();
                let real = ar as i128 * br as i128 - ai as i128 * bi as i128;
                let imaginary = ar as i128 * bi as i128 + ai as i128 * br as i128;
                wide_complex(real, imaginary)
            }
            Join::Algebraic => self.as_algebraic().mul(&rhs.as_algebraic()),
        }
    }

    /// Division. Total over the numeric domain except for an Algebraic
    /// divisor with three or more radical terms, which has no general
    /// rationalization and reports `Unsupported`.
    pub fn div(&self, rhs: &Notation) -> Result<Notation> {
        if let Some(sentinel) = sentinel_div(self, rhs) {
            return Ok(sentinel);
        }
        match self.join(rhs) {
            Join::Number | Join::Fraction => {
                let (a, b) = self.as_fraction();
                let (c, d) = rhs.as_fraction();
                Ok(wide_fraction(a as i128 * d as i128, b as i128 * c as i128))
            }
            Join::Complex | Join::Algebraic => self.as_algebraic().div(&rhs.as_algebraic()),
        }
    }

    pub fn negated(&self) -> Notation {
        match self {
            Notation::Number(n) => match n.checked_neg() {
                Some(v) => Notation::Number(v),
                None => Notation::Huge { negative: false },
            },
            Notation::Fraction {
                numerator,
                denominator,
            } => wide_fraction(-(*numerator as i128), *denominator as i128),
            Notation::Radical(r) => match r.negated() {
                Some(v) => Notation::Radical(v),
                None => Notation::Huge { negative: false },
            },
            Notation::RadicalFraction {
                numerator,
                denominator,
            } => match numerator.negated() {
                Some(v) => Notation::RadicalFraction {
                    numerator: v,
                    denominator: *denominator,
                },
                None => Notation::Huge { negative: false },
            },
            Notation::Imaginary { coefficient } => match coefficient.checked_neg() {
                Some(v) => Notation::Imaginary { coefficient: v },
                None => Notation::Huge { negative: false },
            },
            Notation::Complex { real, imaginary } => {
                wide_complex(-(*real as i128), -(*imaginary as i128))
            }
            Notation::Algebraic(a) => match a.negated() {
                Some(v) => Notation::Algebraic(v),
                None => Notation::Huge { negative: false },
            },
            Notation::Undefined => Notation::Undefined,
            Notation::Huge { negative } => Notation::Huge {
                negative: !negative,
            },
            Notation::Tiny { negative } => Notation::Tiny {
                negative: !negative,
            },
            Notation::NotEnoughInfo => Notation::NotEnoughInfo,
        }
    }

    pub fn reciprocal(&self) -> Result<Notation> {
        match self {
            Notation::Undefined => Ok(Notation::Undefined),
            Notation::NotEnoughInfo => Ok(Notation::NotEnoughInfo),
            Notation::Huge { negative } => Ok(Notation::Tiny {
                negative: *negative,
            }),
            Notation::Tiny { negative } => Ok(Notation::Huge {
                negative: *negative,
            }),
            Notation::Number(n) => Ok(Notation::fraction(1, *n)),
            Notation::Fraction {
                numerator,
                denominator,
            } => Ok(Notation::fraction(*denominator, *numerator)),
            _ => Notation::Number(1).div(self),
        }
    }

    /// Integer power. `pow(0)` is `Number(1)` for every base; a negative
    /// exponent is the reciprocal of the positive power.
    pub fn pow(&self, exponent: Int) -> Result<Notation> {
        match self {
            Notation::Undefined => return Ok(Notation::Undefined),
            Notation::NotEnoughInfo => return Ok(Notation::NotEnoughInfo),
            Notation::Huge { negative } => {
                let negative = *negative && exponent % 2 != 0;
                return Ok(match exponent {
                    0 => Notation::Number(1),
                    e if e > 0 => Notation::Huge { negative },
                    _ => Notation::Tiny { negative },
                });
            }
            Notation::Tiny { negative } => {
                let negative = *negative && exponent % 2 != 0;
                return Ok(match exponent {
                    0 => Notation::Number(1),
                    e if e > 0 => Notation::Tiny { negative },
                    _ => Notation::Huge { negative },
                });
            }
            _ => {}
        }
        if exponent == 0 {
            return Ok(Notation::Number(1));
        }
        if exponent < 0 {
            let positive = exponent.checked_neg().unwrap_or(Int::MAX);
            return self.pow(positive)?.reciprocal();
        }
        if let Notation::Number(base) = self {
            return Ok(ints::power(*base, exponent));
        }
        // Square-and-multiply over raw mul; saturation flows through the
        // sentinel algebra once an intermediate product overflows.
        let mut n = exponent as u64;
        let mut base = self.clone();
        while n & 1 == 0 {
            base = base.mul(&base);
            n >>= 1;
        }
        let mut result = base.clone();
        n >>= 1;
        while n > 0 {
            base = base.mul(&base);
            if n & 1 == 1 {
                result = result.mul(&base);
            }
            n >>= 1;
        }
        Ok(result)
    }

    /// Canonicalization: idempotent, and only ever demotes down the lattice.
    pub fn simplified(&self) -> Notation {
        simplify::simplified(self)
    }

    pub fn as_equality(&self, lhs: &str) -> String {
        crate::format::as_equality(lhs, self)
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}

/// Clamp a wide intermediate back into the fixed-width model.
pub(crate) fn wide_number(value: i128) -> Notation {
    match Int::try_from(value) {
        Ok(v) => Notation::Number(v),
        Err(_) => Notation::Huge {
            negative: value < 0,
        },
    }
}

/// Rebuild a fraction from wide intermediates. When the raw pair no longer
/// fits, reduce it first; a still-oversized value saturates to Huge or Tiny
/// by magnitude.
pub(crate) fn wide_fraction(numerator: i128, denominator: i128) -> Notation {
    if denominator == 0 {
        return if numerator == 0 {
            Notation::Undefined
        } else {
            Notation::fraction(numerator.signum() as Int, 0)
        };
    }
    if let (Ok(n), Ok(d)) = (Int::try_from(numerator), Int::try_from(denominator)) {
        return Notation::fraction(n, d);
    }
    let g = gcd_wide(numerator, denominator);
    let (n, d) = (numerator / g, denominator / g);
    if let (Ok(n), Ok(d)) = (Int::try_from(n), Int::try_from(d)) {
        return Notation::fraction(n, d);
    }
    let negative = (n < 0) != (d < 0);
    if n.abs() >= d.abs() {
        Notation::Huge { negative }
    } else {
        Notation::Tiny { negative }
    }
}

fn wide_complex(real: i128, imaginary: i128) -> Notation {
    match (Int::try_from(real), Int::try_from(imaginary)) {
        (Ok(r), Ok(i)) => Notation::Complex {
            real: r,
            imaginary: i,
        },
        _ => Notation::Huge {
            negative: real < 0,
        },
    }
}

fn gcd_wide(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    if a == 0 {
        1
    } else {
        a
    }
}

fn sentinel_add(a: &Notation, b: &Notation) -> Option<Notation> {
    use Notation::*;
    match (a, b) {
        (Undefined, _) | (_, Undefined) => Some(Undefined),
        (NotEnoughInfo, _) | (_, NotEnoughInfo) => Some(NotEnoughInfo),
        // A value pinned near zero cannot be exactly summed with anything.
        (Tiny { .. }, _) | (_, Tiny { .. }) => Some(NotEnoughInfo),
        (Huge { negative: s }, Huge { negative: t }) => {
            if s == t {
                Some(Huge { negative: *s })
            } else {
                Some(NotEnoughInfo)
            }
        }
        (Huge { negative }, _) | (_, Huge { negative }) => Some(Huge {
            negative: *negative,
        }),
        _ => None,
    }
}

fn sentinel_mul(a: &Notation, b: &Notation) -> Option<Notation> {
    use Notation::*;
    match (a, b) {
        (Undefined, _) | (_, Undefined) => Some(Undefined),
        (NotEnoughInfo, _) | (_, NotEnoughInfo) => Some(NotEnoughInfo),
        (Huge { negative: s }, Huge { negative: t }) => Some(Huge { negative: s != t }),
        (Tiny { negative: s }, Tiny { negative: t }) => Some(Tiny { negative: s != t }),
        (Huge { .. }, Tiny { .. }) | (Tiny { .. }, Huge { .. }) => Some(NotEnoughInfo),
        (Huge { negative }, finite) | (finite, Huge { negative }) => {
            if finite.is_zero() {
                Some(NotEnoughInfo)
            } else {
                Some(Huge {
                    negative: combine_sign(*negative, finite),
                })
            }
        }
        (Tiny { negative }, finite) | (finite, Tiny { negative }) => {
            if finite.is_zero() {
                Some(Number(0))
            } else {
                Some(Tiny {
                    negative: combine_sign(*negative, finite),
                })
            }
        }
        _ => None,
    }
}

fn sentinel_div(a: &Notation, b: &Notation) -> Option<Notation> {
    use Notation::*;
    match (a, b) {
        (Undefined, _) | (_, Undefined) => Some(Undefined),
        (NotEnoughInfo, _) | (_, NotEnoughInfo) => Some(NotEnoughInfo),
        (Huge { .. }, Huge { .. }) => Some(NotEnoughInfo),
        (Tiny { .. }, Tiny { .. }) => Some(NotEnoughInfo),
        (Huge { negative: s }, Tiny { negative: t }) => Some(Huge { negative: s != t }),
        (Tiny { negative: s }, Huge { negative: t }) => Some(Tiny { negative: s != t }),
        (Huge { negative }, finite) => {
            if finite.is_zero() {
                Some(Undefined)
            } else {
                Some(Huge {
                    negative: combine_sign(*negative, finite),
                })
            }
        }
        (Tiny { negative }, finite) => {
            if finite.is_zero() {
                Some(Undefined)
            } else {
                Some(Tiny {
                    negative: combine_sign(*negative, finite),
                })
            }
        }
        (finite, Huge { negative }) => {
            if finite.is_zero() {
                Some(Number(0))
            } else {
                Some(Tiny {
                    negative: combine_sign(*negative, finite),
                })
            }
        }
        (finite, Tiny { negative }) => {
            if finite.is_zero() {
                Some(Number(0))
            } else {
                Some(Huge {
                    negative: combine_sign(*negative, finite),
                })
            }
        }
        _ => None,
    }
}

/// Combine a sentinel's sign with a finite partner. An indeterminate partner
/// sign (imaginary or mixed) leaves the sentinel's own sign in place.
fn combine_sign(negative: bool, finite: &Notation) -> bool {
    match finite.definite_sign() {
        Some(s) if s < 0 => !negative,
        _ => negative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_prefers_weakest_shared_shape() {
        let n = Notation::Number(2);
        let f = Notation::fraction(1, 2);
        let i = Notation::imaginary(3);
        let r = Notation::radical(1, 2);
        assert_eq!(n.join(&n), Join::Number);
        assert_eq!(n.join(&f), Join::Fraction);
        assert_eq!(n.join(&i), Join::Complex);
        assert_eq!(f.join(&i), Join::Algebraic);
        assert_eq!(r.join(&n), Join::Algebraic);
    }

    #[test]
    fn wide_fraction_saturates_by_magnitude() {
        let huge = wide_fraction(i128::from(Int::MAX) * 3, 2);
        assert_eq!(huge, Notation::Huge { negative: false });
        let tiny = wide_fraction(2, i128::from(Int::MAX) * -3);
        assert_eq!(tiny, Notation::Tiny { negative: true });
    }

    #[test]
    fn imaginary_square_is_real() {
        let i3 = Notation::imaginary(3);
        assert_eq!(i3.mul(&Notation::imaginary(2)), Notation::Number(-6));
    }

    #[test]
    fn definite_sign_screens_imaginaries() {
        assert_eq!(Notation::Number(-4).definite_sign(), Some(-1));
        assert_eq!(Notation::fraction(2, -3).definite_sign(), Some(-1));
        assert_eq!(Notation::imaginary(1).definite_sign(), None);
        assert_eq!(Notation::radical(2, 3).definite_sign(), Some(1));
        assert_eq!(Notation::radical(2, -3).definite_sign(), None);
    }
}
