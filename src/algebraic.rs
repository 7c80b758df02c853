//! Sum-of-radicals arithmetic: `(Σ cᵢ√rᵢ) / d`, the general irrational
//! workhorse every other shape embeds into.

use std::fmt;

use num_integer::Integer;

use crate::error::{Result, SurdError};
use crate::ints::{self, Checked, Int};
use crate::simplify;
use crate::value::{Notation, Radical};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Algebraic {
    pub terms: Vec<Radical>,
    pub denominator: Int,
}

impl Algebraic {
    pub fn new(terms: Vec<Radical>, denominator: Int) -> Self {
        Algebraic { terms, denominator }
    }

    pub fn from_term(term: Radical) -> Self {
        Algebraic::new(vec![term], 1)
    }

    pub(crate) fn negated(&self) -> Option<Algebraic> {
        let mut terms = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            terms.push(term.negated()?);
        }
        Some(Algebraic::new(terms, self.denominator))
    }

    /// Sign-flip of the last term. For two terms this is the binomial
    /// conjugate `a+b -> a-b`; for more it is only an approximation of one,
    /// and is used solely to drive rationalization in [`Algebraic::div`].
    pub fn conjugate(&self) -> Algebraic {
        let mut terms = self.terms.clone();
        if let Some(last) = terms.last_mut() {
            *last = Radical::new(
                last.coefficient.checked_neg().unwrap_or(Int::MAX),
                last.radicand,
            );
        }
        Algebraic::new(terms, self.denominator)
    }

    /// Cross-multiply denominators and concatenate the scaled term lists.
    pub fn add(&self, rhs: &Algebraic) -> Notation {
        let denominator = match ints::checked_mul(self.denominator, rhs.denominator) {
            Checked::Exact(d) => d,
            Checked::Huge { negative } => return Notation::Huge { negative },
        };
        let mut terms = Vec::with_capacity(self.terms.len() + rhs.terms.len());
        for term in &self.terms {
            match ints::checked_mul(term.coefficient, rhs.denominator) {
                Checked::Exact(c) => terms.push(Radical::new(c, term.radicand)),
                Checked::Huge { negative } => return Notation::Huge { negative },
            }
        }
        for term in &rhs.terms {
            match ints::checked_mul(term.coefficient, self.denominator) {
                Checked::Exact(c) => terms.push(Radical::new(c, term.radicand)),
                Checked::Huge { negative } => return Notation::Huge { negative },
            }
        }
        Notation::Algebraic(Algebraic::new(terms, denominator))
    }

    pub fn sub(&self, rhs: &Algebraic) -> Notation {
        match rhs.negated() {
            Some(negated) => self.add(&negated),
            None => Notation::Huge { negative: false },
        }
    }

    /// Cartesian term product over the product of denominators.
    pub fn mul(&self, rhs: &Algebraic) -> Notation {
        let denominator = match ints::checked_mul(self.denominator, rhs.denominator) {
            Checked::Exact(d) => d,
            Checked::Huge { negative } => return Notation::Huge { negative },
        };
        let mut terms = Vec::with_capacity(self.terms.len() * rhs.terms.len());
        for a in &self.terms {
            for b in &rhs.terms {
                match term_mul(a, b) {
                    Ok(term) => terms.push(term),
                    Err(sentinel) => return sentinel,
                }
            }
        }
        Notation::Algebraic(Algebraic::new(terms, denominator))
    }

    /// Rationalizing division. A single-radical-term divisor multiplies
    /// through by its own radical; a two-term divisor is first collapsed to a
    /// rational via its conjugate. Anything wider has no general
    /// rationalization and is reported as unsupported.
    pub fn div(&self, rhs: &Algebraic) -> Result<Notation> {
        // Like terms in the divisor must combine first: √2+√2 is the single
        // term 2√2, and handing it to the conjugate would annihilate it.
        let divisor = match rhs.combined() {
            Notation::Algebraic(a) => a,
            sentinel => return Ok(sentinel),
        };
        let live: Vec<Radical> = divisor
            .terms
            .iter()
            .copied()
            .filter(|t| !t.is_zero())
            .collect();
        match live.len() {
            0 => Ok(Notation::Undefined),
            1 => {
                let single = live[0];
                let mut terms = Vec::with_capacity(self.terms.len());
                let multiplier = Radical::new(divisor.denominator, single.radicand);
                for term in &self.terms {
                    match term_mul(term, &multiplier) {
                        Ok(t) => terms.push(t),
                        Err(sentinel) => return Ok(sentinel),
                    }
                }
                let denominator = match ints::checked_product(&[
                    self.denominator,
                    single.coefficient,
                    single.radicand,
                ]) {
                    Checked::Exact(d) => d,
                    Checked::Huge { .. } => return Ok(Notation::Tiny { negative: false }),
                };
                Ok(Notation::Algebraic(Algebraic::new(terms, denominator)))
            }
            2 => {
                let conjugate = Algebraic::new(live, divisor.denominator).conjugate();
                let numerator = self.mul(&conjugate);
                let denominator = match divisor.mul(&conjugate) {
                    // The conjugate product telescopes to a²r₁ - b²r₂: a
                    // single rational term once like terms cancel.
                    Notation::Algebraic(d) => d.combined(),
                    sentinel => sentinel,
                };
                match (&numerator, &denominator) {
                    (Notation::Algebraic(n), Notation::Algebraic(d)) => {
                        let remaining = d.terms.iter().filter(|t| !t.is_zero()).count();
                        if remaining <= 1 {
                            n.div(d)
                        } else {
                            Err(SurdError::Unsupported(
                                "division by a sum of radicals that does not rationalize"
                                    .to_string(),
                            ))
                        }
                    }
                    _ => numerator.div(&denominator),
                }
            }
            _ => Err(SurdError::Unsupported(
                "division by a sum of three or more radical terms".to_string(),
            )),
        }
    }

    /// Full canonicalization: square-free term reduction, factoring the
    /// coefficient GCF against the denominator, like-term combination, then
    /// demotion down the lattice. Saturation or a zero denominator
    /// short-circuits to the sentinel.
    pub fn simplified(&self) -> Notation {
        let terms = match canonical_terms(&self.terms) {
            Ok(terms) => terms,
            Err(sentinel) => return sentinel,
        };
        let (terms, denominator) = match factor_out(terms, self.denominator) {
            Ok(pair) => pair,
            Err(sentinel) => return sentinel,
        };
        let terms = match combine_like_terms(terms) {
            Ok(terms) => terms,
            Err(sentinel) => return sentinel,
        };
        // Combination can surface a new common factor (2√2+3√2 -> 5√2), so
        // reduce once more to keep the denominator coprime with the
        // coefficient GCF and the whole step idempotent.
        let (terms, denominator) = match factor_out(terms, denominator) {
            Ok(pair) => pair,
            Err(sentinel) => return sentinel,
        };
        demote(terms, denominator)
    }

    /// The reader's partial pass: term reduction and like-term combination
    /// only. The denominator is preserved untouched and no demotion happens,
    /// so an unresolved division survives across the fold.
    pub fn combined(&self) -> Notation {
        let terms = match canonical_terms(&self.terms) {
            Ok(terms) => terms,
            Err(sentinel) => return sentinel,
        };
        let terms = match combine_like_terms(terms) {
            Ok(terms) => terms,
            Err(sentinel) => return sentinel,
        };
        Notation::Algebraic(Algebraic::new(terms, self.denominator))
    }
}

impl fmt::Display for Algebraic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::algebraic(self))
    }
}

/// `(cᵃ√rᵃ)·(cᵇ√rᵇ)`. Two imaginary radicals multiply through i·i = -1: the
/// coefficient is negated and the radicand product is already positive.
fn term_mul(a: &Radical, b: &Radical) -> std::result::Result<Radical, Notation> {
    let both_imaginary = a.radicand < 0 && b.radicand < 0;
    let negative = ((a.coefficient < 0) != (b.coefficient < 0)) != both_imaginary;
    let overflow = Notation::Huge { negative };
    let mut coefficient = a
        .coefficient
        .checked_mul(b.coefficient)
        .ok_or_else(|| overflow.clone())?;
    if both_imaginary {
        coefficient = coefficient.checked_neg().ok_or_else(|| overflow.clone())?;
    }
    let radicand = a
        .radicand
        .checked_mul(b.radicand)
        .ok_or(overflow)?;
    Ok(Radical::new(coefficient, radicand))
}

fn canonical_terms(terms: &[Radical]) -> std::result::Result<Vec<Radical>, Notation> {
    let mut out = Vec::with_capacity(terms.len());
    for term in terms {
        match simplify::canonical_term(*term) {
            Some(t) => out.push(t),
            None => {
                return Err(Notation::Huge {
                    negative: term.coefficient < 0,
                })
            }
        }
    }
    Ok(out)
}

fn factor_out(
    terms: Vec<Radical>,
    denominator: Int,
) -> std::result::Result<(Vec<Radical>, Int), Notation> {
    if denominator == 0 {
        return Err(Notation::Undefined);
    }
    let coefficients: Vec<Int> = terms.iter().map(|t| t.coefficient).collect();
    let common = ints::gcf(&coefficients);
    let shared = common.gcd(&denominator);
    let mut denominator = denominator / shared;
    let mut terms: Vec<Radical> = terms
        .into_iter()
        .map(|t| Radical::new(t.coefficient / shared, t.radicand))
        .collect();
    // Sign lives on the numerator side: a negative denominator flips every
    // term instead.
    if denominator < 0 {
        denominator = match denominator.checked_neg() {
            Some(d) => d,
            None => return Err(Notation::Huge { negative: false }),
        };
        for term in &mut terms {
            match term.coefficient.checked_neg() {
                Some(c) => term.coefficient = c,
                None => return Err(Notation::Huge { negative: false }),
            }
        }
    }
    Ok((terms, denominator))
}

fn combine_like_terms(terms: Vec<Radical>) -> std::result::Result<Vec<Radical>, Notation> {
    let mut combined: Vec<Radical> = Vec::new();
    for term in terms {
        if term.is_zero() {
            continue;
        }
        if let Some(existing) = combined.iter_mut().find(|t| t.radicand == term.radicand) {
            match existing.coefficient.checked_add(term.coefficient) {
                Some(sum) => existing.coefficient = sum,
                None => {
                    return Err(Notation::Huge {
                        negative: existing.coefficient < 0,
                    })
                }
            }
        } else {
            combined.push(term);
        }
    }
    combined.retain(|t| !t.is_zero());
    combined.sort_by(|a, b| b.radicand.cmp(&a.radicand));
    Ok(combined)
}

/// Move a canonical term list down the lattice to the simplest shape that
/// holds it exactly.
fn demote(terms: Vec<Radical>, denominator: Int) -> Notation {
    match terms.as_slice() {
        [] => Notation::Number(0),
        [term] if term.is_rational() => {
            if denominator == 1 {
                Notation::Number(term.coefficient)
            } else {
                Notation::fraction(term.coefficient, denominator)
            }
        }
        [term] if term.radicand == -1 => {
            if denominator == 1 {
                Notation::imaginary(term.coefficient)
            } else {
                Notation::RadicalFraction {
                    numerator: *term,
                    denominator,
                }
            }
        }
        [term] => {
            if denominator == 1 {
                Notation::Radical(*term)
            } else {
                Notation::RadicalFraction {
                    numerator: *term,
                    denominator,
                }
            }
        }
        [real, imaginary]
            if denominator == 1 && real.is_rational() && imaginary.radicand == -1 =>
        {
            Notation::complex(real.coefficient, imaginary.coefficient)
        }
        _ => Notation::Algebraic(Algebraic::new(terms, denominator)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alg(terms: Vec<(Int, Int)>, denominator: Int) -> Algebraic {
        Algebraic::new(
            terms.into_iter().map(|(c, r)| Radical::new(c, r)).collect(),
            denominator,
        )
    }

    #[test]
    fn term_mul_folds_imaginary_pairs() {
        // (2i√3)(5i√7) = -10√21
        let product = term_mul(&Radical::new(2, -3), &Radical::new(5, -7)).unwrap();
        assert_eq!(product, Radical::new(-10, 21));
        // (2√3)(5i√7) = 10i√21
        let product = term_mul(&Radical::new(2, 3), &Radical::new(5, -7)).unwrap();
        assert_eq!(product, Radical::new(10, -21));
    }

    #[test]
    fn add_cross_multiplies_denominators() {
        let a = alg(vec![(1, 2)], 2);
        let b = alg(vec![(1, 3)], 3);
        let sum = a.add(&b);
        assert_eq!(
            sum,
            Notation::Algebraic(alg(vec![(3, 2), (2, 3)], 6))
        );
    }

    #[test]
    fn conjugate_flips_only_last_term() {
        let a = alg(vec![(1, 2), (3, 5)], 1);
        assert_eq!(a.conjugate(), alg(vec![(1, 2), (-3, 5)], 1));
    }

    #[test]
    fn two_term_divisor_rationalizes() {
        // 1 / (√2 + 1) = √2 - 1
        let one = alg(vec![(1, 1)], 1);
        let divisor = alg(vec![(1, 2), (1, 1)], 1);
        let quotient = one.div(&divisor).unwrap().simplified();
        assert_eq!(
            quotient,
            Notation::Algebraic(alg(vec![(1, 2), (-1, 1)], 1))
        );
    }

    #[test]
    fn like_term_divisor_collapses_before_rationalizing() {
        // 1 / (√2 + √2) = √2 / 4
        let one = alg(vec![(1, 1)], 1);
        let divisor = alg(vec![(1, 2), (1, 2)], 1);
        let quotient = one.div(&divisor).unwrap().simplified();
        assert_eq!(quotient, Notation::radical_fraction(1, 2, 4));
    }

    #[test]
    fn wide_divisor_is_unsupported() {
        let one = alg(vec![(1, 1)], 1);
        let divisor = alg(vec![(1, 2), (1, 3), (1, 5)], 1);
        assert!(one.div(&divisor).is_err());
    }

    #[test]
    fn simplified_reduces_after_combination() {
        // (2√2 + 3√2) / 5 = √2
        let a = alg(vec![(2, 2), (3, 2)], 5);
        assert_eq!(a.simplified(), Notation::radical(1, 2));
    }
}
