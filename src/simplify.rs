//! Per-shape canonicalization. Every reduction here funnels through two
//! shared primitives, [`reduce_ratio`] for rational pairs and
//! [`square_free`] for radicands, so Fraction, Radical, RadicalFraction,
//! and the Algebraic factor-out pass all agree on one notion of lowest terms.

use num_integer::Integer;

use crate::ints::{self, Int};
use crate::value::{Notation, Radical};

/// Lowest terms with the sign carried on the numerator. `None` for a zero
/// denominator. At the representable boundary (a post-reduction denominator
/// of `Int::MIN`) the sign stays on the denominator rather than overflowing.
pub fn reduce_ratio(numerator: Int, denominator: Int) -> Option<(Int, Int)> {
    if denominator == 0 {
        return None;
    }
    // Wide gcd: `Integer::gcd` on Int overflows when an operand is Int::MIN
    // and the gcd is 2^63.
    let g = (numerator as i128).gcd(&(denominator as i128));
    let (n, d) = (numerator as i128 / g, denominator as i128 / g);
    if d < 0 {
        match (Int::try_from(-n), Int::try_from(-d)) {
            (Ok(n), Ok(d)) => Some((n, d)),
            _ => Some((n as Int, d as Int)),
        }
    } else {
        Some((n as Int, d as Int))
    }
}

/// Pull every even prime-exponent portion of the radicand into the
/// coefficient, leaving a square-free radicand (sign preserved). `None` on
/// coefficient overflow. The caller screens radicands in {-1, 0, 1}.
pub fn square_free(term: Radical) -> Option<Radical> {
    let mut coefficient = term.coefficient;
    let mut radicand: Int = 1;
    for (prime, exponent) in ints::prime_factors(term.radicand) {
        if prime == -1 {
            radicand = -radicand;
            continue;
        }
        if exponent >= 2 {
            let pulled = ints::checked_power(prime, exponent / 2).exact()?;
            coefficient = coefficient.checked_mul(pulled)?;
        }
        if exponent % 2 == 1 {
            radicand = radicand.checked_mul(prime)?;
        }
    }
    Some(Radical::new(coefficient, radicand))
}

/// Canonical form of one Algebraic term, kept in term shape: zeros collapse
/// to `0√1`, everything else is square-free reduced. `None` on overflow.
pub(crate) fn canonical_term(term: Radical) -> Option<Radical> {
    if term.is_zero() {
        return Some(Radical::new(0, 1));
    }
    if term.radicand == 1 || term.radicand == -1 {
        return Some(term);
    }
    square_free(term)
}

pub(crate) fn simplified(value: &Notation) -> Notation {
    match value {
        Notation::Fraction {
            numerator,
            denominator,
        } => simplify_fraction(*numerator, *denominator),
        Notation::Radical(r) => simplify_radical(*r),
        Notation::RadicalFraction {
            numerator,
            denominator,
        } => simplify_radical_fraction(*numerator, *denominator),
        Notation::Imaginary { coefficient } => simplify_imaginary(*coefficient),
        Notation::Complex { real, imaginary } => simplify_complex(*real, *imaginary),
        Notation::Algebraic(a) => a.simplified(),
        other => other.clone(),
    }
}

fn simplify_fraction(numerator: Int, denominator: Int) -> Notation {
    match reduce_ratio(numerator, denominator) {
        None => Notation::Undefined,
        Some((n, 1)) => Notation::Number(n),
        Some((n, d)) => Notation::fraction(n, d),
    }
}

fn simplify_radical(term: Radical) -> Notation {
    if term.is_zero() {
        return Notation::Number(0);
    }
    match term.radicand {
        1 => return Notation::Number(term.coefficient),
        -1 => return Notation::imaginary(term.coefficient),
        _ => {}
    }
    // A perfect-square radicand folds entirely into the coefficient.
    match ints::sqrt(term.radicand) {
        Notation::Number(root) => {
            return ints::checked_mul(term.coefficient, root).into();
        }
        Notation::Imaginary { coefficient: root } => {
            return match term.coefficient.checked_mul(root) {
                Some(c) => Notation::imaginary(c),
                None => Notation::Huge {
                    negative: term.coefficient < 0,
                },
            };
        }
        _ => {}
    }
    match square_free(term) {
        None => Notation::Huge {
            negative: term.coefficient < 0,
        },
        Some(reduced) => match reduced.radicand {
            1 => Notation::Number(reduced.coefficient),
            -1 => Notation::imaginary(reduced.coefficient),
            _ => Notation::Radical(reduced),
        },
    }
}

fn simplify_radical_fraction(numerator: Radical, denominator: Int) -> Notation {
    if denominator == 0 {
        return Notation::Undefined;
    }
    if denominator == 1 || denominator == -1 {
        // Absorb the sign and fall through to plain radical reduction.
        return match numerator.coefficient.checked_mul(denominator) {
            Some(c) => simplify_radical(Radical::new(c, numerator.radicand)),
            None => Notation::Huge {
                negative: numerator.coefficient > 0,
            },
        };
    }
    match simplify_radical(numerator) {
        Notation::Number(n) => simplify_fraction(n, denominator),
        Notation::Imaginary { coefficient } => match reduce_ratio(coefficient, denominator) {
            Some((c, 1)) => Notation::imaginary(c),
            Some((c, d)) => Notation::radical_fraction(c, -1, d),
            None => Notation::Undefined,
        },
        Notation::Radical(r) => match reduce_ratio(r.coefficient, denominator) {
            Some((c, 1)) => Notation::Radical(Radical::new(c, r.radicand)),
            Some((c, d)) => Notation::radical_fraction(c, r.radicand, d),
            None => Notation::Undefined,
        },
        sentinel => sentinel,
    }
}

fn simplify_imaginary(coefficient: Int) -> Notation {
    if coefficient == 0 {
        Notation::Number(0)
    } else {
        Notation::imaginary(coefficient)
    }
}

fn simplify_complex(real: Int, imaginary: Int) -> Notation {
    if imaginary == 0 {
        Notation::Number(real)
    } else if real == 0 {
        Notation::imaginary(imaginary)
    } else {
        Notation::complex(real, imaginary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_ratio_normalizes_sign() {
        assert_eq!(reduce_ratio(2, -4), Some((-1, 2)));
        assert_eq!(reduce_ratio(-2, -4), Some((1, 2)));
        assert_eq!(reduce_ratio(0, -7), Some((0, 1)));
        assert_eq!(reduce_ratio(3, 0), None);
    }

    #[test]
    fn reduce_ratio_survives_the_int_min_boundary() {
        assert_eq!(reduce_ratio(0, Int::MIN), Some((0, 1)));
        assert_eq!(reduce_ratio(Int::MIN, Int::MIN), Some((1, 1)));
        assert_eq!(reduce_ratio(Int::MIN, 2), Some((Int::MIN / 2, 1)));
        // the one unrepresentable flip keeps its sign on the denominator
        assert_eq!(reduce_ratio(Int::MIN, -1), Some((Int::MIN, -1)));
    }

    #[test]
    fn square_free_pulls_even_exponents() {
        assert_eq!(square_free(Radical::new(1, 8)), Some(Radical::new(2, 2)));
        assert_eq!(square_free(Radical::new(3, 12)), Some(Radical::new(6, 3)));
        assert_eq!(square_free(Radical::new(1, -8)), Some(Radical::new(2, -2)));
    }

    #[test]
    fn radical_fraction_keeps_imaginary_numerator() {
        // 4i / 6 = 2i / 3
        let reduced = simplify_radical_fraction(Radical::new(4, -1), 6);
        assert_eq!(reduced, Notation::radical_fraction(2, -1, 3));
    }
}
