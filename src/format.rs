//! Rendering. Glyphs are bit-significant for compatibility: `√` for
//! radicals, `𝑖` for the imaginary unit, `∄` for Undefined, `𝓗`/`ε` for the
//! saturation sentinels, `?` for NotEnoughInfo.

use crate::algebraic::Algebraic;
use crate::ints::Int;
use crate::value::{Notation, Radical};

pub fn pretty(value: &Notation) -> String {
    match value {
        Notation::Number(n) => n.to_string(),
        Notation::Fraction {
            numerator,
            denominator,
        } => {
            if *denominator == 1 {
                numerator.to_string()
            } else {
                format!("{numerator}/{denominator}")
            }
        }
        Notation::Radical(r) => radical(r),
        Notation::RadicalFraction {
            numerator,
            denominator,
        } => format!("{}/{}", radical(numerator), denominator),
        Notation::Imaginary { coefficient } => imaginary(*coefficient),
        Notation::Complex { real, imaginary: im } => {
            if *im < 0 {
                format!("{real}-{}", imaginary_magnitude((*im as i128).unsigned_abs()))
            } else {
                format!("{real}+{}", imaginary_magnitude(*im as u128))
            }
        }
        Notation::Algebraic(a) => algebraic(a),
        Notation::Undefined => "∄".to_string(),
        Notation::Huge { negative: false } => "𝓗".to_string(),
        Notation::Huge { negative: true } => "-𝓗".to_string(),
        Notation::Tiny { negative: false } => "ε".to_string(),
        Notation::Tiny { negative: true } => "-ε".to_string(),
        Notation::NotEnoughInfo => "?".to_string(),
    }
}

/// `lhs = value`, with a dedicated phrasing for the undefined sentinel.
pub fn as_equality(lhs: &str, value: &Notation) -> String {
    match value {
        Notation::Undefined => format!("{lhs} is undefined"),
        other => format!("{lhs} = {}", pretty(other)),
    }
}

pub(crate) fn radical(term: &Radical) -> String {
    if term.radicand == 0 {
        return "0".to_string();
    }
    if term.radicand == 1 {
        return term.coefficient.to_string();
    }
    let magnitude = (term.radicand as i128).unsigned_abs();
    if term.radicand < 0 {
        // The coefficient of an imaginary radical renders through the
        // imaginary unit.
        if magnitude == 1 {
            imaginary(term.coefficient)
        } else {
            format!("{}√{magnitude}", imaginary(term.coefficient))
        }
    } else {
        match term.coefficient {
            1 => format!("√{magnitude}"),
            -1 => format!("-√{magnitude}"),
            c => format!("{c}√{magnitude}"),
        }
    }
}

pub(crate) fn algebraic(value: &Algebraic) -> String {
    let mut body = String::new();
    if value.terms.is_empty() {
        body.push('0');
    } else {
        for (index, term) in value.terms.iter().enumerate() {
            let piece = radical(term);
            if index > 0 && !piece.starts_with('-') {
                body.push('+');
            }
            body.push_str(&piece);
        }
    }
    if value.denominator == 1 {
        body
    } else if value.terms.len() > 1 {
        format!("({body})/{}", value.denominator)
    } else {
        format!("{body}/{}", value.denominator)
    }
}

fn imaginary(coefficient: Int) -> String {
    match coefficient {
        1 => "𝑖".to_string(),
        -1 => "-𝑖".to_string(),
        c => format!("{c}𝑖"),
    }
}

fn imaginary_magnitude(magnitude: u128) -> String {
    if magnitude == 1 {
        "𝑖".to_string()
    } else {
        format!("{magnitude}𝑖")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radical_rendering() {
        assert_eq!(radical(&Radical::new(2, 2)), "2√2");
        assert_eq!(radical(&Radical::new(1, 5)), "√5");
        assert_eq!(radical(&Radical::new(-1, 5)), "-√5");
        assert_eq!(radical(&Radical::new(7, -2)), "7𝑖√2");
        assert_eq!(radical(&Radical::new(3, -1)), "3𝑖");
        assert_eq!(radical(&Radical::new(4, 1)), "4");
    }

    #[test]
    fn sentinel_glyphs() {
        assert_eq!(pretty(&Notation::Undefined), "∄");
        assert_eq!(pretty(&Notation::Huge { negative: true }), "-𝓗");
        assert_eq!(pretty(&Notation::Tiny { negative: false }), "ε");
        assert_eq!(pretty(&Notation::NotEnoughInfo), "?");
    }

    #[test]
    fn equality_rendering() {
        assert_eq!(
            as_equality("x", &Notation::fraction(1, 3)),
            "x = 1/3"
        );
        assert_eq!(as_equality("x", &Notation::Undefined), "x is undefined");
    }

    #[test]
    fn algebraic_rendering() {
        let sum = Algebraic::new(vec![Radical::new(1, 2), Radical::new(-1, 1)], 2);
        assert_eq!(algebraic(&sum), "(√2-1)/2");
    }
}
