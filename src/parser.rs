//! Text front ends: the algebraic expression reader and the polynomial
//! reader.
//!
//! The expression reader evaluates strictly left to right over the token
//! stream; there is no operator precedence. Callers are expected to have
//! linearized any grouping beforehand.

use nom::character::complete::{char, digit1, one_of, satisfy};
use nom::combinator::{all_consuming, opt};
use nom::error::{ErrorKind, ParseError, VerboseError};
use nom::multi::many0;
use nom::sequence::{pair, preceded};
use nom::IResult;

use crate::algebraic::Algebraic;
use crate::error::{Result, SurdError};
use crate::ints::Int;
use crate::polynomial::{Multiplicand, Polynomial, PolynomialTerm};
use crate::value::{Notation, Radical};

type PResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

fn fail<T>(input: &str) -> PResult<'_, T> {
    Err(nom::Err::Error(VerboseError::from_error_kind(
        input,
        ErrorKind::Verify,
    )))
}

/// Normalize raw input ahead of tokenizing: strip whitespace, unify the
/// multiply and divide glyphs, expand implied multiplication (`)(`, `)5`,
/// `5(`), and rewrite superscript exponents into caret notation.
pub fn clean_expr(input: &str) -> String {
    let mut normalized = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {}
            '×' | '∙' | '·' => normalized.push('*'),
            '÷' => normalized.push('/'),
            c if superscript_value(c).is_some() || c == '⁻' => {
                normalized.push('^');
                if c == '⁻' {
                    normalized.push('-');
                } else if let Some(digit) = superscript_value(c) {
                    normalized.push(digit);
                }
                while let Some(&next) = chars.peek() {
                    match superscript_value(next) {
                        Some(digit) => {
                            normalized.push(digit);
                            chars.next();
                        }
                        None => break,
                    }
                }
            }
            c => normalized.push(c),
        }
    }
    let mut expanded = String::with_capacity(normalized.len());
    let mut previous: Option<char> = None;
    for ch in normalized.chars() {
        if let Some(prev) = previous {
            let implied = (prev == ')' && (ch == '(' || ch.is_ascii_digit()))
                || (prev.is_ascii_digit() && ch == '(');
            if implied {
                expanded.push('*');
            }
        }
        expanded.push(ch);
        previous = Some(ch);
    }
    expanded
}

fn superscript_value(c: char) -> Option<char> {
    match c {
        '⁰' => Some('0'),
        '¹' => Some('1'),
        '²' => Some('2'),
        '³' => Some('3'),
        '⁴' => Some('4'),
        '⁵' => Some('5'),
        '⁶' => Some('6'),
        '⁷' => Some('7'),
        '⁸' => Some('8'),
        '⁹' => Some('9'),
        _ => None,
    }
}

/// One term: optional signed coefficient, optional imaginary marker,
/// optional `√` with a signed radicand. At least one of the three parts must
/// be present. The imaginary marker folds into the radicand's sign.
fn parse_term(input: &str) -> PResult<'_, Radical> {
    let (rest, sign) = opt(one_of("+-"))(input)?;
    let (rest, digits) = opt(digit1)(rest)?;
    let (rest, marker) = opt(one_of("i𝑖ⅈ"))(rest)?;
    let (rest, root) = opt(preceded(char('√'), pair(opt(one_of("+-")), digit1)))(rest)?;
    if digits.is_none() && marker.is_none() && root.is_none() {
        return fail(input);
    }
    let mut coefficient: Int = match digits {
        Some(text) => match text.parse() {
            Ok(value) => value,
            Err(_) => return fail(input),
        },
        None => 1,
    };
    if sign == Some('-') {
        coefficient = -coefficient;
    }
    let mut radicand: Int = match root {
        Some((root_sign, text)) => {
            let value: Int = match text.parse() {
                Ok(value) => value,
                Err(_) => return fail(input),
            };
            if root_sign == Some('-') {
                -value
            } else {
                value
            }
        }
        None => 1,
    };
    if marker.is_some() && radicand != 0 {
        if radicand > 0 {
            radicand = -radicand;
        } else {
            // i·√(-r) = i·i·√r = -√r
            coefficient = -coefficient;
            radicand = -radicand;
        }
    }
    Ok((rest, Radical::new(coefficient, radicand)))
}

fn parse_expression(input: &str) -> PResult<'_, (Radical, Vec<(char, Radical)>)> {
    pair(parse_term, many0(pair(one_of("+-*/"), parse_term)))(input)
}

/// Read a cleaned expression into a value, folding strictly left to right.
/// After every step the accumulator's terms are re-run through term
/// simplification and like-term combination, but not full simplification, so
/// an unresolved denominator survives across the fold.
pub fn solve_algebraic(input: &str) -> Result<Notation> {
    let cleaned = clean_expr(input);
    let (first, rest) = match all_consuming(parse_expression)(cleaned.as_str()) {
        Ok((_, parsed)) => parsed,
        Err(e) => return Err(SurdError::Parse(format!("{e:?}"))),
    };
    let mut accumulator = Algebraic::from_term(first).combined();
    for (operator, term) in rest {
        let rhs = Notation::Algebraic(Algebraic::from_term(term));
        accumulator = match operator {
            '+' => accumulator.add(&rhs),
            '-' => accumulator.sub(&rhs),
            '*' => accumulator.mul(&rhs),
            '/' => accumulator.div(&rhs)?,
            _ => unreachable!(),
        };
        accumulator = match accumulator {
            Notation::Algebraic(a) => a.combined(),
            other => other,
        };
    }
    Ok(accumulator)
}

fn parse_multiplicand(input: &str) -> PResult<'_, Multiplicand> {
    let (rest, _) = opt(char('*'))(input)?;
    let (rest, letter) = satisfy(|c: char| c.is_ascii_alphabetic())(rest)?;
    let (rest, degree) = opt(preceded(char('^'), digit1))(rest)?;
    let degree: u32 = match degree {
        Some(text) => match text.parse() {
            Ok(value) => value,
            Err(_) => return fail(input),
        },
        None => 1,
    };
    Ok((rest, Multiplicand::new(letter, degree)))
}

/// A parsed coefficient of zero yields no term.
fn poly_term_body(input: &str, negative: bool) -> PResult<'_, Option<PolynomialTerm>> {
    let (rest, digits) = opt(digit1)(input)?;
    let (rest, multiplicands) = many0(parse_multiplicand)(rest)?;
    if digits.is_none() && multiplicands.is_empty() {
        return fail(input);
    }
    let mut coefficient: Int = match digits {
        Some(text) => match text.parse() {
            Ok(value) => value,
            Err(_) => return fail(input),
        },
        None => 1,
    };
    if negative {
        coefficient = -coefficient;
    }
    if coefficient == 0 {
        return Ok((rest, None));
    }
    Ok((rest, Some(PolynomialTerm::new(coefficient, multiplicands))))
}

fn parse_leading_poly_term(input: &str) -> PResult<'_, Option<PolynomialTerm>> {
    let (rest, sign) = opt(one_of("+-"))(input)?;
    poly_term_body(rest, sign == Some('-'))
}

fn parse_signed_poly_term(input: &str) -> PResult<'_, Option<PolynomialTerm>> {
    let (rest, sign) = one_of("+-")(input)?;
    poly_term_body(rest, sign == '-')
}

fn parse_poly_terms(input: &str) -> PResult<'_, Vec<Option<PolynomialTerm>>> {
    let (rest, first) = parse_leading_poly_term(input)?;
    let (rest, mut others) = many0(parse_signed_poly_term)(rest)?;
    let mut terms = vec![first];
    terms.append(&mut others);
    Ok((rest, terms))
}

/// Read a polynomial such as `3x^3-13x^2+28x-12`. Whitespace and `*`
/// separators are tolerated; the result is in written order, unsimplified.
pub fn parse_polynomial(input: &str) -> Result<Polynomial> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let parsed = all_consuming(parse_poly_terms)(cleaned.as_str());
    match parsed {
        Ok((_, terms)) => Ok(Polynomial::new(terms.into_iter().flatten().collect())),
        Err(e) => Err(SurdError::Parse(format!("{e:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_expr_inserts_implied_multiplication() {
        assert_eq!(clean_expr("2(3)"), "2*(3)");
        assert_eq!(clean_expr("(2)(3)"), "(2)*(3)");
        assert_eq!(clean_expr("(2)3"), "(2)*3");
        assert_eq!(clean_expr(" 2 × 3 "), "2*3");
        assert_eq!(clean_expr("2÷3"), "2/3");
    }

    #[test]
    fn clean_expr_rewrites_superscripts() {
        assert_eq!(clean_expr("x²"), "x^2");
        assert_eq!(clean_expr("x²³"), "x^23");
        assert_eq!(clean_expr("2⁻¹"), "2^-1");
    }

    #[test]
    fn term_reads_all_three_parts() {
        let (rest, term) = parse_term("7i√2").unwrap();
        assert!(rest.is_empty());
        assert_eq!(term, Radical::new(7, -2));
    }

    #[test]
    fn term_requires_some_content() {
        assert!(parse_term("").is_err());
        assert!(parse_term("+").is_err());
    }

    #[test]
    fn imaginary_marker_on_negative_radicand_folds() {
        // i√-2 = i·i·√2 = -√2
        let (_, term) = parse_term("i√-2").unwrap();
        assert_eq!(term, Radical::new(-1, 2));
    }

    #[test]
    fn polynomial_zero_coefficient_drops_term() {
        let p = parse_polynomial("0x^2+3x").unwrap();
        assert_eq!(p.terms.len(), 1);
        assert_eq!(p.terms[0].coefficient, 3);
    }
}
