//! Single-variable polynomial engine: term collection, synthetic division,
//! and integer-coefficient long division.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Result, SurdError};
use crate::ints::Int;

fn overflow() -> SurdError {
    SurdError::Unsupported("polynomial coefficient overflow".to_string())
}

/// One `variable^degree` factor inside a term.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Multiplicand {
    pub variable: String,
    pub degree: u32,
}

impl Multiplicand {
    pub fn new(variable: impl Into<String>, degree: u32) -> Self {
        Multiplicand {
            variable: variable.into(),
            degree,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PolynomialTerm {
    pub coefficient: Int,
    pub multiplicands: Vec<Multiplicand>,
}

impl PolynomialTerm {
    pub fn new(coefficient: Int, multiplicands: Vec<Multiplicand>) -> Self {
        PolynomialTerm {
            coefficient,
            multiplicands,
        }
    }

    pub fn constant(coefficient: Int) -> Self {
        PolynomialTerm::new(coefficient, Vec::new())
    }

    pub fn monomial(coefficient: Int, variable: &str, degree: u32) -> Self {
        if degree == 0 {
            PolynomialTerm::constant(coefficient)
        } else {
            PolynomialTerm::new(coefficient, vec![Multiplicand::new(variable, degree)])
        }
    }

    pub fn total_degree(&self) -> u32 {
        self.multiplicands.iter().map(|m| m.degree).sum()
    }

    /// Grouping key for like-term combination: the multiplicand list of the
    /// simplified term.
    fn signature(&self) -> Vec<(String, u32)> {
        self.multiplicands
            .iter()
            .map(|m| (m.variable.clone(), m.degree))
            .collect()
    }

    /// Combine repeated variables (degrees add), drop degree-0 factors, sort
    /// factors by descending degree.
    pub fn simplified(&self) -> PolynomialTerm {
        let mut combined: Vec<Multiplicand> = Vec::new();
        for m in &self.multiplicands {
            if let Some(existing) = combined.iter_mut().find(|c| c.variable == m.variable) {
                existing.degree += m.degree;
            } else {
                combined.push(m.clone());
            }
        }
        combined.retain(|m| m.degree > 0);
        combined.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.variable.cmp(&b.variable)));
        PolynomialTerm::new(self.coefficient, combined)
    }

    fn mul(&self, rhs: &PolynomialTerm) -> Result<PolynomialTerm> {
        let coefficient = self
            .coefficient
            .checked_mul(rhs.coefficient)
            .ok_or_else(overflow)?;
        let mut multiplicands = self.multiplicands.clone();
        multiplicands.extend(rhs.multiplicands.iter().cloned());
        Ok(PolynomialTerm::new(coefficient, multiplicands))
    }

    fn negated(&self) -> Result<PolynomialTerm> {
        let coefficient = self.coefficient.checked_neg().ok_or_else(overflow)?;
        Ok(PolynomialTerm::new(coefficient, self.multiplicands.clone()))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Polynomial {
    pub terms: Vec<PolynomialTerm>,
}

/// Quotient/remainder pair from polynomial division.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Division {
    pub quotient: Polynomial,
    pub remainder: Polynomial,
}

impl Polynomial {
    pub fn new(terms: Vec<PolynomialTerm>) -> Self {
        Polynomial { terms }
    }

    pub fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    pub fn constant(value: Int) -> Self {
        if value == 0 {
            Polynomial::zero()
        } else {
            Polynomial::new(vec![PolynomialTerm::constant(value)])
        }
    }

    pub fn monomial(coefficient: Int, variable: &str, degree: u32) -> Self {
        if coefficient == 0 {
            Polynomial::zero()
        } else {
            Polynomial::new(vec![PolynomialTerm::monomial(coefficient, variable, degree)])
        }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.iter().all(|t| t.coefficient == 0)
    }

    pub fn degree(&self) -> Option<u32> {
        self.terms
            .iter()
            .filter(|t| t.coefficient != 0)
            .map(PolynomialTerm::total_degree)
            .max()
    }

    pub fn variables(&self) -> BTreeSet<String> {
        self.terms
            .iter()
            .flat_map(|t| t.multiplicands.iter().map(|m| m.variable.clone()))
            .collect()
    }

    /// Coefficient of the given total degree. Meaningful for single-variable
    /// polynomials in simplified form.
    pub fn coefficient_of(&self, degree: u32) -> Int {
        self.terms
            .iter()
            .filter(|t| t.total_degree() == degree)
            .map(|t| t.coefficient)
            .sum()
    }

    /// Canonical form: simplified terms sorted by descending total degree,
    /// like terms (identical multiplicand signature) combined, zero terms
    /// dropped. Coefficient overflow while combining is an error.
    pub fn simplified(&self) -> Result<Polynomial> {
        let mut combined: Vec<PolynomialTerm> = Vec::new();
        for term in &self.terms {
            let term = term.simplified();
            if term.coefficient == 0 {
                continue;
            }
            if let Some(existing) = combined
                .iter_mut()
                .find(|c| c.signature() == term.signature())
            {
                existing.coefficient = existing
                    .coefficient
                    .checked_add(term.coefficient)
                    .ok_or_else(overflow)?;
            } else {
                combined.push(term);
            }
        }
        combined.retain(|t| t.coefficient != 0);
        combined.sort_by(|a, b| {
            b.total_degree()
                .cmp(&a.total_degree())
                .then_with(|| a.signature().cmp(&b.signature()))
        });
        Ok(Polynomial::new(combined))
    }

    pub fn add(&self, rhs: &Polynomial) -> Result<Polynomial> {
        let mut terms = self.terms.clone();
        terms.extend(rhs.terms.iter().cloned());
        Polynomial::new(terms).simplified()
    }

    pub fn sub(&self, rhs: &Polynomial) -> Result<Polynomial> {
        let mut terms = self.terms.clone();
        for term in &rhs.terms {
            terms.push(term.negated()?);
        }
        Polynomial::new(terms).simplified()
    }

    pub fn mul(&self, rhs: &Polynomial) -> Result<Polynomial> {
        let mut terms = Vec::with_capacity(self.terms.len() * rhs.terms.len());
        for a in &self.terms {
            for b in &rhs.terms {
                terms.push(a.mul(b)?);
            }
        }
        Polynomial::new(terms).simplified()
    }

    pub fn negated(&self) -> Result<Polynomial> {
        let mut terms = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            terms.push(term.negated()?);
        }
        Ok(Polynomial::new(terms))
    }

    /// True when the simplified polynomial is `variable + constant` with a
    /// leading coefficient of exactly 1.
    pub fn is_monic_linear(&self) -> bool {
        match self.simplified() {
            Ok(simplified) => {
                simplified.variables().len() == 1
                    && simplified.degree() == Some(1)
                    && simplified.coefficient_of(1) == 1
            }
            Err(_) => false,
        }
    }

    /// Divide, choosing synthetic division for a monic linear divisor and
    /// long division otherwise.
    pub fn divide(&self, divisor: &Polynomial) -> Result<Division> {
        if divisor.is_monic_linear() {
            synthetic_division(self, divisor)
        } else {
            long_division(self, divisor)
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (index, term) in self.terms.iter().enumerate() {
            let coefficient = term.coefficient;
            if index == 0 {
                if coefficient < 0 {
                    write!(f, "-")?;
                }
            } else if coefficient < 0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let magnitude = (coefficient as i128).unsigned_abs();
            if magnitude != 1 || term.multiplicands.is_empty() {
                write!(f, "{magnitude}")?;
            }
            for m in &term.multiplicands {
                write!(f, "{}", m.variable)?;
                if m.degree != 1 {
                    write!(f, "^{}", m.degree)?;
                }
            }
        }
        Ok(())
    }
}

/// Horner-style division by a monic linear divisor. The divisor must be
/// single-variable, degree exactly 1, leading coefficient exactly 1, and the
/// dividend must use no other variable.
pub fn synthetic_division(numerator: &Polynomial, divisor: &Polynomial) -> Result<Division> {
    let numerator = numerator.simplified()?;
    let divisor = divisor.simplified()?;
    let variable = shared_variable(&numerator, &divisor)?;
    if divisor.degree() != Some(1) {
        return Err(SurdError::InvalidArgument(
            "synthetic division requires a linear divisor".to_string(),
        ));
    }
    if divisor.coefficient_of(1) != 1 {
        return Err(SurdError::InvalidArgument(
            "synthetic division requires a monic divisor".to_string(),
        ));
    }
    let root = -divisor.coefficient_of(0);
    let degree = match numerator.degree() {
        Some(d) => d,
        None => {
            return Ok(Division {
                quotient: Polynomial::zero(),
                remainder: Polynomial::zero(),
            })
        }
    };
    let mut running: Int = 0;
    let mut quotient_terms = Vec::new();
    for d in (1..=degree).rev() {
        running = running
            .checked_add(numerator.coefficient_of(d))
            .ok_or_else(overflow)?;
        if running != 0 {
            quotient_terms.push(PolynomialTerm::monomial(running, &variable, d - 1));
        }
        running = running.checked_mul(root).ok_or_else(overflow)?;
    }
    running = running
        .checked_add(numerator.coefficient_of(0))
        .ok_or_else(overflow)?;
    Ok(Division {
        quotient: Polynomial::new(quotient_terms),
        remainder: Polynomial::constant(running),
    })
}

/// Integer-coefficient long division over one shared variable. A leading
/// coefficient that does not divide evenly stops the loop with the partial
/// quotient and the remaining numerator.
pub fn long_division(numerator: &Polynomial, divisor: &Polynomial) -> Result<Division> {
    let mut remainder = numerator.simplified()?;
    let divisor = divisor.simplified()?;
    if divisor.is_zero() {
        return Err(SurdError::InvalidArgument(
            "division by the zero polynomial".to_string(),
        ));
    }
    let variable = shared_variable(&remainder, &divisor)?;
    let divisor_degree = divisor.degree().unwrap_or(0);
    let divisor_lead = divisor.coefficient_of(divisor_degree);
    let mut quotient = Polynomial::zero();
    while let Some(degree) = remainder.degree() {
        if degree < divisor_degree {
            break;
        }
        let lead = remainder.coefficient_of(degree);
        if divisor_lead == 0 || lead % divisor_lead != 0 {
            break;
        }
        let partial = Polynomial::monomial(lead / divisor_lead, &variable, degree - divisor_degree);
        let next = remainder.sub(&divisor.mul(&partial)?)?;
        quotient = quotient.add(&partial)?;
        if next == remainder {
            break;
        }
        remainder = next;
    }
    Ok(Division {
        quotient,
        remainder,
    })
}

/// The one variable both polynomials may mention. Constants are compatible
/// with anything; two distinct variables are an argument error.
fn shared_variable(a: &Polynomial, b: &Polynomial) -> Result<String> {
    let mut variables = a.variables();
    variables.extend(b.variables());
    match variables.len() {
        0 => Ok("x".to_string()),
        1 => Ok(variables.into_iter().next().unwrap_or_default()),
        _ => Err(SurdError::InvalidArgument(
            "polynomial division requires a single shared variable".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(terms: Vec<(Int, u32)>) -> Polynomial {
        Polynomial::new(
            terms
                .into_iter()
                .map(|(c, d)| PolynomialTerm::monomial(c, "x", d))
                .collect(),
        )
        .simplified()
        .unwrap()
    }

    #[test]
    fn simplified_combines_repeated_variables_in_a_term() {
        // x·x^2 -> x^3
        let term = PolynomialTerm::new(
            2,
            vec![Multiplicand::new("x", 1), Multiplicand::new("x", 2)],
        );
        let simplified = term.simplified();
        assert_eq!(simplified.multiplicands, vec![Multiplicand::new("x", 3)]);
    }

    #[test]
    fn simplified_orders_terms_by_total_degree() {
        let p = poly(vec![(1, 0), (2, 3), (4, 1)]);
        let degrees: Vec<u32> = p.terms.iter().map(PolynomialTerm::total_degree).collect();
        assert_eq!(degrees, vec![3, 1, 0]);
    }

    #[test]
    fn mixed_variables_rejected_by_division() {
        let numerator = Polynomial::monomial(1, "x", 2);
        let divisor = Polynomial::monomial(1, "y", 1);
        assert!(long_division(&numerator, &divisor).is_err());
    }

    #[test]
    fn display_renders_descending() {
        let p = poly(vec![(3, 3), (-13, 2), (28, 1), (-12, 0)]);
        assert_eq!(p.to_string(), "3x^3 - 13x^2 + 28x - 12");
    }
}
