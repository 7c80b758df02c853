//! surd: an exact-arithmetic engine for school-level algebra.
//!
//! Values live in a single tagged union, [`Notation`], covering integers,
//! fractions, radicals, imaginary and complex numbers, sums of radicals, and
//! the out-of-band results `Undefined`, `Huge`, `Tiny` and `NotEnoughInfo`.
//! Arithmetic never panics and never raises where a value will do; overflow
//! saturates into `Huge`/`Tiny` and indeterminate forms come back as
//! `NotEnoughInfo`.
//!
//! ```
//! use surd::solve_algebraic;
//!
//! let value = solve_algebraic("1+√2").unwrap();
//! assert_eq!(surd::pretty(&value.simplified()), "√2+1");
//! ```

pub mod algebraic;
pub mod error;
pub mod format;
pub mod ints;
pub mod parser;
pub mod polynomial;
pub mod simplify;
pub mod value;

pub use algebraic::Algebraic;
pub use error::{Result, SurdError};
pub use format::{as_equality, pretty};
pub use ints::{
    common_factors, divisors, gcf, is_prime, lcm, power, prime_factors, smallest_factor, sqrt,
    Checked, Int,
};
pub use parser::{clean_expr, parse_polynomial, solve_algebraic};
pub use polynomial::{
    long_division, synthetic_division, Division, Multiplicand, Polynomial, PolynomialTerm,
};
pub use simplify::{reduce_ratio, square_free};
pub use value::{Notation, Radical};
