use surd::{clean_expr, solve_algebraic, Algebraic, Notation, Radical};

fn alg(terms: Vec<(i64, i64)>, denominator: i64) -> Notation {
    Notation::Algebraic(Algebraic::new(
        terms.into_iter().map(|(c, r)| Radical::new(c, r)).collect(),
        denominator,
    ))
}

#[test]
fn single_terms_read_into_radical_form() {
    assert_eq!(solve_algebraic("7").unwrap(), alg(vec![(7, 1)], 1));
    assert_eq!(solve_algebraic("-3").unwrap(), alg(vec![(-3, 1)], 1));
    assert_eq!(solve_algebraic("√2").unwrap(), alg(vec![(1, 2)], 1));
    assert_eq!(solve_algebraic("3√5").unwrap(), alg(vec![(3, 5)], 1));
    assert_eq!(solve_algebraic("-√2").unwrap(), alg(vec![(-1, 2)], 1));
}

#[test]
fn imaginary_marker_negates_the_radicand() {
    assert_eq!(solve_algebraic("7i√2").unwrap(), alg(vec![(7, -2)], 1));
    assert_eq!(solve_algebraic("i").unwrap(), alg(vec![(1, -1)], 1));
    assert_eq!(solve_algebraic("-2𝑖").unwrap(), alg(vec![(-2, -1)], 1));
}

#[test]
fn evaluation_is_left_to_right() {
    // no precedence: (2+3)*4
    let value = solve_algebraic("2+3*4").unwrap().simplified();
    assert_eq!(value, Notation::Number(20));
    let value = solve_algebraic("10-4/2").unwrap().simplified();
    assert_eq!(value, Notation::Number(3));
}

#[test]
fn like_radicals_combine_during_the_fold() {
    let value = solve_algebraic("√2+√2").unwrap();
    assert_eq!(value, alg(vec![(2, 2)], 1));
    let value = solve_algebraic("√8+√2").unwrap();
    assert_eq!(value, alg(vec![(3, 2)], 1));
}

#[test]
fn division_rationalizes_or_reports() {
    let value = solve_algebraic("1/√2").unwrap().simplified();
    assert_eq!(value, Notation::radical_fraction(1, 2, 2));
    assert!(solve_algebraic("1/0").unwrap().simplified() == Notation::Undefined);
}

#[test]
fn glyph_variants_normalize() {
    assert_eq!(
        solve_algebraic("2×3").unwrap().simplified(),
        Notation::Number(6)
    );
    assert_eq!(
        solve_algebraic("6÷3").unwrap().simplified(),
        Notation::Number(2)
    );
    assert_eq!(clean_expr("1 + 2"), "1+2");
}

#[test]
fn malformed_input_is_a_parse_error() {
    assert!(solve_algebraic("").is_err());
    assert!(solve_algebraic("2+").is_err());
    assert!(solve_algebraic("√").is_err());
    assert!(solve_algebraic("2$3").is_err());
}
