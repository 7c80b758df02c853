use surd::{Notation, Radical};

fn assert_canonical(value: Notation, expected: Notation) {
    let simplified = value.simplified();
    assert_eq!(simplified, expected);
    // canonicalization is idempotent
    assert_eq!(simplified.simplified(), simplified);
}

#[test]
fn fraction_reduces_to_lowest_terms() {
    assert_canonical(Notation::fraction(3, 9), Notation::fraction(1, 3));
    assert_canonical(Notation::fraction(6, 3), Notation::Number(2));
    assert_canonical(Notation::fraction(0, 7), Notation::Number(0));
}

#[test]
fn fraction_sign_moves_to_the_numerator() {
    assert_canonical(Notation::fraction(2, -4), Notation::fraction(-1, 2));
    assert_canonical(Notation::fraction(-2, -4), Notation::fraction(1, 2));
}

#[test]
fn fraction_with_zero_denominator_is_undefined() {
    assert_canonical(Notation::fraction(5, 0), Notation::Undefined);
    assert_canonical(Notation::fraction(0, 0), Notation::Undefined);
}

#[test]
fn radical_extracts_square_factors() {
    assert_canonical(Notation::radical(1, 8), Notation::radical(2, 2));
    assert_canonical(Notation::radical(3, 12), Notation::radical(6, 3));
    assert_canonical(Notation::radical(1, 49), Notation::Number(7));
    assert_canonical(Notation::radical(2, 1), Notation::Number(2));
    assert_canonical(Notation::radical(0, 5), Notation::Number(0));
    assert_canonical(Notation::radical(3, 0), Notation::Number(0));
}

#[test]
fn negative_radicand_demotes_to_imaginary() {
    assert_canonical(Notation::radical(1, -4), Notation::imaginary(2));
    assert_canonical(Notation::radical(1, -1), Notation::imaginary(1));
    assert_canonical(Notation::radical(1, -8), Notation::radical(2, -2));
}

#[test]
fn radical_fraction_reduces_both_layers() {
    // 2√8 / 4 = 4√2 / 4 = √2
    assert_canonical(Notation::radical_fraction(2, 8, 4), Notation::radical(1, 2));
    // √4 / 2 = 1
    assert_canonical(Notation::radical_fraction(1, 4, 2), Notation::Number(1));
    // 4𝑖 / 6 = 2𝑖 / 3
    assert_canonical(
        Notation::radical_fraction(4, -1, 6),
        Notation::radical_fraction(2, -1, 3),
    );
    assert_canonical(Notation::radical_fraction(1, 2, 0), Notation::Undefined);
}

#[test]
fn complex_demotes_when_a_part_vanishes() {
    assert_canonical(Notation::complex(3, 0), Notation::Number(3));
    assert_canonical(Notation::complex(0, 4), Notation::imaginary(4));
    assert_canonical(Notation::complex(3, 4), Notation::complex(3, 4));
    assert_canonical(Notation::imaginary(0), Notation::Number(0));
}

#[test]
fn square_free_radicand_keeps_its_sign() {
    assert_eq!(
        surd::square_free(Radical::new(1, -12)),
        Some(Radical::new(2, -3))
    );
}

#[test]
fn reduce_ratio_leaves_coprime_pairs_alone() {
    assert_eq!(surd::reduce_ratio(3, 7), Some((3, 7)));
    assert_eq!(surd::reduce_ratio(-3, 7), Some((-3, 7)));
    assert_eq!(surd::reduce_ratio(4, 0), None);
}

#[test]
fn int_min_inputs_simplify_without_panicking() {
    use surd::Int;
    assert_eq!(Notation::fraction(0, Int::MIN).simplified(), Notation::Number(0));
    assert_eq!(
        Notation::fraction(Int::MIN, Int::MIN).simplified(),
        Notation::Number(1)
    );
    let value = Notation::Number(Int::MIN)
        .add(&Notation::radical(1, 2))
        .simplified();
    assert!(!value.is_sentinel());
}

#[test]
fn sentinels_simplify_to_themselves() {
    for value in [
        Notation::Undefined,
        Notation::Huge { negative: true },
        Notation::Tiny { negative: false },
        Notation::NotEnoughInfo,
    ] {
        assert_eq!(value.simplified(), value);
    }
}
