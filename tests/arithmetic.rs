//! Property-based tests checking continued fraction arithmetic against `Ratio`.

use proptest::prelude::*;

use num_cfrac::{apply, apply_with, ArithmeticError, ContinuedFraction, Fixpoint, GosperConfig, Operator};
use num_rational::Ratio;
use num_traits::Zero;
use std::cmp::Ordering;

fn ratio_strategy() -> impl Strategy<Value = Ratio<i64>> {
    (-1000i64..1000, 1i64..1000).prop_map(|(n, d)| Ratio::new(n, d))
}

/// Operands large enough that the engine's cross products leave the 32-bit range
fn wide_ratio_strategy() -> impl Strategy<Value = Ratio<i64>> {
    (-(1i64 << 30)..(1i64 << 30), 1i64..(1i64 << 30)).prop_map(|(n, d)| Ratio::new(n, d))
}

fn full_ratio_strategy() -> impl Strategy<Value = Ratio<i64>> {
    let numer = prop_oneof![
        Just(i64::MIN),
        Just(i64::MIN + 1),
        Just(i64::MAX),
        Just(0i64),
        Just(1i64),
        Just(-1i64),
        any::<i64>(),
    ];
    let denom = prop_oneof![Just(1i64), Just(i64::MAX), Just(i64::MAX - 1), 1i64..=i64::MAX];
    (numer, denom).prop_map(|(n, d)| Ratio::new(n, d))
}

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Sub),
        Just(Operator::Mul),
        Just(Operator::Div),
    ]
}

fn cf(q: Ratio<i64>) -> ContinuedFraction<u64> {
    ContinuedFraction::from(q)
}

fn widen(c: &ContinuedFraction<u64>) -> ContinuedFraction<u128> {
    ContinuedFraction::new(c.coeffs().iter().map(|&v| u128::from(v)).collect(), c.is_negative())
}

/// `a op b` evaluated in i128, where no operation on i64 operands overflows
fn exact(op: Operator, a: Ratio<i64>, b: Ratio<i64>) -> ContinuedFraction<u128> {
    let a = Ratio::new(i128::from(*a.numer()), i128::from(*a.denom()));
    let b = Ratio::new(i128::from(*b.numer()), i128::from(*b.denom()));
    let r = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => a / b,
    };
    ContinuedFraction::from(r)
}

#[test]
fn literal_arithmetic_scenario() {
    let a = cf(Ratio::new(6, 11));
    let b = cf(Ratio::new(4, 5));

    assert_eq!(apply(Operator::Add, &a, &b), Ok(cf(Ratio::new(74, 55))));
    assert_eq!(apply(Operator::Sub, &a, &b), Ok(cf(Ratio::new(-14, 55))));
    assert_eq!(apply(Operator::Mul, &a, &b), Ok(cf(Ratio::new(24, 55))));
    assert_eq!(apply(Operator::Div, &a, &b), Ok(cf(Ratio::new(15, 22))));

    assert_eq!(format!("{}", &a + &b), "[ 1; 2, 1, 8, 2 ]");
    assert_eq!(format!("{}", &a - &b), "- [ 0; 3, 1, 13 ]");
    assert_eq!(format!("{}", &a * &b), "[ 0; 2, 3, 2, 3 ]");
    assert_eq!(format!("{}", &a / &b), "[ 0; 1, 2, 7 ]");
}

#[test]
fn division_by_zero_is_reported() {
    let a = cf(Ratio::new(6, 11));
    let zero = ContinuedFraction::zero();
    assert_eq!(apply(Operator::Div, &a, &zero), Err(ArithmeticError::DivisionByZero));
    assert_eq!(apply(Operator::Mul, &a, &zero), Ok(ContinuedFraction::zero()));
}

#[test]
fn iteration_limit_is_reported() {
    let a = cf(Ratio::new(355, 113));
    let b = cf(Ratio::new(103993, 33102));
    let config = GosperConfig::default().with_max_iterations(3);
    assert!(matches!(
        apply_with(&config, Operator::Mul, &a, &b),
        Err(ArithmeticError::NonTerminating { .. })
    ));
    assert!(apply_with(&GosperConfig::default(), Operator::Mul, &a, &b).is_ok());
}

#[test]
fn extreme_operands() {
    let max = ContinuedFraction::<u64>::from(i64::MAX);
    let n_max = ContinuedFraction::<u64>::from(-i64::MAX);
    let min = ContinuedFraction::<u64>::from(i64::MIN);
    let one = ContinuedFraction::<u64>::from(1i64);
    let n_one = ContinuedFraction::<u64>::from(-1i64);

    assert_eq!(apply(Operator::Sub, &max, &one), Ok(ContinuedFraction::from(i64::MAX - 1)));
    assert_eq!(apply(Operator::Mul, &n_max, &n_one), Ok(max.clone()));
    assert_eq!(apply(Operator::Div, &max, &max), Ok(one.clone()));
    assert_eq!(apply(Operator::Sub, &max, &max), Ok(ContinuedFraction::zero()));
    assert_eq!(apply(Operator::Add, &n_max, &max), Ok(ContinuedFraction::zero()));

    assert_eq!(apply(Operator::Add, &max, &one), Err(ArithmeticError::Overflow));
    assert_eq!(apply(Operator::Sub, &n_max, &max), Err(ArithmeticError::Overflow));
    for &op in &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div] {
        assert_eq!(apply(op, &min, &one), Err(ArithmeticError::Overflow), "{}", op);
        assert_eq!(apply(op, &one, &min), Err(ArithmeticError::Overflow), "{}", op);
    }

    let x = cf(Ratio::new(3_000_000_007, 2_000_000_011));
    assert_eq!(apply(Operator::Div, &x, &x), Ok(one));
    assert_eq!(apply(Operator::Sub, &x, &x), Ok(ContinuedFraction::zero()));
}

#[cfg(feature = "num-bigint")]
#[test]
fn bigint_arithmetic() {
    use num_bigint::{BigInt, BigUint};

    let big = BigInt::from(2u8).pow(100u32);
    let a: ContinuedFraction<BigUint> = ContinuedFraction::from(Ratio::new(big.clone() + 1, BigInt::from(3)));
    let b: ContinuedFraction<BigUint> = ContinuedFraction::from(Ratio::new(BigInt::from(-7), big.clone()));

    let expected = Ratio::new(big.clone() + 1, BigInt::from(3)) * Ratio::new(BigInt::from(-7), big);
    assert_eq!((&a * &b).to_rational(), expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn rational_round_trip(q in ratio_strategy()) {
        prop_assert_eq!(cf(q).to_rational(), q);
    }

    #[test]
    fn text_round_trip(q in ratio_strategy()) {
        let c = cf(q);
        prop_assert_eq!(c.to_string().parse::<ContinuedFraction<u64>>(), Ok(c));
    }

    #[test]
    fn add_matches_ratio(a in ratio_strategy(), b in ratio_strategy()) {
        prop_assert_eq!(apply(Operator::Add, &cf(a), &cf(b)), Ok(cf(a + b)));
    }

    #[test]
    fn sub_matches_ratio(a in ratio_strategy(), b in ratio_strategy()) {
        prop_assert_eq!(apply(Operator::Sub, &cf(a), &cf(b)), Ok(cf(a - b)));
    }

    #[test]
    fn mul_matches_ratio(a in ratio_strategy(), b in ratio_strategy()) {
        prop_assert_eq!(apply(Operator::Mul, &cf(a), &cf(b)), Ok(cf(a * b)));
    }

    #[test]
    fn div_matches_ratio(a in ratio_strategy(), b in ratio_strategy()) {
        prop_assume!(!b.is_zero());
        prop_assert_eq!(apply(Operator::Div, &cf(a), &cf(b)), Ok(cf(a / b)));
    }

    #[test]
    fn wide_add_matches_ratio(a in wide_ratio_strategy(), b in wide_ratio_strategy()) {
        prop_assert_eq!(apply(Operator::Add, &cf(a), &cf(b)), Ok(cf(a + b)));
    }

    #[test]
    fn wide_sub_matches_ratio(a in wide_ratio_strategy(), b in wide_ratio_strategy()) {
        prop_assert_eq!(apply(Operator::Sub, &cf(a), &cf(b)), Ok(cf(a - b)));
    }

    #[test]
    fn wide_mul_matches_ratio(a in wide_ratio_strategy(), b in wide_ratio_strategy()) {
        prop_assert_eq!(apply(Operator::Mul, &cf(a), &cf(b)), Ok(cf(a * b)));
    }

    #[test]
    fn wide_div_matches_ratio(a in wide_ratio_strategy(), b in wide_ratio_strategy()) {
        prop_assume!(!b.is_zero());
        prop_assert_eq!(apply(Operator::Div, &cf(a), &cf(b)), Ok(cf(a / b)));
    }

    #[test]
    fn full_range_is_exact_or_overflow(
        op in operator_strategy(),
        a in full_ratio_strategy(),
        b in full_ratio_strategy(),
    ) {
        prop_assume!(op != Operator::Div || !b.is_zero());
        match apply(op, &cf(a), &cf(b)) {
            Ok(c) => prop_assert_eq!(widen(&c), exact(op, a, b)),
            Err(e) => prop_assert_eq!(e, ArithmeticError::Overflow),
        }
    }

    #[test]
    fn scalar_ops_match_ratio(a in ratio_strategy(), k in -50i64..50) {
        prop_assert_eq!(cf(a) + k, cf(a + k));
        prop_assert_eq!(cf(a) - k, cf(a - k));
        prop_assert_eq!(cf(a) * k, cf(a * k));
        if k != 0 {
            prop_assert_eq!(cf(a) / k, cf(a / k));
        }
    }

    #[test]
    fn add_commutative(a in ratio_strategy(), b in ratio_strategy()) {
        prop_assert_eq!(&cf(a) + &cf(b), &cf(b) + &cf(a));
    }

    #[test]
    fn fixpoints_match_ratio(q in ratio_strategy()) {
        let c = cf(q);
        prop_assert_eq!(c.cmp_fixpoint(Fixpoint::Zero), q.cmp(&Ratio::from(0)));
        prop_assert_eq!(c.cmp_fixpoint(Fixpoint::One), q.cmp(&Ratio::from(1)));
        prop_assert_eq!(c.cmp_fixpoint(Fixpoint::NegativeOne), q.cmp(&Ratio::from(-1)));
        prop_assert_eq!(c.is_zero(), q.cmp(&Ratio::from(0)) == Ordering::Equal);
    }
}
