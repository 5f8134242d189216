use numeric::{
    marshal, BinOp, Coercible, Context, FailureKind, Integer, Limits, Numeric, NumericKind, RoundMode, Warning,
};
use num_bigint::{BigInt, Sign};
use pretty_assertions::assert_eq;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use spectral::{assert_that, string::StrAssertions};

fn big(sign: bool, magnitude: &[u8]) -> Integer {
    let sign = if sign { Sign::Minus } else { Sign::Plus };
    Integer::from_big(BigInt::from_bytes_le(sign, magnitude))
}

fn int(s: &str) -> Integer {
    s.parse().unwrap()
}

#[test]
fn word_boundary_promotion() -> anyhow::Result<()> {
    util::setup_logger();
    let max = Integer::from(i64::MAX);
    let min = Integer::from(i64::MIN);

    let above = &max + 1;
    assert!(!above.is_small());
    assert_eq!(above.to_string(), "9223372036854775808");
    assert!((&above - 1).is_small());

    let below = &min - 1;
    assert!(!below.is_small());
    assert!((&below + 1).is_small());

    assert_eq!((-&min).to_string(), "9223372036854775808");
    assert_eq!(min.divmod(&Integer::from(-1))?.0.to_string(), "9223372036854775808");
    assert_eq!((&min * &Integer::from(-1)).to_string(), "9223372036854775808");
    assert!((&(&max * &max) - &(&max * &max)).is_small());
    Ok(())
}

#[test]
fn floored_division_signs() -> anyhow::Result<()> {
    for (a, b, q, r) in [(7, 2, 3, 1), (-7, 2, -4, 1), (7, -2, -4, -1), (-7, -2, 3, -1)] {
        let (dq, dr) = Integer::from(a).divmod(&Integer::from(b))?;
        assert_eq!((dq, dr), (Integer::from(q), Integer::from(r)), "{} divmod {}", a, b);
    }
    let err = Integer::from(1).divmod(&Integer::zero()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::DivisionByZero);
    assert_that(&err.to_string()).contains("divided by 0");
    Ok(())
}

#[test]
fn powers() -> anyhow::Result<()> {
    let mut cx = Context::default();
    assert_eq!(Integer::from(2).pow(&Integer::from(100), &mut cx)?.to_string(), "1267650600228229401496703205376");
    assert_eq!(Integer::from(2).pow(&Integer::from(-3), &mut cx)?.to_string(), "(1/8)");
    assert_eq!(
        Integer::zero().pow(&Integer::from(-1), &mut cx).unwrap_err().kind(),
        FailureKind::DivisionByZero
    );
    assert!(cx.warnings().is_empty());

    let mut tight = Context::new(Limits { pow_bits: 64 });
    let result = Integer::from(3).pow(&Integer::from(100), &mut tight)?;
    assert!(result.is_float());
    assert!(matches!(tight.take_warnings().as_slice(), [Warning::PowMayBeTooBig { .. }]));

    assert_eq!(Integer::from(2).pow_mod(&Integer::from(3), &Integer::from(5))?, Integer::from(3));
    assert_eq!(Integer::from(2).pow_mod(&Integer::from(3), &Integer::from(-5))?, Integer::from(-2));
    assert_eq!(
        int("12345678901234567890").pow_mod(&int("98765432109876543210"), &int("1000000007"))?,
        Integer::from(577648646)
    );
    assert_eq!(
        Integer::from(2).pow_mod(&Integer::from(-1), &Integer::from(5)).unwrap_err().kind(),
        FailureKind::DomainError
    );
    Ok(())
}

#[test]
fn rounding_ties() {
    let x = Integer::from(-25);
    assert_eq!(x.round(-1, RoundMode::HalfUp), Integer::from(-30));
    assert_eq!(x.round(-1, RoundMode::HalfDown), Integer::from(-20));
    assert_eq!(x.round(-1, RoundMode::HalfEven), Integer::from(-20));
    assert_eq!(x.round(1, RoundMode::HalfEven), x);
}

#[test]
fn marshal_boundaries() -> anyhow::Result<()> {
    let edges = [
        Integer::from((1i64 << 30) - 1),
        Integer::from(1i64 << 30),
        Integer::from(-(1i64 << 30)),
        Integer::from(-(1i64 << 30) - 1),
        Integer::from(i64::MAX),
        Integer::from(i64::MIN),
        &Integer::from(i64::MAX) + 1,
        &Integer::from(i64::MIN) - 1,
    ];
    for x in edges {
        let bytes = marshal::dump(&x)?;
        assert_eq!(marshal::load(&bytes)?, x);
    }
    assert_eq!(marshal::dump(&Integer::from(1i64 << 30))?[0], b'l');
    assert_eq!(marshal::dump(&Integer::from(-(1i64 << 30)))?[0], b'i');
    Ok(())
}

/// A unit of currency that turns into a rational when mixed with numbers.
#[derive(Debug)]
struct Cents(i64);

impl Coercible for Cents {
    fn kind(&self) -> NumericKind {
        NumericKind::Other("Cents")
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.0 as f64 / 100.0)
    }

    fn coerce(&self, other: &Numeric) -> Option<(Numeric, Numeric)> {
        let me = format!("({}/100)", self.0).parse().ok()?;
        match other {
            Numeric::Integer(_) | Numeric::Rational(_) => Some((other.clone(), me)),
            _ => None,
        }
    }
}

#[test]
fn foreign_coercion() -> anyhow::Result<()> {
    let mut cx = Context::default();
    let cents = Numeric::foreign(Cents(250));
    let sum = Numeric::from(1).binop(BinOp::Add, &cents, &mut cx)?;
    assert_eq!(sum.to_string(), "(7/2)");

    let err = Numeric::Float(1.0).binop(BinOp::Add, &cents, &mut cx).unwrap_err();
    assert_eq!(err.kind(), FailureKind::CoercionFailure);
    assert_that(&err.to_string()).contains("Cents can't be coerced into Float");
    Ok(())
}

#[quickcheck]
fn promotion_matches_bigint(a: i64, b: i64) -> bool {
    let (x, y) = (Integer::from(a), Integer::from(b));
    let (ba, bb) = (BigInt::from(a), BigInt::from(b));
    (&x + &y) == Integer::from_big(&ba + &bb)
        && (&x - &y) == Integer::from_big(&ba - &bb)
        && (&x * &y) == Integer::from_big(&ba * &bb)
}

#[quickcheck]
fn floored_division(sa: bool, a: Vec<u8>, sb: bool, b: Vec<u8>) -> TestResult {
    let (x, y) = (big(sa, &a), big(sb, &b));
    if y.is_zero() {
        return TestResult::discard();
    }
    let (q, r) = match x.divmod(&y) {
        Ok(qr) => qr,
        Err(_) => return TestResult::failed(),
    };
    let recombines = &(&q * &y) + &r == x;
    let sign_ok = r.is_zero() || r.is_negative() == y.is_negative();
    TestResult::from_bool(recombines && sign_ok && r.abs() < y.abs())
}

#[quickcheck]
fn normalization_is_canonical(sign: bool, magnitude: Vec<u8>) -> bool {
    let x = big(sign, &magnitude);
    let fits = i64::try_from(x.to_bigint()).is_ok();
    x.is_small() == fits && x.clone().normalize() == x
}

#[quickcheck]
fn marshal_roundtrip(sign: bool, magnitude: Vec<u8>) -> bool {
    let x = big(sign, &magnitude);
    marshal::dump(&x).ok().and_then(|bytes| marshal::load(&bytes).ok()) == Some(x)
}

#[quickcheck]
fn shifts_match_bigint(a: i64, n: u8) -> bool {
    let n = i64::from(n % 130);
    let x = Integer::from(a);
    let left = x.shl(&Integer::from(n)).ok() == Some(Integer::from_big(BigInt::from(a) << n as usize));
    let right = x.shr(&Integer::from(n)).ok() == Some(Integer::from_big(BigInt::from(a) >> n as usize));
    left && right
}

#[quickcheck]
fn mixed_comparison_is_antisymmetric(a: i64, f: f64) -> TestResult {
    if f.is_nan() {
        return TestResult::discard();
    }
    let (x, y) = (Numeric::from(a), Numeric::Float(f));
    TestResult::from_bool(x.partial_cmp(&y).map(|o| o.reverse()) == y.partial_cmp(&x))
}
