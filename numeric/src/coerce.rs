use crate::{float, Coercible, Context, Numeric, NumericError, NumericKind, Rational, Result};
use derive_more::Display;
use Numeric as N;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum BinOp {
    #[display(fmt = "+")]
    Add,
    #[display(fmt = "-")]
    Sub,
    #[display(fmt = "*")]
    Mul,
    #[display(fmt = "/")]
    Div,
    #[display(fmt = "div")]
    IntDiv,
    #[display(fmt = "%")]
    Mod,
    #[display(fmt = "**")]
    Pow,
    #[display(fmt = "&")]
    BitAnd,
    #[display(fmt = "|")]
    BitOr,
    #[display(fmt = "^")]
    BitXor,
    #[display(fmt = "<<")]
    Shl,
    #[display(fmt = ">>")]
    Shr,
}

impl BinOp {
    /// Operators defined on integers only.
    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            BinOp::BitAnd | BinOp::BitOr | BinOp::BitXor | BinOp::Shl | BinOp::Shr
        )
    }
}

impl Numeric {
    /// Applies `op`, retrying once through the coercion protocol when the two kinds have no
    /// direct rule.
    pub fn binop(&self, op: BinOp, rhs: &Numeric, cx: &mut Context) -> Result<Numeric> {
        if let Some(res) = direct(op, self, rhs, cx) {
            return res;
        }
        let (a, b) = rhs.coerce(self).ok_or(NumericError::Coercion {
            from: rhs.kind(),
            into: self.kind(),
        })?;
        match direct(op, &a, &b, cx) {
            Some(res) => res,
            None if op.is_bitwise() => Err(not_an_integer(&a, &b)),
            None => Err(NumericError::MalformedCoercion {
                left: a.kind(),
                right: b.kind(),
            }),
        }
    }

    /// Floored quotient and modulus in one go.
    pub fn divmod(&self, rhs: &Numeric, cx: &mut Context) -> Result<(Numeric, Numeric)> {
        let q = self.binop(BinOp::IntDiv, rhs, cx)?;
        let m = self.binop(BinOp::Mod, rhs, cx)?;
        Ok((q, m))
    }
}

fn not_an_integer(a: &Numeric, b: &Numeric) -> NumericError {
    let offender = if matches!(a, N::Integer(_)) { b } else { a };
    NumericError::Coercion {
        from: offender.kind(),
        into: NumericKind::Integer,
    }
}

/// The operator's own dispatch table; `None` means the pair needs coercion.
fn direct(op: BinOp, a: &Numeric, b: &Numeric, cx: &mut Context) -> Option<Result<Numeric>> {
    if op.is_bitwise() {
        return match (a, b) {
            (N::Integer(x), N::Integer(y)) => Some(int_op(op, x, y, cx)),
            _ => None,
        };
    }
    Some(match (a, b) {
        (N::Integer(x), N::Integer(y)) => int_op(op, x, y, cx),
        (N::Integer(x), N::Float(y)) => x.to_f64().and_then(|x| float_op(op, x, *y)),
        (N::Float(x), N::Integer(y)) => y.to_f64().and_then(|y| float_op(op, *x, y)),
        (N::Float(x), N::Float(y)) => float_op(op, *x, *y),
        (N::Rational(x), N::Rational(y)) => rational_op(op, x, y),
        (N::Rational(x), N::Integer(y)) => rational_op(op, x, &Rational::from_integer(y)),
        (N::Integer(x), N::Rational(y)) => rational_op(op, &Rational::from_integer(x), y),
        (N::Rational(x), N::Float(y)) => float_op(op, x.to_f64(), *y),
        _ => return None,
    })
}

fn int_op(op: BinOp, x: &crate::Integer, y: &crate::Integer, cx: &mut Context) -> Result<Numeric> {
    Ok(match op {
        BinOp::Add => (x + y).into(),
        BinOp::Sub => (x - y).into(),
        BinOp::Mul => (x * y).into(),
        BinOp::Div | BinOp::IntDiv => x.div_floor(y)?.into(),
        BinOp::Mod => x.modulo(y)?.into(),
        BinOp::Pow => return x.pow(y, cx),
        BinOp::BitAnd => (x & y).into(),
        BinOp::BitOr => (x | y).into(),
        BinOp::BitXor => (x ^ y).into(),
        BinOp::Shl => x.shl(y)?.into(),
        BinOp::Shr => x.shr(y)?.into(),
    })
}

fn float_op(op: BinOp, x: f64, y: f64) -> Result<Numeric> {
    Ok(N::Float(match op {
        BinOp::Add => x + y,
        BinOp::Sub => x - y,
        BinOp::Mul => x * y,
        BinOp::Div => x / y,
        BinOp::IntDiv => return float::div_floor(x, y).map(N::Integer),
        BinOp::Mod => float::modulo(x, y),
        BinOp::Pow => float::pow(x, y)?,
        _ => return Err(not_an_integer(&N::Float(x), &N::Float(y))),
    }))
}

fn rational_op(op: BinOp, x: &Rational, y: &Rational) -> Result<Numeric> {
    Ok(match op {
        BinOp::Add => (x + y).into(),
        BinOp::Sub => (x - y).into(),
        BinOp::Mul => (x * y).into(),
        BinOp::Div => x.checked_div(y)?.into(),
        BinOp::IntDiv => x.div_floor(y)?.into(),
        BinOp::Mod => x.modulo(y)?.into(),
        BinOp::Pow if y.is_integer() => x.pow(&y.numer())?.into(),
        BinOp::Pow => N::Float(float::pow(x.to_f64(), y.to_f64())?),
        _ => {
            return Err(not_an_integer(
                &N::Rational(x.clone()),
                &N::Rational(y.clone()),
            ))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureKind, Integer};
    use pretty_assertions::assert_eq;
    use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};

    fn n(s: &str) -> Numeric {
        s.parse().unwrap()
    }

    fn eval(a: &str, op: BinOp, b: &str) -> Result<Numeric> {
        n(a).binop(op, &n(b), &mut Context::default())
    }

    /// A length in meters that only knows how to become a float.
    #[derive(Debug)]
    struct Meters(f64);

    impl Coercible for Meters {
        fn kind(&self) -> NumericKind {
            NumericKind::Other("Meters")
        }

        fn to_f64(&self) -> Option<f64> {
            Some(self.0)
        }

        fn coerce(&self, other: &Numeric) -> Option<(Numeric, Numeric)> {
            Some((N::Float(other.as_f64()?), N::Float(self.0)))
        }
    }

    /// Refuses every coercion.
    #[derive(Debug)]
    struct Opaque;

    impl Coercible for Opaque {
        fn kind(&self) -> NumericKind {
            NumericKind::Other("Opaque")
        }

        fn to_f64(&self) -> Option<f64> {
            None
        }

        fn coerce(&self, _other: &Numeric) -> Option<(Numeric, Numeric)> {
            None
        }
    }

    /// Answers with a pair nobody can operate on.
    #[derive(Debug)]
    struct Confused;

    impl Coercible for Confused {
        fn kind(&self) -> NumericKind {
            NumericKind::Other("Confused")
        }

        fn to_f64(&self) -> Option<f64> {
            None
        }

        fn coerce(&self, _other: &Numeric) -> Option<(Numeric, Numeric)> {
            Some((Numeric::foreign(Confused), Numeric::foreign(Confused)))
        }
    }

    #[test]
    fn direct_dispatch() {
        assert_eq!(eval("7", BinOp::Div, "-2").unwrap().to_string(), "-4");
        assert_eq!(eval("7", BinOp::Mod, "-2").unwrap().to_string(), "-1");
        assert_eq!(eval("7", BinOp::Div, "2.0").unwrap().to_string(), "3.5");
        assert_eq!(eval("7.5", BinOp::IntDiv, "2").unwrap().to_string(), "3");
        assert_eq!(eval("-7.5", BinOp::Mod, "2").unwrap().to_string(), "0.5");
        assert_eq!(eval("1", BinOp::Div, "0.0").unwrap().to_string(), "Infinity");
        assert_eq!(eval("2", BinOp::Pow, "0.5").unwrap().to_string(), "1.4142135623730951");
        assert_eq!(eval("2", BinOp::Pow, "-2").unwrap().to_string(), "(1/4)");
        assert_eq!(eval("1", BinOp::Shl, "70").unwrap().to_string(), "1180591620717411303424");
        assert_eq!(eval("(1/2)", BinOp::Add, "1").unwrap().to_string(), "(3/2)");
        assert_eq!(eval("(1/2)", BinOp::Pow, "2").unwrap().to_string(), "(1/4)");
        assert_eq!(eval("(1/2)", BinOp::Mul, "0.5").unwrap().to_string(), "0.25");
    }

    #[test]
    fn coerced_dispatch() {
        assert_eq!(eval("1", BinOp::Div, "(1/2)").unwrap().to_string(), "(2/1)");
        assert_eq!(eval("0.5", BinOp::Add, "(1/2)").unwrap().to_string(), "1.0");
        assert_eq!(eval("0.5", BinOp::Mul, "(1/2)").unwrap().to_string(), "0.25");

        let mut cx = Context::default();
        let meters = Numeric::foreign(Meters(2.5));
        assert_eq!(Numeric::from(2).binop(BinOp::Mul, &meters, &mut cx).unwrap().to_string(), "5.0");
        assert_eq!(meters.binop(BinOp::Add, &Numeric::from(1), &mut cx).unwrap().to_string(), "3.5");
    }

    #[test]
    fn coercion_failures() {
        let mut cx = Context::default();
        let err = Numeric::from(1)
            .binop(BinOp::Add, &Numeric::foreign(Opaque), &mut cx)
            .unwrap_err();
        assert_eq!(err.to_string(), "Opaque can't be coerced into Integer");
        assert_eq!(err.kind(), FailureKind::CoercionFailure);

        let err = Numeric::from(1)
            .binop(BinOp::Add, &Numeric::foreign(Confused), &mut cx)
            .unwrap_err();
        assert_eq!(err.to_string(), "coerce must return [x, y], got [Confused, Confused]");
        assert_eq!(err.kind(), FailureKind::CoercionFailure);

        let err = eval("1", BinOp::BitAnd, "1.5").unwrap_err();
        assert_eq!(err.to_string(), "Float can't be coerced into Integer");
        assert_eq!(eval("1.5", BinOp::Shl, "1").unwrap_err().kind(), FailureKind::CoercionFailure);
        assert_eq!(eval("(1/2)", BinOp::BitOr, "1").unwrap_err().kind(), FailureKind::CoercionFailure);
    }

    #[test]
    fn division_by_zero() {
        for (a, b) in [("1", "0"), ("1.0", "0"), ("(1/2)", "0")] {
            let err = eval(a, BinOp::IntDiv, b).unwrap_err();
            assert_eq!(err.kind(), FailureKind::DivisionByZero, "{} div {}", a, b);
        }
        assert!(matches!(eval("1.0", BinOp::Mod, "0").unwrap(), N::Float(f) if f.is_nan()));
        let (q, m) = n("-7").divmod(&n("2.0"), &mut Context::default()).unwrap();
        assert_eq!((q.to_string(), m.to_string()), ("-4".to_owned(), "1.0".to_owned()));
    }

    /// Finite values of every built-in kind.
    #[derive(Debug, Clone)]
    struct AnyNumeric(Numeric);

    impl Arbitrary for AnyNumeric {
        fn arbitrary(g: &mut Gen) -> Self {
            let value = match u8::arbitrary(g) % 3 {
                0 => N::Integer(Integer::arbitrary(g)),
                1 => N::Float(f64::from(i32::arbitrary(g)) / 8.0),
                _ => {
                    let denom = i64::from(u16::arbitrary(g)) + 1;
                    N::Rational(Rational::new(Integer::arbitrary(g), Integer::from(denom)).unwrap())
                }
            };
            AnyNumeric(value)
        }
    }

    quickcheck! {
        fn addition_commutes(a: AnyNumeric, b: AnyNumeric) -> TestResult {
            let mut cx = Context::default();
            match (a.0.binop(BinOp::Add, &b.0, &mut cx), b.0.binop(BinOp::Add, &a.0, &mut cx)) {
                (Ok(x), Ok(y)) => TestResult::from_bool(x == y),
                (Err(_), Err(_)) => TestResult::discard(),
                _ => TestResult::failed(),
            }
        }

        fn multiplication_commutes(a: AnyNumeric, b: AnyNumeric) -> TestResult {
            let mut cx = Context::default();
            match (a.0.binop(BinOp::Mul, &b.0, &mut cx), b.0.binop(BinOp::Mul, &a.0, &mut cx)) {
                (Ok(x), Ok(y)) => TestResult::from_bool(x == y),
                (Err(_), Err(_)) => TestResult::discard(),
                _ => TestResult::failed(),
            }
        }
    }
}
