use crate::{Integer, NumericError, Result};
use num_rational::BigRational;
use num_traits::{FromPrimitive, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Exact fraction, always in lowest terms with a positive denominator.
///
/// Only what the coercion protocol needs: it is the target of negative integer powers and
/// of mixed integer/rational arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rational(BigRational);

impl Rational {
    pub fn new(numer: Integer, denom: Integer) -> Result<Self> {
        if denom.is_zero() {
            return Err(NumericError::ZeroDivision);
        }
        Ok(Self(BigRational::new(numer.into_bigint(), denom.into_bigint())))
    }

    pub fn from_integer(value: &Integer) -> Self {
        Self(BigRational::from_integer(value.to_bigint()))
    }

    /// Exact value of a finite float.
    pub fn from_f64(value: f64) -> Option<Self> {
        BigRational::from_f64(value).map(Self)
    }

    pub fn numer(&self) -> Integer {
        Integer::from_big(self.0.numer().clone())
    }

    pub fn denom(&self) -> Integer {
        Integer::from_big(self.0.denom().clone())
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn checked_div(&self, other: &Rational) -> Result<Rational> {
        if other.is_zero() {
            return Err(NumericError::ZeroDivision);
        }
        Ok(Self(&self.0 / &other.0))
    }

    pub fn div_floor(&self, other: &Rational) -> Result<Integer> {
        let q = self.checked_div(other)?;
        Ok(Integer::from_big(q.0.floor().to_integer()))
    }

    /// Floored modulus, `self - other * floor(self / other)`.
    pub fn modulo(&self, other: &Rational) -> Result<Rational> {
        let q = Rational::from_integer(&self.div_floor(other)?);
        Ok(self - &(other * &q))
    }

    /// Integer power; the exponent must fit a machine word.
    pub fn pow(&self, exp: &Integer) -> Result<Rational> {
        let e = i32::try_from(exp.to_i64()?).map_err(|_| NumericError::range("exponent too big"))?;
        if e < 0 && self.is_zero() {
            return Err(NumericError::ZeroDivision);
        }
        Ok(Self(num_traits::Pow::pow(&self.0, e)))
    }

    /// Nearest double, computed from the exact quotient of numerator and denominator.
    pub fn to_f64(&self) -> f64 {
        self.numer().fdiv(&self.denom())
    }

    pub fn cmp_integer(&self, other: &Integer) -> Ordering {
        self.0.cmp(&BigRational::from_integer(other.to_bigint()))
    }

    pub fn cmp_f64(&self, other: f64) -> Option<Ordering> {
        if other.is_nan() {
            return None;
        }
        if other.is_infinite() {
            return Some(if other > 0.0 { Ordering::Less } else { Ordering::Greater });
        }
        Rational::from_f64(other).map(|r| self.cmp(&r))
    }

    pub fn as_bigrational(&self) -> &BigRational {
        &self.0
    }
}

impl From<BigRational> for Rational {
    fn from(value: BigRational) -> Self {
        Self(value)
    }
}

impl From<&Integer> for Rational {
    fn from(value: &Integer) -> Self {
        Rational::from_integer(value)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{})", self.0.numer(), self.0.denom())
    }
}

impl std::str::FromStr for Rational {
    type Err = NumericError;

    /// Accepts `(a/b)` and `a/b`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let inner = s.strip_prefix('(').and_then(|s| s.strip_suffix(')')).unwrap_or(s);
        let (n, d) = inner
            .split_once('/')
            .ok_or_else(|| NumericError::domain(format!("invalid value for Rational(): {:?}", s)))?;
        Rational::new(n.parse()?, d.parse()?)
    }
}

macro_rules! rational_op {
    ($($tr:ident :: $method:ident),*) => {
        $(
            impl $tr<&Rational> for &Rational {
                type Output = Rational;

                fn $method(self, rhs: &Rational) -> Rational {
                    Rational((&self.0).$method(&rhs.0))
                }
            }
        )*
    };
}

rational_op!(Add::add, Sub::sub, Mul::mul);

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}
