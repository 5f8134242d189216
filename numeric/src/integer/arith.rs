use super::Integer;
use crate::{NumericError, Result};
use num_bigint::BigInt;
use num_integer::{Integer as _, Roots};
use num_traits::{Signed, Zero};
use std::ops::{Add, Mul, Neg, Sub};

// both factors within ±sqrt(i64::MAX) cannot overflow
const MUL_FAST_LIMIT: i64 = 3_037_000_499;

fn add_small(a: i64, b: i64) -> Integer {
    let r = a.wrapping_add(b);
    if (!(a ^ b) & (a ^ r)) < 0 {
        Integer::from_big(BigInt::from(a) + b)
    } else {
        Integer::Small(r)
    }
}

fn sub_small(a: i64, b: i64) -> Integer {
    let r = a.wrapping_sub(b);
    if (!(a ^ !b) & (a ^ r)) < 0 {
        Integer::from_big(BigInt::from(a) - b)
    } else {
        Integer::Small(r)
    }
}

fn mul_small(a: i64, b: i64) -> Integer {
    if (-MUL_FAST_LIMIT..=MUL_FAST_LIMIT).contains(&a) && (-MUL_FAST_LIMIT..=MUL_FAST_LIMIT).contains(&b) {
        return Integer::Small(a * b);
    }
    if a == 0 || b == 0 {
        return Integer::zero();
    }
    if b == -1 {
        return neg_small(a);
    }
    let r = a.wrapping_mul(b);
    if r / b != a {
        Integer::from_big(BigInt::from(a) * b)
    } else {
        Integer::Small(r)
    }
}

fn neg_small(a: i64) -> Integer {
    match a.checked_neg() {
        Some(r) => Integer::Small(r),
        None => Integer::from_big(-BigInt::from(a)),
    }
}

/// Floored quotient and modulus of machine words; `y` must be nonzero.
fn divmod_small(x: i64, y: i64) -> (Integer, Integer) {
    if y == -1 {
        return (neg_small(x), Integer::zero());
    }
    let (mut q, mut r) = (x / y, x % y);
    if r != 0 && (r < 0) != (y < 0) {
        q -= 1;
        r += y;
    }
    (Integer::Small(q), Integer::Small(r))
}

fn divmod_big(x: &BigInt, y: &BigInt) -> (Integer, Integer) {
    let (mut q, mut r) = x.div_rem(y);
    if !r.is_zero() && r.is_negative() != y.is_negative() {
        q -= 1u32;
        r += y;
    }
    (Integer::from_big(q), Integer::from_big(r))
}

impl Integer {
    /// Floored division and modulus: the modulus takes the sign of `other`.
    pub fn divmod(&self, other: &Integer) -> Result<(Integer, Integer)> {
        if other.is_zero() {
            return Err(NumericError::ZeroDivision);
        }
        Ok(match (self, other) {
            (Integer::Small(x), Integer::Small(y)) => divmod_small(*x, *y),
            _ => divmod_big(&self.to_bigint(), &other.to_bigint()),
        })
    }

    pub fn div_floor(&self, other: &Integer) -> Result<Integer> {
        self.divmod(other).map(|(q, _)| q)
    }

    pub fn modulo(&self, other: &Integer) -> Result<Integer> {
        self.divmod(other).map(|(_, r)| r)
    }

    /// Truncating remainder: takes the sign of `self`.
    pub fn remainder(&self, other: &Integer) -> Result<Integer> {
        if other.is_zero() {
            return Err(NumericError::ZeroDivision);
        }
        Ok(match (self, other) {
            (Integer::Small(_), Integer::Small(-1)) => Integer::zero(),
            (Integer::Small(x), Integer::Small(y)) => Integer::Small(x % y),
            _ => Integer::from_big(self.to_bigint() % other.to_bigint()),
        })
    }

    /// Float quotient, exact enough even when both sides exceed the double range.
    pub fn fdiv(&self, other: &Integer) -> f64 {
        if let (Ok(a), Ok(b)) = (self.to_f64(), other.to_f64()) {
            return a / b;
        }
        let shift = self.bit_length().max(other.bit_length()).saturating_sub(1000);
        let a = self.to_bigint() >> shift;
        let b = other.to_bigint() >> shift;
        Integer::from_big(a).approx_f64() / Integer::from_big(b).approx_f64()
    }

    pub fn gcd(&self, other: &Integer) -> Integer {
        match (self, other) {
            (Integer::Small(a), Integer::Small(b)) if *a != i64::MIN && *b != i64::MIN => Integer::Small(a.gcd(b)),
            _ => Integer::from_big(self.to_bigint().gcd(&other.to_bigint())),
        }
    }

    pub fn lcm(&self, other: &Integer) -> Integer {
        if self.is_zero() || other.is_zero() {
            return Integer::zero();
        }
        let gcd = self.gcd(other);
        match (self * other).abs().div_floor(&gcd) {
            Ok(lcm) => lcm,
            // gcd of two nonzero values is nonzero
            Err(_) => Integer::zero(),
        }
    }

    /// Integer square root, rounded down.
    pub fn isqrt(&self) -> Result<Integer> {
        if self.is_negative() {
            return Err(NumericError::domain("Numerical argument is out of domain - \"isqrt\""));
        }
        Ok(match self {
            Integer::Small(x) => Integer::Small(x.sqrt()),
            Integer::Big(b) => Integer::from_big(b.as_bigint().sqrt()),
        })
    }
}

impl Add<&Integer> for &Integer {
    type Output = Integer;

    fn add(self, rhs: &Integer) -> Integer {
        match (self, rhs) {
            (Integer::Small(a), Integer::Small(b)) => add_small(*a, *b),
            _ => Integer::from_big(self.to_bigint() + rhs.to_bigint()),
        }
    }
}

impl Sub<&Integer> for &Integer {
    type Output = Integer;

    fn sub(self, rhs: &Integer) -> Integer {
        match (self, rhs) {
            (Integer::Small(a), Integer::Small(b)) => sub_small(*a, *b),
            _ => Integer::from_big(self.to_bigint() - rhs.to_bigint()),
        }
    }
}

impl Mul<&Integer> for &Integer {
    type Output = Integer;

    fn mul(self, rhs: &Integer) -> Integer {
        match (self, rhs) {
            (Integer::Small(a), Integer::Small(b)) => mul_small(*a, *b),
            _ => Integer::from_big(self.to_bigint() * rhs.to_bigint()),
        }
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        match self {
            Integer::Small(a) => neg_small(*a),
            Integer::Big(b) => Integer::from_big(-b.as_bigint()),
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        -&self
    }
}

macro_rules! forward_owned {
    ($($tr:ident :: $method:ident),*) => {
        $(
            impl $tr<Integer> for Integer {
                type Output = Integer;

                fn $method(self, rhs: Integer) -> Integer {
                    (&self).$method(&rhs)
                }
            }

            impl $tr<&Integer> for Integer {
                type Output = Integer;

                fn $method(self, rhs: &Integer) -> Integer {
                    (&self).$method(rhs)
                }
            }

            impl $tr<i64> for &Integer {
                type Output = Integer;

                fn $method(self, rhs: i64) -> Integer {
                    self.$method(&Integer::Small(rhs))
                }
            }
        )*
    };
}

forward_owned!(Add::add, Sub::sub, Mul::mul);
