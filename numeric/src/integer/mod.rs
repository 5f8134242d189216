mod arith;
mod bits;
mod pow;
mod radix;

use crate::{NumericError, Result};
use num_bigint::{BigInt, Sign};
use num_integer::Integer as _;
use num_traits::{FromPrimitive, ToPrimitive};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An integer of the runtime, held in a machine word whenever it fits.
///
/// The two variants never overlap: a value within `i64` is always `Small`, which makes the derived
/// equality and hashing agree with numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Integer {
    Small(i64),
    Big(Big),
}

/// Arbitrary-precision payload of [`Integer::Big`], always outside the `i64` range.
///
/// The field is private: [`Integer::from_big`] is the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Big(BigInt);

impl Big {
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_bigint(self) -> BigInt {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }
}

impl Integer {
    /// Normalizing constructor: packs `value` into a machine word when it fits.
    pub fn from_big(value: BigInt) -> Self {
        match value.to_i64() {
            Some(small) => Integer::Small(small),
            None => Integer::Big(Big(value)),
        }
    }

    pub fn from_i128(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(small) => Integer::Small(small),
            Err(_) => Integer::from_big(BigInt::from(value)),
        }
    }

    /// Re-establishes the representation invariant; the identity for any value built by this crate.
    pub fn normalize(self) -> Self {
        match self {
            Integer::Big(Big(b)) => Integer::from_big(b),
            small => small,
        }
    }

    pub fn zero() -> Self {
        Integer::Small(0)
    }

    pub fn one() -> Self {
        Integer::Small(1)
    }

    pub fn is_small(&self) -> bool {
        matches!(self, Integer::Small(_))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Integer::Small(0))
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Small(x) => *x < 0,
            Integer::Big(b) => b.is_negative(),
        }
    }

    pub fn is_positive(&self) -> bool {
        !self.is_zero() && !self.is_negative()
    }

    pub fn signum(&self) -> i64 {
        match self {
            Integer::Small(x) => x.signum(),
            Integer::Big(b) if b.is_negative() => -1,
            Integer::Big(_) => 1,
        }
    }

    pub fn to_bigint(&self) -> BigInt {
        match self {
            Integer::Small(x) => BigInt::from(*x),
            Integer::Big(b) => b.0.clone(),
        }
    }

    pub fn into_bigint(self) -> BigInt {
        match self {
            Integer::Small(x) => BigInt::from(x),
            Integer::Big(b) => b.0,
        }
    }

    pub fn to_i64(&self) -> Result<i64> {
        match self {
            Integer::Small(x) => Ok(*x),
            Integer::Big(_) => Err(NumericError::range("bignum too big to convert into `long'")),
        }
    }

    /// Exact conversion to a double; values beyond the double range are an error, not infinity.
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Integer::Small(x) => Ok(*x as f64),
            Integer::Big(b) => match b.0.to_f64() {
                Some(f) if f.is_finite() => Ok(f),
                _ => Err(NumericError::range("Bignum out of Float range")),
            },
        }
    }

    /// Saturating conversion, infinite when out of range.
    pub(crate) fn approx_f64(&self) -> f64 {
        match self.to_f64() {
            Ok(f) => f,
            Err(_) if self.is_negative() => f64::NEG_INFINITY,
            Err(_) => f64::INFINITY,
        }
    }

    /// Truncates toward zero.
    pub fn from_f64(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(NumericError::domain("NaN"));
        }
        if value.is_infinite() {
            return Err(NumericError::domain(if value > 0.0 { "Infinity" } else { "-Infinity" }));
        }
        let t = value.trunc();
        // -2^63 is exact in f64, 2^63 is the first value above the range
        if (-9.223_372_036_854_775_808e18..9.223_372_036_854_775_808e18).contains(&t) {
            return Ok(Integer::Small(t as i64));
        }
        BigInt::from_f64(t)
            .map(Integer::from_big)
            .ok_or_else(|| NumericError::domain(format!("{} out of range", value)))
    }

    pub fn abs(&self) -> Integer {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    pub fn is_even(&self) -> bool {
        match self {
            Integer::Small(x) => x & 1 == 0,
            Integer::Big(b) => b.0.is_even(),
        }
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }
}

impl Default for Integer {
    fn default() -> Self {
        Integer::zero()
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::Small(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Integer::Small(value.into())
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Integer::from_i128(value.into())
    }
}

impl From<usize> for Integer {
    fn from(value: usize) -> Self {
        Integer::from_i128(value as i128)
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Integer::from_big(value)
    }
}

impl From<&Integer> for BigInt {
    fn from(value: &Integer) -> Self {
        value.to_bigint()
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Integer::Small(a), Integer::Small(b)) => a.cmp(b),
            (Integer::Small(_), Integer::Big(b)) => {
                if b.is_negative() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Integer::Big(a), Integer::Small(_)) => {
                if a.is_negative() {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (Integer::Big(a), Integer::Big(b)) => a.0.cmp(&b.0),
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<i64> for Integer {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Integer::Small(x) if x == other)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Small(x) => write!(f, "{}", x),
            Integer::Big(b) => write!(f, "{}", b.0),
        }
    }
}

impl FromStr for Integer {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        Integer::from_str_radix(s, 10)
    }
}

impl Serialize for Integer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Integer::Small(x) => serializer.serialize_i64(*x),
            Integer::Big(b) => serializer.collect_str(&b.0),
        }
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct IntegerVisitor;

        impl<'de> Visitor<'de> for IntegerVisitor {
            type Value = Integer;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or a decimal string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Integer, E> {
                Ok(Integer::Small(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Integer, E> {
                Ok(Integer::from(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Integer, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(IntegerVisitor)
    }
}
