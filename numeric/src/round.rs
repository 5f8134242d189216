//! Rounding to a decimal position, with a choice of tie-breaking.
use crate::{Integer, Numeric, NumericError, Rational, Result};
use num_bigint::BigInt;
use num_integer::Integer as _;
use num_rational::BigRational;
use num_traits::{One, Signed};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

macro_rules! round_modes {
    ($($name:ident => $text:literal,)+) => {
        /// How an exact half between two candidates is resolved.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum RoundMode {
            $(#[serde(rename = $text)] $name,)+
        }

        impl RoundMode {
            pub const ALL: &'static [RoundMode] = &[$(RoundMode::$name,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(RoundMode::$name => $text,)+
                }
            }
        }

        impl FromStr for RoundMode {
            type Err = NumericError;

            fn from_str(s: &str) -> Result<RoundMode> {
                match s {
                    $($text => Ok(RoundMode::$name),)+
                    _ => Err(NumericError::domain(format!("invalid rounding mode: {}", s))),
                }
            }
        }
    };
}

round_modes! {
    HalfUp => "up",
    HalfDown => "down",
    HalfEven => "even",
}

impl Default for RoundMode {
    fn default() -> Self {
        RoundMode::HalfUp
    }
}

impl fmt::Display for RoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest power of ten built when the operand does not bound it (about 33 million bits).
const MAX_FREE_DIGITS: u64 = 10_000_000;

/// `10^k` when `k` is a usable digit count.
fn ten_pow(k: u64) -> Result<BigInt> {
    let k = u32::try_from(k).map_err(|_| NumericError::range("ndigits too big"))?;
    Ok(BigInt::from(10u8).pow(k))
}

/// `10^k` for a `k` only the caller chose.
fn free_ten_pow(k: u64) -> Result<BigInt> {
    if k > MAX_FREE_DIGITS {
        return Err(NumericError::range(format!("ndigits too big: {} digits", k)));
    }
    ten_pow(k)
}

/// True when `|value| < 10^-ndigits / 2` follows from the byte size alone.
fn vanishes_at(value: &Integer, ndigits: i64) -> bool {
    -0.415241 * ndigits as f64 - 0.125 > value.byte_size() as f64
}

/// Nearest integer to `q`, ties resolved by `mode`.
fn round_rational(q: &BigRational, mode: RoundMode) -> BigInt {
    let floor = q.floor();
    let frac = q - &floor;
    let floor = floor.to_integer();
    let round_up = match frac.cmp(&BigRational::new(BigInt::one(), BigInt::from(2u8))) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match mode {
            RoundMode::HalfUp => q.is_positive(),
            RoundMode::HalfDown => q.is_negative(),
            RoundMode::HalfEven => floor.is_odd(),
        },
    };
    if round_up {
        floor + 1u8
    } else {
        floor
    }
}

fn round_small(x: i64, k: u32, mode: RoundMode) -> Integer {
    let y = 10i128.pow(k);
    let ax = i128::from(x).abs();
    let z = match mode {
        RoundMode::HalfUp => (ax + y / 2) / y * y,
        RoundMode::HalfDown => (ax + y / 2 - 1) / y * y,
        RoundMode::HalfEven => {
            let mut z = (ax + y / 2) / y;
            if (z * y - ax) * 2 == y {
                z &= !1;
            }
            z * y
        }
    };
    Integer::from_i128(if x < 0 { -z } else { z })
}

impl Integer {
    /// Rounds to `ndigits` decimal places; only negative `ndigits` change an integer.
    pub fn round(&self, ndigits: i64, mode: RoundMode) -> Integer {
        if ndigits >= 0 {
            return self.clone();
        }
        if vanishes_at(self, ndigits) {
            return Integer::zero();
        }
        let k = match u32::try_from(ndigits.unsigned_abs()) {
            Ok(k) => k,
            Err(_) => return Integer::zero(),
        };
        if let Integer::Small(x) = self {
            // 10^19 + |i64::MIN| still fits an i128
            if k <= 19 {
                return round_small(*x, k, mode);
            }
        }
        let f = BigInt::from(10u8).pow(k);
        let h = &f >> 1u32;
        let v = self.to_bigint();
        let r = v.mod_floor(&f);
        let mut n = &v - &r;
        let round_up = match r.cmp(&h) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match mode {
                RoundMode::HalfUp => self.is_positive(),
                RoundMode::HalfDown => self.is_negative(),
                RoundMode::HalfEven => (&n / &f).is_odd(),
            },
        };
        if round_up {
            n += &f;
        }
        Integer::from_big(n)
    }

    /// Largest multiple of `10^-ndigits` not above the value.
    pub fn floor_digits(&self, ndigits: i64) -> Result<Integer> {
        if ndigits >= 0 {
            return Ok(self.clone());
        }
        let k = ndigits.unsigned_abs();
        if vanishes_at(self, ndigits) {
            if self.is_negative() {
                return Ok(Integer::from_big(-free_ten_pow(k)?));
            }
            return Ok(Integer::zero());
        }
        let f = Integer::from_big(ten_pow(k)?);
        Ok(self - &self.modulo(&f)?)
    }

    /// Smallest multiple of `10^-ndigits` not below the value.
    pub fn ceil_digits(&self, ndigits: i64) -> Result<Integer> {
        if ndigits >= 0 {
            return Ok(self.clone());
        }
        let k = ndigits.unsigned_abs();
        if vanishes_at(self, ndigits) {
            if self.is_positive() {
                return Ok(Integer::from_big(free_ten_pow(k)?));
            }
            return Ok(Integer::zero());
        }
        let f = Integer::from_big(ten_pow(k)?);
        let r = self.modulo(&f)?;
        if r.is_zero() {
            return Ok(self.clone());
        }
        Ok(&(self - &r) + &f)
    }

    /// Rounds toward zero.
    pub fn truncate_digits(&self, ndigits: i64) -> Result<Integer> {
        if ndigits < 0 && vanishes_at(self, ndigits) {
            return Ok(Integer::zero());
        }
        if self.is_negative() {
            self.ceil_digits(ndigits)
        } else {
            self.floor_digits(ndigits)
        }
    }
}

fn round_half_up(x: f64, s: f64) -> f64 {
    let mut f = (x * s).round();
    if s == 1.0 {
        return f;
    }
    // x * s may have lost the half
    if x > 0.0 {
        if (f + 0.5) / s <= x {
            f += 1.0;
        }
    } else if (f - 0.5) / s >= x {
        f -= 1.0;
    }
    f
}

fn round_half_down(x: f64, s: f64) -> f64 {
    let mut f = (x * s).round();
    if x > 0.0 {
        if (f - 0.5) / s >= x {
            f -= 1.0;
        }
    } else if (f + 0.5) / s <= x {
        f += 1.0;
    }
    f
}

fn round_half_even(x: f64, s: f64) -> f64 {
    let xs = x * s;
    let u = xs.trunc();
    if (xs - u).abs() == 0.5 {
        if u % 2.0 == 0.0 {
            u
        } else {
            u + xs.signum()
        }
    } else {
        round_half_up(x, s)
    }
}

fn round_scaled(x: f64, s: f64, mode: RoundMode) -> f64 {
    match mode {
        RoundMode::HalfUp => round_half_up(x, s),
        RoundMode::HalfDown => round_half_down(x, s),
        RoundMode::HalfEven => round_half_even(x, s),
    }
}

/// Exponent `e` of `x = m * 2^e` with `0.5 <= |m| < 1`; `x` must be finite and nonzero.
fn binary_exponent(x: f64) -> i32 {
    let e = ((x.to_bits() >> 52) & 0x7ff) as i32;
    if e == 0 {
        binary_exponent(x * 2f64.powi(54)) - 54
    } else {
        e - 1022
    }
}

/// True when `x` has no digits left at position `ndigits`.
fn beyond_precision(ndigits: i64, binexp: i32) -> bool {
    let float_dig = i64::from(f64::DIGITS) + 2;
    let shift = if binexp > 0 { binexp / 4 } else { binexp / 3 - 1 };
    ndigits >= float_dig - i64::from(shift)
}

/// Rounds a float to `ndigits` decimal places.
///
/// `ndigits == 0` yields an Integer, a positive `ndigits` a Float, and a negative one rounds the
/// truncated value as an Integer.
pub fn round_f64(x: f64, ndigits: i64, mode: RoundMode) -> Result<Numeric> {
    if ndigits < 0 {
        return Ok(Integer::from_f64(x)?.round(ndigits, mode).into());
    }
    if ndigits == 0 {
        return Ok(Integer::from_f64(round_scaled(x, 1.0, mode))?.into());
    }
    if x == 0.0 || !x.is_finite() || beyond_precision(ndigits, binary_exponent(x)) {
        return Ok(Numeric::Float(x));
    }
    if ndigits > 14 {
        // 10^ndigits is no longer exact as a double
        let exact = match BigRational::from_float(x) {
            Some(r) => r,
            None => return Ok(Numeric::Float(x)),
        };
        let scale = ten_pow(ndigits as u64)?;
        let n = round_rational(&(exact * BigRational::from_integer(scale.clone())), mode);
        return Ok(Numeric::Float(Integer::from_big(n).fdiv(&Integer::from_big(scale))));
    }
    let s = 10f64.powi(ndigits as i32);
    Ok(Numeric::Float(round_scaled(x, s, mode) / s))
}

impl Numeric {
    /// Rounds any built-in kind; see [`Integer::round`] and [`round_f64`].
    ///
    /// Rationals stay exact: a positive `ndigits` gives a Rational, otherwise an Integer.
    pub fn round(&self, ndigits: i64, mode: RoundMode) -> Result<Numeric> {
        match self {
            Numeric::Integer(i) => Ok(i.round(ndigits, mode).into()),
            Numeric::Float(x) => round_f64(*x, ndigits, mode),
            Numeric::Rational(r) => {
                let whole = r.div_floor(&Rational::from_integer(&Integer::one()))?;
                if ndigits < 0 && vanishes_at(&whole, ndigits) {
                    return Ok(Integer::zero().into());
                }
                let scale = if ndigits < 0 {
                    Rational::new(Integer::one(), Integer::from_big(ten_pow(ndigits.unsigned_abs())?))?
                } else {
                    Rational::from_integer(&Integer::from_big(free_ten_pow(ndigits.unsigned_abs())?))
                };
                let n = Integer::from_big(round_rational((r * &scale).as_bigrational(), mode));
                let rounded = Rational::from_integer(&n).checked_div(&scale)?;
                if ndigits > 0 {
                    Ok(rounded.into())
                } else {
                    Ok(rounded.numer().into())
                }
            }
            Numeric::Foreign(f) => Err(NumericError::domain(format!("cannot round {}", f.kind()))),
        }
    }
}
