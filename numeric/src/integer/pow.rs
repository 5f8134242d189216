use super::Integer;
use crate::{float, Context, Numeric, NumericError, Rational, Result, Warning};

impl Integer {
    /// `self ** exp`.
    ///
    /// Negative exponents produce a [`Rational`]. When the exact result would need more bits than
    /// [`Limits::pow_bits`](crate::Limits) allows, a warning is recorded in `cx` and the result is
    /// computed in floating point instead (possibly infinite).
    pub fn pow(&self, exp: &Integer, cx: &mut Context) -> Result<Numeric> {
        if exp.is_negative() {
            if self.is_zero() {
                return Err(NumericError::ZeroDivision);
            }
            return match self.pow(&-exp, cx)? {
                Numeric::Integer(denom) => Ok(Numeric::Rational(Rational::new(Integer::one(), denom)?)),
                Numeric::Float(f) => Ok(Numeric::Float(1.0 / f)),
                other => Ok(other),
            };
        }
        let exact = match self {
            Integer::Small(0) if exp.is_zero() => Integer::one(),
            Integer::Small(0) => Integer::zero(),
            Integer::Small(1) => Integer::one(),
            Integer::Small(-1) if exp.is_even() => Integer::one(),
            Integer::Small(-1) => Integer::Small(-1),
            _ if exp.is_zero() => Integer::one(),
            _ => {
                let e = match exp {
                    Integer::Small(e) => *e as u64,
                    Integer::Big(_) => return Ok(self.pow_fallback(exp, cx)),
                };
                let bits = u128::from(self.bit_length()) * u128::from(e);
                match u32::try_from(e) {
                    Ok(e) if bits <= u128::from(cx.limits().pow_bits) => self.pow_exact(e),
                    _ => return Ok(self.pow_fallback(exp, cx)),
                }
            }
        };
        Ok(Numeric::Integer(exact))
    }

    fn pow_exact(&self, e: u32) -> Integer {
        match self {
            Integer::Small(x) => match x.checked_pow(e) {
                Some(r) => Integer::Small(r),
                None => Integer::from_big(self.to_bigint().pow(e)),
            },
            Integer::Big(b) => Integer::from_big(b.as_bigint().pow(e)),
        }
    }

    fn pow_fallback(&self, exp: &Integer, cx: &mut Context) -> Numeric {
        cx.warn(Warning::PowMayBeTooBig {
            base_bits: self.bit_length(),
            exponent: exp.clone(),
        });
        Numeric::Float(self.approx_f64().powf(exp.approx_f64()))
    }

    /// `self ** exp` for a float exponent.
    pub fn pow_f64(&self, exp: f64) -> Result<f64> {
        float::pow(self.to_f64()?, exp)
    }

    /// `self ** exp % modulus` by square-and-multiply, never materializing `self ** exp`.
    ///
    /// The result follows floored modulo: it is zero or has the sign of `modulus`.
    pub fn pow_mod(&self, exp: &Integer, modulus: &Integer) -> Result<Integer> {
        if exp.is_negative() {
            return Err(NumericError::domain(
                "Integer#pow() 1st argument cannot be negative when 2nd argument specified",
            ));
        }
        if modulus.is_zero() {
            return Err(NumericError::ZeroDivision);
        }
        let m = modulus.abs();
        let base = self.modulo(&m)?;
        let r = match (&base, &m) {
            (Integer::Small(b), Integer::Small(m)) => Integer::Small(pow_mod_small(*b, exp, *m)),
            _ => Integer::from_big(base.to_bigint().modpow(&exp.to_bigint(), &m.to_bigint())),
        };
        if modulus.is_negative() && !r.is_zero() {
            Ok(&r - &m)
        } else {
            Ok(r)
        }
    }
}

/// `base` must lie in `0..m`, `m` must be positive.
fn pow_mod_small(base: i64, exp: &Integer, m: i64) -> i64 {
    let m = i128::from(m);
    let mut acc = 1 % m;
    let mut sq = i128::from(base);
    let (_, bytes) = exp.to_bigint().to_bytes_le();
    for byte in bytes {
        for i in 0..8 {
            if byte >> i & 1 == 1 {
                acc = acc * sq % m;
            }
            sq = sq * sq % m;
        }
    }
    // acc < m <= i64::MAX
    acc as i64
}
