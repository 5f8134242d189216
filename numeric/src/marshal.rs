//! The runtime's binary serialization of integers.
//!
//! Values within 31 bits are written as `i` plus a packed long, everything else as `l`, a sign
//! byte, the magnitude length in 16-bit words and the magnitude bytes, least significant first.
use crate::Integer;
use derive_more::{Display, Error};
use num_bigint::{BigInt, BigUint, Sign};

const TYPE_FIXNUM: u8 = b'i';
const TYPE_BIGNUM: u8 = b'l';

/// Values in this range take the short `i` form.
const FIXNUM_MIN: i64 = -(1 << 30);
const FIXNUM_MAX: i64 = (1 << 30) - 1;

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MarshalError {
    #[display(fmt = "marshal data too short")]
    Truncated,
    #[display(fmt = "dump format error (0x{:x})", _0)]
    UnknownTag(#[error(ignore)] u8),
    #[display(fmt = "dump format error (bignum sign 0x{:x})", _0)]
    BadSign(#[error(ignore)] u8),
    #[display(fmt = "negative bignum length {}", _0)]
    BadLength(#[error(ignore)] i64),
    #[display(fmt = "{} bytes left after marshal data", _0)]
    TrailingBytes(#[error(ignore)] usize),
    #[display(fmt = "long too big to dump ({} words)", _0)]
    TooLong(#[error(ignore)] usize),
}

/// Packed long: small values in one byte, others as a signed length byte and that many
/// little-endian bytes.
fn write_long(out: &mut Vec<u8>, x: i32) {
    if x == 0 {
        out.push(0);
        return;
    }
    if 0 < x && x < 123 {
        out.push((x + 5) as u8);
        return;
    }
    if -124 < x && x < 0 {
        out.push(((x - 5) & 0xff) as u8);
        return;
    }
    let mut buf = [0u8; 4];
    let mut rest = x;
    let mut len = 0i8;
    for (i, slot) in buf.iter_mut().enumerate() {
        *slot = (rest & 0xff) as u8;
        rest >>= 8;
        if rest == 0 {
            len = i as i8 + 1;
            break;
        }
        if rest == -1 {
            len = -(i as i8 + 1);
            break;
        }
    }
    out.push(len as u8);
    out.extend_from_slice(&buf[..len.unsigned_abs() as usize]);
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn byte(&mut self) -> Result<u8, MarshalError> {
        let (first, rest) = self.bytes.split_first().ok_or(MarshalError::Truncated)?;
        self.bytes = rest;
        Ok(*first)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], MarshalError> {
        if self.bytes.len() < n {
            return Err(MarshalError::Truncated);
        }
        let (head, rest) = self.bytes.split_at(n);
        self.bytes = rest;
        Ok(head)
    }

    fn long(&mut self) -> Result<i64, MarshalError> {
        let c = self.byte()? as i8;
        if c == 0 {
            return Ok(0);
        }
        if c > 4 {
            return Ok(i64::from(c) - 5);
        }
        if c < -4 {
            return Ok(i64::from(c) + 5);
        }
        // |c| <= 4 here
        let len = c.unsigned_abs();
        let mut x: i64 = if c > 0 { 0 } else { -1 };
        for (i, b) in self.take(len.into())?.iter().enumerate() {
            let shift = 8 * i as u32;
            x &= !(0xff << shift);
            x |= i64::from(*b) << shift;
        }
        Ok(x)
    }
}

/// Serializes an integer; fails only for magnitudes of 2^31 words or more.
pub fn dump(value: &Integer) -> Result<Vec<u8>, MarshalError> {
    let mut out = Vec::new();
    if let Integer::Small(x) = value {
        if (FIXNUM_MIN..=FIXNUM_MAX).contains(x) {
            out.push(TYPE_FIXNUM);
            write_long(&mut out, *x as i32);
            return Ok(out);
        }
    }
    let big = value.to_bigint();
    out.push(TYPE_BIGNUM);
    out.push(if big.sign() == Sign::Minus { b'-' } else { b'+' });
    let mut magnitude = big.magnitude().to_bytes_le();
    if magnitude.len() % 2 == 1 {
        magnitude.push(0);
    }
    let shorts = magnitude.len() / 2;
    write_long(&mut out, i32::try_from(shorts).map_err(|_| MarshalError::TooLong(shorts))?);
    out.extend_from_slice(&magnitude);
    Ok(out)
}

/// Reads back exactly one integer written by [`dump`].
pub fn load(bytes: &[u8]) -> Result<Integer, MarshalError> {
    let mut r = Reader { bytes };
    let value = match r.byte()? {
        TYPE_FIXNUM => Integer::Small(r.long()?),
        TYPE_BIGNUM => {
            let sign = match r.byte()? {
                b'+' => Sign::Plus,
                b'-' => Sign::Minus,
                other => return Err(MarshalError::BadSign(other)),
            };
            let shorts = r.long()?;
            let len = usize::try_from(shorts).map_err(|_| MarshalError::BadLength(shorts))?;
            let magnitude = BigUint::from_bytes_le(r.take(len.checked_mul(2).ok_or(MarshalError::Truncated)?)?);
            Integer::from_big(BigInt::from_biguint(sign, magnitude))
        }
        other => return Err(MarshalError::UnknownTag(other)),
    };
    if !r.bytes.is_empty() {
        return Err(MarshalError::TrailingBytes(r.bytes.len()));
    }
    Ok(value)
}
