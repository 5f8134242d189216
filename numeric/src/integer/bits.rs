//! Bit operations, all on the infinite two's-complement view of an integer.
use super::Integer;
use crate::{NumericError, Result};
use num_bigint::BigInt;
use num_traits::One;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Left shifts beyond this many bits are refused instead of attempted.
const MAX_SHIFT: u64 = u32::MAX as u64;

impl Integer {
    /// Number of bits needed to represent the value, excluding the sign.
    pub fn bit_length(&self) -> u64 {
        match self {
            Integer::Small(x) => {
                let v = if *x < 0 { !*x } else { *x };
                u64::from(64 - v.leading_zeros())
            }
            Integer::Big(b) if b.is_negative() => (!b.as_bigint()).bits(),
            Integer::Big(b) => b.as_bigint().bits(),
        }
    }

    /// Bytes occupied by the machine representation.
    pub fn byte_size(&self) -> u64 {
        match self {
            Integer::Small(_) => 8,
            Integer::Big(b) => (b.as_bigint().magnitude().bits() + 7) / 8,
        }
    }

    /// Bit `index`, counting from the least significant; negative indices read as 0.
    pub fn bit(&self, index: &Integer) -> Integer {
        let sign_bit = Integer::Small(self.is_negative() as i64);
        let index = match index {
            Integer::Small(i) if *i < 0 => return Integer::zero(),
            Integer::Small(i) => *i as u64,
            Integer::Big(b) if b.is_negative() => return Integer::zero(),
            Integer::Big(_) => return sign_bit,
        };
        match self {
            Integer::Small(x) if index >= 64 => Integer::Small((*x < 0) as i64),
            Integer::Small(x) => Integer::Small((x >> index) & 1),
            Integer::Big(_) if index >= self.bit_length() => sign_bit,
            Integer::Big(b) => Integer::from_big((b.as_bigint() >> index) & BigInt::one()),
        }
    }

    /// Shifts left by `amount`, right when negative.
    pub fn shl(&self, amount: &Integer) -> Result<Integer> {
        match amount {
            Integer::Small(n) if *n >= 0 => self.shift_left(*n as u64),
            Integer::Small(n) => Ok(self.shift_right(n.unsigned_abs())),
            Integer::Big(b) if b.is_negative() => Ok(self.sign_fill()),
            Integer::Big(_) => self.shift_left(u64::MAX),
        }
    }

    /// Shifts right by `amount`, left when negative.
    pub fn shr(&self, amount: &Integer) -> Result<Integer> {
        match amount {
            Integer::Small(n) if *n >= 0 => Ok(self.shift_right(*n as u64)),
            Integer::Small(n) => self.shift_left(n.unsigned_abs()),
            Integer::Big(b) if b.is_negative() => self.shift_left(u64::MAX),
            Integer::Big(_) => Ok(self.sign_fill()),
        }
    }

    /// What is left once every significant bit has been shifted out.
    fn sign_fill(&self) -> Integer {
        Integer::Small(if self.is_negative() { -1 } else { 0 })
    }

    fn shift_left(&self, n: u64) -> Result<Integer> {
        if self.is_zero() || n == 0 {
            return Ok(self.clone());
        }
        if n > MAX_SHIFT {
            return Err(NumericError::range("shift width too big"));
        }
        match self {
            Integer::Small(x) if n < 63 && (x << n) >> n == *x => Ok(Integer::Small(x << n)),
            _ => Ok(Integer::from_big(self.to_bigint() << n)),
        }
    }

    fn shift_right(&self, n: u64) -> Integer {
        match self {
            Integer::Small(x) if n >= 63 => Integer::Small(if *x < 0 { -1 } else { 0 }),
            Integer::Small(x) => Integer::Small(x >> n),
            Integer::Big(_) if n > self.bit_length() => self.sign_fill(),
            // arithmetic shift: rounds toward negative infinity
            Integer::Big(b) => Integer::from_big(b.as_bigint() >> n),
        }
    }
}

impl Not for &Integer {
    type Output = Integer;

    fn not(self) -> Integer {
        match self {
            Integer::Small(x) => Integer::Small(!x),
            Integer::Big(b) => Integer::from_big(!b.as_bigint()),
        }
    }
}

impl Not for Integer {
    type Output = Integer;

    fn not(self) -> Integer {
        !&self
    }
}

macro_rules! bitwise {
    ($($tr:ident :: $method:ident => $op:tt),*) => {
        $(
            impl $tr<&Integer> for &Integer {
                type Output = Integer;

                fn $method(self, rhs: &Integer) -> Integer {
                    match (self, rhs) {
                        (Integer::Small(a), Integer::Small(b)) => Integer::Small(a $op b),
                        _ => Integer::from_big(self.to_bigint() $op rhs.to_bigint()),
                    }
                }
            }

            impl $tr<Integer> for Integer {
                type Output = Integer;

                fn $method(self, rhs: Integer) -> Integer {
                    (&self).$method(&rhs)
                }
            }
        )*
    };
}

bitwise!(BitAnd::bitand => &, BitOr::bitor => |, BitXor::bitxor => ^);

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};

    fn i(x: i64) -> Integer {
        Integer::from(x)
    }

    fn big(s: &str) -> Integer {
        s.parse().unwrap()
    }

    #[test]
    fn shifts() {
        assert_eq!(i(1).shl(&i(64)).unwrap().to_string(), "18446744073709551616");
        assert_eq!(i(-1).shl(&i(63)).unwrap(), i(i64::MIN));
        assert_eq!(i(1).shl(&i(62)).unwrap(), i(1 << 62));
        assert!(!i(1).shl(&i(63)).unwrap().is_small());
        assert_eq!(i(-5).shr(&i(1)).unwrap(), i(-3));
        assert_eq!(i(5).shl(&i(-1)).unwrap(), i(2));
        assert_eq!(i(-5).shr(&i(100)).unwrap(), i(-1));
        assert_eq!(i(5).shr(&i(100)).unwrap(), i(0));
        assert_eq!(big("-18446744073709551617").shr(&i(64)).unwrap(), i(-2));
        assert_eq!(big("18446744073709551617").shr(&i(64)).unwrap(), i(1));
        assert_eq!(big("-18446744073709551617").shr(&i(1000)).unwrap(), i(-1));
    }

    #[test]
    fn shift_by_huge_amount() {
        let huge = big("100000000000000000000000");
        assert_eq!(i(-7).shr(&huge).unwrap(), i(-1));
        assert_eq!(i(7).shr(&huge).unwrap(), i(0));
        assert_eq!(i(7).shl(&-&huge).unwrap(), i(0));
        assert_eq!(i(0).shl(&huge).unwrap(), i(0));
        assert_eq!(i(7).shl(&huge).unwrap_err().kind(), crate::FailureKind::RangeOverflow);
    }

    #[test]
    fn bit_reference() {
        assert_eq!(i(5).bit(&i(0)), i(1));
        assert_eq!(i(5).bit(&i(1)), i(0));
        assert_eq!(i(5).bit(&i(-1)), i(0));
        assert_eq!(i(-1).bit(&i(1000)), i(1));
        assert_eq!(i(-2).bit(&i(0)), i(0));
        assert_eq!(big("-18446744073709551616").bit(&i(64)), i(1));
        assert_eq!(big("-18446744073709551616").bit(&i(3)), i(0));
        assert_eq!(big("18446744073709551616").bit(&big("100000000000000000000")), i(0));
    }

    #[test]
    fn lengths() {
        assert_eq!(i(0).bit_length(), 0);
        assert_eq!(i(255).bit_length(), 8);
        assert_eq!(i(-256).bit_length(), 8);
        assert_eq!(i(-257).bit_length(), 9);
        assert_eq!(i(i64::MIN).bit_length(), 63);
        assert_eq!(big("18446744073709551616").bit_length(), 65);
        assert_eq!(big("-18446744073709551616").bit_length(), 64);
        assert_eq!(i(1).byte_size(), 8);
        assert_eq!(big("18446744073709551616").byte_size(), 9);
    }

    #[test]
    fn bitwise_on_negative_big() {
        let a = big("-18446744073709551616");
        assert_eq!(&a & &i(-1), a);
        assert_eq!(&a | &i(1), big("-18446744073709551615"));
        assert_eq!(&a ^ &a, i(0));
        assert_eq!(!&a, big("18446744073709551615"));
        assert_eq!(&a & &big("18446744073709551616"), big("18446744073709551616"));
    }

    quickcheck! {
        fn bitwise_matches_bigint(a: Integer, b: Integer) -> bool {
            let (x, y) = (a.to_bigint(), b.to_bigint());
            (&a & &b).to_bigint() == &x & &y
                && (&a | &b).to_bigint() == &x | &y
                && (&a ^ &b).to_bigint() == &x ^ &y
                && (!&a).to_bigint() == !&x
        }

        fn shifts_match_bigint(a: Integer, n: u8) -> bool {
            let n = u64::from(n % 130);
            let amount = Integer::from(n);
            a.shl(&amount).unwrap().to_bigint() == a.to_bigint() << n
                && a.shr(&amount).unwrap().to_bigint() == a.to_bigint() >> n
        }

        fn bit_matches_shift(a: Integer, n: u8) -> TestResult {
            let n = Integer::from(i64::from(n));
            let expected = a.shr(&n).unwrap().is_odd() as i64;
            TestResult::from_bool(a.bit(&n) == Integer::from(expected))
        }
    }
}
