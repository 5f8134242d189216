use super::Integer;
use crate::{NumericError, Result};
use num_bigint::BigInt;
use num_traits::Num;

fn check_radix(radix: u32) -> Result<()> {
    if (2..=36).contains(&radix) {
        Ok(())
    } else {
        Err(NumericError::domain(format!("invalid radix {}", radix)))
    }
}

/// Strips `_` separators, which may only sit between two digits.
fn strip_separators(digits: &str) -> Option<String> {
    let mut out = String::with_capacity(digits.len());
    let mut prev_digit = false;
    let mut chars = digits.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            let next_digit = chars.peek().map_or(false, |n| *n != '_');
            if !prev_digit || !next_digit {
                return None;
            }
            prev_digit = false;
        } else {
            out.push(c);
            prev_digit = true;
        }
    }
    Some(out)
}

impl Integer {
    pub fn to_str_radix(&self, radix: u32) -> Result<String> {
        check_radix(radix)?;
        Ok(match self {
            Integer::Small(x) if radix == 10 => x.to_string(),
            Integer::Small(x) => BigInt::from(*x).to_str_radix(radix),
            Integer::Big(b) => b.as_bigint().to_str_radix(radix),
        })
    }

    /// Parses an optionally signed integer in `radix`, allowing `_` between digits.
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Integer> {
        check_radix(radix)?;
        let invalid = || NumericError::domain(format!("invalid value for Integer(): {:?}", text));
        let trimmed = text.trim();
        let (sign, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return Err(invalid());
        }
        let digits = strip_separators(digits).ok_or_else(invalid)?;
        let signed = format!("{}{}", sign, digits);
        if let Ok(small) = i64::from_str_radix(&signed, radix) {
            return Ok(Integer::Small(small));
        }
        BigInt::from_str_radix(&signed, radix)
            .map(Integer::from_big)
            .map_err(|_| invalid())
    }

    /// Digits in `base`, least significant first.
    pub fn digits(&self, base: &Integer) -> Result<Vec<Integer>> {
        if self.is_negative() {
            return Err(NumericError::domain("out of domain"));
        }
        if *base < Integer::Small(2) {
            return Err(NumericError::domain(format!("invalid radix {}", base)));
        }
        if self.is_zero() {
            return Ok(vec![Integer::zero()]);
        }
        if let (Integer::Small(x), Integer::Small(b)) = (self, base) {
            let (mut x, b) = (*x, *b);
            let mut out = Vec::new();
            while x > 0 {
                out.push(Integer::Small(x % b));
                x /= b;
            }
            return Ok(out);
        }
        let mut out = Vec::new();
        let mut x = self.clone();
        while !x.is_zero() {
            let (q, r) = x.divmod(base)?;
            out.push(r);
            x = q;
        }
        Ok(out)
    }
}
