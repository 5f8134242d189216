//! Float arithmetic with the runtime's floored semantics and text form.
use crate::{Integer, NumericError, Result};
use num_bigint::BigInt;
use num_traits::FromPrimitive;
use std::cmp::Ordering;

/// Floored division and modulus of floats.
pub fn divmod(x: f64, y: f64) -> Result<(f64, f64)> {
    if y == 0.0 {
        return Err(NumericError::ZeroDivision);
    }
    Ok(divmod_unchecked(x, y))
}

fn divmod_unchecked(x: f64, y: f64) -> (f64, f64) {
    let mut m = if y.is_infinite() && x.is_finite() { x } else { x % y };
    let mut d = if x.is_infinite() && !y.is_infinite() { x } else { (x - m) / y };
    if y * m < 0.0 {
        m += y;
        d -= 1.0;
    }
    (d, m)
}

/// Floored modulus; a zero divisor gives NaN rather than an error.
pub fn modulo(x: f64, y: f64) -> f64 {
    divmod_unchecked(x, y).1
}

/// Floored integer quotient.
pub fn div_floor(x: f64, y: f64) -> Result<Integer> {
    let (d, _) = divmod(x, y)?;
    Integer::from_f64(d.floor())
}

/// `x ** y`, refusing results that would be complex.
pub fn pow(x: f64, y: f64) -> Result<f64> {
    if x < 0.0 && y.is_finite() && y.fract() != 0.0 {
        return Err(NumericError::domain(format!(
            "{} ** {} has no real result",
            to_s(x),
            to_s(y)
        )));
    }
    Ok(x.powf(y))
}

/// Exact comparison, no rounding of either side; `None` for NaN.
pub fn cmp_integer(x: f64, i: &Integer) -> Option<Ordering> {
    if x.is_nan() {
        return None;
    }
    if x.is_infinite() {
        return Some(if x > 0.0 { Ordering::Greater } else { Ordering::Less });
    }
    if let Integer::Small(s) = i {
        // every i64 within ±2^53 is exact in f64
        if s.unsigned_abs() <= 1 << 53 {
            return x.partial_cmp(&(*s as f64));
        }
    }
    let whole = BigInt::from_f64(x.trunc())?;
    match whole.cmp(&i.to_bigint()) {
        Ordering::Equal => 0f64.partial_cmp(&-x.fract()),
        other => Some(other),
    }
}

/// Text form of a float: shortest round-tripping digits, exponent form outside `1e-4..1e16`.
pub fn to_s(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_owned();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let sign = if x.is_sign_negative() { "-" } else { "" };
    if x == 0.0 {
        return format!("{}0.0", sign);
    }
    let sci = format!("{:e}", x.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let decpt = exp + 1;
    let len = digits.len() as i32;
    if 0 < decpt && decpt <= 16 {
        if len <= decpt {
            format!("{}{}{}.0", sign, digits, "0".repeat((decpt - len) as usize))
        } else {
            let (int, frac) = digits.split_at(decpt as usize);
            format!("{}{}.{}", sign, int, frac)
        }
    } else if -4 < decpt && decpt <= 0 {
        format!("{}0.{}{}", sign, "0".repeat((-decpt) as usize), digits)
    } else {
        let (first, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        format!("{}{}.{}e{:+03}", sign, first, rest, decpt - 1)
    }
}

/// Parses the forms [`to_s`] produces, plus plain decimal literals with `_` separators.
pub fn parse(text: &str) -> Result<f64> {
    let text = text.trim();
    match text {
        "NaN" => return Ok(f64::NAN),
        "Infinity" => return Ok(f64::INFINITY),
        "-Infinity" => return Ok(f64::NEG_INFINITY),
        _ => {}
    }
    let cleaned = text.replace('_', "");
    let well_formed = !text.starts_with('_')
        && !text.ends_with('_')
        && !text.contains("__")
        && cleaned.chars().any(|c| c.is_ascii_digit())
        && cleaned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !well_formed {
        return Err(NumericError::domain(format!("invalid value for Float(): {:?}", text)));
    }
    cleaned
        .parse()
        .map_err(|_| NumericError::domain(format!("invalid value for Float(): {:?}", text)))
}
