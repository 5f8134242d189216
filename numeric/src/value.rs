use crate::{float, Integer, NumericError, Rational, Result};
use derive_more::{Display, From};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NumericKind {
    Integer,
    Float,
    Rational,
    /// A kind defined outside this crate, named for error messages.
    #[display(fmt = "{}", _0)]
    Other(&'static str),
}

/// Capability of a numeric kind to take part in mixed arithmetic.
///
/// When an operator does not know how to combine `lhs` and `rhs` directly, it calls
/// `rhs.coerce(lhs)` and retries once on the returned pair `(lhs', rhs')`.
pub trait Coercible: fmt::Debug + Send + Sync {
    fn kind(&self) -> NumericKind;

    /// The value as a double, for kinds that have one.
    fn to_f64(&self) -> Option<f64>;

    /// Converts `other` and `self` into a pair the operators handle, or `None` if impossible.
    fn coerce(&self, other: &Numeric) -> Option<(Numeric, Numeric)>;
}

/// A value of the numeric tower.
#[derive(Debug, Clone, From)]
pub enum Numeric {
    Integer(Integer),
    Float(f64),
    Rational(Rational),
    #[from(ignore)]
    Foreign(Arc<dyn Coercible>),
}

impl Numeric {
    pub fn kind(&self) -> NumericKind {
        match self {
            Numeric::Integer(_) => NumericKind::Integer,
            Numeric::Float(_) => NumericKind::Float,
            Numeric::Rational(_) => NumericKind::Rational,
            Numeric::Foreign(f) => f.kind(),
        }
    }

    pub fn foreign(value: impl Coercible + 'static) -> Self {
        Numeric::Foreign(Arc::new(value))
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Numeric::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Integer(i) => i.to_f64().ok(),
            Numeric::Float(f) => Some(*f),
            Numeric::Rational(r) => Some(r.to_f64()),
            Numeric::Foreign(f) => f.to_f64(),
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Numeric::Float(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Numeric::Integer(i) => i.is_zero(),
            Numeric::Float(f) => *f == 0.0,
            Numeric::Rational(r) => r.is_zero(),
            Numeric::Foreign(f) => f.to_f64() == Some(0.0),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Numeric::Integer(i) => i.is_negative(),
            Numeric::Float(f) => *f < 0.0,
            Numeric::Rational(r) => r.is_negative(),
            Numeric::Foreign(f) => f.to_f64().map_or(false, |f| f < 0.0),
        }
    }

    /// Numeric comparison across kinds, exact for integers against floats; `None` when unordered.
    pub fn num_cmp(&self, other: &Numeric) -> Option<Ordering> {
        use Numeric as N;
        match (self, other) {
            (N::Integer(a), N::Integer(b)) => Some(a.cmp(b)),
            (N::Float(a), N::Float(b)) => a.partial_cmp(b),
            (N::Float(a), N::Integer(b)) => float::cmp_integer(*a, b),
            (N::Integer(a), N::Float(b)) => float::cmp_integer(*b, a).map(Ordering::reverse),
            (N::Rational(a), N::Rational(b)) => Some(a.cmp(b)),
            (N::Rational(a), N::Integer(b)) => Some(a.cmp_integer(b)),
            (N::Integer(a), N::Rational(b)) => Some(b.cmp_integer(a).reverse()),
            (N::Rational(a), N::Float(b)) => a.cmp_f64(*b),
            (N::Float(a), N::Rational(b)) => b.cmp_f64(*a).map(Ordering::reverse),
            (a, b) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        }
    }

    /// Structural equality: same kind and same value, so `1.eql(1.0)` is false.
    pub fn eql(&self, other: &Numeric) -> bool {
        match (self, other) {
            (Numeric::Integer(a), Numeric::Integer(b)) => a == b,
            (Numeric::Float(a), Numeric::Float(b)) => a == b,
            (Numeric::Rational(a), Numeric::Rational(b)) => a == b,
            (Numeric::Foreign(a), Numeric::Foreign(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }

    /// Hash consistent with [`eql`](Numeric::eql).
    pub fn eql_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Numeric::Integer(i) => {
                state.write_u8(0);
                i.hash(state);
            }
            Numeric::Float(f) => {
                state.write_u8(1);
                // 0.0 and -0.0 are eql
                let f = if *f == 0.0 { 0.0 } else { *f };
                state.write_u64(f.to_bits());
            }
            Numeric::Rational(r) => {
                state.write_u8(2);
                r.hash(state);
            }
            Numeric::Foreign(f) => {
                state.write_u8(3);
                state.write_usize(Arc::as_ptr(f) as *const () as usize);
            }
        }
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.num_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.num_cmp(other)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Integer(value.into())
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(i) => write!(f, "{}", i),
            Numeric::Float(x) => f.write_str(&float::to_s(*x)),
            Numeric::Rational(r) => write!(f, "{}", r),
            Numeric::Foreign(x) => write!(f, "{:?}", x),
        }
    }
}

impl FromStr for Numeric {
    type Err = NumericError;

    /// Parses integers, floats in their text form, and `(a/b)` rationals.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains('/') {
            return s.parse().map(Numeric::Rational);
        }
        if let Ok(i) = s.parse::<Integer>() {
            return Ok(Numeric::Integer(i));
        }
        float::parse(s).map(Numeric::Float)
    }
}

impl Coercible for Integer {
    fn kind(&self) -> NumericKind {
        NumericKind::Integer
    }

    fn to_f64(&self) -> Option<f64> {
        Integer::to_f64(self).ok()
    }

    fn coerce(&self, other: &Numeric) -> Option<(Numeric, Numeric)> {
        match other {
            Numeric::Integer(i) => Some((Numeric::Integer(i.clone()), Numeric::Integer(self.clone()))),
            other => Some((Numeric::Float(other.as_f64()?), Numeric::Float(Integer::to_f64(self).ok()?))),
        }
    }
}

impl Coercible for f64 {
    fn kind(&self) -> NumericKind {
        NumericKind::Float
    }

    fn to_f64(&self) -> Option<f64> {
        Some(*self)
    }

    fn coerce(&self, other: &Numeric) -> Option<(Numeric, Numeric)> {
        Some((Numeric::Float(other.as_f64()?), Numeric::Float(*self)))
    }
}

impl Coercible for Rational {
    fn kind(&self) -> NumericKind {
        NumericKind::Rational
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Rational::to_f64(self))
    }

    fn coerce(&self, other: &Numeric) -> Option<(Numeric, Numeric)> {
        match other {
            Numeric::Integer(i) => Some((Numeric::Rational(i.into()), Numeric::Rational(self.clone()))),
            Numeric::Rational(r) => Some((Numeric::Rational(r.clone()), Numeric::Rational(self.clone()))),
            other => Some((Numeric::Float(other.as_f64()?), Numeric::Float(Rational::to_f64(self)))),
        }
    }
}

impl Coercible for Numeric {
    fn kind(&self) -> NumericKind {
        Numeric::kind(self)
    }

    fn to_f64(&self) -> Option<f64> {
        self.as_f64()
    }

    fn coerce(&self, other: &Numeric) -> Option<(Numeric, Numeric)> {
        match self {
            Numeric::Integer(i) => i.coerce(other),
            Numeric::Float(f) => f.coerce(other),
            Numeric::Rational(r) => r.coerce(other),
            Numeric::Foreign(f) => f.coerce(other),
        }
    }
}
