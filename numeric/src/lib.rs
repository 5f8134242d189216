//! Numeric tower of the runtime: machine/big integers, floats, rationals and the coercion
//! protocol that lets them meet in one operation.

#[cfg(any(test, feature = "arb"))]
mod arb;
mod coerce;
mod context;
mod error;
pub mod float;
mod integer;
mod limits;
pub mod marshal;
mod rational;
mod round;
mod value;

pub use coerce::BinOp;
pub use context::{Context, Warning};
pub use error::{FailureKind, NumericError};
pub use integer::{Big, Integer};
pub use limits::Limits;
pub use rational::Rational;
pub use round::{round_f64, RoundMode};
pub use value::{Coercible, Numeric, NumericKind};

pub type Result<T, E = NumericError> = std::result::Result<T, E>;
