//! Arithmetic sequences over the numeric tower: `(1..10).step(3)`, `1.0.step(2.0, 0.1)` and
//! friends, with exact integer stepping and error-compensated float stepping.

mod error;
mod float_step;
mod iter;
mod sequence;
mod size;
mod slice;

pub use error::SequenceError;
pub use float_step::float_step_size;
pub use iter::Iter;
pub use sequence::{ArithmeticSequence, Origin};
pub use util::Extent;

pub type Result<T, E = SequenceError> = std::result::Result<T, E>;
