use crate::value::NumericKind;
use derive_more::{Display, Error};

/// Coarse classification of every failure the numeric layer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FailureKind {
    DivisionByZero,
    RangeOverflow,
    DomainError,
    CoercionFailure,
    UnboundedSequence,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum NumericError {
    #[display(fmt = "divided by 0")]
    ZeroDivision,
    #[display(fmt = "{}", _0)]
    RangeOverflow(#[error(ignore)] String),
    #[display(fmt = "{}", _0)]
    Domain(#[error(ignore)] String),
    #[display(fmt = "{} can't be coerced into {}", from, into)]
    Coercion { from: NumericKind, into: NumericKind },
    #[display(fmt = "coerce must return [x, y], got [{}, {}]", left, right)]
    MalformedCoercion { left: NumericKind, right: NumericKind },
}

impl NumericError {
    pub fn kind(&self) -> FailureKind {
        match self {
            NumericError::ZeroDivision => FailureKind::DivisionByZero,
            NumericError::RangeOverflow(_) => FailureKind::RangeOverflow,
            NumericError::Domain(_) => FailureKind::DomainError,
            NumericError::Coercion { .. } | NumericError::MalformedCoercion { .. } => FailureKind::CoercionFailure,
        }
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        NumericError::Domain(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        NumericError::RangeOverflow(msg.into())
    }
}
