use derive_more::{Display, Error};
use numeric::{FailureKind, NumericError, NumericKind};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SequenceError {
    #[display(fmt = "{}", _0)]
    Numeric(NumericError),
    #[display(fmt = "cannot get the last element of endless arithmetic sequence")]
    Unbounded,
    #[display(fmt = "cannot iterate from nil")]
    Beginless,
    #[display(fmt = "negative array size (or size too big): {}", _0)]
    NegativeCount(#[error(ignore)] i64),
    #[display(fmt = "{} can't be coerced into Float", _0)]
    NotReal(#[error(ignore)] NumericKind),
    #[display(fmt = "NaN is not a valid sequence {}", _0)]
    NotANumber(#[error(ignore)] &'static str),
    #[display(fmt = "invalid arithmetic sequence: {:?}", _0)]
    Parse(#[error(ignore)] String),
}

impl SequenceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SequenceError::Numeric(e) => e.kind(),
            SequenceError::Unbounded => FailureKind::UnboundedSequence,
            SequenceError::NotReal(_) => FailureKind::CoercionFailure,
            SequenceError::Beginless
            | SequenceError::NegativeCount(_)
            | SequenceError::NotANumber(_)
            | SequenceError::Parse(_) => FailureKind::DomainError,
        }
    }
}

impl From<NumericError> for SequenceError {
    fn from(e: NumericError) -> Self {
        SequenceError::Numeric(e)
    }
}
