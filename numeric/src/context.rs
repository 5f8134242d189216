use crate::{Integer, Limits};
use derive_more::Display;

/// Diagnostics raised by an operation that still produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Warning {
    #[display(fmt = "in a**b, b may be too big")]
    PowMayBeTooBig { base_bits: u64, exponent: Integer },
}

/// Caller-owned evaluation state: the active [`Limits`] and the warnings collected so far.
///
/// Every thread brings its own context, so nothing here needs synchronization.
#[derive(Debug, Clone, Default)]
pub struct Context {
    limits: Limits,
    warnings: Vec<Warning>,
}

impl Context {
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            warnings: Vec::new(),
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn warn(&mut self, warning: Warning) {
        match &warning {
            Warning::PowMayBeTooBig { base_bits, exponent } => {
                tracing::warn!(base_bits, %exponent, "{}", warning)
            }
        }
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}
