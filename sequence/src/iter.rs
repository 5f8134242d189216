use crate::{ArithmeticSequence, Result, SequenceError};
use numeric::{Integer, Numeric};
use std::ops::ControlFlow;

/// Lazy iterator over the elements of an [`ArithmeticSequence`].
#[derive(Debug, Clone)]
pub struct Iter {
    state: State,
}

#[derive(Debug, Clone)]
enum State {
    Int {
        next: Integer,
        step: Integer,
        /// Inclusive bound; `None` for endless sequences.
        last: Option<Integer>,
    },
    Float {
        beg: f64,
        unit: f64,
        end: f64,
        count: f64,
        i: f64,
    },
    Repeat(Numeric),
    Done,
}

impl Iterator for Iter {
    type Item = Numeric;

    fn next(&mut self) -> Option<Numeric> {
        match &mut self.state {
            State::Int { next, step, last } => {
                if let Some(last) = last {
                    let past = if step.is_negative() { *next < *last } else { *next > *last };
                    if past {
                        self.state = State::Done;
                        return None;
                    }
                }
                let value = std::mem::replace(next, Integer::zero());
                *next = &value + &*step;
                Some(Numeric::Integer(value))
            }
            State::Float {
                beg,
                unit,
                end,
                count,
                i,
            } => {
                if *i >= *count {
                    self.state = State::Done;
                    return None;
                }
                let value = crate::float_step::float_step_value(*beg, *unit, *end, *i);
                *i += 1.0;
                Some(Numeric::Float(value))
            }
            State::Repeat(value) => Some(value.clone()),
            State::Done => None,
        }
    }
}

impl ArithmeticSequence {
    /// A lazy iterator; fails for sequences without a beginning.
    pub fn iter(&self) -> Result<Iter> {
        let begin = self.begin_or_err()?;
        if self.step().is_zero() {
            let value = match self.float_steps()? {
                Some(steps) => Numeric::Float(steps.beg),
                None => begin.clone(),
            };
            return Ok(Iter {
                state: State::Repeat(value),
            });
        }
        if let Some(steps) = self.float_steps()? {
            return Ok(Iter {
                state: State::Float {
                    beg: steps.beg,
                    unit: steps.unit,
                    end: steps.end,
                    count: steps.count(),
                    i: 0.0,
                },
            });
        }
        let steps = self.int_steps()?.ok_or(SequenceError::NotReal(begin.kind()))?;
        let last = match steps.end {
            Some(end) => Some(steps.last(end, self.exclude_end())?),
            None => None,
        };
        Ok(Iter {
            state: State::Int {
                next: steps.begin.clone(),
                step: steps.step.clone(),
                last,
            },
        })
    }

    /// Pushes every element into `f` until it breaks, returning the break value if any.
    pub fn each<B>(&self, mut f: impl FnMut(Numeric) -> ControlFlow<B>) -> Result<ControlFlow<B>> {
        for value in self.iter()? {
            if let ControlFlow::Break(b) = f(value) {
                return Ok(ControlFlow::Break(b));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// All elements; fails for sequences that never end.
    pub fn to_vec(&self) -> Result<Vec<Numeric>> {
        if !self.size()?.is_finite() {
            return Err(SequenceError::Unbounded);
        }
        Ok(self.iter()?.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    fn seq(text: &str) -> ArithmeticSequence {
        text.parse().unwrap()
    }

    fn show(values: impl IntoIterator<Item = Numeric>) -> String {
        values.into_iter().join(", ")
    }

    #[test]
    fn integer_iteration() {
        assert_eq!(show(seq("((1..10).step(3))").to_vec().unwrap()), "1, 4, 7, 10");
        assert_eq!(show(seq("((1...10).step(3))").to_vec().unwrap()), "1, 4, 7");
        assert_eq!(show(seq("((10..1).step(-4))").to_vec().unwrap()), "10, 6, 2");
        assert_eq!(show(seq("((1..0).step(1))").to_vec().unwrap()), "");
        assert_eq!(
            show(seq("((9223372036854775806..).step(1))").iter().unwrap().take(3)),
            "9223372036854775806, 9223372036854775807, 9223372036854775808"
        );
    }

    #[test]
    fn float_iteration() {
        assert_eq!(show(seq("((1.0..2.0).step(0.5))").to_vec().unwrap()), "1.0, 1.5, 2.0");
        assert_eq!(show(seq("((1...2).step(0.5))").to_vec().unwrap()), "1.0, 1.5");
        let tenths = seq("(1.0.step(2.0, 0.1))").to_vec().unwrap();
        assert_eq!(tenths.len(), 11);
        assert_eq!(tenths[3].to_string(), "1.3");
        assert_eq!(tenths[10].to_string(), "2.0");
        assert_eq!(show(seq("((1.0..).step(Infinity))").iter().unwrap()), "1.0");
        assert_eq!(show(seq("((1.5..).step(-1))").iter().unwrap().take(3)), "1.5, 0.5, -0.5");
    }

    #[test]
    fn zero_step_repeats() {
        assert_eq!(show(seq("((1..5).step(0))").iter().unwrap().take(3)), "1, 1, 1");
        assert_eq!(show(seq("((1..5).step(0.0))").iter().unwrap().take(2)), "1.0, 1.0");
        assert!(seq("((1..5).step(0))").to_vec().is_err());
    }

    #[test]
    fn early_exit() {
        let mut seen = Vec::new();
        let flow = seq("((1..).step(2))")
            .each(|x| {
                seen.push(x.clone());
                if x > Numeric::from(6) {
                    ControlFlow::Break(x)
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(show(seen), "1, 3, 5, 7");
        assert!(matches!(flow, ControlFlow::Break(x) if x == Numeric::from(7)));

        let flow: ControlFlow<()> = seq("((1..3).step(1))").each(|_| ControlFlow::Continue(())).unwrap();
        assert_eq!(flow, ControlFlow::Continue(()));
    }

    #[test]
    fn unusable_sequences() {
        let beginless = seq("((..5).step(1))");
        assert_eq!(beginless.iter().unwrap_err(), SequenceError::Beginless);
        assert_eq!(beginless.to_vec().unwrap_err(), SequenceError::Unbounded);
        assert_eq!(
            seq("((1..).step(1))").to_vec().unwrap_err().kind(),
            numeric::FailureKind::UnboundedSequence
        );
    }
}
