use crate::sequence::FloatSteps;
use crate::{ArithmeticSequence, Result, SequenceError};
use itertools::iterate;
use numeric::{Integer, Numeric};
use util::Extent;

/// Upper bound of the up-front allocation for a slice.
const MAX_PREALLOC: usize = 1 << 16;

fn check_count(n: i64) -> Result<u64> {
    u64::try_from(n).map_err(|_| SequenceError::NegativeCount(n))
}

/// `min(n, size)`.
fn clamp(n: u64, size: &Extent<Integer>) -> u64 {
    match size {
        Extent::Finite(Integer::Small(s)) if *s >= 0 => n.min(*s as u64),
        Extent::Finite(Integer::Small(_)) => 0,
        Extent::Finite(big) if big.is_negative() => 0,
        _ => n,
    }
}

/// `count` elements from `begin`, on machine words until an addition would overflow.
fn first_exact(begin: &Integer, step: &Integer, count: u64) -> Vec<Numeric> {
    let mut out = Vec::with_capacity((count as usize).min(MAX_PREALLOC));
    let mut remaining = count;
    let mut current = begin.clone();
    if let (Integer::Small(b), Integer::Small(s)) = (begin, step) {
        let (mut i, s) = (*b, *s);
        while remaining > 0 {
            out.push(Numeric::from(i));
            remaining -= 1;
            match i.checked_add(s) {
                Some(next) => i = next,
                None => {
                    tracing::debug!(at = i, step = s, "sequence leaves the machine word range");
                    current = &Integer::Small(i) + step;
                    break;
                }
            }
        }
        if remaining == 0 {
            return out;
        }
    }
    out.extend(
        iterate(current, |x| x + step)
            .take(remaining as usize)
            .map(Numeric::Integer),
    );
    out
}

/// Values at indices `from..to` of a float sequence, in the requested direction.
fn float_range(steps: &FloatSteps, from: u64, to: u64, descending: bool) -> Vec<Numeric> {
    let value = |i: u64| Numeric::Float(steps.value(i as f64));
    if descending {
        (from..to).rev().map(value).collect()
    } else {
        (from..to).map(value).collect()
    }
}

impl ArithmeticSequence {
    /// The first element, `None` when the sequence is empty.
    pub fn first(&self) -> Result<Option<Numeric>> {
        Ok(self.first_n(1)?.pop())
    }

    /// Up to `n` elements from the front.
    pub fn first_n(&self, n: i64) -> Result<Vec<Numeric>> {
        let n = check_count(n)?;
        let begin = self.begin_or_err()?;
        let count = clamp(n, &self.size()?);
        if let Some(steps) = self.float_steps()? {
            if self.step().is_zero() {
                return Ok(vec![Numeric::Float(steps.beg); count as usize]);
            }
            return Ok(float_range(&steps, 0, count, false));
        }
        match self.int_steps()? {
            Some(steps) => Ok(first_exact(steps.begin, steps.step, count)),
            None => Err(SequenceError::NotReal(begin.kind())),
        }
    }

    /// The last element, `None` when the sequence is empty.
    pub fn last(&self) -> Result<Option<Numeric>> {
        Ok(self.last_n(1)?.into_iter().next())
    }

    /// Up to `n` elements from the back, the last one first.
    pub fn last_n(&self, n: i64) -> Result<Vec<Numeric>> {
        if self.end().is_none() {
            return Err(SequenceError::Unbounded);
        }
        let n = check_count(n)?;
        let begin = self.begin_or_err()?;
        let size = self.size()?;
        if !size.is_finite() {
            return Err(SequenceError::Unbounded);
        }
        let count = clamp(n, &size);
        if let Some(steps) = self.float_steps()? {
            let total = clamp(u64::MAX, &size);
            return Ok(float_range(&steps, total - count, total, true));
        }
        let steps = self.int_steps()?.ok_or(SequenceError::NotReal(begin.kind()))?;
        let end = steps.end.ok_or(SequenceError::Unbounded)?;
        let last = steps.last(end, self.exclude_end())?;
        Ok(iterate(last, |x| x - steps.step)
            .take(count as usize)
            .map(Numeric::Integer)
            .collect())
    }
}
