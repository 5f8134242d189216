use crate::{ArithmeticSequence, Result};
use numeric::Integer;
use util::Extent;

impl ArithmeticSequence {
    /// Number of elements, infinite for endless, beginless and zero-step sequences.
    pub fn size(&self) -> Result<Extent<Integer>> {
        if self.begin().is_none() || self.end().is_none() || self.step().is_zero() {
            return Ok(Extent::Infinite);
        }
        if let Some(steps) = self.float_steps()? {
            let n = steps.count();
            if n.is_infinite() {
                return Ok(Extent::Infinite);
            }
            return Ok(Extent::Finite(Integer::from_f64(n)?));
        }
        match self.int_steps()? {
            Some(steps) => match steps.end {
                Some(end) => {
                    let len = (end - steps.begin).div_floor(steps.step)?;
                    if len.is_negative() {
                        return Ok(Extent::Finite(Integer::zero()));
                    }
                    let last = steps.begin + &(steps.step * &len);
                    if self.exclude_end() && last == *end {
                        Ok(Extent::Finite(len))
                    } else {
                        Ok(Extent::Finite(&len + 1))
                    }
                }
                None => Ok(Extent::Infinite),
            },
            None => Ok(Extent::Infinite),
        }
    }

    /// Whether the sequence has no elements at all.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.size()? == Extent::Finite(Integer::zero()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numeric::Numeric;
    use pretty_assertions::assert_eq;
    use quickcheck::{quickcheck, TestResult};

    fn seq(text: &str) -> ArithmeticSequence {
        text.parse().unwrap()
    }

    fn size(text: &str) -> Extent<Integer> {
        seq(text).size().unwrap()
    }

    fn finite(n: i64) -> Extent<Integer> {
        Extent::Finite(Integer::from(n))
    }

    #[test]
    fn integer_sizes() {
        assert_eq!(size("((1..10).step(3))"), finite(4));
        assert_eq!(size("((1...10).step(3))"), finite(3));
        assert_eq!(size("((1...10).step(9))"), finite(1));
        assert_eq!(size("((1...10).step(1))"), finite(9));
        assert_eq!(size("((10..1).step(-3))"), finite(4));
        assert_eq!(size("((10..1).step(3))"), finite(0));
        assert_eq!(size("((1..10).step(-1))"), finite(0));
        assert_eq!(size("((1...1).step(1))"), finite(0));
        assert_eq!(size("((1..1).step(1))"), finite(1));
        assert_eq!(
            size("((0..100000000000000000000).step(7))"),
            Extent::Finite("14285714285714285715".parse().unwrap())
        );
    }

    #[test]
    fn unbounded_sizes() {
        assert_eq!(size("((1..).step(3))"), Extent::Infinite);
        assert_eq!(size("((..10).step(3))"), Extent::Infinite);
        assert_eq!(size("((1..10).step(0))"), Extent::Infinite);
        assert_eq!(size("((1.0..10.0).step(0.0))"), Extent::Infinite);
        assert_eq!(size("(1.step(nil, 2))"), Extent::Infinite);
    }

    #[test]
    fn float_sizes() {
        assert_eq!(size("(1.0.step(2.0, 0.1))"), finite(11));
        assert_eq!(size("((1.0...2.0).step(0.1))"), finite(10));
        assert_eq!(size("((1..2.0).step(0.5))"), finite(3));
        assert_eq!(size("((1..2).step(0.5))"), finite(3));
        assert_eq!(size("((1...2).step(0.5))"), finite(2));
        assert_eq!(size("((2.0..1).step(-0.5))"), finite(3));
        assert_eq!(size("((1.0..2.0).step(Infinity))"), finite(1));
        assert_eq!(size("((1.0..-Infinity).step(-1))"), Extent::Infinite);
        assert!(seq("((1.0...1.0).step(1))").is_empty().unwrap());
    }

    quickcheck! {
        fn size_counts_elements(b: i16, e: i16, s: i8, excl: bool) -> TestResult {
            if s == 0 {
                return TestResult::discard();
            }
            let seq = ArithmeticSequence::from_range(
                Some(Numeric::from(i64::from(b))),
                Some(Numeric::from(i64::from(e))),
                excl,
                Numeric::from(i64::from(s)),
            )
            .unwrap();
            let (b, e, s) = (i64::from(b), i64::from(e), i64::from(s));
            let mut count = 0i64;
            let mut x = b;
            while (s > 0 && (x < e || (!excl && x == e))) || (s < 0 && (x > e || (!excl && x == e))) {
                count += 1;
                x += s;
            }
            TestResult::from_bool(seq.size().unwrap() == finite(count))
        }
    }
}
