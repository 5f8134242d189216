use crate::{float_step, Result, SequenceError};
use fnv::FnvHasher;
use numeric::{Integer, Numeric};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Seed of [`ArithmeticSequence::hash_code`].
const HASH_SEED: u64 = 0x6172_6974_685f_7365;

/// The expression a sequence was created from; it only shows up in the text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// `(begin..end).step(step)`
    RangeStep,
    /// `(begin..end) % step`
    RangePercent,
    /// `begin.step(end, step)`, or `begin.step(by: step, to: end)` with keywords
    NumericStep { keywords: bool },
}

/// An immutable stepped progression `begin, begin + step, ...` up to `end`.
///
/// Bounds and step are integers or floats. A missing `end` makes the sequence endless, a
/// missing `begin` leaves it with a size but nothing to iterate. A zero step repeats `begin`
/// forever.
#[derive(Debug, Clone)]
pub struct ArithmeticSequence {
    begin: Option<Numeric>,
    end: Option<Numeric>,
    step: Numeric,
    exclude_end: bool,
    origin: Origin,
}

/// Float view of a sequence with at least one float among begin, end and step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FloatSteps {
    pub beg: f64,
    pub end: f64,
    pub unit: f64,
    pub exclude_end: bool,
}

impl FloatSteps {
    pub fn count(&self) -> f64 {
        float_step::float_step_size(self.beg, self.end, self.unit, self.exclude_end)
    }

    pub fn value(&self, i: f64) -> f64 {
        float_step::float_step_value(self.beg, self.unit, self.end, i)
    }
}

/// Integer view of a sequence whose bounds and step are all integers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IntSteps<'a> {
    pub begin: &'a Integer,
    pub end: Option<&'a Integer>,
    pub step: &'a Integer,
}

fn check(value: &Numeric, what: &'static str) -> Result<()> {
    match value {
        Numeric::Integer(_) => Ok(()),
        Numeric::Float(f) if f.is_nan() => Err(SequenceError::NotANumber(what)),
        Numeric::Float(_) => Ok(()),
        other => Err(SequenceError::NotReal(other.kind())),
    }
}

fn to_f64(value: &Numeric) -> Result<f64> {
    match value {
        Numeric::Integer(i) => Ok(i.to_f64()?),
        Numeric::Float(f) => Ok(*f),
        other => Err(SequenceError::NotReal(other.kind())),
    }
}

fn opt_eql(a: &Option<Numeric>, b: &Option<Numeric>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.eql(b),
        (None, None) => true,
        _ => false,
    }
}

impl ArithmeticSequence {
    fn new(
        begin: Option<Numeric>,
        end: Option<Numeric>,
        step: Numeric,
        exclude_end: bool,
        origin: Origin,
    ) -> Result<Self> {
        if let Some(begin) = &begin {
            check(begin, "begin")?;
        }
        if let Some(end) = &end {
            check(end, "end")?;
        }
        check(&step, "step")?;
        let seq = Self {
            begin,
            end,
            step,
            exclude_end,
            origin,
        };
        if seq.step.is_zero() {
            tracing::warn!(sequence = %seq, "zero step, the first element repeats forever");
        }
        Ok(seq)
    }

    /// `(begin..end).step(step)`, or `...` when `exclude_end`.
    pub fn from_range(
        begin: Option<Numeric>,
        end: Option<Numeric>,
        exclude_end: bool,
        step: Numeric,
    ) -> Result<Self> {
        Self::new(begin, end, step, exclude_end, Origin::RangeStep)
    }

    /// `(begin..end) % step`, the same sequence as [`from_range`](Self::from_range).
    pub fn from_range_percent(
        begin: Option<Numeric>,
        end: Option<Numeric>,
        exclude_end: bool,
        step: Numeric,
    ) -> Result<Self> {
        Self::new(begin, end, step, exclude_end, Origin::RangePercent)
    }

    /// `begin.step(end, step)`; always includes `end`.
    pub fn from_numeric_step(begin: Numeric, end: Option<Numeric>, step: Numeric, keywords: bool) -> Result<Self> {
        Self::new(Some(begin), end, step, false, Origin::NumericStep { keywords })
    }

    pub fn begin(&self) -> Option<&Numeric> {
        self.begin.as_ref()
    }

    pub fn end(&self) -> Option<&Numeric> {
        self.end.as_ref()
    }

    pub fn step(&self) -> &Numeric {
        &self.step
    }

    pub fn exclude_end(&self) -> bool {
        self.exclude_end
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Whether any of begin, end and step is a float, which switches every operation to
    /// float stepping.
    pub fn is_float(&self) -> bool {
        self.step.is_float()
            || self.begin.as_ref().map_or(false, Numeric::is_float)
            || self.end.as_ref().map_or(false, Numeric::is_float)
    }

    pub(crate) fn begin_or_err(&self) -> Result<&Numeric> {
        self.begin.as_ref().ok_or(SequenceError::Beginless)
    }

    /// The float view; `None` for all-integer sequences.
    pub(crate) fn float_steps(&self) -> Result<Option<FloatSteps>> {
        if !self.is_float() {
            return Ok(None);
        }
        let unit = to_f64(&self.step)?;
        let beg = to_f64(self.begin_or_err()?)?;
        let end = match &self.end {
            Some(end) => to_f64(end)?,
            None if unit < 0.0 => f64::NEG_INFINITY,
            None => f64::INFINITY,
        };
        Ok(Some(FloatSteps {
            beg,
            end,
            unit,
            exclude_end: self.exclude_end,
        }))
    }

    /// The integer view; `None` as soon as a float is involved.
    pub(crate) fn int_steps(&self) -> Result<Option<IntSteps<'_>>> {
        let begin = self.begin_or_err()?;
        let int_end = match &self.end {
            None => Some(None),
            Some(Numeric::Integer(end)) => Some(Some(end)),
            Some(_) => None,
        };
        Ok(match (begin, int_end, &self.step) {
            (Numeric::Integer(begin), Some(end), Numeric::Integer(step)) => Some(IntSteps { begin, end, step }),
            _ => None,
        })
    }

    /// Hash of the four defining fields under a fixed seed, stable across runs.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = FnvHasher::with_key(HASH_SEED);
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl IntSteps<'_> {
    /// Exact last element, `begin + step * floor((end - begin) / step)`, stepping back once
    /// more when it equals an excluded `end`.
    pub fn last(&self, end: &Integer, exclude_end: bool) -> Result<Integer> {
        let len = (end - self.begin).div_floor(self.step)?;
        let last = self.begin + &(self.step * &len);
        if exclude_end && last == *end {
            Ok(&last - self.step)
        } else {
            Ok(last)
        }
    }
}

impl PartialEq for ArithmeticSequence {
    fn eq(&self, other: &Self) -> bool {
        opt_eql(&self.begin, &other.begin)
            && opt_eql(&self.end, &other.end)
            && self.step.eql(&other.step)
            && self.exclude_end == other.exclude_end
    }
}

impl Eq for ArithmeticSequence {}

impl Hash for ArithmeticSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for bound in [&self.begin, &self.end] {
            match bound {
                Some(value) => value.eql_hash(state),
                None => state.write_u8(0xff),
            }
        }
        self.step.eql_hash(state);
        state.write_u8(self.exclude_end as u8);
    }
}

struct Nil<'a>(Option<&'a Numeric>);

impl fmt::Display for Nil<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => f.write_str("nil"),
        }
    }
}

impl fmt::Display for ArithmeticSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            Origin::RangeStep | Origin::RangePercent => {
                f.write_str("((")?;
                if let Some(begin) = &self.begin {
                    write!(f, "{}", begin)?;
                }
                f.write_str(if self.exclude_end { "..." } else { ".." })?;
                if let Some(end) = &self.end {
                    write!(f, "{}", end)?;
                }
                let method = if self.origin == Origin::RangeStep { "step" } else { "%" };
                write!(f, ").{}({}))", method, self.step)
            }
            Origin::NumericStep { keywords: false } => write!(
                f,
                "({}.step({}, {}))",
                Nil(self.begin.as_ref()),
                Nil(self.end.as_ref()),
                self.step
            ),
            Origin::NumericStep { keywords: true } => {
                write!(f, "({}.step(by: {}", Nil(self.begin.as_ref()), self.step)?;
                if let Some(end) = &self.end {
                    write!(f, ", to: {}", end)?;
                }
                f.write_str("))")
            }
        }
    }
}

fn parse_bound(text: &str) -> Result<Option<Numeric>> {
    match text {
        "" | "nil" => Ok(None),
        text => Ok(Some(text.parse()?)),
    }
}

impl FromStr for ArithmeticSequence {
    type Err = SequenceError;

    /// Reads the text form produced by `Display`.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || SequenceError::Parse(s.to_owned());
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(bad)?;
        if let Some(range_call) = inner.strip_prefix('(') {
            let (range, call) = range_call.split_once(").").ok_or_else(bad)?;
            let (origin, arg) = match (call.strip_prefix("step("), call.strip_prefix("%(")) {
                (Some(arg), _) => (Origin::RangeStep, arg),
                (None, Some(arg)) => (Origin::RangePercent, arg),
                (None, None) => return Err(bad()),
            };
            let step = arg.strip_suffix(')').ok_or_else(bad)?.parse()?;
            // numbers never contain `..`, so the first one is the range operator
            let at = range.find("..").ok_or_else(bad)?;
            let exclude_end = range[at..].starts_with("...");
            let end_at = at + if exclude_end { 3 } else { 2 };
            let begin = parse_bound(&range[..at])?;
            let end = parse_bound(&range[end_at..])?;
            return Self::new(begin, end, step, exclude_end, origin);
        }
        let (receiver, args) = inner.split_once(".step(").ok_or_else(bad)?;
        let args = args.strip_suffix(')').ok_or_else(bad)?;
        let begin = receiver.parse()?;
        if let Some(keywords) = args.strip_prefix("by: ") {
            let (step, end) = match keywords.split_once(", to: ") {
                Some((step, end)) => (step, parse_bound(end)?),
                None => (keywords, None),
            };
            Self::from_numeric_step(begin, end, step.parse()?, true)
        } else {
            let (end, step) = args.split_once(", ").ok_or_else(bad)?;
            Self::from_numeric_step(begin, parse_bound(end)?, step.parse()?, false)
        }
    }
}
