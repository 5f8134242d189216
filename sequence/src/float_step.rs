//! Counting and placing the elements of a float-stepped sequence without accumulating error.

/// Number of elements from `beg` towards `end` in steps of `unit`, infinite for a zero step.
///
/// The count is taken from the quotient `(end - beg) / unit`, allowing for the rounding error
/// its three inputs may carry, so `1.0.step(2.0, 0.1)` has 11 elements even though ten additions
/// of `0.1` overshoot `2.0`.
pub fn float_step_size(beg: f64, end: f64, unit: f64, exclude_end: bool) -> f64 {
    if unit == 0.0 {
        return f64::INFINITY;
    }
    if unit.is_infinite() {
        let reachable = if unit > 0.0 { beg <= end } else { beg >= end };
        return if reachable { 1.0 } else { 0.0 };
    }
    let n = (end - beg) / unit;
    let err = ((beg.abs() + end.abs() + (end - beg).abs()) / unit.abs() * f64::EPSILON).min(0.5);
    if exclude_end {
        if n <= 0.0 {
            return 0.0;
        }
        let mut n = if n < 1.0 { 0.0 } else { (n - err).floor() };
        let d = (n + 1.0) * unit + beg;
        if (beg < end && d < end) || (beg > end && d > end) {
            n += 1.0;
        }
        n + 1.0
    } else {
        if n < 0.0 {
            return 0.0;
        }
        (n + err).floor() + 1.0
    }
}

/// Element `i`, computed afresh rather than by repeated addition and never past `end`.
pub(crate) fn float_step_value(beg: f64, unit: f64, end: f64, i: f64) -> f64 {
    if i == 0.0 {
        return beg;
    }
    let d = i * unit + beg;
    let overshoot = if unit >= 0.0 { end < d } else { d < end };
    if overshoot {
        end
    } else {
        d
    }
}
