//! Threshold-cut primitives
//!
//! Every timescale extractor in the toolkit reduces a curve to a scalar the
//! same way: scan a value sequence for the first (or last) index satisfying
//! a predicate and report the matching entry of a parallel position
//! sequence. Positions are typically time lags or bin edges; values may
//! contain NaN, which fails the numeric predicates, so undefined stretches
//! of a curve are skipped rather than matched.

use crate::error::{Error, Result};

/// Predicate applied to curve values during a cut scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Value strictly greater than the bound
    MoreThan(f64),
    /// Value strictly less than the bound
    LessThan(f64),
    /// Value is defined (not NaN)
    Defined,
}

impl Threshold {
    /// Evaluate the predicate. NaN fails both numeric comparisons.
    #[inline]
    pub fn holds(&self, value: f64) -> bool {
        match *self {
            Threshold::MoreThan(bound) => value > bound,
            Threshold::LessThan(bound) => value < bound,
            Threshold::Defined => !value.is_nan(),
        }
    }
}

fn validate(positions: &[f64], values: &[f64]) -> Result<()> {
    if positions.len() != values.len() {
        return Err(Error::size_mismatch(
            positions.len(),
            values.len(),
            "cut positions/values",
        ));
    }
    if positions.iter().any(|p| p.is_nan()) {
        return Err(Error::InvalidInput(
            "cut positions must not contain NaN".to_string(),
        ));
    }
    Ok(())
}

/// Position of the first value satisfying the predicate
///
/// Scans `values` from the start and returns `positions[i]` at the first
/// index where the predicate holds, or NaN if it never does. O(n).
///
/// # Errors
///
/// `InvalidInput` when the sequences differ in length or a position is NaN.
pub fn first_crossing(positions: &[f64], values: &[f64], threshold: Threshold) -> Result<f64> {
    validate(positions, values)?;
    for (pos, &val) in positions.iter().zip(values) {
        if threshold.holds(val) {
            return Ok(*pos);
        }
    }
    Ok(f64::NAN)
}

/// Position of the last value satisfying the predicate
///
/// Symmetric reverse scan of [`first_crossing`].
pub fn last_crossing(positions: &[f64], values: &[f64], threshold: Threshold) -> Result<f64> {
    validate(positions, values)?;
    for (pos, &val) in positions.iter().zip(values).rev() {
        if threshold.holds(val) {
            return Ok(*pos);
        }
    }
    Ok(f64::NAN)
}
