//! Per-statistic accumulation collections
//!
//! Each statistic family owns one or more collections that record exactly
//! one outcome per trial: a real value, or NaN as the canonical "undefined
//! for this trial" marker. After the trial loop, a collection summarizes
//! itself into a mean, standard deviation and defined-fraction triple.
//!
//! Sibling collections of one family must stay in lockstep: a trial either
//! appends to all of them or to none. The driver guarantees that by
//! finishing every fallible computation before the first append.

use lcstats_core::{is_nan_or_inf, mean_dropping_nan, std_dev_dropping_nan, Error, Result};
use std::fmt;

/// Aggregate of one scalar collection across trials
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// NaN-aware mean over all entries, nulls included
    pub mean: f64,
    /// NaN-aware sample standard deviation
    pub std_dev: f64,
    /// Fraction of entries that are finite; 0 for an empty collection
    pub defined_fraction: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}±{:.3}", self.mean, self.std_dev)
    }
}

/// Append-only scalar record, one entry per trial
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarCollection {
    name: String,
    file_stem: String,
    values: Vec<f64>,
}

impl ScalarCollection {
    pub fn new(name: impl Into<String>, file_stem: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_stem: file_stem.into(),
            values: Vec::new(),
        }
    }

    /// Display name for header rows
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stem of the auxiliary distribution file
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Record one real observation
    pub fn add(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Record the "undefined for this trial" marker
    pub fn add_null(&mut self) {
        self.values.push(f64::NAN);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Reset to the freshly constructed state
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Mean, standard deviation and defined-fraction over all entries
    pub fn summarize(&self) -> Summary {
        let defined_fraction = if self.values.is_empty() {
            0.0
        } else {
            let defined = self.values.iter().filter(|&&v| !is_nan_or_inf(v)).count();
            defined as f64 / self.values.len() as f64
        };
        Summary {
            mean: mean_dropping_nan(&self.values),
            std_dev: std_dev_dropping_nan(&self.values),
            defined_fraction,
        }
    }
}

/// One trial's full sampled function, e.g. a periodogram or ACF curve
#[derive(Debug, Clone, PartialEq)]
pub struct PairSample {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Append-only record of sampled functions, one per successful trial
///
/// Unlike [`ScalarCollection`] there is no null entry: a trial whose curve
/// is undefined simply skips this collection, and the sibling scalar cuts
/// carry the undefined signal instead.
#[derive(Debug, Clone, PartialEq)]
pub struct PairCollection {
    name: String,
    file_stem: String,
    samples: Vec<PairSample>,
}

impl PairCollection {
    pub fn new(name: impl Into<String>, file_stem: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_stem: file_stem.into(),
            samples: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Record one trial's curve
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the two sequences differ in length.
    pub fn add(&mut self, x: Vec<f64>, y: Vec<f64>) -> Result<()> {
        if x.len() != y.len() {
            return Err(Error::size_mismatch(x.len(), y.len(), "pair sample"));
        }
        self.samples.push(PairSample { x, y });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[PairSample] {
        &self.samples
    }

    /// Reset to the freshly constructed state
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_one_entry_per_trial() {
        let mut c = ScalarCollection::new("C1", "c1");
        c.add(0.4);
        c.add_null();
        c.add(0.6);
        assert_eq!(c.len(), 3);
        assert!(c.values()[1].is_nan());
    }

    #[test]
    fn test_summarize_with_nulls() {
        let mut c = ScalarCollection::new("cut", "cut");
        c.add(1.0);
        c.add(2.0);
        c.add(3.0);
        c.add_null();
        let s = c.summarize();
        assert_relative_eq!(s.mean, 2.0);
        assert_relative_eq!(s.std_dev, 1.0);
        assert_relative_eq!(s.defined_fraction, 0.75);
    }

    #[test]
    fn test_summarize_empty() {
        let c = ScalarCollection::new("cut", "cut");
        let s = c.summarize();
        assert!(s.mean.is_nan());
        assert!(s.std_dev.is_nan());
        assert_eq!(s.defined_fraction, 0.0);
    }

    #[test]
    fn test_infinite_values_count_as_undefined() {
        let mut c = ScalarCollection::new("cut", "cut");
        c.add(f64::INFINITY);
        c.add(1.0);
        let s = c.summarize();
        assert_relative_eq!(s.defined_fraction, 0.5);
    }

    #[test]
    fn test_clear_is_fresh_state() {
        let mut c = ScalarCollection::new("cut", "cut");
        c.add(5.0);
        c.clear();
        let fresh = ScalarCollection::new("cut", "cut");
        assert_eq!(c, fresh);
        let s = c.summarize();
        assert!(s.mean.is_nan());
        assert!(s.std_dev.is_nan());
        assert_eq!(s.defined_fraction, 0.0);
    }

    #[test]
    fn test_summary_display() {
        let mut c = ScalarCollection::new("cut", "cut");
        c.add(1.0);
        c.add(2.0);
        assert_eq!(c.summarize().to_string(), "1.500±0.707");
    }

    #[test]
    fn test_pair_collection_roundtrip() {
        let mut c = PairCollection::new("ACF", "acf");
        c.add(vec![0.0, 1.0], vec![1.0, 0.5]).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.samples()[0].x, vec![0.0, 1.0]);
        c.clear();
        assert!(c.is_empty());
    }

    #[test]
    fn test_pair_collection_length_mismatch() {
        let mut c = PairCollection::new("ACF", "acf");
        let result = c.add(vec![0.0, 1.0], vec![1.0]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        // The failed add must not leave a partial entry behind
        assert!(c.is_empty());
    }
}
