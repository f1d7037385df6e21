//! Light-curve series utilities
//!
//! A light curve enters the pipeline as a pair of parallel vectors:
//! non-decreasing times and flux (later magnitude) values. Times must never
//! be NaN; values may be, and the NaN pairs are stripped before any engine
//! runs. All engines assume the invariants enforced here.

use crate::error::{Error, Result};
use crate::utils::quantile;

/// Minimum number of samples any timescale engine can work with.
pub const MIN_SAMPLES: usize = 2;

/// A validated light-curve sample
///
/// Owns parallel time and value vectors with the invariants every engine
/// assumes already enforced: equal lengths, non-decreasing times, no NaN
/// times. Values may still be NaN only when constructed via
/// [`TimeSeries::new`]; [`TimeSeries::from_fluxes`] strips them.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Wrap already-validated magnitude data
    ///
    /// # Errors
    ///
    /// `InvalidInput` for mismatched lengths, NaN times, or unsorted
    /// times.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(Error::size_mismatch(
                times.len(),
                values.len(),
                "times/values",
            ));
        }
        if times.iter().any(|t| t.is_nan()) {
            return Err(Error::InvalidInput("times must not contain NaN".to_string()));
        }
        check_sorted(&times)?;
        Ok(Self { times, values })
    }

    /// Build a magnitude series from raw flux measurements
    ///
    /// Converts flux to magnitude and strips samples whose flux had no
    /// magnitude (non-positive or NaN).
    pub fn from_fluxes(times: &[f64], fluxes: &[f64]) -> Result<Self> {
        let mags = flux_to_mag(fluxes);
        let (times, values) = remove_nans(times, &mags)?;
        check_sorted(&times)?;
        Ok(Self { times, values })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Total observed time span
    pub fn span(&self) -> f64 {
        if self.times.is_empty() {
            0.0
        } else {
            self.times[self.times.len() - 1] - self.times[0]
        }
    }
}

/// Drop pairs whose value is NaN, preserving relative order
///
/// # Errors
///
/// `InvalidInput` on length mismatch or a NaN time (times must never be
/// NaN; a NaN time indicates a caller bug, not a data condition).
pub fn remove_nans(times: &[f64], values: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if times.len() != values.len() {
        return Err(Error::size_mismatch(
            times.len(),
            values.len(),
            "times/values",
        ));
    }
    if times.iter().any(|t| t.is_nan()) {
        return Err(Error::InvalidInput("times must not contain NaN".to_string()));
    }
    let mut out_times = Vec::with_capacity(times.len());
    let mut out_values = Vec::with_capacity(values.len());
    for (&t, &v) in times.iter().zip(values) {
        if !v.is_nan() {
            out_times.push(t);
            out_values.push(v);
        }
    }
    Ok((out_times, out_values))
}

/// Verify the non-decreasing-time invariant
pub fn check_sorted(times: &[f64]) -> Result<()> {
    if times.windows(2).any(|w| w[1] < w[0]) {
        return Err(Error::InvalidInput(
            "times must be sorted in ascending order".to_string(),
        ));
    }
    Ok(())
}

/// Convert flux measurements to magnitudes
///
/// m = -2.5 log10(flux). Non-positive or NaN flux has no magnitude and maps
/// to NaN, to be stripped by [`remove_nans`].
pub fn flux_to_mag(fluxes: &[f64]) -> Vec<f64> {
    fluxes
        .iter()
        .map(|&f| {
            if f > 0.0 {
                -2.5 * f.log10()
            } else {
                f64::NAN
            }
        })
        .collect()
}

/// 5th-to-95th percentile amplitude of a magnitude sample
///
/// The robust amplitude that normalizes the Δm-Δt and peak-finding cuts.
///
/// # Errors
///
/// Propagates `InsufficientData` for an empty sample.
pub fn amplitude(mags: &[f64]) -> Result<f64> {
    let low = quantile(mags, 0.05)?;
    let high = quantile(mags, 0.95)?;
    Ok(high - low)
}

/// C1 variability index
///
/// Position of the median inside the 5-95 percentile envelope:
/// `(median - q05) / (q95 - q05)`. Distinguishes burst-dominated from
/// fade-dominated variability independent of overall amplitude.
///
/// # Errors
///
/// `Undefined` when the envelope has zero width (a constant or
/// near-constant light curve); `InsufficientData` for an empty sample.
pub fn c1_index(mags: &[f64]) -> Result<f64> {
    let low = quantile(mags, 0.05)?;
    let high = quantile(mags, 0.95)?;
    let median = quantile(mags, 0.5)?;
    let spread = high - low;
    if spread <= 0.0 {
        return Err(Error::undefined("zero-amplitude light curve has no C1"));
    }
    Ok((median - low) / spread)
}
