//! Waiting-time statistics from threshold sweeps
//!
//! Sweeping the peak-finding amplitude threshold converts the extrema scan
//! into a family of characteristic timescales: at each threshold, the
//! median waiting time between committed extrema.

use crate::find::peak_find;
use lcstats_core::{Error, Result};

/// Exact median of a sample (average of the two middle values for even
/// lengths). Returns NaN for an empty sample.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) * 0.5
    } else {
        sorted[mid]
    }
}

/// Median inter-extremum waiting time per amplitude threshold
///
/// For each threshold, runs [`peak_find`] and reports the median of the
/// waiting times between committed extrema, or NaN when the series never
/// reaches the threshold amplitude. O(k·n) for k thresholds.
///
/// # Errors
///
/// `InsufficientData` for fewer than 2 samples; `InvalidParameter` for any
/// non-positive threshold; `InvalidInput` for a length mismatch.
pub fn peak_find_timescales(
    times: &[f64],
    values: &[f64],
    thresholds: &[f64],
) -> Result<Vec<f64>> {
    if let Some(&bad) = thresholds
        .iter()
        .find(|&&t| !(t > 0.0) || !t.is_finite())
    {
        return Err(Error::InvalidParameter(format!(
            "peak-find threshold {bad} must be positive and finite"
        )));
    }

    let mut timescales = Vec::with_capacity(thresholds.len());
    for &threshold in thresholds {
        let extrema = peak_find(times, values, threshold)?;
        if extrema.has_peaks() {
            timescales.push(median(&extrema.intervals()));
        } else {
            timescales.push(f64::NAN);
        }
    }
    Ok(timescales)
}
