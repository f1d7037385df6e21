//! Alternating-extrema scan
//!
//! Identifies the sequence of local minima and maxima in a magnitude series
//! whose successive excursions exceed a minimum amplitude. The scan keeps a
//! running extremum that later samples may extend in the current direction;
//! a reversal of at least the threshold amplitude commits it and opens a new
//! extremum in the opposite direction.

use lcstats_core::{check_sorted, Error, Result};

/// Committed turning points of a magnitude series
///
/// The first entry is always the seed sample; subsequent entries alternate
/// between maxima and minima. A series that never moves by the threshold
/// amplitude yields a single-point result with no peaks.
#[derive(Debug, Clone, PartialEq)]
pub struct Extrema {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl Extrema {
    pub(crate) fn new(times: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        Self { times, values }
    }

    /// Times of the committed extrema
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Magnitudes of the committed extrema
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of recorded points, seed included
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Whether any excursion reached the threshold amplitude
    pub fn has_peaks(&self) -> bool {
        self.times.len() > 1
    }

    /// Waiting times between consecutive recorded points
    pub fn intervals(&self) -> Vec<f64> {
        self.times.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

fn validate(times: &[f64], values: &[f64], min_amplitude: f64) -> Result<()> {
    if times.len() != values.len() {
        return Err(Error::size_mismatch(
            times.len(),
            values.len(),
            "peak-find times/values",
        ));
    }
    if !(min_amplitude > 0.0) || !min_amplitude.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "minimum amplitude {min_amplitude} must be positive and finite"
        )));
    }
    if times.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: times.len(),
        });
    }
    check_sorted(times)
}

/// Find the alternating extrema of a magnitude series
///
/// Seeded with the first sample; the scan then looks for the first sample
/// at least `min_amplitude` away, fixing the initial direction, and
/// alternates from there. Ties exactly `min_amplitude` from the running
/// extremum commit a turning point; a sample exactly equal to the running
/// extremum does not extend it. O(n).
///
/// # Errors
///
/// `InsufficientData` for fewer than 2 samples; `InvalidInput` /
/// `InvalidParameter` for length mismatches, unsorted times, or a
/// non-positive threshold.
pub fn peak_find(times: &[f64], values: &[f64], min_amplitude: f64) -> Result<Extrema> {
    validate(times, values, min_amplitude)?;

    let mut ext_times = vec![times[0]];
    let mut ext_values = vec![values[0]];

    // Initial direction: first sample differing from the seed by the
    // threshold amplitude. A series that never gets there has no peaks.
    let seed = values[0];
    let Some(start) = values
        .iter()
        .position(|&v| (v - seed).abs() >= min_amplitude)
    else {
        return Ok(Extrema::new(ext_times, ext_values));
    };

    ext_times.push(times[start]);
    ext_values.push(values[start]);
    let mut rising = values[start] > seed;

    for i in start + 1..values.len() {
        let v = values[i];
        let last = *ext_values.last().unwrap();
        if rising {
            if v > last {
                // Extend the running maximum
                *ext_times.last_mut().unwrap() = times[i];
                *ext_values.last_mut().unwrap() = v;
            } else if last - v >= min_amplitude {
                // Committed: the reversal opens a new minimum
                ext_times.push(times[i]);
                ext_values.push(v);
                rising = false;
            }
        } else if v < last {
            *ext_times.last_mut().unwrap() = times[i];
            *ext_values.last_mut().unwrap() = v;
        } else if v - last >= min_amplitude {
            ext_times.push(times[i]);
            ext_values.push(v);
            rising = true;
        }
    }

    Ok(Extrema::new(ext_times, ext_values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_series_keeps_every_point() {
        let times = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let values = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let extrema = peak_find(&times, &values, 0.5).unwrap();
        assert_eq!(extrema.len(), 6);
        assert_eq!(extrema.times(), &times);
        assert_eq!(extrema.values(), &values);
    }

    #[test]
    fn test_flat_series_single_point() {
        let times = [0.0, 1.0, 2.0];
        let values = [0.3, 0.4, 0.35];
        let extrema = peak_find(&times, &values, 1.0).unwrap();
        assert_eq!(extrema.len(), 1);
        assert!(!extrema.has_peaks());
        assert_eq!(extrema.times(), &[0.0]);
        assert_eq!(extrema.values(), &[0.3]);
    }

    #[test]
    fn test_monotonic_rise_extends_single_extremum() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let values = [0.0, 1.0, 2.0, 3.0];
        let extrema = peak_find(&times, &values, 0.5).unwrap();
        // Seed plus one continually extended maximum
        assert_eq!(extrema.len(), 2);
        assert_eq!(extrema.times(), &[0.0, 3.0]);
        assert_eq!(extrema.values(), &[0.0, 3.0]);
    }

    #[test]
    fn test_small_wiggles_ignored() {
        let times = [0.0, 1.0, 2.0, 3.0, 4.0];
        let values = [0.0, 2.0, 1.9, 2.1, 0.0];
        let extrema = peak_find(&times, &values, 1.0).unwrap();
        // The 1.9/2.1 wiggle is below threshold; the maximum extends to 2.1
        assert_eq!(extrema.values(), &[0.0, 2.1, 0.0]);
        assert_eq!(extrema.times(), &[0.0, 3.0, 4.0]);
    }

    #[test]
    fn test_tie_at_exact_threshold_commits() {
        let times = [0.0, 1.0, 2.0];
        let values = [0.0, 1.0, 0.0];
        // Reversal of exactly min_amplitude commits the turning point
        let extrema = peak_find(&times, &values, 1.0).unwrap();
        assert_eq!(extrema.len(), 3);
    }

    #[test]
    fn test_equal_value_does_not_extend() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let values = [0.0, 2.0, 2.0, 0.0];
        let extrema = peak_find(&times, &values, 1.0).unwrap();
        // The plateau's second sample leaves the running maximum at t=1
        assert_eq!(extrema.times(), &[0.0, 1.0, 3.0]);
        assert_eq!(extrema.values(), &[0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_falling_start() {
        let times = [0.0, 1.0, 2.0];
        let values = [1.0, 0.0, 1.0];
        let extrema = peak_find(&times, &values, 0.5).unwrap();
        assert_eq!(extrema.values(), &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_too_few_samples() {
        let result = peak_find(&[0.0], &[1.0], 0.5);
        assert!(matches!(
            result,
            Err(Error::InsufficientData {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(matches!(
            peak_find(&[0.0, 1.0], &[0.0, 1.0], 0.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            peak_find(&[0.0, 1.0], &[0.0, 1.0], -1.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            peak_find(&[0.0, 1.0], &[0.0, 1.0], f64::NAN),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            peak_find(&[0.0, 1.0, 2.0], &[0.0, 1.0], 0.5),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unsorted_times_rejected() {
        assert!(matches!(
            peak_find(&[1.0, 0.0], &[0.0, 1.0], 0.5),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_intervals() {
        let times = [0.0, 1.0, 3.0, 6.0];
        let values = [0.0, 1.0, 0.0, 1.0];
        let extrema = peak_find(&times, &values, 0.5).unwrap();
        assert_eq!(extrema.intervals(), vec![1.0, 2.0, 3.0]);
    }
}
