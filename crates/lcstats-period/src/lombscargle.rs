//! Lomb-Scargle periodogram
//!
//! The classic tau-shifted Scargle periodogram for unevenly sampled data,
//! normalized by the sample variance so peak heights follow the standard
//! exponential false-alarm statistics under white Gaussian noise.

use lcstats_core::{check_sorted, Error, Result};

/// Shortest frequency the automatic grid will probe, cycles per time unit.
const MIN_FREQUENCY_FLOOR: f64 = 0.005;
/// Frequency oversampling factor relative to the 1/span natural width.
const OVERSAMPLING: f64 = 4.0;

/// The automatically chosen frequency range of a periodogram
///
/// Runs from `max(1/span, 0.005)` to the pseudo-Nyquist frequency
/// `n/(2·span)`, stepped at `1/(4·span)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyGrid {
    pub f_min: f64,
    pub f_max: f64,
    pub step: f64,
    /// Effective number of independent frequencies, used by the analytic
    /// false-alarm statistics.
    pub independent: usize,
}

impl FrequencyGrid {
    /// Materialize the grid frequencies
    pub fn frequencies(&self) -> Vec<f64> {
        let mut freqs = Vec::new();
        let mut k = 0usize;
        loop {
            let f = self.f_min + k as f64 * self.step;
            if f > self.f_max {
                break;
            }
            freqs.push(f);
            k += 1;
        }
        freqs
    }
}

/// Derive the automatic frequency grid for a time sampling
///
/// # Errors
///
/// `InsufficientData` for fewer than 2 samples; `Undefined` when the span
/// is zero or so long relative to the sample count that the range is
/// empty (pseudo-Nyquist below the frequency floor).
pub fn frequency_grid(times: &[f64]) -> Result<FrequencyGrid> {
    if times.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: times.len(),
        });
    }
    check_sorted(times)?;
    let span = times[times.len() - 1] - times[0];
    if span <= 0.0 {
        return Err(Error::undefined("zero time span has no frequency grid"));
    }

    let f_min = (1.0 / span).max(MIN_FREQUENCY_FLOOR);
    let f_max = times.len() as f64 / (2.0 * span);
    if f_max <= f_min {
        return Err(Error::undefined(
            "pseudo-Nyquist frequency below the search floor",
        ));
    }
    let step = 1.0 / (OVERSAMPLING * span);
    let independent = ((f_max - f_min) * span).ceil().max(1.0) as usize;

    Ok(FrequencyGrid {
        f_min,
        f_max,
        step,
        independent,
    })
}

/// Normalized Lomb-Scargle power at the grid frequencies
///
/// # Errors
///
/// `Undefined` for a constant series (zero variance); `InsufficientData`
/// for fewer than 2 samples; `InvalidInput` for shape violations.
pub fn lomb_scargle(times: &[f64], values: &[f64], grid: &FrequencyGrid) -> Result<Vec<f64>> {
    if times.len() != values.len() {
        return Err(Error::size_mismatch(
            times.len(),
            values.len(),
            "periodogram times/values",
        ));
    }
    if times.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: times.len(),
        });
    }

    let n = times.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    if variance <= 0.0 {
        return Err(Error::undefined("constant series has no periodogram"));
    }

    let residuals: Vec<f64> = values.iter().map(|&v| v - mean).collect();
    let freqs = grid.frequencies();
    let mut powers = Vec::with_capacity(freqs.len());

    for &f in &freqs {
        let omega = 2.0 * std::f64::consts::PI * f;

        // Scargle's tau makes the power invariant under time shifts
        let (mut sin2, mut cos2) = (0.0, 0.0);
        for &t in times {
            let phase = 2.0 * omega * t;
            sin2 += phase.sin();
            cos2 += phase.cos();
        }
        let tau = sin2.atan2(cos2) / (2.0 * omega);

        let (mut cross_cos, mut cross_sin) = (0.0, 0.0);
        let (mut norm_cos, mut norm_sin) = (0.0, 0.0);
        for (&t, &r) in times.iter().zip(&residuals) {
            let phase = omega * (t - tau);
            let (s, c) = phase.sin_cos();
            cross_cos += r * c;
            cross_sin += r * s;
            norm_cos += c * c;
            norm_sin += s * s;
        }

        let cos_term = if norm_cos > 0.0 {
            cross_cos * cross_cos / norm_cos
        } else {
            0.0
        };
        let sin_term = if norm_sin > 0.0 {
            cross_sin * cross_sin / norm_sin
        } else {
            0.0
        };
        powers.push((cos_term + sin_term) / (2.0 * variance));
    }

    Ok(powers)
}

/// Period of the single highest significant periodogram peak
///
/// Ties for maximum power resolve to the first occurrence in frequency
/// order.
///
/// # Errors
///
/// `Undefined` when no peak exceeds the threshold (soft: the trial
/// records a null); `InvalidInput` for shape violations or an empty grid.
pub fn best_period(freqs: &[f64], powers: &[f64], threshold: f64) -> Result<f64> {
    if freqs.len() != powers.len() {
        return Err(Error::size_mismatch(
            freqs.len(),
            powers.len(),
            "periodogram freqs/powers",
        ));
    }
    if freqs.is_empty() {
        return Err(Error::InvalidInput(
            "periodogram must contain at least one frequency".to_string(),
        ));
    }

    let (mut best_idx, mut best_power) = (0usize, f64::NEG_INFINITY);
    for (i, &p) in powers.iter().enumerate() {
        // Strict comparison keeps the first occurrence on ties
        if p > best_power {
            best_idx = i;
            best_power = p;
        }
    }

    if best_power > threshold {
        Ok(1.0 / freqs[best_idx])
    } else {
        Err(Error::undefined("no periodogram peak above the threshold"))
    }
}

/// Periodogram over the automatic frequency grid
///
/// Convenience wrapper returning `(frequencies, powers)`.
pub fn periodogram(times: &[f64], values: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    let grid = frequency_grid(times)?;
    let powers = lomb_scargle(times, values, &grid)?;
    Ok((grid.frequencies(), powers))
}
