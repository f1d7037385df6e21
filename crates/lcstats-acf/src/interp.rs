//! Uniform-grid interpolation and lag-curve compression
//!
//! The FFT autocorrelation path needs evenly spaced samples; irregularly
//! sampled light curves are linearly interpolated onto a uniform grid
//! first. Lags beyond the available data span are never extrapolated.
//!
//! Stored ACF curves are logarithmically subsampled: a lag is retained
//! only once it exceeds the previously kept lag by a fixed growth factor,
//! keeping per-trial storage near-logarithmic in the lag count.

use crate::acf::{autocorr, autocorr_scargle};
use lcstats_core::{check_sorted, Error, Result};

/// Default growth factor for [`log_compress`].
pub const DEFAULT_LAG_GROWTH: f64 = 1.05;

fn validate_grid_input(times: &[f64], values: &[f64], step: f64) -> Result<()> {
    if times.len() != values.len() {
        return Err(Error::size_mismatch(
            times.len(),
            values.len(),
            "interpolation times/values",
        ));
    }
    if times.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: times.len(),
        });
    }
    if !(step > 0.0) || !step.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "grid step {step} must be positive and finite"
        )));
    }
    if times.iter().any(|t| t.is_nan()) || values.iter().any(|v| v.is_nan()) {
        return Err(Error::InvalidInput(
            "interpolation input must not contain NaN".to_string(),
        ));
    }
    check_sorted(times)
}

/// Linearly interpolate onto an evenly spaced time grid
///
/// The grid starts at the first sample time and steps by `step` while it
/// remains within the observed span; no extrapolation happens past the
/// last sample.
///
/// # Errors
///
/// `InsufficientData` for fewer than 2 points; `InvalidParameter` for a
/// non-positive step; `InvalidInput` for shape/NaN/sortedness violations.
pub fn interpolate_uniform(
    times: &[f64],
    values: &[f64],
    step: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
    validate_grid_input(times, values, step)?;

    let t0 = times[0];
    let t_end = times[times.len() - 1];

    let mut grid_times = Vec::new();
    let mut grid_values = Vec::new();
    let mut segment = 0usize;

    let mut i = 0usize;
    loop {
        let t = t0 + i as f64 * step;
        if t > t_end {
            break;
        }
        // Advance to the segment containing t; on an exact knot hit the
        // later segment wins, so duplicate timestamps collapse to the
        // later measurement
        while segment + 2 < times.len() && times[segment + 1] <= t {
            segment += 1;
        }
        let (ta, tb) = (times[segment], times[segment + 1]);
        let (va, vb) = (values[segment], values[segment + 1]);
        let v = if tb > ta {
            va + (vb - va) * ((t - ta) / (tb - ta)).clamp(0.0, 1.0)
        } else {
            // Duplicate timestamps collapse to the later value
            vb
        };
        grid_times.push(t);
        grid_values.push(v);
        i += 1;
    }

    Ok((grid_times, grid_values))
}

/// The uniform lag grid matching an interpolated ACF
pub fn lag_grid(step: f64, n_lags: usize) -> Vec<f64> {
    (0..n_lags).map(|k| k as f64 * step).collect()
}

/// Interpolated statistical-convention ACF of an irregular series
///
/// Resamples onto a uniform grid of the given step and applies the FFT
/// autocorrelation. Output length is exactly `n_lags`; lags beyond the
/// resampled span are zero.
pub fn autocorr_interp(
    times: &[f64],
    values: &[f64],
    step: f64,
    n_lags: usize,
) -> Result<Vec<f64>> {
    let (_, grid_values) = interpolate_uniform(times, values, step)?;
    if grid_values.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: grid_values.len(),
        });
    }
    autocorr(&grid_values, n_lags)
}

/// Interpolated overlap-corrected ACF of an irregular series
pub fn autocorr_interp_scargle(
    times: &[f64],
    values: &[f64],
    step: f64,
    n_lags: usize,
) -> Result<Vec<f64>> {
    let (_, grid_values) = interpolate_uniform(times, values, step)?;
    if grid_values.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: grid_values.len(),
        });
    }
    autocorr_scargle(&grid_values, n_lags)
}

/// Logarithmically subsample a lag curve for storage
///
/// Always keeps the lag-0 sample and the first positive lag; afterwards a
/// sample is kept once its lag reaches `growth` times the previously kept
/// lag.
///
/// # Errors
///
/// `InvalidInput` on length mismatch; `InvalidParameter` for a growth
/// factor at or below 1.
pub fn log_compress(lags: &[f64], acf: &[f64], growth: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    if lags.len() != acf.len() {
        return Err(Error::size_mismatch(lags.len(), acf.len(), "lags/acf"));
    }
    if !(growth > 1.0) || !growth.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "lag growth factor {growth} must exceed 1"
        )));
    }

    let mut kept_lags = Vec::new();
    let mut kept_acf = Vec::new();
    let mut last_kept: Option<f64> = None;
    for (&lag, &val) in lags.iter().zip(acf) {
        let keep = match last_kept {
            None => true,
            Some(prev) if prev <= 0.0 => lag > prev,
            Some(prev) => lag >= prev * growth,
        };
        if keep {
            kept_lags.push(lag);
            kept_acf.push(val);
            last_kept = Some(lag);
        }
    }
    Ok((kept_lags, kept_acf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_interpolation_exact_on_linear_data() {
        let times = [0.0, 1.0, 3.0];
        let values = [0.0, 2.0, 6.0];
        let (gt, gv) = interpolate_uniform(&times, &values, 0.5).unwrap();
        assert_eq!(gt.len(), 7); // 0, 0.5, ..., 3.0
        for (&t, &v) in gt.iter().zip(&gv) {
            assert_abs_diff_eq!(v, 2.0 * t, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_interpolation_no_extrapolation() {
        let times = [0.0, 1.0];
        let values = [0.0, 1.0];
        let (gt, _) = interpolate_uniform(&times, &values, 0.3).unwrap();
        assert!(*gt.last().unwrap() <= 1.0);
    }

    #[test]
    fn test_interpolation_duplicate_times() {
        let times = [0.0, 1.0, 1.0, 2.0];
        let values = [0.0, 1.0, 3.0, 4.0];
        let (gt, gv) = interpolate_uniform(&times, &values, 1.0).unwrap();
        assert_eq!(gt, vec![0.0, 1.0, 2.0]);
        // The duplicate timestamp collapses to the later measurement
        assert_eq!(gv[1], 3.0);
    }

    #[test]
    fn test_interpolation_errors() {
        assert!(matches!(
            interpolate_uniform(&[0.0], &[1.0], 0.1),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(
            interpolate_uniform(&[0.0, 1.0], &[1.0, 2.0], 0.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            interpolate_uniform(&[1.0, 0.0], &[1.0, 2.0], 0.1),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_autocorr_interp_normalization() {
        let times: Vec<f64> = (0..100).map(|i| i as f64 * 0.13).collect();
        let values: Vec<f64> = times.iter().map(|&t| (t * 1.7).sin()).collect();
        let acf = autocorr_interp(&times, &values, 0.1, 50).unwrap();
        assert_eq!(acf.len(), 50);
        assert_relative_eq!(acf[0], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_lag_grid() {
        assert_eq!(lag_grid(0.5, 4), vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_log_compress_growth_law() {
        let lags: Vec<f64> = (0..1000).map(|k| k as f64 * 0.1).collect();
        let acf = vec![0.5; 1000];
        let (kept, _) = log_compress(&lags, &acf, 1.05).unwrap();
        // Lag 0 and the first positive lag are always kept
        assert_eq!(kept[0], 0.0);
        assert_relative_eq!(kept[1], 0.1);
        // Every later kept lag respects the growth law
        for w in kept[1..].windows(2) {
            assert!(w[1] >= w[0] * 1.05 - 1e-12);
        }
        // Compression actually happened
        assert!(kept.len() < lags.len() / 2);
    }

    #[test]
    fn test_log_compress_invalid_growth() {
        assert!(matches!(
            log_compress(&[0.0], &[1.0], 1.0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_log_compress_length_mismatch() {
        assert!(matches!(
            log_compress(&[0.0, 1.0], &[1.0], 1.05),
            Err(Error::InvalidInput(_))
        ));
    }
}
