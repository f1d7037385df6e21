//! FFT-based autocorrelation
//!
//! Implements the statistical-convention autocorrelation function: the
//! autocovariance at each lag normalized by the total sum of squared
//! deviations from the mean, so `acf[0] == 1` and the estimate decays with
//! the shrinking overlap at long lags. The circular correlation is computed
//! in the frequency domain with zero-padding to avoid aliasing.

use lcstats_core::{Error, Result};
use rustfft::{num_complex::Complex, FftPlanner};

/// Autocovariance sums at lags `0..n` via zero-padded FFT
///
/// Returns the raw sums `sum_i (x_i - mean)(x_{i+k} - mean)`; index 0 is
/// the total sum of squared deviations.
fn autocovariance_sums(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;

    // Zero-pad to at least 2n so the circular correlation of the padded
    // buffer equals the linear correlation of the original.
    let padded = (2 * n).next_power_of_two();
    let mut buffer: Vec<Complex<f64>> = values
        .iter()
        .map(|&x| Complex::new(x - mean, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(padded)
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(padded);
    fft.process(&mut buffer);

    // Squared magnitude of the spectrum is the transform of the
    // autocorrelation sequence.
    for c in buffer.iter_mut() {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }

    let ifft = planner.plan_fft_inverse(padded);
    ifft.process(&mut buffer);

    // The normalization factor accounts for RustFFT's convention
    let norm_factor = 1.0 / padded as f64;
    buffer.iter().take(n).map(|c| c.re * norm_factor).collect()
}

fn validate(values: &[f64], n_lags: usize) -> Result<()> {
    if n_lags == 0 {
        return Err(Error::InvalidParameter(
            "number of lags must be positive".to_string(),
        ));
    }
    if values.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: values.len(),
        });
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(Error::InvalidInput(
            "ACF input must not contain NaN".to_string(),
        ));
    }
    Ok(())
}

/// Statistical-convention ACF of an evenly sampled series
///
/// `acf[0] == 1` by normalization; lags at or beyond the series length are
/// zero-filled. Output length is exactly `n_lags`. O(n log n).
///
/// # Errors
///
/// `Undefined` for a constant series (zero variance is a soft failure,
/// never a silent division by zero); `InsufficientData` for fewer than 2
/// points;
/// `InvalidParameter` for `n_lags == 0`.
pub fn autocorr(values: &[f64], n_lags: usize) -> Result<Vec<f64>> {
    validate(values, n_lags)?;

    let sums = autocovariance_sums(values);
    let total = sums[0];
    if total <= 0.0 {
        return Err(Error::undefined("constant series has no autocorrelation"));
    }

    let mut acf = Vec::with_capacity(n_lags);
    for k in 0..n_lags {
        if k < sums.len() {
            acf.push(sums[k] / total);
        } else {
            acf.push(0.0);
        }
    }
    Ok(acf)
}

/// Statistical-convention ACF by direct summation
///
/// Same contract and output as [`autocorr`], computed in O(n·k) without
/// the FFT. Useful as a cross-check and faster for very small lag counts.
pub fn autocorr_direct(values: &[f64], n_lags: usize) -> Result<Vec<f64>> {
    validate(values, n_lags)?;

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let residuals: Vec<f64> = values.iter().map(|&x| x - mean).collect();
    let total: f64 = residuals.iter().map(|&r| r * r).sum();
    if total <= 0.0 {
        return Err(Error::undefined("constant series has no autocorrelation"));
    }

    let mut acf = Vec::with_capacity(n_lags);
    for k in 0..n_lags {
        if k < n {
            let mut sum = 0.0;
            for i in 0..n - k {
                sum += residuals[i] * residuals[i + k];
            }
            acf.push(sum / total);
        } else {
            acf.push(0.0);
        }
    }
    Ok(acf)
}

/// Overlap-corrected ACF variant
///
/// Rescales each lag by `n / (n - k)` before the lag-0 normalization, so
/// the shrinking overlap at long lags does not bias the estimate downward.
/// Same contract as [`autocorr`]; lags at or beyond the series length are
/// zero-filled.
pub fn autocorr_scargle(values: &[f64], n_lags: usize) -> Result<Vec<f64>> {
    validate(values, n_lags)?;

    let n = values.len();
    let sums = autocovariance_sums(values);
    let total = sums[0];
    if total <= 0.0 {
        return Err(Error::undefined("constant series has no autocorrelation"));
    }

    let mut acf = Vec::with_capacity(n_lags);
    for k in 0..n_lags {
        if k < n {
            let overlap = (n - k) as f64;
            acf.push(sums[k] * n as f64 / (overlap * total));
        } else {
            acf.push(0.0);
        }
    }
    Ok(acf)
}
