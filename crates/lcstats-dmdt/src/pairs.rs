//! Pairwise time/magnitude differences
//!
//! The Δm-Δt representation of a light curve is the set of all pairwise
//! (Δt, |Δm|) combinations. The binning engine requires Δt sorted
//! ascending, so the pairs are generated and jointly sorted here.

use lcstats_core::{check_sorted, Error, Result};

/// All pairwise (Δt, |Δm|) differences, jointly sorted by Δt ascending
///
/// For n samples this produces n·(n-1)/2 pairs; memory grows quadratically
/// with series length.
///
/// # Errors
///
/// `InsufficientData` for fewer than 2 samples; `InvalidInput` for a length
/// mismatch or unsorted times.
pub fn pairwise_deltas(times: &[f64], mags: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if times.len() != mags.len() {
        return Err(Error::size_mismatch(
            times.len(),
            mags.len(),
            "pairwise times/mags",
        ));
    }
    if times.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: times.len(),
        });
    }
    check_sorted(times)?;

    let n = times.len();
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in i + 1..n {
            pairs.push((times[j] - times[i], (mags[j] - mags[i]).abs()));
        }
    }
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let (delta_t, delta_m) = pairs.into_iter().unzip();
    Ok((delta_t, delta_m))
}
