//! Logarithmic lag bins and per-bin quantiles
//!
//! Lag bins are log-spaced at 0.15 dex starting from 10^-1.97, extended
//! until they cover the light curve's total time span. Per-bin quantiles
//! use binary search over the pre-sorted Δt vector, so each bin lookup is
//! O(log p) in the pair count.

use lcstats_core::{quantile, Error, Result};

/// Base-10 exponent of the first bin edge.
const FIRST_EDGE_EXPONENT: f64 = -1.97;
/// Bin width in dex.
const EDGE_STEP_DEX: f64 = 0.15;

/// Log-spaced bin edges covering `[10^-1.97, span]`
///
/// Edges at `10^(-1.97 + 0.15 k)`, with the last edge the first one to
/// reach the span, so the final bin always closes. At least two edges (one
/// bin) are produced.
///
/// # Errors
///
/// `Undefined` for a non-positive span (a zero-span series has no lag
/// structure); `InvalidParameter` for NaN.
pub fn log_bin_edges(span: f64) -> Result<Vec<f64>> {
    if span.is_nan() {
        return Err(Error::InvalidParameter("span must not be NaN".to_string()));
    }
    if span <= 0.0 {
        return Err(Error::undefined("zero time span has no lag bins"));
    }
    let mut edges = Vec::new();
    let mut k = 0;
    loop {
        let edge = 10f64.powf(FIRST_EDGE_EXPONENT + EDGE_STEP_DEX * k as f64);
        edges.push(edge);
        if edge >= span && edges.len() >= 2 {
            break;
        }
        k += 1;
    }
    Ok(edges)
}

/// Per-bin quantile of Δm over log-spaced Δt bins
///
/// For each bin `[edge_i, edge_i+1)`, finds the index range of pairs via
/// `partition_point` over the pre-sorted `delta_t` and computes the
/// q-quantile of the corresponding `delta_m` entries. Empty bins yield NaN.
///
/// # Errors
///
/// `InvalidInput` for mismatched lengths, unsorted `delta_t`, or fewer
/// than 2 edges; `InvalidParameter` for q outside [0, 1].
pub fn delta_m_bin_quantile(
    delta_t: &[f64],
    delta_m: &[f64],
    edges: &[f64],
    q: f64,
) -> Result<Vec<f64>> {
    if delta_t.len() != delta_m.len() {
        return Err(Error::size_mismatch(
            delta_t.len(),
            delta_m.len(),
            "delta_t/delta_m",
        ));
    }
    if delta_t.windows(2).any(|w| w[1] < w[0]) {
        return Err(Error::InvalidInput(
            "delta_t must be sorted ascending".to_string(),
        ));
    }
    if edges.len() < 2 {
        return Err(Error::InvalidInput(
            "at least two bin edges are required".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::invalid_quantile(q));
    }

    let mut quantiles = Vec::with_capacity(edges.len() - 1);
    for window in edges.windows(2) {
        let (lo_edge, hi_edge) = (window[0], window[1]);
        let lo = delta_t.partition_point(|&dt| dt < lo_edge);
        let hi = delta_t.partition_point(|&dt| dt < hi_edge);
        if lo == hi {
            quantiles.push(f64::NAN);
        } else {
            quantiles.push(quantile(&delta_m[lo..hi], q)?);
        }
    }
    Ok(quantiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_edges_start_and_spacing() {
        let edges = log_bin_edges(1.0).unwrap();
        assert_relative_eq!(edges[0], 10f64.powf(-1.97), epsilon = 1e-12);
        assert_relative_eq!(edges[1], 10f64.powf(-1.82), epsilon = 1e-12);
        // Constant ratio of 0.15 dex between consecutive edges
        for w in edges.windows(2) {
            assert_relative_eq!(w[1] / w[0], 10f64.powf(0.15), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_edges_cover_span() {
        for span in [0.05, 1.0, 30.0, 1000.0] {
            let edges = log_bin_edges(span).unwrap();
            assert!(edges.len() >= 2);
            assert!(*edges.last().unwrap() >= span);
            // The second-to-last edge must not already cover the span
            assert!(edges[edges.len() - 2] < span || edges.len() == 2);
        }
    }

    #[test]
    fn test_edges_tiny_span_still_one_bin() {
        let edges = log_bin_edges(1e-6).unwrap();
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_zero_span_undefined() {
        assert!(matches!(log_bin_edges(0.0), Err(Error::Undefined(_))));
        assert!(matches!(log_bin_edges(-1.0), Err(Error::Undefined(_))));
    }

    #[test]
    fn test_bin_boundary_quantiles() {
        let delta_t = [0.1, 0.1, 5.0, 5.0];
        let delta_m = [1.0, 2.0, 3.0, 4.0];
        let edges = [0.0, 1.0, 10.0];
        let q50 = delta_m_bin_quantile(&delta_t, &delta_m, &edges, 0.5).unwrap();
        // Bin [0,1) holds {1,2}; floor(0.5*2)=1 indexes the 2
        assert_relative_eq!(q50[0], 2.0);
        // Bin [1,10) holds {3,4}
        assert_relative_eq!(q50[1], 4.0);
    }

    #[test]
    fn test_empty_bin_is_nan() {
        let delta_t = [5.0, 6.0];
        let delta_m = [1.0, 2.0];
        let edges = [0.0, 1.0, 10.0];
        let q = delta_m_bin_quantile(&delta_t, &delta_m, &edges, 0.5).unwrap();
        assert!(q[0].is_nan());
        assert!(!q[1].is_nan());
    }

    #[test]
    fn test_half_open_bins() {
        // A pair exactly on an interior edge belongs to the upper bin
        let delta_t = [1.0];
        let delta_m = [7.0];
        let edges = [0.0, 1.0, 2.0];
        let q = delta_m_bin_quantile(&delta_t, &delta_m, &edges, 0.5).unwrap();
        assert!(q[0].is_nan());
        assert_relative_eq!(q[1], 7.0);
    }

    #[test]
    fn test_invalid_quantile() {
        assert!(matches!(
            delta_m_bin_quantile(&[0.5], &[1.0], &[0.0, 1.0], 1.5),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unsorted_delta_t_rejected() {
        assert!(matches!(
            delta_m_bin_quantile(&[1.0, 0.5], &[1.0, 2.0], &[0.0, 2.0], 0.5),
            Err(Error::InvalidInput(_))
        ));
    }
}
