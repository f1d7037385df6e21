//! Autocorrelation engine for irregularly sampled light curves
//!
//! Estimates the autocorrelation function at a uniform grid of lags by two
//! routes:
//!
//! - the statistical convention ([`autocorr`]): autocovariance normalized
//!   by the total sum of squared deviations, computed via a zero-padded
//!   FFT circular correlation in O(n log n), with a direct-summation
//!   cross-check ([`autocorr_direct`]);
//! - the overlap-corrected variant ([`autocorr_scargle`]): each lag
//!   rescaled by its overlap count before normalization.
//!
//! Irregular sampling is handled by linear interpolation onto an evenly
//! spaced grid ([`autocorr_interp`]); lags beyond the observed span are
//! zero-filled, never extrapolated.
//!
//! # Example
//!
//! ```rust
//! use lcstats_acf::{autocorr_interp, lag_grid};
//!
//! let times: Vec<f64> = (0..200).map(|i| i as f64 * 0.11).collect();
//! let mags: Vec<f64> = times.iter().map(|&t| (t * 0.9).sin()).collect();
//!
//! let acf = autocorr_interp(&times, &mags, 0.1, 100).unwrap();
//! let lags = lag_grid(0.1, 100);
//! assert_eq!(acf.len(), lags.len());
//! assert!((acf[0] - 1.0).abs() < 1e-10);
//! ```

pub mod acf;
pub mod interp;

pub use acf::{autocorr, autocorr_direct, autocorr_scargle};
pub use interp::{
    autocorr_interp, autocorr_interp_scargle, interpolate_uniform, lag_grid, log_compress,
    DEFAULT_LAG_GROWTH,
};
