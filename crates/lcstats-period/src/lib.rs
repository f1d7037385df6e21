//! Periodogram and period extraction for light curves
//!
//! Computes a Lomb-Scargle periodogram over an automatically chosen
//! frequency range, derives a false-alarm-probability significance
//! threshold (analytic or shuffle-bootstrap, cached per frequency-grid
//! bounds), and reports the dominant period only when its peak clears the
//! threshold.
//!
//! # Example
//!
//! ```rust
//! use lcstats_period::{
//!     best_period, frequency_grid, lomb_scargle, AnalyticFap, FapThresholdCache,
//! };
//!
//! let times: Vec<f64> = (0..200).map(|i| i as f64 * 0.1).collect();
//! let mags: Vec<f64> = times
//!     .iter()
//!     .map(|&t| (2.0 * std::f64::consts::PI * t / 3.0).sin())
//!     .collect();
//!
//! let grid = frequency_grid(&times).unwrap();
//! let powers = lomb_scargle(&times, &mags, &grid).unwrap();
//!
//! let mut cache = FapThresholdCache::new();
//! let mut fap = AnalyticFap::default();
//! let threshold = cache.threshold_for(&mut fap, &times, &mags, &grid).unwrap();
//!
//! let period = best_period(&grid.frequencies(), &powers, threshold).unwrap();
//! assert!((period - 3.0).abs() < 0.2);
//! ```

pub mod fap;
pub mod lombscargle;

pub use fap::{
    AnalyticFap, BootstrapFap, FapEstimator, FapThresholdCache, DEFAULT_FAP, DEFAULT_RESAMPLES,
};
pub use lombscargle::{best_period, frequency_grid, lomb_scargle, periodogram, FrequencyGrid};
