//! Core types and numeric primitives for light-curve statistics
//!
//! This crate provides the shared foundation of the lcstats workspace:
//!
//! - a unified [`Error`]/[`Result`] pair with the three-severity taxonomy
//!   the per-trial driver relies on (recoverable `Undefined`, trial-aborting
//!   `InsufficientData`, fatal everything else);
//! - NaN-aware summaries ([`utils`]) used both by the engines and by the
//!   accumulation layer, where NaN is the canonical null marker;
//! - the threshold-cut scan ([`cut`]) every timescale extractor is built on;
//! - light-curve series plumbing ([`series`]): flux-to-magnitude
//!   conversion, paired NaN stripping, the 5-95 percentile amplitude, and
//!   the C1 variability index.
//!
//! # Example
//!
//! ```rust
//! use lcstats_core::cut::{first_crossing, Threshold};
//!
//! let lags = vec![0.0, 0.5, 1.0, 1.5];
//! let acf = vec![1.0, 0.6, 0.3, 0.1];
//! let cut = first_crossing(&lags, &acf, Threshold::LessThan(0.5)).unwrap();
//! assert_eq!(cut, 1.0);
//! ```

pub mod cut;
pub mod error;
pub mod series;
pub mod utils;

pub use cut::{first_crossing, last_crossing, Threshold};
pub use error::{Error, Result};
pub use series::{
    amplitude, c1_index, check_sorted, flux_to_mag, remove_nans, TimeSeries, MIN_SAMPLES,
};
pub use utils::{
    is_nan_or_inf, mean_dropping_nan, quantile, sorted, std_dev_dropping_nan,
    variance_dropping_nan,
};
