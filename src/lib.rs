//! # lcstats
//!
//! Monte Carlo statistics toolkit for simulated astronomical light curves.
//!
//! Given many simulated `(times, fluxes)` trials of one light-curve model,
//! the toolkit extracts a battery of time-series statistics per trial
//! (C1 variability index, significant Lomb-Scargle period, Δm-Δt
//! amplitude-fraction timescales, autocorrelation cuts, peak-finding
//! waiting times) and accumulates them per bin (model × parameter range ×
//! noise level) into summary rows for comparison across model families.
//!
//! The workspace is split into focused crates, re-exported here:
//!
//! - [`core`](lcstats_core): error taxonomy, NaN-aware numerics,
//!   threshold-cut primitives, series utilities
//! - [`peaks`](lcstats_peaks): alternating-extrema scan and waiting-time
//!   timescales
//! - [`dmdt`](lcstats_dmdt): pairwise Δm-Δt binning and amplitude cuts
//! - [`acf`](lcstats_acf): FFT autocorrelation with uniform-grid
//!   interpolation
//! - [`period`](lcstats_period): Lomb-Scargle periodogram, false-alarm
//!   thresholds and the per-cadence threshold cache
//! - [`agg`](lcstats_agg): accumulation collections, the per-trial bin
//!   driver and summary output
//!
//! # Example
//!
//! ```rust
//! use lcstats::{AnalysisConfig, BinIdentity, BinStats, StatFamily};
//!
//! let ident = BinIdentity::new("sine", vec![("amp".to_string(), (0.5, 1.0))], "0.1");
//! let config = AnalysisConfig::default()
//!     .with_families(&[StatFamily::C1, StatFamily::PeakCut, StatFamily::AcfCut]);
//! let mut bin = BinStats::new(ident, config).unwrap();
//!
//! for trial in 0..3 {
//!     let times: Vec<f64> = (0..100).map(|i| i as f64 * 0.1).collect();
//!     let fluxes: Vec<f64> = times
//!         .iter()
//!         .map(|&t| 10.0 + (t + trial as f64).sin())
//!         .collect();
//!     bin.analyze(&times, &fluxes).unwrap();
//! }
//!
//! println!("{}", bin.header_row());
//! println!("{}", bin.summary_row());
//! ```

pub use lcstats_acf as acf;
pub use lcstats_agg as agg;
pub use lcstats_core as core;
pub use lcstats_dmdt as dmdt;
pub use lcstats_peaks as peaks;
pub use lcstats_period as period;

// The working set most callers need, flattened
pub use lcstats_agg::{
    AnalysisConfig, BinIdentity, BinStats, PairCollection, ScalarCollection, StatFamily, Summary,
};
pub use lcstats_core::{Error, Result};
