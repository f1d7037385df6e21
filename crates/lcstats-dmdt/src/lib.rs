//! Δm-Δt binning engine
//!
//! Converts the set of all pairwise time and magnitude differences of a
//! light curve into log-binned percentile statistics, characterizing how
//! variability grows with time lag, and extracts amplitude-fraction
//! timescale cuts from the binned curves.
//!
//! # Example
//!
//! ```rust
//! use lcstats_dmdt::analyze_dmdt;
//!
//! let times: Vec<f64> = (0..100).map(|i| i as f64 * 0.1).collect();
//! let mags: Vec<f64> = times.iter().map(|&t| (t * 2.0).sin()).collect();
//!
//! let analysis = analyze_dmdt(&times, &mags).unwrap();
//! assert_eq!(analysis.median_curve().len(), analysis.left_edges().len());
//! ```

pub mod bins;
pub mod cuts;
pub mod pairs;

pub use bins::{delta_m_bin_quantile, log_bin_edges};
pub use cuts::{analyze_dmdt, DmdtAnalysis, DmdtCuts};
pub use pairs::pairwise_deltas;
