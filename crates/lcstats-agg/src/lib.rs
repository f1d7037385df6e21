//! Statistic accumulation and per-trial driving for light-curve simulations
//!
//! This crate ties the timescale engines together: it owns the per-family
//! accumulation collections, runs every enabled statistic family over each
//! simulated trial with the soft/hard failure split the engines signal,
//! and renders the aggregate into one tab-delimited summary row per bin
//! plus auxiliary distribution files.
//!
//! The failure contract per statistic attempt:
//!
//! - succeed and record a value in every collection the family owns;
//! - fail softly (`Undefined`): a null marker is recorded for scalar
//!   collections, plot collections skip the trial, everything else keeps
//!   running;
//! - fail hard (`InsufficientData`): the whole trial aborts and
//!   contributes nothing anywhere; earlier trials are untouched.
//!
//! # Example
//!
//! ```rust
//! use lcstats_agg::{AnalysisConfig, BinIdentity, BinStats, StatFamily};
//!
//! let ident = BinIdentity::new("sine", vec![("amp".to_string(), (0.5, 1.0))], "0.1");
//! let config = AnalysisConfig::default().with_families(&[StatFamily::C1, StatFamily::PeakCut]);
//! let mut bin = BinStats::new(ident, config).unwrap();
//!
//! let times: Vec<f64> = (0..100).map(|i| i as f64 * 0.1).collect();
//! let fluxes: Vec<f64> = times.iter().map(|&t| 10.0 + t.sin()).collect();
//! bin.analyze(&times, &fluxes).unwrap();
//!
//! println!("{}", bin.header_row());
//! println!("{}", bin.summary_row());
//! ```

pub mod collection;
pub mod driver;
pub mod family;
pub mod ident;
pub mod output;

pub use collection::{PairCollection, PairSample, ScalarCollection, Summary};
pub use driver::{AnalysisConfig, BinStats};
pub use family::StatFamily;
pub use ident::BinIdentity;
pub use output::{header_row, write_rows};
