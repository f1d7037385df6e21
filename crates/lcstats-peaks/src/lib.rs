//! Peak-finding engine for light curves
//!
//! Detects alternating local extrema subject to a minimum-amplitude
//! threshold and derives a waiting-time statistic by sweeping the
//! threshold. The extrema scan is the raw "peak plot" representation; the
//! threshold sweep produces the scalar timescale cuts accumulated across
//! Monte Carlo trials.
//!
//! # Example
//!
//! ```rust
//! use lcstats_peaks::{peak_find, peak_find_timescales};
//!
//! let times = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let mags = vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
//!
//! let extrema = peak_find(&times, &mags, 0.5).unwrap();
//! assert_eq!(extrema.len(), 6);
//!
//! let timescales = peak_find_timescales(&times, &mags, &[0.5]).unwrap();
//! assert_eq!(timescales[0], 1.0);
//! ```

pub mod find;
pub mod timescales;

pub use find::{peak_find, Extrema};
pub use timescales::{median, peak_find_timescales};
