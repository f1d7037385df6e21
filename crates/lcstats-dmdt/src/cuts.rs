//! Amplitude-fraction timescale cuts on Δm-Δt percentile curves
//!
//! The 50th- and 90th-percentile Δm curves are scanned for the first lag
//! bin where magnitude change exceeds a third and half of the light curve's
//! 5-95 percentile amplitude, yielding four named timescales per trial.
//!
//! The median curve can cross the half-amplitude threshold before the
//! third-amplitude threshold when long-lag bins are sparsely populated;
//! that ordering comes from per-bin quantiles over uneven pair counts and
//! is expected, not a binning defect.

use crate::bins::{delta_m_bin_quantile, log_bin_edges};
use crate::pairs::pairwise_deltas;
use lcstats_core::{amplitude, first_crossing, Error, Result, Threshold};

/// The four scalar timescales from one Δm-Δt analysis
///
/// Each is the first bin-edge lag where a percentile curve exceeds an
/// amplitude fraction, or NaN when the curve never gets there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmdtCuts {
    /// 50th-percentile curve crossing a third of the amplitude
    pub median_third: f64,
    /// 50th-percentile curve crossing half the amplitude
    pub median_half: f64,
    /// 90th-percentile curve crossing a third of the amplitude
    pub ninetieth_third: f64,
    /// 90th-percentile curve crossing half the amplitude
    pub ninetieth_half: f64,
}

/// Full result of one Δm-Δt analysis: binned curves plus the scalar cuts
#[derive(Debug, Clone, PartialEq)]
pub struct DmdtAnalysis {
    edges: Vec<f64>,
    median_curve: Vec<f64>,
    ninetieth_curve: Vec<f64>,
    cuts: DmdtCuts,
}

impl DmdtAnalysis {
    /// Bin edges, one more than the number of bins
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Left edge of each bin (the cut position vector)
    pub fn left_edges(&self) -> &[f64] {
        &self.edges[..self.edges.len() - 1]
    }

    /// Per-bin 50th percentile of |Δm|
    pub fn median_curve(&self) -> &[f64] {
        &self.median_curve
    }

    /// Per-bin 90th percentile of |Δm|
    pub fn ninetieth_curve(&self) -> &[f64] {
        &self.ninetieth_curve
    }

    pub fn cuts(&self) -> DmdtCuts {
        self.cuts
    }
}

/// Run the full Δm-Δt analysis of a magnitude series
///
/// # Errors
///
/// `Undefined` for a zero-amplitude light curve or zero time span (soft:
/// the trial records nulls); `InsufficientData` for fewer than 2 samples;
/// `InvalidInput` for shape violations.
pub fn analyze_dmdt(times: &[f64], mags: &[f64]) -> Result<DmdtAnalysis> {
    let (delta_t, delta_m) = pairwise_deltas(times, mags)?;

    let amp = amplitude(mags)?;
    if amp <= 0.0 {
        return Err(Error::undefined(
            "zero-amplitude light curve has no Δm-Δt cuts",
        ));
    }

    let span = times[times.len() - 1] - times[0];
    let edges = log_bin_edges(span)?;

    let median_curve = delta_m_bin_quantile(&delta_t, &delta_m, &edges, 0.5)?;
    let ninetieth_curve = delta_m_bin_quantile(&delta_t, &delta_m, &edges, 0.9)?;

    let left_edges = &edges[..edges.len() - 1];
    let cuts = DmdtCuts {
        median_third: first_crossing(left_edges, &median_curve, Threshold::MoreThan(amp / 3.0))?,
        median_half: first_crossing(left_edges, &median_curve, Threshold::MoreThan(amp / 2.0))?,
        ninetieth_third: first_crossing(
            left_edges,
            &ninetieth_curve,
            Threshold::MoreThan(amp / 3.0),
        )?,
        ninetieth_half: first_crossing(
            left_edges,
            &ninetieth_curve,
            Threshold::MoreThan(amp / 2.0),
        )?,
    };

    Ok(DmdtAnalysis {
        edges,
        median_curve,
        ninetieth_curve,
        cuts,
    })
}
