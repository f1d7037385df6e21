//! Statistic families
//!
//! A family names one computation the per-trial driver can run: a scalar
//! cut family producing one value per owned collection per trial, or a
//! plot family recording a full sampled curve per successful trial.

use std::fmt;

/// The statistic families the driver can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatFamily {
    /// C1 variability index
    C1,
    /// Dominant significant period
    Period,
    /// Full periodogram curve
    Periodogram,
    /// Δm-Δt amplitude-fraction timescales
    DmdtCut,
    /// Δm-Δt median curve
    DmdtPlot,
    /// Interpolated ACF timescales
    AcfCut,
    /// Overlap-corrected ACF timescales
    ScargleAcfCut,
    /// Interpolated ACF curve
    AcfPlot,
    /// Peak-finding waiting-time timescales
    PeakCut,
    /// Half-amplitude extrema series
    PeakPlot,
}

impl StatFamily {
    /// Every family in the fixed dispatch order of the driver
    pub const ALL: [StatFamily; 10] = [
        StatFamily::C1,
        StatFamily::Period,
        StatFamily::Periodogram,
        StatFamily::DmdtCut,
        StatFamily::DmdtPlot,
        StatFamily::AcfCut,
        StatFamily::ScargleAcfCut,
        StatFamily::AcfPlot,
        StatFamily::PeakCut,
        StatFamily::PeakPlot,
    ];

    /// Plot families record full curves and have no null entry; scalar
    /// families record one value (or null) per trial and collection.
    pub fn is_plot(&self) -> bool {
        matches!(
            self,
            StatFamily::Periodogram
                | StatFamily::DmdtPlot
                | StatFamily::AcfPlot
                | StatFamily::PeakPlot
        )
    }

    /// `(display name, file stem)` of each scalar statistic the family
    /// owns, in commit order. Empty for plot families.
    pub fn scalar_stats(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            StatFamily::C1 => &[("C1", "c1")],
            StatFamily::Period => &[("Period", "period")],
            StatFamily::DmdtCut => &[
                ("50th at third-amp", "dmdt_med_third"),
                ("50th at half-amp", "dmdt_med_half"),
                ("90th at third-amp", "dmdt_90_third"),
                ("90th at half-amp", "dmdt_90_half"),
            ],
            StatFamily::AcfCut => &[
                ("ACF 1/9", "acf_ninth"),
                ("ACF 1/4", "acf_quarter"),
                ("ACF 1/2", "acf_half"),
            ],
            StatFamily::ScargleAcfCut => &[
                ("SACF 1/9", "sacf_ninth"),
                ("SACF 1/4", "sacf_quarter"),
                ("SACF 1/2", "sacf_half"),
            ],
            StatFamily::PeakCut => &[
                ("Peaks third-amp", "peak_third"),
                ("Peaks half-amp", "peak_half"),
                ("Peaks 0.8-amp", "peak_fourfifths"),
            ],
            _ => &[],
        }
    }

    /// `(display name, file stem)` of a plot family's curve collection
    pub fn plot_stat(&self) -> Option<(&'static str, &'static str)> {
        match self {
            StatFamily::Periodogram => Some(("Periodograms", "pgram")),
            StatFamily::DmdtPlot => Some(("Dmdt medians", "dmdt_plot")),
            StatFamily::AcfPlot => Some(("ACFs", "acf_plot")),
            StatFamily::PeakPlot => Some(("Peak series", "peak_plot")),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatFamily::C1 => "C1",
            StatFamily::Period => "Period",
            StatFamily::Periodogram => "Periodogram",
            StatFamily::DmdtCut => "DmdtCut",
            StatFamily::DmdtPlot => "DmdtPlot",
            StatFamily::AcfCut => "AcfCut",
            StatFamily::ScargleAcfCut => "ScargleAcfCut",
            StatFamily::AcfPlot => "AcfPlot",
            StatFamily::PeakCut => "PeakCut",
            StatFamily::PeakPlot => "PeakPlot",
        }
    }
}

impl fmt::Display for StatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
