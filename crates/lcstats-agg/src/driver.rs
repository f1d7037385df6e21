//! Per-trial analysis driver
//!
//! [`BinStats`] owns the collections of one accumulation bin and runs the
//! enabled statistic families over each simulated light curve. Per family
//! the dispatch distinguishes three outcomes:
//!
//! - success: every collection the family owns gets a real append;
//! - `Undefined`: scalar collections get a null append, plot collections
//!   skip the trial;
//! - `InsufficientData`: the whole trial aborts before any family records
//!   anything (the input series itself is unusable).
//!
//! Appends only happen after all fallible computation for the family has
//! finished, so sibling collections can never drift apart in length.

use crate::collection::{PairCollection, ScalarCollection};
use crate::family::StatFamily;
use crate::ident::BinIdentity;
use lcstats_acf::{autocorr_interp, autocorr_interp_scargle, lag_grid, log_compress};
use lcstats_core::{
    amplitude, c1_index, first_crossing, Error, Result, Threshold, TimeSeries, MIN_SAMPLES,
};
use lcstats_dmdt::analyze_dmdt;
use lcstats_peaks::{peak_find, peak_find_timescales};
use lcstats_period::{
    best_period, frequency_grid, lomb_scargle, AnalyticFap, FapThresholdCache, DEFAULT_FAP,
};

/// Tuning knobs for one bin's analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Families to run, in dispatch order
    pub families: Vec<StatFamily>,
    /// False-alarm probability for the period significance threshold
    pub fap: f64,
    /// Growth factor for stored ACF curve compression
    pub lag_growth: f64,
    /// Upper bound on the ACF interpolation grid step
    pub max_interp_step: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            families: StatFamily::ALL.to_vec(),
            fap: DEFAULT_FAP,
            lag_growth: lcstats_acf::DEFAULT_LAG_GROWTH,
            max_interp_step: 0.1,
        }
    }
}

impl AnalysisConfig {
    pub fn with_families(mut self, families: &[StatFamily]) -> Self {
        self.families = families.to_vec();
        self
    }

    pub fn with_fap(mut self, fap: f64) -> Self {
        self.fap = fap;
        self
    }

    pub fn with_lag_growth(mut self, growth: f64) -> Self {
        self.lag_growth = growth;
        self
    }

    pub fn with_max_interp_step(mut self, step: f64) -> Self {
        self.max_interp_step = step;
        self
    }
}

/// Statistics accumulator for one bin
///
/// A bin starts empty, accumulates one outcome per collection per
/// successful trial, and can be [`cleared`](BinStats::clear) back to the
/// empty state for reuse. No merge across bins exists; parallel callers
/// shard whole bins instead.
#[derive(Debug, Clone)]
pub struct BinStats {
    ident: BinIdentity,
    config: AnalysisConfig,
    fap: AnalyticFap,
    fap_cache: FapThresholdCache,
    trials: usize,
    scalars: Vec<(StatFamily, Vec<ScalarCollection>)>,
    plots: Vec<(StatFamily, PairCollection)>,
}

impl BinStats {
    /// Create a bin with the given identity and configuration
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for an out-of-range false-alarm probability.
    pub fn new(ident: BinIdentity, config: AnalysisConfig) -> Result<Self> {
        let fap = AnalyticFap::new(config.fap)?;

        let mut scalars = Vec::new();
        let mut plots = Vec::new();
        for &family in &config.families {
            if let Some((name, stem)) = family.plot_stat() {
                plots.push((family, PairCollection::new(name, stem)));
            } else {
                let collections = family
                    .scalar_stats()
                    .iter()
                    .map(|&(name, stem)| ScalarCollection::new(name, stem))
                    .collect();
                scalars.push((family, collections));
            }
        }

        Ok(Self {
            ident,
            config,
            fap,
            fap_cache: FapThresholdCache::new(),
            trials: 0,
            scalars,
            plots,
        })
    }

    pub fn ident(&self) -> &BinIdentity {
        &self.ident
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Number of trials recorded since construction or the last clear
    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn is_empty(&self) -> bool {
        self.trials == 0
    }

    /// Scalar collections of a family, in declaration order
    pub fn scalar_collections(&self, family: StatFamily) -> &[ScalarCollection] {
        self.scalars
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, c)| c.as_slice())
            .unwrap_or(&[])
    }

    /// The curve collection of a plot family, if enabled
    pub fn plot_collection(&self, family: StatFamily) -> Option<&PairCollection> {
        self.plots
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, c)| c)
    }

    pub(crate) fn scalar_families(
        &self,
    ) -> impl Iterator<Item = (StatFamily, &[ScalarCollection])> + '_ {
        self.scalars.iter().map(|(f, c)| (*f, c.as_slice()))
    }

    pub(crate) fn plot_families(&self) -> impl Iterator<Item = (StatFamily, &PairCollection)> + '_ {
        self.plots.iter().map(|(f, c)| (*f, c))
    }

    /// Analyze one simulated trial
    ///
    /// Converts flux to magnitude, strips NaN samples, and dispatches every
    /// enabled family in order. Soft failures are absorbed per family; an
    /// `InsufficientData` failure aborts the whole trial with nothing
    /// recorded anywhere.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on shape mismatches (a caller bug, surfaced
    /// uncaught); `InsufficientData` when the stripped series is too short
    /// for any statistic; `Computation` from a failed numeric backend.
    pub fn analyze(&mut self, times: &[f64], fluxes: &[f64]) -> Result<()> {
        if times.len() != fluxes.len() {
            return Err(Error::size_mismatch(
                times.len(),
                fluxes.len(),
                "trial times/fluxes",
            ));
        }
        let series = TimeSeries::from_fluxes(times, fluxes)?;
        self.analyze_series(&series)
    }

    /// Analyze one trial already converted to a magnitude series
    pub fn analyze_series(&mut self, series: &TimeSeries) -> Result<()> {
        // Sample shortage is a property of the input series and must be
        // detected before any family records anything: an aborted trial
        // contributes to no collection.
        if series.len() < MIN_SAMPLES {
            let err = Error::InsufficientData {
                expected: MIN_SAMPLES,
                actual: series.len(),
            };
            tracing::warn!(bin = %self.ident, trial = self.trials, error = %err, "trial aborted");
            return Err(err);
        }

        let families = self.config.families.clone();
        for family in families {
            match self.run_family(family, series.times(), series.values()) {
                Ok(()) => {}
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(
                        family = %family,
                        bin = %self.ident,
                        error = %err,
                        "statistic undefined for this trial"
                    );
                    self.record_null(family);
                }
                Err(err) => {
                    if matches!(err, Error::InsufficientData { .. }) {
                        tracing::warn!(
                            bin = %self.ident,
                            trial = self.trials,
                            error = %err,
                            "trial aborted"
                        );
                    }
                    return Err(err);
                }
            }
        }

        self.trials += 1;
        Ok(())
    }

    /// Reset to the freshly constructed state
    pub fn clear(&mut self) {
        for (_, collections) in &mut self.scalars {
            for c in collections {
                c.clear();
            }
        }
        for (_, c) in &mut self.plots {
            c.clear();
        }
        self.fap_cache.clear();
        self.trials = 0;
    }

    fn run_family(&mut self, family: StatFamily, times: &[f64], mags: &[f64]) -> Result<()> {
        match family {
            StatFamily::C1 => {
                let c1 = c1_index(mags)?;
                self.commit_scalars(family, &[c1]);
            }
            StatFamily::Period => {
                let grid = frequency_grid(times)?;
                let powers = lomb_scargle(times, mags, &grid)?;
                let threshold = self
                    .fap_cache
                    .threshold_for(&mut self.fap, times, mags, &grid)?;
                let period = best_period(&grid.frequencies(), &powers, threshold)?;
                self.commit_scalars(family, &[period]);
            }
            StatFamily::Periodogram => {
                let grid = frequency_grid(times)?;
                let powers = lomb_scargle(times, mags, &grid)?;
                self.commit_plot(family, grid.frequencies(), powers)?;
            }
            StatFamily::DmdtCut => {
                let cuts = analyze_dmdt(times, mags)?.cuts();
                self.commit_scalars(
                    family,
                    &[
                        cuts.median_third,
                        cuts.median_half,
                        cuts.ninetieth_third,
                        cuts.ninetieth_half,
                    ],
                );
            }
            StatFamily::DmdtPlot => {
                let analysis = analyze_dmdt(times, mags)?;
                self.commit_plot(
                    family,
                    analysis.left_edges().to_vec(),
                    analysis.median_curve().to_vec(),
                )?;
            }
            StatFamily::AcfCut => {
                let (lags, acf) = self.interpolated_acf(times, mags, false)?;
                let cuts = [
                    first_crossing(&lags, &acf, Threshold::LessThan(1.0 / 9.0))?,
                    first_crossing(&lags, &acf, Threshold::LessThan(0.25))?,
                    first_crossing(&lags, &acf, Threshold::LessThan(0.5))?,
                ];
                self.commit_scalars(family, &cuts);
            }
            StatFamily::ScargleAcfCut => {
                let (lags, acf) = self.interpolated_acf(times, mags, true)?;
                let cuts = [
                    first_crossing(&lags, &acf, Threshold::LessThan(1.0 / 9.0))?,
                    first_crossing(&lags, &acf, Threshold::LessThan(0.25))?,
                    first_crossing(&lags, &acf, Threshold::LessThan(0.5))?,
                ];
                self.commit_scalars(family, &cuts);
            }
            StatFamily::AcfPlot => {
                let (lags, acf) = self.interpolated_acf(times, mags, false)?;
                let (kept_lags, kept_acf) = log_compress(&lags, &acf, self.config.lag_growth)?;
                self.commit_plot(family, kept_lags, kept_acf)?;
            }
            StatFamily::PeakCut => {
                let amp = amplitude(mags)?;
                if amp <= 0.0 {
                    return Err(Error::undefined(
                        "zero-amplitude light curve has no peak timescales",
                    ));
                }
                let thresholds = [amp / 3.0, amp / 2.0, 0.8 * amp];
                let timescales = peak_find_timescales(times, mags, &thresholds)?;
                self.commit_scalars(family, &timescales);
            }
            StatFamily::PeakPlot => {
                let amp = amplitude(mags)?;
                if amp <= 0.0 {
                    return Err(Error::undefined(
                        "zero-amplitude light curve has no extrema series",
                    ));
                }
                let extrema = peak_find(times, mags, amp / 2.0)?;
                self.commit_plot(
                    family,
                    extrema.times().to_vec(),
                    extrema.values().to_vec(),
                )?;
            }
        }
        Ok(())
    }

    /// Commit one value per sibling collection. All computation is done by
    /// the time this runs, so the appends cannot be interrupted partway.
    fn commit_scalars(&mut self, family: StatFamily, values: &[f64]) {
        if let Some((_, collections)) = self.scalars.iter_mut().find(|(f, _)| *f == family) {
            debug_assert_eq!(collections.len(), values.len());
            for (collection, &value) in collections.iter_mut().zip(values) {
                collection.add(value);
            }
        }
    }

    fn commit_plot(&mut self, family: StatFamily, x: Vec<f64>, y: Vec<f64>) -> Result<()> {
        if let Some((_, collection)) = self.plots.iter_mut().find(|(f, _)| *f == family) {
            collection.add(x, y)?;
        }
        Ok(())
    }

    /// Record the undefined marker for a family after a soft failure.
    /// Plot families have no null concept and skip the trial entirely.
    fn record_null(&mut self, family: StatFamily) {
        if family.is_plot() {
            return;
        }
        if let Some((_, collections)) = self.scalars.iter_mut().find(|(f, _)| *f == family) {
            for collection in collections {
                collection.add_null();
            }
        }
    }

    /// Lag grid and ACF of the series interpolated onto a uniform grid
    fn interpolated_acf(
        &self,
        times: &[f64],
        mags: &[f64],
        overlap_corrected: bool,
    ) -> Result<(Vec<f64>, Vec<f64>)> {
        let span = times[times.len() - 1] - times[0];
        if span <= 0.0 {
            return Err(Error::undefined("zero time span has no autocorrelation"));
        }
        let native_step = span / (times.len() - 1) as f64;
        let step = native_step.min(self.config.max_interp_step);
        let n_lags = (span / step).floor() as usize + 1;

        let acf = if overlap_corrected {
            autocorr_interp_scargle(times, mags, step, n_lags)?
        } else {
            autocorr_interp(times, mags, step, n_lags)?
        };
        Ok((lag_grid(step, n_lags), acf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident() -> BinIdentity {
        BinIdentity::new("sine", vec![("amp".to_string(), (0.5, 1.0))], "0.1")
    }

    fn sine_fluxes(n: usize) -> (Vec<f64>, Vec<f64>) {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
        let fluxes: Vec<f64> = times
            .iter()
            .map(|&t| 10.0 + (2.0 * std::f64::consts::PI * t / 3.0).sin())
            .collect();
        (times, fluxes)
    }

    #[test]
    fn test_states_empty_accumulating_clear() {
        let config = AnalysisConfig::default().with_families(&[StatFamily::C1]);
        let mut bin = BinStats::new(ident(), config).unwrap();
        assert!(bin.is_empty());

        let (times, fluxes) = sine_fluxes(50);
        bin.analyze(&times, &fluxes).unwrap();
        assert_eq!(bin.trials(), 1);
        assert!(!bin.is_empty());

        bin.clear();
        assert!(bin.is_empty());
        assert_eq!(bin.scalar_collections(StatFamily::C1)[0].len(), 0);
    }

    #[test]
    fn test_every_family_runs_on_clean_data() {
        let mut bin = BinStats::new(ident(), AnalysisConfig::default()).unwrap();
        let (times, fluxes) = sine_fluxes(120);
        bin.analyze(&times, &fluxes).unwrap();

        for family in StatFamily::ALL {
            if family.is_plot() {
                assert_eq!(
                    bin.plot_collection(family).unwrap().len(),
                    1,
                    "{family} curve missing"
                );
            } else {
                for c in bin.scalar_collections(family) {
                    assert_eq!(c.len(), 1, "{family}/{} missing entry", c.name());
                }
            }
        }
    }

    #[test]
    fn test_shape_mismatch_is_invalid_input() {
        let mut bin = BinStats::new(ident(), AnalysisConfig::default()).unwrap();
        let result = bin.analyze(&[0.0, 1.0], &[1.0]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(bin.trials(), 0);
    }

    #[test]
    fn test_nan_flux_stripping_can_exhaust_series() {
        let mut bin = BinStats::new(ident(), AnalysisConfig::default()).unwrap();
        // Non-positive flux has no magnitude; the stripped series is empty
        let result = bin.analyze(&[0.0, 1.0, 2.0], &[-1.0, 0.0, -5.0]);
        assert!(matches!(result, Err(Error::InsufficientData { .. })));
        assert_eq!(bin.trials(), 0);
    }

    #[test]
    fn test_zero_amplitude_records_nulls_for_cut_families() {
        let config = AnalysisConfig::default()
            .with_families(&[StatFamily::C1, StatFamily::PeakCut, StatFamily::PeakPlot]);
        let mut bin = BinStats::new(ident(), config).unwrap();

        let times: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let fluxes = vec![10.0; 30];
        bin.analyze(&times, &fluxes).unwrap();

        // Scalar families got nulls
        assert_eq!(bin.scalar_collections(StatFamily::C1)[0].len(), 1);
        assert!(bin.scalar_collections(StatFamily::C1)[0].values()[0].is_nan());
        for c in bin.scalar_collections(StatFamily::PeakCut) {
            assert_eq!(c.len(), 1);
            assert!(c.values()[0].is_nan());
        }
        // The plot family skipped the trial: accepted length asymmetry
        assert_eq!(bin.plot_collection(StatFamily::PeakPlot).unwrap().len(), 0);
        assert_eq!(bin.trials(), 1);
    }

    #[test]
    fn test_sibling_collections_stay_in_lockstep() {
        let config = AnalysisConfig::default()
            .with_families(&[StatFamily::DmdtCut, StatFamily::PeakCut]);
        let mut bin = BinStats::new(ident(), config).unwrap();

        let (times, fluxes) = sine_fluxes(60);
        bin.analyze(&times, &fluxes).unwrap();
        // Zero-amplitude trial: both families record nulls
        let flat: Vec<f64> = vec![10.0; 60];
        bin.analyze(&times, &flat).unwrap();

        for family in [StatFamily::DmdtCut, StatFamily::PeakCut] {
            let lengths: Vec<usize> = bin
                .scalar_collections(family)
                .iter()
                .map(|c| c.len())
                .collect();
            assert!(
                lengths.iter().all(|&l| l == 2),
                "{family} collections out of lockstep: {lengths:?}"
            );
        }
    }

    #[test]
    fn test_insufficient_data_contributes_nothing() {
        let config = AnalysisConfig::default().with_families(&[StatFamily::PeakCut]);
        let mut bin = BinStats::new(ident(), config).unwrap();

        let result = bin.analyze(&[0.0], &[10.0]);
        assert!(matches!(result, Err(Error::InsufficientData { .. })));
        for c in bin.scalar_collections(StatFamily::PeakCut) {
            assert_eq!(c.len(), 0);
        }
        assert_eq!(bin.trials(), 0);
    }

    #[test]
    fn test_invalid_fap_rejected_at_construction() {
        let config = AnalysisConfig::default().with_fap(1.5);
        assert!(BinStats::new(ident(), config).is_err());
    }

    #[test]
    fn test_analyze_series_matches_flux_entry_point() {
        let config = AnalysisConfig::default().with_families(&[StatFamily::C1]);
        let mut via_flux = BinStats::new(ident(), config.clone()).unwrap();
        let mut via_series = BinStats::new(ident(), config).unwrap();

        let (times, fluxes) = sine_fluxes(50);
        via_flux.analyze(&times, &fluxes).unwrap();
        let series = TimeSeries::from_fluxes(&times, &fluxes).unwrap();
        via_series.analyze_series(&series).unwrap();

        assert_eq!(
            via_flux.scalar_collections(StatFamily::C1)[0].values(),
            via_series.scalar_collections(StatFamily::C1)[0].values()
        );
    }

    #[test]
    fn test_disabled_family_untouched() {
        let config = AnalysisConfig::default().with_families(&[StatFamily::C1]);
        let mut bin = BinStats::new(ident(), config).unwrap();
        let (times, fluxes) = sine_fluxes(50);
        bin.analyze(&times, &fluxes).unwrap();

        assert!(bin.scalar_collections(StatFamily::PeakCut).is_empty());
        assert!(bin.plot_collection(StatFamily::AcfPlot).is_none());
    }
}
