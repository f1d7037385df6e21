//! False-alarm-probability thresholds
//!
//! A periodogram peak only counts as a detection when its power exceeds
//! the level that pure noise would reach with probability `fap`. Two
//! estimators are provided: a closed-form threshold from the exponential
//! peak statistics of the normalized periodogram, and a shuffle bootstrap
//! that re-derives the null distribution from the data itself.
//!
//! Both are expensive enough (the bootstrap especially) that the driver
//! caches the threshold per frequency-grid bounds: trials sharing a
//! cadence share a threshold, and the cache invalidates itself the moment
//! the requested bounds change.

use crate::lombscargle::{lomb_scargle, FrequencyGrid};
use lcstats_core::{quantile, Error, Result};
use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use rand::Rng;
use statrs::distribution::{ContinuousCDF, Exp};

/// Default false-alarm probability for significance thresholds.
pub const DEFAULT_FAP: f64 = 0.01;
/// Default number of shuffle resamples for the bootstrap estimator.
pub const DEFAULT_RESAMPLES: usize = 1000;

fn validate_fap(fap: f64) -> Result<()> {
    if !(fap > 0.0 && fap < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "false-alarm probability {fap} must lie strictly inside (0, 1)"
        )));
    }
    Ok(())
}

/// Computes the power threshold matching a false-alarm probability
pub trait FapEstimator {
    /// Power level that noise alone exceeds with probability `fap`
    fn threshold(&mut self, times: &[f64], values: &[f64], grid: &FrequencyGrid) -> Result<f64>;
}

/// Closed-form threshold from exponential peak statistics
///
/// For the variance-normalized periodogram under white Gaussian noise,
/// single-frequency power is Exp(1) distributed, and the maximum over M
/// independent frequencies exceeds z with probability `1 - (1-e^-z)^M`.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticFap {
    fap: f64,
}

impl AnalyticFap {
    pub fn new(fap: f64) -> Result<Self> {
        validate_fap(fap)?;
        Ok(Self { fap })
    }
}

impl Default for AnalyticFap {
    fn default() -> Self {
        Self { fap: DEFAULT_FAP }
    }
}

impl FapEstimator for AnalyticFap {
    fn threshold(&mut self, _times: &[f64], _values: &[f64], grid: &FrequencyGrid) -> Result<f64> {
        let m = grid.independent.max(1) as f64;
        let unit_exp = Exp::new(1.0)
            .map_err(|e| Error::Computation(format!("exponential distribution: {e}")))?;
        // Solve (1 - e^-z)^M = 1 - fap for z
        let per_frequency = (1.0 - self.fap).powf(1.0 / m);
        Ok(unit_exp.inverse_cdf(per_frequency))
    }
}

/// Shuffle-bootstrap threshold
///
/// Permuting the magnitudes against the fixed time sampling destroys any
/// coherent signal while preserving the value distribution; the threshold
/// is the `1 - fap` quantile of the maximum power over many shuffles.
/// The caller supplies the generator, so seeding policy stays outside the
/// engine.
#[derive(Debug)]
pub struct BootstrapFap<R: Rng> {
    fap: f64,
    resamples: usize,
    rng: R,
}

impl<R: Rng> BootstrapFap<R> {
    pub fn new(fap: f64, resamples: usize, rng: R) -> Result<Self> {
        validate_fap(fap)?;
        if resamples == 0 {
            return Err(Error::InvalidParameter(
                "bootstrap needs at least one resample".to_string(),
            ));
        }
        Ok(Self {
            fap,
            resamples,
            rng,
        })
    }

    /// Bootstrap with the default FAP and resample count
    pub fn with_defaults(rng: R) -> Self {
        Self {
            fap: DEFAULT_FAP,
            resamples: DEFAULT_RESAMPLES,
            rng,
        }
    }
}

impl<R: Rng> FapEstimator for BootstrapFap<R> {
    fn threshold(&mut self, times: &[f64], values: &[f64], grid: &FrequencyGrid) -> Result<f64> {
        let mut shuffled = values.to_vec();
        let mut max_powers = Vec::with_capacity(self.resamples);
        for _ in 0..self.resamples {
            shuffled.shuffle(&mut self.rng);
            let powers = lomb_scargle(times, &shuffled, grid)?;
            let max = powers.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            max_powers.push(max);
        }
        quantile(&max_powers, 1.0 - self.fap)
    }
}

/// Single-entry threshold cache keyed by frequency-grid bounds
///
/// Holds the threshold for the most recently seen `(f_min, f_max)` pair.
/// A request with different bounds recomputes and replaces the entry; a
/// request with matching bounds returns the cached value without touching
/// the estimator.
#[derive(Debug, Clone, Default)]
pub struct FapThresholdCache {
    key: Option<(OrderedFloat<f64>, OrderedFloat<f64>)>,
    threshold: f64,
}

impl FapThresholdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Threshold for the grid, recomputing only on a bounds change
    pub fn threshold_for<E: FapEstimator>(
        &mut self,
        estimator: &mut E,
        times: &[f64],
        values: &[f64],
        grid: &FrequencyGrid,
    ) -> Result<f64> {
        let key = (OrderedFloat(grid.f_min), OrderedFloat(grid.f_max));
        if self.key == Some(key) {
            tracing::trace!(f_min = grid.f_min, f_max = grid.f_max, "FAP cache hit");
            return Ok(self.threshold);
        }
        tracing::debug!(
            f_min = grid.f_min,
            f_max = grid.f_max,
            "FAP cache miss, recomputing threshold"
        );
        let threshold = estimator.threshold(times, values, grid)?;
        self.key = Some(key);
        self.threshold = threshold;
        Ok(threshold)
    }

    /// Forget the cached entry
    pub fn clear(&mut self) {
        self.key = None;
        self.threshold = 0.0;
    }

    /// Whether a threshold is currently cached
    pub fn is_populated(&self) -> bool {
        self.key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lombscargle::frequency_grid;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_grid() -> FrequencyGrid {
        FrequencyGrid {
            f_min: 0.01,
            f_max: 0.5,
            step: 0.0025,
            independent: 50,
        }
    }

    #[test]
    fn test_analytic_threshold_closed_form() {
        let mut estimator = AnalyticFap::new(0.01).unwrap();
        let grid = test_grid();
        let z = estimator.threshold(&[], &[], &grid).unwrap();
        let expected = -(1.0 - 0.99f64.powf(1.0 / 50.0)).ln();
        assert_relative_eq!(z, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_analytic_threshold_grows_with_grid() {
        let mut estimator = AnalyticFap::default();
        let small = FrequencyGrid {
            independent: 10,
            ..test_grid()
        };
        let large = FrequencyGrid {
            independent: 1000,
            ..test_grid()
        };
        let z_small = estimator.threshold(&[], &[], &small).unwrap();
        let z_large = estimator.threshold(&[], &[], &large).unwrap();
        assert!(z_large > z_small);
    }

    #[test]
    fn test_invalid_fap_rejected() {
        assert!(AnalyticFap::new(0.0).is_err());
        assert!(AnalyticFap::new(1.0).is_err());
        assert!(BootstrapFap::new(0.5, 0, ChaCha8Rng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_bootstrap_threshold_sane() {
        let times: Vec<f64> = (0..60).map(|i| i as f64 * 0.5).collect();
        let values: Vec<f64> = (0..60).map(|i| ((i * 37) % 13) as f64 * 0.1).collect();
        let grid = frequency_grid(&times).unwrap();
        let mut estimator =
            BootstrapFap::new(0.05, 50, ChaCha8Rng::seed_from_u64(7)).unwrap();
        let threshold = estimator.threshold(&times, &values, &grid).unwrap();
        assert!(threshold.is_finite());
        assert!(threshold > 0.0);
    }

    #[test]
    fn test_cache_hit_skips_estimator() {
        struct Counting(usize);
        impl FapEstimator for Counting {
            fn threshold(&mut self, _: &[f64], _: &[f64], _: &FrequencyGrid) -> Result<f64> {
                self.0 += 1;
                Ok(42.0)
            }
        }

        let grid = test_grid();
        let mut cache = FapThresholdCache::new();
        let mut estimator = Counting(0);

        assert_eq!(
            cache
                .threshold_for(&mut estimator, &[], &[], &grid)
                .unwrap(),
            42.0
        );
        assert_eq!(
            cache
                .threshold_for(&mut estimator, &[], &[], &grid)
                .unwrap(),
            42.0
        );
        assert_eq!(estimator.0, 1, "second identical request must hit cache");
    }

    #[test]
    fn test_cache_invalidates_on_changed_bounds() {
        struct Counting(usize);
        impl FapEstimator for Counting {
            fn threshold(&mut self, _: &[f64], _: &[f64], _: &FrequencyGrid) -> Result<f64> {
                self.0 += 1;
                Ok(self.0 as f64)
            }
        }

        let grid_a = test_grid();
        let grid_b = FrequencyGrid {
            f_max: 0.7,
            ..grid_a
        };
        let mut cache = FapThresholdCache::new();
        let mut estimator = Counting(0);

        cache
            .threshold_for(&mut estimator, &[], &[], &grid_a)
            .unwrap();
        cache
            .threshold_for(&mut estimator, &[], &[], &grid_b)
            .unwrap();
        // Returning to the first bounds recomputes again: single-entry cache
        cache
            .threshold_for(&mut estimator, &[], &[], &grid_a)
            .unwrap();
        assert_eq!(estimator.0, 3);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = FapThresholdCache::new();
        let mut estimator = AnalyticFap::default();
        cache
            .threshold_for(&mut estimator, &[], &[], &test_grid())
            .unwrap();
        assert!(cache.is_populated());
        cache.clear();
        assert!(!cache.is_populated());
    }
}
