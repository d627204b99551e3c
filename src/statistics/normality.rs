use std::f64::consts::SQRT_2;

use statrs::function::erf::{erfc, erfc_inv};
use statrs::statistics::Statistics;

use crate::error::{Result, StatisticsError};
use crate::math::TOLERANCE;

/// Significance level used when the caller does not pick one.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Result of a one-sample Kolmogorov-Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsOutcome {
    /// Largest gap between the empirical and the fitted Gaussian CDF.
    pub statistic: f64,
    /// `Φ⁻¹(1 - α/2) / √n`.
    pub critical_value: f64,
    /// Sample size.
    pub sample_size: usize,
}

impl KsOutcome {
    /// `true` if the statistic does not exceed the critical value.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.statistic <= self.critical_value
    }
}

/// Kolmogorov-Smirnov test of a sample against a Gaussian fitted to it.
///
/// The Gaussian uses the sample mean and the sample (`n - 1`) standard
/// deviation. For each sorted value at 1-based rank `i` the empirical CDF is
/// `i / n`; the statistic is the largest absolute difference to the Gaussian
/// CDF over all ranks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsNormalityTest {
    significance_level: f64,
}

impl Default for KsNormalityTest {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }
}

impl KsNormalityTest {
    /// Creates a test at the given significance level.
    ///
    /// # Errors
    ///
    /// Returns an error if `significance_level` is not inside `(0, 1)`.
    pub fn new(significance_level: f64) -> Result<Self> {
        if !(significance_level > 0.0 && significance_level < 1.0) {
            return Err(StatisticsError::InvalidSignificanceLevel(significance_level).into());
        }
        Ok(Self { significance_level })
    }

    /// Returns the configured significance level.
    #[must_use]
    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Runs the test.
    ///
    /// Returns `None` when there is nothing meaningful to test: an empty
    /// sample, a non-finite value, or zero spread (including a single value).
    #[must_use]
    pub fn evaluate(&self, data: &[f64]) -> Option<KsOutcome> {
        if data.is_empty() {
            return None;
        }
        if data.iter().any(|v| !v.is_finite()) {
            tracing::debug!("normality input contains non-finite values");
            return None;
        }

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().mean();
        let std_dev = sorted.iter().std_dev();
        // NaN for a single sample.
        if !(std_dev > TOLERANCE * mean.abs().max(1.0)) {
            tracing::debug!(std_dev, "normality input has no spread");
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let n = sorted.len() as f64;

        let mut statistic = 0.0_f64;
        for (i, value) in sorted.iter().enumerate() {
            let f_obs = standard_normal_cdf((value - mean) / std_dev);
            #[allow(clippy::cast_precision_loss)]
            let f_exp = (i + 1) as f64 / n;
            statistic = statistic.max((f_obs - f_exp).abs());
        }

        let critical_value =
            standard_normal_quantile(1.0 - self.significance_level / 2.0) / n.sqrt();

        tracing::trace!(statistic, critical_value, n = sorted.len(), "ks test");
        Some(KsOutcome {
            statistic,
            critical_value,
            sample_size: sorted.len(),
        })
    }

    /// `true` if `data` is consistent with a Gaussian at this significance level.
    #[must_use]
    pub fn accepts(&self, data: &[f64]) -> bool {
        self.evaluate(data).is_some_and(|outcome| outcome.is_normal())
    }
}

/// Standard normal CDF `Φ(x)`.
fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal quantile `Φ⁻¹(p)` for `p` in `(0, 1)`.
fn standard_normal_quantile(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Checks whether `data` plausibly comes from a Gaussian distribution.
///
/// Empty, non-finite and constant samples are never normal. An invalid
/// `significance_level` (outside `(0, 1)`) also yields `false`.
#[must_use]
pub fn is_normally_distributed(data: &[f64], significance_level: f64) -> bool {
    match KsNormalityTest::new(significance_level) {
        Ok(test) => test.accepts(data),
        Err(e) => {
            tracing::debug!(error = %e, "normality test not run");
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use statrs::distribution::{ContinuousCDF, Normal};

    fn default_test() -> KsNormalityTest {
        KsNormalityTest::new(DEFAULT_SIGNIFICANCE_LEVEL).unwrap()
    }

    /// Evenly spaced quantiles of a Gaussian: as normal as a finite sample gets.
    fn gaussian_quantiles(n: usize, mean: f64, sd: f64) -> Vec<f64> {
        let dist = Normal::new(mean, sd).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let step = 1.0 / n as f64;
        std::iter::successors(Some(0.5 * step), |q| Some(q + step))
            .take(n)
            .map(|q| dist.inverse_cdf(q))
            .collect()
    }

    #[test]
    fn empty_is_not_normal() {
        assert!(!is_normally_distributed(&[], DEFAULT_SIGNIFICANCE_LEVEL));
        assert!(default_test().evaluate(&[]).is_none());
    }

    #[test]
    fn tight_symmetric_sample_is_normal() {
        let data = [-0.02, -0.01, 0.0, 0.01, 0.02];
        let outcome = default_test().evaluate(&data).unwrap();
        assert_eq!(outcome.sample_size, 5);
        assert_relative_eq!(outcome.statistic, 0.136_455, epsilon = 1e-5);
        assert_relative_eq!(outcome.critical_value, 0.876_523, epsilon = 1e-5);
        assert!(outcome.is_normal());
        assert!(is_normally_distributed(&data, DEFAULT_SIGNIFICANCE_LEVEL));
    }

    #[test]
    fn input_order_does_not_matter() {
        let sorted = default_test().evaluate(&[-0.02, -0.01, 0.0, 0.01, 0.02]).unwrap();
        let shuffled = default_test().evaluate(&[0.01, -0.02, 0.02, 0.0, -0.01]).unwrap();
        assert_eq!(sorted, shuffled);
    }

    #[test]
    fn gaussian_quantiles_are_normal() {
        let data = gaussian_quantiles(50, 3.0, 0.5);
        let outcome = default_test().evaluate(&data).unwrap();
        assert!(outcome.statistic < 0.02, "D = {}", outcome.statistic);
        assert!(outcome.is_normal());
    }

    #[test]
    fn constant_sample_is_not_normal() {
        assert!(default_test().evaluate(&[0.1, 0.1, 0.1, 0.1]).is_none());
        assert!(!is_normally_distributed(&[7.0; 10], DEFAULT_SIGNIFICANCE_LEVEL));
    }

    #[test]
    fn single_value_is_not_normal() {
        assert!(!is_normally_distributed(&[1.5], DEFAULT_SIGNIFICANCE_LEVEL));
    }

    #[test]
    fn non_finite_is_not_normal() {
        assert!(!is_normally_distributed(&[0.0, f64::NAN, 1.0], DEFAULT_SIGNIFICANCE_LEVEL));
        assert!(!is_normally_distributed(&[0.0, f64::INFINITY, 1.0], DEFAULT_SIGNIFICANCE_LEVEL));
    }

    #[test]
    fn small_bimodal_sample_passes_literal_test() {
        // D ~ 0.319 against a critical value of ~0.800 at n = 6.
        let data = [-10.0, -10.0, -10.0, 10.0, 10.0, 10.0];
        let outcome = default_test().evaluate(&data).unwrap();
        assert_relative_eq!(outcome.statistic, 0.319_345, epsilon = 1e-5);
        assert!(outcome.is_normal());
    }

    #[test]
    fn large_bimodal_sample_is_not_normal() {
        let mut data = vec![-10.0; 30];
        data.extend(std::iter::repeat(10.0).take(30));
        let outcome = default_test().evaluate(&data).unwrap();
        assert_relative_eq!(outcome.statistic, 0.339_311, epsilon = 1e-5);
        assert_relative_eq!(outcome.critical_value, 0.253_030, epsilon = 1e-5);
        assert!(!outcome.is_normal());
    }

    #[test]
    fn skewed_sample_is_not_normal() {
        #[allow(clippy::cast_precision_loss)]
        let data: Vec<f64> = (0..400)
            .map(|i| -(1.0 - (i as f64 + 0.5) / 400.0).ln())
            .collect();
        assert!(!is_normally_distributed(&data, DEFAULT_SIGNIFICANCE_LEVEL));
    }

    #[test]
    fn statistic_equal_to_critical_value_is_normal() {
        let outcome = KsOutcome {
            statistic: 0.25,
            critical_value: 0.25,
            sample_size: 60,
        };
        assert!(outcome.is_normal());

        let above = KsOutcome {
            statistic: 0.25 + 1e-12,
            ..outcome
        };
        assert!(!above.is_normal());
    }

    #[test]
    fn sample_at_its_own_critical_level() {
        // Pick alpha so that the critical value lands on the sample's D.
        let data = [-0.02, -0.01, 0.0, 0.01, 0.02];
        let d = default_test().evaluate(&data).unwrap().statistic;
        let root_n = 5.0_f64.sqrt();
        let alpha = 2.0 * (1.0 - standard_normal_cdf(d * root_n));

        let at = KsNormalityTest::new(alpha).unwrap().evaluate(&data).unwrap();
        assert_relative_eq!(at.critical_value, d, epsilon = 1e-10);
        assert_relative_eq!(at.statistic, d);

        // A slightly smaller alpha raises the critical value, a larger one lowers it.
        let below = KsNormalityTest::new(alpha - 1e-9).unwrap();
        let above = KsNormalityTest::new(alpha + 1e-9).unwrap();
        assert!(below.accepts(&data));
        assert!(!above.accepts(&data));
    }

    #[test]
    fn stricter_level_widens_acceptance() {
        // A smaller alpha raises the critical value.
        let data = gaussian_quantiles(20, 0.0, 1.0);
        let loose = KsNormalityTest::new(0.2).unwrap().evaluate(&data).unwrap();
        let strict = KsNormalityTest::new(0.01).unwrap().evaluate(&data).unwrap();
        assert_relative_eq!(loose.statistic, strict.statistic);
        assert!(strict.critical_value > loose.critical_value);
    }

    #[test]
    fn reference_distribution_matches_statrs() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        for x in [-3.0, -1.2, 0.0, 0.4, 2.5] {
            assert_relative_eq!(standard_normal_cdf(x), normal.cdf(x), epsilon = 1e-12);
        }
        assert_relative_eq!(standard_normal_quantile(0.975), 1.959_964, epsilon = 1e-6);
        assert_relative_eq!(standard_normal_quantile(0.5), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_significance_level_is_rejected() {
        for alpha in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(KsNormalityTest::new(alpha).is_err(), "alpha = {alpha}");
            assert!(!is_normally_distributed(&[-1.0, 0.0, 1.0], alpha));
        }
    }
}
