// Power of paired and one-sample t-tests
//
// Both tests share the same noncentral-t mechanics; they are separate
// operations because their effect sizes mean different things:
// - paired: mean difference between matched pairs / SD of the differences
// - one-sample: (expected mean - threshold) / assumed SD

use super::noncentral_t::noncentral_t_cdf;
use super::{PowerError, Result, TailMode};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Noncentrality parameter of the t statistic: ncp = d * sqrt(n)
pub fn noncentrality(d: f64, n: usize) -> f64 {
    d * (n as f64).sqrt()
}

/// Critical value of the central t distribution with n - 1 degrees of freedom
///
/// The (1 - alpha) quantile when one-tailed, otherwise the (1 - alpha/2) quantile.
pub fn critical_value(n: usize, alpha: f64, tail: TailMode) -> Result<f64> {
    validate_sample_size(n)?;
    validate_alpha(alpha)?;

    let df = (n - 1) as f64;
    let t = StudentsT::new(0.0, 1.0, df).map_err(|e| PowerError::Distribution(e.to_string()))?;

    let quantile = match tail {
        TailMode::OneTailed => 1.0 - alpha,
        TailMode::TwoTailed => 1.0 - alpha / 2.0,
    };

    Ok(t.inverse_cdf(quantile))
}

/// Statistical power of a paired t-test (H1: correctness)
///
/// # Arguments
/// * `n` - Number of paired comparisons (e.g. 50 prompts)
/// * `d` - Cohen's d of the paired differences
/// * `alpha` - Significance level (0.017 for a three-way Bonferroni correction)
/// * `tail` - One-tailed for a directional hypothesis (B > A)
///
/// # Example
/// ```
/// use evalstats::power::{power_paired_t_test, TailMode};
///
/// let power = power_paired_t_test(50, 0.5, 0.017, TailMode::OneTailed).unwrap();
/// assert!((power - 0.9088).abs() < 1e-3);
/// ```
pub fn power_paired_t_test(n: usize, d: f64, alpha: f64, tail: TailMode) -> Result<f64> {
    t_test_power(n, d, alpha, tail)
}

/// Statistical power of a one-sample t-test against a threshold (H2: retrieval quality)
///
/// `d` is the standardized distance of the expected mean from the threshold,
/// see [`effect_size_from_threshold`].
pub fn power_one_sample_t_test(n: usize, d: f64, alpha: f64, tail: TailMode) -> Result<f64> {
    t_test_power(n, d, alpha, tail)
}

/// Standardized effect size of a mean against a threshold: (mean - threshold) / sd
///
/// # Example
/// ```
/// use evalstats::power::effect_size_from_threshold;
///
/// // Test P@5 > 0.70, expecting a mean of 0.80 with SD 0.10
/// let d = effect_size_from_threshold(0.80, 0.70, 0.10).unwrap();
/// assert!((d - 1.0).abs() < 1e-9);
/// ```
pub fn effect_size_from_threshold(expected_mean: f64, threshold: f64, assumed_sd: f64) -> Result<f64> {
    if !(assumed_sd.is_finite() && assumed_sd > 0.0) {
        return Err(PowerError::InvalidParameter(format!(
            "assumed standard deviation must be positive, got {}",
            assumed_sd
        )));
    }

    Ok((expected_mean - threshold) / assumed_sd)
}

fn t_test_power(n: usize, d: f64, alpha: f64, tail: TailMode) -> Result<f64> {
    if !d.is_finite() {
        return Err(PowerError::InvalidParameter(format!(
            "effect size must be finite, got {}",
            d
        )));
    }

    let t_crit = critical_value(n, alpha, tail)?;
    let df = (n - 1) as f64;
    let ncp = noncentrality(d, n);

    // P(t > t_crit | ncp)
    let power = 1.0 - noncentral_t_cdf(t_crit, df, ncp)?;

    Ok(power.clamp(0.0, 1.0))
}

fn validate_sample_size(n: usize) -> Result<()> {
    if n < 2 {
        return Err(PowerError::InvalidParameter(format!(
            "sample size must be >= 2 for a t-test, got {}",
            n
        )));
    }
    Ok(())
}

fn validate_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(PowerError::InvalidParameter(format!(
            "alpha must be in (0, 1), got {}",
            alpha
        )));
    }
    Ok(())
}
