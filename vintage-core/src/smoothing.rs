use crate::Float;

/// Computes an **additive-one (Laplace) smoothed log-probability** for one
/// outcome of a categorical distribution.
///
/// Smoothing adds a single pseudo-observation to every outcome before
/// normalizing, so no outcome ever receives probability zero (and hence no
/// log-probability of negative infinity), even when its observed count is
/// zero.
///
/// # Definition
///
/// For an outcome observed `count` times out of `total` observations, drawn
/// from a categorical distribution with `outcomes` possible values:
///
/// ```text
/// log P = ln((count + 1) / (total + outcomes))
/// ```
///
/// Summed over all `outcomes` values, the smoothed probabilities normalize
/// to 1 exactly when every outcome shares the same `total` and `outcomes`
/// denominator.
///
/// # Parameters
///
/// - `count`: Observations of this outcome. May be 0.
/// - `total`: Observations of all outcomes combined. This should equal the
///   sum of the individual outcome counts.
/// - `outcomes`: Number of possible outcomes. Must be at least 1.
///
/// # Returns
///
/// The smoothed log-probability, a finite negative value (or 0.0 in the
/// degenerate single-outcome, zero-observation case).
///
/// # Examples
///
/// ```rust
/// use vintage_core::smoothing::laplace_log_prob;
///
/// // 3 of 10 observations, 5 possible outcomes: P = (3+1)/(10+5)
/// let lp = laplace_log_prob(3, 10, 5);
///
/// assert!((lp - (4.0_f64 / 15.0).ln()).abs() < 1e-12);
/// ```
///
/// # Notes
///
/// - With `count = 0` this degrades gracefully to `ln(1 / (total + outcomes))`,
///   which is what keeps unseen words and absent labels well-defined.
/// - Passing a `total` that does not match the sum of outcome counts produces
///   a distribution that no longer normalizes to 1.
pub fn laplace_log_prob(count: usize, total: usize, outcomes: usize) -> Float {
    ((count + 1) as Float / (total + outcomes) as Float).ln()
}
