//! Label confidence from the rank of a score among the training scores.
//!
//! With `m` the number of scores `<= s` and `post = (1 + m) / (2 + n)`,
//! an outlier's confidence is `1 − BinomialCDF(n − floor(n·c); n, post)`.
//! Inliers get the complement.

use statrs::distribution::{Binomial, DiscreteCDF};

use tabsieve_core::errors::{DetectionError, DetectionResult};
use tabsieve_core::types::{ContaminationEstimate, OutlierLabel};

use crate::stats;

/// Confidence in each label, aligned with `scores`.
pub fn label_confidence(
    scores: &[f64],
    labels: &[OutlierLabel],
    contamination: ContaminationEstimate,
) -> DetectionResult<Vec<f64>> {
    let n = scores.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    let sorted = stats::sorted_copy(scores);
    let expected_inliers = n as u64 - (n as f64 * contamination.value()).floor() as u64;

    scores
        .iter()
        .zip(labels)
        .map(|(&score, label)| {
            let at_or_below = sorted.partition_point(|&s| s <= score);
            let posterior = (1.0 + at_or_below as f64) / (2.0 + n as f64);
            let binomial = Binomial::new(posterior, n as u64).map_err(|e| {
                DetectionError::degenerate(format!("binomial confidence model: {e}"))
            })?;
            let confidence = (1.0 - binomial.cdf(expected_inliers)).clamp(0.0, 1.0);
            Ok(if label.is_outlier() {
                confidence
            } else {
                1.0 - confidence
            })
        })
        .collect()
}
