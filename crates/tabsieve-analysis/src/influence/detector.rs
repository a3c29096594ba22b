//! Influence-based outlier detection using Cook's distance.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use tabsieve_core::config::TabsieveConfig;
use tabsieve_core::errors::{DetectionError, DetectionResult};
use tabsieve_core::types::{CenterMeasure, Dataset, FeatureMatrix, FeatureSet, InfluenceScore};

use super::confidence::label_confidence;
use super::regression::{design_for, fit_ols};
use super::types::InfluenceOutcome;
use crate::contamination::ContaminationEstimator;
use crate::selection;

/// Flags records that pull the per-feature regressions hardest.
///
/// Every feature is regressed on the others; a record's score is its mean
/// Cook's distance over the fits that succeeded. The contamination estimate
/// decides how many of the highest scores are outliers.
#[derive(Debug, Clone, Default)]
pub struct InfluenceOutlierDetector {
    estimator: ContaminationEstimator,
}

impl InfluenceOutlierDetector {
    pub fn new(center: CenterMeasure) -> Self {
        Self::with_estimator(ContaminationEstimator::new(center))
    }

    pub fn with_estimator(estimator: ContaminationEstimator) -> Self {
        Self { estimator }
    }

    pub fn from_config(config: &TabsieveConfig) -> DetectionResult<Self> {
        Ok(Self::with_estimator(ContaminationEstimator::from_config(
            &config.contamination,
        )?))
    }

    pub fn detect(&self, data: &Dataset, features: &[&str]) -> DetectionResult<InfluenceOutcome> {
        let feature_set = FeatureSet::new(features)?;
        if feature_set.len() < 2 {
            return Err(DetectionError::invalid_argument(
                "features",
                "influence detection needs at least two features",
            ));
        }

        let matrix = data.feature_matrix(&feature_set)?;
        let n = matrix.n_rows();
        let n_params = matrix.n_cols();
        if n <= n_params {
            return Err(DetectionError::degenerate(format!(
                "{n} records cannot fit regressions with {n_params} parameters"
            )));
        }

        let contamination = self.estimator.estimate_matrix(&matrix);
        let (raw_scores, skipped) = mean_cooks_distance(&matrix)?;

        let count = contamination.count_of(n);
        let labels = selection::label_top_k(&raw_scores, count);
        let confidence = label_confidence(&raw_scores, &labels, contamination)?;
        let scores = raw_scores
            .iter()
            .zip(confidence)
            .map(|(&score, confidence)| InfluenceScore { score, confidence })
            .collect();

        let positions = selection::outlier_positions(&labels);
        let outlier_rows: Vec<usize> = positions.iter().map(|&i| matrix.row_ids()[i]).collect();
        let outliers = data.select(&feature_set.as_strs())?.take_rows(&outlier_rows)?;

        info!(
            n_records = n,
            n_outliers = outlier_rows.len(),
            contamination = contamination.value(),
            skipped_fits = skipped.len(),
            "influence detection finished"
        );

        Ok(InfluenceOutcome {
            outliers,
            outlier_rows,
            labels,
            scores,
            contamination,
            skipped,
        })
    }
}

/// Mean Cook's distance per record over the per-feature fits that succeed.
fn mean_cooks_distance(matrix: &FeatureMatrix) -> DetectionResult<(Vec<f64>, Vec<DetectionError>)> {
    let fits: Vec<_> = (0..matrix.n_cols())
        .into_par_iter()
        .map(|target| {
            let (design, response) = design_for(matrix, target);
            fit_ols(&design, &response).map(|fit| fit.cooks_distance())
        })
        .collect();

    let n = matrix.n_rows();
    let mut totals = vec![0.0; n];
    let mut used = 0usize;
    let mut skipped = Vec::new();

    for (target, fit) in fits.into_iter().enumerate() {
        let feature = &matrix.names()[target];
        match fit {
            Ok(distances) => {
                debug!(feature = %feature, "regression fitted");
                for (total, d) in totals.iter_mut().zip(distances) {
                    *total += d;
                }
                used += 1;
            }
            Err(e) => {
                warn!(feature = %feature, error = %e, "skipping regression");
                skipped.push(DetectionError::ConvergenceFailure {
                    feature: feature.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if used == 0 {
        return Err(DetectionError::degenerate(
            "no per-feature regression could be fitted",
        ));
    }
    for total in &mut totals {
        *total /= used as f64;
    }
    Ok((totals, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsieve_core::types::ColumnData;

    /// y ≈ 2x with alternating noise; the last record breaks the relation.
    fn linear_with_spike() -> Dataset {
        let mut x: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let mut y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, v)| 2.0 * v + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        x.push(100.0);
        y.push(400.0);
        Dataset::new()
            .with_column("x", ColumnData::Numeric(x))
            .unwrap()
            .with_column("y", ColumnData::Numeric(y))
            .unwrap()
    }

    #[test]
    fn test_flags_influential_record() {
        let data = linear_with_spike();
        let outcome = InfluenceOutlierDetector::default()
            .detect(&data, &["x", "y"])
            .unwrap();
        assert!(outcome.contamination.value() > 0.0);
        assert_eq!(outcome.outlier_rows, vec![40]);
        assert_eq!(outcome.outliers.len(), 1);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.scores.len(), 41);
    }

    #[test]
    fn test_single_feature_rejected() {
        let data = linear_with_spike();
        let err = InfluenceOutlierDetector::default()
            .detect(&data, &["x"])
            .unwrap_err();
        assert!(matches!(err, DetectionError::InvalidArgument { .. }));
    }

    #[test]
    fn test_too_few_records_is_degenerate() {
        let data = Dataset::new()
            .with_column("a", ColumnData::Numeric(vec![1.0, 2.0]))
            .unwrap()
            .with_column("b", ColumnData::Numeric(vec![3.0, 1.0]))
            .unwrap();
        let err = InfluenceOutlierDetector::default()
            .detect(&data, &["a", "b"])
            .unwrap_err();
        assert!(matches!(err, DetectionError::DegenerateInput(_)));
    }

    #[test]
    fn test_collinear_features_all_fail() {
        let a: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let b: Vec<f64> = a.iter().map(|v| 3.0 * v + 1.0).collect();
        let data = Dataset::new()
            .with_column("a", ColumnData::Numeric(a))
            .unwrap()
            .with_column("b", ColumnData::Numeric(b))
            .unwrap();
        let err = InfluenceOutlierDetector::default()
            .detect(&data, &["a", "b"])
            .unwrap_err();
        assert!(matches!(err, DetectionError::DegenerateInput(_)));
    }

    #[test]
    fn test_constant_feature_is_skipped() {
        let data = linear_with_spike()
            .with_column("k", ColumnData::Numeric(vec![7.0; 41]))
            .unwrap();
        let outcome = InfluenceOutlierDetector::default()
            .detect(&data, &["x", "y", "k"])
            .unwrap();
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(
            &outcome.skipped[0],
            DetectionError::ConvergenceFailure { feature, .. } if feature == "k"
        ));
        assert_eq!(outcome.outlier_rows, vec![40]);
    }

    #[test]
    fn test_confidence_accompanies_every_score() {
        let data = linear_with_spike();
        let outcome = InfluenceOutlierDetector::new(CenterMeasure::Median)
            .detect(&data, &["y", "x"])
            .unwrap();
        assert!(outcome
            .scores
            .iter()
            .all(|s| s.score >= 0.0 && (0.0..=1.0).contains(&s.confidence)));
        let mut all = outcome.outlier_rows.clone();
        all.extend(outcome.inlier_rows());
        all.sort_unstable();
        assert_eq!(all, (0..41).collect::<Vec<_>>());
    }
}
