//! Contamination estimation: median per-feature exceed-fraction.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use tabsieve_core::config::ContaminationConfig;
use tabsieve_core::errors::{DetectionError, DetectionResult};
use tabsieve_core::types::{
    CenterMeasure, ContaminationEstimate, Dataset, FeatureMatrix, FeatureSet, SpreadEstimator,
};

use super::rules::{ExceedanceRule, Fences, SigmaRule, TukeyRule};
use crate::stats;

/// Exceedance summary for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureExceedance {
    pub feature: String,
    /// `None` when the feature has no usable spread.
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub exceed_fraction: f64,
}

/// Derives an expected outlier fraction from the spread of each feature.
#[derive(Debug, Clone)]
pub struct ContaminationEstimator {
    rule: Arc<dyn ExceedanceRule>,
}

impl ContaminationEstimator {
    /// Three-sigma estimator around `center`.
    pub fn new(center: CenterMeasure) -> Self {
        Self::with_rule(SigmaRule::three_sigma(center))
    }

    pub fn with_rule(rule: impl ExceedanceRule + 'static) -> Self {
        Self {
            rule: Arc::new(rule),
        }
    }

    pub fn from_config(config: &ContaminationConfig) -> DetectionResult<Self> {
        let center: CenterMeasure = config.effective_center_measure().parse()?;
        let spread: SpreadEstimator = config.effective_spread_estimator().parse()?;
        match config.effective_rule().trim().to_ascii_lowercase().as_str() {
            "sigma" => Ok(Self::with_rule(
                SigmaRule::three_sigma(center)
                    .with_spread(spread)
                    .with_multiplier(config.effective_sigma_multiplier()),
            )),
            "tukey" => Ok(Self::with_rule(TukeyRule {
                multiplier: config.effective_tukey_multiplier(),
            })),
            other => Err(DetectionError::invalid_argument(
                "contamination.rule",
                format!("expected 'sigma' or 'tukey', got '{other}'"),
            )),
        }
    }

    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Median exceed-fraction across `features`.
    pub fn estimate(&self, data: &Dataset, features: &[&str]) -> DetectionResult<ContaminationEstimate> {
        let breakdown = self.breakdown(data, features)?;
        let fractions: Vec<f64> = breakdown.iter().map(|f| f.exceed_fraction).collect();
        Ok(aggregate(&fractions))
    }

    /// Per-feature fences and exceed-fractions, in feature order.
    pub fn breakdown(&self, data: &Dataset, features: &[&str]) -> DetectionResult<Vec<FeatureExceedance>> {
        let features = FeatureSet::new(features)?;
        if data.is_empty() {
            return Err(DetectionError::degenerate(
                "cannot estimate contamination on an empty dataset",
            ));
        }
        let matrix = data.feature_matrix(&features)?;
        Ok(self.breakdown_matrix(&matrix))
    }

    /// Estimate over an already extracted feature space.
    pub fn estimate_matrix(&self, matrix: &FeatureMatrix) -> ContaminationEstimate {
        let fractions: Vec<f64> = self
            .breakdown_matrix(matrix)
            .iter()
            .map(|f| f.exceed_fraction)
            .collect();
        aggregate(&fractions)
    }

    fn breakdown_matrix(&self, matrix: &FeatureMatrix) -> Vec<FeatureExceedance> {
        matrix
            .names()
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let values = matrix.column(j);
                let fences = self.rule.fences(&values);
                let exceed_fraction = exceed_fraction(&values, fences);
                debug!(
                    feature = %name,
                    rule = self.rule.name(),
                    exceed_fraction,
                    "feature exceedance"
                );
                FeatureExceedance {
                    feature: name.clone(),
                    lower: fences.map(|f| f.lower),
                    upper: fences.map(|f| f.upper),
                    exceed_fraction,
                }
            })
            .collect()
    }
}

impl Default for ContaminationEstimator {
    fn default() -> Self {
        Self::new(CenterMeasure::Mean)
    }
}

fn exceed_fraction(values: &[f64], fences: Option<Fences>) -> f64 {
    match fences {
        Some(f) if !values.is_empty() => {
            let exceeding = values.iter().filter(|&&v| f.excludes(v)).count();
            exceeding as f64 / values.len() as f64
        }
        _ => 0.0,
    }
}

fn aggregate(fractions: &[f64]) -> ContaminationEstimate {
    stats::median(fractions)
        .map(ContaminationEstimate::new)
        .unwrap_or_else(ContaminationEstimate::zero)
}
