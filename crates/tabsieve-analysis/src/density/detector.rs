//! Density-based outlier detection using the local outlier factor.

use std::time::Instant;

use tracing::{debug, info};

use tabsieve_core::config::TabsieveConfig;
use tabsieve_core::constants::DEFAULT_NEIGHBORS_FRACTION;
use tabsieve_core::errors::{DetectionError, DetectionResult};
use tabsieve_core::types::{CenterMeasure, ContaminationMode, Dataset, FeatureSet, OutlierLabel};

use super::lof::local_outlier_factor;
use super::neighbors::k_nearest;
use super::types::{AppliedCutoff, AutoCutoff, DensityOutcome, DistanceMetric};
use crate::contamination::ContaminationEstimator;
use crate::selection;

/// Flags records that sit in sparser regions than their neighbours.
#[derive(Debug, Clone)]
pub struct DensityOutlierDetector {
    neighbors_fraction: f64,
    mode: ContaminationMode,
    auto_cutoff: AutoCutoff,
    metric: DistanceMetric,
    estimator: ContaminationEstimator,
}

impl DensityOutlierDetector {
    pub fn new() -> Self {
        Self {
            neighbors_fraction: DEFAULT_NEIGHBORS_FRACTION,
            mode: ContaminationMode::Auto,
            auto_cutoff: AutoCutoff::default(),
            metric: DistanceMetric::default(),
            estimator: ContaminationEstimator::default(),
        }
    }

    pub fn with_neighbors_fraction(mut self, fraction: f64) -> Self {
        self.neighbors_fraction = fraction;
        self
    }

    pub fn with_mode(mut self, mode: ContaminationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the contamination mode from its textual form (`"auto"` or `"3std"`).
    pub fn with_mode_name(self, mode: &str) -> DetectionResult<Self> {
        Ok(self.with_mode(mode.parse()?))
    }

    /// Center measure used by the three-sigma contamination estimate.
    pub fn with_center(self, center: CenterMeasure) -> Self {
        self.with_estimator(ContaminationEstimator::new(center))
    }

    pub fn with_estimator(mut self, estimator: ContaminationEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_auto_cutoff(mut self, cutoff: AutoCutoff) -> Self {
        self.auto_cutoff = cutoff;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn from_config(config: &TabsieveConfig) -> DetectionResult<Self> {
        let density = &config.density;
        let auto_cutoff = match density.effective_auto_cutoff().trim().to_ascii_lowercase().as_str() {
            "threshold" => AutoCutoff::ScoreThreshold(density.effective_auto_threshold()),
            "proportion" => AutoCutoff::Proportion(density.effective_auto_proportion()),
            other => {
                return Err(DetectionError::invalid_argument(
                    "density.auto_cutoff",
                    format!("expected 'threshold' or 'proportion', got '{other}'"),
                ))
            }
        };

        Ok(Self::new()
            .with_neighbors_fraction(density.effective_neighbors_fraction())
            .with_mode_name(density.effective_contamination_mode())?
            .with_metric(density.effective_metric().parse()?)
            .with_auto_cutoff(auto_cutoff)
            .with_estimator(ContaminationEstimator::from_config(&config.contamination)?))
    }

    pub fn mode(&self) -> ContaminationMode {
        self.mode
    }

    /// Neighbour count for a dataset of `n` records: `max(1, floor(n · fraction))`.
    pub fn neighbor_count(&self, n: usize) -> usize {
        ((n as f64 * self.neighbors_fraction).floor() as usize).max(1)
    }

    /// Score every record and return the ones classified as outliers.
    pub fn detect(&self, data: &Dataset, features: &[&str]) -> DetectionResult<DensityOutcome> {
        if !(self.neighbors_fraction > 0.0 && self.neighbors_fraction <= 1.0) {
            return Err(DetectionError::invalid_argument(
                "neighbors_fraction",
                format!("must lie in (0, 1], got {}", self.neighbors_fraction),
            ));
        }
        let feature_set = FeatureSet::new(features)?;
        let start = Instant::now();

        let matrix = data.feature_matrix(&feature_set)?;
        let n = matrix.n_rows();
        let k = self.neighbor_count(n);
        if n < k + 1 {
            return Err(DetectionError::degenerate(format!(
                "need at least {} records for {k} neighbours, got {n}",
                k + 1
            )));
        }

        let neighborhoods = k_nearest(&matrix, k, self.metric);
        let scores = local_outlier_factor(&neighborhoods);

        let (labels, cutoff) = match (self.mode, self.auto_cutoff) {
            (ContaminationMode::Auto, AutoCutoff::ScoreThreshold(threshold)) => (
                selection::label_above(&scores, threshold),
                AppliedCutoff::ScoreThreshold { threshold },
            ),
            (ContaminationMode::Auto, AutoCutoff::Proportion(fraction)) => {
                self.proportion_cut(&scores, fraction)
            }
            (ContaminationMode::ThreeSigma, _) => {
                let estimate = self.estimator.estimate_matrix(&matrix);
                debug!(contamination = estimate.value(), "three-sigma contamination");
                self.proportion_cut(&scores, estimate.value())
            }
        };

        let positions = selection::outlier_positions(&labels);
        let outlier_rows: Vec<usize> = positions.iter().map(|&i| matrix.row_ids()[i]).collect();
        let outliers = data.select(&feature_set.as_strs())?.take_rows(&outlier_rows)?;

        let elapsed = start.elapsed();
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            n_neighbors = k,
            n_records = n,
            n_outliers = outlier_rows.len(),
            mode = %self.mode,
            "density detection finished"
        );

        Ok(DensityOutcome {
            outliers,
            outlier_rows,
            labels,
            scores,
            n_neighbors: k,
            cutoff,
            elapsed,
        })
    }

    fn proportion_cut(&self, scores: &[f64], fraction: f64) -> (Vec<OutlierLabel>, AppliedCutoff) {
        let fraction = fraction.clamp(0.0, 1.0);
        let count = ((fraction * scores.len() as f64).round() as usize).min(scores.len());
        (
            selection::label_top_k(scores, count),
            AppliedCutoff::Proportion { fraction, count },
        )
    }
}

impl Default for DensityOutlierDetector {
    fn default() -> Self {
        Self::new()
    }
}
