//! Density detector configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the density-based outlier detector.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DensityConfig {
    /// Fraction of the dataset used as neighbour count, in (0, 1]. Default: 0.1.
    pub neighbors_fraction: Option<f64>,
    /// "auto" or "3std". Default: "auto".
    pub contamination_mode: Option<String>,
    /// Cutoff used in auto mode: "threshold" or "proportion". Default: "threshold".
    pub auto_cutoff: Option<String>,
    /// Local outlier factor threshold for the auto threshold cutoff. Default: 1.5.
    pub auto_threshold: Option<f64>,
    /// Outlier proportion for the auto proportion cutoff. Default: 0.10.
    pub auto_proportion: Option<f64>,
    /// Distance metric: "euclidean" or "manhattan". Default: "euclidean".
    pub metric: Option<String>,
}

impl DensityConfig {
    pub fn effective_neighbors_fraction(&self) -> f64 {
        self.neighbors_fraction
            .unwrap_or(constants::DEFAULT_NEIGHBORS_FRACTION)
    }

    pub fn effective_contamination_mode(&self) -> &str {
        self.contamination_mode
            .as_deref()
            .unwrap_or(constants::DEFAULT_CONTAMINATION_MODE)
    }

    pub fn effective_auto_cutoff(&self) -> &str {
        self.auto_cutoff.as_deref().unwrap_or("threshold")
    }

    pub fn effective_auto_threshold(&self) -> f64 {
        self.auto_threshold
            .unwrap_or(constants::DEFAULT_AUTO_LOF_THRESHOLD)
    }

    pub fn effective_auto_proportion(&self) -> f64 {
        self.auto_proportion
            .unwrap_or(constants::DEFAULT_AUTO_PROPORTION)
    }

    pub fn effective_metric(&self) -> &str {
        self.metric.as_deref().unwrap_or("euclidean")
    }
}
