//! Core types for density-based detection.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use tabsieve_core::constants::{DEFAULT_AUTO_LOF_THRESHOLD, DEFAULT_AUTO_PROPORTION};
use tabsieve_core::errors::DetectionError;
use tabsieve_core::types::{Dataset, OutlierLabel};

/// Distance between two feature vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
}

impl DistanceMetric {
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Self::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f64>()
                .sqrt(),
            Self::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = DetectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "manhattan" => Ok(Self::Manhattan),
            other => Err(DetectionError::invalid_argument(
                "metric",
                format!("expected 'euclidean' or 'manhattan', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cutoff applied when the contamination mode is `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AutoCutoff {
    /// Flag records whose local outlier factor exceeds the value.
    ScoreThreshold(f64),
    /// Flag this fraction of records, highest factor first.
    Proportion(f64),
}

impl AutoCutoff {
    pub fn threshold() -> Self {
        Self::ScoreThreshold(DEFAULT_AUTO_LOF_THRESHOLD)
    }

    pub fn proportion() -> Self {
        Self::Proportion(DEFAULT_AUTO_PROPORTION)
    }
}

impl Default for AutoCutoff {
    fn default() -> Self {
        Self::threshold()
    }
}

/// The cutoff a detection run actually used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppliedCutoff {
    ScoreThreshold { threshold: f64 },
    Proportion { fraction: f64, count: usize },
}

/// Result of a density detection run.
#[derive(Debug, Clone, Serialize)]
pub struct DensityOutcome {
    /// Outlier records projected onto the feature columns, in original row order.
    pub outliers: Dataset,
    /// Original row index of each outlier, ascending.
    pub outlier_rows: Vec<usize>,
    /// One label per input record.
    pub labels: Vec<OutlierLabel>,
    /// Local outlier factor per input record.
    pub scores: Vec<f64>,
    pub n_neighbors: usize,
    pub cutoff: AppliedCutoff,
    pub elapsed: Duration,
}

impl DensityOutcome {
    pub fn n_outliers(&self) -> usize {
        self.outlier_rows.len()
    }

    /// Original row index of each inlier, ascending.
    pub fn inlier_rows(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.is_outlier())
            .map(|(i, _)| i)
            .collect()
    }
}
