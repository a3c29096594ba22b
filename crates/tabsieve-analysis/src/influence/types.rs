//! Result types for influence-based detection.

use serde::Serialize;

use tabsieve_core::errors::DetectionError;
use tabsieve_core::types::{ContaminationEstimate, Dataset, InfluenceScore, OutlierLabel};

/// Result of an influence detection run.
#[derive(Debug, Clone, Serialize)]
pub struct InfluenceOutcome {
    /// Outlier records projected onto the feature columns, in original row order.
    pub outliers: Dataset,
    /// Original row index of each outlier, ascending.
    pub outlier_rows: Vec<usize>,
    pub labels: Vec<OutlierLabel>,
    pub scores: Vec<InfluenceScore>,
    pub contamination: ContaminationEstimate,
    /// Regressions left out of the mean score.
    #[serde(serialize_with = "serialize_errors")]
    pub skipped: Vec<DetectionError>,
}

impl InfluenceOutcome {
    pub fn n_outliers(&self) -> usize {
        self.outlier_rows.len()
    }

    pub fn inlier_rows(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.is_outlier())
            .map(|(i, _)| i)
            .collect()
    }
}

fn serialize_errors<S>(errors: &[DetectionError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}
