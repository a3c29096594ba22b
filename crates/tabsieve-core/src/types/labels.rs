//! Result-side value types: labels, scores, estimates and coverage periods.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-record classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierLabel {
    Outlier,
    Inlier,
}

impl OutlierLabel {
    pub fn is_outlier(&self) -> bool {
        matches!(self, Self::Outlier)
    }

    pub fn from_flag(is_outlier: bool) -> Self {
        if is_outlier {
            Self::Outlier
        } else {
            Self::Inlier
        }
    }
}

/// Expected fraction of anomalous records, clamped to [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ContaminationEstimate(f64);

impl ContaminationEstimate {
    /// Create a new estimate, clamped to [0.0, 1.0]. NaN maps to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Number of records this fraction represents out of `n`, rounded to nearest.
    pub fn count_of(&self, n: usize) -> usize {
        ((self.0 * n as f64).round() as usize).min(n)
    }
}

impl fmt::Display for ContaminationEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Regression influence of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfluenceScore {
    /// Mean Cook's distance across the per-feature fits.
    pub score: f64,
    /// Confidence in the assigned label, in [0.0, 1.0].
    pub confidence: f64,
}

/// Record count for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoveragePeriod {
    pub year: i32,
    pub month: u32,
    pub days_count: usize,
}
