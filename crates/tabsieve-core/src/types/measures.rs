//! Tagged configuration choices shared by the detectors.
//!
//! Each enum parses from the textual form callers use in config files;
//! unknown values fail with `InvalidArgument` before any computation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DetectionError;

/// Central tendency used to position exceedance fences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterMeasure {
    #[default]
    Mean,
    Median,
}

impl CenterMeasure {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
        }
    }
}

impl FromStr for CenterMeasure {
    type Err = DetectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            other => Err(DetectionError::invalid_argument(
                "center_measure",
                format!("expected 'mean' or 'median', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for CenterMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spread used with the center. Standard deviation is the default for both
/// center measures; MAD pairs naturally with the median.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadEstimator {
    #[default]
    StandardDeviation,
    MedianAbsoluteDeviation,
}

impl SpreadEstimator {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StandardDeviation => "std",
            Self::MedianAbsoluteDeviation => "mad",
        }
    }
}

impl FromStr for SpreadEstimator {
    type Err = DetectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "std" | "stddev" | "standard_deviation" => Ok(Self::StandardDeviation),
            "mad" | "median_absolute_deviation" => Ok(Self::MedianAbsoluteDeviation),
            other => Err(DetectionError::invalid_argument(
                "spread_estimator",
                format!("expected 'std' or 'mad', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for SpreadEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the density detector picks its outlier cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContaminationMode {
    /// Fixed internal cutoff, independent of the data's spread.
    #[default]
    Auto,
    /// Cutoff calibrated by the three-sigma contamination estimate.
    ThreeSigma,
}

impl ContaminationMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::ThreeSigma => "3std",
        }
    }
}

impl FromStr for ContaminationMode {
    type Err = DetectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "3std" | "three_sigma" | "threesigma" => Ok(Self::ThreeSigma),
            other => Err(DetectionError::invalid_argument(
                "contamination_mode",
                format!("expected 'auto' or '3std', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ContaminationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Granularity of date coverage analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifyBy {
    #[default]
    Month,
    Year,
}

impl IdentifyBy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl FromStr for IdentifyBy {
    type Err = DetectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(DetectionError::invalid_argument(
                "identify_by",
                format!("expected 'month' or 'year', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for IdentifyBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
