//! Contamination estimator configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the contamination estimator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContaminationConfig {
    /// Center measure: "mean" or "median". Default: "mean".
    pub center_measure: Option<String>,
    /// Spread estimator: "std" or "mad". Default: "std", even for a median center.
    pub spread_estimator: Option<String>,
    /// Exceedance rule: "sigma" or "tukey". Default: "sigma".
    pub rule: Option<String>,
    /// Spread multiplier for the sigma rule. Default: 3.0.
    pub sigma_multiplier: Option<f64>,
    /// IQR multiplier for the Tukey rule. Default: 1.5.
    pub tukey_multiplier: Option<f64>,
}

impl ContaminationConfig {
    pub fn effective_center_measure(&self) -> &str {
        self.center_measure
            .as_deref()
            .unwrap_or(constants::DEFAULT_CENTER_MEASURE)
    }

    pub fn effective_spread_estimator(&self) -> &str {
        self.spread_estimator.as_deref().unwrap_or("std")
    }

    pub fn effective_rule(&self) -> &str {
        self.rule.as_deref().unwrap_or("sigma")
    }

    pub fn effective_sigma_multiplier(&self) -> f64 {
        self.sigma_multiplier
            .unwrap_or(constants::DEFAULT_SIGMA_MULTIPLIER)
    }

    pub fn effective_tukey_multiplier(&self) -> f64 {
        self.tukey_multiplier
            .unwrap_or(constants::DEFAULT_TUKEY_MULTIPLIER)
    }
}
