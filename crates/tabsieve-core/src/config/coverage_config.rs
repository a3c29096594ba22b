//! Date coverage configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the date coverage analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoverageConfig {
    /// "minimum_days" or "calendar". Default: "minimum_days".
    pub rule: Option<String>,
    /// Months with fewer records are incomplete. Default: 28.
    pub min_days_per_month: Option<u32>,
    /// Years with fewer records are incomplete. Default: 365.
    pub days_per_year: Option<u32>,
    /// Divisor turning missing days into months. Default: 30.
    pub days_per_month: Option<f64>,
    /// "month" or "year". Default: "month".
    pub identify_by: Option<String>,
}

impl CoverageConfig {
    pub fn effective_rule(&self) -> &str {
        self.rule.as_deref().unwrap_or("minimum_days")
    }

    pub fn effective_min_days_per_month(&self) -> u32 {
        self.min_days_per_month
            .unwrap_or(constants::DEFAULT_MIN_DAYS_PER_MONTH)
    }

    pub fn effective_days_per_year(&self) -> u32 {
        self.days_per_year
            .unwrap_or(constants::DEFAULT_DAYS_PER_YEAR)
    }

    pub fn effective_days_per_month(&self) -> f64 {
        self.days_per_month
            .unwrap_or(constants::DEFAULT_DAYS_PER_MONTH)
    }

    pub fn effective_identify_by(&self) -> &str {
        self.identify_by.as_deref().unwrap_or("month")
    }
}
