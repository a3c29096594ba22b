//! Exceedance rules: how far from typical a value must be to count against
//! the contamination estimate.

use std::fmt;

use tabsieve_core::constants::{DEFAULT_SIGMA_MULTIPLIER, DEFAULT_TUKEY_MULTIPLIER};
use tabsieve_core::types::{CenterMeasure, SpreadEstimator};

use crate::stats;

/// Closed interval of typical values. Values strictly outside exceed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fences {
    pub lower: f64,
    pub upper: f64,
}

impl Fences {
    pub fn excludes(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Strategy deciding the fences for one feature.
///
/// Returns `None` when the feature has no usable spread; such a feature
/// contributes an exceed-fraction of zero.
pub trait ExceedanceRule: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn fences(&self, values: &[f64]) -> Option<Fences>;
}

/// `center ± multiplier · spread`. With the defaults this is the three-sigma rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaRule {
    pub multiplier: f64,
    pub center: CenterMeasure,
    pub spread: SpreadEstimator,
}

impl SigmaRule {
    /// Three standard deviations around `center`. The spread stays the
    /// sample standard deviation whichever center is chosen.
    pub fn three_sigma(center: CenterMeasure) -> Self {
        Self {
            multiplier: DEFAULT_SIGMA_MULTIPLIER,
            center,
            spread: SpreadEstimator::StandardDeviation,
        }
    }

    pub fn with_spread(mut self, spread: SpreadEstimator) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }
}

impl Default for SigmaRule {
    fn default() -> Self {
        Self::three_sigma(CenterMeasure::Mean)
    }
}

impl ExceedanceRule for SigmaRule {
    fn name(&self) -> &'static str {
        "sigma"
    }

    fn fences(&self, values: &[f64]) -> Option<Fences> {
        let center = stats::center(values, self.center)?;
        let spread = stats::spread(values, self.spread)?;
        if !spread.is_finite() || spread <= 0.0 {
            return None;
        }
        let reach = self.multiplier * spread;
        Some(Fences {
            lower: center - reach,
            upper: center + reach,
        })
    }
}

/// Tukey fences: `Q1 - k·IQR` and `Q3 + k·IQR`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TukeyRule {
    pub multiplier: f64,
}

impl Default for TukeyRule {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_TUKEY_MULTIPLIER,
        }
    }
}

impl ExceedanceRule for TukeyRule {
    fn name(&self) -> &'static str {
        "tukey"
    }

    fn fences(&self, values: &[f64]) -> Option<Fences> {
        if values.len() < 4 {
            return None;
        }
        let sorted = stats::sorted_copy(values);
        let q1 = stats::percentile_sorted(&sorted, 25.0);
        let q3 = stats::percentile_sorted(&sorted, 75.0);
        let iqr = q3 - q1;
        if !iqr.is_finite() || iqr <= 0.0 {
            return None;
        }
        Some(Fences {
            lower: q1 - self.multiplier * iqr,
            upper: q3 + self.multiplier * iqr,
        })
    }
}
