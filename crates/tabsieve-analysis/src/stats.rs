//! Summary statistics shared by the estimators.
//!
//! All functions return `None` for inputs too small to define the statistic
//! rather than propagating NaN.

use std::cmp::Ordering;

use tabsieve_core::constants::MAD_SCALE;
use tabsieve_core::types::{CenterMeasure, SpreadEstimator};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted_copy(values);
    Some(percentile_sorted(&sorted, 50.0))
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
    if variance.is_finite() {
        Some(variance.max(0.0).sqrt())
    } else {
        None
    }
}

/// Median absolute deviation from the median, scaled to be comparable to σ.
pub fn scaled_mad(values: &[f64]) -> Option<f64> {
    let med = median(values)?;
    let deviations: Vec<f64> = values.iter().map(|v| (v - med).abs()).collect();
    median(&deviations).map(|d| d * MAD_SCALE)
}

pub fn center(values: &[f64], measure: CenterMeasure) -> Option<f64> {
    match measure {
        CenterMeasure::Mean => mean(values),
        CenterMeasure::Median => median(values),
    }
}

pub fn spread(values: &[f64], estimator: SpreadEstimator) -> Option<f64> {
    match estimator {
        SpreadEstimator::StandardDeviation => sample_std(values),
        SpreadEstimator::MedianAbsoluteDeviation => scaled_mad(values),
    }
}

/// Ascending copy using a total order on floats.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Compute percentile of sorted data using linear interpolation.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}
