//! End-to-end tests for contamination estimation.

use tabsieve_analysis::contamination::{SigmaRule, TukeyRule};
use tabsieve_analysis::ContaminationEstimator;
use tabsieve_bench::fixtures::uniform_with_injected_outliers;
use tabsieve_core::config::TabsieveConfig;
use tabsieve_core::types::{CenterMeasure, ColumnData, Dataset, SpreadEstimator};

fn spiked(n: usize, extreme: usize) -> Vec<f64> {
    (0..n).map(|i| if i < extreme { 100.0 } else { 0.0 }).collect()
}

#[test]
fn test_median_of_feature_fractions() {
    let data = Dataset::new()
        .with_column("a", ColumnData::Numeric(spiked(100, 2)))
        .unwrap()
        .with_column("b", ColumnData::Numeric(spiked(100, 8)))
        .unwrap();
    let estimate = ContaminationEstimator::new(CenterMeasure::Mean)
        .estimate(&data, &["a", "b"])
        .unwrap();
    assert!((estimate.value() - 0.05).abs() < 1e-12);
}

#[test]
fn test_injected_share_on_uniform_data() {
    let (data, _) = uniform_with_injected_outliers(1000, 5, 5, 10.0, 42).unwrap();
    let estimate = ContaminationEstimator::default()
        .estimate(&data, &["f0", "f1", "f2", "f3", "f4"])
        .unwrap();
    assert_eq!(estimate.count_of(data.len()), 5);
}

#[test]
fn test_median_center_differs_on_skewed_feature() {
    // Mostly zeros with a heavy tail: the median sits below the mean, so the
    // upper fence moves down and more records exceed it.
    let mut values = vec![0.0; 80];
    values.extend((1..=20).map(|i| i as f64 * 2.0));
    let data = Dataset::new()
        .with_column("skew", ColumnData::Numeric(values))
        .unwrap();
    let by_mean = ContaminationEstimator::new(CenterMeasure::Mean)
        .estimate(&data, &["skew"])
        .unwrap();
    let by_median = ContaminationEstimator::new(CenterMeasure::Median)
        .estimate(&data, &["skew"])
        .unwrap();
    assert!(by_median.value() >= by_mean.value());
}

#[test]
fn test_integer_columns_are_widened() {
    let mut values: Vec<i64> = vec![1; 99];
    values.push(1_000);
    let data = Dataset::new()
        .with_column("n", ColumnData::Integer(values))
        .unwrap();
    let estimate = ContaminationEstimator::default()
        .estimate(&data, &["n"])
        .unwrap();
    assert!((estimate.value() - 0.01).abs() < 1e-12);
}

#[test]
fn test_alternative_rules() {
    let data = Dataset::new()
        .with_column("a", ColumnData::Numeric(spiked(100, 2)))
        .unwrap();

    // MAD of a mostly-constant column is zero, so nothing is flagged.
    let mad = ContaminationEstimator::with_rule(
        SigmaRule::three_sigma(CenterMeasure::Median)
            .with_spread(SpreadEstimator::MedianAbsoluteDeviation),
    );
    assert_eq!(mad.estimate(&data, &["a"]).unwrap().value(), 0.0);

    let tukey = ContaminationEstimator::with_rule(TukeyRule::default());
    assert_eq!(tukey.rule_name(), "tukey");
}

#[test]
fn test_from_full_config() {
    let config = TabsieveConfig::from_toml(
        r#"
[contamination]
center_measure = "median"
sigma_multiplier = 2.0
"#,
    )
    .unwrap();
    let estimator = ContaminationEstimator::from_config(&config.contamination).unwrap();
    assert_eq!(estimator.rule_name(), "sigma");
}

#[test]
fn test_breakdown_serializes() {
    let data = Dataset::new()
        .with_column("a", ColumnData::Numeric(spiked(50, 1)))
        .unwrap();
    let breakdown = ContaminationEstimator::default()
        .breakdown(&data, &["a"])
        .unwrap();
    let json = serde_json::to_string(&breakdown).unwrap();
    assert!(json.contains("\"feature\":\"a\""));
}

#[test]
fn test_repeated_estimates_match() {
    let (data, _) = uniform_with_injected_outliers(500, 4, 6, 8.0, 11).unwrap();
    let features = ["f0", "f1", "f2", "f3"];
    let estimator = ContaminationEstimator::new(CenterMeasure::Median);
    let first = estimator.breakdown(&data, &features).unwrap();
    let second = estimator.breakdown(&data, &features).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        estimator.estimate(&data, &features).unwrap(),
        estimator.estimate(&data, &features).unwrap()
    );
}
