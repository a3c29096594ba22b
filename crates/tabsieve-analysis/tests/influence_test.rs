//! End-to-end tests for the influence detector.

use tabsieve_analysis::InfluenceOutlierDetector;
use tabsieve_bench::fixtures::{uniform_with_injected_outliers, SimpleRng};
use tabsieve_core::config::TabsieveConfig;
use tabsieve_core::errors::DetectionError;
use tabsieve_core::types::{CenterMeasure, ColumnData, Dataset};

/// Three correlated features; the last `n_bad` records break the relation
/// and sit far out on `a`.
fn correlated_with_breaks(n: usize, n_bad: usize, seed: u64) -> Dataset {
    let mut rng = SimpleRng::new(seed);
    let mut a = Vec::with_capacity(n + n_bad);
    let mut b = Vec::with_capacity(n + n_bad);
    let mut c = Vec::with_capacity(n + n_bad);
    for _ in 0..n {
        let x = rng.next_f64() * 10.0;
        a.push(x);
        b.push(2.0 * x + rng.next_f64() - 0.5);
        c.push(rng.next_f64() * 5.0);
    }
    for i in 0..n_bad {
        a.push(60.0 + i as f64);
        b.push(-40.0);
        c.push(rng.next_f64() * 5.0);
    }
    Dataset::new()
        .with_column("a", ColumnData::Numeric(a))
        .unwrap()
        .with_column("b", ColumnData::Numeric(b))
        .unwrap()
        .with_column("c", ColumnData::Numeric(c))
        .unwrap()
}

#[test]
fn test_flags_records_that_break_the_relation() {
    let data = correlated_with_breaks(300, 3, 17);
    let outcome = InfluenceOutlierDetector::new(CenterMeasure::Mean)
        .detect(&data, &["a", "b", "c"])
        .unwrap();
    assert_eq!(outcome.outlier_rows, vec![300, 301, 302]);
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_outlier_count_follows_contamination() {
    let (data, _) = uniform_with_injected_outliers(1000, 5, 5, 10.0, 42).unwrap();
    let features = ["f0", "f1", "f2", "f3", "f4"];
    let outcome = InfluenceOutlierDetector::default()
        .detect(&data, &features)
        .unwrap();
    assert_eq!(outcome.n_outliers(), outcome.contamination.count_of(data.len()));
    assert_eq!(outcome.n_outliers() + outcome.inlier_rows().len(), data.len());
    assert_eq!(outcome.outliers.column_names(), features.to_vec());
}

#[test]
fn test_outliers_score_at_least_as_high_as_inliers() {
    let data = correlated_with_breaks(200, 4, 3);
    let outcome = InfluenceOutlierDetector::default()
        .detect(&data, &["a", "b", "c"])
        .unwrap();
    let lowest_outlier = outcome
        .outlier_rows
        .iter()
        .map(|&r| outcome.scores[r].score)
        .fold(f64::INFINITY, f64::min);
    let highest_inlier = outcome
        .inlier_rows()
        .into_iter()
        .map(|r| outcome.scores[r].score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(lowest_outlier >= highest_inlier);
}

#[test]
fn test_duplicate_feature_names_rejected() {
    let data = correlated_with_breaks(20, 0, 1);
    let err = InfluenceOutlierDetector::default()
        .detect(&data, &["a", "a"])
        .unwrap_err();
    assert!(matches!(err, DetectionError::InvalidArgument { .. }));
}

#[test]
fn test_from_config() {
    let config = TabsieveConfig::from_toml("[contamination]\nrule = \"tukey\"\n").unwrap();
    let detector = InfluenceOutlierDetector::from_config(&config).unwrap();
    let data = correlated_with_breaks(100, 2, 8);
    let outcome = detector.detect(&data, &["a", "b", "c"]).unwrap();
    assert!(outcome.contamination.value() > 0.0);
}

#[test]
fn test_outcome_serializes() {
    let data = correlated_with_breaks(60, 1, 2);
    let outcome = InfluenceOutlierDetector::default()
        .detect(&data, &["a", "b"])
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert!(json["scores"][0]["confidence"].is_number());
    assert!(json["skipped"].as_array().unwrap().is_empty());
}

fn skipped_features(outcome: &tabsieve_analysis::influence::InfluenceOutcome) -> Vec<String> {
    let mut names: Vec<String> = outcome
        .skipped
        .iter()
        .map(|e| match e {
            DetectionError::ConvergenceFailure { feature, .. } => feature.clone(),
            other => panic!("unexpected skip reason: {other}"),
        })
        .collect();
    names.sort();
    names
}

#[test]
fn test_constant_feature_only_skips_its_own_fit() {
    let data = correlated_with_breaks(98, 2, 8)
        .with_column("k", ColumnData::Numeric(vec![7.0; 100]))
        .unwrap();
    let detector = InfluenceOutlierDetector::default();
    let with_constant = detector.detect(&data, &["a", "b", "k"]).unwrap();
    assert_eq!(skipped_features(&with_constant), vec!["k"]);

    // The constant predictor adds nothing to the other two regressions.
    let without = detector.detect(&data, &["a", "b"]).unwrap();
    for (x, y) in with_constant.scores.iter().zip(&without.scores) {
        assert!((x.score - y.score).abs() <= 1e-8 * y.score.max(1.0));
    }
}

#[test]
fn test_collinear_feature_does_not_fail_detection() {
    let base = correlated_with_breaks(98, 2, 8);
    let tripled: Vec<f64> = base
        .column("a")
        .unwrap()
        .data
        .to_f64()
        .unwrap()
        .iter()
        .map(|v| 3.0 * v)
        .collect();
    let data = base
        .with_column("a3", ColumnData::Numeric(tripled))
        .unwrap();
    let outcome = InfluenceOutlierDetector::default()
        .detect(&data, &["a", "b", "c", "a3"])
        .unwrap();
    // Only the two exactly-determined targets are dropped.
    assert_eq!(skipped_features(&outcome), vec!["a", "a3"]);
    assert!(outcome.scores.iter().all(|s| s.score.is_finite() && s.score >= 0.0));
    assert_eq!(outcome.n_outliers(), outcome.contamination.count_of(data.len()));
}

#[test]
fn influence_detection_is_deterministic() {
    let data = correlated_with_breaks(300, 3, 17);
    let detector = InfluenceOutlierDetector::default();
    let first = detector.detect(&data, &["a", "b", "c"]).unwrap();
    let second = detector.detect(&data, &["a", "b", "c"]).unwrap();
    assert_eq!(first.outlier_rows, second.outlier_rows);
    assert_eq!(first.labels, second.labels);
    assert_eq!(first.scores, second.scores);
}
