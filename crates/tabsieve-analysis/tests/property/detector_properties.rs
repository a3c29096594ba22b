use proptest::prelude::*;

use tabsieve_analysis::density::AutoCutoff;
use tabsieve_analysis::{ContaminationEstimator, DensityOutlierDetector, InfluenceOutlierDetector};
use tabsieve_core::types::{CenterMeasure, ColumnData, ContaminationMode, Dataset};

fn dataset(points: &[(f64, f64)]) -> Dataset {
    Dataset::new()
        .with_column("x", ColumnData::Numeric(points.iter().map(|p| p.0).collect()))
        .unwrap()
        .with_column("y", ColumnData::Numeric(points.iter().map(|p| p.1).collect()))
        .unwrap()
}

fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 12..80)
}

proptest! {
    #[test]
    fn contamination_estimate_in_unit_interval(pts in points(), median in any::<bool>()) {
        let center = if median { CenterMeasure::Median } else { CenterMeasure::Mean };
        let estimate = ContaminationEstimator::new(center)
            .estimate(&dataset(&pts), &["x", "y"])
            .unwrap();
        prop_assert!((0.0..=1.0).contains(&estimate.value()));
    }

    #[test]
    fn density_outliers_and_inliers_partition_input(
        pts in points(),
        fraction in 0.05f64..0.5,
        three_sigma in any::<bool>(),
    ) {
        let mode = if three_sigma { ContaminationMode::ThreeSigma } else { ContaminationMode::Auto };
        let data = dataset(&pts);
        let outcome = DensityOutlierDetector::new()
            .with_neighbors_fraction(fraction)
            .with_mode(mode)
            .detect(&data, &["x", "y"])
            .unwrap();

        prop_assert_eq!(outcome.labels.len(), pts.len());
        prop_assert_eq!(outcome.outliers.len(), outcome.outlier_rows.len());
        let mut all = outcome.outlier_rows.clone();
        all.extend(outcome.inlier_rows());
        all.sort_unstable();
        prop_assert_eq!(all, (0..pts.len()).collect::<Vec<_>>());
        prop_assert!(outcome.scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn proportion_cutoff_count_is_rounded_share(pts in points(), share in 0.0f64..0.5) {
        let outcome = DensityOutlierDetector::new()
            .with_auto_cutoff(AutoCutoff::Proportion(share))
            .detect(&dataset(&pts), &["x", "y"])
            .unwrap();
        let expected = (share * pts.len() as f64).round() as usize;
        prop_assert_eq!(outcome.n_outliers(), expected);
    }

    #[test]
    fn density_detection_is_deterministic(pts in points()) {
        let data = dataset(&pts);
        let detector = DensityOutlierDetector::new();
        let a = detector.detect(&data, &["x", "y"]).unwrap();
        let b = detector.detect(&data, &["x", "y"]).unwrap();
        prop_assert_eq!(a.outlier_rows, b.outlier_rows);
    }

    #[test]
    fn influence_outliers_and_inliers_partition_input(pts in points(), median in any::<bool>()) {
        let center = if median { CenterMeasure::Median } else { CenterMeasure::Mean };
        let outcome = InfluenceOutlierDetector::new(center)
            .detect(&dataset(&pts), &["x", "y"])
            .unwrap();

        prop_assert_eq!(outcome.labels.len(), pts.len());
        prop_assert_eq!(outcome.n_outliers(), outcome.contamination.count_of(pts.len()));
        let mut all = outcome.outlier_rows.clone();
        all.extend(outcome.inlier_rows());
        all.sort_unstable();
        prop_assert_eq!(all, (0..pts.len()).collect::<Vec<_>>());
        prop_assert!(outcome
            .scores
            .iter()
            .all(|s| s.score.is_finite() && (0.0..=1.0).contains(&s.confidence)));
    }

    #[test]
    fn influence_detection_is_repeatable(pts in points()) {
        let data = dataset(&pts);
        let detector = InfluenceOutlierDetector::default();
        let a = detector.detect(&data, &["x", "y"]).unwrap();
        let b = detector.detect(&data, &["x", "y"]).unwrap();
        prop_assert_eq!(a.outlier_rows, b.outlier_rows);
        prop_assert_eq!(a.scores, b.scores);
    }
}
