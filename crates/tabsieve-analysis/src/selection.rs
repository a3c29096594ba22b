//! Turning per-record scores into outlier labels.
//!
//! Ranking is deterministic: descending score, ties broken by ascending
//! record position.

use std::cmp::Ordering;

use tabsieve_core::types::OutlierLabel;

/// Positions of the `count` highest scores.
pub fn top_k(scores: &[f64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| rank_cmp(scores, a, b));
    order.truncate(count.min(scores.len()));
    order
}

/// Label the `count` highest-scoring records as outliers.
pub fn label_top_k(scores: &[f64], count: usize) -> Vec<OutlierLabel> {
    let mut labels = vec![OutlierLabel::Inlier; scores.len()];
    for idx in top_k(scores, count) {
        labels[idx] = OutlierLabel::Outlier;
    }
    labels
}

/// Label records whose score strictly exceeds `threshold`.
pub fn label_above(scores: &[f64], threshold: f64) -> Vec<OutlierLabel> {
    scores
        .iter()
        .map(|&s| OutlierLabel::from_flag(s > threshold))
        .collect()
}

/// Positions labeled outlier, ascending.
pub fn outlier_positions(labels: &[OutlierLabel]) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.is_outlier())
        .map(|(i, _)| i)
        .collect()
}

fn rank_cmp(scores: &[f64], a: usize, b: usize) -> Ordering {
    // NaN ranks last
    let (sa, sb) = (nan_low(scores[a]), nan_low(scores[b]));
    sb.total_cmp(&sa).then(a.cmp(&b))
}

fn nan_low(x: f64) -> f64 {
    if x.is_nan() {
        f64::NEG_INFINITY
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_breaks_ties_by_position() {
        let scores = [1.0, 5.0, 3.0, 5.0, 0.5];
        assert_eq!(top_k(&scores, 2), vec![1, 3]);
        assert_eq!(top_k(&scores, 3), vec![1, 3, 2]);
    }

    #[test]
    fn test_top_k_count_larger_than_input() {
        assert_eq!(top_k(&[2.0, 1.0], 5), vec![0, 1]);
    }

    #[test]
    fn test_nan_ranks_last() {
        assert_eq!(top_k(&[f64::NAN, 0.1, 0.2], 2), vec![2, 1]);
    }

    #[test]
    fn test_label_above_is_strict() {
        let labels = label_above(&[1.5, 1.6, 0.9], 1.5);
        assert_eq!(outlier_positions(&labels), vec![1]);
    }
}
