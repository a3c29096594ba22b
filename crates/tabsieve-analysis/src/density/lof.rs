//! Local outlier factor.
//!
//! reach(p, o) = max(k_distance(o), d(p, o))
//! lrd(p)      = 1 / (mean_o reach(p, o) + ε)
//! lof(p)      = mean_o lrd(o) / lrd(p)
//!
//! A factor near 1 means the record is as dense as its neighbours; larger
//! values mean it sits in a sparser region.

use rayon::prelude::*;

use tabsieve_core::constants::LOF_EPSILON;

use super::neighbors::Neighborhood;

/// Local reachability density of every record.
pub fn local_reachability_density(neighborhoods: &[Neighborhood]) -> Vec<f64> {
    let k_distances: Vec<f64> = neighborhoods.iter().map(Neighborhood::k_distance).collect();

    neighborhoods
        .par_iter()
        .map(|hood| {
            if hood.indices.is_empty() {
                return 0.0;
            }
            let total: f64 = hood
                .indices
                .iter()
                .zip(&hood.distances)
                .map(|(&o, &d)| d.max(k_distances[o]))
                .sum();
            let mean_reach = total / hood.indices.len() as f64;
            1.0 / (mean_reach + LOF_EPSILON)
        })
        .collect()
}

/// Local outlier factor of every record.
pub fn local_outlier_factor(neighborhoods: &[Neighborhood]) -> Vec<f64> {
    let lrd = local_reachability_density(neighborhoods);

    neighborhoods
        .par_iter()
        .zip(lrd.par_iter())
        .map(|(hood, &own)| {
            if hood.indices.is_empty() || own <= 0.0 {
                return 1.0;
            }
            let neighbor_mean =
                hood.indices.iter().map(|&o| lrd[o]).sum::<f64>() / hood.indices.len() as f64;
            neighbor_mean / own
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::neighbors::k_nearest;
    use crate::density::types::DistanceMetric;
    use tabsieve_core::types::FeatureMatrix;

    fn scores(points: &[f64], k: usize) -> Vec<f64> {
        let m = FeatureMatrix::from_columns(
            vec!["x".into()],
            &[points.to_vec()],
            (0..points.len()).collect(),
        )
        .unwrap();
        local_outlier_factor(&k_nearest(&m, k, DistanceMetric::Euclidean))
    }

    #[test]
    fn test_evenly_spaced_interior_is_near_one() {
        let points: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let lof = scores(&points, 2);
        for &s in &lof[3..17] {
            assert!((s - 1.0).abs() < 1e-6, "interior factor {s}");
        }
    }

    #[test]
    fn test_isolated_point_scores_highest() {
        let mut points: Vec<f64> = (0..20).map(|i| i as f64 * 0.1).collect();
        points.push(50.0);
        let lof = scores(&points, 3);
        let (max_idx, max) = lof
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        assert_eq!(max_idx, 20);
        assert!(*max > 10.0);
    }

    #[test]
    fn test_duplicates_stay_finite() {
        let lof = scores(&[1.0, 1.0, 1.0, 1.0, 2.0], 2);
        assert!(lof.iter().all(|s| s.is_finite()));
    }
}
