//! Brute-force k-nearest-neighbour search.
//!
//! Neighbours are ordered by distance, then by row position, so equal
//! distances always resolve the same way.

use std::cmp::Ordering;

use rayon::prelude::*;

use tabsieve_core::types::FeatureMatrix;

use super::types::DistanceMetric;

/// The `k` nearest neighbours of one record, closest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    pub indices: Vec<usize>,
    pub distances: Vec<f64>,
}

impl Neighborhood {
    /// Distance to the k-th nearest neighbour.
    pub fn k_distance(&self) -> f64 {
        self.distances.last().copied().unwrap_or(0.0)
    }
}

/// Neighbourhood of every row. Requires `1 <= k < matrix.n_rows()`.
pub fn k_nearest(matrix: &FeatureMatrix, k: usize, metric: DistanceMetric) -> Vec<Neighborhood> {
    let n = matrix.n_rows();
    debug_assert!(k >= 1 && k < n, "k must lie in [1, n)");

    (0..n)
        .into_par_iter()
        .map(|i| {
            let point = matrix.row(i);
            let mut candidates: Vec<(f64, usize)> = (0..n)
                .filter(|&j| j != i)
                .map(|j| (metric.distance(point, matrix.row(j)), j))
                .collect();

            if k < candidates.len() {
                candidates.select_nth_unstable_by(k - 1, by_distance_then_index);
                candidates.truncate(k);
            }
            candidates.sort_by(by_distance_then_index);

            let (distances, indices): (Vec<f64>, Vec<usize>) = candidates.into_iter().unzip();
            Neighborhood { indices, distances }
        })
        .collect()
}

fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[f64]) -> FeatureMatrix {
        FeatureMatrix::from_columns(
            vec!["x".into()],
            &[points.to_vec()],
            (0..points.len()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_nearest_on_a_line() {
        let m = line(&[0.0, 1.0, 3.0, 10.0]);
        let hoods = k_nearest(&m, 2, DistanceMetric::Euclidean);
        assert_eq!(hoods[0].indices, vec![1, 2]);
        assert_eq!(hoods[3].indices, vec![2, 1]);
        assert!((hoods[3].k_distance() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_resolve_by_position() {
        // Rows 0 and 2 are both at distance 1 from row 1.
        let m = line(&[0.0, 1.0, 2.0]);
        let hoods = k_nearest(&m, 1, DistanceMetric::Euclidean);
        assert_eq!(hoods[1].indices, vec![0]);
    }

    #[test]
    fn test_self_is_never_a_neighbor() {
        let m = line(&[5.0, 5.0, 5.0]);
        let hoods = k_nearest(&m, 2, DistanceMetric::Euclidean);
        for (i, hood) in hoods.iter().enumerate() {
            assert!(!hood.indices.contains(&i));
            assert_eq!(hood.k_distance(), 0.0);
        }
    }
}
