//! Density-based outlier detection.
//!
//! Each record is compared with its `k` nearest neighbours; records much
//! less dense than their neighbourhood get a high local outlier factor.

pub mod detector;
pub mod lof;
pub mod neighbors;
pub mod types;

pub use detector::DensityOutlierDetector;
pub use neighbors::{k_nearest, Neighborhood};
pub use types::{AppliedCutoff, AutoCutoff, DensityOutcome, DistanceMetric};
