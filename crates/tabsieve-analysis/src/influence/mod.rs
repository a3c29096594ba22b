//! Influence-based outlier detection.
//!
//! Each feature is regressed on the rest; records with a large mean Cook's
//! distance are the ones the fits depend on most.

pub mod confidence;
pub mod detector;
pub mod regression;
pub mod types;

pub use detector::InfluenceOutlierDetector;
pub use regression::{FitError, RegressionFit};
pub use types::InfluenceOutcome;
