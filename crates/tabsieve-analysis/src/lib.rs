//! # tabsieve-analysis
//!
//! Outlier detection over tabular data:
//! - **contamination**: expected outlier fraction from per-feature exceedance
//! - **density**: local outlier factor over k nearest neighbours
//! - **influence**: Cook's distance across per-feature regressions
//! - **coverage**: calendar periods with too few dated records

pub mod contamination;
pub mod coverage;
pub mod density;
pub mod influence;
pub mod selection;
pub mod stats;

pub use contamination::ContaminationEstimator;
pub use coverage::DateCoverageAnalyzer;
pub use density::DensityOutlierDetector;
pub use influence::InfluenceOutlierDetector;
