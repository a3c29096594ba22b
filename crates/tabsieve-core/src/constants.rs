//! Shared constants for the tabsieve outlier engine.

/// Default fraction of the dataset used as the neighbour count.
pub const DEFAULT_NEIGHBORS_FRACTION: f64 = 0.1;

/// Outlier proportion used by the `auto` proportion cutoff.
pub const DEFAULT_AUTO_PROPORTION: f64 = 0.10;

/// Local outlier factor above which the `auto` threshold cutoff flags a record.
pub const DEFAULT_AUTO_LOF_THRESHOLD: f64 = 1.5;

/// Spread multiplier for the three-sigma exceedance rule.
pub const DEFAULT_SIGMA_MULTIPLIER: f64 = 3.0;

/// IQR multiplier for Tukey fences.
pub const DEFAULT_TUKEY_MULTIPLIER: f64 = 1.5;

/// Consistency constant that makes MAD comparable to σ for normal data.
pub const MAD_SCALE: f64 = 1.4826;

/// Added to the mean reachability distance so duplicate points keep a finite density.
pub const LOF_EPSILON: f64 = 1e-10;

/// A month with fewer records than this is reported as incomplete.
pub const DEFAULT_MIN_DAYS_PER_MONTH: u32 = 28;

/// Expected records per year for year-level coverage.
pub const DEFAULT_DAYS_PER_YEAR: u32 = 365;

/// Days per month used to express missing days as months.
pub const DEFAULT_DAYS_PER_MONTH: f64 = 30.0;

/// Default center measure.
pub const DEFAULT_CENTER_MEASURE: &str = "mean";

/// Default contamination mode for the density detector.
pub const DEFAULT_CONTAMINATION_MODE: &str = "auto";

// ---- Accepted strategy names ----

/// Exceedance rules accepted by `contamination.rule`.
pub const EXCEEDANCE_RULES: &[&str] = &["sigma", "tukey"];

/// Cutoffs accepted by `density.auto_cutoff`.
pub const AUTO_CUTOFFS: &[&str] = &["threshold", "proportion"];

/// Metrics accepted by `density.metric`.
pub const DISTANCE_METRICS: &[&str] = &["euclidean", "manhattan"];

/// Rules accepted by `coverage.rule`.
pub const COVERAGE_RULES: &[&str] = &["minimum_days", "calendar"];
