//! Date coverage analysis.
//!
//! Records are grouped by calendar month; a `CoverageRule` decides which
//! months, or which years, hold too few of them.

pub mod analyzer;
pub mod rules;
pub mod types;

pub use analyzer::DateCoverageAnalyzer;
pub use rules::{CalendarRule, CoverageRule, MinimumDaysRule};
pub use types::{CoverageReport, YearGap};
