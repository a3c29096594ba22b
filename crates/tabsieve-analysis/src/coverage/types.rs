//! Coverage report types.

use serde::Serialize;

use tabsieve_core::errors::DatasetError;
use tabsieve_core::types::{Column, ColumnData, CoveragePeriod, Dataset};

/// A year holding fewer records than expected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGap {
    pub year: i32,
    pub days_count: usize,
    pub missing_days: usize,
    /// `missing_days` in months, rounded to two decimals.
    pub missing_months: f64,
}

/// Incomplete periods found by a coverage analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "identify_by", content = "periods")]
pub enum CoverageReport {
    #[serde(rename = "month")]
    Monthly(Vec<CoveragePeriod>),
    #[serde(rename = "year")]
    Yearly(Vec<YearGap>),
}

impl CoverageReport {
    pub fn len(&self) -> usize {
        match self {
            Self::Monthly(periods) => periods.len(),
            Self::Yearly(gaps) => gaps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tabular form: `year, month, days_count` for months and
    /// `year, days_count, missing_days, missing_months` for years.
    pub fn to_dataset(&self) -> Result<Dataset, DatasetError> {
        match self {
            Self::Monthly(periods) => Dataset::from_columns(vec![
                Column::new(
                    "year",
                    ColumnData::Integer(periods.iter().map(|p| p.year as i64).collect()),
                ),
                Column::new(
                    "month",
                    ColumnData::Integer(periods.iter().map(|p| p.month as i64).collect()),
                ),
                Column::new(
                    "days_count",
                    ColumnData::Integer(periods.iter().map(|p| p.days_count as i64).collect()),
                ),
            ]),
            Self::Yearly(gaps) => Dataset::from_columns(vec![
                Column::new(
                    "year",
                    ColumnData::Integer(gaps.iter().map(|g| g.year as i64).collect()),
                ),
                Column::new(
                    "days_count",
                    ColumnData::Integer(gaps.iter().map(|g| g.days_count as i64).collect()),
                ),
                Column::new(
                    "missing_days",
                    ColumnData::Integer(gaps.iter().map(|g| g.missing_days as i64).collect()),
                ),
                Column::new(
                    "missing_months",
                    ColumnData::Numeric(gaps.iter().map(|g| g.missing_months).collect()),
                ),
            ]),
        }
    }
}
