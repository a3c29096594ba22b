//! Date coverage analysis: which months or years hold too few records.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use tabsieve_core::config::CoverageConfig;
use tabsieve_core::errors::{DetectionError, DetectionResult};
use tabsieve_core::types::{BTreeMap, Column, ColumnData, CoveragePeriod, Dataset, IdentifyBy};

use super::rules::{CalendarRule, CoverageRule, MinimumDaysRule};
use super::types::{CoverageReport, YearGap};

/// Groups dated records by calendar period and reports the sparse ones.
#[derive(Debug, Clone)]
pub struct DateCoverageAnalyzer {
    rule: Arc<dyn CoverageRule>,
    identify_by: IdentifyBy,
}

impl DateCoverageAnalyzer {
    pub fn new() -> Self {
        Self::with_rule(MinimumDaysRule::default())
    }

    pub fn with_rule(rule: impl CoverageRule + 'static) -> Self {
        Self {
            rule: Arc::new(rule),
            identify_by: IdentifyBy::default(),
        }
    }

    pub fn with_identify_by(mut self, identify_by: IdentifyBy) -> Self {
        self.identify_by = identify_by;
        self
    }

    pub fn from_config(config: &CoverageConfig) -> DetectionResult<Self> {
        let identify_by: IdentifyBy = config.effective_identify_by().parse()?;
        let analyzer = match config.effective_rule().trim().to_ascii_lowercase().as_str() {
            "minimum_days" => Self::with_rule(MinimumDaysRule {
                min_days_per_month: config.effective_min_days_per_month(),
                days_per_year: config.effective_days_per_year(),
                days_per_month: config.effective_days_per_month(),
            }),
            "calendar" => Self::with_rule(CalendarRule {
                days_per_month: config.effective_days_per_month(),
            }),
            other => {
                return Err(DetectionError::invalid_argument(
                    "coverage.rule",
                    format!("expected 'minimum_days' or 'calendar', got '{other}'"),
                ))
            }
        };
        Ok(analyzer.with_identify_by(identify_by))
    }

    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    pub fn identify_by(&self) -> IdentifyBy {
        self.identify_by
    }

    /// Record count of every (year, month) present in `date_column`, ascending.
    pub fn period_counts(
        &self,
        data: &Dataset,
        date_column: &str,
    ) -> DetectionResult<Vec<CoveragePeriod>> {
        let dates = dates_of(data, date_column)?;
        let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        for date in &dates {
            *counts.entry((date.year(), date.month())).or_default() += 1;
        }
        debug!(n_records = dates.len(), n_periods = counts.len(), "grouped records by month");
        Ok(counts
            .into_iter()
            .map(|((year, month), days_count)| CoveragePeriod {
                year,
                month,
                days_count,
            })
            .collect())
    }

    /// Incomplete periods at the analyzer's configured granularity.
    pub fn analyze_configured(
        &self,
        data: &Dataset,
        date_column: &str,
    ) -> DetectionResult<CoverageReport> {
        self.analyze(data, date_column, self.identify_by)
    }

    /// Incomplete months or years in `date_column`.
    pub fn analyze(
        &self,
        data: &Dataset,
        date_column: &str,
        identify_by: IdentifyBy,
    ) -> DetectionResult<CoverageReport> {
        let periods = self.period_counts(data, date_column)?;
        match identify_by {
            IdentifyBy::Month => Ok(CoverageReport::Monthly(
                periods
                    .into_iter()
                    .filter(|p| self.rule.is_incomplete_month(p.year, p.month, p.days_count))
                    .collect(),
            )),
            IdentifyBy::Year => Ok(CoverageReport::Yearly(self.year_gaps(&periods))),
        }
    }

    fn year_gaps(&self, periods: &[CoveragePeriod]) -> Vec<YearGap> {
        let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
        for period in periods {
            *per_year.entry(period.year).or_default() += period.days_count;
        }

        per_year
            .into_iter()
            .filter_map(|(year, days_count)| {
                let expected = self.rule.expected_days_in_year(year);
                if days_count >= expected {
                    return None;
                }
                let missing_days = expected - days_count;
                let missing_months =
                    (missing_days as f64 / self.rule.days_per_month() * 100.0).round() / 100.0;
                info!(year, missing_days, missing_months, "year is missing records");
                Some(YearGap {
                    year,
                    days_count,
                    missing_days,
                    missing_months,
                })
            })
            .collect()
    }

    /// Append integer `year` and `month` columns derived from `date_column`.
    /// Existing columns with those names are replaced.
    pub fn annotate_periods(&self, data: &mut Dataset, date_column: &str) -> DetectionResult<()> {
        let dates = dates_of(data, date_column)?;
        let years = dates.iter().map(|d| d.year() as i64).collect();
        let months = dates.iter().map(|d| d.month() as i64).collect();
        data.set_column(Column::new("year", ColumnData::Integer(years)))?;
        data.set_column(Column::new("month", ColumnData::Integer(months)))?;
        Ok(())
    }
}

impl Default for DateCoverageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn dates_of(data: &Dataset, date_column: &str) -> DetectionResult<Vec<NaiveDate>> {
    let column = data.require_column(date_column)?;
    column.data.to_dates().ok_or_else(|| {
        DetectionError::invalid_argument(
            date_column,
            format!("expected a date or datetime column, found {}", column.kind()),
        )
    })
}
