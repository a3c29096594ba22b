//! Rules deciding when a calendar period has too few records.

use std::fmt;

use chrono::NaiveDate;

use tabsieve_core::constants::{
    DEFAULT_DAYS_PER_MONTH, DEFAULT_DAYS_PER_YEAR, DEFAULT_MIN_DAYS_PER_MONTH,
};

/// Expected record counts per month and per year.
pub trait CoverageRule: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Records a month needs before it counts as complete.
    fn expected_days_in_month(&self, year: i32, month: u32) -> usize;

    /// Records a year needs before it counts as complete.
    fn expected_days_in_year(&self, year: i32) -> usize;

    /// Divisor converting missing days into missing months.
    fn days_per_month(&self) -> f64;

    fn is_incomplete_month(&self, year: i32, month: u32, days_count: usize) -> bool {
        days_count < self.expected_days_in_month(year, month)
    }
}

/// Fixed thresholds: 28 days a month, 365 a year, 30 days to a month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimumDaysRule {
    pub min_days_per_month: u32,
    pub days_per_year: u32,
    pub days_per_month: f64,
}

impl Default for MinimumDaysRule {
    fn default() -> Self {
        Self {
            min_days_per_month: DEFAULT_MIN_DAYS_PER_MONTH,
            days_per_year: DEFAULT_DAYS_PER_YEAR,
            days_per_month: DEFAULT_DAYS_PER_MONTH,
        }
    }
}

impl CoverageRule for MinimumDaysRule {
    fn name(&self) -> &'static str {
        "minimum_days"
    }

    fn expected_days_in_month(&self, _year: i32, _month: u32) -> usize {
        self.min_days_per_month as usize
    }

    fn expected_days_in_year(&self, _year: i32) -> usize {
        self.days_per_year as usize
    }

    fn days_per_month(&self) -> f64 {
        self.days_per_month
    }
}

/// Exact calendar lengths: every day of the month or year must be present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarRule {
    pub days_per_month: f64,
}

impl Default for CalendarRule {
    fn default() -> Self {
        Self {
            days_per_month: DEFAULT_DAYS_PER_MONTH,
        }
    }
}

impl CoverageRule for CalendarRule {
    fn name(&self) -> &'static str {
        "calendar"
    }

    fn expected_days_in_month(&self, year: i32, month: u32) -> usize {
        days_in_month(year, month)
    }

    fn expected_days_in_year(&self, year: i32) -> usize {
        if is_leap_year(year) {
            366
        } else {
            365
        }
    }

    fn days_per_month(&self) -> f64 {
        self.days_per_month
    }
}

/// Number of days in `month` of `year`. Out-of-range months count as 31.
pub fn days_in_month(year: i32, month: u32) -> usize {
    let (next_year, next_month) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as usize,
        _ => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}
