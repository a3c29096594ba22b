//! Shared dataset fixtures.
//! Deterministic: same seed → same output across runs.

use chrono::NaiveDate;

use tabsieve_core::errors::DatasetError;
use tabsieve_core::types::{Column, ColumnData, Dataset};

/// Fixture size presets.
#[derive(Debug, Clone, Copy)]
pub enum FixtureSize {
    /// 200 records, unit test scale
    Micro,
    /// 1K records
    Small,
    /// 5K records
    Medium,
}

impl FixtureSize {
    pub fn records(&self) -> usize {
        match self {
            Self::Micro => 200,
            Self::Small => 1_000,
            Self::Medium => 5_000,
        }
    }
}

/// Feature column name for position `j`: `f0`, `f1`, ...
pub fn feature_name(j: usize) -> String {
    format!("f{j}")
}

/// `n_inliers` records uniform on [0, 1) in `n_features` columns, followed by
/// `n_outliers` records uniform on [shift, shift + 1).
///
/// Returns the dataset and the row positions of the injected records.
pub fn uniform_with_injected_outliers(
    n_inliers: usize,
    n_features: usize,
    n_outliers: usize,
    shift: f64,
    seed: u64,
) -> Result<(Dataset, Vec<usize>), DatasetError> {
    let mut rng = SimpleRng::new(seed);
    let n = n_inliers + n_outliers;
    let mut columns = vec![Vec::with_capacity(n); n_features];

    for row in 0..n {
        let offset = if row < n_inliers { 0.0 } else { shift };
        for column in columns.iter_mut() {
            column.push(rng.next_f64() + offset);
        }
    }

    let dataset = Dataset::from_columns(
        columns
            .into_iter()
            .enumerate()
            .map(|(j, values)| Column::new(feature_name(j), ColumnData::Numeric(values)))
            .collect(),
    )?;
    Ok((dataset, (n_inliers..n).collect()))
}

/// One `date` record per day from `start` through `end` inclusive, skipping
/// days for which `keep` returns false. A `value` column holds the day index.
pub fn daily_dates(
    start: NaiveDate,
    end: NaiveDate,
    keep: impl Fn(NaiveDate) -> bool,
) -> Result<Dataset, DatasetError> {
    let dates: Vec<NaiveDate> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| keep(*d))
        .collect();
    let values = (0..dates.len()).map(|i| i as f64).collect();
    Dataset::from_columns(vec![
        Column::new("date", ColumnData::Date(dates)),
        Column::new("value", ColumnData::Numeric(values)),
    ])
}

/// Simple deterministic PRNG (xorshift64).
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform on [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
