//! Feature selection and the numeric feature space used by detectors.

use serde::Serialize;

use super::collections::FxHashSet;
use crate::errors::{DatasetError, DetectionError, DetectionResult};

/// Non-empty, duplicate-free, ordered list of feature names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSet {
    names: Vec<String>,
}

impl FeatureSet {
    pub fn new<S: AsRef<str>>(names: &[S]) -> DetectionResult<Self> {
        if names.is_empty() {
            return Err(DetectionError::invalid_argument(
                "features",
                "feature list must not be empty",
            ));
        }
        let mut seen = FxHashSet::default();
        let mut owned = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if !seen.insert(name) {
                return Err(DetectionError::invalid_argument(
                    "features",
                    format!("feature `{name}` listed more than once"),
                ));
            }
            owned.push(name.to_string());
        }
        Ok(Self { names: owned })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_strs(&self) -> Vec<&str> {
        self.iter().collect()
    }
}

/// Row-major `f64` matrix over a feature set.
///
/// `row_ids[i]` is the index of row `i` in the dataset it was extracted
/// from, so results can always be mapped back to the original records.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<String>,
    values: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
    row_ids: Vec<usize>,
}

impl FeatureMatrix {
    /// Assemble from columns as long as `row_ids`.
    pub fn from_columns(
        names: Vec<String>,
        columns: &[Vec<f64>],
        row_ids: Vec<usize>,
    ) -> Result<Self, DatasetError> {
        let n_rows = row_ids.len();
        let n_cols = columns.len();
        if let Some((j, column)) = columns.iter().enumerate().find(|(_, c)| c.len() != n_rows) {
            return Err(DatasetError::LengthMismatch {
                column: names.get(j).cloned().unwrap_or_else(|| format!("#{j}")),
                expected: n_rows,
                actual: column.len(),
            });
        }
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for row in 0..n_rows {
            values.extend(columns.iter().map(|c| c[row]));
        }
        Ok(Self {
            names,
            values,
            n_rows,
            n_cols,
            row_ids,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn row_ids(&self) -> &[usize] {
        &self.row_ids
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n_cols..(i + 1) * self.n_cols]
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.n_cols + col]
    }

    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.n_rows).map(|i| self.value(i, j)).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.n_cols.max(1)).take(self.n_rows)
    }
}
