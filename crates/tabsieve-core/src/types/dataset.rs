//! Column-oriented tabular dataset.
//!
//! Columns are typed, uniquely named and all share the same length.
//! Column order is stable and row order is preserved by every operation.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::collections::FxHashMap;
use super::features::{FeatureMatrix, FeatureSet};
use crate::errors::{DatasetError, DetectionError, DetectionResult};

/// Typed payload of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Integer(Vec<i64>),
    Text(Vec<String>),
    Date(Vec<NaiveDate>),
    DateTime(Vec<NaiveDateTime>),
}

/// Discriminant of `ColumnData`, used in error messages and type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Integer,
    Text,
    Date,
    DateTime,
}

impl ColumnKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
    }

    /// Whether values of this kind can be used as detection features.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric | Self::Integer)
    }

    /// Whether values of this kind carry a calendar date.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Integer(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Date(v) => v.len(),
            Self::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Integer(_) => ColumnKind::Integer,
            Self::Text(_) => ColumnKind::Text,
            Self::Date(_) => ColumnKind::Date,
            Self::DateTime(_) => ColumnKind::DateTime,
        }
    }

    /// Value at `row`, or `None` when out of range.
    pub fn value(&self, row: usize) -> Option<Value> {
        match self {
            Self::Numeric(v) => v.get(row).map(|x| Value::Number(*x)),
            Self::Integer(v) => v.get(row).map(|x| Value::Integer(*x)),
            Self::Text(v) => v.get(row).map(|x| Value::Text(x.clone())),
            Self::Date(v) => v.get(row).map(|x| Value::Date(*x)),
            Self::DateTime(v) => v.get(row).map(|x| Value::DateTime(*x)),
        }
    }

    /// Numeric view of the column, widening integers. `None` for other kinds.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            Self::Numeric(v) => Some(v.clone()),
            Self::Integer(v) => Some(v.iter().map(|&x| x as f64).collect()),
            _ => None,
        }
    }

    /// Calendar date of every row. `None` for non-temporal kinds.
    pub fn to_dates(&self) -> Option<Vec<NaiveDate>> {
        match self {
            Self::Date(v) => Some(v.clone()),
            Self::DateTime(v) => Some(v.iter().map(|dt| dt.date()).collect()),
            _ => None,
        }
    }

    /// New column holding `rows` in the given order.
    ///
    /// Panics if a row index is out of range.
    fn take(&self, rows: &[usize]) -> Self {
        match self {
            Self::Numeric(v) => Self::Numeric(rows.iter().map(|&i| v[i]).collect()),
            Self::Integer(v) => Self::Integer(rows.iter().map(|&i| v[i]).collect()),
            Self::Text(v) => Self::Text(rows.iter().map(|&i| v[i].clone()).collect()),
            Self::Date(v) => Self::Date(rows.iter().map(|&i| v[i]).collect()),
            Self::DateTime(v) => Self::DateTime(rows.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Integer(i64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(*x),
            Self::Integer(x) => Some(*x as f64),
            _ => None,
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }
}

/// One row of a dataset, as an ordered mapping from column name to value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<'a> {
    pub index: usize,
    pub fields: Vec<(&'a str, Value)>,
}

impl Record<'_> {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

/// Ordered collection of equally long, uniquely named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
    #[serde(skip)]
    positions: FxHashMap<String, usize>,
    #[serde(skip)]
    rows: usize,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from columns, validating names and lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, DatasetError> {
        let mut dataset = Self::new();
        for column in columns {
            dataset.push_column(column)?;
        }
        Ok(dataset)
    }

    /// Builder-style `push_column`.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        data: ColumnData,
    ) -> Result<Self, DatasetError> {
        self.push_column(Column::new(name, data))?;
        Ok(self)
    }

    /// Append a new column. Fails on an empty or duplicate name, or when the
    /// length differs from the existing columns.
    pub fn push_column(&mut self, column: Column) -> Result<(), DatasetError> {
        if column.name.is_empty() {
            return Err(DatasetError::EmptyColumnName);
        }
        if self.positions.contains_key(&column.name) {
            return Err(DatasetError::DuplicateColumn(column.name));
        }
        self.check_length(&column)?;
        if self.columns.is_empty() {
            self.rows = column.len();
        }
        self.positions.insert(column.name.clone(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    /// Replace the column with the same name in place, or append it.
    pub fn set_column(&mut self, column: Column) -> Result<(), DatasetError> {
        match self.positions.get(&column.name).copied() {
            Some(pos) => {
                self.check_length(&column)?;
                self.columns[pos] = column;
                Ok(())
            }
            None => self.push_column(column),
        }
    }

    fn check_length(&self, column: &Column) -> Result<(), DatasetError> {
        if !self.columns.is_empty() && column.len() != self.rows {
            return Err(DatasetError::LengthMismatch {
                column: column.name.clone(),
                expected: self.rows,
                actual: column.len(),
            });
        }
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.positions.get(name).map(|&pos| &self.columns[pos])
    }

    /// Look up a column, failing with `InvalidArgument` when it is absent.
    pub fn require_column(&self, name: &str) -> DetectionResult<&Column> {
        self.column(name).ok_or_else(|| {
            DetectionError::invalid_argument(name, "column not present in dataset")
        })
    }

    /// Project onto `names`, in the order given.
    pub fn select(&self, names: &[&str]) -> DetectionResult<Dataset> {
        let mut projected = Dataset::new();
        for name in names {
            let column = self.require_column(name)?.clone();
            projected.push_column(column)?;
        }
        Ok(projected)
    }

    /// Subset of rows in the order given. Every column is kept.
    pub fn take_rows(&self, rows: &[usize]) -> Result<Dataset, DatasetError> {
        if let Some(&row) = rows.iter().find(|&&r| r >= self.rows) {
            return Err(DatasetError::RowOutOfRange {
                row,
                len: self.rows,
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.data.take(rows)))
            .collect::<Vec<_>>();
        let positions = self.positions.clone();
        Ok(Dataset {
            columns,
            positions,
            rows: rows.len(),
        })
    }

    /// Row `index` as a record, or `None` when out of range.
    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        if index >= self.rows {
            return None;
        }
        let fields = self
            .columns
            .iter()
            .filter_map(|c| c.data.value(index).map(|v| (c.name.as_str(), v)))
            .collect();
        Some(Record { index, fields })
    }

    /// Extract the numeric feature space for `features`.
    ///
    /// Non-numeric columns fail with `InvalidArgument`; NaN or infinite
    /// values fail with `DegenerateInput`.
    pub fn feature_matrix(&self, features: &FeatureSet) -> DetectionResult<FeatureMatrix> {
        let mut columns = Vec::with_capacity(features.len());
        for name in features.iter() {
            let column = self.require_column(name)?;
            let values = column.data.to_f64().ok_or_else(|| {
                DetectionError::invalid_argument(
                    name,
                    format!("expected a numeric column, found {}", column.kind()),
                )
            })?;
            if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                return Err(DetectionError::degenerate(format!(
                    "feature `{name}` has a non-finite value at row {row}"
                )));
            }
            columns.push(values);
        }
        Ok(FeatureMatrix::from_columns(
            features.names().to_vec(),
            &columns,
            (0..self.rows).collect(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new()
            .with_column("a", ColumnData::Numeric(vec![1.0, 2.0, 3.0]))
            .unwrap()
            .with_column("b", ColumnData::Integer(vec![10, 20, 30]))
            .unwrap()
            .with_column(
                "label",
                ColumnData::Text(vec!["x".into(), "y".into(), "z".into()]),
            )
            .unwrap()
    }

    #[test]
    fn test_push_column_rejects_length_mismatch() {
        let mut ds = sample();
        let err = ds
            .push_column(Column::new("c", ColumnData::Numeric(vec![1.0])))
            .unwrap_err();
        assert!(matches!(err, DatasetError::LengthMismatch { expected: 3, actual: 1, .. }));
    }

    #[test]
    fn test_push_column_rejects_duplicates() {
        let mut ds = sample();
        let err = ds
            .push_column(Column::new("a", ColumnData::Numeric(vec![0.0; 3])))
            .unwrap_err();
        assert_eq!(err, DatasetError::DuplicateColumn("a".into()));
    }

    #[test]
    fn test_set_column_replaces_in_place() {
        let mut ds = sample();
        ds.set_column(Column::new("a", ColumnData::Integer(vec![7, 8, 9])))
            .unwrap();
        assert_eq!(ds.column_names(), vec!["a", "b", "label"]);
        assert_eq!(ds.column("a").unwrap().kind(), ColumnKind::Integer);
    }

    #[test]
    fn test_take_rows_preserves_order_and_schema() {
        let ds = sample();
        let subset = ds.take_rows(&[2, 0]).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.column_names(), ds.column_names());
        assert_eq!(
            subset.column("a").unwrap().data,
            ColumnData::Numeric(vec![3.0, 1.0])
        );
    }

    #[test]
    fn test_take_rows_out_of_range() {
        let err = sample().take_rows(&[0, 3]).unwrap_err();
        assert_eq!(err, DatasetError::RowOutOfRange { row: 3, len: 3 });
    }

    #[test]
    fn test_record_view() {
        let ds = sample();
        let record = ds.record(1).unwrap();
        assert_eq!(record.get("b"), Some(&Value::Integer(20)));
        assert_eq!(record.get("label"), Some(&Value::Text("y".into())));
        assert!(ds.record(3).is_none());
    }

    #[test]
    fn test_feature_matrix_widens_integers() {
        let ds = sample();
        let features = FeatureSet::new(&["a", "b"]).unwrap();
        let m = ds.feature_matrix(&features).unwrap();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.row(1), &[2.0, 20.0]);
        assert_eq!(m.row_ids(), &[0, 1, 2]);
    }

    #[test]
    fn test_feature_matrix_rejects_text() {
        let ds = sample();
        let features = FeatureSet::new(&["label"]).unwrap();
        let err = ds.feature_matrix(&features).unwrap_err();
        assert!(matches!(err, DetectionError::InvalidArgument { .. }));
    }

    #[test]
    fn test_feature_matrix_rejects_nan() {
        let ds = Dataset::new()
            .with_column("a", ColumnData::Numeric(vec![1.0, f64::NAN]))
            .unwrap();
        let features = FeatureSet::new(&["a"]).unwrap();
        let err = ds.feature_matrix(&features).unwrap_err();
        assert!(matches!(err, DetectionError::DegenerateInput(_)));
    }

    #[test]
    fn test_select_unknown_column() {
        let err = sample().select(&["missing"]).unwrap_err();
        assert!(matches!(err, DetectionError::InvalidArgument { .. }));
    }
}
