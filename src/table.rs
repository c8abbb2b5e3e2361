//! Column-major table of named, equal-length columns.
//!
//! The [`Table`] is the single piece of state threaded through the pipeline:
//! stages either read it or return a new table with columns appended. Row
//! order is stable for the lifetime of a table; derived columns are appended
//! at the end, rows are never reordered.

use crate::error::{AnalysisError, Result};

/// A single named column of homogeneous scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Continuous or integer-coded values.
    Numeric(Vec<f64>),
    /// Label strings, one per row.
    Categorical(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// Value at `row` rendered the way the exporter and group keys see it:
    /// labels verbatim, numbers in their shortest round-trip form.
    pub fn display_value(&self, row: usize) -> String {
        match self {
            Self::Numeric(v) => format_number(v[row]),
            Self::Categorical(v) => v[row].clone(),
        }
    }
}

/// Render a number without trailing fractional zeros (`4` not `4.0`).
pub(crate) fn format_number(x: f64) -> String {
    if x == x.trunc() && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

/// Ordered collection of named columns, all the same length.
#[derive(Debug, Clone, Default)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows. Zero for a table with no columns.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Append a column. The name must be new and the length must match the
    /// existing rows.
    pub fn add_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.names.iter().any(|n| *n == name) {
            return Err(AnalysisError::DuplicateColumn(name));
        }
        self.check_length(&name, &column)?;
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Append a column, replacing any existing column of the same name in
    /// place (same position, same row order). Used for derived columns such
    /// as model predictions.
    pub fn set_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        self.check_length(&name, &column)?;
        if let Some(idx) = self.names.iter().position(|n| *n == name) {
            self.columns[idx] = column;
        } else {
            self.names.push(name);
            self.columns.push(column);
        }
        Ok(())
    }

    fn check_length(&self, name: &str, column: &Column) -> Result<()> {
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(AnalysisError::LengthMismatch {
                column: name.to_string(),
                expected: self.row_count(),
                actual: column.len(),
            });
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))
    }

    /// Numeric values of a column, or an error if it holds labels.
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            Column::Categorical(_) => Err(AnalysisError::NotNumeric {
                column: name.to_string(),
            }),
        }
    }

    /// Label values of a column, or an error if it is numeric.
    pub fn categorical(&self, name: &str) -> Result<&[String]> {
        match self.column(name)? {
            Column::Categorical(v) => Ok(v),
            Column::Numeric(_) => Err(AnalysisError::NotCategorical {
                column: name.to_string(),
            }),
        }
    }

    /// Names of all numeric columns, in table order.
    pub fn numeric_names(&self) -> Vec<String> {
        self.names
            .iter()
            .zip(&self.columns)
            .filter(|(_, c)| c.is_numeric())
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// (name, column) pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table() -> Table {
        let mut t = Table::new();
        t.add_column("x", Column::Numeric(vec![1.0, 2.0, 3.0])).unwrap();
        t.add_column(
            "label",
            Column::Categorical(vec!["a".into(), "b".into(), "a".into()]),
        )
        .unwrap();
        t
    }

    #[test]
    fn test_row_and_column_counts() {
        let t = two_column_table();
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.names(), &["x".to_string(), "label".to_string()]);
    }

    #[test]
    fn test_add_column_rejects_length_mismatch() {
        let mut t = two_column_table();
        let err = t.add_column("y", Column::Numeric(vec![1.0]));
        assert!(err.is_err());
        assert_eq!(t.column_count(), 2);
    }

    #[test]
    fn test_add_column_rejects_duplicate_name() {
        let mut t = two_column_table();
        assert!(t.add_column("x", Column::Numeric(vec![0.0, 0.0, 0.0])).is_err());
    }

    #[test]
    fn test_set_column_overwrites_in_place() {
        let mut t = two_column_table();
        t.set_column("x", Column::Numeric(vec![9.0, 8.0, 7.0])).unwrap();
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.numeric("x").unwrap(), &[9.0, 8.0, 7.0]);
        // Position unchanged: "x" still first.
        assert_eq!(t.names()[0], "x");
    }

    #[test]
    fn test_numeric_accessor_type_checks() {
        let t = two_column_table();
        assert!(t.numeric("label").is_err());
        assert!(t.categorical("x").is_err());
        assert!(t.numeric("missing").is_err());
    }

    #[test]
    fn test_numeric_names_skips_categorical() {
        let t = two_column_table();
        assert_eq!(t.numeric_names(), vec!["x".to_string()]);
    }

    #[test]
    fn test_display_value_formats_integers_bare() {
        let mut t = Table::new();
        t.add_column("n", Column::Numeric(vec![4.0, 4.5])).unwrap();
        assert_eq!(t.column("n").unwrap().display_value(0), "4");
        assert_eq!(t.column("n").unwrap().display_value(1), "4.5");
    }
}
