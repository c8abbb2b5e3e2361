//! Pairwise Pearson correlation over the numeric columns of a table.

use crate::error::{AnalysisError, Result};
use crate::summary::{mean, round2};
use crate::table::Table;
use serde::Serialize;

/// Square, symmetric correlation matrix indexed by column name on both axes.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major; `values[i][j]` is the correlation of columns i and j,
    /// rounded to two decimals. Diagonal entries are exactly 1.0.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Pearson product-moment correlation of two equal-length slices.
///
/// The caller guarantees nonzero variance; a zero-variance input yields NaN,
/// which [`correlation_matrix`] rejects up front.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let mx = mean(x);
    let my = mean(y);
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    cov / (var_x * var_y).sqrt()
}

/// Correlation matrix over every numeric column of `table`.
///
/// Fails when fewer than 2 numeric columns exist, when the table has fewer
/// than 2 rows, or when any numeric column has zero variance (its
/// correlations would be undefined).
pub fn correlation_matrix(table: &Table) -> Result<CorrelationMatrix> {
    let columns = table.numeric_names();
    if columns.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: columns.len(),
        });
    }
    if table.row_count() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: table.row_count(),
        });
    }

    let mut data: Vec<&[f64]> = Vec::with_capacity(columns.len());
    for name in &columns {
        let values = table.numeric(name)?;
        let m = mean(values);
        if values.iter().all(|v| (v - m).abs() < f64::EPSILON * m.abs().max(1.0)) {
            return Err(AnalysisError::ZeroVariance { column: name.clone() });
        }
        data.push(values);
    }

    let n = columns.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = round2(pearson(data[i], data[j]));
            values[i][j] = r;
            values[j][i] = r; // symmetric by construction
        }
    }

    Ok(CorrelationMatrix { columns, values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn three_column_table() -> Table {
        let mut t = Table::new();
        t.add_column("x", Column::Numeric(vec![1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();
        t.add_column("y", Column::Numeric(vec![2.0, 4.0, 6.0, 8.0, 10.0])).unwrap();
        t.add_column("z", Column::Numeric(vec![5.0, 4.0, 3.0, 2.0, 1.0])).unwrap();
        t
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let x = [1.0, 2.0, 3.0];
        let y = [10.0, 20.0, 30.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let x = [1.0, 2.0, 3.0];
        let y = [3.0, 2.0, 1.0];
        assert!((pearson(&x, &y) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let m = correlation_matrix(&three_column_table()).unwrap();
        for i in 0..3 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_matrix_known_entries() {
        let m = correlation_matrix(&three_column_table()).unwrap();
        assert_eq!(m.get(0, 1), 1.0); // y = 2x
        assert_eq!(m.get(0, 2), -1.0); // z reversed
    }

    #[test]
    fn test_matrix_rejects_zero_variance() {
        let mut t = three_column_table();
        t.set_column("y", Column::Numeric(vec![7.0; 5])).unwrap();
        let err = correlation_matrix(&t).unwrap_err();
        assert!(matches!(err, AnalysisError::ZeroVariance { .. }));
    }

    #[test]
    fn test_matrix_requires_two_numeric_columns() {
        let mut t = Table::new();
        t.add_column("only", Column::Numeric(vec![1.0, 2.0])).unwrap();
        assert!(correlation_matrix(&t).is_err());
    }

    #[test]
    fn test_matrix_ignores_categorical_columns() {
        let mut t = three_column_table();
        t.add_column(
            "label",
            Column::Categorical(vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()]),
        )
        .unwrap();
        let m = correlation_matrix(&t).unwrap();
        assert_eq!(m.columns.len(), 3);
    }
}
