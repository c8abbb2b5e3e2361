//! Ordinary least squares over table columns.
//!
//! The fit solves the normal equations `XᵀX b = Xᵀy` (intercept column
//! included) by Cholesky decomposition; a non-positive pivot means the
//! predictors are collinear and the fit is rejected rather than produced
//! with unstable coefficients.

use crate::error::{AnalysisError, Result};
use crate::table::{Column, Table};
use serde::Serialize;

/// Name of the derived prediction column appended to the table.
pub const PREDICTED_COLUMN: &str = "predicted";

/// A fitted linear model: coefficients plus whole-fit diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct LinearFit {
    pub target: String,
    pub predictors: Vec<String>,
    pub intercept: f64,
    /// One coefficient per predictor, in predictor order.
    pub coefficients: Vec<f64>,
    pub r_squared: f64,
    pub residual_std_error: f64,
}

impl LinearFit {
    /// Predicted value for one row of predictor values.
    pub fn predict(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(b, x)| b * x)
                .sum::<f64>()
    }
}

/// Fit `target ~ predictors` on the table's rows.
///
/// Fails when the row count is too small for the coefficient count or when
/// the predictor matrix is rank-deficient.
pub fn fit_ols(table: &Table, target: &str, predictors: &[&str]) -> Result<LinearFit> {
    let y = table.numeric(target)?;
    let cols: Vec<&[f64]> = predictors
        .iter()
        .map(|p| table.numeric(p))
        .collect::<Result<_>>()?;

    let n = y.len();
    let p = cols.len() + 1; // intercept
    if n < p + 1 {
        return Err(AnalysisError::InsufficientData { required: p + 1, actual: n });
    }

    // Gram matrix XᵀX and right-hand side Xᵀy, intercept in position 0.
    let mut gram = vec![vec![0.0; p]; p];
    let mut rhs = vec![0.0; p];
    for row in 0..n {
        let mut x = Vec::with_capacity(p);
        x.push(1.0);
        for col in &cols {
            x.push(col[row]);
        }
        for i in 0..p {
            rhs[i] += x[i] * y[row];
            for j in 0..p {
                gram[i][j] += x[i] * x[j];
            }
        }
    }

    let beta = cholesky_solve(&gram, &rhs)?;

    // Diagnostics on the fitted table.
    let y_mean = y.iter().sum::<f64>() / n as f64;
    let mut sse = 0.0;
    let mut sst = 0.0;
    for row in 0..n {
        let features: Vec<f64> = cols.iter().map(|c| c[row]).collect();
        let fitted = beta[0]
            + beta[1..]
                .iter()
                .zip(&features)
                .map(|(b, x)| b * x)
                .sum::<f64>();
        sse += (y[row] - fitted) * (y[row] - fitted);
        sst += (y[row] - y_mean) * (y[row] - y_mean);
    }
    let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { 0.0 };
    let residual_std_error = (sse / (n - p) as f64).sqrt();

    Ok(LinearFit {
        target: target.to_string(),
        predictors: predictors.iter().map(|s| (*s).to_string()).collect(),
        intercept: beta[0],
        coefficients: beta[1..].to_vec(),
        r_squared,
        residual_std_error,
    })
}

/// Append per-row predictions to the table as [`PREDICTED_COLUMN`],
/// replacing any predictions from an earlier fit.
pub fn attach_predictions(table: &mut Table, fit: &LinearFit) -> Result<()> {
    let cols: Vec<Vec<f64>> = fit
        .predictors
        .iter()
        .map(|p| table.numeric(p).map(<[f64]>::to_vec))
        .collect::<Result<_>>()?;
    let predictions: Vec<f64> = (0..table.row_count())
        .map(|row| {
            let features: Vec<f64> = cols.iter().map(|c| c[row]).collect();
            fit.predict(&features)
        })
        .collect();
    table.set_column(PREDICTED_COLUMN, Column::Numeric(predictions))
}

/// Simple two-variable least squares for chart fit lines.
/// Returns `(intercept, slope)`.
pub fn fit_line(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var = 0.0;
    for (a, b) in x.iter().zip(y) {
        cov += (a - mx) * (b - my);
        var += (a - mx) * (a - mx);
    }
    let slope = if var > 0.0 { cov / var } else { 0.0 };
    (my - slope * mx, slope)
}

/// Solve `A x = b` for symmetric positive-definite `A` via Cholesky.
fn cholesky_solve(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>> {
    let n = b.len();
    let scale = a
        .iter()
        .enumerate()
        .map(|(i, row)| row[i].abs())
        .fold(1.0, f64::max);
    let tolerance = scale * 1e-12;

    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= tolerance {
                    return Err(AnalysisError::RankDeficient);
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward then back substitution.
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[i][k] * z[k];
        }
        z[i] = sum / l[i][i];
    }
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= l[k][i] * x[k];
        }
        x[i] = sum / l[i][i];
    }
    Ok(x)
}
