//! Classical hypothesis tests: Welch's two-sample t-test and the Pearson
//! correlation significance test.
//!
//! Both produce a statistic, degrees of freedom, and a two-sided p-value
//! from the Student-t distribution. Results are read-only outputs; nothing
//! here feeds back into the table.

use crate::error::{AnalysisError, Result};
use crate::summary::mean;
use crate::table::Table;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a two-sample mean comparison.
#[derive(Debug, Clone, Serialize)]
pub struct TwoSampleTest {
    /// t-statistic (first group minus second)
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,
    /// Two-sided p-value
    pub p_value: f64,
    pub mean_a: f64,
    pub mean_b: f64,
    pub group_a: String,
    pub group_b: String,
}

/// Result of a correlation significance test.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationTest {
    /// Pearson correlation coefficient
    pub r: f64,
    /// t-statistic r·√((n−2)/(1−r²))
    pub statistic: f64,
    /// n − 2 degrees of freedom
    pub df: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// Sample variance (n − 1 denominator).
fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64
}

/// Two-sided p-value of |t| under a Student-t distribution with `df`
/// degrees of freedom.
fn two_sided_p(t: f64, df: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AnalysisError::Distribution(format!("t with df {df}: {e}")))?;
    Ok((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

/// Welch's unequal-variance two-sample t-test on raw samples.
///
/// Needs at least 2 values per sample; degrees of freedom come from the
/// Welch-Satterthwaite approximation.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<TwoSampleTest> {
    let smaller = a.len().min(b.len());
    if smaller < 2 {
        return Err(AnalysisError::InsufficientData { required: 2, actual: smaller });
    }

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (ma, mb) = (mean(a), mean(b));
    let (va, vb) = (sample_variance(a), sample_variance(b));

    let se2 = va / na + vb / nb;
    if se2 == 0.0 {
        return Err(AnalysisError::ZeroVariance { column: "both samples".to_string() });
    }
    let statistic = (ma - mb) / se2.sqrt();
    let df = se2 * se2 / ((va / na).powi(2) / (na - 1.0) + (vb / nb).powi(2) / (nb - 1.0));
    let p_value = two_sided_p(statistic, df)?;

    Ok(TwoSampleTest {
        statistic,
        df,
        p_value,
        mean_a: ma,
        mean_b: mb,
        group_a: String::new(),
        group_b: String::new(),
    })
}

/// Welch's t-test on a numeric column split by a two-level categorical
/// grouping column. Groups are ordered first-seen, like the aggregator.
pub fn welch_by_group(table: &Table, value_column: &str, group_column: &str) -> Result<TwoSampleTest> {
    let values = table.numeric(value_column)?;
    let groups = table.categorical(group_column)?;

    let mut levels: Vec<&String> = Vec::new();
    for g in groups {
        if !levels.contains(&g) {
            levels.push(g);
        }
    }
    if levels.len() != 2 {
        return Err(AnalysisError::NotTwoLevels {
            column: group_column.to_string(),
            levels: levels.len(),
        });
    }

    let split = |level: &String| -> Vec<f64> {
        values
            .iter()
            .zip(groups)
            .filter(|(_, g)| *g == level)
            .map(|(v, _)| *v)
            .collect()
    };
    let a = split(levels[0]);
    let b = split(levels[1]);

    let mut test = welch_t_test(&a, &b)?;
    test.group_a = levels[0].clone();
    test.group_b = levels[1].clone();
    Ok(test)
}

/// Pearson correlation significance test between two numeric slices.
///
/// Requires at least 3 paired observations (df = n − 2 must be positive)
/// and nonzero variance on both sides.
pub fn pearson_test(x: &[f64], y: &[f64]) -> Result<CorrelationTest> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            column: "second test input".to_string(),
            expected: x.len(),
            actual: y.len(),
        });
    }
    if x.len() < 3 {
        return Err(AnalysisError::InsufficientData { required: 3, actual: x.len() });
    }
    if sample_variance(x) == 0.0 || sample_variance(y) == 0.0 {
        return Err(AnalysisError::ZeroVariance { column: "test input".to_string() });
    }

    let r = crate::correlate::pearson(x, y);
    let n = x.len() as f64;
    let df = n - 2.0;
    // |r| = 1 makes the statistic infinite; the p-value is then exactly 0.
    let statistic = if (1.0 - r * r) <= f64::EPSILON {
        f64::INFINITY * r.signum()
    } else {
        r * (df / (1.0 - r * r)).sqrt()
    };
    let p_value = if statistic.is_infinite() {
        0.0
    } else {
        two_sided_p(statistic, df)?
    };

    Ok(CorrelationTest { r, statistic, df, p_value })
}

/// Pearson test over two named columns of a table.
pub fn pearson_test_columns(table: &Table, x: &str, y: &str) -> Result<CorrelationTest> {
    pearson_test(table.numeric(x)?, table.numeric(y)?)
}
