//! Descriptive summaries: per-column statistics and grouped aggregates.

use crate::error::{AnalysisError, Result};
use crate::table::Table;
use serde::Serialize;
use std::collections::HashMap;

/// Aggregations a grouped summary can request per numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateOp {
    Mean,
    StdDev,
}

/// Per-column five-figure summary produced by [`describe`].
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// One output row of [`group_summary`]: the group key, its size, and the
/// requested aggregates keyed `"column.op"`.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRow {
    pub key: String,
    pub count: usize,
    pub aggregates: Vec<(String, f64)>,
}

/// Grouped aggregate table: one [`GroupRow`] per distinct group value.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub group_column: String,
    pub rows: Vec<GroupRow>,
}

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator). Zero below 2 values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Median via linear interpolation between the middle order statistics.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Round to two decimal places, the display precision of every summary.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Summary statistics for every numeric column, in table order.
pub fn describe(table: &Table) -> Result<Vec<ColumnSummary>> {
    table
        .numeric_names()
        .into_iter()
        .map(|name| {
            let values = table.numeric(&name)?;
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            Ok(ColumnSummary {
                count: values.len(),
                mean: round2(mean(values)),
                std_dev: round2(std_dev(values)),
                min: round2(min),
                median: round2(median(values)),
                max: round2(max),
                column: name,
            })
        })
        .collect()
}

/// Group rows by the distinct display values of `group_column` and compute
/// count plus the requested aggregates, rounded to two decimals.
///
/// Group order is the order in which each value is first seen in the table,
/// so repeated runs over the same data always agree.
pub fn group_summary(
    table: &Table,
    group_column: &str,
    fields: &[(&str, &[AggregateOp])],
) -> Result<GroupSummary> {
    if table.row_count() == 0 {
        return Err(AnalysisError::InsufficientData { required: 1, actual: 0 });
    }
    let keys = group_keys(table, group_column)?;

    // first-seen order
    let mut order: Vec<String> = Vec::new();
    let mut members: HashMap<String, Vec<usize>> = HashMap::new();
    for (row, key) in keys.iter().enumerate() {
        let entry = members.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            Vec::new()
        });
        entry.push(row);
    }

    let mut rows = Vec::with_capacity(order.len());
    for key in order {
        let indices = &members[&key];
        let mut aggregates = Vec::new();
        for &(column, ops) in fields {
            let values = table.numeric(column)?;
            let group_values: Vec<f64> = indices.iter().map(|&i| values[i]).collect();
            for op in ops {
                let (suffix, value) = match op {
                    AggregateOp::Mean => ("mean", mean(&group_values)),
                    AggregateOp::StdDev => ("std", std_dev(&group_values)),
                };
                aggregates.push((format!("{column}.{suffix}"), round2(value)));
            }
        }
        rows.push(GroupRow { key, count: indices.len(), aggregates });
    }

    Ok(GroupSummary {
        group_column: group_column.to_string(),
        rows,
    })
}

/// Display value of the grouping column for every row.
fn group_keys(table: &Table, group_column: &str) -> Result<Vec<String>> {
    let column = table.column(group_column)?;
    Ok((0..table.row_count()).map(|i| column.display_value(i)).collect())
}
