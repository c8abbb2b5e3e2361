//! Categorical recoding: numeric code columns become label columns.
//!
//! Recoding is a pure transform: it returns a new [`Table`] and leaves the
//! input untouched, so no stage ever observes a half-recoded table.

use crate::error::{AnalysisError, Result};
use crate::table::{Column, Table};

/// Maps one numeric column onto an ordered label list.
///
/// A value `v` picks the label at position `v - base`; `base` states whether
/// the codes start at 0 or 1.
#[derive(Debug, Clone)]
pub struct RecodeSpec {
    pub column: String,
    pub labels: Vec<String>,
    pub base: i64,
}

impl RecodeSpec {
    pub fn new(column: impl Into<String>, labels: &[&str], base: i64) -> Self {
        Self {
            column: column.into(),
            labels: labels.iter().map(|s| (*s).to_string()).collect(),
            base,
        }
    }
}

/// Apply every spec, replacing each coded column with its label column.
/// Columns not named by a spec are carried over unchanged.
pub fn recode(table: &Table, specs: &[RecodeSpec]) -> Result<Table> {
    let mut out = table.clone();
    for spec in specs {
        let labels = recode_column(table, spec)?;
        out.set_column(spec.column.clone(), Column::Categorical(labels))?;
    }
    Ok(out)
}

fn recode_column(table: &Table, spec: &RecodeSpec) -> Result<Vec<String>> {
    let values = table.numeric(&spec.column)?;
    let max = spec.base + spec.labels.len() as i64 - 1;
    values
        .iter()
        .map(|&v| {
            let code = v as i64;
            if v.fract() != 0.0 || code < spec.base || code > max {
                return Err(AnalysisError::CodeOutOfRange {
                    column: spec.column.clone(),
                    code,
                    base: spec.base,
                    max,
                });
            }
            Ok(spec.labels[(code - spec.base) as usize].clone())
        })
        .collect()
}
