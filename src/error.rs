//! Error types shared by every pipeline stage.

use thiserror::Error;

/// Errors for analysis pipeline operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("column '{column}' has {actual} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column '{column}' is not numeric")]
    NotNumeric { column: String },

    #[error("column '{column}' is not categorical")]
    NotCategorical { column: String },

    #[error("code {code} in column '{column}' has no label (expected {base}..={max})")]
    CodeOutOfRange {
        column: String,
        code: i64,
        base: i64,
        max: i64,
    },

    #[error("column '{column}' has zero variance, correlation undefined")]
    ZeroVariance { column: String },

    #[error("insufficient data: need at least {required} rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("grouping column '{column}' has {levels} levels, expected exactly 2")]
    NotTwoLevels { column: String, levels: usize },

    #[error("predictor matrix is rank-deficient (collinear predictors)")]
    RankDeficient,

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid distribution parameter: {0}")]
    Distribution(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
