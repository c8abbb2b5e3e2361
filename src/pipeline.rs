//! The one-shot analysis pipeline: every stage in fixed order, threaded
//! through a single table.
//!
//! Stage order follows the run it automates: recode, summarize, aggregate,
//! correlate, plot, model, test, export. Each stage either reads the table
//! or returns/extends it; nothing runs concurrently and nothing is retried.

use crate::chart::{ChartKind, ChartSpec, FitLine};
use crate::correlate::{correlation_matrix, CorrelationMatrix};
use crate::error::Result;
use crate::export::write_csv;
use crate::hypothesis::{pearson_test_columns, welch_by_group, CorrelationTest, TwoSampleTest};
use crate::model::{attach_predictions, fit_ols, LinearFit};
use crate::recode::{recode, RecodeSpec};
use crate::summary::{describe, group_summary, AggregateOp, ColumnSummary, GroupSummary};
use crate::table::Table;
use std::path::{Path, PathBuf};

/// Everything one run needs: stage parameters plus output file names.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub recodes: Vec<RecodeSpec>,
    pub group_column: String,
    pub group_fields: Vec<(String, Vec<AggregateOp>)>,
    pub model_target: String,
    pub model_predictors: Vec<String>,
    /// Welch test: (numeric column, two-level grouping column)
    pub welch: (String, String),
    /// Pearson test: the two numeric columns
    pub pearson: (String, String),
    pub charts: Vec<ChartSpec>,
    pub render_charts: bool,
    pub export_file: String,
}

/// All stage outputs of one run, in report order.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub row_count: usize,
    pub column_count: usize,
    pub summaries: Vec<ColumnSummary>,
    pub groups: GroupSummary,
    pub correlation: CorrelationMatrix,
    pub fit: LinearFit,
    pub welch: TwoSampleTest,
    pub pearson: CorrelationTest,
    pub chart_files: Vec<PathBuf>,
    pub export_file: PathBuf,
}

/// The canonical motor-trend analysis configuration.
pub fn default_config() -> AnalysisConfig {
    let steel = (70, 130, 180);
    let rust = (205, 92, 92);
    AnalysisConfig {
        recodes: vec![
            RecodeSpec::new("vs", &["v-shaped", "straight"], 0),
            RecodeSpec::new("am", &["automatic", "manual"], 0),
        ],
        group_column: "cyl".to_string(),
        group_fields: vec![
            ("mpg".to_string(), vec![AggregateOp::Mean, AggregateOp::StdDev]),
            ("hp".to_string(), vec![AggregateOp::Mean, AggregateOp::StdDev]),
            ("wt".to_string(), vec![AggregateOp::Mean]),
        ],
        model_target: "mpg".to_string(),
        model_predictors: vec!["wt".to_string(), "hp".to_string()],
        welch: ("mpg".to_string(), "am".to_string()),
        pearson: ("wt".to_string(), "mpg".to_string()),
        charts: vec![
            ChartSpec {
                kind: ChartKind::Bar { category: "cyl".to_string() },
                title: "Cars per cylinder count".to_string(),
                x_label: "cylinders".to_string(),
                y_label: "cars".to_string(),
                color: steel,
                file_name: "cylinder_counts.svg".to_string(),
                width: 800,
                height: 600,
            },
            ChartSpec {
                kind: ChartKind::Box { value: "mpg".to_string(), category: "am".to_string() },
                title: "Fuel economy by transmission".to_string(),
                x_label: "transmission".to_string(),
                y_label: "miles per gallon".to_string(),
                color: steel,
                file_name: "mpg_by_transmission.svg".to_string(),
                width: 800,
                height: 600,
            },
            ChartSpec {
                kind: ChartKind::Scatter {
                    x: "wt".to_string(),
                    y: "mpg".to_string(),
                    line: FitLine::LeastSquares,
                },
                title: "Fuel economy vs. weight".to_string(),
                x_label: "weight (1000 lbs)".to_string(),
                y_label: "miles per gallon".to_string(),
                color: rust,
                file_name: "mpg_vs_weight.svg".to_string(),
                width: 800,
                height: 600,
            },
            ChartSpec {
                kind: ChartKind::Scatter {
                    x: "disp".to_string(),
                    y: "hp".to_string(),
                    line: FitLine::Origin { slope: 0.7 },
                },
                title: "Horsepower vs. displacement".to_string(),
                x_label: "displacement (cu in)".to_string(),
                y_label: "gross horsepower".to_string(),
                color: rust,
                file_name: "hp_vs_displacement.svg".to_string(),
                width: 800,
                height: 600,
            },
        ],
        render_charts: true,
        export_file: "motor_trend_analysis.csv".to_string(),
    }
}

/// Run every stage over `table`, writing charts and the augmented export
/// into `output_dir`. Returns the report and the augmented table.
pub fn run(table: &Table, config: &AnalysisConfig, output_dir: &Path) -> Result<(AnalysisReport, Table)> {
    tracing::debug!(rows = table.row_count(), "analysis started");

    let mut table = recode(table, &config.recodes)?;

    let summaries = describe(&table)?;

    let fields: Vec<(&str, &[AggregateOp])> = config
        .group_fields
        .iter()
        .map(|(name, ops)| (name.as_str(), ops.as_slice()))
        .collect();
    let groups = group_summary(&table, &config.group_column, &fields)?;

    let correlation = correlation_matrix(&table)?;

    let mut chart_files = Vec::new();
    if config.render_charts {
        for spec in &config.charts {
            chart_files.push(crate::chart::render(&table, spec, output_dir)?);
        }
    } else {
        tracing::debug!("chart rendering skipped");
    }

    let predictors: Vec<&str> = config.model_predictors.iter().map(String::as_str).collect();
    let fit = fit_ols(&table, &config.model_target, &predictors)?;
    attach_predictions(&mut table, &fit)?;

    let welch = welch_by_group(&table, &config.welch.0, &config.welch.1)?;
    let pearson = pearson_test_columns(&table, &config.pearson.0, &config.pearson.1)?;

    let export_file = output_dir.join(&config.export_file);
    write_csv(&table, &export_file)?;

    let report = AnalysisReport {
        row_count: table.row_count(),
        column_count: table.column_count(),
        summaries,
        groups,
        correlation,
        fit,
        welch,
        pearson,
        chart_files,
        export_file,
    };
    tracing::debug!("analysis finished");
    Ok((report, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::motor_trend;
    use crate::model::PREDICTED_COLUMN;
    use tempfile::TempDir;

    fn run_default() -> (AnalysisReport, Table, TempDir) {
        let dir = TempDir::new().unwrap();
        let (report, table) = run(&motor_trend(), &default_config(), dir.path()).unwrap();
        (report, table, dir)
    }

    #[test]
    fn test_run_produces_all_artifacts() {
        let (report, table, _dir) = run_default();
        assert_eq!(report.row_count, 32);
        assert_eq!(report.chart_files.len(), 4);
        for path in &report.chart_files {
            assert!(path.exists(), "missing chart {}", path.display());
        }
        assert!(report.export_file.exists());
        assert!(table.numeric(PREDICTED_COLUMN).is_ok());
    }

    #[test]
    fn test_group_counts_sum_to_rows() {
        let (report, _, _dir) = run_default();
        let total: usize = report.groups.rows.iter().map(|r| r.count).sum();
        assert_eq!(total, report.row_count);
        // Three cylinder classes in the dataset.
        assert_eq!(report.groups.rows.len(), 3);
    }

    #[test]
    fn test_correlation_excludes_recoded_columns() {
        let (report, _, _dir) = run_default();
        // vs and am became categorical, predicted not yet attached: 9 columns.
        assert_eq!(report.correlation.columns.len(), 9);
        assert!(!report.correlation.columns.contains(&"am".to_string()));
    }

    #[test]
    fn test_model_matches_reference_coefficients() {
        let (report, _, _dir) = run_default();
        // Reference fit of mpg ~ wt + hp on this dataset.
        assert!((report.fit.intercept - 37.22727).abs() < 1e-3);
        assert!((report.fit.coefficients[0] + 3.87783).abs() < 1e-3);
        assert!((report.fit.coefficients[1] + 0.03177).abs() < 1e-4);
        assert!(report.fit.r_squared > 0.82 && report.fit.r_squared < 0.84);
    }

    #[test]
    fn test_hypothesis_results_match_reference() {
        let (report, _, _dir) = run_default();
        // The dataset opens with manual cars, so "manual" is the first-seen
        // group and the statistic is positive.
        assert_eq!(report.welch.group_a, "manual");
        assert!((report.welch.statistic - 3.7671).abs() < 1e-3);
        assert!((report.welch.df - 18.332).abs() < 0.01);
        assert!((report.welch.p_value - 0.001374).abs() < 1e-5);

        assert!((report.pearson.r + 0.8677).abs() < 1e-3);
        assert_eq!(report.pearson.df, 30.0);
        assert!(report.pearson.p_value < 1e-9);
    }

    #[test]
    fn test_no_charts_flag_skips_rendering() {
        let dir = TempDir::new().unwrap();
        let mut config = default_config();
        config.render_charts = false;
        let (report, _) = run(&motor_trend(), &config, dir.path()).unwrap();
        assert!(report.chart_files.is_empty());
        assert!(report.export_file.exists());
    }

    #[test]
    fn test_export_contains_predictions_and_labels() {
        let (report, _, _dir) = run_default();
        let content = std::fs::read_to_string(&report.export_file).unwrap();
        let header = content.lines().next().unwrap();
        assert!(header.contains("predicted"));
        assert!(content.contains("manual"));
        assert!(content.contains("v-shaped"));
    }
}

