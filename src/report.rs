//! Human-readable text rendering of the analysis report.
//!
//! Sections appear in a fixed order: dataset, column summary, grouped
//! summary, correlation matrix, model, hypothesis tests, artifacts.

use crate::pipeline::AnalysisReport;
use std::fmt::Write;

/// Render the full report as the text the binary prints.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let w = &mut out;

    section(w, "Dataset");
    let _ = writeln!(w, "{} rows x {} columns", report.row_count, report.column_count);

    section(w, "Column Summary");
    let _ = writeln!(
        w,
        "{:<12} {:>6} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "column", "count", "mean", "std", "min", "median", "max"
    );
    for s in &report.summaries {
        let _ = writeln!(
            w,
            "{:<12} {:>6} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
            s.column, s.count, s.mean, s.std_dev, s.min, s.median, s.max
        );
    }

    section(w, &format!("Grouped by {}", report.groups.group_column));
    let mut header = format!("{:<10} {:>6}", report.groups.group_column, "count");
    if let Some(first) = report.groups.rows.first() {
        for (name, _) in &first.aggregates {
            let _ = write!(header, " {name:>12}");
        }
    }
    let _ = writeln!(w, "{header}");
    for row in &report.groups.rows {
        let _ = write!(w, "{:<10} {:>6}", row.key, row.count);
        for (_, value) in &row.aggregates {
            let _ = write!(w, " {value:>12.2}");
        }
        let _ = writeln!(w);
    }

    section(w, "Correlation Matrix");
    let _ = write!(w, "{:<10}", "");
    for name in &report.correlation.columns {
        let _ = write!(w, " {name:>6}");
    }
    let _ = writeln!(w);
    for (i, name) in report.correlation.columns.iter().enumerate() {
        let _ = write!(w, "{name:<10}");
        for j in 0..report.correlation.columns.len() {
            let _ = write!(w, " {:>6.2}", report.correlation.get(i, j));
        }
        let _ = writeln!(w);
    }

    section(w, "Linear Model");
    let fit = &report.fit;
    let _ = writeln!(w, "{} ~ {}", fit.target, fit.predictors.join(" + "));
    let _ = writeln!(w, "{:<12} {:>10.4}", "(intercept)", fit.intercept);
    for (name, coef) in fit.predictors.iter().zip(&fit.coefficients) {
        let _ = writeln!(w, "{name:<12} {coef:>10.4}");
    }
    let _ = writeln!(w, "R-squared: {:.4}", fit.r_squared);
    let _ = writeln!(w, "Residual std error: {:.4}", fit.residual_std_error);

    section(w, "Hypothesis Tests");
    let welch = &report.welch;
    let _ = writeln!(
        w,
        "Welch two-sample: {} vs {} | t = {:.4}, df = {:.2}, p = {:.6}",
        welch.group_a, welch.group_b, welch.statistic, welch.df, welch.p_value
    );
    let _ = writeln!(
        w,
        "  group means: {:.2} vs {:.2}",
        welch.mean_a, welch.mean_b
    );
    let pearson = &report.pearson;
    let _ = writeln!(
        w,
        "Pearson correlation: r = {:.4} | t = {:.4}, df = {:.0}, p = {:.2e}",
        pearson.r, pearson.statistic, pearson.df, pearson.p_value
    );

    section(w, "Artifacts");
    for path in &report.chart_files {
        let _ = writeln!(w, "chart: {}", path.display());
    }
    let _ = writeln!(w, "export: {}", report.export_file.display());

    out
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "=== {title} ===");
}
