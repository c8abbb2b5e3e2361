//! JSON output format for the analysis report (`--format json`).

use crate::correlate::CorrelationMatrix;
use crate::hypothesis::{CorrelationTest, TwoSampleTest};
use crate::model::LinearFit;
use crate::pipeline::AnalysisReport;
use crate::summary::{ColumnSummary, GroupSummary};
use serde::Serialize;

/// Dataset dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDataset {
    pub rows: usize,
    pub columns: usize,
}

/// Both hypothesis tests, keyed by kind.
#[derive(Debug, Clone, Serialize)]
pub struct JsonTests {
    pub welch_two_sample: TwoSampleTest,
    pub pearson_correlation: CorrelationTest,
}

/// Files the run wrote.
#[derive(Debug, Clone, Serialize)]
pub struct JsonArtifacts {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<String>,
    pub export: String,
}

/// Complete machine-readable mirror of the analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub dataset: JsonDataset,
    pub summary: Vec<ColumnSummary>,
    pub group_summary: GroupSummary,
    pub correlation: CorrelationMatrix,
    pub model: LinearFit,
    pub tests: JsonTests,
    pub artifacts: JsonArtifacts,
}

impl JsonReport {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            dataset: JsonDataset {
                rows: report.row_count,
                columns: report.column_count,
            },
            summary: report.summaries.clone(),
            group_summary: report.groups.clone(),
            correlation: report.correlation.clone(),
            model: report.fit.clone(),
            tests: JsonTests {
                welch_two_sample: report.welch.clone(),
                pearson_correlation: report.pearson.clone(),
            },
            artifacts: JsonArtifacts {
                charts: report
                    .chart_files
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
                export: report.export_file.display().to_string(),
            },
        }
    }

    pub fn to_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
