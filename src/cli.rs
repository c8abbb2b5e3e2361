//! CLI argument parsing for resumen

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON document for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "resumen")]
#[command(version)]
#[command(about = "One-shot exploratory analysis of the motor-trend car data", long_about = None)]
pub struct Cli {
    /// Input CSV with a header row and the motor-trend column schema
    /// (defaults to the built-in 32-row dataset)
    pub input: Option<PathBuf>,

    /// Directory charts and the exported table are written to
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Report format on stdout
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Skip chart rendering
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// File name for the exported augmented table
    #[arg(
        long = "export",
        value_name = "FILE",
        default_value = "motor_trend_analysis.csv"
    )]
    pub export: String,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub debug: bool,
}
