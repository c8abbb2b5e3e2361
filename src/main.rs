use anyhow::{Context, Result};
use clap::Parser;
use resumen::cli::{Cli, OutputFormat};
use resumen::json_output::JsonReport;
use resumen::{dataset, pipeline, report};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let table = match &cli.input {
        Some(path) => dataset::load_csv(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => dataset::motor_trend(),
    };

    let mut config = pipeline::default_config();
    config.render_charts = !cli.no_charts;
    config.export_file = cli.export.clone();

    let (analysis, _table) =
        pipeline::run(&table, &config, &cli.output_dir).context("analysis failed")?;

    match cli.format {
        OutputFormat::Text => print!("{}", report::render_text(&analysis)),
        OutputFormat::Json => println!("{}", JsonReport::from_report(&analysis).to_pretty()?),
    }
    Ok(())
}
