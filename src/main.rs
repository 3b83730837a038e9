use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use factor_correlation::analysis::trend_summaries;
use factor_correlation::data::{
    FileSource, LoadFactorData, SyntheticConfig, SyntheticSource, load_first_available,
};
use factor_correlation::output::{render_json, render_table};
use factor_correlation::{AnalysisOptions, Cli, Command, CorrelationEngine, OutputFormat};

const REPORT_TIMEOUT: Duration = Duration::from_secs(120);

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Data Loading
    let (providers, options): (Vec<Box<dyn LoadFactorData>>, &AnalysisOptions) =
        match &args.command {
            Command::Analyze { input, options } => (
                vec![Box::new(FileSource {
                    path: input.clone(),
                })],
                options,
            ),
            Command::Demo { options } => (
                vec![Box::new(SyntheticSource {
                    config: SyntheticConfig::demo()?,
                })],
                options,
            ),
        };
    let (collection, signature) = load_first_available(&providers)?;
    log::info!("Using {} ({})", collection.name, signature);

    // D. Run the analysis on the engine worker
    let config = options.resolve_config()?;
    let trends_source = options.trends.then(|| collection.clone());
    let mut engine = CorrelationEngine::with_config(collection, config);
    engine.request(options.request());
    let report = engine.wait_for_report(REPORT_TIMEOUT)?;

    let trends = match &trends_source {
        Some(collection) => {
            trend_summaries(collection, &report.matrix.factors, report.time_range)
        }
        None => Vec::new(),
    };

    // E. Render
    let rendered = match options.format {
        OutputFormat::Table => render_table(&report, &trends),
        OutputFormat::Json => render_json(&report, &trends)?,
    };
    println!("{}", rendered);
    Ok(())
}
