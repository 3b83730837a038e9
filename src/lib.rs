#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod output;
pub mod utils;

// The engine
pub mod engine;

use std::path::PathBuf;

// Re-export commonly used types
pub use analysis::{
    CorrelationCache, PValueMethod, analyze_trend, assess_correlation, build_correlation_matrix,
    build_correlation_report, compute_correlation,
};
pub use config::{ANALYSIS, AnalysisConfig};
pub use data::FactorCollection;
pub use domain::{FactorSeries, Relationship, Significance, Strength, TimeRange};
pub use engine::{AnalysisRequest, CorrelationEngine};
pub use models::{
    CorrelationMatrix, CorrelationOutcome, CorrelationReport, CorrelationResult, CorrelationStats,
    InsufficientReason,
};

// CLI argument parsing
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correlate the factors stored in a .json or .bin factor file
    Analyze {
        /// Factor file to read
        #[arg(long, short)]
        input: PathBuf,

        #[command(flatten)]
        options: AnalysisOptions,
    },
    /// Correlate the built-in synthetic macro factors
    Demo {
        #[command(flatten)]
        options: AnalysisOptions,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AnalysisOptions {
    /// Comma separated factor names (default: every factor in the data)
    #[arg(long, value_delimiter = ',')]
    pub factors: Vec<String>,

    /// Observations to use: "all" or the most recent N
    #[arg(long, default_value = "all")]
    pub range: TimeRange,

    /// Exact Student-t p-values instead of the bucketed approximation
    #[arg(long, default_value_t = false)]
    pub exact_p: bool,

    /// Join pairs on their dates instead of by position
    #[arg(long, default_value_t = false)]
    pub align_dates: bool,

    /// Also report the linear trend of every factor
    #[arg(long, default_value_t = false)]
    pub trends: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// JSON file with AnalysisConfig overrides (flags win over the file)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl AnalysisOptions {
    /// Defaults, then the config file, then command line flags
    pub fn resolve_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load_from_path(path)?,
            None => ANALYSIS,
        };
        if self.exact_p {
            config.p_value_method = PValueMethod::StudentT;
        }
        if self.align_dates {
            config.align_by_date = true;
        }
        Ok(config)
    }

    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest {
            factors: self.factors.clone(),
            time_range: self.range,
        }
    }
}
