//! Analysis and computation configuration

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::analysis::pearson::PValueMethod;

/// Critical t values used by the bucketed p-value approximation.
/// Order matters: checked from the strictest threshold down.
pub struct TThresholds {
    pub p01: f64,
    pub p05: f64,
    pub p10: f64,
}

/// The p-value reported for each bucket.
pub struct PValueBuckets {
    pub p01: f64,
    pub p05: f64,
    pub p10: f64,
    // Anything that fails every threshold
    pub fallback: f64,
    // Degenerate input (too short / mismatched)
    pub degenerate: f64,
}

/// Boundaries of the classification partitions
pub struct ClassificationBounds {
    // p <= high_max_p => High
    pub high_max_p: f64,
    // p <= medium_max_p => Medium
    pub medium_max_p: f64,
    // |r| < neutral_abs_r => Neutral
    pub neutral_abs_r: f64,
    pub strong_abs_r: f64,
    pub moderate_abs_r: f64,
}

/// The fixed numeric contract of the correlation engine
pub struct CorrelationConstants {
    // Below this many observations a pair is treated as insufficient data
    pub min_observations: usize,
    // Memoized pairs kept by one CorrelationCache before it starts over
    pub cache_max_entries: usize,
    pub t_thresholds: TThresholds,
    pub p_values: PValueBuckets,
    pub bounds: ClassificationBounds,
}

pub const CORRELATION: CorrelationConstants = CorrelationConstants {
    min_observations: 3,
    cache_max_entries: 10_000,

    t_thresholds: TThresholds {
        p01: 2.576,
        p05: 1.96,
        p10: 1.645,
    },

    p_values: PValueBuckets {
        p01: 0.01,
        p05: 0.05,
        p10: 0.10,
        fallback: 0.20,
        degenerate: 1.0,
    },

    bounds: ClassificationBounds {
        high_max_p: 0.01,
        medium_max_p: 0.05,
        neutral_abs_r: 0.1,
        strong_abs_r: 0.7,
        moderate_abs_r: 0.4,
    },
};

/// Runtime knobs for a matrix build. Cloned into every engine job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub p_value_method: PValueMethod,
    /// Inner-join pairs on their dates when both series carry them
    pub align_by_date: bool,
    /// Pair count from which the pair loop runs on the rayon pool
    pub parallel_pair_threshold: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        ANALYSIS
    }
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    p_value_method: PValueMethod::Bucketed,
    align_by_date: false,
    // 10 factors => 45 pairs stays single threaded
    parallel_pair_threshold: 64,
};

impl AnalysisConfig {
    /// Load overrides from a JSON file. Missing fields fall back to `ANALYSIS`.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let config: AnalysisConfig = serde_json::from_reader(BufReader::new(file))
            .context(format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel_pair_threshold == 0 {
            bail!("parallel_pair_threshold must be at least 1");
        }
        Ok(())
    }
}
