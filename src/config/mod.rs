//! Configuration module for the factor-correlation application.

pub mod analysis;

pub mod debug;

pub mod demo;
pub mod persistence;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, CORRELATION};
pub use demo::DEMO;
pub use persistence::{
    FACTOR_DATA_PATH, FACTOR_DATA_VERSION, FACTOR_FILENAME_WITHOUT_EXT, factor_cache_filename,
};
