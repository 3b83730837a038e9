// Result models produced by the correlation engine
// These modules contain plain data independent of how results are displayed

pub mod correlation;
pub mod report;

// Re-export key types for convenience
pub use correlation::{
    CorrelationOutcome, CorrelationResult, CorrelationStats, InsufficientReason,
};
pub use report::{CorrelationMatrix, CorrelationReport, ReportSummary, SkipReason, SkippedFactor};
