// Correlation algorithms and classification
pub mod alignment;
pub mod cache;
pub mod classify;
pub mod matrix;
pub mod pearson;
pub mod trend;

// Re-export commonly used types
pub use cache::CorrelationCache;
pub use classify::{classify_relationship, classify_significance, classify_strength};
pub use matrix::{
    build_correlation_matrix, build_correlation_report, correlate_pair, partial_result_warning,
};
pub use pearson::{PValueMethod, assess_correlation, compute_correlation};
pub use trend::{TrendDirection, TrendSummary, analyze_trend, trend_summaries};
