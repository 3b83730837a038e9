use std::sync::Arc;

use crate::analysis::CorrelationCache;
use crate::config::AnalysisConfig;
use crate::data::FactorCollection;
use crate::domain::TimeRange;
use crate::models::CorrelationReport;

/// What the caller wants analysed. An empty factor list means every factor in the collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisRequest {
    pub factors: Vec<String>,
    pub time_range: TimeRange,
}

/// A request handed to the worker thread
#[derive(Clone)]
pub struct JobRequest {
    pub id: u64,
    pub request: AnalysisRequest,
    pub config: AnalysisConfig,
    // Shared immutable data, cloned by pointer
    pub collection: Arc<FactorCollection>,
    pub cache: CorrelationCache,
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub struct JobResult {
    pub id: u64,
    pub duration_ms: u128,

    // Success: the new report
    // Failure: the error string
    pub result: Result<Arc<CorrelationReport>, String>,
}
