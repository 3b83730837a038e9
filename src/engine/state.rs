use std::sync::Arc;
use std::time::Instant;

use crate::models::CorrelationReport;

/// What the engine currently knows about its most recent analysis.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    /// THE FRONT BUFFER.
    /// Readers clone this Arc; a finished job replaces the pointer.
    pub report: Option<Arc<CorrelationReport>>,

    /// Id of the job the worker is crunching, if any
    pub in_flight: Option<u64>,

    pub last_update_time: Option<Instant>,
    pub last_duration_ms: Option<u128>,

    /// Last error (if any) to surface to the caller
    pub last_error: Option<String>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_calculating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Promote a finished report to the front buffer.
    pub fn update_buffer(&mut self, report: Arc<CorrelationReport>, duration_ms: u128) {
        self.report = Some(report);
        self.in_flight = None;
        self.last_update_time = Some(Instant::now());
        self.last_duration_ms = Some(duration_ms);
        self.last_error = None;
    }

    pub fn record_error(&mut self, error: String) {
        self.in_flight = None;
        self.last_error = Some(error);
    }
}
