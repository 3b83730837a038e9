use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow, bail};

use crate::analysis::CorrelationCache;
use crate::config::debug::PRINT_ENGINE_JOBS;
use crate::config::{ANALYSIS, AnalysisConfig};
use crate::data::FactorCollection;
use crate::models::CorrelationReport;

use super::messages::{AnalysisRequest, JobRequest, JobResult};
use super::state::EngineState;
use super::worker;

pub struct CorrelationEngine {
    /// Shared immutable data
    pub collection: Arc<FactorCollection>,

    /// Per-pair memo shared with the worker
    pub cache: CorrelationCache,

    /// Worker Communication
    job_tx: Sender<JobRequest>,
    result_rx: Receiver<JobResult>,

    /// Latest-wins slot: a newer request replaces one that has not been dispatched
    pending: Option<AnalysisRequest>,
    next_job_id: u64,

    pub state: EngineState,

    /// The Live Configuration State
    pub current_config: AnalysisConfig,
}

impl CorrelationEngine {
    /// Initialize the engine and spawn its worker.
    pub fn new(collection: FactorCollection) -> Self {
        Self::with_config(collection, ANALYSIS)
    }

    pub fn with_config(collection: FactorCollection, config: AnalysisConfig) -> Self {
        let (job_tx, job_rx) = channel::<JobRequest>();
        let (result_tx, result_rx) = channel::<JobResult>();

        worker::spawn_worker_thread(job_rx, result_tx);

        Self {
            collection: Arc::new(collection),
            cache: CorrelationCache::new(),
            job_tx,
            result_rx,
            pending: None,
            next_job_id: 1,
            state: EngineState::new(),
            current_config: config,
        }
    }

    /// Queue an analysis. Replaces any request still waiting for the worker.
    pub fn request(&mut self, request: AnalysisRequest) {
        if let Some(old) = self.pending.replace(request) {
            log::debug!(
                "Superseded pending correlation request ({} factors, {})",
                old.factors.len(),
                old.time_range
            );
        }
    }

    /// THE LOOP.
    /// Returns TRUE if the engine is busy (request pending OR worker calculating).
    pub fn update(&mut self) -> bool {
        // 1. Process Results (Swap Buffers)
        while let Ok(result) = self.result_rx.try_recv() {
            self.handle_job_result(result);
        }

        // 2. Dispatch Jobs
        self.process_pending();

        // 3. Report Busy Status
        self.pending.is_some() || self.state.is_calculating()
    }

    /// Block until the current request (and any queued behind it) completes.
    pub fn wait_for_report(&mut self, timeout: Duration) -> Result<Arc<CorrelationReport>> {
        let deadline = Instant::now() + timeout;

        while self.update() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.result_rx.recv_timeout(remaining) {
                Ok(result) => self.handle_job_result(result),
                Err(RecvTimeoutError::Timeout) => {
                    bail!("Timed out after {:?} waiting for correlation report", timeout)
                }
                Err(RecvTimeoutError::Disconnected) => bail!("Correlation worker has stopped"),
            }
        }

        if let Some(e) = &self.state.last_error {
            bail!("Correlation analysis failed: {}", e);
        }
        self.latest_report()
            .ok_or_else(|| anyhow!("No correlation analysis has been requested"))
    }

    /// Accessor for callers
    pub fn latest_report(&self) -> Option<Arc<CorrelationReport>> {
        self.state.report.clone()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    pub fn is_calculating(&self) -> bool {
        self.state.is_calculating()
    }

    // --- TELEMETRY ---

    pub fn status_message(&self) -> Option<String> {
        match (self.state.in_flight, &self.pending) {
            (Some(id), Some(_)) => Some(format!("Processing job #{} (1 queued)", id)),
            (Some(id), None) => Some(format!("Processing job #{}", id)),
            (None, Some(_)) => Some("Queued".to_string()),
            (None, None) => None,
        }
    }

    // --- CONFIG UPDATES ---

    /// Applies to jobs dispatched after this call
    pub fn update_config(&mut self, new_config: AnalysisConfig) {
        self.current_config = new_config;
    }

    /// Swap the data set. Memoized pairs refer to old values and are dropped.
    pub fn replace_collection(&mut self, collection: FactorCollection) {
        self.collection = Arc::new(collection);
        self.cache.clear();
    }

    // --- INTERNAL LOGIC ---

    fn handle_job_result(&mut self, result: JobResult) {
        if self.state.in_flight != Some(result.id) {
            log::warn!("Dropping result for unknown correlation job #{}", result.id);
            return;
        }
        match result.result {
            Ok(report) => {
                if PRINT_ENGINE_JOBS {
                    log::info!(
                        "Correlation report ready: {} pairs, {} skipped ({} ms)",
                        report.results.len(),
                        report.skipped.len(),
                        result.duration_ms
                    );
                }
                self.state.update_buffer(report, result.duration_ms);
            }
            Err(e) => {
                log::error!("Correlation job #{} failed: {}", result.id, e);
                self.state.record_error(e);
            }
        }
    }

    fn process_pending(&mut self) {
        // Single worker: wait for the in-flight job
        if self.state.is_calculating() {
            return;
        }
        if let Some(request) = self.pending.take() {
            self.dispatch_job(request);
        }
    }

    fn dispatch_job(&mut self, request: AnalysisRequest) {
        let id = self.next_job_id;
        self.next_job_id += 1;

        let job = JobRequest {
            id,
            request,
            config: self.current_config.clone(),
            collection: Arc::clone(&self.collection),
            cache: self.cache.clone(),
        };

        if self.job_tx.send(job).is_ok() {
            self.state.in_flight = Some(id);
        } else {
            self.state.record_error("Correlation worker has stopped".to_string());
        }
    }
}
