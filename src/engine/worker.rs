use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Instant;

use anyhow::{Result, bail};

use crate::analysis::build_correlation_report;
use crate::config::debug::PRINT_ENGINE_JOBS;
use crate::models::CorrelationReport;

use super::messages::{JobRequest, JobResult};

pub fn spawn_worker_thread(rx: Receiver<JobRequest>, tx: Sender<JobResult>) {
    thread::spawn(move || {
        // Exits once the engine drops its sender
        while let Ok(req) = rx.recv() {
            let start = Instant::now();
            let id = req.id;

            let result = run_job(&req)
                .map(Arc::new)
                .map_err(|e| e.to_string());

            let duration_ms = start.elapsed().as_millis();
            if PRINT_ENGINE_JOBS {
                log::info!("Correlation job #{} finished in {} ms", id, duration_ms);
            }

            if tx
                .send(JobResult {
                    id,
                    duration_ms,
                    result,
                })
                .is_err()
            {
                // Engine gone; nobody to report to
                break;
            }
        }
    });
}

/// The pure part of a job, separated from the threading for testing
pub fn run_job(req: &JobRequest) -> Result<CorrelationReport> {
    let factors = if req.request.factors.is_empty() {
        req.collection.factor_names()
    } else {
        req.request.factors.clone()
    };
    if factors.is_empty() {
        bail!("Collection '{}' holds no factors", req.collection.name);
    }

    let series_by_factor = req.collection.series_by_factor();
    let report = build_correlation_report(
        &factors,
        &series_by_factor,
        req.request.time_range,
        &req.config,
        Some(&req.cache),
    );

    if report.skipped.len() == report.matrix.len() {
        bail!(
            "None of the requested factors are usable: {}",
            report
                .skipped
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CorrelationCache;
    use crate::config::ANALYSIS;
    use crate::data::FactorCollection;
    use crate::domain::{FactorSeries, TimeRange};
    use crate::engine::messages::AnalysisRequest;

    fn job(factors: Vec<String>) -> JobRequest {
        JobRequest {
            id: 1,
            request: AnalysisRequest {
                factors,
                time_range: TimeRange::All,
            },
            config: ANALYSIS,
            collection: Arc::new(FactorCollection::new(
                "test",
                1.0,
                vec![
                    FactorSeries::new("Oil", vec![1.0, 2.0, 3.0, 4.0]),
                    FactorSeries::new("CPI", vec![1.0, 3.0, 2.0, 4.0]),
                ],
            )),
            cache: CorrelationCache::new(),
        }
    }

    #[test]
    fn test_empty_request_means_all_factors() {
        let report = run_job(&job(vec![])).unwrap();
        assert_eq!(report.matrix.factors, vec!["Oil", "CPI"]);
        assert_eq!(report.results.len(), 1);
    }

    #[test]
    fn test_all_factors_unusable_is_an_error() {
        let err = run_job(&job(vec!["Gold".into(), "Copper".into()])).unwrap_err();
        assert!(err.to_string().contains("Gold: no series supplied"));
    }
}
