use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::analysis::pearson::PValueMethod;
use crate::config::CORRELATION;
use crate::config::debug::PRINT_CORRELATION_CACHE_EVENTS;
use crate::models::CorrelationResult;
use crate::utils::maths_utils::series_fingerprint;

// --- The cache key struct ---
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PairKey {
    factor1: String,
    factor2: String,
    series1: u64,
    series2: u64,
    method: PValueMethod,
}

impl PairKey {
    /// Key over the exact values fed to the computation (post trim / alignment)
    pub fn new(
        factor1: &str,
        values1: &[f64],
        factor2: &str,
        values2: &[f64],
        method: PValueMethod,
    ) -> Self {
        Self {
            factor1: factor1.to_string(),
            factor2: factor2.to_string(),
            series1: series_fingerprint(values1),
            series2: series_fingerprint(values2),
            method,
        }
    }
}

#[derive(Default)]
struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Per-pair memo of classified results.
/// Clones share the same storage, so one cache can serve the engine worker and callers.
/// Reaching `max_entries` empties the map before the next insert.
#[derive(Clone)]
pub struct CorrelationCache {
    entries: Arc<Mutex<HashMap<PairKey, Arc<CorrelationResult>>>>,
    counters: Arc<CacheCounters>,
    max_entries: usize,
}

impl Default for CorrelationCache {
    fn default() -> Self {
        Self::with_max_entries(CORRELATION.cache_max_entries)
    }
}

impl CorrelationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            counters: Arc::new(CacheCounters::default()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn get_or_compute<F>(&self, key: PairKey, compute: F) -> Arc<CorrelationResult>
    where
        F: FnOnce() -> CorrelationResult,
    {
        // --- Step 1: Try to get a lock and check if the key exists ---
        if let Ok(entries) = self.entries.lock()
            && let Some(cached) = entries.get(&key)
        {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            if PRINT_CORRELATION_CACHE_EVENTS {
                log::info!("Correlation cache HIT for {} / {}", key.factor1, key.factor2);
            }
            return Arc::clone(cached);
        } // Lock is released here.

        // --- Step 2: Compute outside the lock, then insert ---
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        if PRINT_CORRELATION_CACHE_EVENTS {
            log::info!("Correlation cache MISS for {} / {}", key.factor1, key.factor2);
        }
        let result = Arc::new(compute());

        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() >= self.max_entries && !entries.contains_key(&key) {
                log::debug!(
                    "Correlation cache full ({} entries), starting over",
                    entries.len()
                );
                entries.clear();
            }
            entries.insert(key, Arc::clone(&result));
        }
        result
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry, e.g. after the underlying data set was replaced
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (
            self.counters.hits.load(Ordering::Relaxed),
            self.counters.misses.load(Ordering::Relaxed),
        )
    }
}
