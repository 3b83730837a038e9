//! Debugging feature flags.
//!
//! Each flag gates one family of `log` output. Engine job and skipped-factor
//! lines are on by default since a CLI run emits only a handful of them.

/// Emit per-pair cache hit/miss diagnostics while building a matrix.
pub const PRINT_CORRELATION_CACHE_EVENTS: bool = false;

/// Emit job dispatch / completion summaries from the engine worker.
pub const PRINT_ENGINE_JOBS: bool = true;

/// Emit a line per skipped factor with its reason. The one-line partial-result
/// warning is logged regardless.
pub const PRINT_SKIPPED_FACTORS: bool = true;

/// Emit detailed serialization/deserialization logs.
pub const PRINT_SERDE: bool = false;
