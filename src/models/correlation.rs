use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CORRELATION;
use crate::domain::{Relationship, Significance, Strength};

/// Raw output of a single pair computation: Pearson r and its approximate p-value
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CorrelationStats {
    pub correlation: f64,
    pub p_value: f64,
}

impl CorrelationStats {
    /// The neutral answer given for degenerate input
    pub const DEGENERATE: CorrelationStats = CorrelationStats {
        correlation: 0.0,
        p_value: CORRELATION.p_values.degenerate,
    };
}

/// Why a pair could not be measured
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsufficientReason {
    TooFewObservations { observations: usize },
    LengthMismatch { left: usize, right: usize },
    ZeroVariance,
    NonFinite,
}

impl fmt::Display for InsufficientReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InsufficientReason::TooFewObservations { observations } => write!(
                f,
                "{} observations (need {})",
                observations, CORRELATION.min_observations
            ),
            InsufficientReason::LengthMismatch { left, right } => {
                write!(f, "length mismatch ({} vs {})", left, right)
            }
            InsufficientReason::ZeroVariance => write!(f, "zero variance"),
            InsufficientReason::NonFinite => write!(f, "non-finite values"),
        }
    }
}

/// Pair computation that keeps "no data" apart from "no correlation".
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum CorrelationOutcome {
    Computed(CorrelationStats),
    InsufficientData(InsufficientReason),
}

impl CorrelationOutcome {
    pub fn insufficient_reason(&self) -> Option<InsufficientReason> {
        match self {
            CorrelationOutcome::Computed(_) => None,
            CorrelationOutcome::InsufficientData(reason) => Some(*reason),
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.insufficient_reason().is_some()
    }
}

/// One classified factor pair, as shown in the correlation list / cards
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CorrelationResult {
    pub factor1: String,
    pub factor2: String,
    pub correlation: f64,
    pub p_value: f64,
    pub significance: Significance,
    pub relationship: Relationship,
    pub strength: Strength,
    /// Observations actually correlated (after range trimming / date alignment)
    pub observations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insufficient: Option<InsufficientReason>,
}

impl CorrelationResult {
    pub fn involves(&self, factor: &str) -> bool {
        self.factor1 == factor || self.factor2 == factor
    }
}
