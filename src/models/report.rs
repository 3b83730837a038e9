use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::pearson::PValueMethod;
use crate::domain::{Relationship, SeriesDefect, Significance, TimeRange};
use crate::models::correlation::{CorrelationResult, CorrelationStats};

/// N×N coefficients and p-values for heatmap rendering.
/// Symmetric, with `1.0` / `0.0` on the diagonal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub factors: Vec<String>,
    pub coefficients: Vec<Vec<f64>>,
    pub p_values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Identity matrix: unit diagonal, neutral `0.0` / `1.0` everywhere else
    pub fn identity(factors: Vec<String>) -> Self {
        let n = factors.len();
        let mut coefficients = vec![vec![CorrelationStats::DEGENERATE.correlation; n]; n];
        let mut p_values = vec![vec![CorrelationStats::DEGENERATE.p_value; n]; n];
        for i in 0..n {
            coefficients[i][i] = 1.0;
            p_values[i][i] = 0.0;
        }
        Self {
            factors,
            coefficients,
            p_values,
        }
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn index_of(&self, factor: &str) -> Option<usize> {
        self.factors.iter().position(|f| f == factor)
    }

    /// Store a pair in both triangles
    pub fn set_pair(&mut self, i: usize, j: usize, stats: CorrelationStats) {
        debug_assert_ne!(i, j, "diagonal is fixed");
        self.coefficients[i][j] = stats.correlation;
        self.coefficients[j][i] = stats.correlation;
        self.p_values[i][j] = stats.p_value;
        self.p_values[j][i] = stats.p_value;
    }

    /// Look up a cell by factor names
    pub fn get(&self, a: &str, b: &str) -> Option<CorrelationStats> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(CorrelationStats {
            correlation: self.coefficients[i][j],
            p_value: self.p_values[i][j],
        })
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            (0..n).all(|j| {
                self.coefficients[i][j].to_bits() == self.coefficients[j][i].to_bits()
                    && self.p_values[i][j].to_bits() == self.p_values[j][i].to_bits()
            })
        })
    }
}

/// Why a requested factor was left out of the computation
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    Missing,
    Malformed { defect: SeriesDefect },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedFactor {
    pub factor: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.reason {
            SkipReason::Missing => write!(f, "{}: no series supplied", self.factor),
            SkipReason::Malformed {
                defect: SeriesDefect::NonFinite { index },
            } => write!(f, "{}: non-finite value at index {}", self.factor, index),
            SkipReason::Malformed {
                defect: SeriesDefect::DateLengthMismatch { values, dates },
            } => write!(
                f,
                "{}: {} values but {} dates",
                self.factor, values, dates
            ),
        }
    }
}

/// Everything one analysis request produces
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CorrelationReport {
    pub matrix: CorrelationMatrix,
    /// One entry per computed unordered pair, in (i, j) factor order
    pub results: Vec<CorrelationResult>,
    /// Partial-result warnings. Pairs touching these factors are absent from `results`.
    pub skipped: Vec<SkippedFactor>,
    pub time_range: TimeRange,
    pub p_value_method: PValueMethod,
    pub generated_at: DateTime<Utc>,
}

/// Headline numbers for the correlation overview panel
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub pair_count: usize,
    pub high_significance: usize,
    pub medium_significance: usize,
    pub low_significance: usize,
    pub insufficient_pairs: usize,
    pub strongest_positive: Option<CorrelationResult>,
    pub strongest_negative: Option<CorrelationResult>,
}

impl CorrelationReport {
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }

    pub fn result_for(&self, a: &str, b: &str) -> Option<&CorrelationResult> {
        self.results
            .iter()
            .find(|r| (r.factor1 == a && r.factor2 == b) || (r.factor1 == b && r.factor2 == a))
    }

    /// Results sorted strongest first, for list rendering
    pub fn ranked_results(&self) -> Vec<&CorrelationResult> {
        let mut ranked: Vec<&CorrelationResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
        ranked
    }

    pub fn summary(&self) -> ReportSummary {
        let count = |s: Significance| {
            self.results
                .iter()
                .filter(|r| r.insufficient.is_none() && r.significance == s)
                .count()
        };

        let measured = || self.results.iter().filter(|r| r.insufficient.is_none());

        let strongest_positive = measured()
            .filter(|r| r.relationship == Relationship::Positive)
            .max_by(|a, b| a.correlation.total_cmp(&b.correlation))
            .cloned();
        let strongest_negative = measured()
            .filter(|r| r.relationship == Relationship::Negative)
            .min_by(|a, b| a.correlation.total_cmp(&b.correlation))
            .cloned();

        ReportSummary {
            pair_count: self.results.len(),
            high_significance: count(Significance::High),
            medium_significance: count(Significance::Medium),
            low_significance: count(Significance::Low),
            insufficient_pairs: self
                .results
                .iter()
                .filter(|r| r.insufficient.is_some())
                .count(),
            strongest_positive,
            strongest_negative,
        }
    }
}
