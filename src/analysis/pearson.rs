//! Pearson product-moment correlation with an approximate significance level.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::fmt;

use crate::config::CORRELATION;
use crate::models::{CorrelationOutcome, CorrelationStats, InsufficientReason};
use crate::utils::maths_utils::normalised_centred_sums;

/// How a t statistic is turned into a p-value
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PValueMethod {
    /// Coarse lookup against the 2.576 / 1.96 / 1.645 critical values.
    /// Output is always one of 0.01, 0.05, 0.10, 0.20.
    #[default]
    Bucketed,
    /// Two-tailed p from the Student-t CDF with n - 2 degrees of freedom.
    StudentT,
}

impl fmt::Display for PValueMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PValueMethod::Bucketed => write!(f, "bucketed t-threshold"),
            PValueMethod::StudentT => write!(f, "exact Student-t"),
        }
    }
}

/// Correlation of two positionally aligned series.
///
/// Fewer than 3 points, unequal lengths or non-finite values give
/// `{ correlation: 0, p_value: 1 }`.
/// A constant series gives `correlation = 0` with the bucketed p for t = 0.
pub fn compute_correlation(x: &[f64], y: &[f64]) -> CorrelationStats {
    let method = PValueMethod::Bucketed;
    outcome_stats(&assess_correlation(x, y, method), method)
}

/// Same computation as [`compute_correlation`], but degenerate input is reported
/// as `InsufficientData` rather than folded into a neutral number.
pub fn assess_correlation(x: &[f64], y: &[f64], method: PValueMethod) -> CorrelationOutcome {
    if x.len() != y.len() {
        return CorrelationOutcome::InsufficientData(InsufficientReason::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < CORRELATION.min_observations {
        return CorrelationOutcome::InsufficientData(InsufficientReason::TooFewObservations {
            observations: n,
        });
    }

    let (numerator, sum_x_sq, sum_y_sq) = normalised_centred_sums(x, y);
    let denominator = sum_x_sq.sqrt() * sum_y_sq.sqrt();
    if denominator == 0.0 {
        return CorrelationOutcome::InsufficientData(InsufficientReason::ZeroVariance);
    }

    let ratio = numerator / denominator;
    if !ratio.is_finite() {
        // NaN / infinite input, or a mean that overflowed
        return CorrelationOutcome::InsufficientData(InsufficientReason::NonFinite);
    }
    // Rounding can push |r| a hair past 1 for perfectly collinear input
    let correlation = ratio.clamp(-1.0, 1.0);
    let t = t_statistic(correlation, n);

    CorrelationOutcome::Computed(CorrelationStats {
        correlation,
        p_value: p_value_for(t, n, method),
    })
}

/// Collapse an outcome into the plain `{correlation, p_value}` pair.
/// Zero variance is scored as r = 0 (t = 0); every other degenerate case is `{0, 1}`.
pub fn outcome_stats(outcome: &CorrelationOutcome, method: PValueMethod) -> CorrelationStats {
    match outcome {
        CorrelationOutcome::Computed(stats) => *stats,
        CorrelationOutcome::InsufficientData(InsufficientReason::ZeroVariance) => {
            CorrelationStats {
                correlation: 0.0,
                // n only matters for the exact method, where t = 0 gives p = 1 for any df
                p_value: p_value_for(0.0, CORRELATION.min_observations, method),
            }
        }
        CorrelationOutcome::InsufficientData(_) => CorrelationStats::DEGENERATE,
    }
}

/// t = |r| · sqrt((n - 2) / (1 - r²)). Perfect correlation gives +∞.
pub fn t_statistic(correlation: f64, n: usize) -> f64 {
    let r = correlation.abs();
    let dof = n.saturating_sub(2) as f64;
    let one_minus_r_sq = 1.0 - r * r;
    if one_minus_r_sq <= 0.0 {
        return f64::INFINITY;
    }
    r * (dof / one_minus_r_sq).sqrt()
}

/// Map a t statistic to its p-value bucket
pub fn bucket_p_value(t: f64) -> f64 {
    let thresholds = &CORRELATION.t_thresholds;
    let buckets = &CORRELATION.p_values;
    if t > thresholds.p01 {
        buckets.p01
    } else if t > thresholds.p05 {
        buckets.p05
    } else if t > thresholds.p10 {
        buckets.p10
    } else {
        buckets.fallback
    }
}

/// Two-tailed p-value of `t` under Student's t with `dof` degrees of freedom
pub fn student_t_p_value(t: f64, dof: usize) -> f64 {
    if t.is_infinite() {
        return 0.0;
    }
    if dof == 0 {
        return CORRELATION.p_values.degenerate;
    }
    match StudentsT::new(0.0, 1.0, dof as f64) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0),
        Err(e) => {
            log::warn!("Student-t distribution unavailable for dof {}: {}", dof, e);
            bucket_p_value(t)
        }
    }
}

fn p_value_for(t: f64, n: usize, method: PValueMethod) -> f64 {
    match method {
        PValueMethod::Bucketed => bucket_p_value(t),
        PValueMethod::StudentT => student_t_p_value(t, n.saturating_sub(2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_perfect_positive_correlation() {
        let stats = compute_correlation(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_approx_eq!(stats.correlation, 1.0);
        assert_eq!(stats.p_value, 0.01);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let stats = compute_correlation(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_approx_eq!(stats.correlation, -1.0);
        assert_eq!(stats.p_value, 0.01);
    }

    #[test]
    fn test_short_series_is_degenerate() {
        let stats = compute_correlation(&[1.0, 2.0], &[2.0, 1.0]);
        assert_eq!(stats, CorrelationStats::DEGENERATE);
        assert_eq!(stats.correlation, 0.0);
        assert_eq!(stats.p_value, 1.0);

        assert_eq!(compute_correlation(&[], &[]), CorrelationStats::DEGENERATE);
    }

    #[test]
    fn test_length_mismatch_is_degenerate() {
        let stats = compute_correlation(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0]);
        assert_eq!(stats, CorrelationStats::DEGENERATE);

        let outcome = assess_correlation(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0], PValueMethod::Bucketed);
        assert_eq!(
            outcome,
            CorrelationOutcome::InsufficientData(InsufficientReason::LengthMismatch { left: 4, right: 3 })
        );
    }

    #[test]
    fn test_constant_series_has_zero_correlation() {
        let constant = [1.0, 1.0, 1.0, 1.0, 1.0];
        let y = [3.0, 1.0, 4.0, 1.0, 5.0];
        let stats = compute_correlation(&constant, &y);
        assert_eq!(stats.correlation, 0.0);
        assert_eq!(stats.p_value, 0.20);

        let outcome = assess_correlation(&y, &constant, PValueMethod::Bucketed);
        assert_eq!(
            outcome,
            CorrelationOutcome::InsufficientData(InsufficientReason::ZeroVariance)
        );
        assert_eq!(outcome_stats(&outcome, PValueMethod::StudentT).p_value, 1.0);
    }

    #[test]
    fn test_insufficient_data_is_distinguishable() {
        let short = assess_correlation(&[1.0, 2.0], &[1.0, 2.0], PValueMethod::Bucketed);
        assert!(short.is_insufficient());
        assert_eq!(
            short.insufficient_reason(),
            Some(InsufficientReason::TooFewObservations { observations: 2 })
        );

        let measured = assess_correlation(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0], PValueMethod::Bucketed);
        assert!(!measured.is_insufficient());
    }

    #[test]
    fn test_huge_finite_values_stay_in_range() {
        let x: Vec<f64> = (1..=5).map(|i| i as f64 * 1e160).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        let stats = compute_correlation(&x, &y);
        assert_approx_eq!(stats.correlation, 1.0);
        assert_eq!(stats.p_value, 0.01);

        let x: Vec<f64> = [1.0, 3.0, 2.0, 5.0, 4.0].iter().map(|v| v * 1e100).collect();
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert_approx_eq!(compute_correlation(&x, &y).correlation, 1.0);
    }

    #[test]
    fn test_non_finite_input_is_insufficient() {
        let outcome = assess_correlation(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0], PValueMethod::Bucketed);
        assert_eq!(
            outcome,
            CorrelationOutcome::InsufficientData(InsufficientReason::NonFinite)
        );
        assert_eq!(
            compute_correlation(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]),
            CorrelationStats::DEGENERATE
        );

        // Mean overflows to infinity
        let huge = [f64::MAX, f64::MAX, 1.0];
        let stats = compute_correlation(&huge, &[1.0, 2.0, 3.0]);
        assert!(!stats.correlation.is_nan());
        assert!((-1.0..=1.0).contains(&stats.correlation));
    }

    #[test]
    fn test_t_statistic() {
        assert_eq!(t_statistic(1.0, 5), f64::INFINITY);
        assert_eq!(t_statistic(-1.0, 5), f64::INFINITY);
        assert_eq!(t_statistic(0.0, 10), 0.0);
        // r = 0.6, n = 12: 0.6 * sqrt(10 / 0.64) = 2.3717
        assert_approx_eq!(t_statistic(0.6, 12), 2.371708, 1e-5);
        assert_approx_eq!(t_statistic(-0.6, 12), 2.371708, 1e-5);
    }

    #[test]
    fn test_bucket_thresholds_are_strict() {
        assert_eq!(bucket_p_value(f64::INFINITY), 0.01);
        assert_eq!(bucket_p_value(2.577), 0.01);
        assert_eq!(bucket_p_value(2.576), 0.05);
        assert_eq!(bucket_p_value(1.961), 0.05);
        assert_eq!(bucket_p_value(1.96), 0.10);
        assert_eq!(bucket_p_value(1.646), 0.10);
        assert_eq!(bucket_p_value(1.645), 0.20);
        assert_eq!(bucket_p_value(0.0), 0.20);
    }

    #[test]
    fn test_bucketed_p_value_is_in_contract_set() {
        let x = [0.3, 1.9, 2.2, 3.8, 4.1, 5.5, 5.9, 7.4];
        let ys: [[f64; 8]; 3] = [
            [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
            [0.5, 1.1, 1.4, 2.6, 2.2, 3.9, 3.1, 4.8],
            [9.0, 2.0, 7.0, 4.0, 5.0, 6.0, 3.0, 8.0],
        ];
        for y in ys.iter() {
            let stats = compute_correlation(&x, y);
            assert!((-1.0..=1.0).contains(&stats.correlation));
            assert!([0.01, 0.05, 0.10, 0.20, 1.0].contains(&stats.p_value));
        }
    }

    #[test]
    fn test_student_t_p_value() {
        // t = 2.228 is the two-tailed 5% critical value at 10 dof
        assert_approx_eq!(student_t_p_value(2.228, 10), 0.05, 1e-3);
        assert_approx_eq!(student_t_p_value(0.0, 10), 1.0, 1e-9);
        assert_eq!(student_t_p_value(f64::INFINITY, 3), 0.0);

        let exact = assess_correlation(
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[1.2, 1.9, 3.4, 3.9, 5.2, 5.8],
            PValueMethod::StudentT,
        );
        match exact {
            CorrelationOutcome::Computed(stats) => {
                assert!(stats.p_value >= 0.0 && stats.p_value < 0.01);
            }
            other => panic!("expected a computed outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_symmetry() {
        let x = [2.0, 7.0, 1.0, 8.0, 2.0, 8.0];
        let y = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
        let xy = compute_correlation(&x, &y);
        let yx = compute_correlation(&y, &x);
        assert_eq!(xy.correlation.to_bits(), yx.correlation.to_bits());
        assert_eq!(xy.p_value, yx.p_value);
    }
}
