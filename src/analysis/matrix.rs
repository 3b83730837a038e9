use std::borrow::Cow;
use std::collections::HashMap;

use chrono::Utc;
use itertools::Itertools;
use rayon::prelude::*;

use crate::analysis::alignment::{align_by_date, apply_time_range};
use crate::analysis::cache::{CorrelationCache, PairKey};
use crate::analysis::classify::{classify_relationship, classify_significance, classify_strength};
use crate::analysis::pearson::{assess_correlation, outcome_stats};
use crate::config::debug::PRINT_SKIPPED_FACTORS;
use crate::config::{ANALYSIS, AnalysisConfig};
use crate::domain::{FactorSeries, TimeRange};
use crate::models::{
    CorrelationMatrix, CorrelationReport, CorrelationResult, CorrelationStats, SkipReason,
    SkippedFactor,
};

/// Correlate every unordered pair of `factors` using positional alignment and the
/// default configuration. Factors with no series (or a malformed one) are skipped
/// and listed in `report.skipped`.
pub fn build_correlation_matrix<S: AsRef<str>>(
    factors: &[S],
    series_by_factor: &HashMap<String, Vec<f64>>,
) -> CorrelationReport {
    let series: HashMap<String, FactorSeries> = series_by_factor
        .iter()
        .map(|(name, values)| (name.clone(), FactorSeries::new(name.clone(), values.clone())))
        .collect();
    build_correlation_report(factors, &series, TimeRange::All, &ANALYSIS, None)
}

/// Full form: time-range trimming, optional date alignment, exact p-values and memoization.
pub fn build_correlation_report<S: AsRef<str>>(
    factors: &[S],
    series_by_factor: &HashMap<String, FactorSeries>,
    time_range: TimeRange,
    config: &AnalysisConfig,
    cache: Option<&CorrelationCache>,
) -> CorrelationReport {
    // Keep first occurrence of a repeated name
    let names: Vec<String> = factors
        .iter()
        .map(|f| f.as_ref().to_string())
        .unique()
        .collect();

    let mut skipped = Vec::new();
    let prepared: Vec<Option<FactorSeries>> = names
        .iter()
        .map(|name| match series_by_factor.get(name) {
            None => {
                skipped.push(SkippedFactor {
                    factor: name.clone(),
                    reason: SkipReason::Missing,
                });
                None
            }
            Some(series) => match series.defect() {
                Some(defect) => {
                    skipped.push(SkippedFactor {
                        factor: name.clone(),
                        reason: SkipReason::Malformed { defect },
                    });
                    None
                }
                None => Some(apply_time_range(series, time_range)),
            },
        })
        .collect();

    if let Some(warning) = partial_result_warning(&skipped) {
        log::warn!("{}", warning);
    }
    if PRINT_SKIPPED_FACTORS {
        for skip in &skipped {
            log::info!("Skipping factor in correlation matrix: {}", skip);
        }
    }

    let pairs: Vec<(usize, usize)> = (0..names.len())
        .tuple_combinations()
        .filter(|&(i, j)| prepared[i].is_some() && prepared[j].is_some())
        .collect();

    let correlate = |&(i, j): &(usize, usize)| -> CorrelationResult {
        // Both sides are Some: filtered above
        let (Some(a), Some(b)) = (&prepared[i], &prepared[j]) else {
            unreachable!("pair ({}, {}) references a skipped factor", i, j);
        };
        correlate_pair(a, b, config, cache)
    };

    let results: Vec<CorrelationResult> = if pairs.len() >= config.parallel_pair_threshold {
        pairs.par_iter().map(correlate).collect()
    } else {
        pairs.iter().map(correlate).collect()
    };

    let mut matrix = CorrelationMatrix::identity(names);
    for (&(i, j), result) in pairs.iter().zip(results.iter()) {
        matrix.set_pair(
            i,
            j,
            CorrelationStats {
                correlation: result.correlation,
                p_value: result.p_value,
            },
        );
    }

    log::debug!(
        "Correlation matrix built: {} factors, {} pairs, {} skipped ({})",
        matrix.len(),
        results.len(),
        skipped.len(),
        config.p_value_method
    );

    CorrelationReport {
        matrix,
        results,
        skipped,
        time_range,
        p_value_method: config.p_value_method,
        generated_at: Utc::now(),
    }
}

/// One-line warning for a matrix built without some of its requested factors
pub fn partial_result_warning(skipped: &[SkippedFactor]) -> Option<String> {
    if skipped.is_empty() {
        return None;
    }
    Some(format!(
        "Partial correlation matrix: {} factor(s) skipped ({})",
        skipped.len(),
        skipped.iter().map(|s| s.factor.as_str()).join(", ")
    ))
}

/// Correlate and classify one pair of already trimmed series
pub fn correlate_pair(
    a: &FactorSeries,
    b: &FactorSeries,
    config: &AnalysisConfig,
    cache: Option<&CorrelationCache>,
) -> CorrelationResult {
    let (x, y): (Cow<[f64]>, Cow<[f64]>) = match config
        .align_by_date
        .then(|| align_by_date(a, b))
        .flatten()
    {
        Some(aligned) => (Cow::Owned(aligned.left), Cow::Owned(aligned.right)),
        None => (
            Cow::Borrowed(a.values.as_slice()),
            Cow::Borrowed(b.values.as_slice()),
        ),
    };

    let compute = || {
        let outcome = assess_correlation(&x, &y, config.p_value_method);
        let stats = outcome_stats(&outcome, config.p_value_method);
        CorrelationResult {
            factor1: a.name.clone(),
            factor2: b.name.clone(),
            correlation: stats.correlation,
            p_value: stats.p_value,
            significance: classify_significance(stats.p_value),
            relationship: classify_relationship(stats.correlation),
            strength: classify_strength(stats.correlation),
            observations: x.len().min(y.len()),
            insufficient: outcome.insufficient_reason(),
        }
    };

    match cache {
        Some(cache) => {
            let key = PairKey::new(&a.name, &x, &b.name, &y, config.p_value_method);
            (*cache.get_or_compute(key, compute)).clone()
        }
        None => compute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pearson::PValueMethod;
    use crate::domain::{Relationship, SeriesDefect, Significance};
    use crate::models::InsufficientReason;
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveDate;

    fn sample_series() -> HashMap<String, Vec<f64>> {
        HashMap::from([
            ("Oil".to_string(), vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            ("CPI".to_string(), vec![2.0, 4.0, 6.0, 8.0, 10.0]),
            ("VIX".to_string(), vec![5.0, 4.0, 3.0, 2.0, 1.0]),
            ("Rate".to_string(), vec![1.0, 1.0, 1.0, 1.0, 1.0]),
        ])
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let report = build_correlation_matrix(&["Oil", "CPI", "VIX", "Rate"], &sample_series());
        let m = &report.matrix;
        assert_eq!(m.len(), 4);
        assert!(m.is_symmetric());
        for i in 0..4 {
            assert_eq!(m.coefficients[i][i], 1.0);
            assert_eq!(m.p_values[i][i], 0.0);
        }
        // 4 choose 2
        assert_eq!(report.results.len(), 6);
        assert!(!report.is_partial());
    }

    #[test]
    fn test_pair_classification() {
        let report = build_correlation_matrix(&["Oil", "CPI", "VIX", "Rate"], &sample_series());

        let oil_cpi = report.result_for("Oil", "CPI").unwrap();
        assert_approx_eq!(oil_cpi.correlation, 1.0);
        assert_eq!(oil_cpi.significance, Significance::High);
        assert_eq!(oil_cpi.relationship, Relationship::Positive);

        let oil_vix = report.result_for("VIX", "Oil").unwrap();
        assert_approx_eq!(oil_vix.correlation, -1.0);
        assert_eq!(oil_vix.relationship, Relationship::Negative);

        let oil_rate = report.result_for("Oil", "Rate").unwrap();
        assert_eq!(oil_rate.correlation, 0.0);
        assert_eq!(oil_rate.relationship, Relationship::Neutral);
        assert_eq!(oil_rate.insufficient, Some(InsufficientReason::ZeroVariance));
    }

    #[test]
    fn test_results_follow_factor_order() {
        let report = build_correlation_matrix(&["VIX", "Oil", "CPI"], &sample_series());
        let order: Vec<(&str, &str)> = report
            .results
            .iter()
            .map(|r| (r.factor1.as_str(), r.factor2.as_str()))
            .collect();
        assert_eq!(order, vec![("VIX", "Oil"), ("VIX", "CPI"), ("Oil", "CPI")]);
    }

    #[test]
    fn test_missing_and_malformed_series_are_skipped() {
        let mut series = sample_series();
        series.insert("GDP".to_string(), vec![1.0, f64::INFINITY, 2.0, 3.0, 4.0]);

        let report = build_correlation_matrix(&["Oil", "Ghost", "CPI", "GDP"], &series);
        assert!(report.is_partial());
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].factor, "Ghost");
        assert_eq!(report.skipped[0].reason, SkipReason::Missing);
        assert_eq!(
            report.skipped[1].reason,
            SkipReason::Malformed {
                defect: SeriesDefect::NonFinite { index: 1 }
            }
        );

        // Only Oil/CPI survives, but the matrix still spans every requested factor
        assert_eq!(report.results.len(), 1);
        assert!(report.results.iter().all(|r| !r.involves("Ghost") && !r.involves("GDP")));
        assert_eq!(report.matrix.len(), 4);
        assert!(report.matrix.is_symmetric());
        let ghost = report.matrix.get("Oil", "Ghost").unwrap();
        assert_eq!(ghost.correlation, 0.0);
        assert_eq!(ghost.p_value, 1.0);
    }

    #[test]
    fn test_partial_result_warning_names_every_skip() {
        let report = build_correlation_matrix(&["Oil", "Ghost", "CPI", "Phantom"], &sample_series());
        let warning = partial_result_warning(&report.skipped).unwrap();
        assert!(warning.contains("2 factor(s) skipped"));
        assert!(warning.contains("Ghost, Phantom"));

        let complete = build_correlation_matrix(&["Oil", "CPI"], &sample_series());
        assert_eq!(partial_result_warning(&complete.skipped), None);
    }

    #[test]
    fn test_duplicate_factors_collapse() {
        let report = build_correlation_matrix(&["Oil", "CPI", "Oil"], &sample_series());
        assert_eq!(report.matrix.factors, vec!["Oil".to_string(), "CPI".to_string()]);
        assert_eq!(report.results.len(), 1);
    }

    #[test]
    fn test_single_and_empty_factor_sets() {
        let single = build_correlation_matrix(&["Oil"], &sample_series());
        assert_eq!(single.matrix.coefficients, vec![vec![1.0]]);
        assert!(single.results.is_empty());

        let none: [&str; 0] = [];
        let empty = build_correlation_matrix(&none, &sample_series());
        assert!(empty.matrix.is_empty());
    }

    #[test]
    fn test_time_range_applies_before_correlating() {
        let mut series = HashMap::new();
        // Positively related early, inversely related over the last 4 points
        series.insert(
            "A".to_string(),
            FactorSeries::new("A", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]),
        );
        series.insert(
            "B".to_string(),
            FactorSeries::new("B", vec![1.0, 2.0, 3.0, 4.0, 8.0, 7.0, 6.0, 5.0]),
        );

        let full = build_correlation_report(&["A", "B"], &series, TimeRange::All, &ANALYSIS, None);
        assert!(full.results[0].correlation > 0.0);

        let tail = build_correlation_report(&["A", "B"], &series, TimeRange::Last(4), &ANALYSIS, None);
        assert_approx_eq!(tail.results[0].correlation, -1.0);
        assert_eq!(tail.results[0].observations, 4);
        assert_eq!(tail.time_range, TimeRange::Last(4));
    }

    #[test]
    fn test_date_alignment() {
        let day = |d: u32| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        let mut series = HashMap::new();
        series.insert(
            "A".to_string(),
            FactorSeries::with_dates("A", vec![1.0, 2.0, 3.0, 4.0], vec![day(1), day(2), day(3), day(4)]),
        );
        // Same relationship, but B skips day 2 and has an extra day 9
        series.insert(
            "B".to_string(),
            FactorSeries::with_dates("B", vec![10.0, 30.0, 40.0, 99.0], vec![day(1), day(3), day(4), day(9)]),
        );

        let positional = build_correlation_report(&["A", "B"], &series, TimeRange::All, &ANALYSIS, None);
        assert!(positional.results[0].correlation < 0.99);

        let config = AnalysisConfig {
            align_by_date: true,
            ..ANALYSIS
        };
        let aligned = build_correlation_report(&["A", "B"], &series, TimeRange::All, &config, None);
        assert_eq!(aligned.results[0].observations, 3);
        assert_approx_eq!(aligned.results[0].correlation, 1.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut series = HashMap::new();
        let names: Vec<String> = (0..12).map(|k| format!("F{}", k)).collect();
        for (k, name) in names.iter().enumerate() {
            let values = (0..40)
                .map(|i| ((i * (k + 3)) % 17) as f64 + (i as f64) * 0.1 * k as f64)
                .collect();
            series.insert(name.clone(), FactorSeries::new(name.clone(), values));
        }

        let sequential = AnalysisConfig {
            parallel_pair_threshold: usize::MAX,
            ..ANALYSIS
        };
        let parallel = AnalysisConfig {
            parallel_pair_threshold: 1,
            ..ANALYSIS
        };
        let a = build_correlation_report(&names, &series, TimeRange::All, &sequential, None);
        let b = build_correlation_report(&names, &series, TimeRange::All, &parallel, None);
        assert_eq!(a.matrix, b.matrix);
        assert_eq!(a.results, b.results);
    }

    #[test]
    fn test_cache_reused_across_builds() {
        let series: HashMap<String, FactorSeries> = sample_series()
            .into_iter()
            .map(|(k, v)| (k.clone(), FactorSeries::new(k, v)))
            .collect();
        let cache = CorrelationCache::new();
        let factors = ["Oil", "CPI", "VIX"];

        let first = build_correlation_report(&factors, &series, TimeRange::All, &ANALYSIS, Some(&cache));
        let second = build_correlation_report(&factors, &series, TimeRange::All, &ANALYSIS, Some(&cache));
        assert_eq!(first.results, second.results);
        assert_eq!(cache.stats(), (3, 3));
    }

    #[test]
    fn test_exact_p_values_recorded() {
        let series: HashMap<String, FactorSeries> = sample_series()
            .into_iter()
            .map(|(k, v)| (k.clone(), FactorSeries::new(k, v)))
            .collect();
        let config = AnalysisConfig {
            p_value_method: PValueMethod::StudentT,
            ..ANALYSIS
        };
        let report = build_correlation_report(&["Oil", "CPI"], &series, TimeRange::All, &config, None);
        assert_eq!(report.p_value_method, PValueMethod::StudentT);
        assert!(report.results[0].p_value < 1e-6);
        assert_eq!(report.results[0].significance, Significance::High);
    }
}
