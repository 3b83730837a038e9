use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::alignment::apply_time_range;
use crate::analysis::classify::classify_strength;
use crate::config::CORRELATION;
use crate::data::FactorCollection;
use crate::domain::{FactorSeries, Strength, TimeRange};
use crate::utils::maths_utils::{centred_sums, get_min_max};

/// Flat-trend tolerance on slope, relative to the series' value range
const FLAT_SLOPE_RELATIVE_TOLERANCE: f64 = 1e-9;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrendDirection::Rising => f.pad("rising"),
            TrendDirection::Falling => f.pad("falling"),
            TrendDirection::Flat => f.pad("flat"),
        }
    }
}

/// Linear trend of a single factor against its observation index
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub factor: String,
    /// OLS slope per observation
    pub slope: f64,
    pub r_squared: f64,
    pub direction: TrendDirection,
    /// Band of sqrt(R²), same cut points as pair strength
    pub strength: Strength,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Fit value = a + b·index by least squares and classify the fit
pub fn analyze_trend(series: &FactorSeries) -> TrendSummary {
    let values = &series.values;
    let n = values.len();
    let min_max = get_min_max(values);

    let flat = |slope: f64| TrendSummary {
        factor: series.name.clone(),
        slope,
        r_squared: 0.0,
        direction: TrendDirection::Flat,
        strength: Strength::Negligible,
        min: min_max.map(|(lo, _)| lo),
        max: min_max.map(|(_, hi)| hi),
    };

    if n < CORRELATION.min_observations {
        return flat(0.0);
    }

    let index: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let (cross, sum_idx_sq, sum_val_sq) = centred_sums(&index, values);
    let slope = cross / sum_idx_sq;

    let range = min_max.map(|(lo, hi)| hi - lo).unwrap_or(0.0);
    if sum_val_sq == 0.0 || slope.abs() <= FLAT_SLOPE_RELATIVE_TOLERANCE * range.max(1.0) {
        return flat(slope);
    }

    let r_squared = ((cross * cross) / (sum_idx_sq * sum_val_sq)).clamp(0.0, 1.0);
    TrendSummary {
        factor: series.name.clone(),
        slope,
        r_squared,
        direction: if slope > 0.0 {
            TrendDirection::Rising
        } else {
            TrendDirection::Falling
        },
        strength: classify_strength(r_squared.sqrt()),
        min: min_max.map(|(lo, _)| lo),
        max: min_max.map(|(_, hi)| hi),
    }
}

/// Trends for `factors` over the same window a correlation report used.
/// Names absent from the collection are left out.
pub fn trend_summaries(
    collection: &FactorCollection,
    factors: &[String],
    time_range: TimeRange,
) -> Vec<TrendSummary> {
    factors
        .iter()
        .filter_map(|name| collection.get(name))
        .map(|series| analyze_trend(&apply_time_range(series, time_range)))
        .collect()
}
