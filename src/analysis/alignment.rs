use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::domain::{FactorSeries, TimeRange};

/// Two series reduced to the dates they share
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub dates: Vec<NaiveDate>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Inner join on date, ascending. A date repeated within one series keeps its last value.
/// Returns None unless both series carry dates.
pub fn align_by_date(a: &FactorSeries, b: &FactorSeries) -> Option<AlignedPair> {
    let left: BTreeMap<NaiveDate, f64> = a.dated_values()?.collect();
    let right: BTreeMap<NaiveDate, f64> = b.dated_values()?.collect();

    let mut aligned = AlignedPair {
        dates: Vec::new(),
        left: Vec::new(),
        right: Vec::new(),
    };
    for (date, left_value) in &left {
        if let Some(right_value) = right.get(date) {
            aligned.dates.push(*date);
            aligned.left.push(*left_value);
            aligned.right.push(*right_value);
        }
    }
    Some(aligned)
}

/// Keep only the observations selected by `range`, trimming dates in step
pub fn apply_time_range(series: &FactorSeries, range: TimeRange) -> FactorSeries {
    let (start, end) = range.indices(series.len());
    FactorSeries {
        name: series.name.clone(),
        values: series.values[start..end].to_vec(),
        dates: series
            .dates
            .as_ref()
            .map(|dates| dates[start.min(dates.len())..end.min(dates.len())].to_vec()),
    }
}
