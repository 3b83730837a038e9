use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One named economic factor as an ordered run of observations.
/// Positionally indexed; `dates`, when present, runs parallel to `values`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FactorSeries {
    pub name: String,
    pub values: Vec<f64>,
    // Always written: bincode cannot skip fields
    #[serde(default)]
    pub dates: Option<Vec<NaiveDate>>,
}

/// Why a series cannot take part in a matrix build
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesDefect {
    NonFinite { index: usize },
    DateLengthMismatch { values: usize, dates: usize },
}

impl FactorSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            dates: None,
        }
    }

    pub fn with_dates(name: impl Into<String>, values: Vec<f64>, dates: Vec<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            values,
            dates: Some(dates),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has_dates(&self) -> bool {
        self.dates.is_some()
    }

    /// First structural problem found, if any
    pub fn defect(&self) -> Option<SeriesDefect> {
        if let Some(index) = self.values.iter().position(|v| !v.is_finite()) {
            return Some(SeriesDefect::NonFinite { index });
        }
        match &self.dates {
            Some(dates) if dates.len() != self.values.len() => {
                Some(SeriesDefect::DateLengthMismatch {
                    values: self.values.len(),
                    dates: dates.len(),
                })
            }
            _ => None,
        }
    }

    /// (date, value) pairs, or None for a positional-only series
    pub fn dated_values(&self) -> Option<impl Iterator<Item = (NaiveDate, f64)> + '_> {
        self.dates
            .as_ref()
            .map(|dates| dates.iter().copied().zip(self.values.iter().copied()))
    }
}
