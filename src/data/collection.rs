use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::FactorSeries;

/// A named bundle of factor series, the unit that gets loaded, cached and analysed
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct FactorCollection {
    pub name: String, // Metadata e.g. "Macro factors (synthetic)".
    pub version: f64,
    pub series: Vec<FactorSeries>,
}

impl FactorCollection {
    pub fn new(name: impl Into<String>, version: f64, series: Vec<FactorSeries>) -> Self {
        Self {
            name: name.into(),
            version,
            series,
        }
    }

    /// Factor names in collection order. A repeated name appears once.
    pub fn factor_names(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.series
            .iter()
            .filter(|s| seen.insert(s.name.as_str()))
            .map(|s| s.name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&FactorSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Lookup table keyed by factor name. The first series of a repeated name wins.
    pub fn series_by_factor(&self) -> HashMap<String, FactorSeries> {
        let mut map = HashMap::with_capacity(self.series.len());
        for series in &self.series {
            map.entry(series.name.clone())
                .or_insert_with(|| series.clone());
        }
        map
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
