use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence band derived from a pair's p-value
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    High,
    Medium,
    Low,
}

/// Direction of a linear relationship, with a dead band around zero
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Positive,
    Negative,
    Neutral,
}

/// Magnitude band of |r|. Also used for trend strength.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
    Negligible,
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Significance::High => f.pad("high"),
            Significance::Medium => f.pad("medium"),
            Significance::Low => f.pad("low"),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Relationship::Positive => f.pad("positive"),
            Relationship::Negative => f.pad("negative"),
            Relationship::Neutral => f.pad("neutral"),
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strength::Strong => f.pad("strong"),
            Strength::Moderate => f.pad("moderate"),
            Strength::Weak => f.pad("weak"),
            Strength::Negligible => f.pad("negligible"),
        }
    }
}
