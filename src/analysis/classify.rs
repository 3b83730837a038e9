use crate::config::CORRELATION;
use crate::domain::{Relationship, Significance, Strength};

/// `p <= 0.01` is High, `p <= 0.05` Medium, anything above Low
pub fn classify_significance(p_value: f64) -> Significance {
    let bounds = &CORRELATION.bounds;
    if p_value <= bounds.high_max_p {
        Significance::High
    } else if p_value <= bounds.medium_max_p {
        Significance::Medium
    } else {
        Significance::Low
    }
}

/// `|r| < 0.1` is Neutral, otherwise the sign decides
pub fn classify_relationship(correlation: f64) -> Relationship {
    if correlation.abs() < CORRELATION.bounds.neutral_abs_r {
        Relationship::Neutral
    } else if correlation > 0.0 {
        Relationship::Positive
    } else {
        Relationship::Negative
    }
}

/// Magnitude bands: 0.7 / 0.4 / 0.1 (lower bounds inclusive)
pub fn classify_strength(correlation: f64) -> Strength {
    let bounds = &CORRELATION.bounds;
    let r = correlation.abs();
    if r >= bounds.strong_abs_r {
        Strength::Strong
    } else if r >= bounds.moderate_abs_r {
        Strength::Moderate
    } else if r >= bounds.neutral_abs_r {
        Strength::Weak
    } else {
        Strength::Negligible
    }
}
