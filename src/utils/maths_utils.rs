use argminmax::ArgMinMax;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Arithmetic mean. Empty input gives 0.0
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Centred moments of a paired sample about the means of `x` and `y`:
/// (Σ(x-x̄)(y-ȳ), Σ(x-x̄)², Σ(y-ȳ)²)
pub fn centred_sums(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    debug_assert_eq!(x.len(), y.len());
    let mean_x = mean(x);
    let mean_y = mean(y);

    x.iter()
        .zip(y.iter())
        .fold((0.0, 0.0, 0.0), |(cross, sum_x_sq, sum_y_sq), (&xi, &yi)| {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            (cross + dx * dy, sum_x_sq + dx * dx, sum_y_sq + dy * dy)
        })
}

/// Same moments as [`centred_sums`], with each series' deviations divided by its
/// largest absolute deviation first. Ratios between the sums are unchanged, and
/// squares of values near `f64::MAX.sqrt()` no longer overflow.
pub fn normalised_centred_sums(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    debug_assert_eq!(x.len(), y.len());
    let mean_x = mean(x);
    let mean_y = mean(y);

    let scale = |values: &[f64], centre: f64| {
        let widest = values
            .iter()
            .fold(0.0f64, |acc, &v| acc.max((v - centre).abs()));
        if widest > 0.0 { widest } else { 1.0 }
    };
    let scale_x = scale(x, mean_x);
    let scale_y = scale(y, mean_y);

    x.iter()
        .zip(y.iter())
        .fold((0.0, 0.0, 0.0), |(cross, sum_x_sq, sum_y_sq), (&xi, &yi)| {
            let dx = (xi - mean_x) / scale_x;
            let dy = (yi - mean_y) / scale_y;
            (cross + dx * dy, sum_x_sq + dx * dx, sum_y_sq + dy * dy)
        })
}

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// (min, max) of a non-empty slice, None when empty
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.is_empty() {
        return None;
    }
    Some((get_min(vec), get_max(vec)))
}

/// Hash of the exact bit patterns of a series.
/// Two series collide only if every value is bit-identical (or by hash accident).
pub fn series_fingerprint(values: &[f64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    values.len().hash(&mut hasher);
    for v in values {
        v.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}
