//! Trend estimator
//!
//! Compares the first and second half of a value sequence. Degenerate inputs
//! resolve to 0 rather than NaN or infinity so reports always render.

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Signed percentage change from the first half's mean to the second half's
///
/// The split point is `floor(n / 2)`; an empty half has mean 0, and a zero
/// first-half mean yields 0.
pub fn trend_percentage(values: &[f64]) -> f64 {
    let (first, second) = values.split_at(values.len() / 2);
    let first_mean = mean(first);
    if first_mean == 0.0 {
        return 0.0;
    }
    (mean(second) - first_mean) / first_mean * 100.0
}

/// Percentage change from `previous` to `current`
///
/// With no previous value any positive current value counts as 100% growth.
pub fn growth_percentage(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}
