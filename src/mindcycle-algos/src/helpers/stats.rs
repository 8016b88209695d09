pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0_f64
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation around a precomputed `mean`.
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        0_f64
    } else {
        let variance = values
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / values.len() as f64;

        variance.sqrt()
    }
}

/// Rounds halves up, e.g. 28.5 -> 29. Only meaningful for non-negative
/// values, which is all day counts ever are.
pub fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}
