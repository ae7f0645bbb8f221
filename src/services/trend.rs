// src/services/trend.rs
use crate::services::calculations::round_amount;

/// Least-squares line through `(index, value)`, evaluated at every index.
///
/// Missing values count as 0. Fewer than two points have no trend, so every
/// entry is `None`.
pub fn linear_trend(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let n = values.len();
    if n < 2 {
        return vec![None; n];
    }

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, v.unwrap_or(0.0)))
        .collect();

    let (mut sx, mut sy, mut sxy, mut sx2) = (0.0, 0.0, 0.0, 0.0);
    for &(x, y) in &points {
        sx += x;
        sy += y;
        sxy += x * y;
        sx2 += x * x;
    }

    let nf = n as f64;
    let slope = (nf * sxy - sx * sy) / (nf * sx2 - sx * sx);
    let intercept = (sy - slope * sx) / nf;

    points
        .iter()
        .map(|&(x, _)| Some(round_amount(slope * x + intercept)))
        .collect()
}
