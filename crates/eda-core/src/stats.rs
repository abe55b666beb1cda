//! Small numeric helpers shared by the analyses: means, deviations,
//! quantiles, trailing rolling means and Pearson correlation.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (ddof = 1). `None` below 2 values.
pub fn std_sample(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// Population standard deviation (ddof = 0). `None` for an empty slice.
pub fn std_population(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Linear-interpolation quantile over an already sorted slice, `q` in [0, 1].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Trailing rolling mean.
///
/// Entry `i` is the mean of `values[i + 1 - window ..= i]`; the first
/// `window - 1` entries are `None`. A window of 0 yields all `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let mut out = Vec::with_capacity(values.len());
    let mut running = 0.0f64;
    for (i, v) in values.iter().enumerate() {
        running += v;
        if i >= window {
            running -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(running / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Pearson correlation coefficient over paired samples.
///
/// Returns `NaN` when fewer than 2 pairs are supplied or when either side
/// has zero variance. Pairs beyond the shorter slice are ignored.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let x = &x[..n];
    let y = &y[..n];
    let mx = x.iter().sum::<f64>() / n as f64;
    let my = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mx;
        let dy = y[i] - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── mean / std ────────────────────────────────────────────────────────────

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_sample_matches_hand_computation() {
        // Sample std of [2, 4, 4, 4, 5, 5, 7, 9] with ddof=1.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let s = std_sample(&values).unwrap();
        assert!((s - 2.138089935).abs() < 1e-8, "s = {s}");
    }

    #[test]
    fn test_std_sample_needs_two_values() {
        assert!(std_sample(&[1.0]).is_none());
    }

    #[test]
    fn test_std_population_of_constant_is_zero() {
        assert_eq!(std_population(&[3.0, 3.0, 3.0]), Some(0.0));
    }

    // ── quantile_sorted ───────────────────────────────────────────────────────

    #[test]
    fn test_quantile_median_even_count_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.5), Some(2.5));
    }

    #[test]
    fn test_quantile_extremes() {
        let sorted = [1.0, 5.0, 9.0];
        assert_eq!(quantile_sorted(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&sorted, 1.0), Some(9.0));
    }

    #[test]
    fn test_quantile_empty_returns_none() {
        assert!(quantile_sorted(&[], 0.5).is_none());
    }

    // ── rolling_mean ──────────────────────────────────────────────────────────

    #[test]
    fn test_rolling_mean_first_window_minus_one_undefined() {
        let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let rolled = rolling_mean(&values, 7);

        for (i, entry) in rolled.iter().enumerate().take(6) {
            assert!(entry.is_none(), "index {i} should be undefined");
        }
        // Index 6 = mean of 1..=7 = 4.0.
        assert_eq!(rolled[6], Some(4.0));
        // Index 9 = mean of 4..=10 = 7.0.
        assert_eq!(rolled[9], Some(7.0));
    }

    #[test]
    fn test_rolling_mean_equals_trailing_arithmetic_mean() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let window = 3;
        let rolled = rolling_mean(&values, window);
        for i in (window - 1)..values.len() {
            let expected = values[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            let got = rolled[i].unwrap();
            assert!((got - expected).abs() < 1e-12, "index {i}");
        }
    }

    #[test]
    fn test_rolling_mean_window_one_is_identity() {
        let values = [2.0, 4.0, 8.0];
        let rolled = rolling_mean(&values, 1);
        assert_eq!(rolled, vec![Some(2.0), Some(4.0), Some(8.0)]);
    }

    #[test]
    fn test_rolling_mean_window_larger_than_input() {
        let rolled = rolling_mean(&[1.0, 2.0], 7);
        assert_eq!(rolled, vec![None, None]);
    }

    // ── pearson ───────────────────────────────────────────────────────────────

    #[test]
    fn test_pearson_perfect_positive() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 20.0, 30.0, 40.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let x = [1.0, 2.0, 3.0];
        let y = [6.0, 4.0, 2.0];
        assert!((pearson(&x, &y) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_fewer_than_two_pairs_is_nan() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[], &[]).is_nan());
    }

    #[test]
    fn test_pearson_zero_variance_is_nan() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
    }
}
