use argminmax::ArgMinMax;
use std::cmp::Ordering;

#[inline]
pub(crate) fn get_max(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return 0.0;
    }
    let max_index: usize = vec.argmax();
    vec[max_index]
}

/// Applies a simple centered moving average to smooth the data.
/// window_size should be an odd number (e.g., 3, 5, 7).
#[inline]
pub fn smooth_data(data: &[f64], window_size: usize) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }
    if window_size <= 1 {
        return data.to_vec();
    }

    let half_window = window_size / 2;
    let len = data.len();
    let mut smoothed = vec![0.0; len];

    for i in 0..len {
        let start = i.saturating_sub(half_window);
        let end = (i + half_window + 1).min(len);
        let sum: f64 = data[start..end].iter().sum();
        let count = end - start;
        smoothed[i] = sum / count as f64;
    }

    smoothed
}

/// Linearly maps a value from one range to another while preserving its relative proportion.
pub fn remap(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let t = (val - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

/// Rounds to a fixed number of decimal places.
#[inline]
pub fn round_to(val: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (val * factor).round() / factor
}

/// Quantile with linear interpolation between the two nearest order statistics.
/// `q` is clamped into [0, 1]. Returns None for empty input.
pub fn quantile_linear(data: &[f64], q: f64) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Competition ("min") ranking, highest value first.
/// Tied values share the lowest rank of their group: [9, 9, 5] -> [1, 1, 3].
pub fn competition_rank_desc(values: &[f64]) -> Vec<usize> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    values
        .iter()
        .map(|&v| 1 + sorted.partition_point(|&x| x > v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_preserves_flat_series() {
        let flat = vec![4.0; 9];
        assert_eq!(smooth_data(&flat, 5), flat);
    }

    #[test]
    fn smoothing_truncates_window_at_edges() {
        let data = [0.0, 3.0, 6.0];
        let smoothed = smooth_data(&data, 3);
        assert_eq!(smoothed, vec![1.5, 3.0, 4.5]);
    }

    #[test]
    fn quantile_interpolates() {
        let data = [10.0, 0.0, 20.0, 30.0];
        // sorted [0, 10, 20, 30], pos = 0.7 * 3 = 2.1
        let q = quantile_linear(&data, 0.7).unwrap();
        assert!((q - 21.0).abs() < 1e-12);
        assert_eq!(quantile_linear(&data, 0.0), Some(0.0));
        assert_eq!(quantile_linear(&data, 1.0), Some(30.0));
        assert_eq!(quantile_linear(&[], 0.5), None);
    }

    #[test]
    fn competition_ranking_shares_min_rank() {
        let ranks = competition_rank_desc(&[50.0, 100.0, 100.0, 0.0, 50.0]);
        assert_eq!(ranks, vec![3, 1, 1, 5, 3]);
    }

    #[test]
    fn remap_to_percent() {
        assert_eq!(remap(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(remap(10.0, 0.0, 10.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn get_max_finds_peak() {
        assert_eq!(get_max(&[1.0, 7.5, 3.0]), 7.5);
        assert_eq!(get_max(&[]), 0.0);
    }

    #[test]
    fn round_two_places() {
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(99.994, 2), 99.99);
    }
}
