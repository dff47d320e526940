use {
    crate::{
        config::{DF, PROFILE},
        domain::BucketTable,
        models::{NodeSet, VolumeProfile},
        utils::{get_max, smooth_data},
    },
    find_peaks::PeakFinder,
    itertools::Itertools,
};

/// Odd smoothing window capped at `min(max_window, len)`. None when it would be 3 or less.
pub(crate) fn smoothing_window(len: usize, max_window: usize) -> Option<usize> {
    let mut window = max_window.min(len);
    if window % 2 == 0 {
        window = window.saturating_sub(1);
    }
    (window > 3).then_some(window)
}

/// Interior local maxima of `data` whose prominence is at least `min_prominence`.
/// Plateaus count once, at their middle (the left one for even widths).
/// Extrema touching either end are ignored.
fn prominent_maxima(data: &[f64], min_prominence: f64) -> Vec<usize> {
    if data.len() < 3 {
        return Vec::new();
    }

    let mut finder = PeakFinder::new(data);
    finder.with_min_prominence(min_prominence);

    finder
        .find_peaks()
        .iter()
        .map(|peak| (peak.position.start + peak.position.end.saturating_sub(1)) / 2)
        .filter(|&mid| is_interior_maximum(data, mid))
        .sorted()
        .dedup()
        .collect()
}

fn is_interior_maximum(data: &[f64], mid: usize) -> bool {
    let Some(&level) = data.get(mid) else {
        return false;
    };
    let mut left = mid;
    while left > 0 && data[left - 1] == level {
        left -= 1;
    }
    let mut right = mid;
    while right + 1 < data.len() && data[right + 1] == level {
        right += 1;
    }
    left > 0 && right + 1 < data.len() && data[left - 1] < level && data[right + 1] < level
}

/// Smooths the profile and picks High Volume Nodes (peaks) and Low Volume Nodes (valleys).
/// A flat profile yields an empty set.
pub fn detect_nodes(profile: &VolumeProfile, table: &BucketTable) -> NodeSet {
    detect_nodes_with(
        profile,
        table,
        PROFILE.max_smoothing_window,
        PROFILE.prominence_ratio,
    )
}

pub fn detect_nodes_with(
    profile: &VolumeProfile,
    table: &BucketTable,
    max_window: usize,
    prominence_ratio: f64,
) -> NodeSet {
    let raw = profile.as_slice();

    let smoothed = match smoothing_window(raw.len(), max_window) {
        Some(window) => smooth_data(raw, window),
        None => raw.to_vec(),
    };

    let min_prominence = get_max(&smoothed) * prominence_ratio;
    if !(min_prominence > 0.0) {
        return NodeSet::default();
    }

    let negated: Vec<f64> = smoothed.iter().map(|v| -v).collect();

    let to_prices = |positions: Vec<usize>| -> Vec<f64> {
        positions
            .into_iter()
            .filter_map(|pos| table.midpoint(pos + 1))
            .collect()
    };

    let nodes = NodeSet {
        hvn_prices: to_prices(prominent_maxima(&smoothed, min_prominence)),
        lvn_prices: to_prices(prominent_maxima(&negated, min_prominence)),
    };

    if DF.log_nodes {
        log::info!("HVNs: {:?}", nodes.hvn_prices);
        log::info!("LVNs: {:?}", nodes.lvn_prices);
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(volumes: Vec<f64>) -> (VolumeProfile, BucketTable) {
        let n = volumes.len();
        (VolumeProfile::new(volumes), BucketTable::new(0.0, n as f64, n))
    }

    #[test]
    fn window_is_odd_and_capped() {
        assert_eq!(smoothing_window(100, 11), Some(11));
        assert_eq!(smoothing_window(8, 11), Some(7));
        assert_eq!(smoothing_window(5, 11), Some(5));
        assert_eq!(smoothing_window(4, 11), None);
        assert_eq!(smoothing_window(3, 11), None);
        assert_eq!(smoothing_window(0, 11), None);
    }

    #[test]
    fn uniform_profile_has_no_nodes() {
        let (profile, table) = setup(vec![25.0; 120]);
        assert!(detect_nodes(&profile, &table).is_empty());
    }

    #[test]
    fn zero_profile_has_no_nodes() {
        let (profile, table) = setup(vec![0.0; 30]);
        assert!(detect_nodes(&profile, &table).is_empty());
    }

    #[test]
    fn interior_check_rejects_edges_and_shoulders() {
        let data = [5.0, 1.0, 3.0, 3.0, 3.0, 0.0, 2.0];
        assert!(!is_interior_maximum(&data, 0));
        assert!(is_interior_maximum(&data, 3));
        assert!(!is_interior_maximum(&data, 6));
        assert!(!is_interior_maximum(&data, 5));
    }

    #[test]
    fn raw_values_used_for_tiny_profiles() {
        // 3 buckets: too few to smooth, middle spike is an HVN
        let (profile, table) = setup(vec![1.0, 10.0, 1.0]);
        let nodes = detect_nodes(&profile, &table);
        assert_eq!(nodes.hvn_prices, vec![1.5]);
        assert!(nodes.lvn_prices.is_empty());
    }

    #[test]
    fn prominence_cutoff_is_inclusive() {
        // Cutoff is 5% of the 100 spike: a 4.9 bump is noise, a 5.0 bump is a node
        let (profile, table) = setup(vec![100.0, 0.0, 4.9, 0.0]);
        assert!(detect_nodes(&profile, &table).is_empty());

        let (profile, table) = setup(vec![100.0, 0.0, 5.0, 0.0]);
        let nodes = detect_nodes(&profile, &table);
        assert_eq!(nodes.hvn_prices, vec![2.5]);
        assert_eq!(nodes.lvn_prices, vec![1.5]);
    }

    #[test]
    fn even_plateau_reports_left_middle() {
        let (profile, table) = setup(vec![0.0, 9.0, 9.0, 0.0]);
        let nodes = detect_nodes(&profile, &table);
        assert_eq!(nodes.hvn_prices, vec![1.5]);
        assert!(nodes.lvn_prices.is_empty());
    }

    #[test]
    fn two_humps_and_a_void() {
        // Two separated volume humps with a dead zone between them
        let mut volumes = vec![0.0; 60];
        for (i, v) in volumes.iter_mut().enumerate() {
            let a = (-((i as f64 - 15.0).powi(2)) / 18.0).exp();
            let b = (-((i as f64 - 45.0).powi(2)) / 18.0).exp();
            *v = 1000.0 * (a + b) + 1.0;
        }
        let (profile, table) = setup(volumes);
        let nodes = detect_nodes(&profile, &table);

        assert_eq!(nodes.hvn_prices.len(), 2);
        assert!((nodes.hvn_prices[0] - 15.5).abs() <= 1.0);
        assert!((nodes.hvn_prices[1] - 45.5).abs() <= 1.0);
        assert_eq!(nodes.lvn_prices.len(), 1);
        assert!((nodes.lvn_prices[0] - 30.5).abs() <= 1.0);
    }
}
