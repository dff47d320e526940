use crate::{
    config::DF,
    domain::BucketTable,
    error::{ProfileError, ProfileResult},
    models::{ValueArea, VolumeProfile},
};

/// Max-volume bucket. Ties resolve to the lowest index (lowest price).
pub fn point_of_control(profile: &VolumeProfile) -> Option<usize> {
    profile
        .iter()
        .fold(None, |best: Option<(usize, f64)>, (idx, vol)| match best {
            Some((_, best_vol)) if vol <= best_vol => best,
            _ => Some((idx, vol)),
        })
        .map(|(idx, _)| idx)
}

/// Greedy single-step expansion outward from the POC until `va_fraction` of total volume
/// is enclosed. Each step takes the larger in-range neighbour; equal volumes expand upward.
/// Stops early once both ends of the partition are reached.
pub fn locate_value_area(
    profile: &VolumeProfile,
    table: &BucketTable,
    va_fraction: f64,
) -> ProfileResult<ValueArea> {
    if !(va_fraction > 0.0 && va_fraction <= 1.0) {
        return Err(ProfileError::Configuration(format!(
            "va_fraction must be in (0, 1], got {}",
            va_fraction
        )));
    }

    let n_bins = profile.n_bins();
    let Some(poc) = point_of_control(profile) else {
        return Err(ProfileError::InsufficientData(
            "volume profile has no buckets".to_string(),
        ));
    };

    let target_volume = profile.total_volume() * va_fraction;
    // Running sum and total are accumulated in different orders
    let slack = profile.total_volume() * 1e-12;
    let mut enclosed_volume = profile.volume(poc);
    let mut upper = poc;
    let mut lower = poc;

    while target_volume - enclosed_volume > slack {
        let can_go_up = upper < n_bins;
        let can_go_down = lower > 1;

        if !can_go_up && !can_go_down {
            break;
        }

        let vol_upper = profile.volume(upper + 1);
        let vol_lower = profile.volume(lower - 1);

        let go_up = match (can_go_up, can_go_down) {
            (true, false) => true,
            (false, true) => false,
            _ => vol_upper >= vol_lower,
        };

        if go_up {
            upper += 1;
            enclosed_volume += vol_upper;
        } else {
            lower -= 1;
            enclosed_volume += vol_lower;
        }

        if DF.log_value_area {
            log::info!(
                "VA step: [{}, {}] enclosed {} / target {}",
                lower,
                upper,
                enclosed_volume,
                target_volume
            );
        }
    }

    let price_of = |idx: usize| {
        table.midpoint(idx).ok_or_else(|| {
            ProfileError::InsufficientData(format!(
                "bucket {} missing from a {}-bucket table",
                idx,
                table.n_bins()
            ))
        })
    };

    let value_area = ValueArea {
        poc_price: price_of(poc)?,
        poc_bucket_index: poc,
        vah_price: price_of(upper)?,
        val_price: price_of(lower)?,
        upper_bucket_index: upper,
        lower_bucket_index: lower,
        enclosed_volume,
    };

    log::debug!(
        "Value area: POC {:.4} (bucket {}), VAL {:.4}, VAH {:.4}, enclosed {:.1}%",
        value_area.poc_price,
        poc,
        value_area.val_price,
        value_area.vah_price,
        if profile.total_volume() > 0.0 {
            enclosed_volume / profile.total_volume() * 100.0
        } else {
            100.0
        }
    );

    Ok(value_area)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(volumes: Vec<f64>) -> (VolumeProfile, BucketTable) {
        let n = volumes.len();
        (VolumeProfile::new(volumes), BucketTable::new(0.0, n as f64, n))
    }

    #[test]
    fn poc_ties_pick_lowest_index() {
        let (profile, _) = setup(vec![1.0, 9.0, 3.0, 9.0]);
        assert_eq!(point_of_control(&profile), Some(2));
    }

    #[test]
    fn expands_toward_larger_neighbour() {
        // total 100, target 70
        let (profile, table) = setup(vec![5.0, 10.0, 40.0, 20.0, 25.0]);
        let va = locate_value_area(&profile, &table, 0.70).unwrap();
        assert_eq!(va.poc_bucket_index, 3);
        // 40 -> +20 (up) = 60 -> +25 (up) = 85
        assert_eq!(va.lower_bucket_index, 3);
        assert_eq!(va.upper_bucket_index, 5);
        assert_eq!(va.enclosed_volume, 85.0);
        assert_eq!(va.poc_price, 2.5);
        assert_eq!(va.val_price, 2.5);
        assert_eq!(va.vah_price, 4.5);
    }

    #[test]
    fn tie_expands_upward() {
        let (profile, table) = setup(vec![0.0, 10.0, 30.0, 10.0, 0.0]);
        let va = locate_value_area(&profile, &table, 0.80).unwrap();
        // 30 -> tie 10/10 goes up -> 40 >= 40
        assert_eq!(va.lower_bucket_index, 3);
        assert_eq!(va.upper_bucket_index, 4);
    }

    #[test]
    fn exhausted_side_expands_the_other() {
        let (profile, table) = setup(vec![50.0, 0.0, 0.0, 30.0]);
        let va = locate_value_area(&profile, &table, 0.90).unwrap();
        assert_eq!(va.poc_bucket_index, 1);
        assert_eq!(va.lower_bucket_index, 1);
        assert_eq!(va.upper_bucket_index, 4);
        assert!(va.enclosed_volume >= 0.9 * 80.0);
    }

    #[test]
    fn full_fraction_covers_all_volume() {
        let (profile, table) = setup(vec![1.0, 2.0, 3.0, 2.0, 1.0]);
        let va = locate_value_area(&profile, &table, 1.0).unwrap();
        assert_eq!((va.lower_bucket_index, va.upper_bucket_index), (1, 5));
        assert!(va.val_price <= va.poc_price && va.poc_price <= va.vah_price);
    }

    #[test]
    fn full_fraction_stops_at_last_traded_bucket() {
        // Fractional volumes in buckets 11..=30 of 40, empty tails on both sides
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        for _ in 0..500 {
            let mut volumes = vec![0.0; 40];
            for v in volumes.iter_mut().skip(10).take(20) {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                *v = 1.0 + (state >> 11) as f64 / (1u64 << 53) as f64 * 97.3;
            }
            let (profile, table) = setup(volumes);
            let va = locate_value_area(&profile, &table, 1.0).unwrap();
            assert_eq!(
                (va.lower_bucket_index, va.upper_bucket_index),
                (11, 30),
                "enclosed {} of {}",
                va.enclosed_volume,
                profile.total_volume()
            );
        }
    }

    #[test]
    fn single_bucket_value_area() {
        let (profile, table) = setup(vec![0.0, 0.0, 12.0, 0.0]);
        let va = locate_value_area(&profile, &table, 0.70).unwrap();
        assert_eq!(va.vah_price, va.poc_price);
        assert_eq!(va.val_price, va.poc_price);
    }

    #[test]
    fn rejects_bad_fraction() {
        let (profile, table) = setup(vec![1.0, 2.0]);
        assert!(matches!(
            locate_value_area(&profile, &table, 0.0),
            Err(ProfileError::Configuration(_))
        ));
        assert!(locate_value_area(&profile, &table, 1.5).is_err());
    }
}
