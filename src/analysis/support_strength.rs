//! Support/resistance strength scoring.
//!
//! Every bucket with traded volume is seeded with that volume, then the value is pushed
//! through three order-dependent stages before being normalized and ranked:
//!
//! 1. seed: `strength = volume`
//! 2. bounce: `strength *= 1 + bounce_weight * touches`, where a touch is a candle whose Low
//!    lies within `price * bounce_tolerance_ratio` of the level
//! 3. decay: `strength *= exp(-decay_constant * |price - spot| / spot)`
//! 4. z-score, min-max scale to [0, 100], competition rank, keep the top tier and re-rank it

use {
    crate::{
        config::{DF, PROFILE, ProfileConfig},
        domain::BucketTable,
        error::{ProfileError, ProfileResult},
        models::{CandleSeries, StrengthRecord, StrengthReport, VolumeProfile},
        utils::{competition_rank_desc, quantile_linear, remap, round_to},
    },
    itertools::{Itertools, MinMaxResult},
    statrs::statistics::Statistics,
};

/// Working value for one seeded bucket while it moves through the stages.
#[derive(Debug, Clone, Copy)]
struct Seed {
    bucket_index: usize,
    price: f64,
    strength: f64,
    touches: usize,
}

/// Scores with the default tolerance, decay and percentile settings.
pub fn score_support_strength(
    series: &CandleSeries,
    profile: &VolumeProfile,
    table: &BucketTable,
    current_price: f64,
) -> ProfileResult<StrengthReport> {
    score_support_strength_with(series, profile, table, current_price, &PROFILE)
}

pub fn score_support_strength_with(
    series: &CandleSeries,
    profile: &VolumeProfile,
    table: &BucketTable,
    current_price: f64,
    config: &ProfileConfig,
) -> ProfileResult<StrengthReport> {
    config.validate()?;
    if !current_price.is_finite() || current_price <= 0.0 {
        return Err(ProfileError::Configuration(format!(
            "current price must be a positive number, got {}",
            current_price
        )));
    }

    let mut seeds = seed_from_volume(profile, table);
    if seeds.is_empty() {
        return Err(ProfileError::EmptyProfile);
    }

    apply_bounce_adjustment(&mut seeds, series, config);
    apply_distance_decay(&mut seeds, current_price, config.decay_constant);

    if DF.log_strength {
        for s in &seeds {
            log::info!(
                "strength @ {:.4}: {:.2} ({} touches)",
                s.price,
                s.strength,
                s.touches
            );
        }
    }

    let report = normalize_and_rank(&seeds, config.top_percentile);

    log::debug!(
        "Strength: {} seeded levels, {} in top tier (threshold {:.2})",
        report.records.len(),
        report.top_tier.len(),
        report.threshold
    );

    Ok(report)
}

/// Stage 1. Zero-volume buckets and buckets without a positive midpoint stay out of the domain.
fn seed_from_volume(profile: &VolumeProfile, table: &BucketTable) -> Vec<Seed> {
    profile
        .iter()
        .filter(|&(_, volume)| volume > 0.0)
        .filter_map(|(bucket_index, volume)| {
            let price = table.midpoint(bucket_index)?;
            (price > 0.0).then_some(Seed {
                bucket_index,
                price,
                strength: volume,
                touches: 0,
            })
        })
        .collect()
}

/// Stage 2. Uncapped: every touch adds a flat `bounce_weight`.
fn apply_bounce_adjustment(seeds: &mut [Seed], series: &CandleSeries, config: &ProfileConfig) {
    for seed in seeds.iter_mut() {
        let tolerance = seed.price * config.bounce_tolerance_ratio;
        seed.touches = series.count_low_touches(seed.price, tolerance);
        seed.strength *= 1.0 + config.bounce_weight * seed.touches as f64;
    }
}

/// Stage 3. A level sitting exactly on spot keeps its full weight.
fn apply_distance_decay(seeds: &mut [Seed], current_price: f64, decay_constant: f64) {
    for seed in seeds.iter_mut() {
        seed.strength *= decay_factor(seed.price, current_price, decay_constant);
    }
}

#[inline]
pub(crate) fn decay_factor(price: f64, current_price: f64, decay_constant: f64) -> f64 {
    let distance_ratio = (price - current_price).abs() / current_price;
    (-decay_constant * distance_ratio).exp()
}

/// Stage 4. Uniform strengths normalize to 0 everywhere and z-score to 0.
fn normalize_and_rank(seeds: &[Seed], top_percentile: f64) -> StrengthReport {
    let strengths: Vec<f64> = seeds.iter().map(|s| s.strength).collect();

    let mean = strengths.iter().mean();
    let std_dev = strengths.iter().population_std_dev();

    let normalized: Vec<f64> = match strengths.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::MinMax(min, max) if max > min => strengths
            .iter()
            .map(|&s| round_to(remap(s, min, max, 0.0, 100.0), 2))
            .collect(),
        _ => vec![0.0; strengths.len()],
    };

    let ranks = competition_rank_desc(&normalized);

    // Seeds arrive in bucket order, which is ascending price
    let records: Vec<StrengthRecord> = seeds
        .iter()
        .zip(normalized.iter().zip(ranks))
        .map(|(seed, (&normalized, rank))| StrengthRecord {
            bucket_index: seed.bucket_index,
            price: seed.price,
            raw_strength: seed.strength,
            normalized,
            z_score: if std_dev > 0.0 {
                (seed.strength - mean) / std_dev
            } else {
                0.0
            },
            rank,
            touch_count: seed.touches,
        })
        .collect();

    let threshold = quantile_linear(&normalized, top_percentile).unwrap_or(0.0);

    let mut top_tier: Vec<StrengthRecord> = records
        .iter()
        .filter(|r| r.normalized >= threshold)
        .cloned()
        .collect();
    let tier_scores: Vec<f64> = top_tier.iter().map(|r| r.normalized).collect();
    for (record, rank) in top_tier.iter_mut().zip(competition_rank_desc(&tier_scores)) {
        record.rank = rank;
    }

    StrengthReport {
        records,
        top_tier,
        threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Candle;
    use chrono::{Duration, TimeZone, Utc};

    fn seed(idx: usize, price: f64, strength: f64) -> Seed {
        Seed {
            bucket_index: idx,
            price,
            strength,
            touches: 0,
        }
    }

    fn series_with_lows(lows: &[f64]) -> CandleSeries {
        let t0 = Utc.with_ymd_and_hms(2025, 2, 3, 0, 0, 0).unwrap();
        let candles = lows
            .iter()
            .enumerate()
            .map(|(i, &low)| {
                Candle::new(t0 + Duration::hours(i as i64), low + 1.0, low + 2.0, low, low + 1.0, 1.0)
            })
            .collect();
        CandleSeries::from_candles("CL=F", candles)
    }

    #[test]
    fn decay_is_one_at_spot() {
        assert_eq!(decay_factor(75.0, 75.0, 5.0), 1.0);
        let twenty_pct = decay_factor(120.0, 100.0, 5.0);
        assert!((twenty_pct - (-1.0f64).exp()).abs() < 1e-12);
        let fifty_pct = decay_factor(50.0, 100.0, 5.0);
        assert!((fifty_pct - (-2.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn zero_volume_buckets_are_not_seeded() {
        let profile = VolumeProfile::new(vec![0.0, 4.0, 0.0, 2.0]);
        let table = BucketTable::new(10.0, 14.0, 4);
        let seeds = seed_from_volume(&profile, &table);
        let idx: Vec<usize> = seeds.iter().map(|s| s.bucket_index).collect();
        assert_eq!(idx, vec![2, 4]);
        assert_eq!(seeds[0].price, 11.5);
        assert_eq!(seeds[0].strength, 4.0);
    }

    #[test]
    fn bounce_adds_ten_percent_per_touch() {
        // Tolerance at 100 is 0.2: lows 99.85, 100.0, 100.15 touch, 100.3 does not
        let series = series_with_lows(&[99.85, 100.0, 100.15, 100.3, 90.0]);
        let mut seeds = vec![seed(1, 100.0, 50.0)];
        apply_bounce_adjustment(&mut seeds, &series, &PROFILE);
        assert_eq!(seeds[0].touches, 3);
        assert!((seeds[0].strength - 65.0).abs() < 1e-9);
    }

    #[test]
    fn min_max_and_competition_ranks() {
        let seeds = vec![
            seed(1, 10.0, 10.0),
            seed(2, 11.0, 30.0),
            seed(3, 12.0, 30.0),
            seed(4, 13.0, 20.0),
        ];
        let report = normalize_and_rank(&seeds, 0.70);
        let norm: Vec<f64> = report.records.iter().map(|r| r.normalized).collect();
        assert_eq!(norm, vec![0.0, 100.0, 100.0, 50.0]);
        let ranks: Vec<usize> = report.records.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![4, 1, 1, 3]);
        // z-scores: mean 22.5, population std sqrt(68.75)
        let sd = 68.75f64.sqrt();
        assert!((report.records[0].z_score - (10.0 - 22.5) / sd).abs() < 1e-9);
    }

    #[test]
    fn top_tier_is_inclusive_and_reranked() {
        let seeds: Vec<Seed> = (0..10)
            .map(|i| seed(i + 1, 50.0 + i as f64, i as f64 * 10.0))
            .collect();
        let report = normalize_and_rank(&seeds, 0.70);
        // normalized 0, 11.11, .., 100 -> 70th percentile falls at position 6.3
        let kept: Vec<usize> = report.top_tier.iter().map(|r| r.bucket_index).collect();
        assert_eq!(kept, vec![8, 9, 10]);
        let ranks: Vec<usize> = report.top_tier.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![3, 2, 1]);
        // Ascending price order is preserved
        assert!(report.top_tier.windows(2).all(|w| w[0].price < w[1].price));
    }

    #[test]
    fn uniform_strength_degenerates_to_zero() {
        let seeds = vec![seed(1, 10.0, 5.0), seed(2, 11.0, 5.0), seed(3, 12.0, 5.0)];
        let report = normalize_and_rank(&seeds, 0.70);
        assert!(report.records.iter().all(|r| r.normalized == 0.0));
        assert!(report.records.iter().all(|r| r.rank == 1));
        assert!(report.records.iter().all(|r| r.z_score == 0.0));
        assert_eq!(report.top_tier.len(), 3);
    }

    #[test]
    fn single_seed_is_rank_one() {
        let report = normalize_and_rank(&[seed(7, 42.0, 9.0)], 0.70);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].rank, 1);
        assert_eq!(report.top_tier.len(), 1);
    }

    #[test]
    fn empty_profile_fails() {
        let series = series_with_lows(&[70.0, 71.0]);
        let profile = VolumeProfile::new(vec![0.0; 5]);
        let table = BucketTable::new(70.0, 73.0, 5);
        let err = score_support_strength(&series, &profile, &table, 71.0);
        assert_eq!(err, Err(ProfileError::EmptyProfile));
    }

    #[test]
    fn non_positive_spot_is_rejected() {
        let series = series_with_lows(&[70.0, 71.0]);
        let profile = VolumeProfile::new(vec![1.0; 5]);
        let table = BucketTable::new(70.0, 73.0, 5);
        let err = score_support_strength(&series, &profile, &table, 0.0);
        assert!(matches!(err, Err(ProfileError::Configuration(_))));
    }
}
