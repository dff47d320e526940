use crate::{
    config::{DF, VolumeDistribution},
    domain::BucketTable,
    error::{ProfileError, ProfileResult},
    models::{CandleSeries, VolumeProfile},
};

/// Builds the price-volume histogram over `[min(Low), max(High)]`.
///
/// With [`VolumeDistribution::Close`] each candle's whole volume goes to the bucket holding
/// its Close. Closes outside the partitioned range (inconsistent bars) are skipped.
pub fn build_histogram(
    series: &CandleSeries,
    n_bins: usize,
    distribution: VolumeDistribution,
) -> ProfileResult<(VolumeProfile, BucketTable)> {
    if n_bins == 0 {
        return Err(ProfileError::Configuration(
            "n_bins must be a positive integer".to_string(),
        ));
    }

    let Some((price_min, price_max)) = series.price_range() else {
        return Err(ProfileError::InsufficientData(
            "candle series is empty".to_string(),
        ));
    };

    if !price_min.is_finite() || !price_max.is_finite() || price_min >= price_max {
        return Err(ProfileError::InsufficientData(format!(
            "degenerate price range [{}, {}]",
            price_min, price_max
        )));
    }

    let table = BucketTable::new(price_min, price_max, n_bins);
    let mut volumes = vec![0.0; n_bins];

    for candle in series.candles() {
        match distribution {
            VolumeDistribution::Close => {
                let Some(idx) = table.bucket_index(candle.close) else {
                    log::warn!(
                        "Close {} at {} outside [{}, {}]. Skipping.",
                        candle.close,
                        candle.timestamp,
                        price_min,
                        price_max
                    );
                    continue;
                };
                volumes[idx - 1] += candle.volume;
            }
            VolumeDistribution::HighLow => {
                let span = if candle.range() > 0.0 {
                    table.intersecting(candle.low, candle.high)
                } else {
                    table.bucket_index(candle.close).map(|idx| (idx, idx))
                };
                let Some((first, last)) = span else {
                    log::warn!(
                        "Candle at {} does not intersect [{}, {}]. Skipping.",
                        candle.timestamp,
                        price_min,
                        price_max
                    );
                    continue;
                };
                // Density logic: divide volume by number of buckets covered
                let share = candle.volume / (last - first + 1) as f64;
                volumes[first - 1..last]
                    .iter_mut()
                    .for_each(|slot| *slot += share);
            }
        }
    }

    let profile = VolumeProfile::new(volumes);

    if DF.log_histogram {
        for (idx, vol) in profile.iter().filter(|(_, v)| *v > 0.0) {
            log::info!(
                "bucket {:>4} @ {:.4}: {}",
                idx,
                table.midpoint(idx).unwrap_or_default(),
                vol
            );
        }
    }

    log::debug!(
        "Histogram: {} candles -> {} buckets over [{:.4}, {:.4}], total volume {}",
        series.klines(),
        n_bins,
        price_min,
        price_max,
        profile.total_volume()
    );

    Ok((profile, table))
}
