use {
    crate::{
        analysis::{
            build_histogram, detect_nodes_with, locate_value_area, score_support_strength_with,
        },
        config::ProfileConfig,
        domain::BucketTable,
        error::ProfileResult,
        models::{CandleSeries, NodeSet, StrengthReport, ValueArea, VolumeProfile, ZoneStatus},
    },
    serde::{Deserialize, Serialize},
};

/// Everything the report layer needs for one instrument snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStructure {
    pub symbol: String,
    pub current_price: f64,
    pub candle_count: usize,
    pub config: ProfileConfig,

    pub buckets: BucketTable,
    pub profile: VolumeProfile,
    pub value_area: ValueArea,
    pub nodes: NodeSet,
    pub strength: StrengthReport,
}

impl MarketStructure {
    pub fn total_volume(&self) -> f64 {
        self.profile.total_volume()
    }

    pub fn zone_status(&self) -> ZoneStatus {
        self.value_area.zone_status(self.current_price)
    }
}

/// Runs the whole profile -> value area / nodes -> strength pipeline on one snapshot.
/// Value area and node detection only read the histogram, so they run side by side.
pub fn analyze(
    series: &CandleSeries,
    current_price: f64,
    config: &ProfileConfig,
) -> ProfileResult<MarketStructure> {
    config.validate()?;

    let (profile, buckets) = crate::trace_time!("Build histogram", 2, {
        build_histogram(series, config.n_bins, config.distribution)
    })?;

    let (value_area, nodes) = crate::trace_time!("Value area + nodes", 2, {
        rayon::join(
            || locate_value_area(&profile, &buckets, config.va_fraction),
            || {
                detect_nodes_with(
                    &profile,
                    &buckets,
                    config.max_smoothing_window,
                    config.prominence_ratio,
                )
            },
        )
    });
    let value_area = value_area?;

    let strength = crate::trace_time!("Support strength", 5, {
        score_support_strength_with(series, &profile, &buckets, current_price, config)
    })?;

    log::info!(
        "{}: POC {:.2} | VAH {:.2} | VAL {:.2} | {} HVN / {} LVN | {} strong levels",
        series.symbol,
        value_area.poc_price,
        value_area.vah_price,
        value_area.val_price,
        nodes.hvn_prices.len(),
        nodes.lvn_prices.len(),
        strength.top_tier.len()
    );

    Ok(MarketStructure {
        symbol: series.symbol.clone(),
        current_price,
        candle_count: series.klines(),
        config: config.clone(),
        buckets,
        profile,
        value_area,
        nodes,
        strength,
    })
}
