#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate
pub use analysis::{MarketStructure, analyze};
pub use config::{PROFILE, ProfileConfig, VolumeDistribution};
pub use data::{CandleSource, JsonFileSource};
pub use domain::{BucketTable, Candle, PriceBucket};
pub use error::{ProfileError, ProfileResult};
pub use models::{
    CandleSeries, NodeSet, StrengthRecord, StrengthReport, TopLevels, ValueArea, VolumeProfile,
    ZoneStatus,
};

use {anyhow::Context, clap::Parser, std::path::PathBuf};

// CLI argument parsing
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "CL Volume Profile & Option Zone Calculator", long_about = None)]
pub struct Cli {
    /// JSON file holding the OHLCV candles
    #[arg(long)]
    pub input: PathBuf,

    /// Ticker Symbol
    #[arg(long, default_value = "CL=F")]
    pub symbol: String,

    /// Number of price bins
    #[arg(long, default_value_t = 150)]
    pub bins: usize,

    /// Value Area volume fraction
    #[arg(long, default_value_t = PROFILE.va_fraction)]
    pub va_fraction: f64,

    /// Relative band around a level for touch counting (0.002 = +-0.2%)
    #[arg(long, default_value_t = PROFILE.bounce_tolerance_ratio)]
    pub bounce_tolerance: f64,

    /// Distance decay constant
    #[arg(long, default_value_t = PROFILE.decay_constant)]
    pub decay: f64,

    /// Strength percentile cutoff (0.70 keeps the top 30%)
    #[arg(long, default_value_t = PROFILE.top_percentile)]
    pub top_percentile: f64,

    /// Where candle volume is placed: close | high-low
    #[arg(long, default_value_t = VolumeDistribution::Close)]
    pub distribution: VolumeDistribution,

    /// Spot price; defaults to the last close in the file
    #[arg(long)]
    pub current_price: Option<f64>,

    /// How many supports below spot to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Print the result record as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Cli {
    pub fn profile_config(&self) -> ProfileConfig {
        ProfileConfig {
            n_bins: self.bins,
            va_fraction: self.va_fraction,
            bounce_tolerance_ratio: self.bounce_tolerance,
            decay_constant: self.decay,
            top_percentile: self.top_percentile,
            distribution: self.distribution,
            ..PROFILE
        }
    }
}

/// Load -> analyze -> render. Returns the text to print.
pub async fn run(args: &Cli, source: &dyn CandleSource) -> anyhow::Result<String> {
    let config = args.profile_config();
    config.validate()?;

    let series = source.fetch_candles(&args.symbol).await?;
    let current_price = match args.current_price {
        Some(price) => price,
        None => series
            .latest_close()
            .context("Candle series has no close price")?,
    };
    log::info!(
        "Data loaded: {} candles. Last Price: {:.2}",
        series.klines(),
        current_price
    );

    let structure = analyze(&series, current_price, &config)
        .with_context(|| format!("Analysis failed for {}", args.symbol))?;

    if args.json {
        Ok(serde_json::to_string_pretty(&structure)?)
    } else {
        Ok(report::render_report(&structure, args.top))
    }
}
