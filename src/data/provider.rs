use {
    crate::{domain::Candle, models::CandleSeries},
    anyhow::{Context, Result, bail},
    async_trait::async_trait,
    std::path::PathBuf,
};

/// Abstract interface for fetching market data.
/// Implementations hand the core an already validated, time-ordered, non-empty series.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch_candles(&self, symbol: &str) -> Result<CandleSeries>;
}

/// Reads a JSON array of `{timestamp, open, high, low, close, volume}` objects from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CandleSource for JsonFileSource {
    async fn fetch_candles(&self, symbol: &str) -> Result<CandleSeries> {
        log::info!("Loading {} candles from {:?}", symbol, self.path);

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read candle file {:?}", self.path))?;

        let candles = parse_candles(&raw)
            .with_context(|| format!("Failed to parse candle file {:?}", self.path))?;

        if candles.is_empty() {
            bail!("No data found for {} in {:?}", symbol, self.path);
        }

        log::info!("Successfully loaded {} rows.", candles.len());
        Ok(CandleSeries::from_candles(symbol, candles))
    }
}

/// Parses and time-orders candles, rejecting non-finite or inverted bars.
pub(crate) fn parse_candles(raw: &str) -> Result<Vec<Candle>> {
    let mut candles: Vec<Candle> = serde_json::from_str(raw)?;

    if let Some(bad) = candles.iter().find(|c| {
        ![c.open, c.high, c.low, c.close, c.volume]
            .iter()
            .all(|v| v.is_finite())
            || c.low > c.high
            || c.low <= 0.0
            || c.volume < 0.0
    }) {
        bail!("Malformed candle at {}: {:?}", bad.timestamp, bad);
    }

    candles.sort_by_key(|c| c.timestamp);
    Ok(candles)
}
