use {
    crate::domain::Candle,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Time-ordered OHLCV snapshot for a single instrument, stored column-wise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CandleSeries {
    pub symbol: String,
    pub timestamps: Vec<DateTime<Utc>>,
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl CandleSeries {
    pub fn from_candles(symbol: impl Into<String>, candles: Vec<Candle>) -> Self {
        let len = candles.len();

        let mut ts_vec = Vec::with_capacity(len);
        let mut open_vec = Vec::with_capacity(len);
        let mut high_vec = Vec::with_capacity(len);
        let mut low_vec = Vec::with_capacity(len);
        let mut close_vec = Vec::with_capacity(len);
        let mut vol_vec = Vec::with_capacity(len);

        for c in candles {
            ts_vec.push(c.timestamp);
            open_vec.push(c.open);
            high_vec.push(c.high);
            low_vec.push(c.low);
            close_vec.push(c.close);
            vol_vec.push(c.volume);
        }

        Self {
            symbol: symbol.into(),
            timestamps: ts_vec,
            open_prices: open_vec,
            high_prices: high_vec,
            low_prices: low_vec,
            close_prices: close_vec,
            volumes: vol_vec,
        }
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.timestamps[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        )
    }

    pub fn klines(&self) -> usize {
        self.close_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.klines() == 0
    }

    pub fn candles(&self) -> impl Iterator<Item = Candle> + '_ {
        (0..self.klines()).map(|i| self.get_candle(i))
    }

    /// Lowest Low and highest High over the whole series. None when empty.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let min = self.low_prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .high_prices
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    pub fn total_volume(&self) -> f64 {
        self.volumes.iter().sum()
    }

    /// Most recent close, used as spot when no live price is supplied.
    pub fn latest_close(&self) -> Option<f64> {
        self.close_prices.last().copied()
    }

    /// Number of candles whose Low lies within `tolerance` of `price`, inclusive.
    pub fn count_low_touches(&self, price: f64, tolerance: f64) -> usize {
        self.low_prices
            .iter()
            .filter(|&&low| low >= price - tolerance && low <= price + tolerance)
            .count()
    }
}
