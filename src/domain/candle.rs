use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// One OHLCV bar. Prices are positive; volume is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    pub volume: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Candle {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// High - Low
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, close: f64, low: f64) -> Candle {
        Candle::new(DateTime::<Utc>::UNIX_EPOCH, open, open.max(close), low, close, 1.0)
    }

    #[test]
    fn range_spans_low_to_high() {
        let c = bar(100.0, 101.0, 99.5);
        assert!((c.range() - 1.5).abs() < 1e-12);
    }
}
