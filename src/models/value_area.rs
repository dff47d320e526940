use {
    serde::{Deserialize, Serialize},
    strum_macros::Display,
};

/// Point of Control plus the Value Area bounds, all as bucket midpoint prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueArea {
    pub poc_price: f64,
    pub poc_bucket_index: usize,
    pub vah_price: f64,
    pub val_price: f64,

    // Bucket indices of the expanded bounds and the volume they enclose
    pub upper_bucket_index: usize,
    pub lower_bucket_index: usize,
    pub enclosed_volume: f64,
}

/// Where spot sits relative to the value area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ZoneStatus {
    #[strum(to_string = "ABOVE VALUE (Bullish/Overextended)")]
    AboveValue,
    #[strum(to_string = "INSIDE VALUE")]
    InsideValue,
    #[strum(to_string = "BELOW VALUE (Bearish/Discount)")]
    BelowValue,
}

impl ValueArea {
    pub fn zone_status(&self, price: f64) -> ZoneStatus {
        if price > self.vah_price {
            ZoneStatus::AboveValue
        } else if price < self.val_price {
            ZoneStatus::BelowValue
        } else {
            ZoneStatus::InsideValue
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.zone_status(price) == ZoneStatus::InsideValue
    }
}
