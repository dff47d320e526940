//! Analysis and computation configuration

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{ProfileError, ProfileResult};

/// How a candle's volume is placed into the price histogram.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum VolumeDistribution {
    /// Whole candle volume lands in the bucket holding the Close.
    /// Known approximation: intrabar volume is not spread across High-Low.
    #[default]
    Close,
    /// Volume is spread evenly over every bucket the candle's [Low, High] touches.
    HighLow,
}

/// The Master Profile Configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    // Histogram resolution (number of equal-width price buckets)
    pub n_bins: usize,

    // Fraction of total volume the value area must enclose, in (0, 1]
    pub va_fraction: f64,

    /// Relative band around a level (fraction of price) inside which a candle Low counts as a touch.
    pub bounce_tolerance_ratio: f64,
    /// Flat boost added per touch (0.1 = +10% strength per touch). Uncapped.
    pub bounce_weight: f64,

    /// Steepness of the exp(-k * relative distance) proximity decay.
    pub decay_constant: f64,

    /// Percentile cutoff for the strongest tier, in [0, 1). 0.70 keeps the top 30%.
    pub top_percentile: f64,

    // Node detection
    pub prominence_ratio: f64,
    pub max_smoothing_window: usize,

    pub distribution: VolumeDistribution,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        PROFILE
    }
}

impl ProfileConfig {
    /// Rejects out-of-range option values before any stage runs.
    pub fn validate(&self) -> ProfileResult<()> {
        if self.n_bins == 0 {
            return Err(ProfileError::Configuration(
                "n_bins must be a positive integer".to_string(),
            ));
        }
        if !self.va_fraction.is_finite() || self.va_fraction <= 0.0 || self.va_fraction > 1.0 {
            return Err(ProfileError::Configuration(format!(
                "va_fraction must be in (0, 1], got {}",
                self.va_fraction
            )));
        }
        if !self.bounce_tolerance_ratio.is_finite() || self.bounce_tolerance_ratio <= 0.0 {
            return Err(ProfileError::Configuration(format!(
                "bounce_tolerance_ratio must be a positive fraction, got {}",
                self.bounce_tolerance_ratio
            )));
        }
        if !self.bounce_weight.is_finite() || self.bounce_weight < 0.0 {
            return Err(ProfileError::Configuration(format!(
                "bounce_weight must be non-negative, got {}",
                self.bounce_weight
            )));
        }
        if !self.decay_constant.is_finite() || self.decay_constant <= 0.0 {
            return Err(ProfileError::Configuration(format!(
                "decay_constant must be positive, got {}",
                self.decay_constant
            )));
        }
        if !self.top_percentile.is_finite()
            || self.top_percentile < 0.0
            || self.top_percentile >= 1.0
        {
            return Err(ProfileError::Configuration(format!(
                "top_percentile must be in [0, 1), got {}",
                self.top_percentile
            )));
        }
        if !self.prominence_ratio.is_finite() || self.prominence_ratio < 0.0 {
            return Err(ProfileError::Configuration(format!(
                "prominence_ratio must be non-negative, got {}",
                self.prominence_ratio
            )));
        }
        Ok(())
    }
}

pub const PROFILE: ProfileConfig = ProfileConfig {
    n_bins: 100,
    va_fraction: 0.70,

    bounce_tolerance_ratio: 0.002, // +-0.2% band
    bounce_weight: 0.1,

    // A level 20% away from spot keeps e^-1 of its weight
    decay_constant: 5.0,

    top_percentile: 0.70,

    prominence_ratio: 0.05, // 5% of the profile max
    max_smoothing_window: 11,

    distribution: VolumeDistribution::Close,
};
