//! Configuration module for the profile analyzer.

// Can all be private now because we have a public re-export.
mod analysis;
mod debug;

// Re-export commonly used items
pub use analysis::{PROFILE, ProfileConfig, VolumeDistribution};
pub use debug::{DF, LOG_PERFORMANCE};
