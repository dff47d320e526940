// Result structures of the profiling pipeline.
// Plain data: built once per run, never mutated afterwards.

pub mod nodes;
pub mod ohlcv;
pub mod strength;
pub mod value_area;
pub mod volume_profile;

// Re-export key types for convenience
pub use nodes::NodeSet;
pub use ohlcv::CandleSeries;
pub use strength::{StrengthRecord, StrengthReport, TopLevels};
pub use value_area::{ValueArea, ZoneStatus};
pub use volume_profile::VolumeProfile;
