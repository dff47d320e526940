// Domain types and value objects
mod bucket;
mod candle;

// Re-export commonly used types to the world
pub use bucket::{BucketTable, PriceBucket};
pub use candle::Candle;
