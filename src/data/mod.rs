// Candle retrieval sits outside the core; this is the seam it plugs into.
mod provider;

pub use provider::{CandleSource, JsonFileSource};
