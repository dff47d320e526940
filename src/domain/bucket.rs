use serde::{Deserialize, Serialize};

/// One fixed-width price interval of the histogram partition.
/// `index` is 1-based and grows with price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub index: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub midpoint_price: f64,
}

/// Equal-width partition of `[price_min, price_max]` into `n_bins` contiguous buckets.
/// Buckets are addressed by their 1-based index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketTable {
    pub price_min: f64,
    pub price_max: f64,
    edges: Vec<f64>,
    buckets: Vec<PriceBucket>,
}

impl BucketTable {
    /// Caller guarantees `n_bins > 0` and `price_min < price_max`.
    pub(crate) fn new(price_min: f64, price_max: f64, n_bins: usize) -> Self {
        let width = (price_max - price_min) / n_bins as f64;
        let mut edges: Vec<f64> = (0..=n_bins)
            .map(|i| price_min + i as f64 * width)
            .collect();
        // Pin the top edge so accumulated float error never leaves price_max outside.
        edges[n_bins] = price_max;

        let buckets = edges
            .windows(2)
            .enumerate()
            .map(|(i, pair)| PriceBucket {
                index: i + 1,
                lower_bound: pair[0],
                upper_bound: pair[1],
                midpoint_price: (pair[0] + pair[1]) / 2.0,
            })
            .collect();

        Self {
            price_min,
            price_max,
            edges,
            buckets,
        }
    }

    pub fn n_bins(&self) -> usize {
        self.buckets.len()
    }

    pub fn bin_width(&self) -> f64 {
        (self.price_max - self.price_min) / self.n_bins() as f64
    }

    pub fn get(&self, index: usize) -> Option<&PriceBucket> {
        index.checked_sub(1).and_then(|i| self.buckets.get(i))
    }

    /// Midpoint price of a bucket, None when the index is outside `[1, n_bins]`.
    pub fn midpoint(&self, index: usize) -> Option<f64> {
        self.get(index).map(|b| b.midpoint_price)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceBucket> {
        self.buckets.iter()
    }

    /// Right-open digitize: a price on an interior edge belongs to the bucket above it,
    /// `price_min` maps to bucket 1 and `price_max` to bucket `n_bins`.
    /// Returns None for prices outside the partitioned range.
    pub fn bucket_index(&self, price: f64) -> Option<usize> {
        if !(price >= self.price_min && price <= self.price_max) {
            return None;
        }
        let n_bins = self.n_bins();
        let lower_edges = &self.edges[..n_bins];
        let idx = lower_edges.partition_point(|&edge| edge <= price);
        Some(idx.clamp(1, n_bins))
    }

    /// Inclusive range of bucket indices intersecting `[low, high]`, clamped to the partition.
    pub fn intersecting(&self, low: f64, high: f64) -> Option<(usize, usize)> {
        let lo = low.max(self.price_min);
        let hi = high.min(self.price_max);
        if lo > hi {
            return None;
        }
        Some((self.bucket_index(lo)?, self.bucket_index(hi)?))
    }
}
