use serde::{Deserialize, Serialize};

/// Accumulated volume per price bucket. Every index in `[1, n_bins]` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    // Slot 0 holds bucket 1
    volumes: Vec<f64>,
    total_volume: f64,
}

impl VolumeProfile {
    pub(crate) fn new(volumes: Vec<f64>) -> Self {
        let total_volume = volumes.iter().sum();
        Self {
            volumes,
            total_volume,
        }
    }

    pub fn n_bins(&self) -> usize {
        self.volumes.len()
    }

    /// Volume at a 1-based bucket index; 0 for indices outside the partition.
    #[inline]
    pub fn volume(&self, index: usize) -> f64 {
        index
            .checked_sub(1)
            .and_then(|i| self.volumes.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    /// Volumes ordered by bucket index.
    pub fn as_slice(&self) -> &[f64] {
        &self.volumes
    }

    /// `(bucket_index, volume)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.volumes.iter().enumerate().map(|(i, &v)| (i + 1, v))
    }

    pub fn has_volume(&self) -> bool {
        self.volumes.iter().any(|&v| v > 0.0)
    }
}
