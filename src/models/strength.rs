use {
    itertools::Itertools,
    serde::{Deserialize, Serialize},
};

/// Composite support strength for one seeded price bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthRecord {
    pub bucket_index: usize,
    pub price: f64,
    /// Volume x bounce factor x distance decay.
    pub raw_strength: f64,
    /// Min-max scaled to [0, 100], rounded to 2 decimals.
    pub normalized: f64,
    /// Population z-score of `raw_strength` across all seeded buckets.
    pub z_score: f64,
    /// Competition rank on `normalized`, 1 = strongest.
    pub rank: usize,
    pub touch_count: usize,
}

/// Full scored set plus the filtered strongest tier, both in ascending price order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthReport {
    pub records: Vec<StrengthRecord>,
    /// Records at or above `threshold`, re-ranked among themselves.
    pub top_tier: Vec<StrengthRecord>,
    pub threshold: f64,
}

/// Output of [`StrengthReport::get_top_n`], ordered by rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopLevels {
    pub levels: Vec<f64>,
    pub scores: Vec<f64>,
    pub ranks: Vec<usize>,
}

impl TopLevels {
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl StrengthReport {
    /// The `n` best-ranked levels of the top tier.
    /// With `below_price`, only levels strictly below it qualify (supports under spot).
    /// Equal ranks keep ascending price order.
    pub fn get_top_n(&self, n: usize, below_price: Option<f64>) -> TopLevels {
        let picked = self.top_n_records(n, below_price);

        TopLevels {
            levels: picked.iter().map(|r| r.price).collect(),
            scores: picked.iter().map(|r| r.normalized).collect(),
            ranks: picked.iter().map(|r| r.rank).collect(),
        }
    }

    /// Same selection as [`get_top_n`](Self::get_top_n), keeping the whole records.
    pub fn top_n_records(&self, n: usize, below_price: Option<f64>) -> Vec<&StrengthRecord> {
        self.top_tier
            .iter()
            .filter(|r| below_price.is_none_or(|limit| r.price < limit))
            .sorted_by_key(|r| r.rank)
            .take(n)
            .collect()
    }

    /// Highest-ranked record of the full set (lowest price among ties).
    pub fn strongest(&self) -> Option<&StrengthRecord> {
        self.records.iter().min_by_key(|r| r.rank)
    }
}
