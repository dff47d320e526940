use serde::{Deserialize, Serialize};

/// High and Low Volume Nodes as midpoint prices, each in ascending bucket order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSet {
    pub hvn_prices: Vec<f64>,
    pub lvn_prices: Vec<f64>,
}

impl NodeSet {
    pub fn is_empty(&self) -> bool {
        self.hvn_prices.is_empty() && self.lvn_prices.is_empty()
    }
}
