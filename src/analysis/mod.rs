// Profiling pipeline: histogram -> (value area, nodes) -> support strength
mod histogram;
mod node_detector;
mod pipeline;
mod support_strength;
mod value_area;

pub use histogram::build_histogram;
pub use node_detector::{detect_nodes, detect_nodes_with};
pub use pipeline::{MarketStructure, analyze};
pub use support_strength::{score_support_strength, score_support_strength_with};
pub use value_area::{locate_value_area, point_of_control};
