mod maths_utils;
mod perf;

pub(crate) use maths_utils::get_max;
pub use maths_utils::{competition_rank_desc, quantile_linear, remap, round_to, smooth_data};
