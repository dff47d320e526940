//! Debugging feature flags.

pub struct LogFlags {
    /// Per-stage timing through `trace_time!`.
    pub log_performance: bool,

    /// Per-bucket dump of the histogram after binning.
    pub log_histogram: bool,
    /// Each step of the value-area expansion.
    pub log_value_area: bool,
    pub log_nodes: bool,
    /// Stage-by-stage strength values (volume, bounce, decay).
    pub log_strength: bool,
}

pub const DF: LogFlags = LogFlags {
    log_performance: false,

    log_histogram: false,
    log_value_area: false,
    log_nodes: false,
    log_strength: false,
};

pub const LOG_PERFORMANCE: bool = DF.log_performance;
