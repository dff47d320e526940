/// Times an analysis stage when `LOG_PERFORMANCE` is on.
///
/// Every run is logged at debug level under the `perf` target; a stage that
/// overruns its budget (whole milliseconds) is raised to a warning.
/// With the flag off the block runs untouched.
#[macro_export]
macro_rules! trace_time {
    ($stage:expr, $budget_ms:expr, $block:block) => {{
        if $crate::config::LOG_PERFORMANCE {
            let started = std::time::Instant::now();
            let result = $block;
            let elapsed = started.elapsed();
            let budget = std::time::Duration::from_millis($budget_ms);
            if elapsed > budget {
                log::warn!(
                    target: "perf",
                    "stage '{}' over budget: {:?} (budget {:?})",
                    $stage,
                    elapsed,
                    budget
                );
            } else {
                log::debug!(target: "perf", "stage '{}' took {:?}", $stage, elapsed);
            }
            result
        } else {
            $block
        }
    }};
}
