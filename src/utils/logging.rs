use log::{log_enabled, warn, Level};
use std::time::{Duration, Instant};

/// Traces how long a pipeline stage took once the guard drops.
///
/// The clock only runs while trace logging is enabled.
pub struct ScopedTimer {
    stage: &'static str,
    start: Option<Instant>,
}

impl ScopedTimer {
    pub fn new(stage: &'static str) -> Self {
        let start = log_enabled!(Level::Trace).then(Instant::now);
        Self { stage, start }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(start) = self.start {
            log::trace!(
                target: "octree_physics::stage",
                "{} took {} µs",
                self.stage,
                start.elapsed().as_micros()
            );
        }
    }
}

/// Logs a warning when a fixed step ran longer than its budget.
pub fn warn_if_step_budget_exceeded(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms > budget_ms {
        warn!("Fixed step exceeded budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        return true;
    }
    false
}
