use std::time::{Duration, Instant};

/// Timing and population counters for the most recent fixed step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfiler {
    pub tree_build_time: Duration,
    pub detection_time: Duration,
    pub broadcast_time: Duration,
    pub integrator_time: Duration,
    pub total_step_time: Duration,

    pub entity_count: usize,
    pub node_count: usize,
    pub unbound_count: usize,
    pub candidate_count: usize,
    pub hit_count: usize,
}

impl StepProfiler {
    /// Writes the step profile through `log::info!`.
    pub fn report(&self) {
        let total_us = self.total_step_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        let share = |stage: Duration| (stage.as_micros() as f32 / total_us) * 100.0;

        log::info!(
            "physics step: {:.2} ms, entities {}, nodes {}, unbound {}, candidates {}, hits {}",
            self.total_step_time.as_secs_f32() * 1000.0,
            self.entity_count,
            self.node_count,
            self.unbound_count,
            self.candidate_count,
            self.hit_count
        );
        log::info!(
            "  tree build {:.1}% | detection {:.1}% | broadcast {:.1}% | integrator {:.1}%",
            share(self.tree_build_time),
            share(self.detection_time),
            share(self.broadcast_time),
            share(self.integrator_time)
        );
    }
}

/// Adds the lifetime of the guard to the referenced duration.
pub struct StageTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> StageTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl Drop for StageTimer<'_> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
