use log::warn;

/// Per-step context threaded through the tree builder, the detection pass
/// and the integrators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepContext {
    /// Fixed step duration in seconds.
    pub dt: f32,
    /// Number of fixed steps completed before this one.
    pub index: u64,
}

/// Fixed-timestep accumulator decoupling physics from the render clock.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time_step: f32,
    accumulated: f32,
    max_steps_per_frame: usize,
    step_index: u64,
}

impl FixedClock {
    pub fn new(time_step: f32, max_steps_per_frame: usize) -> Self {
        Self {
            time_step,
            accumulated: 0.0,
            max_steps_per_frame: max_steps_per_frame.max(1),
            step_index: 0,
        }
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    /// Adds a frame delta and returns how many fixed steps are due.
    ///
    /// Backlog beyond `max_steps_per_frame` is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> usize {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulated += frame_dt;
        }

        let due = (self.accumulated / self.time_step).floor() as usize;
        if due > self.max_steps_per_frame {
            warn!(
                "physics is {due} steps behind, dropping {} steps of backlog",
                due - self.max_steps_per_frame
            );
            self.accumulated %= self.time_step;
            return self.max_steps_per_frame;
        }

        self.accumulated -= due as f32 * self.time_step;
        self.accumulated = self.accumulated.max(0.0);
        due
    }

    /// Hands out the context for the next fixed step.
    pub fn next_step(&mut self) -> StepContext {
        let ctx = StepContext {
            dt: self.time_step,
            index: self.step_index,
        };
        self.step_index += 1;
        ctx
    }

    /// Fraction of a step left in the accumulator, for render interpolation.
    pub fn alpha(&self) -> f32 {
        (self.accumulated / self.time_step).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = FixedClock::new(0.1, 8);
        assert_eq!(clock.advance(0.05), 0);
        assert_abs_diff_eq!(clock.alpha(), 0.5, epsilon = 1e-5);
        assert_eq!(clock.advance(0.26), 3);
        assert_abs_diff_eq!(clock.alpha(), 0.1, epsilon = 1e-3);
    }

    #[test]
    fn drops_backlog_beyond_the_frame_cap() {
        let mut clock = FixedClock::new(0.1, 2);
        assert_eq!(clock.advance(5.0), 2);
        assert!(clock.alpha() < 1.0);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn ignores_invalid_deltas() {
        let mut clock = FixedClock::new(0.1, 2);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn step_contexts_are_numbered() {
        let mut clock = FixedClock::new(0.5, 1);
        assert_eq!(clock.next_step().index, 0);
        let second = clock.next_step();
        assert_eq!(second.index, 1);
        assert_eq!(second.dt, 0.5);
        assert_eq!(clock.step_index(), 2);
    }
}
