//! Global configuration constants and construction-time settings.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{core::aabb::Aabb, dynamics::integrator::IntegratorKind};

/// Default gravity vector applied in the physics world (Y-up).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.81, 0.0];

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Item count at which an octree leaf subdivides.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 10;

/// Recursion budget handed to the octree root on every insert.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Half extent of the default cubic world bounds, centred on the origin.
pub const DEFAULT_WORLD_HALF_SIZE: f32 = 52.0;

/// Upper bound on fixed steps run for a single rendered frame.
pub const DEFAULT_MAX_STEPS_PER_FRAME: usize = 8;

/// Default damping applied to linear velocity.
pub const DEFAULT_LINEAR_DAMPING: f32 = 0.0;

/// Budget for one fixed step before a warning is logged.
pub const DEFAULT_STEP_BUDGET_MS: f32 = 4.0;

/// Octree construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    pub world_bounds: Aabb,
    pub split_threshold: usize,
    pub max_depth: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            world_bounds: Aabb::new(Vec3::ZERO, Vec3::splat(DEFAULT_WORLD_HALF_SIZE)),
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl OctreeConfig {
    pub fn with_world_bounds(mut self, bounds: Aabb) -> Self {
        self.world_bounds = bounds;
        self
    }

    pub fn with_split_threshold(mut self, threshold: usize) -> Self {
        self.split_threshold = threshold;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Settings for a [`crate::world::PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub octree: OctreeConfig,
    pub time_step: f32,
    pub gravity: Vec3,
    pub max_steps_per_frame: usize,
    pub integrator: IntegratorKind,
    pub linear_damping: f32,
    pub step_budget_ms: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            octree: OctreeConfig::default(),
            time_step: DEFAULT_TIME_STEP,
            gravity: Vec3::from_array(DEFAULT_GRAVITY),
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            integrator: IntegratorKind::default(),
            linear_damping: DEFAULT_LINEAR_DAMPING,
            step_budget_ms: DEFAULT_STEP_BUDGET_MS,
        }
    }
}

impl WorldConfig {
    pub fn with_octree(mut self, octree: OctreeConfig) -> Self {
        self.octree = octree;
        self
    }

    /// Non-positive or non-finite steps fall back to [`DEFAULT_TIME_STEP`].
    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_max_steps_per_frame(mut self, steps: usize) -> Self {
        self.max_steps_per_frame = steps;
        self
    }

    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_step_budget_ms(mut self, budget_ms: f32) -> Self {
        self.step_budget_ms = budget_ms;
        self
    }

    pub fn effective_time_step(&self) -> f32 {
        if self.time_step.is_finite() && self.time_step > 0.0 {
            self.time_step
        } else {
            DEFAULT_TIME_STEP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_time_step_falls_back_to_default() {
        let config = WorldConfig::default().with_time_step(-1.0);
        assert_eq!(config.effective_time_step(), DEFAULT_TIME_STEP);

        let config = WorldConfig::default().with_time_step(f32::NAN);
        assert_eq!(config.effective_time_step(), DEFAULT_TIME_STEP);

        let config = WorldConfig::default().with_time_step(0.01);
        assert_eq!(config.effective_time_step(), 0.01);
    }

    #[test]
    fn octree_defaults_match_constants() {
        let config = OctreeConfig::default();
        assert_eq!(config.split_threshold, 10);
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.world_bounds.half_size, Vec3::splat(52.0));
    }
}
