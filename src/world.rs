use std::time::Instant;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    collision::{
        broadphase::TreeBuilder, detection::CollisionDetection, events::HitEvent, octree::Octree,
    },
    config::WorldConfig,
    core::{
        aabb::Aabb,
        clock::FixedClock,
        scene::{BodySnapshot, Scene},
        types::Transform,
    },
    dynamics::{
        forces::{ForceGenerator, ForceRegistry, GravityForce},
        integrator::Integrator,
        response::CollisionResponse,
    },
    utils::{
        allocator::EntityId,
        logging::warn_if_step_budget_exceeded,
        profiling::{StageTimer, StepProfiler},
    },
};

/// One octree region prepared for wireframe drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugRegion {
    pub bounds: Aabb,
    pub depth: usize,
    pub item_count: usize,
    /// Bounds of the items stored at this node; empty unless requested.
    pub item_bounds: Vec<Aabb>,
}

/// Central simulation container running the fixed-step collision pipeline.
pub struct PhysicsWorld {
    scene: Scene,
    config: WorldConfig,
    tree: Octree<BodySnapshot>,
    clock: FixedClock,
    integrator: Integrator,
    forces: ForceRegistry,
    parallel_enabled: bool,
    profiler: StepProfiler,
    last_hits: Vec<HitEvent>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl PhysicsWorld {
    pub fn new(config: WorldConfig) -> Self {
        let time_step = config.effective_time_step();
        let mut forces = ForceRegistry::new();
        if config.gravity != Vec3::ZERO {
            forces.add_force(GravityForce::new(config.gravity));
        }

        Self {
            scene: Scene::new(),
            tree: Octree::from_config(&config.octree),
            clock: FixedClock::new(time_step, config.max_steps_per_frame),
            integrator: Integrator::new(config.integrator, config.linear_damping),
            forces,
            parallel_enabled: false,
            profiler: StepProfiler::default(),
            last_hits: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn spawn(&mut self, transform: Transform) -> EntityId {
        self.scene.spawn(transform)
    }

    pub fn despawn(&mut self, entity: EntityId) -> bool {
        self.scene.despawn(entity)
    }

    pub fn make_physics_object(
        &mut self,
        entity: EntityId,
        initial_velocity: Vec3,
        mass: f32,
        bounciness: f32,
    ) -> bool {
        CollisionResponse::make_physics_object(
            &mut self.scene,
            entity,
            initial_velocity,
            mass,
            bounciness,
        )
    }

    pub fn make_bounding_sphere(&mut self, entity: EntityId, is_dynamic: bool, radius: f32) -> bool {
        CollisionResponse::make_bounding_sphere(&mut self.scene, entity, is_dynamic, radius)
    }

    pub fn make_bounding_box(
        &mut self,
        entity: EntityId,
        is_dynamic: bool,
        half_size: Vec3,
    ) -> bool {
        CollisionResponse::make_bounding_box(&mut self.scene, entity, is_dynamic, half_size)
    }

    /// Registers an extra force applied to every body at the start of each step.
    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.forces.add_force(force);
    }

    /// Runs detection on the rayon pool. Without the `parallel` feature the
    /// flag is recorded but detection stays sequential.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        if enabled && !cfg!(feature = "parallel") {
            log::warn!("parallel detection requested but the `parallel` feature is disabled");
        }
        self.parallel_enabled = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    /// Advances the simulation by a rendered frame's delta. Returns the number
    /// of fixed steps run.
    pub fn step(&mut self, frame_dt: f32) -> usize {
        let due = self.clock.advance(frame_dt);
        for _ in 0..due {
            self.fixed_step();
        }
        due
    }

    /// Runs exactly one fixed step of the pipeline.
    pub fn fixed_step(&mut self) {
        let ctx = self.clock.next_step();
        let started = Instant::now();
        let mut profile = StepProfiler::default();

        self.forces.apply_all(&mut self.scene);

        {
            let _timer = StageTimer::new(&mut profile.tree_build_time);
            profile.entity_count = TreeBuilder::rebuild(&mut self.tree, &self.scene, &ctx);
        }
        profile.node_count = self.tree.node_count();
        profile.unbound_count = self.tree.unbound_items().len();

        let output = {
            let _timer = StageTimer::new(&mut profile.detection_time);
            CollisionDetection::detect(&self.tree, &self.scene, &ctx, self.parallel_enabled)
        };
        profile.candidate_count = output.candidate_count;
        profile.hit_count = output.events.len();

        {
            let _timer = StageTimer::new(&mut profile.broadcast_time);
            CollisionDetection::broadcast(&output.events, &mut self.scene);
        }

        {
            let _timer = StageTimer::new(&mut profile.integrator_time);
            self.integrator.step(&mut self.scene, &ctx);
        }

        profile.total_step_time = started.elapsed();
        warn_if_step_budget_exceeded(profile.total_step_time, self.config.step_budget_ms);

        self.profiler = profile;
        self.last_hits = output.events;
    }

    /// Broad-phase tree as built by the most recent step.
    pub fn tree(&self) -> &Octree<BodySnapshot> {
        &self.tree
    }

    /// Hit events delivered during the most recent step, in delivery order.
    pub fn last_hits(&self) -> &[HitEvent] {
        &self.last_hits
    }

    pub fn profiler(&self) -> &StepProfiler {
        &self.profiler
    }

    pub fn interpolation_alpha(&self) -> f32 {
        self.clock.alpha()
    }

    pub fn step_index(&self) -> u64 {
        self.clock.step_index()
    }

    /// Regions of the current tree, depth-first from the root.
    pub fn debug_regions(&self, include_items: bool) -> Vec<DebugRegion> {
        let mut regions = Vec::with_capacity(self.tree.node_count());
        self.tree.walk(|node, depth| {
            let item_bounds = if include_items {
                node.items().iter().map(|package| package.bounds).collect()
            } else {
                Vec::new()
            };
            regions.push(DebugRegion {
                bounds: *node.bounds(),
                depth,
                item_count: node.items().len(),
                item_bounds,
            });
        });
        regions
    }
}
