//! Octree Physics – broad-phase partitioning and impulse collisions for Rust.
//!
//! Every fixed step rebuilds an adaptive octree over the swept bounds of all
//! collidable entities, runs exact sphere/box overlap tests against the
//! candidates it returns, notifies each entity's hit channel, and resolves the
//! contacts with impulses before integrating.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod utils;
pub mod world;

pub use glam::{Mat3, Mat4, Quat, Vec3};

pub use collision::{
    broadphase::TreeBuilder,
    detection::{CollisionDetection, DetectionOutput},
    events::{ContactRecorder, HitCallback, HitChannel, HitEvent, SubscriptionId},
    narrowphase::{HitRecord, NarrowPhase},
    octree::{Node, Octree, Package},
};
pub use config::{OctreeConfig, WorldConfig};
pub use crate::core::{
    aabb::Aabb,
    clock::{FixedClock, StepContext},
    scene::{BodySnapshot, ComponentMap, Scene},
    types::{PhysicsBody, Transform},
    volume::{BoundingVolume, VolumeShape},
};
pub use dynamics::{
    forces::{DragForce, ForceGenerator, ForceRegistry, GravityForce},
    integrator::{Integrator, IntegratorKind},
    response::CollisionResponse,
};
pub use utils::{
    allocator::{Arena, EntityId},
    profiling::StepProfiler,
};
pub use world::{DebugRegion, PhysicsWorld};

/// High-level convenience wrapper that owns a [`PhysicsWorld`].
pub struct PhysicsEngine {
    world: PhysicsWorld,
}

impl PhysicsEngine {
    /// Creates an engine with default settings and the provided fixed timestep.
    pub fn new(timestep: f32) -> Self {
        Self::with_config(WorldConfig::default().with_time_step(timestep))
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            world: PhysicsWorld::new(config),
        }
    }

    /// Spawns a dynamic sphere and returns its [`EntityId`].
    pub fn add_sphere(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        radius: f32,
        mass: f32,
        bounciness: f32,
    ) -> EntityId {
        let entity = self.world.spawn(Transform::from_position(position));
        self.world
            .make_physics_object(entity, velocity, mass, bounciness);
        self.world.make_bounding_sphere(entity, true, radius);
        entity
    }

    /// Spawns immovable box geometry and returns its [`EntityId`].
    pub fn add_static_box(&mut self, transform: Transform, half_size: Vec3) -> EntityId {
        let entity = self.world.spawn(transform);
        self.world.make_bounding_box(entity, false, half_size);
        entity
    }

    /// Advances the simulation by the provided frame delta. Returns the number
    /// of fixed steps run.
    pub fn step(&mut self, dt: f32) -> usize {
        self.world.step(dt)
    }

    /// Enables or disables parallel narrow-phase detection.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.world.set_parallel_enabled(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.world.parallel_enabled()
    }

    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.world.scene().transform(id).map(|t| t.position)
    }

    pub fn body(&self, id: EntityId) -> Option<&PhysicsBody> {
        self.world.scene().body(id)
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }
}
