use std::collections::BTreeMap;

use glam::Vec3;

use super::{
    types::{PhysicsBody, Transform},
    volume::{BoundingVolume, VolumeShape},
};
use crate::utils::allocator::{Arena, EntityId};

/// Ordered component storage; iteration follows entity id order.
pub type ComponentMap<T> = BTreeMap<EntityId, T>;

/// Copy of everything the collision passes need to know about one collidable
/// entity at the start of a step. This is the payload stored in the octree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub entity: EntityId,
    pub shape: VolumeShape,
    pub transform: Transform,
    pub velocity: Vec3,
}

/// Entity and component storage for a simulation.
///
/// Every entity owns a transform; dynamic bodies and bounding volumes are
/// optional components keyed by the same id.
#[derive(Debug, Default)]
pub struct Scene {
    pub transforms: Arena<Transform>,
    pub bodies: ComponentMap<PhysicsBody>,
    pub volumes: ComponentMap<BoundingVolume>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, transform: Transform) -> EntityId {
        self.transforms.insert(transform)
    }

    /// Removes the entity and all of its components.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        self.bodies.remove(&entity);
        self.volumes.remove(&entity);
        self.transforms.remove(entity).is_some()
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.transforms.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn transform(&self, entity: EntityId) -> Option<&Transform> {
        self.transforms.get(entity)
    }

    pub fn transform_mut(&mut self, entity: EntityId) -> Option<&mut Transform> {
        self.transforms.get_mut(entity)
    }

    pub fn body(&self, entity: EntityId) -> Option<&PhysicsBody> {
        self.bodies.get(&entity)
    }

    pub fn body_mut(&mut self, entity: EntityId) -> Option<&mut PhysicsBody> {
        self.bodies.get_mut(&entity)
    }

    pub fn volume(&self, entity: EntityId) -> Option<&BoundingVolume> {
        self.volumes.get(&entity)
    }

    pub fn volume_mut(&mut self, entity: EntityId) -> Option<&mut BoundingVolume> {
        self.volumes.get_mut(&entity)
    }

    /// Velocity of the entity; static geometry (no body) reports zero.
    pub fn velocity_of(&self, entity: EntityId) -> Vec3 {
        self.bodies
            .get(&entity)
            .map_or(Vec3::ZERO, |body| body.velocity)
    }

    pub fn snapshot(&self, entity: EntityId) -> Option<BodySnapshot> {
        let volume = self.volumes.get(&entity)?;
        let transform = self.transforms.get(entity)?;
        Some(BodySnapshot {
            entity,
            shape: volume.shape,
            transform: *transform,
            velocity: self.velocity_of(entity),
        })
    }

    /// Snapshots of every collidable entity, in id order.
    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.volumes
            .keys()
            .filter_map(|entity| self.snapshot(*entity))
            .collect()
    }
}
