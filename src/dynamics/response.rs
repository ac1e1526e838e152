use glam::Vec3;
use log::warn;

use crate::{
    collision::events::HitEvent,
    core::{
        scene::{ComponentMap, Scene},
        types::PhysicsBody,
        volume::{BoundingVolume, VolumeShape},
    },
    utils::allocator::EntityId,
};

/// Impulse-based reaction to hit notifications, plus the factories that make
/// entities collidable.
pub struct CollisionResponse;

impl CollisionResponse {
    /// Attaches a dynamic-body component unless one is already present.
    pub fn make_physics_object(
        scene: &mut Scene,
        entity: EntityId,
        initial_velocity: Vec3,
        mass: f32,
        bounciness: f32,
    ) -> bool {
        if !scene.contains(entity) {
            warn!("make_physics_object: unknown entity {entity:?}");
            return false;
        }
        if scene.bodies.contains_key(&entity) {
            return false;
        }
        scene
            .bodies
            .insert(entity, PhysicsBody::new(initial_velocity, mass, bounciness));
        true
    }

    pub fn make_bounding_sphere(
        scene: &mut Scene,
        entity: EntityId,
        is_dynamic: bool,
        radius: f32,
    ) -> bool {
        Self::attach_volume(scene, entity, is_dynamic, VolumeShape::Sphere { radius })
    }

    pub fn make_bounding_box(
        scene: &mut Scene,
        entity: EntityId,
        is_dynamic: bool,
        half_size: Vec3,
    ) -> bool {
        Self::attach_volume(scene, entity, is_dynamic, VolumeShape::Box { half_size })
    }

    /// Dynamic volumes get [`CollisionResponse::on_hit`] subscribed to their channel.
    fn attach_volume(
        scene: &mut Scene,
        entity: EntityId,
        is_dynamic: bool,
        shape: VolumeShape,
    ) -> bool {
        if !scene.contains(entity) {
            warn!("bounding volume requested for unknown entity {entity:?}");
            return false;
        }
        if scene.volumes.contains_key(&entity) {
            return false;
        }

        let mut volume = BoundingVolume::new(shape);
        if is_dynamic {
            volume.channel_mut().subscribe(Self::on_hit);
        }
        scene.volumes.insert(entity, volume);
        true
    }

    /// Channel subscriber: picks the static or two-body response depending on
    /// whether the other entity has a dynamic body.
    pub fn on_hit(event: &HitEvent, bodies: &mut ComponentMap<PhysicsBody>) {
        if !bodies.contains_key(&event.entity) {
            return;
        }

        match bodies.get(&event.other).copied() {
            Some(mut other) => {
                let Some(body) = bodies.get_mut(&event.entity) else {
                    return;
                };
                Self::dynamic_response(body, &mut other, event.normal);
                bodies.insert(event.other, other);
            }
            None => {
                if let Some(body) = bodies.get_mut(&event.entity) {
                    Self::static_response(body, -event.normal);
                }
            }
        }
    }

    /// Bounce off immovable geometry.
    ///
    /// `surface_normal` points from the surface toward the body. An approaching
    /// body gets `j = -(1 + bounciness) * vn / inverse_mass`, which replaces the
    /// normal velocity component with `j * inverse_mass`. Applied force that
    /// pushes into the surface is cancelled.
    pub fn static_response(body: &mut PhysicsBody, surface_normal: Vec3) {
        let Some(normal) = surface_normal.try_normalize() else {
            return;
        };

        let normal_speed = body.velocity.dot(normal);
        if normal_speed < 0.0 && body.inverse_mass > 0.0 {
            let impulse = -(1.0 + body.bounciness) * normal_speed / body.inverse_mass;
            body.velocity += normal * (impulse * body.inverse_mass - normal_speed);
        }

        let pushing = body.force.dot(normal);
        if pushing < 0.0 {
            body.force -= normal * pushing;
        }
    }

    /// Symmetric two-body impulse along `normal` (pointing from `a` to `b`)
    /// with averaged bounciness. Separating pairs are left alone.
    pub fn dynamic_response(a: &mut PhysicsBody, b: &mut PhysicsBody, normal: Vec3) {
        let Some(normal) = normal.try_normalize() else {
            return;
        };

        let approach = (b.velocity - a.velocity).dot(normal);
        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if approach >= 0.0 || inverse_mass_sum <= 0.0 {
            return;
        }

        let bounciness = 0.5 * (a.bounciness + b.bounciness);
        let impulse = -(1.0 + bounciness) * approach / inverse_mass_sum;
        a.velocity -= normal * impulse * a.inverse_mass;
        b.velocity += normal * impulse * b.inverse_mass;
    }
}
