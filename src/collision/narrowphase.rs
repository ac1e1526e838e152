use glam::Vec3;

use crate::{
    collision::sdf::{box_normal, distance_to_box3, sphere_to_box, sphere_to_sphere},
    core::{aabb::octant_signs, scene::BodySnapshot, volume::VolumeShape},
};

/// Result of one pairwise test. `normal` points from the lhs shape toward the rhs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitRecord {
    pub hit: bool,
    pub position: Vec3,
    pub normal: Vec3,
}

impl HitRecord {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            hit: true,
            position,
            normal,
        }
    }

    pub fn miss() -> Self {
        Self::default()
    }

    fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Exact pairwise tests between bounding volumes, evaluated at the positions
/// both bodies reach after one fixed step.
pub struct NarrowPhase;

impl NarrowPhase {
    /// Dispatches on the shape pair. The reported normal always points from
    /// `lhs` toward `rhs`.
    pub fn collide(lhs: &BodySnapshot, rhs: &BodySnapshot, dt: f32) -> HitRecord {
        match (lhs.shape, rhs.shape) {
            (VolumeShape::Sphere { radius: ra }, VolumeShape::Sphere { radius: rb }) => {
                Self::sphere_sphere(lhs, ra, rhs, rb, dt)
            }
            (VolumeShape::Box { .. }, VolumeShape::Sphere { radius }) => {
                Self::box_sphere(lhs, rhs, radius, dt)
            }
            // The box computes its outward normal, which points into the sphere.
            (VolumeShape::Sphere { radius }, VolumeShape::Box { .. }) => {
                Self::box_sphere(rhs, lhs, radius, dt).flipped()
            }
            (VolumeShape::Box { .. }, VolumeShape::Box { .. }) => Self::box_box(lhs, rhs, dt),
        }
    }

    pub fn sphere_sphere(
        a: &BodySnapshot,
        radius_a: f32,
        b: &BodySnapshot,
        radius_b: f32,
        dt: f32,
    ) -> HitRecord {
        let point_a = a.swept_center(dt);
        let point_b = b.swept_center(dt);
        if sphere_to_sphere(point_a, radius_a, point_b, radius_b) > 0.0 {
            return HitRecord::miss();
        }

        // Coincident centres have no defined axis.
        let normal = (point_b - point_a).try_normalize().unwrap_or(Vec3::Y);
        HitRecord::new(point_a + normal * radius_a, normal)
    }

    /// Box against sphere with the normal pointing out of the box.
    pub fn box_sphere(
        box_body: &BodySnapshot,
        sphere: &BodySnapshot,
        radius: f32,
        dt: f32,
    ) -> HitRecord {
        let half_size = box_body.shape.scaled_half_size(&box_body.transform);
        let relative = (sphere.velocity - box_body.velocity) * dt;
        let local = box_body
            .transform
            .to_local(sphere.transform.position + relative);

        if sphere_to_box(local, radius, half_size) > 0.0 {
            return HitRecord::miss();
        }

        let normal = box_body.transform.rotation * box_normal(local, half_size);
        HitRecord::new(sphere.swept_center(dt) - normal * radius, normal)
    }

    /// Corners of `b` that end up inside `a` after the relative motion of the
    /// step. All records share one normal: the face of `a` nearest to `b`'s centre.
    pub fn box_corners_in_box(a: &BodySnapshot, b: &BodySnapshot, dt: f32) -> Vec<HitRecord> {
        let half_a = a.shape.scaled_half_size(&a.transform);
        let half_b = b.shape.scaled_half_size(&b.transform);
        let center_b = b.transform.position + (b.velocity - a.velocity) * dt;
        let a_motion = a.velocity * dt;

        let normal = a.transform.rotation * box_normal(a.transform.to_local(center_b), half_a);

        (0..8)
            .filter_map(|corner| {
                let world = center_b + b.transform.rotation * (octant_signs(corner) * half_b);
                let local = a.transform.to_local(world);
                (distance_to_box3(local, half_a) == Vec3::ZERO)
                    .then(|| HitRecord::new(a.transform.to_world(local) + a_motion, normal))
            })
            .collect()
    }

    /// Corner sampling from both frames, averaged into one contact.
    pub fn box_box(a: &BodySnapshot, b: &BodySnapshot, dt: f32) -> HitRecord {
        let mut records = Self::box_corners_in_box(a, b, dt);
        records.extend(
            Self::box_corners_in_box(b, a, dt)
                .into_iter()
                .map(HitRecord::flipped),
        );

        if records.is_empty() {
            return HitRecord::miss();
        }

        let count = records.len() as f32;
        let position = records.iter().map(|r| r.position).sum::<Vec3>() / count;
        let normal = records.iter().map(|r| r.normal).sum::<Vec3>() / count;
        let normal = normal
            .try_normalize()
            .or_else(|| (b.swept_center(dt) - a.swept_center(dt)).try_normalize())
            .unwrap_or(Vec3::Y);

        HitRecord::new(position, normal)
    }
}
