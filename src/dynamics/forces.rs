use glam::Vec3;

use crate::core::{
    scene::Scene,
    types::{PhysicsBody, Transform},
};

/// Source of force accumulated into dynamic bodies at the start of a step.
pub trait ForceGenerator: Send + Sync {
    fn apply(&self, transform: &Transform, body: &mut PhysicsBody);
}

/// Uniform gravitational field, scaled by each body's mass.
#[derive(Debug, Clone, Copy)]
pub struct GravityForce {
    pub gravity: Vec3,
}

impl GravityForce {
    pub fn new(gravity: Vec3) -> Self {
        Self { gravity }
    }
}

impl ForceGenerator for GravityForce {
    fn apply(&self, _transform: &Transform, body: &mut PhysicsBody) {
        if body.inverse_mass == 0.0 {
            return;
        }
        body.apply_force(self.gravity * body.mass);
    }
}

/// Quadratic drag resisting the direction of motion.
#[derive(Debug, Clone, Copy)]
pub struct DragForce {
    pub drag_coefficient: f32,
}

impl ForceGenerator for DragForce {
    fn apply(&self, _transform: &Transform, body: &mut PhysicsBody) {
        let speed = body.velocity.length();
        if speed < 1e-6 {
            return;
        }
        body.apply_force(-body.velocity * speed * self.drag_coefficient);
    }
}

/// Ordered set of force generators applied to every body each step.
#[derive(Default)]
pub struct ForceRegistry {
    forces: Vec<Box<dyn ForceGenerator>>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Bodies whose entity has no transform are skipped.
    pub fn apply_all(&self, scene: &mut Scene) {
        if self.forces.is_empty() {
            return;
        }
        for (entity, body) in scene.bodies.iter_mut() {
            let Some(transform) = scene.transforms.get(*entity) else {
                continue;
            };
            for force in &self.forces {
                force.apply(transform, body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gravity_scales_with_mass() {
        let mut scene = Scene::new();
        let heavy = scene.spawn(Transform::default());
        scene
            .bodies
            .insert(heavy, PhysicsBody::new(Vec3::ZERO, 4.0, 0.0));

        let mut registry = ForceRegistry::new();
        registry.add_force(GravityForce::new(Vec3::new(0.0, -10.0, 0.0)));
        registry.apply_all(&mut scene);

        assert_abs_diff_eq!(scene.body(heavy).expect("body").force.y, -40.0);
    }

    #[test]
    fn drag_opposes_motion() {
        let mut body = PhysicsBody::new(Vec3::new(2.0, 0.0, 0.0), 1.0, 0.0);
        DragForce {
            drag_coefficient: 0.5,
        }
        .apply(&Transform::default(), &mut body);
        assert_abs_diff_eq!(body.force.x, -2.0);
    }
}
