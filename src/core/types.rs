use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, orientation, and non-uniform scale of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builds the homogeneous model matrix.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Rotation-scale block of the model matrix.
    pub fn linear(&self) -> Mat3 {
        Mat3::from_quat(self.rotation) * Mat3::from_diagonal(self.scale)
    }

    /// Maps a world point into this transform's rigid frame (rotation and
    /// translation only; scale is left to the shape extents).
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

/// Dynamic-body component: the state the collision response and the
/// integrators work on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub mass: f32,
    pub inverse_mass: f32,
    /// Restitution used by the impulse response, usually in `[0, 1]`.
    pub bounciness: f32,
    /// Force accumulated for the current step.
    pub force: Vec3,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0, 0.0)
    }
}

impl PhysicsBody {
    /// A zero or non-finite mass yields an immovable body (`inverse_mass == 0`).
    pub fn new(velocity: Vec3, mass: f32, bounciness: f32) -> Self {
        let inverse_mass = if mass.is_finite() && mass.abs() > f32::EPSILON {
            1.0 / mass
        } else {
            0.0
        };
        Self {
            velocity,
            mass,
            inverse_mass,
            bounciness,
            force: Vec3::ZERO,
        }
    }

    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass;
    }

    pub fn clear_force(&mut self) {
        self.force = Vec3::ZERO;
    }
}
