use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::types::Transform;
use crate::collision::events::HitChannel;

/// Closed set of collision shapes. Every pair is matched exhaustively by the
/// narrow phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VolumeShape {
    Sphere { radius: f32 },
    Box { half_size: Vec3 },
}

impl VolumeShape {
    /// Half extents of the world-aligned box covering the shape under `transform`.
    ///
    /// Spheres ignore scale. Boxes take `|R·S| * half_size`, the tightest
    /// axis-aligned cover of the rotated, scaled box.
    pub fn world_half_size(&self, transform: &Transform) -> Vec3 {
        match self {
            VolumeShape::Sphere { radius } => Vec3::splat(radius.abs()),
            VolumeShape::Box { half_size } => {
                let linear = transform.linear();
                let abs = glam::Mat3::from_cols(
                    linear.x_axis.abs(),
                    linear.y_axis.abs(),
                    linear.z_axis.abs(),
                );
                abs * half_size.abs()
            }
        }
    }

    /// Box half extents with the transform's scale folded in.
    pub fn scaled_half_size(&self, transform: &Transform) -> Vec3 {
        match self {
            VolumeShape::Sphere { radius } => Vec3::splat(radius.abs()),
            VolumeShape::Box { half_size } => (*half_size * transform.scale).abs(),
        }
    }
}

/// Bounding-volume component: a shape plus the channel that hears about its hits.
#[derive(Debug)]
pub struct BoundingVolume {
    pub shape: VolumeShape,
    channel: HitChannel,
}

impl BoundingVolume {
    pub fn new(shape: VolumeShape) -> Self {
        Self {
            shape,
            channel: HitChannel::new(),
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(VolumeShape::Sphere { radius })
    }

    pub fn cuboid(half_size: Vec3) -> Self {
        Self::new(VolumeShape::Box { half_size })
    }

    pub fn channel(&self) -> &HitChannel {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut HitChannel {
        &mut self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Quat;

    #[test]
    fn rotated_box_bounds_cover_all_corners() {
        let shape = VolumeShape::Box {
            half_size: Vec3::new(2.0, 1.0, 1.0),
        };
        let transform = Transform::default().with_rotation(Quat::from_rotation_z(
            std::f32::consts::FRAC_PI_4,
        ));
        let half = shape.world_half_size(&transform);
        let expected = (2.0 + 1.0) * std::f32::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(half.x, expected, epsilon = 1e-5);
        assert_abs_diff_eq!(half.y, expected, epsilon = 1e-5);
        assert_abs_diff_eq!(half.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn spheres_ignore_scale() {
        let shape = VolumeShape::Sphere { radius: 0.5 };
        let transform = Transform::default().with_scale(Vec3::splat(4.0));
        assert_eq!(shape.world_half_size(&transform), Vec3::splat(0.5));
    }
}
