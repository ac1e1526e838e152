use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::sdf::distance_to_box;

/// Axis-aligned box described by its centre and per-axis half extents.
///
/// Used both for octree regions and for the keys of stored items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub position: Vec3,
    pub half_size: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            half_size: Vec3::ZERO,
        }
    }
}

impl Aabb {
    /// Negative half extents are folded to their absolute value.
    pub fn new(position: Vec3, half_size: Vec3) -> Self {
        Self {
            position,
            half_size: half_size.abs(),
        }
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let lo = min.min(max);
        let hi = min.max(max);
        Self {
            position: (lo + hi) * 0.5,
            half_size: (hi - lo) * 0.5,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.position - self.half_size
    }

    pub fn max(&self) -> Vec3 {
        self.position + self.half_size
    }

    /// The eight corners, ordered by the sign pattern of [`Aabb::octant`].
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| self.position + octant_signs(i) * self.half_size)
    }

    /// True iff every corner of `inner` lies inside or on this box.
    pub fn contains(&self, inner: &Aabb) -> bool {
        inner
            .corners()
            .iter()
            .all(|corner| distance_to_box(*corner - self.position, self.half_size) <= 0.0)
    }

    /// Inclusive separating-axis overlap test.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let delta = (self.position - other.position).abs();
        delta.cmple(self.half_size + other.half_size).all()
    }

    /// One of the eight quarter-extent children produced by splitting at the centre.
    pub fn octant(&self, index: usize) -> Aabb {
        let half = self.half_size * 0.5;
        Aabb {
            position: self.position + octant_signs(index) * half,
            half_size: half,
        }
    }
}

/// Sign pattern for octant `index` (bit 0 = x, bit 1 = y, bit 2 = z; set means positive).
pub fn octant_signs(index: usize) -> Vec3 {
    let pick = |bit: usize| if index & bit != 0 { 1.0 } else { -1.0 };
    Vec3::new(pick(1), pick(2), pick(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_inclusive_of_the_boundary() {
        let outer = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        assert!(outer.contains(&Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE)));
        assert!(!outer.contains(&Aabb::new(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE)));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn intersection_catches_piercing_boxes() {
        // No corner of either box lies inside the other.
        let slab = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 0.5, 4.0));
        let pole = Aabb::new(Vec3::ZERO, Vec3::new(0.2, 10.0, 0.2));
        assert!(slab.intersects(&pole));
        assert!(pole.intersects(&slab));

        let far = Aabb::new(Vec3::new(0.0, 20.0, 0.0), Vec3::ONE);
        assert!(!slab.intersects(&far));
    }

    #[test]
    fn octants_tile_the_parent() {
        let parent = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(4.0));
        for i in 0..8 {
            let child = parent.octant(i);
            assert_eq!(child.half_size, Vec3::splat(2.0));
            assert!(parent.contains(&child));
        }
        assert_eq!(parent.octant(0).position, Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(parent.octant(7).position, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn min_max_round_trip_normalises_corners() {
        let bounds = Aabb::from_min_max(Vec3::new(2.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 4.0));
        assert_eq!(bounds.min(), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(bounds.max(), Vec3::new(2.0, 1.0, 4.0));
    }
}
