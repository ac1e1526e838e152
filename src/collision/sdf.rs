//! Signed-distance style overlap tests between primitive shapes.
//!
//! Every distance follows the same sign convention: zero or negative means the
//! shapes touch or overlap, positive means they are separated. Points are
//! always given relative to the centre of the shape they are tested against.

use glam::Vec3;

/// Distance from `point` to the surface of a sphere centred on the origin.
pub fn distance_to_sphere(point: Vec3, radius: f32) -> f32 {
    point.length() - radius
}

/// Per-axis distance from `point` to an origin-centred box.
///
/// Zero on every axis iff the point lies inside the box (boundary included).
pub fn distance_to_box3(point: Vec3, half_size: Vec3) -> Vec3 {
    (point.abs() - half_size).max(Vec3::ZERO)
}

pub fn distance_to_box(point: Vec3, half_size: Vec3) -> f32 {
    distance_to_box3(point, half_size).length()
}

/// Gap between two spheres; symmetric in its two arguments.
pub fn sphere_to_sphere(point_a: Vec3, radius_a: f32, point_b: Vec3, radius_b: f32) -> f32 {
    distance_to_sphere(point_b - point_a, radius_a) - radius_b
}

/// Gap between a sphere centred at `point` and an origin-centred box.
pub fn sphere_to_box(point: Vec3, radius: f32, half_size: Vec3) -> f32 {
    distance_to_box(point, half_size) - radius
}

/// Component-wise sign: -1, 0 or +1.
pub fn sign3(v: Vec3) -> Vec3 {
    let sign = |x: f32| {
        if x > 0.0 {
            1.0
        } else if x < 0.0 {
            -1.0
        } else {
            0.0
        }
    };
    Vec3::new(sign(v.x), sign(v.y), sign(v.z))
}

/// Outward face normal of an origin-centred box nearest to `point`.
///
/// The face is picked by the largest normalised component `|point| / half_size`.
/// Ties go to X, then Y, then Z, so the result is always a unit axis. A point
/// sitting exactly on the centre plane of the chosen axis gets the positive
/// face.
pub fn box_normal(point: Vec3, half_size: Vec3) -> Vec3 {
    let alpha = point.abs() / half_size.max(Vec3::splat(f32::EPSILON));

    let mut axis = 0;
    for candidate in 1..3 {
        if alpha[candidate] > alpha[axis] {
            axis = candidate;
        }
    }

    let mut normal = Vec3::ZERO;
    normal[axis] = if point[axis] < 0.0 { -1.0 } else { 1.0 };
    normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sphere_distance_is_signed() {
        assert_abs_diff_eq!(distance_to_sphere(Vec3::new(3.0, 0.0, 0.0), 1.0), 2.0);
        assert_abs_diff_eq!(distance_to_sphere(Vec3::new(0.5, 0.0, 0.0), 1.0), -0.5);
        assert_abs_diff_eq!(distance_to_sphere(Vec3::ZERO, 1.0), -1.0);
    }

    #[test]
    fn box_distance_is_zero_inside_and_on_surface() {
        let half = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(distance_to_box3(Vec3::new(0.5, -1.0, 2.0), half), Vec3::ZERO);
        assert_eq!(distance_to_box3(Vec3::new(1.0, 2.0, 3.0), half), Vec3::ZERO);
        assert_eq!(
            distance_to_box3(Vec3::new(2.0, -4.0, 0.0), half),
            Vec3::new(1.0, 2.0, 0.0)
        );
        assert_abs_diff_eq!(distance_to_box(Vec3::new(4.0, 6.0, 0.0), half), 5.0);
    }

    #[test]
    fn sphere_to_sphere_reports_overlap_and_gap() {
        let overlap = sphere_to_sphere(Vec3::ZERO, 1.0, Vec3::new(1.5, 0.0, 0.0), 1.0);
        assert_abs_diff_eq!(overlap, -0.5, epsilon = 1e-6);

        let gap = sphere_to_sphere(Vec3::ZERO, 1.0, Vec3::new(3.0, 0.0, 0.0), 1.0);
        assert_abs_diff_eq!(gap, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn sphere_to_box_uses_closest_face() {
        let half = Vec3::ONE;
        assert_abs_diff_eq!(sphere_to_box(Vec3::new(2.5, 0.0, 0.0), 1.0, half), 0.5);
        assert_abs_diff_eq!(sphere_to_box(Vec3::new(1.5, 0.0, 0.0), 1.0, half), -0.5);
    }

    #[test]
    fn sign3_keeps_zero_components() {
        assert_eq!(
            sign3(Vec3::new(-2.0, 0.0, 0.1)),
            Vec3::new(-1.0, 0.0, 1.0)
        );
    }

    #[test]
    fn box_normal_picks_dominant_face() {
        let half = Vec3::new(2.0, 1.0, 1.0);
        assert_eq!(box_normal(Vec3::new(1.0, 0.9, 0.0), half), Vec3::Y);
        assert_eq!(box_normal(Vec3::new(-1.9, 0.5, 0.0), half), -Vec3::X);
        assert_eq!(box_normal(Vec3::new(0.0, 0.0, -3.0), half), -Vec3::Z);
    }

    #[test]
    fn box_normal_breaks_ties_towards_x() {
        let half = Vec3::ONE;
        assert_eq!(box_normal(Vec3::new(1.0, 1.0, 1.0), half), Vec3::X);
        assert_eq!(box_normal(Vec3::new(0.0, -1.0, 1.0), half), -Vec3::Y);
        assert_eq!(box_normal(Vec3::ZERO, half), Vec3::X);
    }
}
