use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    core::{clock::StepContext, scene::Scene},
    utils::logging::ScopedTimer,
};

/// Numerical scheme used to advance bodies by one fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegratorKind {
    /// Explicit Euler: position uses the velocity from the start of the step.
    Euler,
    /// Velocity first, then position with the updated velocity.
    #[default]
    SemiImplicitEuler,
    /// Midpoint Runge-Kutta.
    Rk2,
    /// Classic fourth-order Runge-Kutta.
    Rk4,
}

/// Integrator responsible for stepping dynamic bodies forward in time.
#[derive(Debug, Clone)]
pub struct Integrator {
    pub kind: IntegratorKind,
    pub linear_damping: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(IntegratorKind::default(), 0.0)
    }
}

impl Integrator {
    pub fn new(kind: IntegratorKind, linear_damping: f32) -> Self {
        Self {
            kind,
            linear_damping: linear_damping.max(0.0),
        }
    }

    /// Advances one particle state. `acceleration` is evaluated at a velocity
    /// and may be called up to four times.
    pub fn integrate<F>(
        kind: IntegratorKind,
        position: Vec3,
        velocity: Vec3,
        acceleration: F,
        dt: f32,
    ) -> (Vec3, Vec3)
    where
        F: Fn(Vec3) -> Vec3,
    {
        match kind {
            IntegratorKind::Euler => {
                let next_velocity = velocity + acceleration(velocity) * dt;
                (position + velocity * dt, next_velocity)
            }
            IntegratorKind::SemiImplicitEuler => {
                let next_velocity = velocity + acceleration(velocity) * dt;
                (position + next_velocity * dt, next_velocity)
            }
            IntegratorKind::Rk2 => {
                let k1_v = acceleration(velocity);
                let mid_velocity = velocity + k1_v * (0.5 * dt);
                let k2_v = acceleration(mid_velocity);
                (position + mid_velocity * dt, velocity + k2_v * dt)
            }
            IntegratorKind::Rk4 => {
                let half = 0.5 * dt;

                let k1_x = velocity;
                let k1_v = acceleration(k1_x);

                let k2_x = velocity + k1_v * half;
                let k2_v = acceleration(k2_x);

                let k3_x = velocity + k2_v * half;
                let k3_v = acceleration(k3_x);

                let k4_x = velocity + k3_v * dt;
                let k4_v = acceleration(k4_x);

                let sixth = dt / 6.0;
                (
                    position + (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * sixth,
                    velocity + (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * sixth,
                )
            }
        }
    }

    /// Moves every entity that has both a transform and a body, then clears
    /// the accumulated forces. Returns the number of bodies advanced.
    pub fn step(&self, scene: &mut Scene, ctx: &StepContext) -> usize {
        let _timer = ScopedTimer::new("integrator");
        let damping = self.linear_damping;
        let mut advanced = 0;

        for (entity, body) in scene.bodies.iter_mut() {
            let Some(transform) = scene.transforms.get_mut(*entity) else {
                body.clear_force();
                continue;
            };

            let force_acceleration = body.force * body.inverse_mass;
            let (position, velocity) = Self::integrate(
                self.kind,
                transform.position,
                body.velocity,
                |v| force_acceleration - v * damping,
                ctx.dt,
            );

            transform.position = position;
            body.velocity = velocity;
            body.clear_force();
            advanced += 1;
        }

        advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PhysicsBody, Transform};
    use approx::assert_abs_diff_eq;

    const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
    const ALL: [IntegratorKind; 4] = [
        IntegratorKind::Euler,
        IntegratorKind::SemiImplicitEuler,
        IntegratorKind::Rk2,
        IntegratorKind::Rk4,
    ];

    #[test]
    fn constant_acceleration_velocity_matches_for_every_kind() {
        for kind in ALL {
            let (_, v) = Integrator::integrate(kind, Vec3::ZERO, Vec3::ZERO, |_| GRAVITY, 0.5);
            assert_abs_diff_eq!(v.y, -4.905, epsilon = 1e-5);
        }
    }

    #[test]
    fn position_update_differs_between_euler_variants() {
        let (explicit, _) = Integrator::integrate(
            IntegratorKind::Euler,
            Vec3::ZERO,
            Vec3::ZERO,
            |_| GRAVITY,
            1.0,
        );
        let (semi, _) = Integrator::integrate(
            IntegratorKind::SemiImplicitEuler,
            Vec3::ZERO,
            Vec3::ZERO,
            |_| GRAVITY,
            1.0,
        );
        let (rk4, _) =
            Integrator::integrate(IntegratorKind::Rk4, Vec3::ZERO, Vec3::ZERO, |_| GRAVITY, 1.0);

        assert_eq!(explicit, Vec3::ZERO);
        assert_abs_diff_eq!(semi.y, -9.81, epsilon = 1e-5);
        // Exact for constant acceleration: x = a t^2 / 2.
        assert_abs_diff_eq!(rk4.y, -4.905, epsilon = 1e-5);
    }

    #[test]
    fn rk4_tracks_exponential_damping() {
        let damping = 2.0;
        let start = Vec3::new(1.0, 0.0, 0.0);
        let (_, v) =
            Integrator::integrate(IntegratorKind::Rk4, Vec3::ZERO, start, |v| -v * damping, 0.1);
        assert_abs_diff_eq!(v.x, (-0.2f32).exp(), epsilon = 1e-5);

        let (_, euler) =
            Integrator::integrate(IntegratorKind::Euler, Vec3::ZERO, start, |v| -v * damping, 0.1);
        assert!((euler.x - (-0.2f32).exp()).abs() > 1e-3);
    }

    #[test]
    fn step_moves_bodies_and_clears_forces() {
        let mut scene = Scene::new();
        let ball = scene.spawn(Transform::from_position(Vec3::new(0.0, 10.0, 0.0)));
        let mut body = PhysicsBody::new(Vec3::new(1.0, 0.0, 0.0), 2.0, 0.0);
        body.apply_force(GRAVITY * 2.0);
        scene.bodies.insert(ball, body);
        let fixed = scene.spawn(Transform::default());

        let integrator = Integrator::default();
        let ctx = StepContext { dt: 0.5, index: 0 };
        assert_eq!(integrator.step(&mut scene, &ctx), 1);

        let body = scene.body(ball).expect("ball body");
        assert_eq!(body.force, Vec3::ZERO);
        assert_abs_diff_eq!(body.velocity.y, -4.905, epsilon = 1e-5);

        let position = scene.transform(ball).expect("ball transform").position;
        assert_abs_diff_eq!(position.x, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(position.y, 10.0 - 2.4525, epsilon = 1e-5);
        assert_eq!(scene.transform(fixed).expect("static").position, Vec3::ZERO);
    }
}
