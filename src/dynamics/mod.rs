//! Simulation dynamics modules: force accumulation, integration, and collision response.

pub mod forces;
pub mod integrator;
pub mod response;

pub use forces::{DragForce, ForceGenerator, ForceRegistry, GravityForce};
pub use integrator::{Integrator, IntegratorKind};
pub use response::CollisionResponse;
