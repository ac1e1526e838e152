//! Core types describing simulated entities, their components, and the step clock.

pub mod aabb;
pub mod clock;
pub mod scene;
pub mod types;
pub mod volume;

pub use aabb::Aabb;
pub use clock::{FixedClock, StepContext};
pub use scene::{BodySnapshot, ComponentMap, Scene};
pub use types::{PhysicsBody, Transform};
pub use volume::{BoundingVolume, VolumeShape};
