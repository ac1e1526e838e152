//! Collision detection: overlap math, the octree broad phase, narrow-phase
//! tests, and hit notification.

pub mod broadphase;
pub mod detection;
pub mod events;
pub mod narrowphase;
pub mod octree;
pub mod sdf;

pub use broadphase::TreeBuilder;
pub use detection::{CollisionDetection, DetectionOutput};
pub use events::{ContactRecorder, HitCallback, HitChannel, HitEvent, SubscriptionId};
pub use narrowphase::{HitRecord, NarrowPhase};
pub use octree::{Node, Octree, Package};
