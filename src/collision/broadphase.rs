use glam::Vec3;

use crate::{
    collision::octree::Octree,
    core::{
        aabb::Aabb,
        clock::StepContext,
        scene::{BodySnapshot, Scene},
    },
    utils::logging::ScopedTimer,
};

impl BodySnapshot {
    /// Centre one fixed step ahead along the current velocity.
    pub fn swept_center(&self, dt: f32) -> Vec3 {
        self.transform.position + self.velocity * dt
    }

    /// World-aligned bounds of the shape at its swept centre.
    ///
    /// Both the tree builder and the detection pass key on these bounds so a
    /// body is indexed and queried at the position it is about to reach.
    pub fn swept_bounds(&self, dt: f32) -> Aabb {
        Aabb::new(
            self.swept_center(dt),
            self.shape.world_half_size(&self.transform),
        )
    }
}

/// Per-step pass that repopulates the broad-phase octree.
pub struct TreeBuilder;

impl TreeBuilder {
    /// Clears `tree` and inserts every collidable entity under its swept bounds.
    /// Returns the number of inserted entities.
    pub fn rebuild(tree: &mut Octree<BodySnapshot>, scene: &Scene, ctx: &StepContext) -> usize {
        let _timer = ScopedTimer::new("tree::build");
        tree.reset();

        let snapshots = scene.snapshots();
        for snapshot in &snapshots {
            tree.insert(*snapshot, snapshot.swept_bounds(ctx.dt));
        }

        if !tree.unbound_items().is_empty() {
            log::debug!(
                "step {}: {} entities outside the world bounds",
                ctx.index,
                tree.unbound_items().len()
            );
        }
        snapshots.len()
    }
}
