#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    collision::{events::HitEvent, narrowphase::NarrowPhase, octree::Octree},
    core::{
        clock::StepContext,
        scene::{BodySnapshot, Scene},
    },
    utils::logging::ScopedTimer,
};

/// Hits found for one step, in entity order.
#[derive(Debug, Clone, Default)]
pub struct DetectionOutput {
    pub events: Vec<HitEvent>,
    /// Broad-phase candidates tested by the narrow phase.
    pub candidate_count: usize,
}

/// Per-step pass turning broad-phase candidates into hit events.
pub struct CollisionDetection;

impl CollisionDetection {
    /// Queries `tree` around one entity's swept bounds and runs the narrow
    /// phase against every other entity found there.
    pub fn detect_for(
        tree: &Octree<BodySnapshot>,
        lhs: &BodySnapshot,
        dt: f32,
    ) -> (Vec<HitEvent>, usize) {
        let candidates = tree.get_intersecting(&lhs.swept_bounds(dt));
        let mut tested = 0;
        let mut events = Vec::new();

        for rhs in candidates {
            if rhs.entity == lhs.entity {
                continue;
            }
            tested += 1;

            let record = NarrowPhase::collide(lhs, rhs, dt);
            if record.hit {
                events.push(HitEvent {
                    entity: lhs.entity,
                    other: rhs.entity,
                    position: record.position,
                    normal: record.normal,
                });
            }
        }

        (events, tested)
    }

    /// Runs the narrow phase for every collidable entity.
    ///
    /// The tree is only read here. With `parallel` set (and the `parallel`
    /// feature on) entities are processed on the rayon pool; the output order
    /// is the same as the sequential pass.
    pub fn detect(
        tree: &Octree<BodySnapshot>,
        scene: &Scene,
        ctx: &StepContext,
        parallel: bool,
    ) -> DetectionOutput {
        let _timer = ScopedTimer::new("collision::detect");
        let snapshots = scene.snapshots();

        let per_entity: Vec<(Vec<HitEvent>, usize)> = if parallel {
            Self::detect_parallel(tree, &snapshots, ctx.dt)
        } else {
            snapshots
                .iter()
                .map(|lhs| Self::detect_for(tree, lhs, ctx.dt))
                .collect()
        };

        let mut output = DetectionOutput::default();
        for (events, tested) in per_entity {
            output.events.extend(events);
            output.candidate_count += tested;
        }
        output
    }

    #[cfg(feature = "parallel")]
    fn detect_parallel(
        tree: &Octree<BodySnapshot>,
        snapshots: &[BodySnapshot],
        dt: f32,
    ) -> Vec<(Vec<HitEvent>, usize)> {
        snapshots
            .par_iter()
            .map(|lhs| Self::detect_for(tree, lhs, dt))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn detect_parallel(
        tree: &Octree<BodySnapshot>,
        snapshots: &[BodySnapshot],
        dt: f32,
    ) -> Vec<(Vec<HitEvent>, usize)> {
        snapshots
            .iter()
            .map(|lhs| Self::detect_for(tree, lhs, dt))
            .collect()
    }

    /// Delivers each event, one at a time, through the channel of the volume
    /// that owns it.
    pub fn broadcast(events: &[HitEvent], scene: &mut Scene) {
        let _timer = ScopedTimer::new("collision::broadcast");
        for event in events {
            if let Some(volume) = scene.volumes.get(&event.entity) {
                log::trace!(
                    "hit {:?} -> {:?} at {:?}, normal {:?}",
                    event.entity,
                    event.other,
                    event.position,
                    event.normal
                );
                volume.channel().broadcast(event, &mut scene.bodies);
            }
        }
    }
}
