//! Hit notifications: the per-volume broadcast channel and a recorder for
//! observing contacts from outside the simulation.

use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    core::{scene::ComponentMap, types::PhysicsBody},
    utils::allocator::EntityId,
};

/// A confirmed contact, as seen from `entity`.
///
/// `normal` points from `entity` toward `other`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEvent {
    pub entity: EntityId,
    pub other: EntityId,
    pub position: Vec3,
    pub normal: Vec3,
}

/// Subscriber callback. Receives the event and exclusive access to the
/// dynamic-body components so it can apply a response.
pub type HitCallback = Box<dyn Fn(&HitEvent, &mut ComponentMap<PhysicsBody>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u32);

/// Multi-subscriber broadcast channel owned by a bounding volume.
#[derive(Default)]
pub struct HitChannel {
    subscribers: Vec<(SubscriptionId, HitCallback)>,
    next_id: u32,
}

impl std::fmt::Debug for HitChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitChannel")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl HitChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&HitEvent, &mut ComponentMap<PhysicsBody>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Invokes every subscriber in subscription order.
    pub fn broadcast(&self, event: &HitEvent, bodies: &mut ComponentMap<PhysicsBody>) {
        for (_, callback) in &self.subscribers {
            callback(event, bodies);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

/// Shared log of hit events, filled by a channel subscriber.
#[derive(Debug, Clone, Default)]
pub struct ContactRecorder {
    events: Arc<Mutex<Vec<HitEvent>>>,
}

impl ContactRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback to pass to [`HitChannel::subscribe`].
    pub fn subscriber(
        &self,
    ) -> impl Fn(&HitEvent, &mut ComponentMap<PhysicsBody>) + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |event: &HitEvent, _bodies: &mut ComponentMap<PhysicsBody>| events.lock().push(*event)
    }

    pub fn drain(&self) -> Vec<HitEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> HitEvent {
        HitEvent {
            entity: EntityId::from_index(0),
            other: EntityId::from_index(1),
            position: Vec3::ZERO,
            normal: Vec3::Y,
        }
    }

    #[test]
    fn broadcast_reaches_every_subscriber_until_unsubscribed() {
        let first = ContactRecorder::new();
        let second = ContactRecorder::new();
        let mut channel = HitChannel::new();
        let id = channel.subscribe(first.subscriber());
        channel.subscribe(second.subscriber());

        let mut bodies = ComponentMap::new();
        channel.broadcast(&event(), &mut bodies);
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);

        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.broadcast(&event(), &mut bodies);
        assert_eq!(first.drain().len(), 1);
        assert_eq!(second.drain().len(), 2);
        assert!(second.is_empty());
    }

    #[test]
    fn subscribers_can_mutate_bodies() {
        let mut channel = HitChannel::new();
        channel.subscribe(|event: &HitEvent, bodies: &mut ComponentMap<PhysicsBody>| {
            if let Some(body) = bodies.get_mut(&event.entity) {
                body.velocity = event.normal;
            }
        });

        let mut bodies = ComponentMap::new();
        bodies.insert(EntityId::from_index(0), PhysicsBody::default());
        channel.broadcast(&event(), &mut bodies);
        assert_eq!(bodies[&EntityId::from_index(0)].velocity, Vec3::Y);
    }
}
