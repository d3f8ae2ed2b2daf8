//! Trigger volume tracking.
//!
//! Triggers never block movement. Each tick the tracker compares which
//! trigger colliders overlap each player against the previous tick and
//! reports the difference.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use platformer2d_physics::{ColliderId, CollisionLayers, CollisionWorld};
use serde::{Deserialize, Serialize};

use crate::player::EntityId;

/// A change in overlap between a player and a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerEvent {
    /// Started overlapping this tick.
    Enter(ColliderId),
    /// Still overlapping.
    Stay(ColliderId),
    /// Stopped overlapping this tick.
    Exit(ColliderId),
}

impl TriggerEvent {
    /// The trigger this event is about.
    pub fn collider(&self) -> ColliderId {
        match *self {
            TriggerEvent::Enter(id) | TriggerEvent::Stay(id) | TriggerEvent::Exit(id) => id,
        }
    }
}

/// Remembers which triggers each player overlapped last tick.
#[derive(Debug, Default, Clone)]
pub struct TriggerTracker {
    inside: BTreeMap<EntityId, BTreeSet<ColliderId>>,
}

impl TriggerTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update one player's overlaps from its current bounds.
    ///
    /// Events come out as enters and stays in collider order, then exits in
    /// collider order.
    pub fn update(
        &mut self,
        player: EntityId,
        min: Vec2,
        max: Vec2,
        world: &CollisionWorld,
    ) -> Vec<TriggerEvent> {
        let current: BTreeSet<ColliderId> = world
            .overlapping(min, max, CollisionLayers::TRIGGER)
            .into_iter()
            .collect();
        let previous = self.inside.remove(&player).unwrap_or_default();

        let mut events: Vec<TriggerEvent> = current
            .iter()
            .map(|&id| {
                if previous.contains(&id) {
                    TriggerEvent::Stay(id)
                } else {
                    TriggerEvent::Enter(id)
                }
            })
            .collect();

        events.extend(previous.difference(&current).map(|&id| TriggerEvent::Exit(id)));

        if !current.is_empty() {
            self.inside.insert(player, current);
        }

        events
    }

    /// Forget a player, e.g. when it leaves the game.
    ///
    /// Returns exits for every trigger it was still inside.
    pub fn remove_player(&mut self, player: EntityId) -> Vec<TriggerEvent> {
        self.inside
            .remove(&player)
            .map(|set| set.into_iter().map(TriggerEvent::Exit).collect())
            .unwrap_or_default()
    }

    /// Triggers a player currently overlaps.
    pub fn triggers_for(&self, player: EntityId) -> impl Iterator<Item = ColliderId> + '_ {
        self.inside.get(&player).into_iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_world() -> (CollisionWorld, ColliderId, ColliderId) {
        let mut world = CollisionWorld::new();
        world.add_box(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), CollisionLayers::SOLID);
        let door = world.add_trigger(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), "door");
        let lava = world.add_trigger(Vec2::new(1.5, 1.0), Vec2::new(1.0, 1.0), "lava");
        (world, door, lava)
    }

    fn bounds_at(x: f32) -> (Vec2, Vec2) {
        (Vec2::new(x - 0.4, 0.0), Vec2::new(x + 0.4, 1.8))
    }

    #[test]
    fn test_enter_stay_exit() {
        let (world, door, _) = create_test_world();
        let mut tracker = TriggerTracker::new();

        let (min, max) = bounds_at(-5.0);
        assert!(tracker.update(1, min, max, &world).is_empty());

        let (min, max) = bounds_at(-0.5);
        assert_eq!(tracker.update(1, min, max, &world), vec![TriggerEvent::Enter(door)]);
        assert_eq!(tracker.update(1, min, max, &world), vec![TriggerEvent::Stay(door)]);

        let (min, max) = bounds_at(-5.0);
        assert_eq!(tracker.update(1, min, max, &world), vec![TriggerEvent::Exit(door)]);
        assert!(tracker.update(1, min, max, &world).is_empty());
    }

    #[test]
    fn test_overlapping_triggers_ordered() {
        let (world, door, lava) = create_test_world();
        let mut tracker = TriggerTracker::new();

        let (min, max) = bounds_at(0.0);
        assert_eq!(tracker.update(1, min, max, &world), vec![TriggerEvent::Enter(door)]);

        // Both overlap now
        let (min, max) = bounds_at(0.8);
        assert_eq!(
            tracker.update(1, min, max, &world),
            vec![TriggerEvent::Stay(door), TriggerEvent::Enter(lava)]
        );

        // Only lava
        let (min, max) = bounds_at(2.0);
        assert_eq!(
            tracker.update(1, min, max, &world),
            vec![TriggerEvent::Stay(lava), TriggerEvent::Exit(door)]
        );
        assert_eq!(tracker.triggers_for(1).collect::<Vec<_>>(), vec![lava]);
    }

    #[test]
    fn test_players_tracked_separately() {
        let (world, door, _) = create_test_world();
        let mut tracker = TriggerTracker::new();

        let (min, max) = bounds_at(-0.5);
        assert_eq!(tracker.update(1, min, max, &world), vec![TriggerEvent::Enter(door)]);
        assert_eq!(tracker.update(2, min, max, &world), vec![TriggerEvent::Enter(door)]);

        assert_eq!(tracker.remove_player(1), vec![TriggerEvent::Exit(door)]);
        assert!(tracker.remove_player(1).is_empty());
        assert_eq!(tracker.triggers_for(2).count(), 1);
    }

    #[test]
    fn test_event_collider() {
        let id = ColliderId(7);
        assert_eq!(TriggerEvent::Enter(id).collider(), id);
        assert_eq!(TriggerEvent::Exit(id).collider(), id);
    }
}
