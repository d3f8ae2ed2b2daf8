//! Level construction.

use glam::Vec2;
use platformer2d_physics::{ColliderId, CollisionLayers, CollisionWorld};
use serde::{Deserialize, Serialize};

/// A game level containing collision geometry and spawn points.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for physics and triggers.
    pub collision: CollisionWorld,

    /// Player spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// Where a player enters the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Feet position in world space.
    pub position: Vec2,

    /// Initial facing.
    pub facing_right: bool,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// A small course exercising every kind of surface.
    ///
    /// ```text
    ///  |                                                             |
    ///  |  |\    ===                           ______                 |
    ///  |  | \                               /|      |     [goal]     |
    ///  |__|__\_________S___________________/_|______|________________|
    /// -40 -8 -6  -4..-1 0                  5  13     19    24..26    40
    /// ```
    pub fn test_course() -> Self {
        let mut level = Self::new("test_course", "Test Course");
        let solid = CollisionLayers::SOLID;

        // Floor
        level
            .collision
            .add_box(Vec2::new(0.0, -0.5), Vec2::new(40.0, 0.5), solid);

        // Boundary walls
        let wall_height = 5.0;
        let wall_thickness = 0.5;
        level.collision.add_box(
            Vec2::new(-40.0 - wall_thickness, wall_height),
            Vec2::new(wall_thickness, wall_height),
            solid,
        );
        level.collision.add_box(
            Vec2::new(40.0 + wall_thickness, wall_height),
            Vec2::new(wall_thickness, wall_height),
            solid,
        );

        // Walkable ramp (about 20.6 degrees) onto a ledge
        level
            .collision
            .add_slope(Vec2::new(5.0, 0.0), Vec2::new(13.0, 0.0), 3.0, solid);
        level
            .collision
            .add_box(Vec2::new(16.0, 1.5), Vec2::new(3.0, 1.5), solid);

        // Too steep to climb (about 63 degrees), rises to the left
        level
            .collision
            .add_slope(Vec2::new(-6.0, 0.0), Vec2::new(-8.0, 0.0), 4.0, solid);

        // Jump-through platform
        level
            .collision
            .add_one_way(Vec2::new(-4.0, 2.5), Vec2::new(-1.0, 2.5));

        // Goal
        level
            .collision
            .add_trigger(Vec2::new(25.0, 1.0), Vec2::new(1.0, 1.0), "goal");

        level.spawn_points.push(SpawnPoint {
            position: Vec2::new(0.0, 0.0),
            facing_right: true,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec2::new(-2.5, 0.0),
            facing_right: false,
        });

        level
    }

    /// Add a named trigger volume.
    pub fn add_trigger(&mut self, name: &str, center: Vec2, half_extents: Vec2) -> ColliderId {
        self.collision.add_trigger(center, half_extents, name)
    }

    /// Get a player spawn point.
    pub fn get_player_spawn(&self, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points.get(index)
    }

    /// Get the number of player spawn points.
    pub fn player_spawn_count(&self) -> usize {
        self.spawn_points.len()
    }

    /// Name of a trigger collider.
    pub fn trigger_name(&self, id: ColliderId) -> Option<&str> {
        self.collision.collider_name(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_creation() {
        let level = Level::new("test", "Test Level");
        assert_eq!(level.id, "test");
        assert_eq!(level.collision.collider_count(), 0);
        assert!(level.get_player_spawn(0).is_none());
    }

    #[test]
    fn test_test_course() {
        let level = Level::test_course();
        assert!(level.collision.collider_count() >= 8);
        assert!(level.player_spawn_count() >= 2);
    }

    #[test]
    fn test_goal_trigger() {
        let level = Level::test_course();

        let inside = level.collision.overlapping(
            Vec2::new(24.6, 0.0),
            Vec2::new(25.4, 1.8),
            CollisionLayers::TRIGGER,
        );
        assert_eq!(inside.len(), 1);
        assert_eq!(level.trigger_name(inside[0]), Some("goal"));
    }

    #[test]
    fn test_ramp_is_walkable() {
        let level = Level::test_course();

        let hit = level
            .collision
            .raycast(Vec2::new(9.0, 10.0), -Vec2::Y, 20.0, CollisionLayers::MASK_PLATFORMS)
            .expect("ramp below");
        assert!(hit.angle_from_up() < 30.0);
        assert!(hit.angle_from_up() > 0.0);
    }
}
