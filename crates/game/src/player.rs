//! Player entity and its movement driver.

use glam::Vec2;
use platformer2d_physics::{Body, CharacterController2D, Resolution, SpatialQuery};
use serde::{Deserialize, Serialize};

use crate::input::PlayerInput;

/// Unique identifier for entities.
pub type EntityId = u32;

/// Gravity, speed and jump tuning for the player driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Vertical acceleration (units/second², negative is down).
    pub gravity: f32,

    /// Top horizontal speed (units/second).
    pub run_speed: f32,

    /// How quickly horizontal speed approaches the target on the ground.
    pub ground_damping: f32,

    /// How quickly horizontal speed approaches the target in the air.
    pub in_air_damping: f32,

    /// Apex height of a jump from flat ground (units).
    pub jump_height: f32,

    /// Multiplier applied to downward speed when holding down on the ground.
    pub slam_multiplier: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            gravity: -25.0,
            run_speed: 8.0,
            ground_damping: 20.0,  // Snappy starts and stops
            in_air_damping: 5.0,   // Loose air control
            jump_height: 3.0,
            slam_multiplier: 3.0,
        }
    }
}

impl PlayerTuning {
    /// Low gravity, long floaty jumps.
    pub fn floaty() -> Self {
        Self {
            gravity: -12.0,
            jump_height: 4.0,
            in_air_damping: 2.0,
            ..Default::default()
        }
    }

    /// Upward speed that reaches `jump_height` under `gravity`.
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.jump_height * -self.gravity).max(0.0).sqrt()
    }
}

/// A player in the game.
#[derive(Debug, Clone)]
pub struct Player {
    /// Unique player ID.
    pub id: EntityId,

    /// Player name/handle.
    pub name: String,

    /// Collision rectangle.
    pub body: Body,

    /// Movement resolver, with this player's contact history.
    pub controller: CharacterController2D,

    /// Velocity carried between ticks (units/second).
    pub velocity: Vec2,

    /// Last horizontal direction the player moved in.
    pub facing_right: bool,
}

impl Player {
    /// Default collision half-size.
    pub const HALF_EXTENTS: Vec2 = Vec2::new(0.4, 0.9);

    /// Create a player standing with its feet at `spawn_position`.
    pub fn new(
        id: EntityId,
        name: String,
        spawn_position: Vec2,
        half_extents: Vec2,
        controller: CharacterController2D,
    ) -> Self {
        Self {
            id,
            name,
            body: Body::new(spawn_position + Vec2::new(0.0, half_extents.y), half_extents),
            controller,
            velocity: Vec2::ZERO,
            facing_right: true,
        }
    }

    /// Get the player's center position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Get the player's feet position.
    #[inline]
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.body.center().x, self.body.min().y)
    }

    /// Check if the player is on the ground.
    #[inline]
    pub fn on_ground(&self) -> bool {
        self.controller.is_grounded()
    }

    /// Advance the player by one tick.
    ///
    /// Gravity and input shape the velocity, the controller turns it into a
    /// displacement, and the controller's reported velocity becomes the
    /// starting point for the next tick.
    pub fn update<Q>(&mut self, input: &PlayerInput, tuning: &PlayerTuning, world: &Q, dt: f32) -> Resolution
    where
        Q: SpatialQuery + ?Sized,
    {
        let grounded = self.controller.is_grounded();

        if grounded {
            self.velocity.y = 0.0;
        }

        let direction = input.horizontal_axis();
        if direction > 0.0 {
            self.facing_right = true;
        } else if direction < 0.0 {
            self.facing_right = false;
        }

        if grounded && input.jump {
            self.velocity.y = tuning.jump_velocity();
            log::debug!("player {} jumped with {:.2}", self.id, self.velocity.y);
        }

        let damping = if grounded {
            tuning.ground_damping
        } else {
            tuning.in_air_damping
        };
        let t = (dt * damping).clamp(0.0, 1.0);
        self.velocity.x += (direction * tuning.run_speed - self.velocity.x) * t;

        self.velocity.y += tuning.gravity * dt;

        if grounded && input.down {
            self.velocity.y *= tuning.slam_multiplier;
            self.controller.ignore_one_way_platforms_this_frame();
        }

        let resolution = self
            .controller
            .resolve(&mut self.body, self.velocity * dt, world, dt);
        self.velocity = resolution.velocity;

        resolution
    }

    /// Put the player back at a spawn point, standing still.
    pub fn respawn(&mut self, spawn_position: Vec2) {
        self.body.position = spawn_position + Vec2::new(0.0, self.body.scaled_half_extents().y);
        self.velocity = Vec2::ZERO;
        self.controller.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer2d_physics::{CollisionLayers, CollisionWorld};

    const DT: f32 = 1.0 / 60.0;

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec2::new(0.0, -0.5),
            Vec2::new(50.0, 0.5),
            CollisionLayers::SOLID,
        );
        world
    }

    fn grounded_player(world: &CollisionWorld) -> Player {
        let mut player = Player::new(
            1,
            "Test".to_string(),
            Vec2::ZERO,
            Player::HALF_EXTENTS,
            CharacterController2D::with_default_config(),
        );
        player
            .controller
            .warp_to_grounded(&mut player.body, world)
            .expect("floor below");
        player
    }

    #[test]
    fn test_player_creation() {
        let player = Player::new(
            1,
            "Test".to_string(),
            Vec2::new(3.0, 2.0),
            Player::HALF_EXTENTS,
            CharacterController2D::with_default_config(),
        );
        assert!(player.feet().abs_diff_eq(Vec2::new(3.0, 2.0), 1e-5));
        assert!(!player.on_ground());
    }

    #[test]
    fn test_jump_velocity() {
        let tuning = PlayerTuning::default();
        let v = tuning.jump_velocity();
        // v² = 2gh
        assert!((v * v - 2.0 * 3.0 * 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_floaty_jumps_higher() {
        let floaty = PlayerTuning::floaty();
        let default = PlayerTuning::default();
        assert!(floaty.gravity > default.gravity);
        assert!(floaty.jump_height > default.jump_height);

        let world = create_test_world();
        let mut player = grounded_player(&world);
        player.update(&PlayerInput::jump(), &floaty, &world, DT);

        let mut peak = player.feet().y;
        for _ in 0..240 {
            let resolution = player.update(&PlayerInput::default(), &floaty, &world, DT);
            peak = peak.max(player.feet().y);
            if resolution.state.became_grounded_this_frame {
                break;
            }
        }
        assert!(peak > default.jump_height, "peak was {peak}");
        assert!((peak - floaty.jump_height).abs() < 0.3, "peak was {peak}");
    }

    #[test]
    fn test_runs_toward_target_speed() {
        let world = create_test_world();
        let tuning = PlayerTuning::default();
        let mut player = grounded_player(&world);

        for _ in 0..60 {
            player.update(&PlayerInput::right(), &tuning, &world, DT);
        }

        assert!(player.on_ground());
        assert!((player.velocity.x - tuning.run_speed).abs() < 0.1, "vx = {}", player.velocity.x);
        assert!(player.velocity.y.abs() < 1e-3);
        assert!(player.facing_right);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let world = create_test_world();
        let tuning = PlayerTuning::default();
        let mut player = grounded_player(&world);

        player.update(&PlayerInput::jump(), &tuning, &world, DT);
        assert!(!player.on_ground());
        let rising = player.velocity.y;
        assert!(rising > 0.0);

        // Pressing again mid-air does nothing
        player.update(&PlayerInput::jump(), &tuning, &world, DT);
        assert!(player.velocity.y < rising);

        let mut peak = player.feet().y;
        let mut landed = false;
        for _ in 0..120 {
            let resolution = player.update(&PlayerInput::default(), &tuning, &world, DT);
            peak = peak.max(player.feet().y);
            if resolution.state.became_grounded_this_frame {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert!((peak - tuning.jump_height).abs() < 0.3, "peak was {peak}");
    }

    #[test]
    fn test_drop_through_one_way() {
        let mut world = create_test_world();
        world.add_one_way(Vec2::new(-2.0, 2.0), Vec2::new(2.0, 2.0));

        let tuning = PlayerTuning::default();
        let mut player = Player::new(
            1,
            "Test".to_string(),
            Vec2::new(0.0, 2.0),
            Player::HALF_EXTENTS,
            CharacterController2D::with_default_config(),
        );
        player
            .controller
            .warp_to_grounded(&mut player.body, &world)
            .expect("platform below");
        assert!((player.feet().y - 2.0).abs() < 1e-3);

        // Standing still keeps the player on the platform
        for _ in 0..10 {
            player.update(&PlayerInput::default(), &tuning, &world, DT);
        }
        assert!((player.feet().y - 2.0).abs() < 1e-3);

        for _ in 0..60 {
            player.update(&PlayerInput::down(), &tuning, &world, DT);
        }
        assert!(player.feet().y.abs() < 1e-3, "feet at {}", player.feet().y);
        assert!(player.on_ground());
    }

    #[test]
    fn test_respawn() {
        let world = create_test_world();
        let tuning = PlayerTuning::default();
        let mut player = grounded_player(&world);
        player.update(&PlayerInput::jump(), &tuning, &world, DT);

        player.respawn(Vec2::new(10.0, 0.0));
        assert_eq!(player.feet(), Vec2::new(10.0, 0.0));
        assert_eq!(player.velocity, Vec2::ZERO);
        assert!(!player.on_ground());
    }
}
