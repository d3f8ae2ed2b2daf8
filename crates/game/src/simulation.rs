//! Game simulation - the main game loop.
//!
//! This module contains the deterministic fixed-tick simulation: every tick
//! each player is moved by its input, then trigger overlaps are diffed.

use glam::Vec2;
use platformer2d_physics::{CharacterController2D, ConfigError, ControllerConfig, RaycastHit};
use serde::{Deserialize, Serialize};

use crate::input::PlayerInput;
use crate::level::Level;
use crate::player::{EntityId, Player, PlayerTuning};
use crate::triggers::{TriggerEvent, TriggerTracker};

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Character controller tuning shared by every player.
    pub controller: ControllerConfig,

    /// Player driver tuning.
    pub player: PlayerTuning,

    /// Collision half-size of new players.
    pub player_half_extents: Vec2,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            controller: ControllerConfig::default(),
            player: PlayerTuning::default(),
            player_half_extents: Player::HALF_EXTENTS,
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A player's movement ran into geometry.
    Collision { player: EntityId, hit: RaycastHit },

    /// A player touched down after being airborne.
    Landed { player: EntityId, position: Vec2 },

    /// A player's overlap with a trigger changed (or continued).
    Trigger {
        player: EntityId,
        event: TriggerEvent,
        name: String,
    },
}

/// The main game simulation.
///
/// All state advances deterministically from player inputs and a fixed
/// timestep.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    /// All players in the game.
    pub players: Vec<Player>,

    /// Validated controller that new players start from.
    controller_template: CharacterController2D,

    /// Trigger overlaps from the previous tick.
    triggers: TriggerTracker,

    /// Next entity ID to assign.
    next_entity_id: EntityId,
}

impl Simulation {
    /// Create a new simulation, rejecting invalid controller tuning.
    pub fn new(config: SimulationConfig, level: Level) -> Result<Self, ConfigError> {
        let controller_template = CharacterController2D::new(config.controller.clone())?;
        Ok(Self::with_template(config, level, controller_template))
    }

    /// Create a simulation with default configuration and the test course.
    pub fn test() -> Self {
        Self::with_template(
            SimulationConfig::default(),
            Level::test_course(),
            CharacterController2D::with_default_config(),
        )
    }

    fn with_template(config: SimulationConfig, level: Level, controller_template: CharacterController2D) -> Self {
        Self {
            frame: 0,
            config,
            level,
            players: Vec::new(),
            controller_template,
            triggers: TriggerTracker::new(),
            next_entity_id: 1,
        }
    }

    /// Add a player to the simulation, settled onto the ground below its
    /// spawn point.
    ///
    /// Returns the player's ID.
    pub fn add_player(&mut self, name: &str) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;

        // Find a spawn point
        let spawn_index = self.players.len() % self.level.player_spawn_count().max(1);
        let spawn = self.level.get_player_spawn(spawn_index).copied();

        let position = spawn.map(|s| s.position).unwrap_or(Vec2::ZERO);
        let facing_right = spawn.map(|s| s.facing_right).unwrap_or(true);

        let mut player = Player::new(
            id,
            name.to_string(),
            position,
            self.config.player_half_extents,
            self.controller_template.clone(),
        );
        player.facing_right = facing_right;

        if let Err(err) = player
            .controller
            .warp_to_grounded(&mut player.body, &self.level.collision)
        {
            log::warn!("player {id} spawned in the air: {err}");
        }

        log::debug!("added player {id} ({name}) at {}", player.position());
        self.players.push(player);
        id
    }

    /// Remove a player from the simulation.
    ///
    /// Returns exit events for every trigger the player was still inside.
    pub fn remove_player(&mut self, player_id: EntityId) -> Vec<SimulationEvent> {
        self.players.retain(|p| p.id != player_id);

        self.triggers
            .remove_player(player_id)
            .into_iter()
            .map(|event| SimulationEvent::Trigger {
                player: player_id,
                event,
                name: self
                    .level
                    .trigger_name(event.collider())
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect()
    }

    /// Get a player by ID.
    pub fn get_player(&self, player_id: EntityId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Get a mutable reference to a player by ID.
    pub fn get_player_mut(&mut self, player_id: EntityId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Replace the controller tuning for every player.
    ///
    /// Nothing changes if the new tuning is invalid.
    pub fn set_controller_config(&mut self, config: ControllerConfig) -> Result<(), ConfigError> {
        self.controller_template.set_config(config.clone())?;
        for player in &mut self.players {
            player.controller.set_config(config.clone())?;
        }
        self.config.controller = config;
        Ok(())
    }

    /// Advance the simulation by one tick.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Player inputs indexed by player position in the `players` array
    pub fn tick(&mut self, inputs: &[PlayerInput]) -> Vec<SimulationEvent> {
        let delta_time = self.config.delta_time();
        let mut events = Vec::new();

        for (i, player) in self.players.iter_mut().enumerate() {
            // Get input for this player (default if not provided)
            let input = inputs.get(i).copied().unwrap_or_default();

            let resolution = player.update(&input, &self.config.player, &self.level.collision, delta_time);

            let id = player.id;
            resolution.dispatch(|hit, _| {
                events.push(SimulationEvent::Collision { player: id, hit: *hit });
            });

            if resolution.state.became_grounded_this_frame {
                events.push(SimulationEvent::Landed {
                    player: id,
                    position: player.position(),
                });
            }
        }

        for player in &self.players {
            let trigger_events =
                self.triggers
                    .update(player.id, player.body.min(), player.body.max(), &self.level.collision);

            for event in trigger_events {
                let name = self
                    .level
                    .trigger_name(event.collider())
                    .unwrap_or_default()
                    .to_string();
                if !matches!(event, TriggerEvent::Stay(_)) {
                    log::debug!("player {} trigger {:?} ({})", player.id, event, name);
                }
                events.push(SimulationEvent::Trigger {
                    player: player.id,
                    event,
                    name,
                });
            }
        }

        self.frame += 1;
        events
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================
