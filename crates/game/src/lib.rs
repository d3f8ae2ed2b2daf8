//! Platformer2D Game Logic
//!
//! This crate contains a small platformer simulation built on the
//! character controller:
//!
//! - Player input and the movement driver (gravity, running, jumping)
//! - Level construction with slopes, one-way platforms and triggers
//! - Trigger enter/stay/exit tracking
//! - The fixed-tick simulation loop
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation                             │
//! │  ┌─────────┐    ┌─────────────┐    ┌───────────────────────┐  │
//! │  │ Input   │───►│ Player      │───►│ Controller resolve    │  │
//! │  │ (held   │    │ (velocity,  │    │ (sweeps, slopes,      │  │
//! │  │ buttons)│    │  gravity)   │    │  one-way platforms)   │  │
//! │  └─────────┘    └─────────────┘    └───────────┬───────────┘  │
//! │                                                ▼              │
//! │                 ┌─────────────┐    ┌───────────────────────┐  │
//! │                 │ Triggers    │◄───│ Events (hits, landed) │  │
//! │                 └─────────────┘    └───────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod input;
pub mod level;
pub mod player;
pub mod simulation;
pub mod triggers;

// Re-export main types
pub use input::PlayerInput;
pub use level::{Level, SpawnPoint};
pub use player::{EntityId, Player, PlayerTuning};
pub use simulation::{Simulation, SimulationConfig, SimulationEvent};
pub use triggers::{TriggerEvent, TriggerTracker};

// Re-export physics types for convenience
pub use platformer2d_physics::{
    Body, CharacterController2D, CollisionLayers, CollisionWorld, ContactState, ControllerConfig,
    RaycastHit, Resolution,
};
