//! Platformer2D Physics
//!
//! A kinematic character controller for tick-based 2D platformers. Given the
//! displacement a character wants to make this tick, it sweeps fans of rays
//! through the level and returns the largest displacement that does not pass
//! through solid geometry, together with the sides of the body that are in
//! contact.
//!
//! # Architecture
//!
//! The crate is split into two systems:
//!
//! - **Collision**: Layers, ray hits, the [`SpatialQuery`] seam and a
//!   reference [`CollisionWorld`] built on parry2d
//! - **Movement**: The [`CharacterController2D`] resolver and its
//!   configuration, contact state and slope handling
//!
//! # Resolution Order
//!
//! Every call to [`CharacterController2D::resolve`] runs the same pipeline:
//!
//! 1. Prime the four inset ray origins from the body's bounds
//! 2. Probe for a descending slope (only when falling and grounded)
//! 3. Sweep horizontally, letting the lowest ray climb slopes
//! 4. Sweep vertically from the horizontally-resolved position
//! 5. Finalize contact state, velocity and the ordered hit list

pub mod collision;
pub mod movement;

// Re-export commonly used types
pub use collision::{ColliderId, CollisionLayers, CollisionWorld, RaycastHit, SpatialQuery};
pub use movement::{
    Body, CharacterController2D, ConfigError, ContactState, ControllerConfig, Resolution,
    SlopeCurve, WarpError,
};
