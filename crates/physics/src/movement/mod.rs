//! Kinematic character movement.
//!
//! This module implements platformer-style movement with:
//!
//! - Ray-swept collision on both axes, inset by a skin width
//! - Climbing walkable slopes and sticking to slopes on the way down
//! - One-way platforms that only block from above
//! - Per-tick contact flags and an ordered list of hits
//!
//! # Design
//!
//! Movement is driven by the [`CharacterController2D`], which moves a caller
//! owned [`Body`] through any [`SpatialQuery`](crate::collision::SpatialQuery)
//! and returns a [`Resolution`] describing what happened.
//!
//! All movement is deterministic: the same body, displacement and world
//! always produce the same resolution.

mod body;
mod config;
mod controller;
mod curve;
mod slope;
mod state;
mod sweep;

pub use body::{Body, RaycastOrigins};
pub use config::{ConfigError, ControllerConfig, MAX_RAYS, MIN_RAYS, SKIN_WIDTH_RANGE};
pub use controller::{CharacterController2D, Resolution, WarpError, MAX_WARP_STEPS};
pub use curve::{Keyframe, SlopeCurve};
pub use slope::SlopeOutcome;
pub use state::ContactState;
