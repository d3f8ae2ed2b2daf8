//! Collision queries for character movement.
//!
//! The movement code never talks to geometry directly. It asks a
//! [`SpatialQuery`] to cast rays and gets back the nearest [`RaycastHit`].
//! [`CollisionWorld`] is the bundled implementation, good enough for tests,
//! tools and small games.
//!
//! # Key Types
//!
//! - [`CollisionLayers`]: Bit set used to filter which geometry a cast sees
//! - [`RaycastHit`]: Point, normal and distance of the nearest hit
//! - [`SpatialQuery`]: The ray-cast seam the controller depends on
//! - [`CollisionWorld`]: parry2d-backed boxes, slopes and one-way edges

mod flags;
mod hit;
mod query;
mod world;

pub use flags::CollisionLayers;
pub use hit::{ColliderId, RaycastHit};
pub use query::SpatialQuery;
pub use world::{Collider, CollisionWorld};
