//! The ray-cast seam between the controller and the level geometry.

use glam::Vec2;

use super::flags::CollisionLayers;
use super::hit::RaycastHit;

/// Read-only ray queries against level geometry.
///
/// The controller calls this several times per tick and assumes every call
/// is side-effect free. Implement it for whatever owns your level geometry;
/// [`CollisionWorld`](super::CollisionWorld) is the bundled implementation.
pub trait SpatialQuery {
    /// Cast a ray and return the nearest hit within `max_distance`.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray start in world space
    /// * `direction` - Ray direction (need not be normalized)
    /// * `max_distance` - Maximum travel along the normalized direction
    /// * `mask` - Only colliders on these layers are considered
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RaycastHit>;
}

impl<T: SpatialQuery + ?Sized> SpatialQuery for &T {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RaycastHit> {
        (**self).cast(origin, direction, max_distance, mask)
    }
}
