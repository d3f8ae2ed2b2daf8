//! Collision world containing the level geometry.
//!
//! The collision world stores colliders (boxes, slopes, one-way edges,
//! triggers) and answers the ray casts the character controller needs.

use glam::Vec2;
use parry2d::math::{Isometry, Point, Real, Vector};
use parry2d::query::{intersection_test, Ray};
use parry2d::shape::SharedShape;

use super::flags::CollisionLayers;
use super::hit::{ColliderId, RaycastHit};
use super::query::SpatialQuery;

/// A piece of collision geometry in the world.
#[derive(Clone)]
pub struct Collider {
    /// Unique identifier for this collider.
    pub id: ColliderId,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
    /// Layers used for cast filtering.
    pub layers: CollisionLayers,
    /// Optional name, used by triggers for event reporting.
    pub name: Option<String>,
}

impl std::fmt::Debug for Collider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collider")
            .field("id", &self.id)
            .field("shape", &self.shape.shape_type())
            .field("layers", &self.layers)
            .field("name", &self.name)
            .finish()
    }
}

/// The collision world containing all level geometry.
///
/// Supports:
/// - Axis-aligned boxes (floors, walls, blocks)
/// - Right-triangle slopes
/// - One-way edges (platforms you can jump up through)
/// - Arbitrary convex polygons
/// - Trigger boxes (never returned by platform casts)
///
/// The world is only read during movement, so a single instance can be
/// shared by every character in a level.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    /// All colliders in insertion order.
    colliders: Vec<Collider>,
    /// Next collider ID to assign.
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the box in world space
    /// * `half_extents` - Half-size along x and y
    /// * `layers` - Layers for cast filtering
    pub fn add_box(&mut self, center: Vec2, half_extents: Vec2, layers: CollisionLayers) -> ColliderId {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        self.insert(shape, Isometry::translation(center.x, center.y), layers, None)
    }

    /// Add a right-triangle slope.
    ///
    /// The slope's base runs from `base_start` to `base_end`; the surface
    /// rises by `rise` toward `base_end`. A base running right to left gives
    /// a slope that climbs toward the left.
    pub fn add_slope(
        &mut self,
        base_start: Vec2,
        base_end: Vec2,
        rise: f32,
        layers: CollisionLayers,
    ) -> ColliderId {
        let top = base_end + Vec2::new(0.0, rise);
        let mut vertices = [to_point(base_start), to_point(base_end), to_point(top)];

        // Keep counter-clockwise winding regardless of slope direction
        let ab = vertices[1] - vertices[0];
        let ac = vertices[2] - vertices[0];
        if ab.x * ac.y - ab.y * ac.x < 0.0 {
            vertices.swap(1, 2);
        }

        let shape = SharedShape::triangle(vertices[0], vertices[1], vertices[2]);
        self.insert(shape, Isometry::identity(), layers, None)
    }

    /// Add a one-way platform edge.
    ///
    /// One-way edges sit on [`CollisionLayers::ONE_WAY`]; the controller
    /// drops that layer from casts that should pass through.
    pub fn add_one_way(&mut self, start: Vec2, end: Vec2) -> ColliderId {
        let shape = SharedShape::segment(to_point(start), to_point(end));
        self.insert(shape, Isometry::identity(), CollisionLayers::ONE_WAY, None)
    }

    /// Add a convex polygon built from the hull of `points`.
    ///
    /// # Returns
    ///
    /// The collider ID, or `None` if the hull couldn't be computed.
    pub fn add_convex_polygon(&mut self, points: &[Vec2], layers: CollisionLayers) -> Option<ColliderId> {
        let parry_points: Vec<Point<Real>> = points.iter().copied().map(to_point).collect();
        let shape = SharedShape::convex_hull(&parry_points)?;
        Some(self.insert(shape, Isometry::identity(), layers, None))
    }

    /// Add a named trigger box.
    pub fn add_trigger(&mut self, center: Vec2, half_extents: Vec2, name: &str) -> ColliderId {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        self.insert(
            shape,
            Isometry::translation(center.x, center.y),
            CollisionLayers::TRIGGER,
            Some(name.to_string()),
        )
    }

    /// Remove a collider. Returns `false` if it was not in the world.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        let before = self.colliders.len();
        self.colliders.retain(|c| c.id != id);
        self.colliders.len() != before
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    /// Get the number of colliders.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Look up a collider by ID.
    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id == id)
    }

    /// Name of a collider, if it has one.
    pub fn collider_name(&self, id: ColliderId) -> Option<&str> {
        self.collider(id).and_then(|c| c.name.as_deref())
    }

    /// Perform a raycast through the world.
    ///
    /// Returns the nearest hit among colliders on `mask`. A ray that starts
    /// inside a collider reports a hit at distance zero whose normal points
    /// back along the ray.
    pub fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RaycastHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO || !(max_distance > 0.0) {
            return None;
        }

        let ray = Ray::new(to_point(origin), Vector::new(dir.x, dir.y));

        let mut closest: Option<RaycastHit> = None;

        for collider in &self.colliders {
            if !mask.intersects(collider.layers) {
                continue;
            }

            let Some(intersection) =
                collider
                    .shape
                    .cast_ray_and_get_normal(&collider.transform, &ray, max_distance, true)
            else {
                continue;
            };

            let toi = intersection.time_of_impact;
            if toi > max_distance {
                continue;
            }
            if closest.as_ref().is_some_and(|hit| hit.distance <= toi) {
                continue;
            }

            let mut normal = Vec2::new(intersection.normal.x, intersection.normal.y).normalize_or_zero();
            if normal == Vec2::ZERO {
                // Started inside the shape
                normal = -dir;
            } else if normal.dot(dir) > 0.0 {
                normal = -normal;
            }

            closest = Some(RaycastHit {
                point: origin + dir * toi,
                normal,
                distance: toi,
                collider: collider.id,
                layers: collider.layers,
            });
        }

        closest
    }

    /// Colliders on `mask` that intersect the box spanning `min`..`max`.
    pub fn overlapping(&self, min: Vec2, max: Vec2, mask: CollisionLayers) -> Vec<ColliderId> {
        let half = ((max - min) * 0.5).max(Vec2::ZERO);
        let center = (min + max) * 0.5;
        let probe = SharedShape::cuboid(half.x, half.y);
        let probe_transform = Isometry::translation(center.x, center.y);

        self.colliders
            .iter()
            .filter(|c| mask.intersects(c.layers))
            .filter(|c| {
                intersection_test(
                    &probe_transform,
                    probe.as_ref(),
                    &c.transform,
                    c.shape.as_ref(),
                )
                .unwrap_or(false)
            })
            .map(|c| c.id)
            .collect()
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn insert(
        &mut self,
        shape: SharedShape,
        transform: Isometry<Real>,
        layers: CollisionLayers,
        name: Option<String>,
    ) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;

        self.colliders.push(Collider {
            id,
            shape,
            transform,
            layers,
            name,
        });

        id
    }
}

impl SpatialQuery for CollisionWorld {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RaycastHit> {
        self.raycast(origin, direction, max_distance, mask)
    }
}

#[inline]
fn to_point(v: Vec2) -> Point<Real> {
    Point::new(v.x, v.y)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();

        // Floor with its top at y=0
        world.add_box(
            Vec2::new(0.0, -0.5),
            Vec2::new(50.0, 0.5),
            CollisionLayers::SOLID,
        );

        // Wall with its left face at x=9.5
        world.add_box(
            Vec2::new(10.0, 2.5),
            Vec2::new(0.5, 2.5),
            CollisionLayers::SOLID,
        );

        world
    }

    #[test]
    fn test_raycast_hit() {
        let world = create_test_world();

        let hit = world
            .raycast(Vec2::new(0.0, 1.0), Vec2::X, 100.0, CollisionLayers::SOLID)
            .expect("should hit the wall");

        assert!((hit.point.x - 9.5).abs() < 1e-3);
        assert!((hit.distance - 9.5).abs() < 1e-3);
        assert!((hit.normal - Vec2::new(-1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_raycast_miss() {
        let world = create_test_world();

        let hit = world.raycast(Vec2::new(0.0, 1.0), -Vec2::X, 100.0, CollisionLayers::SOLID);
        assert!(hit.is_none());

        // Wall is out of reach
        let hit = world.raycast(Vec2::new(0.0, 1.0), Vec2::X, 5.0, CollisionLayers::SOLID);
        assert!(hit.is_none());
    }

    #[test]
    fn test_raycast_degenerate_direction() {
        let world = create_test_world();
        assert!(world
            .raycast(Vec2::new(0.0, 1.0), Vec2::ZERO, 10.0, CollisionLayers::SOLID)
            .is_none());
        assert!(world
            .raycast(Vec2::new(0.0, 1.0), Vec2::X, 0.0, CollisionLayers::SOLID)
            .is_none());
    }

    #[test]
    fn test_layer_mask_filtering() {
        let mut world = CollisionWorld::new();

        world.add_box(Vec2::new(5.0, 1.0), Vec2::new(0.5, 1.0), CollisionLayers::SOLID);
        world.add_trigger(Vec2::new(3.0, 1.0), Vec2::new(0.5, 1.0), "door");

        // SOLID mask should ignore the trigger at x=2.5
        let hit = world
            .raycast(Vec2::new(0.0, 1.0), Vec2::X, 100.0, CollisionLayers::SOLID)
            .expect("should hit the wall");
        assert!((hit.point.x - 4.5).abs() < 1e-3);
    }

    #[test]
    fn test_slope_normal() {
        let mut world = CollisionWorld::new();
        // Rises 2 over 4 toward +x: about 26.57 degrees
        world.add_slope(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), 2.0, CollisionLayers::SOLID);

        let hit = world
            .raycast(Vec2::new(1.0, 5.0), -Vec2::Y, 10.0, CollisionLayers::SOLID)
            .expect("should hit the slope");

        assert!((hit.point.y - 0.5).abs() < 1e-3);
        assert!(hit.normal.x < 0.0);
        assert!((hit.angle_from_up() - 0.5f32.atan().to_degrees()).abs() < 0.1);
    }

    #[test]
    fn test_left_rising_slope() {
        let mut world = CollisionWorld::new();
        world.add_slope(Vec2::new(4.0, 0.0), Vec2::new(0.0, 0.0), 2.0, CollisionLayers::SOLID);

        let hit = world
            .raycast(Vec2::new(3.0, 5.0), -Vec2::Y, 10.0, CollisionLayers::SOLID)
            .expect("should hit the slope");

        assert!((hit.point.y - 0.5).abs() < 1e-3);
        assert!(hit.normal.x > 0.0);
    }

    #[test]
    fn test_one_way_edge() {
        let mut world = CollisionWorld::new();
        world.add_one_way(Vec2::new(-2.0, 3.0), Vec2::new(2.0, 3.0));

        let down = world
            .raycast(Vec2::new(0.0, 4.0), -Vec2::Y, 2.0, CollisionLayers::MASK_PLATFORMS)
            .expect("should land on the edge");
        assert!((down.point.y - 3.0).abs() < 1e-4);
        assert!(down.normal.y > 0.0);
        assert_eq!(down.layers, CollisionLayers::ONE_WAY);

        let without_one_way = CollisionLayers::MASK_PLATFORMS.difference(CollisionLayers::ONE_WAY);
        assert!(world
            .raycast(Vec2::new(0.0, 2.0), Vec2::Y, 2.0, without_one_way)
            .is_none());
    }

    #[test]
    fn test_ray_starting_inside() {
        let world = create_test_world();

        let hit = world
            .raycast(Vec2::new(0.0, -0.25), Vec2::X, 1.0, CollisionLayers::SOLID)
            .expect("should report the floor");
        assert!(hit.distance.abs() < 1e-6);
        assert!((hit.normal - Vec2::new(-1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut world = create_test_world();
        world.add_box(Vec2::new(5.0, 1.0), Vec2::new(0.5, 1.0), CollisionLayers::SOLID);

        let hit = world
            .raycast(Vec2::new(0.0, 1.0), Vec2::X, 100.0, CollisionLayers::SOLID)
            .expect("should hit");
        assert!((hit.point.x - 4.5).abs() < 1e-3);
    }

    #[test]
    fn test_overlapping_triggers() {
        let mut world = create_test_world();
        let door = world.add_trigger(Vec2::new(3.0, 1.0), Vec2::new(0.5, 1.0), "door");

        let inside = world.overlapping(
            Vec2::new(2.8, 0.5),
            Vec2::new(3.2, 1.5),
            CollisionLayers::TRIGGER,
        );
        assert_eq!(inside, vec![door]);
        assert_eq!(world.collider_name(door), Some("door"));

        let outside = world.overlapping(
            Vec2::new(-3.0, 0.5),
            Vec2::new(-2.0, 1.5),
            CollisionLayers::TRIGGER,
        );
        assert!(outside.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut world = create_test_world();
        assert_eq!(world.collider_count(), 2);

        let extra = world.add_box(Vec2::ZERO, Vec2::ONE, CollisionLayers::SOLID);
        assert!(world.remove(extra));
        assert!(!world.remove(extra));
        assert_eq!(world.collider_count(), 2);

        world.clear();
        assert_eq!(world.collider_count(), 0);
    }

    #[test]
    fn test_convex_polygon() {
        let mut world = CollisionWorld::new();
        let id = world.add_convex_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(2.0, 0.0),
                Vec2::new(2.0, 2.0),
                Vec2::new(0.0, 2.0),
            ],
            CollisionLayers::SOLID,
        );
        assert!(id.is_some());

        let hit = world
            .raycast(Vec2::new(-1.0, 1.0), Vec2::X, 5.0, CollisionLayers::SOLID)
            .expect("should hit the polygon");
        assert!((hit.point.x).abs() < 1e-3);
    }
}
