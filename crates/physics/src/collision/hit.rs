//! Ray hit records.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::flags::CollisionLayers;

/// Identifier of a collider inside a [`CollisionWorld`](super::CollisionWorld).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// The nearest surface a ray ran into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaycastHit {
    /// Contact point in world space.
    pub point: Vec2,

    /// Unit surface normal at the contact point.
    ///
    /// Points away from the surface, back toward where the ray came from.
    pub normal: Vec2,

    /// Distance from the ray origin to `point`.
    pub distance: f32,

    /// Collider that was hit.
    pub collider: ColliderId,

    /// Layers of the collider that was hit.
    pub layers: CollisionLayers,
}

impl RaycastHit {
    /// Angle in degrees between the surface normal and world up.
    ///
    /// 0 for flat ground, 90 for a vertical wall, 180 for a ceiling.
    pub fn angle_from_up(&self) -> f32 {
        let normal = self.normal.normalize_or_zero();
        if normal == Vec2::ZERO {
            return 0.0;
        }
        normal.dot(Vec2::Y).clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// Check if the hit surface is flat, walkable ground.
    #[inline]
    pub fn is_flat_ground(&self) -> bool {
        self.angle_from_up() < 1.0e-3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_with_normal(normal: Vec2) -> RaycastHit {
        RaycastHit {
            point: Vec2::ZERO,
            normal,
            distance: 0.0,
            collider: ColliderId(0),
            layers: CollisionLayers::SOLID,
        }
    }

    #[test]
    fn test_angle_from_up() {
        assert!(hit_with_normal(Vec2::Y).angle_from_up().abs() < 1e-4);
        assert!((hit_with_normal(-Vec2::X).angle_from_up() - 90.0).abs() < 1e-4);
        assert!((hit_with_normal(-Vec2::Y).angle_from_up() - 180.0).abs() < 1e-3);

        let slope = Vec2::new(-(30f32.to_radians().sin()), 30f32.to_radians().cos());
        assert!((hit_with_normal(slope).angle_from_up() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_flat_ground() {
        assert!(hit_with_normal(Vec2::Y).is_flat_ground());
        assert!(!hit_with_normal(Vec2::new(-0.2, 1.0)).is_flat_ground());
    }
}
