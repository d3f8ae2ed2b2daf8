//! Collision layers for cast filtering.
//!
//! Every collider carries a set of layers and every cast carries a mask. A
//! cast only sees colliders whose layers intersect its mask.

use serde::{Deserialize, Serialize};

/// Layer bit set describing what a collider is, or what a cast can hit.
///
/// One-way platforms live on their own layer so the controller can drop them
/// from individual casts (rising through a platform, dropping down through
/// one) while still landing on them from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    /// Nothing.
    pub const NONE: Self = Self(0);

    /// Solid level geometry - floors, walls, slopes.
    pub const SOLID: Self = Self(1 << 0);

    /// One-way platforms - block only from above.
    pub const ONE_WAY: Self = Self(1 << 1);

    /// Trigger volumes - never block, only report overlaps.
    pub const TRIGGER: Self = Self(1 << 2);

    /// Moving platforms and other solid props owned by gameplay code.
    pub const PROP: Self = Self(1 << 3);

    /// Everything a walking character stands on or bumps into.
    pub const MASK_PLATFORMS: Self = Self(Self::SOLID.0 | Self::ONE_WAY.0 | Self::PROP.0);

    /// Check if these layers contain every bit of `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given layers are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Combine two layer sets.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove layers from this set.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Check if no layer is set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for CollisionLayers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for CollisionLayers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for CollisionLayers {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_operations() {
        let combined = CollisionLayers::SOLID | CollisionLayers::ONE_WAY;

        assert!(combined.contains(CollisionLayers::SOLID));
        assert!(combined.contains(CollisionLayers::ONE_WAY));
        assert!(!combined.contains(CollisionLayers::TRIGGER));
        assert!(combined.intersects(CollisionLayers::SOLID | CollisionLayers::TRIGGER));
    }

    #[test]
    fn test_difference_drops_one_way() {
        let mask = CollisionLayers::MASK_PLATFORMS.difference(CollisionLayers::ONE_WAY);
        assert!(mask.contains(CollisionLayers::SOLID));
        assert!(!mask.intersects(CollisionLayers::ONE_WAY));
        assert!(!mask.is_empty());
    }

    #[test]
    fn test_platform_mask_ignores_triggers() {
        assert!(!CollisionLayers::MASK_PLATFORMS.intersects(CollisionLayers::TRIGGER));
    }
}
