//! The moving rectangle and the ray origins derived from it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle moved by the controller.
///
/// The caller owns the body and may move or resize it between ticks; the
/// controller reads it fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Anchor point in world space. The rectangle sits at `offset` from it.
    pub position: Vec2,

    /// Unscaled half-size along x and y.
    pub half_extents: Vec2,

    /// Unscaled offset of the rectangle's center from `position`.
    pub offset: Vec2,

    /// Per-axis scale applied to `half_extents` and `offset`.
    pub scale: Vec2,
}

impl Body {
    /// Create a body with unit scale.
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        Self {
            position,
            half_extents,
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }

    /// Return a copy with the rectangle shifted away from `position`.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Return a copy with a different scale.
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Half-size after scaling.
    #[inline]
    pub fn scaled_half_extents(&self) -> Vec2 {
        self.half_extents * self.scale.abs()
    }

    /// Center of the rectangle in world space.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.offset * self.scale
    }

    /// Bottom-left corner.
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center() - self.scaled_half_extents()
    }

    /// Top-right corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center() + self.scaled_half_extents()
    }

    /// Move the body.
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Check if rays inset by `skin_width` would produce inverted or
    /// meaningless geometry.
    pub fn is_degenerate(&self, skin_width: f32) -> bool {
        let half = self.scaled_half_extents();
        !self.center().is_finite() || !half.is_finite() || skin_width >= half.min_element()
    }
}

/// Corner origins for one resolution, inset by the skin width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastOrigins {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl RaycastOrigins {
    /// Inset the body's bounds by `skin_width` on every side.
    pub fn from_body(body: &Body, skin_width: f32) -> Self {
        let inset = Vec2::splat(skin_width);
        let min = body.min() + inset;
        let max = body.max() - inset;

        Self {
            top_left: Vec2::new(min.x, max.y),
            top_right: max,
            bottom_left: min,
            bottom_right: Vec2::new(max.x, min.y),
        }
    }

    /// Width of the inset rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.bottom_left.x
    }

    /// Height of the inset rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.top_left.y - self.bottom_left.y
    }

    /// Midpoint of the inset bottom edge.
    #[inline]
    pub fn bottom_center(&self) -> Vec2 {
        (self.bottom_left + self.bottom_right) * 0.5
    }

    /// Vertical gap between `rays` rays spread over the inset height.
    #[inline]
    pub fn row_spacing(&self, rays: usize) -> f32 {
        self.height() / (rays.max(2) - 1) as f32
    }

    /// Horizontal gap between `rays` rays spread over the inset width.
    #[inline]
    pub fn column_spacing(&self, rays: usize) -> f32 {
        self.width() / (rays.max(2) - 1) as f32
    }
}
