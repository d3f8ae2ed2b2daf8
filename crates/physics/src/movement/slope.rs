//! Slope handling.
//!
//! Ascending is decided by the lowest horizontal ray; descending by a probe
//! cast straight down from the middle of the body before either sweep runs.

use glam::Vec2;

use crate::collision::SpatialQuery;

use super::sweep::Sweep;

/// Steepest surface the descend probe is sized to reach (degrees).
const DESCEND_PROBE_ANGLE: f32 = 75.0;

/// What the lowest horizontal ray's hit turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlopeOutcome {
    /// A wall: regular horizontal blocking applies.
    NotHandled,

    /// Too steep to climb: horizontal movement stops.
    Blocked,

    /// Climbable, but the body is moving up too fast to be walking. The
    /// displacement is left alone.
    Rising,

    /// Walking up the slope with this displacement.
    Climbing { horizontal: f32, vertical: f32 },
}

/// Adjustment made by the descend probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SlopeDescent {
    pub displacement: Vec2,
    pub angle: f32,
}

impl<Q: SpatialQuery + ?Sized> Sweep<'_, Q> {
    /// Decide how to move into a surface at `angle` degrees from up.
    pub fn ascend_slope(&self, delta: Vec2, angle: f32) -> SlopeOutcome {
        // Ties go to even, so 90.5 still counts as a wall
        if angle.round_ties_even() == 90.0 {
            return SlopeOutcome::NotHandled;
        }

        if angle >= self.config.slope_limit {
            return SlopeOutcome::Blocked;
        }

        // Heuristic: this much upward motion is a jump, not slope inertia
        if delta.y >= self.config.jumping_threshold {
            return SlopeOutcome::Rising;
        }

        let horizontal = delta.x * self.config.slope_speed_multiplier.evaluate(angle);
        let vertical = (angle.to_radians().tan() * horizontal).abs();
        let climb = Vec2::new(horizontal, vertical);

        // The diagonal may reach geometry the flat ray never saw
        let going_right = horizontal > 0.0;
        let origin = if going_right {
            self.origins.bottom_right
        } else {
            self.origins.bottom_left
        };

        let length = climb.length();
        if length > 0.0 {
            if let Some(hit) = self
                .query
                .cast(origin, climb / length, length, self.lowest_ray_mask())
            {
                let mut clamped = hit.point - origin;
                if going_right {
                    clamped.x -= self.config.skin_width;
                } else {
                    clamped.x += self.config.skin_width;
                }
                return SlopeOutcome::Climbing {
                    horizontal: clamped.x,
                    vertical: clamped.y,
                };
            }
        }

        SlopeOutcome::Climbing {
            horizontal,
            vertical,
        }
    }

    /// Look for a slope under the body that `delta` is walking down.
    ///
    /// Returns the displacement that keeps the body on the surface instead of
    /// stepping off it into the air.
    pub(crate) fn probe_descending_slope(&self, delta: Vec2) -> Option<SlopeDescent> {
        let origin = self.origins.bottom_center();
        let half_width = self.origins.bottom_right.x - origin.x;
        let length = DESCEND_PROBE_ANGLE.to_radians().tan() * half_width;

        let hit = self
            .query
            .cast(origin, Vec2::NEG_Y, length, self.config.platform_mask)?;

        if hit.is_flat_ground() {
            return None;
        }

        // Normal leaning the way we move means the surface falls away ahead
        if direction_sign(hit.normal.x) != direction_sign(delta.x) {
            return None;
        }

        let angle = hit.angle_from_up();
        let multiplier = self.config.slope_speed_multiplier.evaluate(-angle);

        Some(SlopeDescent {
            displacement: Vec2::new(
                delta.x * multiplier,
                hit.point.y - origin.y - self.config.skin_width,
            ),
            angle,
        })
    }
}

/// Sign that treats zero as positive.
#[inline]
fn direction_sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
