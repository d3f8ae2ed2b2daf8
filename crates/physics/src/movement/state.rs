//! Per-tick contact state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which sides of the body touched geometry during one resolution.
///
/// A fresh value is produced by every call to
/// [`CharacterController2D::resolve`](super::CharacterController2D::resolve);
/// nothing carries over between ticks except through `was_grounded_last_frame`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactState {
    /// Blocked while moving right.
    pub right: bool,

    /// Blocked while moving left.
    pub left: bool,

    /// Blocked while moving up.
    pub above: bool,

    /// Standing on something (landed, or climbing a slope).
    pub below: bool,

    /// The body was snapped onto a descending slope this tick.
    pub moving_down_slope: bool,

    /// Angle of that slope from world up, in degrees.
    ///
    /// Only meaningful when `moving_down_slope` is set.
    pub slope_angle: f32,

    /// `below` at the end of the previous tick.
    pub was_grounded_last_frame: bool,

    /// `below` went from false to true on this tick.
    pub became_grounded_this_frame: bool,
}

impl ContactState {
    /// A cleared state that remembers last tick's grounding.
    pub fn fresh(was_grounded_last_frame: bool) -> Self {
        Self {
            was_grounded_last_frame,
            ..Default::default()
        }
    }

    /// The same contacts as `previous`, seen one tick later without moving.
    ///
    /// Slope descent only describes a tick that moved, so it is cleared.
    pub fn carried_from(previous: &ContactState) -> Self {
        Self {
            was_grounded_last_frame: previous.below,
            became_grounded_this_frame: false,
            moving_down_slope: false,
            slope_angle: 0.0,
            ..*previous
        }
    }

    /// Check if any side is touching.
    #[inline]
    pub fn has_collision(&self) -> bool {
        self.below || self.right || self.left || self.above
    }

    /// Check if the body is standing on something.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.below
    }
}

impl fmt::Display for ContactState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r:{} l:{} a:{} b:{} down_slope:{} angle:{:.1} was_grounded:{} became_grounded:{}",
            self.right,
            self.left,
            self.above,
            self.below,
            self.moving_down_slope,
            self.slope_angle,
            self.was_grounded_last_frame,
            self.became_grounded_this_frame,
        )
    }
}
