//! Player input handling.
//!
//! Input arrives as held-button state per tick. The player driver turns it
//! into a desired velocity; nothing here touches physics.

use serde::{Deserialize, Serialize};

/// Buttons held by one player during a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,

    /// Jump (only takes effect while grounded).
    pub jump: bool,

    /// Drop through one-way platforms and slam downward while grounded.
    pub down: bool,

    /// Frame number this input was generated for.
    pub frame: u64,
}

impl PlayerInput {
    /// Input holding right.
    pub fn right() -> Self {
        Self {
            right: true,
            ..Default::default()
        }
    }

    /// Input holding left.
    pub fn left() -> Self {
        Self {
            left: true,
            ..Default::default()
        }
    }

    /// Input pressing jump.
    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }

    /// Input holding down.
    pub fn down() -> Self {
        Self {
            down: true,
            ..Default::default()
        }
    }

    /// Horizontal direction: -1, 0 or 1.
    ///
    /// Right wins when both are held.
    pub fn horizontal_axis(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }

    /// Check if any movement input is active.
    pub fn has_movement(&self) -> bool {
        self.left || self.right || self.jump || self.down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_axis() {
        assert_eq!(PlayerInput::default().horizontal_axis(), 0.0);
        assert_eq!(PlayerInput::right().horizontal_axis(), 1.0);
        assert_eq!(PlayerInput::left().horizontal_axis(), -1.0);

        let both = PlayerInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.horizontal_axis(), 1.0);
    }

    #[test]
    fn test_has_movement() {
        assert!(!PlayerInput::default().has_movement());
        assert!(PlayerInput::jump().has_movement());
        assert!(PlayerInput::down().has_movement());
    }
}
