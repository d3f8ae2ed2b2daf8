//! Controller tuning.
//!
//! Everything the resolver reads besides the body and the world lives here,
//! so a config can be swapped between ticks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::CollisionLayers;

use super::curve::SlopeCurve;

/// Fewest rays allowed along either axis.
pub const MIN_RAYS: usize = 2;

/// Most rays allowed along either axis.
pub const MAX_RAYS: usize = 20;

/// Allowed skin width range (units).
pub const SKIN_WIDTH_RANGE: (f32, f32) = (0.001, 0.3);

/// Configuration rejected by [`ControllerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{axis} ray count {count} is outside 2..=20")]
    RayCount { axis: &'static str, count: usize },

    #[error("skin width {0} is outside 0.001..=0.3")]
    SkinWidth(f32),

    #[error("slope limit {0} is outside 0..=90 degrees")]
    SlopeLimit(f32),

    #[error("jumping threshold {0} is not finite")]
    JumpingThreshold(f32),

    #[error("slope speed curve has no keys")]
    EmptySlopeCurve,

    #[error("slope speed curve keys are unsorted or not finite")]
    MalformedSlopeCurve,
}

/// Configuration for the character controller.
///
/// Distances are in world units, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // ========================================================================
    // Ray Casting
    // ========================================================================
    /// Inset from the body's edges that every ray starts from.
    pub skin_width: f32,

    /// Rays cast along the leading side when moving horizontally.
    pub horizontal_rays: usize,

    /// Rays cast along the leading side when moving vertically.
    pub vertical_rays: usize,

    // ========================================================================
    // Slopes
    // ========================================================================
    /// Steepest walkable slope, measured from world up.
    pub slope_limit: f32,

    /// Upward displacement at or above which a slope hit is treated as a
    /// jump rather than a climb.
    ///
    /// This is a heuristic: small upward motion from a previous climb must
    /// not count as a jump, deliberate jumps must not be flattened onto the
    /// slope.
    pub jumping_threshold: f32,

    /// Horizontal speed multiplier keyed by signed slope angle.
    pub slope_speed_multiplier: SlopeCurve,

    // ========================================================================
    // Layers
    // ========================================================================
    /// Everything the body collides with, one-way platforms included.
    pub platform_mask: CollisionLayers,

    /// Subset of `platform_mask` that only blocks from above.
    pub one_way_mask: CollisionLayers,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Ray casting
            skin_width: 0.02,
            horizontal_rays: 8,
            vertical_rays: 4,

            // Slopes
            slope_limit: 30.0,
            jumping_threshold: 0.07,
            slope_speed_multiplier: SlopeCurve::default(),

            // Layers
            platform_mask: CollisionLayers::MASK_PLATFORMS,
            one_way_mask: CollisionLayers::ONE_WAY,
        }
    }
}

impl ControllerConfig {
    /// Loose, forgiving tuning: steeper climbable slopes, no slope slowdown.
    pub fn arcade() -> Self {
        Self {
            slope_limit: 50.0,
            slope_speed_multiplier: SlopeCurve::constant(1.0),
            ..Default::default()
        }
    }

    /// Tight tuning for small bodies and fine geometry.
    pub fn precise() -> Self {
        Self {
            skin_width: 0.005,
            horizontal_rays: 12,
            vertical_rays: 6,
            ..Default::default()
        }
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, count) in [
            ("horizontal", self.horizontal_rays),
            ("vertical", self.vertical_rays),
        ] {
            if !(MIN_RAYS..=MAX_RAYS).contains(&count) {
                return Err(ConfigError::RayCount { axis, count });
            }
        }

        let (min_skin, max_skin) = SKIN_WIDTH_RANGE;
        if !(min_skin..=max_skin).contains(&self.skin_width) {
            return Err(ConfigError::SkinWidth(self.skin_width));
        }

        if !(0.0..=90.0).contains(&self.slope_limit) {
            return Err(ConfigError::SlopeLimit(self.slope_limit));
        }

        if !self.jumping_threshold.is_finite() {
            return Err(ConfigError::JumpingThreshold(self.jumping_threshold));
        }

        if self.slope_speed_multiplier.keys().is_empty() {
            return Err(ConfigError::EmptySlopeCurve);
        }
        if !self.slope_speed_multiplier.is_well_formed() {
            return Err(ConfigError::MalformedSlopeCurve);
        }

        Ok(())
    }

    /// Platform mask with the one-way layers removed.
    #[inline]
    pub fn solid_mask(&self) -> CollisionLayers {
        self.platform_mask.difference(self.one_way_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.skin_width, 0.02);
        assert_eq!(config.slope_limit, 30.0);
        assert_eq!(config.horizontal_rays, 8);
        assert_eq!(config.vertical_rays, 4);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ControllerConfig::arcade().validate().is_ok());
        assert!(ControllerConfig::precise().validate().is_ok());
    }

    #[test]
    fn test_rejects_single_ray() {
        let config = ControllerConfig {
            horizontal_rays: 1,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RayCount {
                axis: "horizontal",
                count: 1
            })
        );

        let config = ControllerConfig {
            vertical_rays: 21,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RayCount { axis: "vertical", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let skin = ControllerConfig {
            skin_width: 0.5,
            ..Default::default()
        };
        assert_eq!(skin.validate(), Err(ConfigError::SkinWidth(0.5)));

        let slope = ControllerConfig {
            slope_limit: 120.0,
            ..Default::default()
        };
        assert_eq!(slope.validate(), Err(ConfigError::SlopeLimit(120.0)));

        let curve = ControllerConfig {
            slope_speed_multiplier: SlopeCurve::new(Vec::new()),
            ..Default::default()
        };
        assert_eq!(curve.validate(), Err(ConfigError::EmptySlopeCurve));
    }

    #[test]
    fn test_solid_mask_excludes_one_way() {
        let config = ControllerConfig::default();
        assert!(!config.solid_mask().intersects(CollisionLayers::ONE_WAY));
        assert!(config.solid_mask().contains(CollisionLayers::SOLID));
    }
}
