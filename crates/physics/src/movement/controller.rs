//! Character controller.
//!
//! This is the main entry point for moving a body. It takes a desired
//! displacement and returns the displacement that was actually possible,
//! together with the contacts found on the way.

use glam::Vec2;
use thiserror::Error;

use crate::collision::{RaycastHit, SpatialQuery};

use super::body::{Body, RaycastOrigins};
use super::config::{ConfigError, ControllerConfig};
use super::state::ContactState;
use super::sweep::Sweep;

/// Displacement applied per step by [`CharacterController2D::warp_to_grounded`].
const WARP_STEP: Vec2 = Vec2::new(0.0, -1.0);

/// Steps [`CharacterController2D::warp_to_grounded`] takes before giving up.
pub const MAX_WARP_STEPS: usize = 1000;

/// Failure of [`CharacterController2D::warp_to_grounded`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WarpError {
    #[error("no ground below the body after {steps} steps")]
    NoGroundBelow { steps: usize },
}

/// Outcome of a single [`CharacterController2D::resolve`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Displacement that was applied to the body.
    pub displacement: Vec2,

    /// Contacts after the move.
    pub state: ContactState,

    /// Every hit in the order it was found, horizontal before vertical.
    pub hits: Vec<RaycastHit>,

    /// Velocity reported for this tick.
    pub velocity: Vec2,

    /// The vertical displacement came from slope handling rather than from
    /// the caller, so `velocity.y` was zeroed.
    pub synthetic_vertical_movement: bool,
}

impl Resolution {
    /// Replay the hits to `listener` in recording order.
    ///
    /// The listener sees the finished contact state with every hit.
    pub fn dispatch<F>(&self, mut listener: F)
    where
        F: FnMut(&RaycastHit, &ContactState),
    {
        for hit in &self.hits {
            listener(hit, &self.state);
        }
    }

    /// Check if the body ended the tick standing on something.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state.below
    }
}

/// Kinematic controller for an axis-aligned platformer body.
///
/// Each call to [`resolve`](Self::resolve) runs, in order:
/// 1. Ray origins from the body's current bounds
/// 2. Descending-slope probe (moving down while grounded)
/// 3. Horizontal sweep, with slope climbing on the lowest ray
/// 4. Vertical sweep, offset by the resolved horizontal move
/// 5. Finalization: move the body, velocity, landing edge
///
/// # Example
///
/// ```ignore
/// let mut controller = CharacterController2D::new(ControllerConfig::default())?;
/// let mut body = Body::new(spawn, Vec2::new(0.4, 0.9));
///
/// // Each tick:
/// let resolution = controller.resolve(&mut body, velocity * dt, &world, dt);
/// resolution.dispatch(|hit, state| { /* react to contacts */ });
/// ```
#[derive(Debug, Clone)]
pub struct CharacterController2D {
    /// Tuning, replaceable between ticks.
    config: ControllerConfig,

    /// Contacts from the previous call.
    state: ContactState,

    /// Velocity from the previous call.
    velocity: Vec2,

    /// Pass through one-way platforms on the next call only.
    ignore_one_way: bool,
}

impl Default for CharacterController2D {
    fn default() -> Self {
        Self::with_default_config()
    }
}

impl CharacterController2D {
    /// Create a controller, rejecting invalid configuration.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: ContactState::default(),
            velocity: Vec2::ZERO,
            ignore_one_way: false,
        })
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self {
            config: ControllerConfig::default(),
            state: ContactState::default(),
            velocity: Vec2::ZERO,
            ignore_one_way: false,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Swap in new tuning. The old config is kept if the new one is invalid.
    pub fn set_config(&mut self, config: ControllerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Contacts from the most recent call.
    pub fn state(&self) -> &ContactState {
        &self.state
    }

    /// Velocity from the most recent call.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Check if the body was standing on something after the last call.
    pub fn is_grounded(&self) -> bool {
        self.state.below
    }

    /// Let the next call fall through one-way platforms.
    ///
    /// The request is consumed by that call whether or not it moves.
    pub fn ignore_one_way_platforms_this_frame(&mut self) {
        self.ignore_one_way = true;
    }

    /// Forget contacts and velocity, e.g. after teleporting the body.
    pub fn reset(&mut self) {
        self.state = ContactState::default();
        self.velocity = Vec2::ZERO;
        self.ignore_one_way = false;
    }

    /// Move `body` by as much of `displacement` as the world allows.
    ///
    /// # Arguments
    ///
    /// * `body` - The body to move (position is updated)
    /// * `displacement` - Desired movement for this tick
    /// * `world` - Geometry to collide against
    /// * `dt` - Tick duration in seconds, used for velocity only
    pub fn resolve<Q>(&mut self, body: &mut Body, displacement: Vec2, world: &Q, dt: f32) -> Resolution
    where
        Q: SpatialQuery + ?Sized,
    {
        let grounded_last_tick = self.state.below;
        let ignore_one_way = std::mem::take(&mut self.ignore_one_way);

        if body.is_degenerate(self.config.skin_width) || !displacement.is_finite() {
            log::warn!(
                "skipping resolve: body {:?} / displacement {} is degenerate for skin width {}",
                body,
                displacement,
                self.config.skin_width
            );
            return self.stand_still(dt);
        }

        if displacement == Vec2::ZERO {
            return self.stand_still(dt);
        }

        let origins = RaycastOrigins::from_body(body, self.config.skin_width);
        let mut sweep = Sweep::new(
            &self.config,
            world,
            origins,
            grounded_last_tick,
            ignore_one_way,
        );

        let mut delta = displacement;

        if delta.y < 0.0 && grounded_last_tick {
            if let Some(descent) = sweep.probe_descending_slope(delta) {
                log::debug!("descending slope at {:.1} degrees", descent.angle);
                delta = descent.displacement;
                sweep.state.moving_down_slope = true;
                sweep.state.slope_angle = descent.angle;
            }
        }

        if delta.x != 0.0 {
            delta = sweep.horizontal(delta);
        }

        if delta.y != 0.0 {
            delta = sweep.vertical(delta);
        }

        let Sweep {
            mut state,
            hits,
            synthetic_vertical,
            ..
        } = sweep;

        body.translate(delta);

        if dt > 0.0 {
            self.velocity = delta / dt;
        }

        state.became_grounded_this_frame = !grounded_last_tick && state.below;
        if state.became_grounded_this_frame {
            log::debug!("grounded at {}", body.position);
        }

        if synthetic_vertical {
            self.velocity.y = 0.0;
        }

        self.state = state;

        Resolution {
            displacement: delta,
            state,
            hits,
            velocity: self.velocity,
            synthetic_vertical_movement: synthetic_vertical,
        }
    }

    /// Drop the body straight down until it stands on something.
    ///
    /// Returns how many steps it took.
    pub fn warp_to_grounded<Q>(&mut self, body: &mut Body, world: &Q) -> Result<usize, WarpError>
    where
        Q: SpatialQuery + ?Sized,
    {
        for step in 1..=MAX_WARP_STEPS {
            if self.resolve(body, WARP_STEP, world, 0.0).is_grounded() {
                log::debug!("warped to ground at {} in {step} steps", body.position);
                return Ok(step);
            }
        }

        Err(WarpError::NoGroundBelow {
            steps: MAX_WARP_STEPS,
        })
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    /// A tick without movement keeps last tick's contacts.
    fn stand_still(&mut self, dt: f32) -> Resolution {
        let state = ContactState::carried_from(&self.state);

        if dt > 0.0 {
            self.velocity = Vec2::ZERO;
        }

        self.state = state;

        Resolution {
            displacement: Vec2::ZERO,
            state,
            hits: Vec::new(),
            velocity: self.velocity,
            synthetic_vertical_movement: false,
        }
    }
}
