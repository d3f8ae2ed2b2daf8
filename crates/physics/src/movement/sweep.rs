//! Horizontal and vertical ray sweeps.
//!
//! A [`Sweep`] holds everything one resolution accumulates: the contact
//! flags, the hits in the order they were found, and whether the vertical
//! displacement was synthesized. The controller drives it through the
//! descend probe, the horizontal pass and the vertical pass, then reads the
//! accumulated values back out.

use glam::Vec2;

use crate::collision::{CollisionLayers, RaycastHit, SpatialQuery};

use super::body::RaycastOrigins;
use super::config::ControllerConfig;
use super::slope::SlopeOutcome;
use super::state::ContactState;

/// Remaining travel under `skin_width + SKIN_FUDGE` is a direct impact.
pub(crate) const SKIN_FUDGE: f32 = 0.001;

/// A downward hit that leaves more than this much upward travel happened at
/// a slope crest.
pub(crate) const APEX_EPSILON: f32 = 1.0e-5;

/// State of one resolution in progress.
pub(crate) struct Sweep<'a, Q: SpatialQuery + ?Sized> {
    pub config: &'a ControllerConfig,
    pub query: &'a Q,
    pub origins: RaycastOrigins,
    pub grounded_last_tick: bool,
    pub ignore_one_way: bool,

    pub state: ContactState,
    pub hits: Vec<RaycastHit>,
    pub synthetic_vertical: bool,
}

impl<'a, Q: SpatialQuery + ?Sized> Sweep<'a, Q> {
    pub fn new(
        config: &'a ControllerConfig,
        query: &'a Q,
        origins: RaycastOrigins,
        grounded_last_tick: bool,
        ignore_one_way: bool,
    ) -> Self {
        Self {
            config,
            query,
            origins,
            grounded_last_tick,
            ignore_one_way,
            state: ContactState::fresh(grounded_last_tick),
            hits: Vec::new(),
            synthetic_vertical: false,
        }
    }

    /// Mask for the lowest horizontal ray and the climb re-cast.
    ///
    /// One-way geometry is only walkable into while grounded, so a sloped
    /// one-way platform can be climbed but not entered from the side mid-air.
    pub fn lowest_ray_mask(&self) -> CollisionLayers {
        if self.grounded_last_tick {
            self.config.platform_mask
        } else {
            self.config.solid_mask()
        }
    }

    /// Shorten `delta.x` to the nearest obstruction on the leading side.
    ///
    /// The lowest ray can hand the whole tick over to slope handling, in
    /// which case both components of the returned displacement may change.
    pub fn horizontal(&mut self, mut delta: Vec2) -> Vec2 {
        let skin = self.config.skin_width;
        let going_right = delta.x > 0.0;
        let direction = if going_right { Vec2::X } else { Vec2::NEG_X };
        let start = if going_right {
            self.origins.bottom_right
        } else {
            self.origins.bottom_left
        };
        let spacing = self.origins.row_spacing(self.config.horizontal_rays);
        let mut ray_distance = delta.x.abs() + skin;

        for i in 0..self.config.horizontal_rays {
            let origin = Vec2::new(start.x, start.y + i as f32 * spacing);
            let mask = if i == 0 {
                self.lowest_ray_mask()
            } else {
                self.config.solid_mask()
            };

            let Some(hit) = self.query.cast(origin, direction, ray_distance, mask) else {
                continue;
            };

            if i == 0 {
                match self.ascend_slope(delta, hit.angle_from_up()) {
                    SlopeOutcome::NotHandled => {}
                    SlopeOutcome::Blocked => {
                        log::trace!("slope too steep at {:.1} degrees", hit.angle_from_up());
                        delta.x = 0.0;
                        self.hits.push(hit);
                        break;
                    }
                    SlopeOutcome::Rising => {
                        self.hits.push(hit);
                        break;
                    }
                    SlopeOutcome::Climbing {
                        horizontal,
                        vertical,
                    } => {
                        log::debug!(
                            "climbing slope at {:.1} degrees: ({horizontal:.3}, {vertical:.3})",
                            hit.angle_from_up()
                        );
                        delta = Vec2::new(horizontal, vertical);
                        self.state.below = true;
                        self.synthetic_vertical = true;
                        self.hits.push(hit);
                        break;
                    }
                }
            }

            delta.x = hit.point.x - origin.x;
            ray_distance = delta.x.abs();

            if going_right {
                delta.x -= skin;
                self.state.right = true;
            } else {
                delta.x += skin;
                self.state.left = true;
            }

            log::trace!("horizontal ray {i} hit {:?} at {:.3}", hit.collider, hit.distance);
            self.hits.push(hit);

            if ray_distance < skin + SKIN_FUDGE {
                break;
            }
        }

        delta
    }

    /// Shorten `delta.y` to the nearest obstruction above or below.
    ///
    /// Rays start from where the horizontal pass left the body.
    pub fn vertical(&mut self, mut delta: Vec2) -> Vec2 {
        let skin = self.config.skin_width;
        let going_up = delta.y > 0.0;
        let direction = if going_up { Vec2::Y } else { Vec2::NEG_Y };
        let mut start = if going_up {
            self.origins.top_left
        } else {
            self.origins.bottom_left
        };
        start.x += delta.x;

        let spacing = self.origins.column_spacing(self.config.vertical_rays);
        let mut ray_distance = delta.y.abs() + skin;

        let mask = if (going_up && !self.grounded_last_tick) || self.ignore_one_way {
            self.config.solid_mask()
        } else {
            self.config.platform_mask
        };

        for i in 0..self.config.vertical_rays {
            let origin = Vec2::new(start.x + i as f32 * spacing, start.y);

            let Some(hit) = self.query.cast(origin, direction, ray_distance, mask) else {
                continue;
            };

            delta.y = hit.point.y - origin.y;
            ray_distance = delta.y.abs();

            if going_up {
                delta.y -= skin;
                self.state.above = true;
            } else {
                delta.y += skin;
                self.state.below = true;
            }

            log::trace!("vertical ray {i} hit {:?} at {:.3}", hit.collider, hit.distance);
            self.hits.push(hit);

            // Floating point at a slope crest can leave a downward hit above
            // the ray origin; report it like a climb so the body stays grounded
            if !going_up && delta.y > APEX_EPSILON {
                self.synthetic_vertical = true;
            }

            if ray_distance < skin + SKIN_FUDGE {
                break;
            }
        }

        delta
    }
}
