//! Slope speed curve.
//!
//! Maps a signed slope angle in degrees to a horizontal speed multiplier.
//! Negative angles are descending slopes, positive angles ascending ones.

use serde::{Deserialize, Serialize};

/// A single curve key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Signed slope angle in degrees.
    pub time: f32,

    /// Multiplier at this angle.
    pub value: f32,

    /// Slope of the curve arriving at this key.
    #[serde(default)]
    pub in_tangent: f32,

    /// Slope of the curve leaving this key.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Create a key with flat tangents.
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }
}

/// Piecewise cubic Hermite curve, clamped at both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlopeCurve {
    keys: Vec<Keyframe>,
}

impl Default for SlopeCurve {
    /// Speeds up going downhill, slows down going uphill, stops at vertical.
    fn default() -> Self {
        Self::new(vec![
            Keyframe::new(-90.0, 1.5),
            Keyframe::new(0.0, 1.0),
            Keyframe::new(90.0, 0.0),
        ])
    }
}

impl SlopeCurve {
    /// Build a curve from keys. Keys are sorted by time.
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// A curve with the same value at every angle.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value)])
    }

    /// A piecewise linear curve through `points` given as `(angle, value)`.
    pub fn linear(points: &[(f32, f32)]) -> Self {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let slope = |a: (f32, f32), b: (f32, f32)| {
            let span = b.0 - a.0;
            if span.abs() > f32::EPSILON {
                (b.1 - a.1) / span
            } else {
                0.0
            }
        };

        let keys = (0..sorted.len())
            .map(|i| {
                let (time, value) = sorted[i];
                let in_tangent = if i > 0 { slope(sorted[i - 1], sorted[i]) } else { 0.0 };
                let out_tangent = if i + 1 < sorted.len() {
                    slope(sorted[i], sorted[i + 1])
                } else {
                    0.0
                };
                Keyframe {
                    time,
                    value,
                    in_tangent,
                    out_tangent,
                }
            })
            .collect();

        Self { keys }
    }

    /// The curve's keys in time order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Check if the keys are in non-decreasing time order and finite.
    pub fn is_well_formed(&self) -> bool {
        self.keys.iter().all(|k| {
            k.time.is_finite() && k.value.is_finite() && k.in_tangent.is_finite() && k.out_tangent.is_finite()
        }) && self.keys.windows(2).all(|w| w[0].time <= w[1].time)
    }

    /// Evaluate the curve at `time`.
    ///
    /// An empty curve evaluates to 1 so it never alters movement.
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 1.0;
        };

        if time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // Interior: first segment whose end lies at or beyond `time`
        let end = self.keys.partition_point(|k| k.time < time);
        let k0 = self.keys[end - 1];
        let k1 = self.keys[end];

        let span = k1.time - k0.time;
        if span <= 0.0 {
            return k1.value;
        }

        let s = (time - k0.time) / span;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * k0.value + h10 * span * k0.out_tangent + h01 * k1.value + h11 * span * k1.in_tangent
    }
}
