//! Periodic edge deformation and phase locking.
//!
//! Every animated edge of a membrane or flagellum swings its Bezier control
//! point back and forth on a triangle wave. The wave can be frozen for a
//! window of phase time (a [`Lock`]) so that a chosen extreme of the motion
//! is held while an external effect plays out.

mod lock;
mod wave;

pub use lock::{Lock, VertexLocks};
pub use wave::{find_phase_time, triangle_wave};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maps a deformation's amplitude to the speed of its oscillation
///
/// The scale is `length^exponent`. With the default exponent of 0.5, larger
/// swings move proportionally slower in angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseScale {
    pub exponent: f64,
}

impl Default for PhaseScale {
    fn default() -> Self {
        Self { exponent: 0.5 }
    }
}

impl PhaseScale {
    pub fn new(exponent: f64) -> Self {
        Self { exponent }
    }

    /// Wave speed for a deformation of the given length (0 for a flat edge)
    pub fn scale(&self, length: f32) -> f64 {
        if length <= 0.0 || !length.is_finite() {
            return 0.0;
        }
        (length as f64).powf(self.exponent)
    }
}

/// Static oscillation envelope of one edge
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Deformation {
    /// Peak swing in radians. The sign picks which extreme the wave starts at.
    pub angle: f32,
    /// Distance from the anchor to the control point
    pub length: f32,
}

impl Deformation {
    pub fn new(angle: f32, length: f32) -> Self {
        Self { angle, length }
    }

    /// Random swing in `[0, skew_limit]` with the given length
    pub fn random<R: Rng + ?Sized>(rng: &mut R, skew_limit: f32, length: f32) -> Self {
        let angle = if skew_limit > 0.0 {
            rng.gen_range(0.0..=skew_limit)
        } else {
            0.0
        };
        Self::new(angle, length)
    }

    /// A zero-length deformation never oscillates
    pub fn is_flat(&self) -> bool {
        self.length <= 0.0 || !self.length.is_finite()
    }

    /// Instantaneous swing angle at the given phase time
    pub fn angle_at(&self, phase_time: f64, scale: &PhaseScale) -> f32 {
        if self.is_flat() {
            return 0.0;
        }
        let a = self.angle as f64;
        triangle_wave(-a, a, phase_time, scale.scale(self.length)) as f32
    }

    /// Control point for this edge at `phase_time`, honouring an optional lock
    ///
    /// `direction` is rotated clockwise by the current swing angle, resized to
    /// the deformation length and placed at `anchor`.
    pub fn control_point(
        &self,
        anchor: Vec2,
        direction: Vec2,
        phase_time: f64,
        lock: Option<&Lock>,
        scale: &PhaseScale,
    ) -> Vec2 {
        self.control_point_scaled(anchor, direction, phase_time, lock, scale, 1.0)
    }

    /// Same as [`Deformation::control_point`] with the swing angle multiplied by `damping`
    pub fn control_point_scaled(
        &self,
        anchor: Vec2,
        direction: Vec2,
        phase_time: f64,
        lock: Option<&Lock>,
        scale: &PhaseScale,
        damping: f32,
    ) -> Vec2 {
        if self.is_flat() {
            return anchor;
        }
        let effective_time = lock.map_or(phase_time, |l| l.phase_time(phase_time));
        let angle = self.angle_at(effective_time, scale) * damping;
        let rotated = Vec2::from_angle(-angle).rotate(direction);
        anchor + rotated.normalize_or_zero() * self.length
    }

    /// Next phase time at or after `from` where the swing equals `target_angle`
    pub fn next_phase_time(&self, from: f64, target_angle: f32, scale: &PhaseScale) -> Option<f64> {
        if self.is_flat() {
            return None;
        }
        find_phase_time(self, from, target_angle as f64, scale)
    }
}
