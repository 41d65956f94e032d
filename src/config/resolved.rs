//! Validated per-entity configuration values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::deformation::PhaseScale;
use crate::error::{check_non_negative, check_skew_limit, AnimationError, Result};
use crate::geometry::CurveMode;

/// Ring between two concentric circles that control points must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annulus {
    pub center: Vec2,
    pub inner: f32,
    pub outer: f32,
}

impl Annulus {
    pub fn new(center: Vec2, inner: f32, outer: f32) -> Self {
        let inner = inner.max(0.0);
        Self {
            center,
            inner,
            outer: outer.max(inner),
        }
    }

    /// Band of `radius * (1 ± band)` around the origin
    pub fn around_origin(radius: f32, band: f32) -> Self {
        Self::new(Vec2::ZERO, radius * (1.0 - band), radius * (1.0 + band))
    }

    /// Same ring moved to a new center
    pub fn centered_at(self, center: Vec2) -> Self {
        Self { center, ..self }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let r = p.distance(self.center);
        r >= self.inner && r <= self.outer
    }

    /// How far a ray from `origin` along unit `dir` travels before leaving the ring
    ///
    /// Returns 0 when `origin` is already outside.
    pub fn reach(&self, origin: Vec2, dir: Vec2) -> f32 {
        if !self.contains(origin) {
            return 0.0;
        }
        let rel = origin - self.center;
        let b = rel.dot(dir);
        let c_len2 = rel.length_squared();

        // Always exits the outer circle
        let outer_disc = b * b - (c_len2 - self.outer * self.outer);
        let mut reach = -b + outer_disc.max(0.0).sqrt();

        // May hit the inner circle first
        if self.inner > 0.0 {
            let inner_disc = b * b - (c_len2 - self.inner * self.inner);
            if inner_disc >= 0.0 {
                let hit = -b - inner_disc.sqrt();
                if hit >= 0.0 {
                    reach = reach.min(hit);
                }
            }
        }
        reach.max(0.0)
    }
}

/// Resolved membrane configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MembraneConfig {
    pub detail: usize,
    pub frequency: f64,
    pub skew_limit: f32,
    pub curve_mode: CurveMode,
    pub annulus: Option<Annulus>,
    pub phase_scale: PhaseScale,
}

impl MembraneConfig {
    pub fn new(
        detail: usize,
        frequency: f64,
        skew_limit: f32,
        curve_mode: CurveMode,
        annulus: Option<Annulus>,
        phase_scale: PhaseScale,
    ) -> Result<Self> {
        if detail == 0 {
            return Err(AnimationError::ZeroDetail);
        }
        check_non_negative("frequency", frequency)?;
        check_skew_limit(skew_limit)?;
        check_non_negative("phase scale exponent", phase_scale.exponent)?;
        Ok(Self {
            detail,
            frequency,
            skew_limit,
            curve_mode,
            annulus,
            phase_scale,
        })
    }
}

/// Resolved flagellum configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagellumConfig {
    pub segment_length: f32,
    pub amplitude: f32,
    pub skew_limit: f32,
    pub detail: usize,
    pub frequency: f64,
    pub phase_scale: PhaseScale,
}

impl FlagellumConfig {
    pub fn new(
        segment_length: f32,
        amplitude: f32,
        skew_limit: f32,
        detail: usize,
        frequency: f64,
        phase_scale: PhaseScale,
    ) -> Result<Self> {
        if !(segment_length.is_finite() && segment_length > 0.0) {
            return Err(AnimationError::NonPositiveSegmentLength(segment_length));
        }
        if detail == 0 {
            return Err(AnimationError::ZeroDetail);
        }
        check_non_negative("jitter amplitude", amplitude as f64)?;
        check_non_negative("frequency", frequency)?;
        check_skew_limit(skew_limit)?;
        check_non_negative("phase scale exponent", phase_scale.exponent)?;
        Ok(Self {
            segment_length,
            amplitude,
            skew_limit,
            detail,
            frequency,
            phase_scale,
        })
    }
}
