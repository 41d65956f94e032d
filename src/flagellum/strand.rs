//! Single flagellum generation and arc-length reveal.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::config::FlagellumConfig;
use crate::deformation::Deformation;
use crate::error::{AnimationError, Result};
use crate::geometry::{pack_vertices, CubicBezier, StrokeVertex, DEFAULT_THICKNESS};

/// One joint, positioned relative to the flagellum origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Joint {
    pub position: Vec2,
    pub deformation: Deformation,
}

/// Tessellated open strip for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagellumFrame {
    pub points: Vec<Vec2>,
    /// Parallel to `points`
    pub thickness: Vec<f32>,
}

impl FlagellumFrame {
    fn new(points: Vec<Vec2>) -> Self {
        let thickness = vec![DEFAULT_THICKNESS; points.len()];
        Self { points, thickness }
    }

    /// Last drawn point
    pub fn head(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// Polyline length of the drawn strip
    pub fn drawn_length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    pub fn vertices(&self) -> Vec<StrokeVertex> {
        pack_vertices(&self.points, &self.thickness)
    }
}

/// Jointed curve from `origin` to `origin + target`
#[derive(Debug, Clone, Serialize)]
pub struct Flagellum {
    origin: Vec2,
    target: Vec2,
    joints: Vec<Joint>,
    config: FlagellumConfig,
}

impl Flagellum {
    /// Generate joints along `target`
    ///
    /// Interior joints are pushed sideways by up to `amplitude`, alternating
    /// sides; the two end joints stay exactly on the origin and the target.
    pub fn generate<R: Rng + ?Sized>(
        origin: Vec2,
        target: Vec2,
        config: FlagellumConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let length = target.length();
        if !(length.is_finite() && length > 0.0) {
            return Err(AnimationError::ZeroLengthTarget);
        }
        if !(config.segment_length.is_finite() && config.segment_length > 0.0) {
            return Err(AnimationError::NonPositiveSegmentLength(config.segment_length));
        }

        let segments = ((length / config.segment_length).ceil() as usize).max(1);
        let normal = target.perp() / length;

        let positions: Vec<Vec2> = (0..=segments)
            .map(|i| {
                let base = target * (i as f32 / segments as f32);
                if i == 0 || i == segments {
                    return base;
                }
                let side = if i % 2 == 1 { 1.0 } else { -1.0 };
                let jitter = if config.amplitude > 0.0 {
                    rng.gen_range(0.0..=config.amplitude)
                } else {
                    0.0
                };
                base + normal * jitter * side
            })
            .collect();

        let joints = (0..=segments)
            .map(|i| {
                let prev = i.checked_sub(1).map(|p| positions[i].distance(positions[p]));
                let next = (i < segments).then(|| positions[i].distance(positions[i + 1]));
                let span = match (prev, next) {
                    (Some(a), Some(b)) => a.min(b),
                    (Some(a), None) | (None, Some(a)) => a,
                    (None, None) => 0.0,
                };
                let magnitude = if config.skew_limit > 0.0 {
                    rng.gen_range(config.skew_limit * 0.5..=config.skew_limit)
                } else {
                    0.0
                };
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                Joint {
                    position: positions[i],
                    deformation: Deformation::new(magnitude * sign, span * 0.5),
                }
            })
            .collect();

        log::debug!("Flagellum generated: {} segments over length {:.1}", segments, length);
        Ok(Self {
            origin,
            target,
            joints,
            config,
        })
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Absolute position of the last joint
    pub fn tip(&self) -> Vec2 {
        self.origin + self.target
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn segment_count(&self) -> usize {
        self.joints.len() - 1
    }

    /// Tangent at each joint; the end tangents come from the caller
    fn directions(&self, start_direction: Vec2, finish_direction: Vec2) -> Vec<Vec2> {
        let last = self.joints.len() - 1;
        (0..=last)
            .map(|i| {
                let given = if i == 0 {
                    start_direction
                } else if i == last {
                    finish_direction
                } else {
                    Vec2::ZERO
                };
                let fallback = self.joints[(i + 1).min(last)].position - self.joints[i.saturating_sub(1)].position;
                let dir = given.normalize_or_zero();
                if dir == Vec2::ZERO {
                    fallback.normalize_or_zero()
                } else {
                    dir
                }
            })
            .collect()
    }

    /// Bezier segments through the joints at wall-clock `time`
    fn segments(&self, start_direction: Vec2, finish_direction: Vec2, progress: f64, time: f64) -> Vec<CubicBezier> {
        let phase = time * self.config.frequency;
        let scale = &self.config.phase_scale;
        let relax = (1.0 - progress.clamp(0.0, 1.0)).sqrt() as f32;
        let last = self.joints.len() - 1;
        let directions = self.directions(start_direction, finish_direction);
        let damping = |i: usize| if i == 0 || i == last { relax } else { 1.0 };

        (0..last)
            .map(|i| {
                let a = &self.joints[i];
                let b = &self.joints[i + 1];
                let pa = self.origin + a.position;
                let pb = self.origin + b.position;
                let c1 = a
                    .deformation
                    .control_point_scaled(pa, directions[i], phase, None, scale, damping(i));
                let c2 = b.deformation.control_point_scaled(
                    pb,
                    -directions[i + 1],
                    phase,
                    None,
                    scale,
                    damping(i + 1),
                );
                CubicBezier::new(pa, c1, c2, pb)
            })
            .collect()
    }

    /// Full curve length at `time` and `progress`
    pub fn path_length(&self, start_direction: Vec2, finish_direction: Vec2, progress: f64, time: f64) -> f32 {
        self.segments(start_direction, finish_direction, progress, time)
            .iter()
            .map(CubicBezier::length)
            .sum()
    }

    /// Tessellate the first `progress` fraction of the curve by arc length
    ///
    /// `progress <= 0` draws only the origin, `progress >= 1` the whole curve.
    pub fn evaluate(&self, start_direction: Vec2, finish_direction: Vec2, progress: f64, time: f64) -> FlagellumFrame {
        let segments = self.segments(start_direction, finish_direction, progress, time);
        let detail = self.config.detail;
        let lengths: Vec<f32> = segments.iter().map(CubicBezier::length).collect();
        let total: f32 = lengths.iter().sum();

        if progress <= 0.0 || total <= 0.0 {
            return FlagellumFrame::new(vec![self.origin]);
        }

        let budget = progress.min(1.0) as f32 * total;
        let mut points = Vec::with_capacity(segments.len() * detail + 1);
        let mut consumed = 0.0;

        for (segment, length) in segments.iter().zip(&lengths) {
            if consumed + length > budget {
                let t = segment.parameter_at_length(budget - consumed);
                let (head, _) = segment.split(t);
                head.sample_into(detail, &mut points);
                points.push(head.p3);
                return FlagellumFrame::new(points);
            }
            segment.sample_into(detail, &mut points);
            consumed += length;
        }

        points.push(self.tip());
        FlagellumFrame::new(points)
    }
}
