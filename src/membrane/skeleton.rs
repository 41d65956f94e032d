//! Membrane skeleton generation, evaluation and spike locking.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::MembraneFrame;
use crate::config::{Annulus, MembraneConfig};
use crate::deformation::{Deformation, Lock, VertexLocks};
use crate::error::{check_non_negative, AnimationError, Result};
use crate::geometry::{nearest_on_ring, signed_area, spline, CubicBezier, CurveMode, DEFAULT_THICKNESS};

/// Swing angles checked when clamping a deformation to the annulus
const ANNULUS_PROBES: usize = 9;

/// Outline a skeleton is generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MembraneShape {
    /// Counter-clockwise regular polygon
    Regular {
        center: Vec2,
        radius: f32,
        segments: usize,
    },
    /// Explicit closed outline, either winding
    Points(Vec<Vec2>),
}

impl MembraneShape {
    fn vertices(&self) -> Result<Vec<Vec2>> {
        match self {
            MembraneShape::Regular {
                center,
                radius,
                segments,
            } => {
                check_non_negative("membrane radius", *radius as f64)?;
                if *segments < 3 {
                    return Err(AnimationError::TooFewPoints(*segments));
                }
                Ok((0..*segments)
                    .map(|i| {
                        let theta = i as f32 / *segments as f32 * std::f32::consts::TAU;
                        *center + Vec2::from_angle(theta) * *radius
                    })
                    .collect())
            }
            MembraneShape::Points(points) => {
                if points.len() < 3 {
                    return Err(AnimationError::TooFewPoints(points.len()));
                }
                Ok(points.clone())
            }
        }
    }
}

/// One skeleton edge; its start vertex owns the two locks
#[derive(Debug, Clone, Serialize)]
struct SkeletonEdge {
    /// Edge midpoint, on the evaluated curve
    anchor: Vec2,
    /// From the edge's start vertex to its end vertex
    direction: Vec2,
    deformation: Deformation,
    locks: VertexLocks,
}

/// Nearest boundary location to an external point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sector {
    pub edge: usize,
    pub point: Vec2,
    pub distance: f32,
}

/// Wall-clock window during which a spiked segment is fully frozen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThornWindow {
    pub start: f64,
    pub finish: f64,
}

/// Result of an attack landing on the membrane
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spike {
    pub edge: usize,
    pub start: f64,
    pub finish: f64,
    /// Boundary point at the middle of the spiked segment
    pub tip: Vec2,
    /// Outward unit normal at `tip`
    pub normal: Vec2,
}

/// Closed ring of anchors, directions and deformations
#[derive(Debug, Clone, Serialize)]
pub struct MembraneSkeleton {
    edges: Vec<SkeletonEdge>,
    center: Vec2,
    /// +1 for counter-clockwise outlines, -1 for clockwise
    winding: f32,
    config: MembraneConfig,
}

impl MembraneSkeleton {
    /// Generate a skeleton with random deformations
    ///
    /// Annulus centers in `config` are offsets from the outline's centroid.
    pub fn build<R: Rng + ?Sized>(shape: &MembraneShape, config: MembraneConfig, rng: &mut R) -> Result<Self> {
        let vertices = shape.vertices()?;
        let n = vertices.len();
        let center = vertices.iter().copied().sum::<Vec2>() / n as f32;
        let winding = if signed_area(&vertices) < 0.0 { -1.0 } else { 1.0 };
        let annulus = config.annulus.map(|a| a.centered_at(center + a.center));

        let mut degenerate = 0;
        let edges: Vec<SkeletonEdge> = (0..n)
            .map(|i| {
                let start = vertices[i];
                let end = vertices[(i + 1) % n];
                let anchor = (start + end) * 0.5;
                let direction = end - start;

                let length = direction.length() * 0.5 * rng.gen_range(0.7..=1.0);
                let mut deformation = Deformation::random(rng, config.skew_limit, length);
                if let Some(ring) = annulus.as_ref() {
                    deformation.length = deformation.length.min(annulus_reach(ring, anchor, direction, deformation.angle));
                }
                if deformation.is_flat() {
                    degenerate += 1;
                    deformation.length = 0.0;
                }

                SkeletonEdge {
                    anchor,
                    direction,
                    deformation,
                    locks: VertexLocks::default(),
                }
            })
            .collect();

        if degenerate > 0 {
            log::warn!("{} of {} membrane edges are degenerate and will stay flat", degenerate, n);
        }
        log::info!(
            "Membrane skeleton built: {} edges, detail {}, {:?} curve",
            n,
            config.detail,
            config.curve_mode
        );

        Ok(Self {
            edges,
            center,
            winding,
            config,
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn config(&self) -> &MembraneConfig {
        &self.config
    }

    pub fn deformation(&self, edge: usize) -> Option<&Deformation> {
        self.edges.get(edge).map(|e| &e.deformation)
    }

    pub fn anchor(&self, edge: usize) -> Option<Vec2> {
        self.edges.get(edge).map(|e| e.anchor)
    }

    pub fn locks(&self, vertex: usize) -> Option<&VertexLocks> {
        self.edges.get(vertex).map(|e| &e.locks)
    }

    /// Change tessellation settings between frames without regenerating
    pub fn set_render_options(&mut self, detail: usize, curve_mode: CurveMode) -> Result<()> {
        if detail == 0 {
            return Err(AnimationError::ZeroDetail);
        }
        self.config.detail = detail;
        self.config.curve_mode = curve_mode;
        Ok(())
    }

    fn phase_time(&self, time: f64) -> f64 {
        time * self.config.frequency
    }

    /// Outgoing and incoming handle of every anchor at `phase`
    fn control_points(&self, phase: f64) -> Vec<(Vec2, Vec2)> {
        let scale = &self.config.phase_scale;
        self.edges
            .iter()
            .map(|e| {
                let out = e
                    .deformation
                    .control_point(e.anchor, e.direction, phase, e.locks.outbound.as_ref(), scale);
                let inc = e
                    .deformation
                    .control_point(e.anchor, -e.direction, phase, e.locks.inbound.as_ref(), scale);
                (out, inc)
            })
            .collect()
    }

    fn segment(&self, controls: &[(Vec2, Vec2)], i: usize) -> CubicBezier {
        let next = (i + 1) % self.edges.len();
        CubicBezier::new(
            self.edges[i].anchor,
            controls[i].0,
            controls[next].1,
            self.edges[next].anchor,
        )
    }

    /// Tessellate the boundary at wall-clock `time`
    pub fn evaluate(&self, time: f64) -> MembraneFrame {
        let n = self.edges.len();
        let detail = self.config.detail;
        let controls = self.control_points(self.phase_time(time));

        let mut points = Vec::with_capacity(n * detail + 1);
        points.push(self.center);

        match self.config.curve_mode {
            CurveMode::Bezier => {
                for i in 0..n {
                    self.segment(&controls, i).sample_into(detail, &mut points);
                }
            }
            CurveMode::Spline => {
                // Knots alternate anchor, handle midpoint, anchor, ...
                let knots: Vec<Vec2> = (0..n)
                    .flat_map(|i| {
                        let next = (i + 1) % n;
                        [self.edges[i].anchor, (controls[i].0 + controls[next].1) * 0.5]
                    })
                    .collect();
                for i in 0..n {
                    for j in 0..detail {
                        let s = 2.0 * j as f32 / detail as f32;
                        let span = if s < 1.0 { 2 * i } else { 2 * i + 1 };
                        points.push(spline::closed_point(&knots, span, s.fract()));
                    }
                }
            }
        }

        let thickness = vec![DEFAULT_THICKNESS; points.len()];
        MembraneFrame {
            points,
            thickness,
            detail,
        }
    }

    /// Edge and boundary point nearest to `target` at wall-clock `time`
    pub fn get_sector(&self, target: Vec2, time: f64) -> Sector {
        let frame = self.evaluate(time);
        let (segment, point) =
            nearest_on_ring(frame.ring(), target).unwrap_or((0, self.edges[0].anchor));
        Sector {
            edge: (segment / frame.detail).min(self.edges.len() - 1),
            point,
            distance: point.distance(target),
        }
    }

    /// Swing angle that turns each handle of a segment outward
    fn outward_targets(&self, edge: usize) -> (f32, f32) {
        let next = (edge + 1) % self.edges.len();
        let out = self.edges[edge].deformation.angle.abs() * self.winding;
        let inc = -self.edges[next].deformation.angle.abs() * self.winding;
        (out, inc)
    }

    /// Hold the segment after `edge` in its fully extended spike shape
    ///
    /// Each handle is locked from its next outward extreme until the first
    /// return to that extreme after `duration` has passed. Returns the
    /// wall-clock window in which both handles are frozen; an edge that
    /// cannot oscillate yields the empty window `[time, time]`.
    pub fn thorn(&mut self, edge: usize, time: f64, duration: f64) -> Result<ThornWindow> {
        let n = self.edges.len();
        if edge >= n {
            return Err(AnimationError::EdgeOutOfRange { edge, count: n });
        }
        let frequency = self.config.frequency;
        let idle = ThornWindow {
            start: time,
            finish: time,
        };
        if frequency <= 0.0 {
            log::warn!("Membrane frequency is zero, thorn on edge {} ignored", edge);
            return Ok(idle);
        }
        if duration < 0.0 {
            log::warn!("Negative thorn duration {} clamped to zero", duration);
        }

        let next = (edge + 1) % n;
        let scale = self.config.phase_scale;
        let phase = self.phase_time(time);
        let (target_out, target_in) = self.outward_targets(edge);
        let def_out = self.edges[edge].deformation;
        let def_in = self.edges[next].deformation;

        let t_plus = def_out.next_phase_time(phase, target_out, &scale);
        let t_minus = def_in.next_phase_time(phase, target_in, &scale);
        let start = match (t_plus, t_minus) {
            (Some(a), Some(b)) => a.max(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => {
                log::warn!("Edge {} is flat, thorn has nothing to hold", edge);
                return Ok(idle);
            }
        };

        let hold_end = start + duration.max(0.0) * frequency;
        let finish_out = def_out.next_phase_time(hold_end, target_out, &scale);
        let finish_in = def_in.next_phase_time(hold_end, target_in, &scale);

        let mut finish = f64::INFINITY;
        if let Some(lock) = t_plus.zip(finish_out).and_then(|(s, f)| Lock::new(s, f)) {
            self.edges[edge].locks.install_outbound(lock);
            finish = finish.min(lock.finish);
        }
        if let Some(lock) = t_minus.zip(finish_in).and_then(|(s, f)| Lock::new(s, f)) {
            self.edges[next].locks.install_inbound(lock);
            finish = finish.min(lock.finish);
        }
        if !finish.is_finite() {
            finish = start;
        }

        log::debug!(
            "Thorn on edge {}: phase window [{:.3}, {:.3})",
            edge,
            start,
            finish
        );
        Ok(ThornWindow {
            start: start / frequency,
            finish: finish.max(start) / frequency,
        })
    }

    /// Boundary point and outward normal at the middle of the segment after `edge`
    pub fn spike_tip(&self, edge: usize, time: f64) -> (Vec2, Vec2) {
        let edge = edge % self.edges.len();
        let controls = self.control_points(self.phase_time(time));
        let segment = self.segment(&controls, edge);
        let tip = segment.point(0.5);
        let tangent = segment.point(0.51) - segment.point(0.49);
        let mut normal = Vec2::new(tangent.y, -tangent.x).normalize_or_zero() * self.winding;
        if normal == Vec2::ZERO {
            normal = (tip - self.center).normalize_or_zero();
        }
        (tip, normal)
    }

    /// Spike the membrane where `target` is closest and report where it landed
    pub fn attack(&mut self, target: Vec2, time: f64, duration: f64) -> Result<Spike> {
        let sector = self.get_sector(target, time);
        let window = self.thorn(sector.edge, time, duration)?;
        let (tip, normal) = self.spike_tip(sector.edge, (window.start + window.finish) * 0.5);
        Ok(Spike {
            edge: sector.edge,
            start: window.start,
            finish: window.finish,
            tip,
            normal,
        })
    }

    /// Forget lock windows that ended before wall-clock `time`
    pub fn clear_expired_locks(&mut self, time: f64) {
        let phase = self.phase_time(time);
        for edge in &mut self.edges {
            edge.locks.clear_expired(phase);
        }
    }
}

/// Longest handle that stays inside `ring` over the whole swing range
fn annulus_reach(ring: &Annulus, anchor: Vec2, direction: Vec2, angle: f32) -> f32 {
    let unit = direction.normalize_or_zero();
    if unit == Vec2::ZERO {
        return 0.0;
    }
    let mut reach = f32::INFINITY;
    for k in 0..ANNULUS_PROBES {
        let theta = -angle + 2.0 * angle * k as f32 / (ANNULUS_PROBES - 1) as f32;
        let rot = Vec2::from_angle(-theta);
        reach = reach
            .min(ring.reach(anchor, rot.rotate(unit)))
            .min(ring.reach(anchor, rot.rotate(-unit)));
    }
    reach
}
