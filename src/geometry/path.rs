//! Tessellated point lists handed to the renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Default stroke thickness until curvature-driven widths are wired in
pub const DEFAULT_THICKNESS: f32 = 1.0;

/// A point of a tessellated curve packed for GPU upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StrokeVertex {
    pub position: [f32; 2],
    pub thickness: f32,
}

impl StrokeVertex {
    pub fn new(position: Vec2, thickness: f32) -> Self {
        Self {
            position: position.to_array(),
            thickness,
        }
    }

    pub fn position_vec2(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }
}

/// Pack parallel position and thickness lists
pub fn pack_vertices(points: &[Vec2], thickness: &[f32]) -> Vec<StrokeVertex> {
    points
        .iter()
        .zip(thickness.iter())
        .map(|(p, t)| StrokeVertex::new(*p, *t))
        .collect()
}

/// Triangle fan over a center-prefixed closed ring of `sample_count` points
///
/// Vertex 0 is the center; each sample `i` forms one triangle with its
/// successor, so the result holds `3 * sample_count` indices.
pub fn fan_indices(sample_count: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(sample_count * 3);
    for i in 0..sample_count {
        let curr = (i + 1) as u32;
        let next = ((i + 1) % sample_count + 1) as u32;
        indices.extend_from_slice(&[0, curr, next]);
    }
    indices
}

/// Closest point to `p` on the segment `a..b`
pub fn closest_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Index of the ring segment nearest to `p` and the nearest point on it
///
/// Segment `i` runs from `ring[i]` to `ring[i + 1]`, wrapping at the end.
pub fn nearest_on_ring(ring: &[Vec2], p: Vec2) -> Option<(usize, Vec2)> {
    let n = ring.len();
    let mut best: Option<(usize, Vec2, f32)> = None;
    for i in 0..n {
        let q = closest_on_segment(ring[i], ring[(i + 1) % n], p);
        let dist = q.distance_squared(p);
        if best.map_or(true, |(_, _, d)| dist < d) {
            best = Some((i, q, dist));
        }
    }
    best.map(|(i, q, _)| (i, q))
}

/// Signed area of a closed polygon (positive when counter-clockwise)
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}
