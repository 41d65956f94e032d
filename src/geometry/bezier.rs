//! Cubic Bezier segments with arc-length lookup.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Number of chords used to approximate a segment's arc length
const ARC_SAMPLES: usize = 24;

/// One cubic Bezier segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Point at parameter `t` in `[0, 1]`
    pub fn point(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        let uu = u * u;
        let tt = t * t;
        self.p0 * (uu * u) + self.p1 * (3.0 * uu * t) + self.p2 * (3.0 * u * tt) + self.p3 * (tt * t)
    }

    /// De Casteljau subdivision at `t`, returning the two halves
    pub fn split(&self, t: f32) -> (CubicBezier, CubicBezier) {
        let a = self.p0.lerp(self.p1, t);
        let b = self.p1.lerp(self.p2, t);
        let c = self.p2.lerp(self.p3, t);
        let ab = a.lerp(b, t);
        let bc = b.lerp(c, t);
        let mid = ab.lerp(bc, t);
        (
            CubicBezier::new(self.p0, a, ab, mid),
            CubicBezier::new(mid, bc, c, self.p3),
        )
    }

    /// Cumulative chord lengths at `ARC_SAMPLES + 1` evenly spaced parameters
    fn arc_table(&self) -> [f32; ARC_SAMPLES + 1] {
        let mut table = [0.0; ARC_SAMPLES + 1];
        let mut prev = self.p0;
        for (i, entry) in table.iter_mut().enumerate().skip(1) {
            let p = self.point(i as f32 / ARC_SAMPLES as f32);
            *entry = (p - prev).length();
            prev = p;
        }
        for i in 1..table.len() {
            table[i] += table[i - 1];
        }
        table
    }

    /// Approximate arc length
    pub fn length(&self) -> f32 {
        self.arc_table()[ARC_SAMPLES]
    }

    /// Parameter at which the arc length from `p0` reaches `distance`
    pub fn parameter_at_length(&self, distance: f32) -> f32 {
        let table = self.arc_table();
        let total = table[ARC_SAMPLES];
        if total <= 0.0 || distance <= 0.0 {
            return 0.0;
        }
        if distance >= total {
            return 1.0;
        }
        let i = table.partition_point(|&len| len < distance).max(1);
        let (lo, hi) = (table[i - 1], table[i]);
        let frac = if hi > lo { (distance - lo) / (hi - lo) } else { 0.0 };
        ((i - 1) as f32 + frac) / ARC_SAMPLES as f32
    }

    /// `count` points at `t = 0, 1/count, ..`, excluding the end point
    pub fn sample_into(&self, count: usize, out: &mut Vec<Vec2>) {
        for j in 0..count {
            out.push(self.point(j as f32 / count as f32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> CubicBezier {
        CubicBezier::new(
            Vec2::ZERO,
            Vec2::new(10.0 / 3.0, 0.0),
            Vec2::new(20.0 / 3.0, 0.0),
            Vec2::new(10.0, 0.0),
        )
    }

    #[test]
    fn test_endpoints() {
        let b = CubicBezier::new(Vec2::ZERO, Vec2::ONE, Vec2::new(2.0, -1.0), Vec2::new(3.0, 0.0));
        assert_eq!(b.point(0.0), b.p0);
        assert!((b.point(1.0) - b.p3).length() < 1e-6);
    }

    #[test]
    fn test_split_halves_meet() {
        let b = CubicBezier::new(Vec2::ZERO, Vec2::new(1.0, 2.0), Vec2::new(3.0, 2.0), Vec2::new(4.0, 0.0));
        let (left, right) = b.split(0.3);
        assert!((left.p3 - b.point(0.3)).length() < 1e-5);
        assert_eq!(left.p3, right.p0);
        assert!((left.point(0.5) - b.point(0.15)).length() < 1e-5);
    }

    #[test]
    fn test_straight_line_length() {
        assert!((straight().length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_parameter_at_length_on_uniform_line() {
        let b = straight();
        assert!((b.parameter_at_length(2.5) - 0.25).abs() < 1e-4);
        assert_eq!(b.parameter_at_length(-1.0), 0.0);
        assert_eq!(b.parameter_at_length(11.0), 1.0);
    }
}
