//! Uniform Catmull-Rom spans for the through-spline curve mode.

use glam::Vec2;

/// Point on the span from `p1` to `p2` at parameter `t`
pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    ((p1 * 2.0)
        + (p2 - p0) * t
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
        * 0.5
}

/// Point on span `span` of the closed Catmull-Rom curve through `knots`
///
/// Span `i` runs from `knots[i]` to `knots[i + 1]`, wrapping at the end.
pub fn closed_point(knots: &[Vec2], span: usize, t: f32) -> Vec2 {
    let n = knots.len();
    let p0 = knots[(span + n - 1) % n];
    let p1 = knots[span % n];
    let p2 = knots[(span + 1) % n];
    let p3 = knots[(span + 2) % n];
    catmull_rom(p0, p1, p2, p3, t)
}
