//! Triangle wave and its inverse.

use super::{Deformation, PhaseScale};

/// Continuous triangle wave starting at `l` and bouncing between `l` and `r`
///
/// The wave advances `alpha` units of value per unit of `time`, so its
/// fundamental period is `2|r - l| / alpha`. `r < l` gives the mirror image.
pub fn triangle_wave(l: f64, r: f64, time: f64, alpha: f64) -> f64 {
    let d = r - l;
    let span = d.abs();
    if span == 0.0 || !span.is_finite() {
        return l;
    }
    let k = time * alpha;
    if !k.is_finite() {
        return l;
    }
    let mut delta = k.rem_euclid(2.0 * span);
    if delta > span {
        delta = 2.0 * span - delta;
    }
    l + delta * d.signum()
}

/// Smallest phase time `t' >= from` at which the deformation's wave equals `target`
///
/// `target` is clamped into the swing range. Returns `None` when the
/// deformation cannot oscillate (zero length, zero angle or zero scale), in
/// which case callers leave the edge unlocked.
pub fn find_phase_time(
    deformation: &Deformation,
    from: f64,
    target: f64,
    scale: &PhaseScale,
) -> Option<f64> {
    let alpha = scale.scale(deformation.length);
    let l = -(deformation.angle as f64);
    let r = deformation.angle as f64;
    let d = r - l;
    let span = d.abs();
    if alpha <= 0.0 || span == 0.0 || !from.is_finite() {
        return None;
    }

    // Offset of the target from the starting value, measured along the wave
    let (lo, hi) = (l.min(r), l.max(r));
    let offset = (target.clamp(lo, hi) - l).abs();

    let period = 2.0 * span;
    let k0 = from * alpha;
    let base = (k0 / period).floor() * period;
    let rising = offset;
    let falling = period - offset;

    let k = [base + rising, base + falling, base + period + rising]
        .into_iter()
        .filter(|&k| k >= k0)
        .fold(f64::INFINITY, f64::min);

    let t = (k / alpha).max(from);
    t.is_finite().then_some(t)
}
