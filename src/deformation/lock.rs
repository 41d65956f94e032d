//! Freeze windows over a deformation's phase time.

use serde::{Deserialize, Serialize};

/// Window of phase time during which a deformation is held at `start`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lock {
    pub start: f64,
    pub finish: f64,
}

impl Lock {
    /// Build a window, clamping an inverted one to zero width
    ///
    /// Non-finite bounds produce `None`; the vertex then stays on live time.
    pub fn new(start: f64, finish: f64) -> Option<Self> {
        if !start.is_finite() || !finish.is_finite() {
            log::warn!("Discarding non-finite lock window [{}, {})", start, finish);
            return None;
        }
        if finish < start {
            log::warn!("Inverted lock window [{}, {}), clamping finish to start", start, finish);
        }
        Some(Self {
            start,
            finish: finish.max(start),
        })
    }

    /// True while `phase_time` lies in `[start, finish)`
    pub fn is_active(&self, phase_time: f64) -> bool {
        phase_time >= self.start && phase_time < self.finish
    }

    /// Phase time to evaluate with: frozen inside the window, live outside
    pub fn phase_time(&self, phase_time: f64) -> f64 {
        if self.is_active(phase_time) {
            self.start
        } else {
            phase_time
        }
    }

    /// Windows that overlap or share a boundary
    pub fn touches(&self, other: &Lock) -> bool {
        self.start <= other.finish && other.start <= self.finish
    }

    /// Grow to the smallest window containing both
    pub fn extend(&mut self, other: &Lock) {
        self.start = self.start.min(other.start);
        self.finish = self.finish.max(other.finish);
    }
}

/// The two independent locks carried by each skeleton vertex
///
/// `outbound` freezes the control point leaving the vertex's anchor,
/// `inbound` the control point arriving at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexLocks {
    pub inbound: Option<Lock>,
    pub outbound: Option<Lock>,
}

impl VertexLocks {
    pub fn install_inbound(&mut self, lock: Lock) {
        install(&mut self.inbound, lock);
    }

    pub fn install_outbound(&mut self, lock: Lock) {
        install(&mut self.outbound, lock);
    }

    /// Drop windows that ended before `phase_time`
    pub fn clear_expired(&mut self, phase_time: f64) {
        for slot in [&mut self.inbound, &mut self.outbound] {
            if slot.is_some_and(|l| l.finish <= phase_time) {
                *slot = None;
            }
        }
    }
}

fn install(slot: &mut Option<Lock>, lock: Lock) {
    match slot {
        Some(existing) if existing.touches(&lock) => existing.extend(&lock),
        _ => *slot = Some(lock),
    }
}
