//! Tessellated membrane output for one frame.

use glam::Vec2;
use serde::Serialize;

use crate::geometry::{fan_indices, pack_vertices, StrokeVertex};

/// Center-prefixed closed point list with per-point stroke thickness
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembraneFrame {
    /// `points[0]` is the fan center, the rest is the boundary ring
    pub points: Vec<Vec2>,
    /// Parallel to `points`
    pub thickness: Vec<f32>,
    /// Samples per skeleton edge
    pub detail: usize,
}

impl MembraneFrame {
    pub fn center(&self) -> Vec2 {
        self.points[0]
    }

    /// Boundary samples without the center
    pub fn ring(&self) -> &[Vec2] {
        &self.points[1..]
    }

    pub fn sample_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Samples belonging to one skeleton edge, `None` past the last edge
    pub fn edge_samples(&self, edge: usize) -> Option<&[Vec2]> {
        let start = edge.checked_mul(self.detail)?.checked_add(1)?;
        let end = start.checked_add(self.detail)?;
        self.points.get(start..end)
    }

    /// Fan triangulation indices for filling the membrane
    pub fn indices(&self) -> Vec<u32> {
        fan_indices(self.sample_count())
    }

    /// GPU-ready vertices
    pub fn vertices(&self) -> Vec<StrokeVertex> {
        pack_vertices(&self.points, &self.thickness)
    }
}
