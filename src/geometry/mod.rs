//! Curve primitives and tessellation helpers.
//!
//! Membranes and flagella are both built from cubic Bezier segments between
//! anchors, or optionally from a Catmull-Rom through-spline, and sampled
//! into flat point lists.

mod bezier;
mod path;
pub mod spline;

pub use bezier::CubicBezier;
pub use path::{
    closest_on_segment, fan_indices, nearest_on_ring, pack_vertices, signed_area, StrokeVertex,
    DEFAULT_THICKNESS,
};

use serde::{Deserialize, Serialize};

/// How a closed membrane curve is built through its anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveMode {
    /// Cubic Bezier segments with the deformation control points as handles
    #[default]
    Bezier,
    /// Catmull-Rom spline passing through anchors and control-point midpoints
    Spline,
}
