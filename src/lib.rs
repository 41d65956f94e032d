//! Cell Animator - procedural deformation engine for living-cell visuals
//!
//! Generates wobbling closed membranes and growing jointed flagella from a
//! small parametric model. Every evaluation is a pure function of the
//! generated state and a clock value supplied by the caller, and any
//! moment of a membrane's periodic motion can be frozen on demand to line
//! up with an external event.

pub mod cell;
pub mod config;
pub mod deformation;
pub mod error;
pub mod export;
pub mod flagellum;
pub mod geometry;
pub mod membrane;
pub mod timing;

pub use cell::{CellFrame, CellVisual};
pub use config::{FlagellumConfig, MembraneConfig, Parameters};
pub use deformation::{find_phase_time, triangle_wave, Deformation, Lock, PhaseScale};
pub use error::{AnimationError, Result};
pub use flagellum::{Flagellum, FlagellumFrame, FlagellumTree};
pub use geometry::CurveMode;
pub use membrane::{MembraneFrame, MembraneShape, MembraneSkeleton, Sector, Spike};
pub use timing::{relative_time, Envelope, EnvelopePhase};
