//! Open jointed tendrils that grow, hold and retract.
//!
//! A [`Flagellum`] is a chain of jittered joints from an origin to a target
//! vector, revealed by arc length so it grows at a constant apparent speed.
//! A [`FlagellumTree`] times one trunk and its branches inside a single
//! window.

mod strand;
mod tree;

pub use strand::{Flagellum, FlagellumFrame, Joint};
pub use tree::{FlagellumTree, TreeSchedule, TreeTargets, PHASE_RATIOS};
