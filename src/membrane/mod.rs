//! Closed wobbling membranes.
//!
//! A membrane is a ring of skeleton edges. Each edge contributes an anchor
//! (its midpoint), a direction and a [`Deformation`](crate::deformation::Deformation);
//! the boundary is the smooth closed curve through all anchors whose
//! handles swing with the deformation waves.

mod frame;
mod skeleton;

pub use frame::MembraneFrame;
pub use skeleton::{MembraneShape, MembraneSkeleton, Sector, Spike, ThornWindow};
