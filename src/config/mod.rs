//! Configuration module for loading animation parameters.
//!
//! Parameter files are plain JSON. They are resolved into small `Copy`
//! structs before reaching the deformation engine.

mod parameters;
mod resolved;

pub use parameters::{FlagellumParameters, MembraneParameters, Parameters};
pub use resolved::{Annulus, FlagellumConfig, MembraneConfig};
