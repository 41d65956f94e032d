//! Parameter structures as loaded from disk.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Annulus, FlagellumConfig, MembraneConfig};
use crate::deformation::PhaseScale;
use crate::error::Result;
use crate::geometry::CurveMode;

/// Top-level parameters container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameters {
    /// Outer cell wall
    pub cell: MembraneParameters,
    /// Optional nucleus drawn inside the wall, held within a radius band
    pub nucleus: Option<MembraneParameters>,
    /// Attack tendrils
    pub flagellum: FlagellumParameters,
}

impl Parameters {
    /// Load parameters from JSON files, or use defaults if files don't exist
    pub fn load_or_default() -> Self {
        Self::load_from_dir("data/parameters")
    }

    /// Load parameters from specific directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let defaults = Self::default();
        let cell = load_json_or(dir.join("cell.json"), "cell membrane", defaults.cell);
        let nucleus = load_json_or(dir.join("nucleus.json"), "nucleus", defaults.nucleus);
        let flagellum = load_json_or(dir.join("flagellum.json"), "flagellum", defaults.flagellum);

        Self {
            cell,
            nucleus,
            flagellum,
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        let cell = MembraneParameters::default();
        let nucleus = MembraneParameters {
            radius: cell.radius * 0.35,
            segments: 9,
            detail: 8,
            frequency: cell.frequency * 0.6,
            skew_limit: 0.6,
            annulus_band: Some(0.2),
            ..cell.clone()
        };
        Self {
            cell,
            nucleus: Some(nucleus),
            flagellum: FlagellumParameters::default(),
        }
    }
}

fn load_json_or<T, P>(path: P, what: &str, default: T) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    match std::fs::read_to_string(path.as_ref()) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(params) => {
                log::info!("Loaded {} parameters from {:?}", what, path.as_ref());
                params
            }
            Err(e) => {
                log::warn!("Failed to parse {} parameters: {}, using defaults", what, e);
                default
            }
        },
        Err(_) => {
            log::info!("{} parameters file not found, using defaults", what);
            default
        }
    }
}

/// Closed membrane (cell wall or organelle) parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MembraneParameters {
    /// Radius of the generated regular polygon
    pub radius: f32,
    /// Number of skeleton edges
    pub segments: usize,
    /// Samples per edge
    pub detail: usize,
    /// Phase time per unit of clock time
    pub frequency: f64,
    /// Largest swing of a control point (radians)
    pub skew_limit: f32,
    /// Bezier or through-spline curve
    pub curve_mode: CurveMode,
    /// When set, control points stay within `radius * (1 ± band)`
    pub annulus_band: Option<f32>,
    /// Exponent tying oscillation speed to deformation length
    pub phase_scale_exponent: f64,
}

impl MembraneParameters {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        load_json_or(path, "membrane", Self::default())
    }

    /// Resolve into the engine-facing config
    pub fn resolve(&self) -> Result<MembraneConfig> {
        let annulus = self
            .annulus_band
            .map(|band| Annulus::around_origin(self.radius, band));
        MembraneConfig::new(
            self.detail,
            self.frequency,
            self.skew_limit,
            self.curve_mode,
            annulus,
            PhaseScale::new(self.phase_scale_exponent),
        )
    }
}

impl Default for MembraneParameters {
    fn default() -> Self {
        Self {
            radius: 120.0,
            segments: 12,
            detail: 10,
            frequency: 0.002,
            skew_limit: 0.5,
            curve_mode: CurveMode::Bezier,
            annulus_band: None,
            phase_scale_exponent: PhaseScale::default().exponent,
        }
    }
}

/// Flagellum generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagellumParameters {
    /// Target spacing between joints
    pub segment_length: f32,
    /// Largest perpendicular joint jitter
    pub amplitude: f32,
    /// Largest joint swing (radians)
    pub skew_limit: f32,
    /// Samples per joint-to-joint segment
    pub detail: usize,
    /// Phase time per unit of clock time
    pub frequency: f64,
    /// Exponent tying oscillation speed to deformation length
    pub phase_scale_exponent: f64,
}

impl FlagellumParameters {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        load_json_or(path, "flagellum", Self::default())
    }

    /// Resolve into the engine-facing config
    pub fn resolve(&self) -> Result<FlagellumConfig> {
        FlagellumConfig::new(
            self.segment_length,
            self.amplitude,
            self.skew_limit,
            self.detail,
            self.frequency,
            PhaseScale::new(self.phase_scale_exponent),
        )
    }
}

impl Default for FlagellumParameters {
    fn default() -> Self {
        Self {
            segment_length: 40.0,
            amplitude: 12.0,
            skew_limit: 0.8,
            detail: 8,
            frequency: 0.004,
            phase_scale_exponent: PhaseScale::default().exponent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let params = Parameters::default();
        assert!(params.cell.resolve().is_ok());
        assert!(params.flagellum.resolve().is_ok());
        let nucleus = params.nucleus.as_ref().unwrap().resolve().unwrap();
        let annulus = nucleus.annulus.unwrap();
        assert!(annulus.inner < annulus.outer);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let params: MembraneParameters =
            serde_json::from_str(r#"{ "segments": 7, "curve_mode": "spline" }"#).unwrap();
        assert_eq!(params.segments, 7);
        assert_eq!(params.curve_mode, CurveMode::Spline);
        assert_eq!(params.detail, MembraneParameters::default().detail);
    }

    #[test]
    fn test_missing_dir_falls_back() {
        let params = Parameters::load_from_dir("definitely/not/a/dir");
        assert_eq!(params.cell.segments, MembraneParameters::default().segments);
    }

    #[test]
    fn test_bad_skew_rejected() {
        let params = FlagellumParameters {
            skew_limit: 4.0,
            ..Default::default()
        };
        assert!(params.resolve().is_err());
    }
}
