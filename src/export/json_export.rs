//! JSON frame export for debugging animation output.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use crate::cell::CellFrame;

/// Full frame export structure
#[derive(Debug, Clone, Serialize)]
pub struct FrameExport<'a> {
    /// Export timestamp
    pub exported_at: String,
    /// Export version for compatibility
    pub version: &'static str,
    /// Fan triangulation of the wall, for quick plotting
    pub wall_indices: Vec<u32>,
    /// Evaluated frame
    pub frame: &'a CellFrame,
}

impl<'a> FrameExport<'a> {
    fn new(frame: &'a CellFrame) -> Self {
        Self {
            exported_at: Local::now().to_rfc3339(),
            version: "1.0.0",
            wall_indices: frame.wall.indices(),
            frame,
        }
    }
}

/// Export an evaluated frame to JSON
///
/// Creates the exports directory if it doesn't exist.
/// Filename is auto-generated with timestamp: `frame_YYYYMMDD_HHMMSS.json`
///
/// Returns the path to the saved JSON file.
pub fn export_frame_json(frame: &CellFrame) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now();
    let filename = format!("frame_{}.json", timestamp.format("%Y%m%d_%H%M%S"));
    let path = dir.join(filename);

    export_frame_json_to(frame, &path)?;
    Ok(path)
}

/// Export a frame to a specific file
pub fn export_frame_json_to(frame: &CellFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &FrameExport::new(frame))?;

    log::info!("JSON frame exported: {}", path.display());
    Ok(())
}
