//! Export functionality for animation snapshots.
//!
//! Provides JSON dumps of evaluated frames for offline inspection.

mod json_export;

pub use json_export::{export_frame_json, export_frame_json_to, FrameExport};
