//! I/O operations for scenes and settings
//!
//! This crate reads and writes scene files (JSON) and the weight tool
//! settings (TOML).

pub mod json;
pub mod settings;
pub mod error;

pub use error::*;
pub use json::{JsonReader, JsonWriter};
pub use settings::{load_settings, load_settings_or_default, save_settings};

use easyweights_core::{Result, Scene};
use std::path::Path;

/// Trait for reading scenes from files
pub trait SceneReader {
    fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene>;
}

/// Trait for writing scenes to files
pub trait SceneWriter {
    fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()>;
}

fn unsupported_format(path: &Path) -> easyweights_core::Error {
    IoError::InvalidFormat {
        format: path.display().to_string(),
    }
    .into()
}

/// Auto-detect format and read scene
pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => JsonReader::read_scene(path),
        _ => Err(unsupported_format(path)),
    }
}

/// Auto-detect format and write scene
pub fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => JsonWriter::write_scene(scene, path),
        _ => Err(unsupported_format(path)),
    }
}
