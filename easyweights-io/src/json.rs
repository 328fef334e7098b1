//! JSON scene format

use crate::{IoError, SceneReader, SceneWriter};
use easyweights_core::{Result, Scene};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub struct JsonReader;
pub struct JsonWriter;

impl SceneReader for JsonReader {
    fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let reader = BufReader::new(File::open(path)?);
        let scene: Scene = serde_json::from_reader(reader).map_err(IoError::from)?;
        scene.validate()?;

        debug!("Read scene with {} objects from {:?}", scene.objects().len(), path);
        Ok(scene)
    }
}

impl SceneWriter for JsonWriter {
    fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
        let path = path.as_ref();
        // NaN weights would be written as null and fail to load
        scene.validate()?;

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, scene).map_err(|e| IoError::WriteError {
            message: e.to_string(),
        })?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        debug!("Wrote scene with {} objects to {:?}", scene.objects().len(), path);
        Ok(())
    }
}

/// Parse a scene from a JSON string
pub fn scene_from_str(content: &str) -> Result<Scene> {
    let scene: Scene = serde_json::from_str(content).map_err(IoError::from)?;
    scene.validate()?;
    Ok(scene)
}
