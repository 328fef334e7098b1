//! Settings persistence
//!
//! [`WeightSettings`] are stored as TOML, for example:
//!
//! ```toml
//! source = "Body"
//! targets = "Clothes"
//! mode = "collection"
//! clean = true
//! ```

use crate::IoError;
use easyweights_core::{Result, WeightSettings};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load settings from a TOML file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<WeightSettings> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path)?;
    let settings = toml::from_str(&content).map_err(IoError::from)?;
    info!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Load settings, or return defaults if the file is missing or unreadable
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> WeightSettings {
    let path = path.as_ref();
    if !path.exists() {
        info!("No settings file found at {:?}, using defaults", path);
        return WeightSettings::default();
    }

    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Failed to load settings: {}, using defaults", e);
            WeightSettings::default()
        }
    }
}

/// Save settings to a TOML file, creating parent directories as needed
pub fn save_settings<P: AsRef<Path>>(settings: &WeightSettings, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let content = toml::to_string_pretty(settings).map_err(IoError::from)?;
    fs::write(path, content)?;
    info!("Saved settings to {:?}", path);
    Ok(())
}
