//! Persisted editor settings.
//!
//! Settings are a flat JSON object at `<config dir>/ride/settings.json`.
//! Missing or unknown keys are ignored; any load failure falls back to
//! defaults so a corrupt file never prevents startup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Window geometry as last seen at shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            x: 0,
            y: 0,
        }
    }
}

/// Settings loaded at startup and written at shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowGeometry,
    pub explorer_visible: bool,
    pub terminal_visible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowGeometry::default(),
            explorer_visible: true,
            terminal_visible: true,
        }
    }
}

impl Settings {
    /// Returns the path to the settings file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ride").join("settings.json"))
    }

    /// Loads settings from the default location, falling back to defaults
    /// if the directory cannot be determined or the file is unreadable.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("could not determine config directory, using defaults");
                Self::default()
            }
        }
    }

    /// Loads settings from `path`. A missing or unparsable file yields
    /// defaults; the failure is logged, never surfaced.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!(?path, "no settings file, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    tracing::info!(?path, "loaded settings");
                    settings
                }
                Err(e) => {
                    tracing::error!(?path, error = %e, "failed to parse settings file");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!(?path, error = %e, "failed to read settings file");
                Self::default()
            }
        }
    }

    /// Saves settings to the default location.
    pub fn save(&self) -> Result<(), AppError> {
        let path = Self::default_path()
            .ok_or_else(|| AppError::Settings("could not determine config directory".into()))?;
        self.save_to(&path)
    }

    /// Saves settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::Settings(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(self).map_err(|e| AppError::Settings(e.to_string()))?;
        fs::write(path, json).map_err(|e| AppError::Settings(e.to_string()))?;
        tracing::info!(?path, "saved settings");
        Ok(())
    }
}
