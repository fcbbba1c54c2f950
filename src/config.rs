//! Settings store: a small JSON file loaded once at process start.
//!
//! The resulting [`Settings`] value is immutable and passed by reference
//! into the pipelines that need it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Default settings file name, resolved against the working directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Persisted user settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Include the `Commit Hash:` line in rendered reports.
    pub show_hashes: bool,
    /// Pathspec for the FILTERED narrowing stage (primary source files).
    pub primary_pathspec: String,
    /// Console accent colors, by name.
    pub colors: Palette,
}

/// Cosmetic color palette for console output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hashes: true,
            primary_pathspec: "*.gml".to_string(),
            colors: Palette::default(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            success: "green".to_string(),
            warning: "yellow".to_string(),
            error: "red".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, creating the file with defaults when absent.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let defaults = Self::default();
            let json = serde_json::to_string_pretty(&defaults).map_err(ConfigError::Parse)?;
            std::fs::write(path, json).map_err(ConfigError::Write)?;
            debug!("Created {} with default settings", path.display());
            return Ok(defaults);
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let settings = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
