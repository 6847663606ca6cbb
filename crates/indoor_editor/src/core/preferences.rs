//! Editor preferences and settings.
//!
//! Persistent settings that survive editor restarts, stored as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use indoor_math::PolygonCheck;
use indoor_model::floor::DEFAULT_FLOOR_NAME;

use super::EditorError;

/// Environment variable overriding [`EditorPreferences::grid_size`]
pub const GRID_SIZE_ENV: &str = "EDITOR_GRID_SIZE";

/// Editor preferences and settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    // Grid settings
    /// Spacing positions snap to; zero or less disables snapping
    pub grid_size: f64,
    pub show_grid: bool,

    // History
    /// Undo entries kept, 0 for unbounded
    pub history_limit: usize,

    // Drawing
    pub polygon_check: PolygonCheck,

    // New documents
    pub default_floor_name: String,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            grid_size: 50.0,
            show_grid: true,
            history_limit: 100,
            polygon_check: PolygonCheck::WholePath,
            default_floor_name: DEFAULT_FLOOR_NAME.to_string(),
        }
    }
}

impl EditorPreferences {
    /// Load preferences from a file.
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EditorError::Preferences(format!("{}: {}", path.display(), e)))?;
        let preferences: Self = toml::from_str(&content)
            .map_err(|e| EditorError::Preferences(format!("{}: {}", path.display(), e)))?;
        log::info!("Loaded preferences from {:?}", path);
        Ok(preferences)
    }

    /// Save preferences to a file.
    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EditorError::Preferences(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| EditorError::Preferences(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| EditorError::Preferences(format!("{}: {}", path.display(), e)))?;
        log::info!("Saved preferences to {:?}", path);
        Ok(())
    }

    /// Preferences from the default location, falling back to defaults when
    /// the file is missing or unreadable. Environment overrides apply either way.
    pub fn load_or_default() -> Self {
        let mut preferences = match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring preferences: {}", e);
                Self::default()
            }),
            _ => Self::default(),
        };
        preferences.apply_env_overrides();
        preferences
    }

    /// Apply overrides from the environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(GRID_SIZE_ENV) {
            match value.trim().parse::<f64>() {
                Ok(size) => {
                    self.grid_size = size;
                    log::info!("Grid size from env: {}", size);
                }
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", GRID_SIZE_ENV, value),
            }
        }
    }

    /// Whether positions snap to the grid
    pub fn snapping_enabled(&self) -> bool {
        self.grid_size > 0.0
    }

    /// Get the default preferences path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("indoor_map");
            p.push("preferences.toml");
            p
        })
    }
}
