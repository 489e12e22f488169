//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::OverlayMode;
use crate::error::GanttError;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overlay mode a fresh session starts in.
    pub default_mode: OverlayMode,
    /// Pretty-print JSON output.
    pub pretty_output: bool,
    /// Width in pixels of the reference chart used for arrow geometry.
    pub chart_width: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_mode: OverlayMode::Hover,
            pretty_output: true,
            chart_width: 1200.0,
        }
    }
}

impl Settings {
    /// Default location of the settings file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "GanttTimeline")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`. A missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %path.display(), "no settings file ({e}), using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to parse settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), GanttError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GanttError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| GanttError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"default_mode": "click"}"#).unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.default_mode, OverlayMode::Click);
        assert!(settings.pretty_output);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = Settings {
            default_mode: OverlayMode::All,
            pretty_output: false,
            chart_width: 800.0,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }
}
