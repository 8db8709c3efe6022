//! Game settings and preferences
//!
//! Persisted as JSON next to the executable, separate from high scores.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Present with vsync
    pub vsync: bool,
    /// Show an FPS counter in the window title
    pub show_fps: bool,
    /// Pin the run seed for reproducible runs (None = seed from the clock)
    pub fixed_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vsync: true,
            show_fps: false,
            fixed_seed: None,
        }
    }
}

impl Settings {
    /// Settings file name, resolved relative to the working directory
    pub const FILE_NAME: &'static str = "brickfall_settings.json";

    /// Load settings, falling back to defaults on a missing or bad file
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings file: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("using default settings");
                Self::default()
            }
        }
    }

    /// Save settings; best effort, a failure only logs
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("failed to save settings: {err}");
                }
            }
            Err(err) => log::warn!("failed to serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load(Path::new("definitely/not/here.json"));
        assert!(settings.vsync);
        assert_eq!(settings.fixed_seed, None);
    }

    #[test]
    fn test_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join("brickfall_settings_test.json");

        let settings = Settings {
            vsync: false,
            show_fps: true,
            fixed_seed: Some(1234),
        };
        settings.save(&path);

        let loaded = Settings::load(&path);
        assert!(!loaded.vsync);
        assert!(loaded.show_fps);
        assert_eq!(loaded.fixed_seed, Some(1234));

        let _ = std::fs::remove_file(&path);
    }
}
