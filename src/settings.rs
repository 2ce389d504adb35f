//! Session settings with persistence
//!
//! Settings are saved to `~/.config/topdown/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use topdown_game::camera::{CurveError, SampledCurve};
use topdown_game::TopDownConfig;
use tracing::{info, warn};

/// All settings read by the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Zoom response as `[value, blend]` keys
    pub zoom_curve: Vec<[f32; 2]>,
    /// Pawn, camera, cursor and timer tuning
    pub controller: TopDownConfig,
    pub session: SessionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom_curve: vec![[0.0, 0.0], [1.0, 1.0]],
            controller: TopDownConfig::default(),
            session: SessionSettings::default(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("topdown"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the config directory, or defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Write these settings to the config directory unless a file is already there
    pub fn write_defaults_if_missing(&self) -> anyhow::Result<bool> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.write_defaults_to(&path)
    }

    /// Write to `path` when `session.write_defaults` is set and no file exists.
    /// Returns whether a file was written.
    pub fn write_defaults_to(&self, path: &Path) -> anyhow::Result<bool> {
        if !self.session.write_defaults || path.exists() {
            return Ok(false);
        }
        self.save_to(path)?;
        Ok(true)
    }

    /// Save settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Build the configured zoom curve
    pub fn zoom_curve(&self) -> Result<SampledCurve, CurveError> {
        SampledCurve::from_pairs(&self.zoom_curve)
    }
}

/// Headless session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Seconds of simulated time
    pub duration: f32,
    /// Seconds between simulated frames
    pub frame_delta: f32,
    /// Write defaults to disk when no settings file exists
    pub write_defaults: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            duration: 6.0,
            frame_delta: 1.0 / 60.0,
            write_defaults: true,
        }
    }
}

impl SessionSettings {
    /// Get the viewport as a tuple
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("topdown-settings-{}-{}", std::process::id(), name))
            .join("settings.toml")
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = temp_path("round-trip");
        let mut settings = Settings::default();
        settings.session.width = 1280;
        settings.controller.camera.zoom_speed = 0.05;
        settings.zoom_curve = vec![[0.0, 0.0], [0.5, 0.2], [1.0, 1.0]];
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.session.width, 1280);
        assert_eq!(loaded.controller.camera.zoom_speed, 0.05);
        assert_eq!(loaded.zoom_curve().unwrap().keys().len(), 3);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_missing_or_broken_file_gives_defaults() {
        let missing = temp_path("missing");
        assert_eq!(Settings::load_from(&missing).session.width, 1920);

        let broken = temp_path("broken");
        if let Some(dir) = broken.parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(&broken, "session = 12").unwrap();
        assert_eq!(Settings::load_from(&broken).session.height, 1080);

        if let Some(dir) = broken.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_write_defaults_only_when_missing() {
        let path = temp_path("write-defaults");
        let mut settings = Settings::default();
        assert!(settings.write_defaults_to(&path).unwrap());

        // An existing file is never overwritten
        settings.session.width = 640;
        assert!(!settings.write_defaults_to(&path).unwrap());
        assert_eq!(Settings::load_from(&path).session.width, 1920);

        let _ = fs::remove_file(&path);
        settings.session.write_defaults = false;
        assert!(!settings.write_defaults_to(&path).unwrap());
        assert!(!path.exists());

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_bad_curve_is_an_error() {
        let mut settings = Settings::default();
        settings.zoom_curve = vec![[0.5, 0.0], [0.1, 1.0]];
        assert!(matches!(settings.zoom_curve(), Err(CurveError::Unsorted(1))));
    }
}
