//! Configuration for the capture and recording engines

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Rgba, StrokeStyle};
use crate::screencast::{ClipFormat, StreamConstraints};

/// Styling of the selection overlay drawn during the drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionStyle {
    /// Scrim laid over the whole viewport while selecting
    pub scrim: Rgba,
    /// Translucent fill of the live rectangle
    pub fill: Rgba,
    /// Outline of the live rectangle
    pub outline: Rgba,
    /// Outline stroke width in pixels
    pub outline_width: f32,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            // 30% black scrim
            scrim: Rgba::new(0, 0, 0, 77),
            // Translucent red fill, solid red 2px outline
            fill: Rgba::new(220, 53, 69, 26),
            outline: Rgba::new(220, 53, 69, 230),
            outline_width: 2.0,
        }
    }
}

/// Capture engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Stable element id of the host trigger widget, hidden while capturing
    /// and excluded from page rasterization
    pub widget_element_id: String,
    /// Downscale factor for the full-page raster; the crop is scaled back up
    /// to the selection's true pixel size during compositing
    pub page_scale: f32,
    /// JPEG quality of the output image, 0-100
    pub jpeg_quality: u8,
    /// Gap between the selection and the toolbar, in pixels
    pub toolbar_gap: f32,
    /// Selection overlay styling
    pub selection: SelectionStyle,
    /// Default pen style for new sessions
    pub pen: StrokeStyle,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            widget_element_id: "feedback-widget-container".to_string(),
            page_scale: 0.5,
            jpeg_quality: 80,
            toolbar_gap: 10.0,
            selection: SelectionStyle::default(),
            pen: StrokeStyle::default(),
        }
    }
}

/// Recording engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecorderConfig {
    /// Container/codec family requested from the platform encoder
    pub format: ClipFormat,
    /// Display stream constraints
    pub constraints: StreamConstraints,
}

/// Combined configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub recorder: RecorderConfig,
}

impl Config {
    pub const FILE_NAME: &'static str = "feedback-capture.json";

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("feedback-capture").join(Self::FILE_NAME))
    }

    /// Load configuration from the user config directory, or return defaults
    /// if unavailable
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Error parsing config, using defaults: {err}");
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read config file, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Save configuration to the user config directory
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            log::error!("No config directory available, config not saved");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {err}");
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = CaptureConfig::default();
        assert_eq!(config.page_scale, 0.5);
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.toolbar_gap, 10.0);
        assert_eq!(config.widget_element_id, "feedback-widget-container");
        assert_eq!(config.pen.width, 3.0);
    }

    #[test]
    fn round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.capture.jpeg_quality = 92;
        config.capture.pen = config.capture.pen.with_width(8.0);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("nope.json"));
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
