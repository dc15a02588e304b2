//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BadgeError, BadgeResult};

/// Default scale change per wheel notch.
pub const WHEEL_STEP: f64 = 0.05;

/// Default scale change per pixel of two-finger distance change.
pub const PINCH_COEFFICIENT: f64 = 0.005;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where exported badges are written.
    pub output_dir: PathBuf,

    /// Badge composition defaults.
    pub badge: BadgeDefaults,

    /// Gesture tuning for drag/zoom input.
    #[serde(default)]
    pub gestures: GestureSettings,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Defaults used when composing a badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeDefaults {
    /// Directory holding the background templates.
    pub assets_dir: PathBuf,

    /// Optional placeholder photo. When unset a built-in silhouette is used.
    #[serde(default)]
    pub placeholder_photo: Option<PathBuf>,

    /// Caption shown before the user types anything.
    pub default_caption: String,

    /// Badge variant used when none is requested ("speaking" or "attending").
    pub default_variant: String,

    /// TrueType font for the caption. When unset, common system fonts are probed.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

/// Increments applied by wheel and pinch gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSettings {
    /// Scale change per wheel notch.
    pub wheel_step: f64,

    /// Scale change per pixel of finger distance change.
    pub pinch_coefficient: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "badgesmith=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            badge: BadgeDefaults::default(),
            gestures: GestureSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for BadgeDefaults {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            placeholder_photo: None,
            default_caption: "Your name and title".to_string(),
            default_variant: "attending".to_string(),
            font_path: None,
        }
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            wheel_step: WHEEL_STEP,
            pinch_coefficient: PINCH_COEFFICIENT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> BadgeResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(BadgeError::from_io_at(e, path)),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Load config from `path`, falling back to defaults.
    ///
    /// The error that caused the fallback is handed back so the caller can
    /// report it once logging is up.
    pub fn load_or_default_from(path: &Path) -> (Self, Option<BadgeError>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// [`AppConfig::load_or_default_from`] at the standard location.
    pub fn load_or_default() -> (Self, Option<BadgeError>) {
        Self::load_or_default_from(&config_file_path())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&config_path, json)?;
        Ok(config_path)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("badgesmith").join("config.json")
}
