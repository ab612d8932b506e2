//! Driver settings with persistence
//!
//! Settings live in `~/.config/camrig/settings.toml`; defaults are written
//! there on first run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use camrig_core::ClockConfig;
use camrig_rig::RigConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All driver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub debug: DebugSettings,
    #[serde(default)]
    pub clock: ClockConfig,
    /// Rig used by `camrig orbit`
    #[serde(default = "RigConfig::orbit")]
    pub orbit: RigConfig,
    /// Rig used by `camrig look`
    #[serde(default = "RigConfig::first_person")]
    pub first_person: RigConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputSettings::default(),
            debug: DebugSettings::default(),
            clock: ClockConfig::default(),
            orbit: RigConfig::orbit(),
            first_person: RigConfig::first_person(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("camrig").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a specific file, falling back to defaults
    ///
    /// A missing file is created with the defaults so they can be edited.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            let settings = Self::default();
            if let Err(e) = settings.save_to(path) {
                warn!("Failed to write default settings: {:#}", e);
            }
            return settings;
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
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

    /// Parse settings text, rejecting rig configurations that would not run
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.orbit.validate()?;
        settings.first_person.validate()?;
        Ok(settings)
    }

    /// Write settings as TOML, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Input device settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    /// Pointer movement multiplier applied before the rig's sensitivity
    pub pointer_multiplier: f32,
    /// Invert Y axis
    pub invert_y: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            pointer_multiplier: 1.0,
            invert_y: false,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugSettings {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` wins if set
    pub log_level: String,
    /// Log the camera pose every this many frames (0 = never)
    pub pose_log_interval: u32,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pose_log_interval: 30,
        }
    }
}
