//! Configuration and settings management for PocketKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, selected by file extension.
//!
//! Configuration is organized into sections:
//! - Machine preferences (measurement system)
//! - Entry move tunables (ramp angle, helix size and direction)
//! - Pocket defaults (tool, stepover, strategy, entry style)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use pocketkit_camtools::{EntryConfig, PocketParams};
pub use pocketkit_core::MeasurementSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory under the platform config dir holding the settings file.
pub const CONFIG_DIR_NAME: &str = "pocketkit";

/// Default settings file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Machine preference settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Units the geometry is drawn in
    pub measurement_system: MeasurementSystem,
}

impl MachineSettings {
    /// Unit scale handed to the geometry engine.
    pub fn unit_scale(&self) -> f64 {
        self.measurement_system.scale()
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Machine preferences
    pub machine: MachineSettings,
    /// Entry move tunables
    pub entry: EntryConfig,
    /// Pocket parameters used when a job does not give its own
    pub pocket: PocketParams,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.entry.validate()?;
        self.pocket.validate()?;
        Ok(())
    }

    /// Default settings file: `<config dir>/pocketkit/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads `path`, or the default settings file when `path` is `None`.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse or validate is an error.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    debug!("{}; using default settings", e);
                    return Ok(Self::default());
                }
            },
        };
        if !path.exists() {
            debug!(path = %path.display(), "No settings file; using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }
}
