//! PocketKit Settings Crate
//!
//! Persistent defaults for pocket planning: entry tunables, pocket parameters
//! and the machine's measurement system.

pub mod config;
pub mod error;

pub use config::{Config, MachineSettings, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
