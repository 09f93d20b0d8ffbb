//! Error types for the pocket planners.
//!
//! Every error here is fatal to the pocket computation that raised it: no
//! partial toolpath is returned and nothing is retried.

use pocketkit_core::GeometryError;
use thiserror::Error;

/// Errors that can occur while planning a pocket.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PocketError {
    /// An entry tunable is outside its allowed range.
    #[error("Invalid configuration '{name}' = {value}: {reason}")]
    InvalidConfiguration {
        name: String,
        value: f64,
        reason: String,
    },

    /// No collision-free heading was found for a ramp or helical entry.
    #[error("Could not fit {style} entry in pocket operation at X{x} Y{y}")]
    EntryPlacement { style: String, x: f64, y: f64 },

    /// Invalid pocket or depth parameters.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The polygon engine failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl PocketError {
    /// Shorthand for an out-of-range tunable.
    pub fn out_of_range(name: &str, value: f64, min: f64, max: f64) -> Self {
        Self::InvalidConfiguration {
            name: name.to_string(),
            value,
            reason: format!("must be between {min} and {max}"),
        }
    }
}

/// Result type for pocket planning.
pub type PocketResult<T> = std::result::Result<T, PocketError>;
