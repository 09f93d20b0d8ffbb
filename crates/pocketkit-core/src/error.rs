//! Error handling for PocketKit geometry
//!
//! Provides error types for the geometry layer:
//! - Curve validation errors (open or degenerate input)
//! - Polygon engine failures (offset/boolean operations)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by curve constructors and by [`crate::engine::GeometryEngine`]
/// implementations. An empty result from an offset or boolean operation is
/// not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A closed curve was required
    #[error("Curve is not closed ({vertices} vertices)")]
    OpenCurve {
        /// Number of vertices in the offending curve.
        vertices: usize,
    },

    /// Input that cannot be represented (zero-length arc, NaN coordinate, ...)
    #[error("Degenerate geometry: {reason}")]
    Degenerate {
        /// Why the geometry was rejected.
        reason: String,
    },

    /// The polygon engine failed
    #[error("Geometry engine error: {message}")]
    Engine {
        /// The error message.
        message: String,
    },
}

impl GeometryError {
    /// Shorthand for [`GeometryError::Degenerate`].
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GeometryError::Engine`].
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }
}

/// Result type for geometry operations
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
