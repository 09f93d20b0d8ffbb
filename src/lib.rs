//! # PocketKit
//!
//! Pocket milling toolpath planner for CNC machines:
//! - Concentric ring clearing by repeated inward offset, with islands
//! - Zig-zag raster clearing at any angle
//! - Plunge, ramp and helical entry moves placed inside cleared material
//! - Multi-level depth stepping with keep-tool-down transitions
//!
//! ## Architecture
//!
//! PocketKit is organized as a workspace with multiple crates:
//!
//! 1. **pocketkit-core** - Geometry types, the polygon engine trait and its
//!    `cavalier_contours` implementation
//! 2. **pocketkit-camtools** - The planners and the pocket operation
//! 3. **pocketkit-settings** - Persistent configuration
//! 4. **pocketkit** - Job files and the command line tool

pub mod job;

pub use job::{run_job, PocketJob, ShapeSpec, VertexSpec};

pub use pocketkit_core::{
    Area, CavalierEngine, Curve, GeometryEngine, GeometryError, MeasurementSystem, Point,
};

pub use pocketkit_camtools::{
    DepthParams, EntryConfig, EntryStyle, Move, MotionSink, MoveRecorder, PocketError,
    PocketGenerator, PocketParams, PocketStrategy, StartingPlace,
};

pub use pocketkit_settings::{Config, MachineSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for toolpath data
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
