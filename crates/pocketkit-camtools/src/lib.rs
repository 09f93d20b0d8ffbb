//! # PocketKit CAM Tools
//!
//! Pocket clearing toolpath planning on top of `pocketkit-core`.
//!
//! ## Planners
//!
//! - **Decompose**: concentric rings by repeated inward offset
//! - **Zig-zag**: raster clearing at any angle, bidirectional or one-way
//! - **Entry**: plunge, ramp and helical entry moves placed in cleared material
//! - **Sequencer**: depth loop with feed-or-retract decisions between passes
//! - **Pocket**: the operation tying them together
//!
//! ## Supporting Infrastructure
//!
//! - **Depth**: depth level generation with finish and through depths
//! - **Motion**: the [`MotionSink`] output trait and a recording sink
//! - **Profile**: single-curve profile passes

pub mod context;
pub mod decompose;
pub mod depth;
pub mod entry;
pub mod error;
pub mod motion;
pub mod pocket;
pub mod profile;
pub mod sequencer;
pub mod zigzag;

// Re-export commonly used items
pub use context::PlanningContext;
pub use decompose::{decompose, flatten, RingGroup};
pub use depth::{DepthLevel, DepthParams};
pub use entry::{helix_waypoints, EntryConfig, EntryPlanner, EntryStyle, HelixDirection};
pub use error::{PocketError, PocketResult};
pub use motion::{emit_vertex, Move, MotionSink, MoveRecorder};
pub use pocket::{
    pocket, CutMode, PocketGenerator, PocketParams, PocketStrategy, PocketSummary, StartingPlace,
};
pub use profile::{DirectProfile, ProfileCutter};
pub use sequencer::{feed_possible, CutSequencer};
pub use zigzag::{chain_zigs, make_zig, scan, ScanDirection};
