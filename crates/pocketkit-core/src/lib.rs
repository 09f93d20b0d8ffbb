//! # PocketKit Core
//!
//! Geometry types shared by the PocketKit crates: points, curves with arc
//! segments, areas, bounding boxes and the [`GeometryEngine`] contract the
//! planners use for offsetting and clipping. A default engine over
//! `cavalier_contours` is provided as [`CavalierEngine`].

pub mod engine;
pub mod error;
pub mod geometry;
pub mod units;

pub use engine::{CavalierEngine, GeometryEngine, PocketRequest};
pub use error::{GeometryError, GeometryResult};
pub use geometry::{
    arc_sweep, Area, BoundingBox, Curve, Point, Rotation, SegmentKind, Vertex, CLOSE_TOLERANCE,
};
pub use units::MeasurementSystem;
