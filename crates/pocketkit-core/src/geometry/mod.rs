//! Geometry primitives: points, curves with arc segments and areas.

pub mod area;
pub mod bounds;
pub mod curve;
pub mod point;
mod shapes;

pub use area::Area;
pub use bounds::BoundingBox;
pub use curve::{arc_sweep, Curve, SegmentKind, Vertex, CLOSE_TOLERANCE};
pub use point::{Point, Rotation};
