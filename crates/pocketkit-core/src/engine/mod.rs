//! Polygon engine contract.
//!
//! Planners never offset or clip curves themselves; they go through a
//! [`GeometryEngine`]. The default implementation is
//! [`CavalierEngine`](cavalier::CavalierEngine).

pub mod cavalier;

pub use cavalier::CavalierEngine;

use crate::error::GeometryResult;
use crate::geometry::{Area, Curve};
use serde::{Deserialize, Serialize};

/// Arguments of a single-call pocketing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PocketRequest {
    pub tool_radius: f64,
    pub extra_offset: f64,
    pub stepover: f64,
    pub from_center: bool,
    /// Raster angle in degrees, `None` for concentric rings.
    pub zig_zag_angle: Option<f64>,
}

/// Boolean and offset operations on areas.
pub trait GeometryEngine {
    /// Offsets every curve of `area` by `distance`; positive grows the
    /// material, negative shrinks it. An empty result is valid.
    fn offset(&self, area: &Area, distance: f64) -> GeometryResult<Area>;

    /// Material of `a` not covered by `b`.
    fn subtract(&self, a: &Area, b: &Area) -> GeometryResult<Area>;

    /// Material covered by both `a` and `b`.
    fn intersect(&self, a: &Area, b: &Area) -> GeometryResult<Area>;

    /// Reorders curves so each boundary is immediately followed by its holes.
    fn reorder(&self, area: &Area) -> GeometryResult<Area>;

    /// True when every output curve is a complete boundary on its own, with
    /// holes stitched in. False when holes are separate counter-clockwise
    /// curves.
    fn holes_linked(&self) -> bool;

    /// Unit scale of the geometry: 1.0 for millimetres, 25.4 for inches.
    fn units(&self) -> f64 {
        1.0
    }

    /// Whole-pocket primitive, for engines that can produce the pass list in
    /// one call. `None` means the planners do the work.
    fn make_pocket_toolpath(
        &self,
        _area: &Area,
        _request: &PocketRequest,
    ) -> Option<GeometryResult<Vec<Curve>>> {
        None
    }
}

impl<E: GeometryEngine + ?Sized> GeometryEngine for &E {
    fn offset(&self, area: &Area, distance: f64) -> GeometryResult<Area> {
        (**self).offset(area, distance)
    }

    fn subtract(&self, a: &Area, b: &Area) -> GeometryResult<Area> {
        (**self).subtract(a, b)
    }

    fn intersect(&self, a: &Area, b: &Area) -> GeometryResult<Area> {
        (**self).intersect(a, b)
    }

    fn reorder(&self, area: &Area) -> GeometryResult<Area> {
        (**self).reorder(area)
    }

    fn holes_linked(&self) -> bool {
        (**self).holes_linked()
    }

    fn units(&self) -> f64 {
        (**self).units()
    }

    fn make_pocket_toolpath(
        &self,
        area: &Area,
        request: &PocketRequest,
    ) -> Option<GeometryResult<Vec<Curve>>> {
        (**self).make_pocket_toolpath(area, request)
    }
}
