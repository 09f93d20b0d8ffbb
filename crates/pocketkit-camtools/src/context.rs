//! Per-computation planning state.

use crate::error::PocketResult;
use pocketkit_core::{Area, Curve, GeometryEngine, Point, Rotation};

/// Coincidence tolerance in millimetres, divided by the unit scale.
const BASE_TOLERANCE: f64 = 0.002;

/// Gap between the bottom of the region and the first raster band, in
/// millimetres, divided by the unit scale.
const BASE_BAND_START: f64 = 0.1;

/// State shared by the planners during one pocket computation.
///
/// Built once before planning starts and read-only afterwards. Nested or
/// concurrent computations each build their own.
#[derive(Debug, Clone)]
pub struct PlanningContext {
    tool_radius: f64,
    cleared_area: Option<Area>,
    unit_scale: f64,
    scan_angle: f64,
    to_scan: Rotation,
    from_scan: Rotation,
}

impl PlanningContext {
    /// Creates a context for a tool of `tool_radius` in geometry of the given
    /// unit scale (1.0 for millimetres, 25.4 for inches).
    pub fn new(tool_radius: f64, unit_scale: f64) -> Self {
        Self {
            tool_radius,
            cleared_area: None,
            unit_scale,
            scan_angle: 0.0,
            to_scan: Rotation::IDENTITY,
            from_scan: Rotation::IDENTITY,
        }
    }

    /// Sets the region the tool may move through without cutting new material.
    pub fn with_cleared_area(mut self, area: Area) -> Self {
        self.cleared_area = Some(area);
        self
    }

    /// Sets the raster angle in degrees.
    pub fn with_scan_angle(mut self, degrees: f64) -> Self {
        self.scan_angle = degrees;
        self.from_scan = Rotation::from_degrees(degrees);
        self.to_scan = self.from_scan.inverse();
        self
    }

    pub fn tool_radius(&self) -> f64 {
        self.tool_radius
    }

    pub fn cleared_area(&self) -> Option<&Area> {
        self.cleared_area.as_ref()
    }

    pub fn unit_scale(&self) -> f64 {
        self.unit_scale
    }

    pub fn scan_angle(&self) -> f64 {
        self.scan_angle
    }

    /// Tolerance for every coincidence test of the raster planner.
    pub fn tolerance(&self) -> f64 {
        BASE_TOLERANCE / self.unit_scale
    }

    pub fn band_start_offset(&self) -> f64 {
        BASE_BAND_START / self.unit_scale
    }

    /// Rotates a point into the frame where raster lines are horizontal.
    pub fn to_scan_frame(&self, p: Point) -> Point {
        self.to_scan.apply(p)
    }

    /// Rotates a point from the raster frame back to the output frame.
    pub fn from_scan_frame(&self, p: Point) -> Point {
        self.from_scan.apply(p)
    }

    /// True when `footprint` lies entirely inside the cleared area.
    ///
    /// Without a cleared area nothing is known to be clear.
    pub fn is_cleared<E: GeometryEngine + ?Sized>(
        &self,
        engine: &E,
        footprint: Curve,
    ) -> PocketResult<bool> {
        let Some(cleared) = &self.cleared_area else {
            return Ok(false);
        };
        let rest = engine.subtract(&Area::from(footprint), cleared)?;
        Ok(rest.is_empty())
    }
}
