//! Tool entry moves: plunge, ramp and helix.
//!
//! Ramp and helical entries descend along a path that must lie inside
//! material already cleared, so candidate placements are tried in a fixed
//! heading order and checked against the cleared area of the
//! [`PlanningContext`].

use crate::context::PlanningContext;
use crate::depth::DepthLevel;
use crate::error::{PocketError, PocketResult};
use crate::motion::MotionSink;
use pocketkit_core::{Curve, GeometryEngine, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

/// Headings tried for ramp and helix placement, in degrees.
pub const RAMP_HEADINGS: [f64; 8] = [0.0, 90.0, 180.0, 270.0, 45.0, 135.0, 225.0, 315.0];

/// Allowed ramp angles in degrees, inclusive.
pub const RAMP_ANGLE_RANGE: (f64, f64) = (0.1, 89.9);

/// Allowed helix diameter factors, inclusive.
pub const HELIX_FACTOR_RANGE: (f64, f64) = (0.1, 1.0);

/// How the tool gets down to cutting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStyle {
    /// Straight down
    #[default]
    Plunge,
    /// Angled line
    Ramp,
    /// Spiral
    Helical,
}

impl fmt::Display for EntryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plunge => write!(f, "plunge"),
            Self::Ramp => write!(f, "ramp"),
            Self::Helical => write!(f, "helical ramp"),
        }
    }
}

/// Sense in which the top of the helix is rotated away from the entry point.
/// The tool spirals back down the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelixDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Entry tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Descent angle in degrees
    pub ramp_angle: f64,
    /// Height above the current start depth where the descent begins
    pub ramp_start_above_height: f64,
    /// Helix radius as a fraction of the tool radius
    pub helix_diameter_factor: f64,
    pub helix_direction: HelixDirection,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            ramp_angle: 6.0,
            ramp_start_above_height: 0.2,
            helix_diameter_factor: 0.7,
            helix_direction: HelixDirection::Clockwise,
        }
    }
}

fn check_range(name: &str, value: f64, (min, max): (f64, f64)) -> PocketResult<()> {
    if value.is_nan() || value < min || value > max {
        return Err(PocketError::out_of_range(name, value, min, max));
    }
    Ok(())
}

impl EntryConfig {
    pub fn check_ramp_angle(&self) -> PocketResult<()> {
        check_range("ramp_angle", self.ramp_angle, RAMP_ANGLE_RANGE)
    }

    pub fn check_helix_factor(&self) -> PocketResult<()> {
        check_range(
            "helix_diameter_factor",
            self.helix_diameter_factor,
            HELIX_FACTOR_RANGE,
        )
    }

    /// Validates every tunable.
    pub fn validate(&self) -> PocketResult<()> {
        self.check_ramp_angle()?;
        self.check_helix_factor()?;
        if !self.ramp_start_above_height.is_finite() || self.ramp_start_above_height < 0.0 {
            return Err(PocketError::InvalidConfiguration {
                name: "ramp_start_above_height".to_string(),
                value: self.ramp_start_above_height,
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Vertical drop of a ramp or helix for `level`.
    pub fn ramp_depth(&self, level: &DepthLevel) -> f64 {
        self.ramp_start_above_height + level.start_depth - level.depth
    }

    /// Horizontal length needed to drop `ramp_depth` at the ramp angle.
    pub fn run_length(&self, ramp_depth: f64) -> f64 {
        ramp_depth / self.ramp_angle.to_radians().tan()
    }
}

/// Helix waypoints from the bottom up.
///
/// Positions alternate between `p` and its reflection through `center`
/// every half turn; depth starts at `final_depth` and rises by
/// `π · radius · tan(ramp_angle)` per half turn while the accumulated
/// angle stays below `total_sweep`.
pub fn helix_waypoints(
    p: Point,
    center: Point,
    radius: f64,
    final_depth: f64,
    ramp_angle: f64,
    total_sweep: f64,
) -> Vec<(Point, f64)> {
    let far = p + (center - p) * 2.0;
    let rise = PI * radius * ramp_angle.to_radians().tan();
    let mut waypoints = Vec::new();
    let mut angle = 0.0;
    let mut depth = final_depth;
    let mut at_far = false;
    while total_sweep > angle {
        waypoints.push((if at_far { far } else { p }, depth));
        at_far = !at_far;
        depth += rise;
        angle += PI;
    }
    waypoints
}

/// Plans entry moves for one pocket computation.
pub struct EntryPlanner<'a, E: ?Sized> {
    config: &'a EntryConfig,
    ctx: &'a PlanningContext,
    engine: &'a E,
}

impl<'a, E: GeometryEngine + ?Sized> EntryPlanner<'a, E> {
    pub fn new(config: &'a EntryConfig, ctx: &'a PlanningContext, engine: &'a E) -> Self {
        Self {
            config,
            ctx,
            engine,
        }
    }

    pub fn config(&self) -> &EntryConfig {
        self.config
    }

    /// Brings the tool down to `level.depth` at `p`.
    pub fn enter(
        &self,
        style: EntryStyle,
        p: Point,
        level: &DepthLevel,
        sink: &mut dyn MotionSink,
    ) -> PocketResult<()> {
        match style {
            EntryStyle::Plunge => {
                self.plunge(p, level, sink);
                Ok(())
            }
            EntryStyle::Ramp => self.ramp(p, level, sink),
            EntryStyle::Helical => self.helical(p, level, sink),
        }
    }

    /// Rapid over `p`, rapid down to the safety gap, feed straight down.
    pub fn plunge(&self, p: Point, level: &DepthLevel, sink: &mut dyn MotionSink) {
        sink.rapid_xy(p);
        sink.rapid_z(level.start_depth + level.rapid_safety_space);
        sink.feed_z(level.depth);
    }

    /// First heading whose ramp of `run_length` ending at `p` stays in the
    /// cleared area; returns the ramp start.
    pub fn ramp_start(&self, p: Point, run_length: f64) -> PocketResult<Option<Point>> {
        for heading in RAMP_HEADINGS {
            let start = p + Point::polar(heading.to_radians(), run_length);
            let footprint = Curve::obround(p, start, self.ctx.tool_radius());
            if self.ctx.is_cleared(self.engine, footprint)? {
                debug!(heading, "Ramp fits");
                return Ok(Some(start));
            }
        }
        Ok(None)
    }

    /// Descends along a straight ramp ending at `p`.
    pub fn ramp(&self, p: Point, level: &DepthLevel, sink: &mut dyn MotionSink) -> PocketResult<()> {
        self.config.check_ramp_angle()?;
        let run_length = self.config.run_length(self.config.ramp_depth(level));
        let start = self
            .ramp_start(p, run_length)?
            .ok_or_else(|| self.placement_error(EntryStyle::Ramp, p))?;

        sink.rapid_xy(start);
        sink.rapid_z(level.start_depth + level.rapid_safety_space);
        sink.feed_z(level.start_depth + self.config.ramp_start_above_height);
        sink.feed_xyz(p, level.depth);
        Ok(())
    }

    /// First heading whose helix circle about a centre `radius` away from `p`
    /// stays in the cleared area; returns the centre.
    pub fn helix_center(&self, p: Point, radius: f64) -> PocketResult<Option<Point>> {
        for heading in RAMP_HEADINGS {
            let center = p + Point::polar(heading.to_radians(), radius);
            let footprint = Curve::circle(center, radius + self.ctx.tool_radius());
            if self.ctx.is_cleared(self.engine, footprint)? {
                debug!(heading, "Helix fits");
                return Ok(Some(center));
            }
        }
        Ok(None)
    }

    /// Spirals down onto `p`.
    pub fn helical(
        &self,
        p: Point,
        level: &DepthLevel,
        sink: &mut dyn MotionSink,
    ) -> PocketResult<()> {
        self.config.check_ramp_angle()?;
        self.config.check_helix_factor()?;
        let radius = self.config.helix_diameter_factor * self.ctx.tool_radius();
        let center = self
            .helix_center(p, radius)?
            .ok_or_else(|| self.placement_error(EntryStyle::Helical, p))?;

        let run_length = self.config.run_length(self.config.ramp_depth(level));
        let total_sweep = run_length / radius;
        let waypoints = helix_waypoints(
            p,
            center,
            radius,
            level.depth,
            self.config.ramp_angle,
            total_sweep,
        );

        let start_angle = (p - center).angle();
        let top_angle = match self.config.helix_direction {
            HelixDirection::Clockwise => start_angle - total_sweep,
            HelixDirection::CounterClockwise => start_angle + total_sweep,
        };
        let top = center + Point::polar(top_angle, radius);

        sink.rapid_xy(top);
        sink.rapid_z(level.start_depth + level.rapid_safety_space);
        sink.feed_z(level.start_depth + self.config.ramp_start_above_height);
        for (pos, depth) in waypoints.iter().rev() {
            match self.config.helix_direction {
                HelixDirection::Clockwise => {
                    sink.arc_ccw(pos.x, pos.y, Some(*depth), center.x, center.y)
                }
                HelixDirection::CounterClockwise => {
                    sink.arc_cw(pos.x, pos.y, Some(*depth), center.x, center.y)
                }
            }
        }
        debug!(turns = total_sweep / (2.0 * PI), waypoints = waypoints.len(), "Helical entry");
        Ok(())
    }

    fn placement_error(&self, style: EntryStyle, p: Point) -> PocketError {
        PocketError::EntryPlacement {
            style: style.to_string(),
            x: p.x,
            y: p.y,
        }
    }
}
