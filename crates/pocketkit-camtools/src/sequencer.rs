//! Cut sequencing across depth levels.
//!
//! Curves are cut in list order at every depth level. Between curves the tool
//! either feeds straight across or retracts to the clearance height and
//! enters again; with keep-tool-down set it stays in the material whenever
//! the move between curves only crosses material already removed.

use crate::context::PlanningContext;
use crate::depth::DepthLevel;
use crate::entry::{EntryPlanner, EntryStyle};
use crate::error::PocketResult;
use crate::motion::{emit_vertex, MotionSink};
use crate::profile::ProfileCutter;
use pocketkit_core::{Curve, GeometryEngine, Point};
use tracing::{debug, warn};

/// True if the tool can feed from `p0` to `p1` without touching material.
///
/// Identical points are always feedable. Otherwise the stadium swept by the
/// tool must lie inside the cleared area; without one it never does.
pub fn feed_possible<E: GeometryEngine + ?Sized>(
    ctx: &PlanningContext,
    engine: &E,
    p0: Point,
    p1: Point,
) -> PocketResult<bool> {
    if p0 == p1 {
        return Ok(true);
    }
    ctx.is_cleared(engine, Curve::obround(p0, p1, ctx.tool_radius()))
}

pub struct CutSequencer<'a, E: ?Sized> {
    engine: &'a E,
    ctx: &'a PlanningContext,
    entry: EntryPlanner<'a, E>,
    entry_style: EntryStyle,
    keep_tool_down: bool,
}

impl<'a, E: GeometryEngine + ?Sized> CutSequencer<'a, E> {
    pub fn new(
        engine: &'a E,
        ctx: &'a PlanningContext,
        entry: EntryPlanner<'a, E>,
        entry_style: EntryStyle,
        keep_tool_down: bool,
    ) -> Self {
        Self {
            engine,
            ctx,
            entry,
            entry_style,
            keep_tool_down,
        }
    }

    /// Whether the tool has to leave the material to get from the end of the
    /// previous curve to `start`.
    fn needs_retract(&self, prev: Option<Point>, start: Point) -> PocketResult<bool> {
        let Some(prev) = prev else {
            return Ok(true);
        };
        if self.keep_tool_down {
            Ok(!feed_possible(self.ctx, self.engine, prev, start)?)
        } else {
            Ok(prev != start)
        }
    }

    /// Moves to the start of `curve` and cuts it. Returns the end point.
    fn cut_curve(
        &self,
        curve: &Curve,
        prev: Option<Point>,
        style: EntryStyle,
        level: &DepthLevel,
        sink: &mut dyn MotionSink,
    ) -> PocketResult<Option<Point>> {
        let Some(start) = curve.start_point() else {
            warn!("Skipping empty curve");
            return Ok(prev);
        };
        if self.needs_retract(prev, start)? {
            sink.rapid_z(level.clearance_height);
            self.entry.enter(style, start, level, sink)?;
        } else {
            sink.feed_xy(start);
        }
        for vertex in &curve.vertices()[1..] {
            emit_vertex(sink, vertex);
        }
        Ok(curve.end_point())
    }

    /// Cuts every curve at every level, shallow to deep.
    pub fn cut_levels(
        &self,
        curves: &[Curve],
        levels: &[DepthLevel],
        sink: &mut dyn MotionSink,
    ) -> PocketResult<()> {
        for level in levels {
            debug!(depth = level.depth, curves = curves.len(), "Cutting level");
            let mut prev = None;
            for curve in curves {
                prev = self.cut_curve(curve, prev, self.entry_style, level, sink)?;
            }
            sink.rapid_z(level.clearance_height);
        }
        Ok(())
    }

    /// Like [`cut_levels`](Self::cut_levels), but the first curve is
    /// restarted at the point nearest `start` and cut by `profile` instead of
    /// taking an entry move. Later retracts plunge.
    pub fn cut_levels_from(
        &self,
        curves: &[Curve],
        levels: &[DepthLevel],
        start: Point,
        profile: &dyn ProfileCutter,
        sink: &mut dyn MotionSink,
    ) -> PocketResult<()> {
        let Some((first, rest)) = curves.split_first() else {
            return Ok(());
        };
        let mut first = first.clone();
        first.change_start(start);

        for level in levels {
            debug!(depth = level.depth, curves = curves.len(), "Cutting level from start point");
            profile.cut_profile(&first, std::slice::from_ref(level), sink)?;
            let mut prev = first.end_point();
            for curve in rest {
                prev = self.cut_curve(curve, prev, EntryStyle::Plunge, level, sink)?;
            }
            sink.rapid_z(level.clearance_height);
        }
        Ok(())
    }
}
