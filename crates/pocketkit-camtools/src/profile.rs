//! Profile passes along a single curve.

use crate::depth::DepthLevel;
use crate::error::PocketResult;
use crate::motion::{emit_vertex, MotionSink};
use pocketkit_core::Curve;

/// Cuts a curve as a profile pass.
pub trait ProfileCutter {
    /// Follows `curve` at each of `levels`, shallow to deep, leaving the tool
    /// down at the curve's end point after the last level.
    fn cut_profile(
        &self,
        curve: &Curve,
        levels: &[DepthLevel],
        sink: &mut dyn MotionSink,
    ) -> PocketResult<()>;
}

/// Follows the curve exactly as given: no lead-in, no compensation.
///
/// A closed curve is stepped down in place between levels; an open one is
/// retracted and re-approached.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectProfile;

impl ProfileCutter for DirectProfile {
    fn cut_profile(
        &self,
        curve: &Curve,
        levels: &[DepthLevel],
        sink: &mut dyn MotionSink,
    ) -> PocketResult<()> {
        let Some(start) = curve.start_point() else {
            return Ok(());
        };
        let mut down = false;
        for level in levels {
            if down && curve.is_closed() {
                sink.feed_z(level.depth);
            } else {
                sink.rapid_z(level.clearance_height);
                sink.rapid_xy(start);
                sink.rapid_z(level.start_depth + level.rapid_safety_space);
                sink.feed_z(level.depth);
            }
            for vertex in &curve.vertices()[1..] {
                emit_vertex(sink, vertex);
            }
            down = true;
        }
        Ok(())
    }
}
