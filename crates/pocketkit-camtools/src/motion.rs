//! Motion output.
//!
//! Planners describe the toolpath through [`MotionSink`]; turning the calls
//! into G-code is left to the caller. [`MoveRecorder`] collects the calls as
//! [`Move`] values.

use pocketkit_core::{Point, SegmentKind, Vertex};
use serde::{Deserialize, Serialize};

/// Receiver of tool motions. Omitted axes keep their current value. Arc
/// centres `(i, j)` are absolute.
pub trait MotionSink {
    fn rapid(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>);
    fn feed(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>);
    fn arc_cw(&mut self, x: f64, y: f64, z: Option<f64>, i: f64, j: f64);
    fn arc_ccw(&mut self, x: f64, y: f64, z: Option<f64>, i: f64, j: f64);

    fn rapid_xy(&mut self, p: Point) {
        self.rapid(Some(p.x), Some(p.y), None);
    }

    fn rapid_z(&mut self, z: f64) {
        self.rapid(None, None, Some(z));
    }

    fn feed_xy(&mut self, p: Point) {
        self.feed(Some(p.x), Some(p.y), None);
    }

    fn feed_z(&mut self, z: f64) {
        self.feed(None, None, Some(z));
    }

    fn feed_xyz(&mut self, p: Point, z: f64) {
        self.feed(Some(p.x), Some(p.y), Some(z));
    }
}

/// Emits the segment ending at `vertex` at the current depth.
pub fn emit_vertex(sink: &mut dyn MotionSink, vertex: &Vertex) {
    let p = vertex.p;
    match vertex.kind {
        SegmentKind::Line => sink.feed_xy(p),
        SegmentKind::ArcCw { center } => sink.arc_cw(p.x, p.y, None, center.x, center.y),
        SegmentKind::ArcCcw { center } => sink.arc_ccw(p.x, p.y, None, center.x, center.y),
    }
}

/// A recorded motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    Rapid {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        z: Option<f64>,
    },
    Feed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        z: Option<f64>,
    },
    ArcCw {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        z: Option<f64>,
        i: f64,
        j: f64,
    },
    ArcCcw {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        z: Option<f64>,
        i: f64,
        j: f64,
    },
}

impl Move {
    pub fn is_rapid(&self) -> bool {
        matches!(self, Move::Rapid { .. })
    }

    /// Target z, if the move sets one.
    pub fn z(&self) -> Option<f64> {
        match *self {
            Move::Rapid { z, .. }
            | Move::Feed { z, .. }
            | Move::ArcCw { z, .. }
            | Move::ArcCcw { z, .. } => z,
        }
    }

    /// Target xy, if the move sets both axes.
    pub fn xy(&self) -> Option<Point> {
        match *self {
            Move::Rapid {
                x: Some(x),
                y: Some(y),
                ..
            }
            | Move::Feed {
                x: Some(x),
                y: Some(y),
                ..
            } => Some(Point::new(x, y)),
            Move::ArcCw { x, y, .. } | Move::ArcCcw { x, y, .. } => Some(Point::new(x, y)),
            _ => None,
        }
    }

    fn send(&self, sink: &mut dyn MotionSink) {
        match *self {
            Move::Rapid { x, y, z } => sink.rapid(x, y, z),
            Move::Feed { x, y, z } => sink.feed(x, y, z),
            Move::ArcCw { x, y, z, i, j } => sink.arc_cw(x, y, z, i, j),
            Move::ArcCcw { x, y, z, i, j } => sink.arc_ccw(x, y, z, i, j),
        }
    }
}

/// Sink that stores every motion in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveRecorder {
    moves: Vec<Move>,
}

impl MoveRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Sends the recorded motions to another sink.
    pub fn replay_into(&self, sink: &mut dyn MotionSink) {
        for m in &self.moves {
            m.send(sink);
        }
    }
}

impl MotionSink for MoveRecorder {
    fn rapid(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) {
        self.moves.push(Move::Rapid { x, y, z });
    }

    fn feed(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) {
        self.moves.push(Move::Feed { x, y, z });
    }

    fn arc_cw(&mut self, x: f64, y: f64, z: Option<f64>, i: f64, j: f64) {
        self.moves.push(Move::ArcCw { x, y, z, i, j });
    }

    fn arc_ccw(&mut self, x: f64, y: f64, z: Option<f64>, i: f64, j: f64) {
        self.moves.push(Move::ArcCcw { x, y, z, i, j });
    }
}
