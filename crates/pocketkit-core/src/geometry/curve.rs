//! Curves made of line and arc segments.
//!
//! A [`Curve`] is an ordered list of [`Vertex`] values. Each vertex stores the
//! end point of the segment that arrives at it together with the kind of that
//! segment, so the first vertex of a curve is always a plain start point.
//! Orientation carries meaning: clockwise curves bound material, counter
//! clockwise curves are holes.

use super::{BoundingBox, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Tolerance used to decide whether a curve closes on itself.
pub const CLOSE_TOLERANCE: f64 = 1e-9;

/// Kind of the segment ending at a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentKind {
    /// Straight line
    Line,
    /// Clockwise arc about `center`
    ArcCw { center: Point },
    /// Counter-clockwise arc about `center`
    ArcCcw { center: Point },
}

impl SegmentKind {
    pub fn is_line(&self) -> bool {
        matches!(self, SegmentKind::Line)
    }

    pub fn center(&self) -> Option<Point> {
        match self {
            SegmentKind::Line => None,
            SegmentKind::ArcCw { center } | SegmentKind::ArcCcw { center } => Some(*center),
        }
    }

    /// Same segment travelled the other way.
    pub fn flipped(&self) -> SegmentKind {
        match *self {
            SegmentKind::Line => SegmentKind::Line,
            SegmentKind::ArcCw { center } => SegmentKind::ArcCcw { center },
            SegmentKind::ArcCcw { center } => SegmentKind::ArcCw { center },
        }
    }

    fn map_center(&self, f: &impl Fn(Point) -> Point) -> SegmentKind {
        match *self {
            SegmentKind::Line => SegmentKind::Line,
            SegmentKind::ArcCw { center } => SegmentKind::ArcCw { center: f(center) },
            SegmentKind::ArcCcw { center } => SegmentKind::ArcCcw { center: f(center) },
        }
    }
}

/// End point of a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub p: Point,
    #[serde(flatten)]
    pub kind: SegmentKind,
}

impl Vertex {
    pub fn line(p: Point) -> Self {
        Self {
            p,
            kind: SegmentKind::Line,
        }
    }

    pub fn arc_cw(p: Point, center: Point) -> Self {
        Self {
            p,
            kind: SegmentKind::ArcCw { center },
        }
    }

    pub fn arc_ccw(p: Point, center: Point) -> Self {
        Self {
            p,
            kind: SegmentKind::ArcCcw { center },
        }
    }
}

/// Signed sweep in radians of the arc from `start` to `end` about `center`.
///
/// Counter-clockwise sweeps are positive. Coincident end points describe a
/// full circle.
pub fn arc_sweep(start: Point, end: Point, center: Point, clockwise: bool) -> f64 {
    let a0 = (start - center).angle();
    let a1 = (end - center).angle();
    if clockwise {
        let mut sweep = a0 - a1;
        while sweep <= 0.0 {
            sweep += TAU;
        }
        while sweep > TAU {
            sweep -= TAU;
        }
        -sweep
    } else {
        let mut sweep = a1 - a0;
        while sweep <= 0.0 {
            sweep += TAU;
        }
        while sweep > TAU {
            sweep -= TAU;
        }
        sweep
    }
}

fn segment_sweep(from: &Vertex, to: &Vertex) -> Option<(Point, f64)> {
    match to.kind {
        SegmentKind::Line => None,
        SegmentKind::ArcCw { center } => Some((center, arc_sweep(from.p, to.p, center, true))),
        SegmentKind::ArcCcw { center } => Some((center, arc_sweep(from.p, to.p, center, false))),
    }
}

fn angle_within_sweep(start_angle: f64, sweep: f64, angle: f64) -> bool {
    let mut delta = if sweep >= 0.0 {
        angle - start_angle
    } else {
        start_angle - angle
    };
    while delta < 0.0 {
        delta += TAU;
    }
    while delta >= TAU {
        delta -= TAU;
    }
    delta <= sweep.abs()
}

/// Nearest point to `p` on the segment `from -> to`.
fn nearest_on_segment(from: &Vertex, to: &Vertex, p: Point) -> Point {
    match segment_sweep(from, to) {
        None => {
            let d = to.p - from.p;
            let len2 = d.dot(&d);
            if len2 <= f64::EPSILON {
                return from.p;
            }
            let t = ((p - from.p).dot(&d) / len2).clamp(0.0, 1.0);
            from.p + d * t
        }
        Some((center, sweep)) => {
            let radius = from.p.distance_to(&center);
            let rel = p - center;
            if rel.length() > f64::EPSILON {
                let start_angle = (from.p - center).angle();
                if angle_within_sweep(start_angle, sweep, rel.angle()) {
                    return center + Point::polar(rel.angle(), radius);
                }
            }
            if p.distance_to(&from.p) <= p.distance_to(&to.p) {
                from.p
            } else {
                to.p
            }
        }
    }
}

/// Ordered sequence of vertices forming an open or closed path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Curve {
    vertices: Vec<Vertex>,
}

impl Curve {
    /// Creates an empty curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a polyline from points, closing it back to the first point
    /// when `closed` is set.
    pub fn from_points(points: &[Point], closed: bool) -> Self {
        let mut curve = Curve::new();
        for p in points {
            curve.push(Vertex::line(*p));
        }
        if closed {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if !first.near(last, CLOSE_TOLERANCE) || points.len() == 1 {
                    curve.push(Vertex::line(*first));
                }
            }
        }
        curve
    }

    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Appends a vertex. The first vertex is always stored as a line start.
    pub fn push(&mut self, vertex: Vertex) {
        if self.vertices.is_empty() {
            self.vertices.push(Vertex::line(vertex.p));
        } else {
            self.vertices.push(vertex);
        }
    }

    pub fn pop(&mut self) -> Option<Vertex> {
        self.vertices.pop()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn first_vertex(&self) -> Option<&Vertex> {
        self.vertices.first()
    }

    pub fn last_vertex(&self) -> Option<&Vertex> {
        self.vertices.last()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.vertices.first().map(|v| v.p)
    }

    pub fn end_point(&self) -> Option<Point> {
        self.vertices.last().map(|v| v.p)
    }

    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) if self.vertices.len() > 1 => {
                first.p.near(&last.p, CLOSE_TOLERANCE)
            }
            _ => false,
        }
    }

    /// Consecutive `(from, to)` vertex pairs; the pair's segment kind is
    /// `to.kind`.
    pub fn segments(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> + Clone + '_ {
        self.vertices.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// The segment sequence walked twice in a row.
    ///
    /// Searches that begin at an arbitrary vertex of a closed curve and must
    /// run past its end use this instead of restarting by hand. The view is
    /// finite and can be cloned to restart it.
    pub fn wrapped_segments(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> + Clone + '_ {
        self.segments().chain(self.segments())
    }

    /// Signed area, positive for counter-clockwise curves. Arcs contribute
    /// their circular segment.
    pub fn signed_area(&self) -> f64 {
        let mut area = 0.0;
        for (from, to) in self.segments() {
            area += from.p.cross(&to.p) / 2.0;
            if let Some((center, sweep)) = segment_sweep(from, to) {
                let r = from.p.distance_to(&center);
                area += r * r / 2.0 * (sweep - sweep.sin());
            }
        }
        if let (Some(first), Some(last)) = (self.vertices.first(), self.vertices.last()) {
            if !self.is_closed() {
                area += last.p.cross(&first.p) / 2.0;
            }
        }
        area
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Reverses the direction of travel in place.
    pub fn reverse(&mut self) {
        let n = self.vertices.len();
        if n < 2 {
            return;
        }
        let mut reversed = Vec::with_capacity(n);
        reversed.push(Vertex::line(self.vertices[n - 1].p));
        for k in 1..n {
            reversed.push(Vertex {
                p: self.vertices[n - 1 - k].p,
                kind: self.vertices[n - k].kind.flipped(),
            });
        }
        self.vertices = reversed;
    }

    pub fn reversed(&self) -> Curve {
        let mut c = self.clone();
        c.reverse();
        c
    }

    /// Applies `f` to every position and arc centre.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Curve {
        Curve {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex {
                    p: f(v.p),
                    kind: v.kind.map_center(&f),
                })
                .collect(),
        }
    }

    /// Tight bounds including arc extremes.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        if let Some(first) = self.vertices.first() {
            bounds.include(first.p);
        }
        for (from, to) in self.segments() {
            bounds.include(to.p);
            if let Some((center, sweep)) = segment_sweep(from, to) {
                let radius = from.p.distance_to(&center);
                let start_angle = (from.p - center).angle();
                for quadrant in [0.0, FRAC_PI_2, PI, -FRAC_PI_2] {
                    if angle_within_sweep(start_angle, sweep, quadrant) {
                        bounds.include(center + Point::polar(quadrant, radius));
                    }
                }
            }
        }
        bounds
    }

    /// Total path length.
    pub fn length(&self) -> f64 {
        self.segments()
            .map(|(from, to)| match segment_sweep(from, to) {
                None => from.p.distance_to(&to.p),
                Some((center, sweep)) => from.p.distance_to(&center) * sweep.abs(),
            })
            .sum()
    }

    fn nearest_segment(&self, p: Point) -> Option<(usize, Point)> {
        let mut best: Option<(usize, Point, f64)> = None;
        for (i, (from, to)) in self.segments().enumerate() {
            let q = nearest_on_segment(from, to, p);
            let d = q.distance_to(&p);
            if best.map_or(true, |(_, _, bd)| d < bd) {
                best = Some((i + 1, q, d));
            }
        }
        best.map(|(i, q, _)| (i, q))
    }

    /// Point on the curve closest to `p`. A single-vertex curve answers with
    /// that vertex; an empty curve with `p` itself.
    pub fn nearest_point(&self, p: Point) -> Point {
        match self.nearest_segment(p) {
            Some((_, q)) => q,
            None => self.start_point().unwrap_or(p),
        }
    }

    /// Moves the start of the curve to the point on it nearest `p`.
    ///
    /// A closed curve is rotated so it begins and ends there, splitting the
    /// segment that holds the point. An open curve is trimmed so it starts
    /// there.
    pub fn change_start(&mut self, p: Point) {
        let Some((i, q)) = self.nearest_segment(p) else {
            return;
        };
        let n = self.vertices.len();
        let closed = self.is_closed();
        let tol = CLOSE_TOLERANCE.max(1e-7);

        // snap onto an existing vertex where possible
        let (seg, q, on_vertex) = if q.near(&self.vertices[i].p, tol) {
            (i, self.vertices[i].p, true)
        } else if q.near(&self.vertices[i - 1].p, tol) {
            (i - 1, self.vertices[i - 1].p, true)
        } else {
            (i, q, false)
        };

        let mut out: Vec<Vertex> = Vec::with_capacity(n + 2);
        out.push(Vertex::line(q));
        if on_vertex {
            if !closed {
                out.extend_from_slice(&self.vertices[seg + 1..]);
            } else if seg == 0 || seg == n - 1 {
                return;
            } else {
                out.extend_from_slice(&self.vertices[seg + 1..]);
                out.extend_from_slice(&self.vertices[1..=seg]);
            }
        } else {
            let split = Vertex {
                p: q,
                kind: self.vertices[seg].kind,
            };
            out.extend_from_slice(&self.vertices[seg..]);
            if closed {
                out.extend_from_slice(&self.vertices[1..seg]);
                out.push(split);
            }
        }
        self.vertices = out;
    }
}
