//! [`GeometryEngine`] backed by `cavalier_contours`.
//!
//! Curves are converted to closed polylines with bulge encoded arcs. Inside
//! the adapter every polyline is kept counter-clockwise and an area is held
//! as pieces: one boundary with the holes it encloses. Output areas list
//! each boundary clockwise, immediately followed by its counter-clockwise
//! holes. Holes are never stitched into their boundary, so
//! [`GeometryEngine::holes_linked`] is false.

use super::GeometryEngine;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{arc_sweep, Area, Curve, Point, SegmentKind, Vertex};
use cavalier_contours::core::math::Vector2;
use cavalier_contours::polyline::{BooleanOp, PlineSource, PlineSourceMut, PlineVertex, Polyline};
use std::f64::consts::PI;
use tracing::debug;

/// Polylines with a smaller absolute area are treated as boolean noise.
const MIN_AREA: f64 = 1e-9;

const BULGE_EPSILON: f64 = 1e-12;

/// Boundary polyline with the holes it encloses, all counter-clockwise.
#[derive(Debug, Clone)]
struct Piece {
    boundary: Polyline<f64>,
    holes: Vec<Polyline<f64>>,
}

impl Piece {
    fn solid(boundary: Polyline<f64>) -> Self {
        Self {
            boundary,
            holes: Vec::new(),
        }
    }
}

/// Polygon engine over `cavalier_contours`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CavalierEngine {
    units: f64,
}

impl CavalierEngine {
    /// Creates an engine for millimetre geometry.
    pub fn new() -> Self {
        Self { units: 1.0 }
    }

    /// Creates an engine with the given unit scale (25.4 for inches).
    pub fn with_units(units: f64) -> Self {
        Self { units }
    }

    fn to_pieces(&self, area: &Area) -> GeometryResult<Vec<Piece>> {
        let mut boundaries: Vec<(f64, Polyline<f64>)> = Vec::new();
        let mut holes: Vec<Polyline<f64>> = Vec::new();
        for curve in area.curves() {
            if curve.len() < 3 {
                debug!(vertices = curve.len(), "Skipping degenerate curve");
                continue;
            }
            if !curve.is_closed() {
                return Err(GeometryError::OpenCurve {
                    vertices: curve.len(),
                });
            }
            let signed = curve.signed_area();
            if signed.abs() < MIN_AREA {
                debug!("Skipping zero area curve");
                continue;
            }
            let pline = curve_to_pline(&ccw_curve(curve))?;
            if signed < 0.0 {
                boundaries.push((signed.abs(), pline));
            } else {
                holes.push(pline);
            }
        }

        let mut pieces: Vec<(f64, Piece)> = boundaries
            .into_iter()
            .map(|(size, b)| (size, Piece::solid(b)))
            .collect();
        for hole in holes {
            let owner = pieces
                .iter_mut()
                .filter(|(_, piece)| encloses(&piece.boundary, &hole))
                .min_by(|a, b| a.0.total_cmp(&b.0));
            match owner {
                Some((_, piece)) => piece.holes.push(hole),
                None => debug!("Dropping hole outside every boundary"),
            }
        }
        Ok(pieces.into_iter().map(|(_, p)| p).collect())
    }

    fn from_pieces(&self, pieces: Vec<Piece>) -> Area {
        let mut area = Area::new();
        for piece in pieces {
            area.push(pline_to_curve(&piece.boundary).reversed());
            for hole in &piece.holes {
                area.push(pline_to_curve(hole));
            }
        }
        area
    }
}

impl Default for CavalierEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryEngine for CavalierEngine {
    fn offset(&self, area: &Area, distance: f64) -> GeometryResult<Area> {
        if !distance.is_finite() {
            return Err(GeometryError::degenerate(format!(
                "offset distance {distance}"
            )));
        }
        let pieces = self.to_pieces(area)?;
        if distance == 0.0 {
            return Ok(self.from_pieces(pieces));
        }

        let mut boundaries = Vec::new();
        let mut holes = Vec::new();
        for piece in &pieces {
            boundaries.extend(significant(piece.boundary.parallel_offset(-distance)));
            for hole in &piece.holes {
                holes.extend(significant(hole.parallel_offset(distance)));
            }
        }
        let result = build(boundaries, holes);
        debug!(
            distance,
            input = area.num_curves(),
            pieces = result.len(),
            "Offset area"
        );
        Ok(self.from_pieces(result))
    }

    fn subtract(&self, a: &Area, b: &Area) -> GeometryResult<Area> {
        let mut result = self.to_pieces(a)?;
        for cutter in self.to_pieces(b)? {
            let before = result.clone();
            result = cut(result, &cutter.boundary);
            for hole in &cutter.holes {
                result.extend(intersect_pieces(&before, &Piece::solid(hole.clone())));
            }
        }
        Ok(self.from_pieces(result))
    }

    fn intersect(&self, a: &Area, b: &Area) -> GeometryResult<Area> {
        let pa = self.to_pieces(a)?;
        let mut result = Vec::new();
        for piece in &self.to_pieces(b)? {
            result.extend(intersect_pieces(&pa, piece));
        }
        Ok(self.from_pieces(result))
    }

    fn reorder(&self, area: &Area) -> GeometryResult<Area> {
        Ok(self.from_pieces(self.to_pieces(area)?))
    }

    fn holes_linked(&self) -> bool {
        false
    }

    fn units(&self) -> f64 {
        self.units
    }
}

fn intersect_pieces(pieces: &[Piece], other: &Piece) -> Vec<Piece> {
    let mut result = Vec::new();
    for piece in pieces {
        let res = piece.boundary.boolean(&other.boundary, BooleanOp::And);
        let boundaries: Vec<Polyline<f64>> =
            significant(res.pos_plines.into_iter().map(|p| p.pline));
        if boundaries.is_empty() {
            continue;
        }
        let mut holes: Vec<Polyline<f64>> =
            significant(res.neg_plines.into_iter().map(|p| p.pline));
        holes.extend(piece.holes.iter().cloned());
        holes.extend(other.holes.iter().cloned());
        result.extend(build(boundaries, holes));
    }
    result
}

/// Pieces from loose boundaries and holes: boundaries are merged, holes are
/// merged and then cut out one at a time.
fn build(boundaries: Vec<Polyline<f64>>, holes: Vec<Polyline<f64>>) -> Vec<Piece> {
    let (outers, voids) = union_all(boundaries);
    let mut pieces: Vec<Piece> = outers.into_iter().map(Piece::solid).collect();
    let (hole_outers, islands) = union_all(holes.into_iter().chain(voids).collect());
    for hole in &hole_outers {
        pieces = cut(pieces, hole);
    }
    pieces.extend(islands.into_iter().map(Piece::solid));
    pieces
}

/// Merges overlapping polylines. Returns the outer loops and any voids the
/// merge encloses.
fn union_all(plines: Vec<Polyline<f64>>) -> (Vec<Polyline<f64>>, Vec<Polyline<f64>>) {
    let mut outers: Vec<Polyline<f64>> = Vec::new();
    let mut voids: Vec<Polyline<f64>> = Vec::new();
    for pline in plines {
        let mut current = pline;
        let mut i = 0;
        while i < outers.len() {
            let res = outers[i].boolean(&current, BooleanOp::Or);
            let pos: Vec<Polyline<f64>> =
                significant(res.pos_plines.into_iter().map(|p| p.pline));
            if pos.len() == 1 {
                let mut merged = pos;
                current = merged.remove(0);
                voids.extend(significant(res.neg_plines.into_iter().map(|p| p.pline)));
                outers.swap_remove(i);
                i = 0;
            } else {
                i += 1;
            }
        }
        outers.push(current);
    }
    voids.retain(|v| outers.iter().any(|o| encloses(o, v)));
    (outers, voids)
}

/// Removes `hole` from every piece.
fn cut(pieces: Vec<Piece>, hole: &Polyline<f64>) -> Vec<Piece> {
    let mut result = Vec::new();
    for piece in pieces {
        let res = piece.boundary.boolean(hole, BooleanOp::Not);
        let neg: Vec<Polyline<f64>> = significant(res.neg_plines.into_iter().map(|p| p.pline));
        let pos: Vec<Polyline<f64>> = significant(res.pos_plines.into_iter().map(|p| p.pline));
        if pos.is_empty() {
            continue;
        }
        if !neg.is_empty() {
            // hole strictly inside the boundary
            let mut piece = Piece {
                boundary: pos.into_iter().next().unwrap_or(piece.boundary),
                holes: piece.holes,
            };
            piece.holes.extend(neg);
            result.push(piece);
            continue;
        }
        let mut split: Vec<(f64, Piece)> = pos
            .into_iter()
            .map(|b| (pline_area(&b).abs(), Piece::solid(b)))
            .collect();
        for old in piece.holes {
            if let Some((_, owner)) = split
                .iter_mut()
                .filter(|(_, p)| encloses(&p.boundary, &old))
                .min_by(|a, b| a.0.total_cmp(&b.0))
            {
                owner.holes.push(old);
            }
        }
        result.extend(split.into_iter().map(|(_, p)| p));
    }
    result
}

/// True when the first vertex of `inner` lies inside `outer`.
fn encloses(outer: &Polyline<f64>, inner: &Polyline<f64>) -> bool {
    let Some(v) = inner.vertex_data.first() else {
        return false;
    };
    if outer.winding_number(Vector2::new(v.x, v.y)) != 0 {
        return true;
    }
    // first vertex on the outer loop: try the middle of the first segment
    match inner.vertex_data.get(1) {
        Some(w) => {
            let mid = Vector2::new((v.x + w.x) / 2.0, (v.y + w.y) / 2.0);
            outer.winding_number(mid) != 0
        }
        None => false,
    }
}

/// Closed counter-clockwise polylines with a usable area.
fn significant(plines: impl IntoIterator<Item = Polyline<f64>>) -> Vec<Polyline<f64>> {
    plines
        .into_iter()
        .filter(|p| p.vertex_data.len() >= 2)
        .filter_map(|p| {
            let a = pline_area(&p);
            if a.abs() < MIN_AREA {
                None
            } else if a < 0.0 {
                Some(invert(&p))
            } else {
                Some(p)
            }
        })
        .collect()
}

fn ccw_curve(curve: &Curve) -> Curve {
    if curve.is_clockwise() {
        curve.reversed()
    } else {
        curve.clone()
    }
}

/// Signed area of a closed polyline, positive when counter-clockwise.
fn pline_area(pline: &Polyline<f64>) -> f64 {
    let n = pline.vertex_data.len();
    let mut area = 0.0;
    for i in 0..n {
        let v = pline.vertex_data[i];
        let w = pline.vertex_data[(i + 1) % n];
        area += (v.x * w.y - w.x * v.y) / 2.0;
        if v.bulge.abs() > BULGE_EPSILON {
            let sweep = 4.0 * v.bulge.atan();
            let chord = (w.x - v.x).hypot(w.y - v.y);
            let r = chord / (2.0 * (sweep / 2.0).sin().abs());
            area += r * r / 2.0 * (sweep - sweep.sin());
        }
    }
    area
}

/// Same loop travelled the other way.
fn invert(pline: &Polyline<f64>) -> Polyline<f64> {
    let n = pline.vertex_data.len();
    let mut out = Polyline::new();
    for k in 0..n {
        let v = pline.vertex_data[n - 1 - k];
        let prev = pline.vertex_data[(2 * n - 2 - k) % n];
        out.add_vertex(PlineVertex::new(v.x, v.y, -prev.bulge));
    }
    out.set_is_closed(true);
    out
}

/// Converts a closed curve to a closed polyline; arcs longer than a half
/// turn are split.
fn curve_to_pline(curve: &Curve) -> GeometryResult<Polyline<f64>> {
    let mut pline = Polyline::new();
    for (from, to) in curve.segments() {
        if !from.p.is_finite() || !to.p.is_finite() {
            return Err(GeometryError::degenerate("non-finite vertex"));
        }
        match to.kind {
            SegmentKind::Line => {
                if from.p.near(&to.p, BULGE_EPSILON) {
                    continue;
                }
                pline.add_vertex(PlineVertex::new(from.p.x, from.p.y, 0.0));
            }
            SegmentKind::ArcCw { center } | SegmentKind::ArcCcw { center } => {
                let clockwise = matches!(to.kind, SegmentKind::ArcCw { .. });
                let radius = from.p.distance_to(&center);
                if radius <= BULGE_EPSILON {
                    return Err(GeometryError::degenerate("zero radius arc"));
                }
                let sweep = arc_sweep(from.p, to.p, center, clockwise);
                if sweep.abs() > PI + 1e-9 {
                    let half = sweep / 2.0;
                    let mid = center + Point::polar((from.p - center).angle() + half, radius);
                    let bulge = (half / 4.0).tan();
                    pline.add_vertex(PlineVertex::new(from.p.x, from.p.y, bulge));
                    pline.add_vertex(PlineVertex::new(mid.x, mid.y, bulge));
                } else {
                    pline.add_vertex(PlineVertex::new(from.p.x, from.p.y, (sweep / 4.0).tan()));
                }
            }
        }
    }
    if pline.vertex_data.len() < 2 {
        return Err(GeometryError::degenerate("curve collapses to a point"));
    }
    pline.set_is_closed(true);
    Ok(pline)
}

/// Converts a closed polyline back to a closed curve.
fn pline_to_curve(pline: &Polyline<f64>) -> Curve {
    let n = pline.vertex_data.len();
    let mut curve = Curve::new();
    let Some(first) = pline.vertex_data.first() else {
        return curve;
    };
    curve.push(Vertex::line(Point::new(first.x, first.y)));
    for i in 0..n {
        let v = pline.vertex_data[i];
        let w = pline.vertex_data[(i + 1) % n];
        let end = Point::new(w.x, w.y);
        if v.bulge.abs() <= BULGE_EPSILON {
            curve.push(Vertex::line(end));
        } else {
            let start = Point::new(v.x, v.y);
            let mid = (start + end) * 0.5;
            let k = (1.0 - v.bulge * v.bulge) / (4.0 * v.bulge);
            let center = mid + (end - start).perp() * k;
            if v.bulge > 0.0 {
                curve.push(Vertex::arc_ccw(end, center));
            } else {
                curve.push(Vertex::arc_cw(end, center));
            }
        }
    }
    curve
}
