//! Zig-zag raster clearing.
//!
//! The region is rotated so raster lines run along x, sliced into bands one
//! stepover high, and one raster edge is pulled out of each slice: the run
//! along the band's lower edge plus the climb to its upper edge. Edges are
//! then chained wherever one ends where the next begins.

use crate::context::PlanningContext;
use crate::error::{PocketError, PocketResult};
use pocketkit_core::{Area, Curve, GeometryEngine, Point, Vertex};
use tracing::debug;

/// Direction a band's outline is walked in, whatever winding the engine
/// returned the slice with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    Clockwise,
    CounterClockwise,
}

impl ScanDirection {
    pub fn flipped(self) -> ScanDirection {
        match self {
            ScanDirection::Clockwise => ScanDirection::CounterClockwise,
            ScanDirection::CounterClockwise => ScanDirection::Clockwise,
        }
    }
}

/// Number of bands needed to cover `height`.
pub fn band_count(height: f64, stepover: f64) -> usize {
    (height / stepover + 1.0).floor().max(0.0) as usize
}

/// Raster scan of `region` at the context's scan angle.
pub fn scan<E: GeometryEngine + ?Sized>(
    engine: &E,
    ctx: &PlanningContext,
    region: &Area,
    stepover: f64,
    unidirectional: bool,
) -> PocketResult<Vec<Curve>> {
    if region.is_empty() {
        return Ok(Vec::new());
    }
    if stepover.is_nan() || stepover <= 0.0 {
        return Err(PocketError::InvalidParameters(format!(
            "stepover must be positive, got {stepover}"
        )));
    }

    let rotated = region.map_points(|p| ctx.to_scan_frame(p));
    let bounds = rotated.bounding_box();
    let x0 = bounds.min_x - 1.0;
    let x1 = bounds.max_x + 1.0;
    let steps = band_count(bounds.height(), stepover);
    let tolerance = ctx.tolerance();

    let mut zigs = Vec::new();
    let mut direction = ScanDirection::Clockwise;
    let mut y = bounds.min_y + ctx.band_start_offset();
    for band in 0..steps {
        let y0 = y;
        y += stepover;
        let probe = Area::from(Curve::rectangle(Point::new(x0, y0), Point::new(x1, y)));
        let slice = engine.intersect(&probe, &rotated)?;
        let before = zigs.len();
        for curve in slice.curves() {
            if let Some(zig) = make_zig(curve, y0, y, direction, unidirectional, tolerance) {
                zigs.push(zig.map_points(|p| ctx.from_scan_frame(p)));
            }
        }
        debug!(band, y0, slices = slice.num_curves(), zigs = zigs.len() - before, "Raster band");
        if !unidirectional {
            direction = direction.flipped();
        }
    }

    Ok(chain_zigs(zigs, tolerance))
}

/// Highest vertex of `curve`; among vertices level within `tolerance`, the
/// leftmost for clockwise walks and the rightmost for counter-clockwise ones.
fn seed_point(curve: &Curve, direction: ScanDirection, tolerance: f64) -> Option<Point> {
    let mut seed: Option<Point> = None;
    for v in curve.vertices() {
        seed = match seed {
            None => Some(v.p),
            Some(s) if v.p.y > s.y => Some(v.p),
            Some(s) if (v.p.y - s.y).abs() < tolerance => match direction {
                ScanDirection::Clockwise if v.p.x < s.x => Some(v.p),
                ScanDirection::CounterClockwise if v.p.x > s.x => Some(v.p),
                _ => Some(s),
            },
            keep => keep,
        };
    }
    seed
}

/// Extracts one raster edge from a band slice.
///
/// Starting after the seed vertex, the walk waits for a line segment lying
/// on the lower edge `y0`, then collects vertices until one reaches the
/// upper edge `y1`, or until it gets back to where collecting began.
pub fn make_zig(
    curve: &Curve,
    y0: f64,
    y1: f64,
    direction: ScanDirection,
    unidirectional: bool,
    tolerance: f64,
) -> Option<Curve> {
    let walk_clockwise = direction == ScanDirection::Clockwise;
    let walk = if curve.is_clockwise() == walk_clockwise {
        curve.clone()
    } else {
        curve.reversed()
    };
    let seed = seed_point(&walk, direction, tolerance)?;
    let on_lower = |p: Point| (p.y - y0).abs() < tolerance;
    let on_upper = |p: Point| (p.y - y1).abs() < tolerance;

    let mut zig = Curve::new();
    let mut seed_found = false;
    let mut started = false;
    for (prev, v) in walk.wrapped_segments() {
        if started {
            zig.push(*v);
            if on_upper(v.p) || zig.start_point() == Some(v.p) {
                break;
            }
        } else if seed_found {
            if on_lower(v.p) && on_lower(prev.p) && v.kind.is_line() {
                zig.push(Vertex::line(prev.p));
                zig.push(*v);
                started = true;
            }
        } else if v.p == seed {
            seed_found = true;
        }
    }
    if !started {
        return None;
    }

    if unidirectional && zig.end_point().is_some_and(on_upper) {
        // drop the climb back up
        while let Some(last) = zig.last_vertex() {
            if on_lower(last.p) {
                break;
            }
            zig.pop();
        }
    }
    (zig.len() >= 2).then_some(zig)
}

/// Appends each zig to the first chain whose last zig ends where it starts,
/// then concatenates the chains in the order they were opened.
pub fn chain_zigs(zigs: Vec<Curve>, tolerance: f64) -> Vec<Curve> {
    let mut chains: Vec<Vec<Curve>> = Vec::new();
    for zig in zigs {
        let Some(start) = zig.start_point() else {
            continue;
        };
        let open = chains.iter_mut().find(|chain| {
            chain
                .last()
                .and_then(Curve::end_point)
                .is_some_and(|end| end.near(&start, tolerance))
        });
        match open {
            Some(chain) => chain.push(zig),
            None => chains.push(vec![zig]),
        }
    }
    debug!(chains = chains.len(), "Chained raster edges");
    chains.into_iter().flatten().collect()
}
