//! Clockwise shape constructors used as probes and tool footprints.

use super::{Curve, Point, Vertex};

impl Curve {
    /// Clockwise axis aligned rectangle.
    pub fn rectangle(min: Point, max: Point) -> Curve {
        Curve::from_points(
            &[
                Point::new(min.x, min.y),
                Point::new(min.x, max.y),
                Point::new(max.x, max.y),
                Point::new(max.x, min.y),
            ],
            true,
        )
    }

    /// Clockwise circle made of two half arcs, starting at the rightmost point.
    pub fn circle(center: Point, radius: f64) -> Curve {
        let right = center + Point::new(radius, 0.0);
        let left = center - Point::new(radius, 0.0);
        let mut c = Curve::new();
        c.push(Vertex::line(right));
        c.push(Vertex::arc_cw(left, center));
        c.push(Vertex::arc_cw(right, center));
        c
    }

    /// Clockwise stadium swept by a tool of `radius` moving from `p0` to `p1`.
    ///
    /// Degenerates to [`Curve::circle`] when the end points coincide.
    pub fn obround(p0: Point, p1: Point, radius: f64) -> Curve {
        let dir = (p1 - p0).normalized();
        if dir == Point::zero() {
            return Curve::circle(p0, radius);
        }
        let left = dir.perp() * radius;
        let mut c = Curve::new();
        c.push(Vertex::line(p0 + left));
        c.push(Vertex::line(p1 + left));
        c.push(Vertex::arc_cw(p1 - left, p1));
        c.push(Vertex::line(p0 - left));
        c.push(Vertex::arc_cw(p0 + left, p0));
        c
    }
}
