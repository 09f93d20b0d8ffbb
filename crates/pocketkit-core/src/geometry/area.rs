//! Regions: sets of curves bounding material with holes.

use super::{BoundingBox, Curve, Point};
use serde::{Deserialize, Serialize};

/// A set of closed curves.
///
/// How boundaries and holes relate depends on the engine that produced the
/// area; see [`crate::engine::GeometryEngine::holes_linked`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Area {
    curves: Vec<Curve>,
}

impl Area {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_curves(curves: Vec<Curve>) -> Self {
        Self { curves }
    }

    pub fn from_curve(curve: Curve) -> Self {
        Self {
            curves: vec![curve],
        }
    }

    pub fn push(&mut self, curve: Curve) {
        self.curves.push(curve);
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn into_curves(self) -> Vec<Curve> {
        self.curves
    }

    pub fn num_curves(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.curves
            .iter()
            .fold(BoundingBox::empty(), |acc, c| acc.union(&c.bounding_box()))
    }

    /// Net signed area of all curves.
    pub fn signed_area(&self) -> f64 {
        self.curves.iter().map(Curve::signed_area).sum()
    }

    /// Point on any curve closest to `p`, if the area has any vertices.
    pub fn nearest_point(&self, p: Point) -> Option<Point> {
        self.curves
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| c.nearest_point(p))
            .min_by(|a, b| a.distance_to(&p).total_cmp(&b.distance_to(&p)))
    }

    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Area {
        Area {
            curves: self.curves.iter().map(|c| c.map_points(&f)).collect(),
        }
    }

    /// Reverses every curve.
    pub fn reverse(&mut self) {
        for c in &mut self.curves {
            c.reverse();
        }
    }

    /// Smallest distance between a vertex of either area and the other area.
    pub fn distance_to(&self, other: &Area) -> Option<f64> {
        fn one_way(from: &Area, to: &Area) -> Option<f64> {
            from.curves
                .iter()
                .flat_map(|c| c.vertices().iter())
                .filter_map(|v| to.nearest_point(v.p).map(|q| q.distance_to(&v.p)))
                .min_by(f64::total_cmp)
        }
        match (one_way(self, other), one_way(other, self)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl From<Curve> for Area {
    fn from(curve: Curve) -> Self {
        Area::from_curve(curve)
    }
}

impl FromIterator<Curve> for Area {
    fn from_iter<I: IntoIterator<Item = Curve>>(iter: I) -> Self {
        Area {
            curves: iter.into_iter().collect(),
        }
    }
}
