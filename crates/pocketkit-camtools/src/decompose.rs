//! Concentric ring decomposition.
//!
//! A region is offset inwards by the stepover again and again until nothing
//! is left. Each offset may split into several independent regions, which
//! are then followed separately, so the result is a tree of rings walked
//! depth-first.

use crate::error::PocketResult;
use pocketkit_core::{Area, Curve, GeometryEngine};
use tracing::debug;

/// One independent region produced by an inward offset.
#[derive(Debug, Clone, PartialEq)]
pub enum RingGroup {
    /// A curve that is a complete boundary on its own.
    Single(Curve),
    /// A clockwise boundary with the counter-clockwise holes inside it.
    WithHoles { boundary: Curve, holes: Vec<Curve> },
}

impl RingGroup {
    fn with_hole(self, hole: Curve) -> RingGroup {
        match self {
            RingGroup::Single(boundary) => RingGroup::WithHoles {
                boundary,
                holes: vec![hole],
            },
            RingGroup::WithHoles { boundary, mut holes } => {
                holes.push(hole);
                RingGroup::WithHoles { boundary, holes }
            }
        }
    }

    pub fn into_area(self) -> Area {
        match self {
            RingGroup::Single(curve) => Area::from(curve),
            RingGroup::WithHoles { boundary, holes } => {
                let mut area = Area::from(boundary);
                for hole in holes {
                    area.push(hole);
                }
                area
            }
        }
    }
}

/// Splits an offset result into independent groups.
fn split_groups<E: GeometryEngine + ?Sized>(
    engine: &E,
    offset: Area,
    holes_linked: bool,
) -> PocketResult<Vec<RingGroup>> {
    if holes_linked {
        return Ok(offset.into_curves().into_iter().map(RingGroup::Single).collect());
    }

    let ordered = engine.reorder(&offset)?;
    let mut groups = Vec::new();
    let mut current: Option<RingGroup> = None;
    for curve in ordered.into_curves() {
        if curve.is_clockwise() {
            if let Some(done) = current.take() {
                groups.push(done);
            }
            current = Some(RingGroup::Single(curve));
        } else {
            match current.take() {
                Some(group) => current = Some(group.with_hole(curve)),
                None => debug!("Dropping hole without a boundary"),
            }
        }
    }
    groups.extend(current);
    Ok(groups)
}

/// Offsets `region` inwards by `stepover` until it vanishes.
///
/// Rings come out in visit order (outer first) unless `from_center` is set,
/// in which case the order is reversed so the innermost ring is first. An
/// empty region yields an empty list without touching the engine.
pub fn decompose<E: GeometryEngine + ?Sized>(
    engine: &E,
    region: &Area,
    stepover: f64,
    from_center: bool,
) -> PocketResult<Vec<Area>> {
    let holes_linked = engine.holes_linked();
    let mut rings = Vec::new();
    let mut worklist = vec![region.clone()];

    while let Some(area) = worklist.pop() {
        if area.is_empty() {
            continue;
        }
        let offset = engine.offset(&area, -stepover)?;
        rings.push(area);

        let groups = split_groups(engine, offset, holes_linked)?;
        // first group is visited next
        worklist.extend(groups.into_iter().rev().map(RingGroup::into_area));
    }

    debug!(rings = rings.len(), from_center, holes_linked, "Decomposed region");
    if from_center {
        rings.reverse();
    }
    Ok(rings)
}

/// Flattens rings into the pass list, reversing every curve for climb
/// milling.
pub fn flatten(rings: &[Area], reverse_curves: bool) -> Vec<Curve> {
    rings
        .iter()
        .flat_map(|ring| ring.curves().iter())
        .map(|curve| {
            if reverse_curves {
                curve.reversed()
            } else {
                curve.clone()
            }
        })
        .collect()
}
