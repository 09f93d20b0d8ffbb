use crate::support::{assert_near, square, TestEngine};
use pocketkit_camtools::{decompose, flatten};
use pocketkit_core::{Area, Curve, Point};

#[test]
fn test_empty_region_touches_nothing() {
    let engine = TestEngine::new();
    let rings = decompose(&engine, &Area::new(), 2.0, false).unwrap();
    assert!(rings.is_empty());
    assert_eq!(engine.calls(), 0);
}

#[test]
fn test_square_rings_outside_in() {
    let engine = TestEngine::new();
    let rings = decompose(&engine, &square(3.0, 97.0), 2.0, false).unwrap();
    assert_eq!(rings.len(), 24);
    for (i, ring) in rings.iter().enumerate() {
        let b = ring.bounding_box();
        let inset = 3.0 + 2.0 * i as f64;
        assert_near(b.min_x, inset, 1e-6);
        assert_near(b.max_y, 100.0 - inset, 1e-6);
    }
    // one offset per ring, the last one comes back empty
    assert_eq!(engine.offsets(), 24);
}

#[test]
fn test_from_center_reverses() {
    let engine = TestEngine::new();
    let outside_in = decompose(&engine, &square(3.0, 97.0), 2.0, false).unwrap();
    let inside_out = decompose(&engine, &square(3.0, 97.0), 2.0, true).unwrap();
    assert_eq!(inside_out.len(), outside_in.len());
    assert_near(inside_out[0].bounding_box().width(), 2.0, 1e-6);
    assert_eq!(inside_out.last(), outside_in.first());
}

#[test]
fn test_linked_engine_skips_reorder() {
    let linked = TestEngine::linked();
    let rings = decompose(&linked, &square(0.0, 20.0), 2.0, false).unwrap();
    assert_eq!(rings.len(), 5);
    // linked engines only ever offset
    assert_eq!(linked.calls(), linked.offsets());

    let unlinked = TestEngine::new();
    let same = decompose(&unlinked, &square(0.0, 20.0), 2.0, false).unwrap();
    assert_eq!(same.len(), 5);
    assert!(unlinked.calls() > unlinked.offsets());
}

/// Two 20 x 20 lobes joined by a neck 2 wide, which the first offset cuts.
fn dumbbell() -> Area {
    let outline = [
        (0.0, 0.0),
        (0.0, 20.0),
        (20.0, 20.0),
        (20.0, 11.0),
        (30.0, 11.0),
        (30.0, 20.0),
        (50.0, 20.0),
        (50.0, 0.0),
        (30.0, 0.0),
        (30.0, 9.0),
        (20.0, 9.0),
        (20.0, 0.0),
    ];
    let points: Vec<Point> = outline.iter().map(|&(x, y)| Point::new(x, y)).collect();
    Area::from(Curve::from_points(&points, true))
}

#[test]
fn test_linked_engine_follows_each_split_curve() {
    let engine = TestEngine::linked();
    let rings = decompose(&engine, &dumbbell(), 2.0, false).unwrap();
    assert_eq!(engine.calls(), engine.offsets());

    // the dumbbell, then four rings per lobe
    assert_eq!(rings.len(), 9);
    assert!(rings.iter().all(|r| r.num_curves() == 1));
    let left: Vec<bool> = rings[1..]
        .iter()
        .map(|r| r.bounding_box().max_x < 25.0)
        .collect();
    assert_eq!(left.iter().filter(|l| **l).count(), 4);
    // one lobe is finished before the other is started
    assert!(left[..4].iter().all(|l| *l == left[0]));
    assert!(left[4..].iter().all(|l| *l != left[0]));
}

#[test]
fn test_holes_follow_their_boundary() {
    let engine = TestEngine::new();
    let mut region = square(0.0, 100.0);
    region.push(Curve::rectangle(Point::new(40.0, 40.0), Point::new(60.0, 60.0)).reversed());

    let rings = decompose(&engine, &region, 2.0, false).unwrap();
    for ring in &rings[..10] {
        assert_eq!(ring.num_curves(), 2);
        assert!(ring.curves()[0].is_clockwise());
        assert!(!ring.curves()[1].is_clockwise());
    }
    // the band breaks up into corner pieces once it is used up
    let pieces = rings.iter().filter(|r| r.num_curves() == 1).count();
    assert!(pieces >= 4, "only {pieces} single curve rings");
}

#[test]
fn test_flatten_keeps_ring_order() {
    let engine = TestEngine::new();
    let rings = decompose(&engine, &square(0.0, 10.0), 2.0, false).unwrap();
    let curves = flatten(&rings, false);
    assert_eq!(curves.len(), 3);
    assert!(curves.iter().all(Curve::is_clockwise));
    assert!(flatten(&rings, true).iter().all(|c| !c.is_clockwise()));
}

#[test]
fn test_ring_spacing_is_stepover() {
    let engine = TestEngine::new();
    let rings = decompose(&engine, &square(3.0, 97.0), 2.0, false).unwrap();
    for pair in rings.windows(2) {
        let gap = pair[0].distance_to(&pair[1]).unwrap();
        assert_near(gap, 2.0, 1e-6);
    }
}
