use pocketkit_core::{Area, CavalierEngine, Curve, GeometryEngine, Point};
use std::f64::consts::PI;

fn square(size: f64) -> Area {
    Area::from(Curve::rectangle(Point::new(0.0, 0.0), Point::new(size, size)))
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{a} != {b}");
}

#[test]
fn test_offset_inward_square() {
    let engine = CavalierEngine::new();
    let ring = engine.offset(&square(100.0), -3.0).unwrap();
    assert_eq!(ring.num_curves(), 1);
    assert!(ring.curves()[0].is_clockwise());
    let b = ring.bounding_box();
    assert_close(b.min_x, 3.0);
    assert_close(b.min_y, 3.0);
    assert_close(b.max_x, 97.0);
    assert_close(b.max_y, 97.0);
}

#[test]
fn test_offset_outward_rounds_corners() {
    let engine = CavalierEngine::new();
    let grown = engine.offset(&square(100.0), 2.0).unwrap();
    assert_eq!(grown.num_curves(), 1);
    let b = grown.bounding_box();
    assert_close(b.min_x, -2.0);
    assert_close(b.max_y, 102.0);
    let expected = 100.0 * 100.0 + 4.0 * 100.0 * 2.0 + PI * 4.0;
    assert_close(grown.signed_area(), -expected);
}

#[test]
fn test_offset_to_extinction_is_empty() {
    let engine = CavalierEngine::new();
    let gone = engine.offset(&square(100.0), -60.0).unwrap();
    assert!(gone.is_empty());
}

#[test]
fn test_offset_empty_area() {
    let engine = CavalierEngine::new();
    assert!(engine.offset(&Area::new(), -1.0).unwrap().is_empty());
}

#[test]
fn test_offset_splits_dumbbell() {
    // two 20x20 squares joined by a 2 wide bridge
    let outline = Curve::from_points(
        &[
            Point::new(0.0, 0.0),
            Point::new(0.0, 20.0),
            Point::new(20.0, 20.0),
            Point::new(20.0, 11.0),
            Point::new(40.0, 11.0),
            Point::new(40.0, 20.0),
            Point::new(60.0, 20.0),
            Point::new(60.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 9.0),
            Point::new(20.0, 9.0),
            Point::new(20.0, 0.0),
        ],
        true,
    );
    assert!(outline.is_clockwise());
    let engine = CavalierEngine::new();
    let split = engine.offset(&Area::from(outline), -1.5).unwrap();
    assert_eq!(split.num_curves(), 2);
    assert!(split.curves().iter().all(Curve::is_clockwise));
}

#[test]
fn test_offset_with_hole_keeps_hole_after_boundary() {
    let mut area = square(100.0);
    area.push(Curve::rectangle(Point::new(40.0, 40.0), Point::new(60.0, 60.0)).reversed());
    let engine = CavalierEngine::new();
    let ring = engine.offset(&area, -2.0).unwrap();
    assert_eq!(ring.num_curves(), 2);
    assert!(ring.curves()[0].is_clockwise());
    assert!(!ring.curves()[1].is_clockwise());
    let hole = ring.curves()[1].bounding_box();
    assert_close(hole.min_x, 38.0);
    assert_close(hole.max_x, 62.0);
}

#[test]
fn test_subtract_contained_stadium_is_empty() {
    let engine = CavalierEngine::new();
    let cleared = square(100.0);
    let stadium = Area::from(Curve::obround(
        Point::new(20.0, 50.0),
        Point::new(60.0, 50.0),
        3.0,
    ));
    assert!(engine.subtract(&stadium, &cleared).unwrap().is_empty());
}

#[test]
fn test_subtract_overhanging_stadium_leaves_material() {
    let engine = CavalierEngine::new();
    let cleared = square(100.0);
    let stadium = Area::from(Curve::obround(
        Point::new(50.0, 50.0),
        Point::new(120.0, 50.0),
        3.0,
    ));
    let rest = engine.subtract(&stadium, &cleared).unwrap();
    assert!(!rest.is_empty());
    let b = rest.bounding_box();
    assert_close(b.min_x, 100.0);
    assert_close(b.max_x, 123.0);
}

#[test]
fn test_subtract_keeps_material_inside_cutter_hole() {
    let engine = CavalierEngine::new();
    let mut cutter = square(100.0);
    cutter.push(Curve::rectangle(Point::new(40.0, 40.0), Point::new(60.0, 60.0)).reversed());
    let probe = Area::from(Curve::circle(Point::new(50.0, 50.0), 5.0));
    let rest = engine.subtract(&probe, &cutter).unwrap();
    assert_eq!(rest.num_curves(), 1);
    assert_close(rest.signed_area(), -PI * 25.0);
}

#[test]
fn test_intersect_band() {
    let engine = CavalierEngine::new();
    let band = Area::from(Curve::rectangle(
        Point::new(-1.0, 10.0),
        Point::new(101.0, 12.0),
    ));
    let slice = engine.intersect(&square(100.0), &band).unwrap();
    assert_eq!(slice.num_curves(), 1);
    let b = slice.bounding_box();
    assert_close(b.min_x, 0.0);
    assert_close(b.max_x, 100.0);
    assert_close(b.min_y, 10.0);
    assert_close(b.max_y, 12.0);
}

#[test]
fn test_intersect_band_across_hole_splits() {
    let engine = CavalierEngine::new();
    let mut area = square(100.0);
    area.push(Curve::rectangle(Point::new(40.0, 40.0), Point::new(60.0, 60.0)).reversed());
    let band = Area::from(Curve::rectangle(
        Point::new(-1.0, 45.0),
        Point::new(101.0, 47.0),
    ));
    let slice = engine.intersect(&area, &band).unwrap();
    assert_eq!(slice.num_curves(), 2);
    assert_close(slice.signed_area(), -2.0 * 80.0);
}

#[test]
fn test_reorder_groups_holes_with_boundaries() {
    let engine = CavalierEngine::new();
    let mut area = Area::new();
    area.push(Curve::rectangle(Point::new(12.0, 2.0), Point::new(18.0, 8.0)).reversed());
    area.push(Curve::rectangle(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
    area.push(Curve::rectangle(Point::new(2.0, 2.0), Point::new(8.0, 8.0)).reversed());
    area.push(Curve::rectangle(Point::new(11.0, 0.0), Point::new(20.0, 10.0)));
    let ordered = engine.reorder(&area).unwrap();
    let orientation: Vec<bool> = ordered.curves().iter().map(Curve::is_clockwise).collect();
    assert_eq!(orientation, vec![true, false, true, false]);
}

#[test]
fn test_engine_flags() {
    let engine = CavalierEngine::with_units(25.4);
    assert!(!engine.holes_linked());
    assert_eq!(engine.units(), 25.4);
    assert_eq!(CavalierEngine::default().units(), 1.0);
}
