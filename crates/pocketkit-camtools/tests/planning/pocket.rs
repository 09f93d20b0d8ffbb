use crate::support::{assert_near, square, TestEngine};
use pocketkit_camtools::{
    CutMode, DepthParams, EntryStyle, Move, MoveRecorder, PocketGenerator, PocketParams,
    PocketStrategy, StartingPlace,
};
use pocketkit_core::{Curve, Point};

fn clearance_rapids(moves: &[Move], clearance: f64) -> usize {
    moves
        .iter()
        .filter(|m| **m == Move::Rapid { x: None, y: None, z: Some(clearance) })
        .count()
}

fn single_level() -> DepthParams {
    DepthParams::single(5.0, 0.0, -1.0)
}

#[test]
fn test_square_rings_outermost_first() {
    let engine = TestEngine::new();
    let boundary = square(0.0, 100.0);
    let generator = PocketGenerator::new(&engine, PocketParams::new(3.0, 2.0));
    let ctx = generator.context(&boundary).unwrap();
    let curves = generator.plan_curves(&boundary, &ctx).unwrap();

    assert_eq!(curves.len(), 24);
    let first = curves[0].bounding_box();
    assert_near(first.min_x, 3.0, 1e-6);
    assert_near(first.min_y, 3.0, 1e-6);
    assert_near(first.max_x, 97.0, 1e-6);
    assert_near(first.max_y, 97.0, 1e-6);
    for pair in curves.windows(2) {
        let outer = pair[0].bounding_box();
        let inner = pair[1].bounding_box();
        assert_near(inner.min_x - outer.min_x, 2.0, 1e-6);
        assert_near(outer.max_x - inner.max_x, 2.0, 1e-6);
    }
}

#[test]
fn test_square_rings_from_center() {
    let engine = TestEngine::new();
    let boundary = square(0.0, 100.0);
    let params = PocketParams::new(3.0, 2.0).with_starting_place(StartingPlace::Center);
    let generator = PocketGenerator::new(&engine, params);
    let ctx = generator.context(&boundary).unwrap();
    let curves = generator.plan_curves(&boundary, &ctx).unwrap();
    assert_eq!(curves.len(), 24);
    assert_near(curves[0].bounding_box().width(), 2.0, 1e-6);
    assert_near(curves[23].bounding_box().width(), 94.0, 1e-6);
}

#[test]
fn test_climb_reverses_rings() {
    let engine = TestEngine::new();
    let boundary = square(0.0, 20.0);
    let params = PocketParams::new(1.0, 2.0).with_cut_mode(CutMode::Climb);
    let generator = PocketGenerator::new(&engine, params);
    let ctx = generator.context(&boundary).unwrap();
    let curves = generator.plan_curves(&boundary, &ctx).unwrap();
    assert!(!curves.is_empty());
    assert!(curves.iter().all(|c| !c.is_clockwise()));
}

#[test]
fn test_every_ring_retracts_by_default() {
    let engine = TestEngine::new();
    let generator = PocketGenerator::new(&engine, PocketParams::new(3.0, 2.0));
    let mut rec = MoveRecorder::new();
    let summary = generator
        .generate(&square(0.0, 100.0), &single_level(), &mut rec)
        .unwrap();
    assert_eq!(summary.passes, 24);
    assert_eq!(summary.levels, 1);
    assert_eq!(summary.moves, rec.len());
    assert_eq!(clearance_rapids(rec.moves(), 5.0), 25);
    assert_eq!(rec.moves()[0], Move::Rapid { x: None, y: None, z: Some(5.0) });
}

#[test]
fn test_keep_tool_down_feeds_between_rings() {
    let engine = TestEngine::new();
    let params = PocketParams::new(3.0, 2.0).with_keep_tool_down(true);
    let generator = PocketGenerator::new(&engine, params);
    let mut rec = MoveRecorder::new();
    generator
        .generate(&square(0.0, 100.0), &single_level(), &mut rec)
        .unwrap();
    // one entry and the retract at the end of the level
    assert_eq!(clearance_rapids(rec.moves(), 5.0), 2);
}

#[test]
fn test_levels_step_down() {
    let engine = TestEngine::new();
    let generator = PocketGenerator::new(&engine, PocketParams::new(3.0, 20.0));
    let depths = DepthParams {
        final_depth: -3.0,
        step_down: 1.0,
        ..DepthParams::default()
    };
    let mut rec = MoveRecorder::new();
    let summary = generator.generate(&square(0.0, 100.0), &depths, &mut rec).unwrap();
    assert_eq!(summary.levels, 3);

    let plunges: Vec<f64> = rec
        .moves()
        .iter()
        .filter_map(|m| match *m {
            Move::Feed { x: None, y: None, z: Some(z) } => Some(z),
            _ => None,
        })
        .collect();
    assert_eq!(plunges.first(), Some(&-1.0));
    assert_eq!(plunges.last(), Some(&-3.0));
    // each level rapids down to just above the previous floor
    assert!(rec.moves().contains(&Move::Rapid { x: None, y: None, z: Some(1.0) }));
}

#[test]
fn test_helical_entry_from_center() {
    let engine = TestEngine::new();
    let params = PocketParams::new(3.0, 2.0)
        .with_starting_place(StartingPlace::Center)
        .with_keep_tool_down(true)
        .with_entry_style(EntryStyle::Helical);
    let generator = PocketGenerator::new(&engine, params);
    let mut rec = MoveRecorder::new();
    generator
        .generate(&square(0.0, 100.0), &single_level(), &mut rec)
        .unwrap();
    assert!(rec.moves().iter().any(|m| matches!(m, Move::ArcCcw { z: Some(_), .. })));
    assert_eq!(clearance_rapids(rec.moves(), 5.0), 2);
}

#[test]
fn test_ramp_entry_stays_in_pocket() {
    let engine = TestEngine::new();
    let params = PocketParams::new(3.0, 2.0)
        .with_starting_place(StartingPlace::Center)
        .with_keep_tool_down(true)
        .with_entry_style(EntryStyle::Ramp);
    let generator = PocketGenerator::new(&engine, params);
    let mut rec = MoveRecorder::new();
    generator
        .generate(&square(0.0, 100.0), &single_level(), &mut rec)
        .unwrap();
    assert!(rec
        .moves()
        .iter()
        .filter_map(Move::xy)
        .all(|p| p.x >= 3.0 - 1e-6 && p.x <= 97.0 + 1e-6));
}

#[test]
fn test_zig_zag_pocket() {
    let engine = TestEngine::new();
    let params = PocketParams::new(3.0, 2.0)
        .with_keep_tool_down(true)
        .with_strategy(PocketStrategy::ZigZag {
            angle: 0.0,
            unidirectional: false,
        });
    let generator = PocketGenerator::new(&engine, params);
    let mut rec = MoveRecorder::new();
    let summary = generator
        .generate(&square(0.0, 100.0), &single_level(), &mut rec)
        .unwrap();
    assert_eq!(summary.passes, 47);
    // the raster is one chain, so the tool only enters once
    assert_eq!(clearance_rapids(rec.moves(), 5.0), 2);
}

#[test]
fn test_engine_pocket_primitive_is_used() {
    let passes = vec![Curve::rectangle(Point::new(10.0, 10.0), Point::new(20.0, 20.0))];
    let engine = TestEngine::with_pocket(passes.clone());
    let generator = PocketGenerator::new(&engine, PocketParams::new(3.0, 2.0));
    let ctx = generator.context(&square(0.0, 100.0)).unwrap();
    let curves = generator.plan_curves(&square(0.0, 100.0), &ctx).unwrap();
    assert_eq!(curves, passes);
    assert_eq!(engine.offsets(), 0);
}

#[test]
fn test_start_point_profiles_first_ring() {
    let engine = TestEngine::new();
    let params = PocketParams::new(3.0, 2.0).with_start_point(Point::new(50.0, 0.0));
    let generator = PocketGenerator::new(&engine, params);
    let mut rec = MoveRecorder::new();
    generator
        .generate(&square(0.0, 100.0), &single_level(), &mut rec)
        .unwrap();
    let first_xy = rec.moves().iter().find_map(Move::xy).unwrap();
    assert!(first_xy.near(&Point::new(50.0, 3.0), 1e-6), "{first_xy:?}");
}

#[test]
fn test_invalid_params_fail_before_planning() {
    let engine = TestEngine::new();
    let generator = PocketGenerator::new(&engine, PocketParams::new(-1.0, 2.0));
    let mut rec = MoveRecorder::new();
    assert!(generator
        .generate(&square(0.0, 100.0), &single_level(), &mut rec)
        .is_err());
    assert_eq!(engine.calls(), 0);
    assert!(rec.is_empty());
}
