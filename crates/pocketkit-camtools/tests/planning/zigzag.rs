use crate::support::{rect, TestEngine};
use pocketkit_camtools::{scan, PlanningContext};
use pocketkit_core::{Area, Curve};

const TOL: f64 = 0.002;

fn first_run(zig: &Curve) -> f64 {
    let v = zig.vertices();
    v[1].p.x - v[0].p.x
}

#[test]
fn test_bidirectional_bands_alternate_and_chain() {
    let engine = TestEngine::new();
    let ctx = PlanningContext::new(1.0, 1.0);
    let zigs = scan(&engine, &ctx, &rect(0.0, 0.0, 20.0, 10.0), 2.0, false).unwrap();

    // six bands, the last one above the region
    assert_eq!(zigs.len(), 5);
    for pair in zigs.windows(2) {
        let end = pair[0].end_point().unwrap();
        let start = pair[1].start_point().unwrap();
        assert!(end.near(&start, TOL), "{end:?} does not meet {start:?}");
    }
    for (i, zig) in zigs.iter().enumerate() {
        let run = first_run(zig);
        if i % 2 == 0 {
            assert!(run < -19.0, "band {i} runs {run}");
        } else {
            assert!(run > 19.0, "band {i} runs {run}");
        }
    }
    // the top band never reaches its upper edge
    assert!(zigs[4].is_closed());
}

#[test]
fn test_unidirectional_bands_all_run_one_way() {
    let engine = TestEngine::new();
    let ctx = PlanningContext::new(1.0, 1.0);
    let zigs = scan(&engine, &ctx, &rect(0.0, 0.0, 20.0, 10.0), 2.0, true).unwrap();
    assert_eq!(zigs.len(), 5);
    assert!(zigs.iter().all(|zig| first_run(zig) < -19.0));
    for zig in &zigs[..4] {
        assert_eq!(zig.len(), 2);
    }
}

#[test]
fn test_scan_angle_rotates_raster() {
    let engine = TestEngine::new();
    let ctx = PlanningContext::new(1.0, 1.0).with_scan_angle(90.0);
    let region = rect(0.0, 0.0, 20.0, 10.0);
    let zigs = scan(&engine, &ctx, &region, 2.0, false).unwrap();
    assert_eq!(zigs.len(), 10);

    let bounds = region.bounding_box().expand(TOL, TOL);
    for zig in &zigs {
        let v = zig.vertices();
        assert!((v[1].p.x - v[0].p.x).abs() < 1e-6, "raster is not vertical");
        assert!(v.iter().all(|v| bounds.contains(v.p)));
    }
}

#[test]
fn test_empty_region_scans_nothing() {
    let engine = TestEngine::new();
    let ctx = PlanningContext::new(1.0, 1.0);
    assert!(scan(&engine, &ctx, &Area::new(), 2.0, false).unwrap().is_empty());
    assert_eq!(engine.calls(), 0);
}

#[test]
fn test_bad_stepover_is_rejected() {
    let engine = TestEngine::new();
    let ctx = PlanningContext::new(1.0, 1.0);
    assert!(scan(&engine, &ctx, &rect(0.0, 0.0, 5.0, 5.0), 0.0, false).is_err());
}
