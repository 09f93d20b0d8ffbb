use crate::support::{square, TestEngine};
use pocketkit_camtools::{feed_possible, helix_waypoints, DepthParams, PlanningContext};
use pocketkit_core::Point;
use proptest::prelude::*;
use std::f64::consts::PI;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_feed_to_same_point_is_always_possible(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        radius in 0.1f64..10.0,
        with_snapshot in any::<bool>(),
    ) {
        let engine = TestEngine::new();
        let mut ctx = PlanningContext::new(radius, 1.0);
        if with_snapshot {
            ctx = ctx.with_cleared_area(square(0.0, 10.0));
        }
        let p = Point::new(x, y);
        prop_assert!(feed_possible(&ctx, &engine, p, p).unwrap());
        prop_assert_eq!(engine.calls(), 0);
    }

    #[test]
    fn prop_helix_depths_rise_evenly(
        radius in 0.1f64..5.0,
        angle in 0.5f64..60.0,
        final_depth in -20.0f64..0.0,
        sweep in 0.1f64..60.0,
    ) {
        let p = Point::new(1.0, 2.0);
        let center = p + Point::new(radius, 0.0);
        let waypoints = helix_waypoints(p, center, radius, final_depth, angle, sweep);
        let rise = PI * radius * angle.to_radians().tan();

        prop_assert!(!waypoints.is_empty());
        prop_assert_eq!(waypoints[0].1, final_depth);
        for pair in waypoints.windows(2) {
            prop_assert!(pair[1].1 > pair[0].1);
            prop_assert!((pair[1].1 - pair[0].1 - rise).abs() < 1e-9);
            prop_assert!(pair[0].0 != pair[1].0);
        }
        prop_assert_eq!(waypoints.len(), (sweep / PI).ceil() as usize);
    }

    #[test]
    fn prop_depths_run_shallow_to_deep(
        final_depth in -30.0f64..-0.5,
        step_down in 0.2f64..5.0,
        finish in 0.0f64..0.2,
    ) {
        let depths = DepthParams {
            final_depth,
            step_down,
            z_finish_depth: finish,
            ..DepthParams::default()
        }
        .depths();
        prop_assert!(!depths.is_empty());
        prop_assert!((depths[depths.len() - 1] - final_depth).abs() < 1e-9);
        for pair in depths.windows(2) {
            prop_assert!(pair[1] < pair[0]);
            prop_assert!(pair[0] - pair[1] <= step_down + 1e-7);
        }
    }
}
