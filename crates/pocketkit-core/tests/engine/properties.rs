use pocketkit_core::{Area, CavalierEngine, Curve, GeometryEngine, Point};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_stadium_inside_square_subtracts_to_nothing(
        x0 in 10.0f64..90.0,
        y0 in 10.0f64..90.0,
        x1 in 10.0f64..90.0,
        y1 in 10.0f64..90.0,
        radius in 0.5f64..5.0,
    ) {
        let engine = CavalierEngine::new();
        let cleared = Area::from(Curve::rectangle(Point::new(0.0, 0.0), Point::new(100.0, 100.0)));
        let stadium = Area::from(Curve::obround(Point::new(x0, y0), Point::new(x1, y1), radius));
        prop_assert!(engine.subtract(&stadium, &cleared).unwrap().is_empty());
    }

    #[test]
    fn prop_inward_offset_shrinks_rectangle(
        w in 20.0f64..200.0,
        h in 20.0f64..200.0,
        d in 0.5f64..9.0,
    ) {
        let engine = CavalierEngine::new();
        let area = Area::from(Curve::rectangle(Point::new(0.0, 0.0), Point::new(w, h)));
        let ring = engine.offset(&area, -d).unwrap();
        prop_assert_eq!(ring.num_curves(), 1);
        let b = ring.bounding_box();
        prop_assert!((b.width() - (w - 2.0 * d)).abs() < 1e-6);
        prop_assert!((b.height() - (h - 2.0 * d)).abs() < 1e-6);
    }
}
