use proptest::prelude::*;
use stencilcut_camtools::geometry::{justify, max_extent, rotate};
use stencilcut_core::{BoundingExtent, Point, Stroke};

fn stroke_set() -> impl Strategy<Value = Vec<Stroke>> {
    let point = (-50.0f64..50.0, -50.0f64..50.0).prop_map(Point::from);
    let stroke = (prop::collection::vec(point, 1..8), any::<bool>())
        .prop_map(|(points, closed)| Stroke::with_closed(points, closed).unwrap());
    prop::collection::vec(stroke, 0..6)
}

proptest! {
    #[test]
    fn rotate_by_zero_is_exact_identity(strokes in stroke_set()) {
        prop_assert_eq!(rotate(&strokes, 0.0), strokes);
    }

    #[test]
    fn justify_anchors_minimum_at_origin(strokes in stroke_set().prop_filter("non-empty", |s| !s.is_empty())) {
        let justified = justify(&strokes);
        let extent = BoundingExtent::of(&justified).unwrap();
        prop_assert_eq!(extent.min_x, 0.0);
        prop_assert_eq!(extent.min_y, 0.0);
    }

    #[test]
    fn justify_is_idempotent(strokes in stroke_set()) {
        let once = justify(&strokes);
        prop_assert_eq!(justify(&once), once);
    }

    #[test]
    fn justify_preserves_shape_and_closedness(strokes in stroke_set()) {
        let justified = justify(&strokes);
        prop_assert_eq!(justified.len(), strokes.len());
        for (a, b) in strokes.iter().zip(&justified) {
            prop_assert_eq!(a.len(), b.len());
            prop_assert_eq!(a.is_closed(), b.is_closed());
        }
    }
}

#[test]
fn test_scenario_extent_after_justify() {
    let strokes = vec![Stroke::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
    ])
    .unwrap()];
    assert_eq!(max_extent(&justify(&strokes)), (1.0, 1.0));
}

#[test]
fn test_rotate_then_justify_order_matters() {
    let strokes = vec![Stroke::new(vec![Point::new(1.0, 0.0), Point::new(3.0, 0.0)]).unwrap()];

    let rotated_first = justify(&rotate(&strokes, 180.0));
    let justified_first = rotate(&justify(&strokes), 180.0);

    // Rotating after justification swings the drawing into negative x.
    assert_eq!(BoundingExtent::of(&rotated_first).unwrap().min_x, 0.0);
    assert!(BoundingExtent::of(&justified_first).unwrap().min_x < -1.9);
}

#[test]
fn test_rotation_is_about_origin_not_centroid() {
    let strokes = vec![Stroke::new(vec![Point::new(10.0, 10.0)]).unwrap()];
    let rotated = rotate(&strokes, 180.0);
    let p = rotated[0].points()[0];
    assert!((p.x + 10.0).abs() < 1e-9);
    assert!((p.y + 10.0).abs() < 1e-9);
}
