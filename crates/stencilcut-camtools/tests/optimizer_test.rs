use proptest::prelude::*;
use stencilcut_camtools::optimizer::{
    border_path, decompose, optimize, travel_distance, Border, CutMode, CutPlan,
};
use stencilcut_core::{Point, Segment, Stroke};

fn stroke_set() -> impl Strategy<Value = Vec<Stroke>> {
    let point = (0.0f64..20.0, 0.0f64..20.0).prop_map(Point::from);
    let stroke = (prop::collection::vec(point, 1..6), any::<bool>())
        .prop_map(|(points, closed)| Stroke::with_closed(points, closed).unwrap());
    prop::collection::vec(stroke, 0..8)
}

fn pad(x0: f64, y0: f64) -> Stroke {
    Stroke::closed(vec![
        Point::new(x0, y0),
        Point::new(x0 + 0.1, y0),
        Point::new(x0 + 0.1, y0 + 0.05),
        Point::new(x0, y0 + 0.05),
        Point::new(x0, y0),
    ])
    .unwrap()
}

proptest! {
    #[test]
    fn optimize_neither_drops_nor_duplicates(strokes in stroke_set()) {
        let mut expected = decompose(&strokes);
        let emitted = optimize(&strokes, Border::none());
        prop_assert_eq!(emitted.len(), expected.len());

        for segment in &emitted {
            let position = expected.iter().position(|s| s.same_edge(segment));
            prop_assert!(position.is_some(), "unexpected segment {:?}", segment);
            expected.remove(position.unwrap());
        }
        prop_assert!(expected.is_empty());
    }

    #[test]
    fn border_never_changes_ordering(strokes in stroke_set(), bx in 0.0f64..2.0, by in 0.0f64..2.0) {
        prop_assert_eq!(
            optimize(&strokes, Border::new(bx, by)),
            optimize(&strokes, Border::none())
        );
    }
}

#[test]
fn test_optimize_beats_drawing_order_on_interleaved_pads() {
    // Pads listed far-near-far-near so drawing order zig-zags across the board.
    let strokes = vec![pad(0.0, 0.0), pad(5.0, 0.0), pad(0.2, 0.0), pad(5.2, 0.0)];

    let naive = decompose(&strokes);
    let ordered = optimize(&strokes, Border::none());
    assert!(travel_distance(&ordered) < travel_distance(&naive));
}

#[test]
fn test_first_segment_starts_the_walk() {
    let strokes = vec![pad(3.0, 3.0), pad(0.0, 0.0)];
    let ordered = optimize(&strokes, Border::none());
    assert_eq!(
        ordered[0],
        Segment::new(Point::new(3.0, 3.0), Point::new(3.1, 3.0))
    );
}

#[test]
fn test_plan_for_each_mode() {
    let strokes = vec![pad(0.0, 0.0)];

    let accuracy = CutPlan::build(&strokes, CutMode::Accuracy, Border::none());
    assert_eq!(accuracy.len(), 4);
    assert!(matches!(accuracy, CutPlan::Segments(_)));

    let speed = CutPlan::build(&strokes, CutMode::Speed, Border::none());
    assert_eq!(speed.len(), 1);
    assert_eq!(speed.travel_distance(), 0.0);
}

#[test]
fn test_speed_mode_reports_open_strokes_it_closes() {
    let open = Stroke::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap();
    let closed = Stroke::closed(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 0.0),
    ])
    .unwrap();
    let strokes = vec![open, closed];

    let speed = CutPlan::build(&strokes, CutMode::Speed, Border::none());
    assert_eq!(speed.implicitly_closed(), 1);

    let accuracy = CutPlan::build(&strokes, CutMode::Accuracy, Border::none());
    assert_eq!(accuracy.implicitly_closed(), 0);
}

#[test]
fn test_border_around_justified_drawing() {
    let path = border_path(2.5, 1.0, Border::new(0.5, 0.25)).unwrap();
    assert_eq!(path[0], Point::new(-0.5, -0.25));
    assert_eq!(path[2], Point::new(3.0, 1.25));
    assert_eq!(path.len(), 4);
}
