use snapmeasure::{
    handle, AppState, BackgroundImage, Boundary, Calibration, MeasureEvent, Phase, Point, Segment,
    Selection, Transition,
};

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

fn ruler_state() -> AppState {
    let mut state = AppState::default();
    state.handle(MeasureEvent::BoundaryLoaded(Boundary::new(vec![Segment::new(
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
    )])));
    state
}

#[test]
fn starts_idle_with_default_calibration() {
    let state = AppState::default();
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.selection.anchors().is_empty());
    assert_eq!(state.calibration.mm_per_pixel(), 0.1);
    assert!(state.readout().is_none());
}

#[test]
fn snapped_two_click_measurement() {
    let mut state = ruler_state();

    assert_eq!(
        state.handle(MeasureEvent::Clicked(Point::new(3.0, 2.0))),
        Transition::Updated
    );
    assert_eq!(state.phase(), Phase::Pending);
    assert!(approx(state.selection.anchors()[0], Point::new(3.0, 0.0)));

    let t = state.handle(MeasureEvent::Clicked(Point::new(8.0, -5.0)));
    let Transition::Completed(m) = t else {
        panic!("expected a completed measurement, got {t:?}");
    };
    assert_eq!(state.phase(), Phase::Complete);
    assert!(approx(m.start, Point::new(3.0, 0.0)));
    assert!(approx(m.end, Point::new(8.0, 0.0)));
    assert!((m.length_px() - 5.0).abs() < 1e-9);

    // 5 px * 0.1 mm/px = 0.50 mm = 0.05 cm, rounded half away from zero.
    let reading = state.readout().expect("complete");
    assert_eq!(reading.millimeters(), 0.5);
    assert_eq!(reading.to_string(), "0.1 cm");
}

#[test]
fn third_click_starts_a_new_measurement() {
    let mut state = AppState {
        snap_enabled: false,
        ..AppState::default()
    };
    state.handle(MeasureEvent::Clicked(Point::new(1.0, 1.0)));
    state.handle(MeasureEvent::Clicked(Point::new(4.0, 5.0)));
    assert_eq!(state.phase(), Phase::Complete);

    state.handle(MeasureEvent::Clicked(Point::new(9.0, 9.0)));
    assert_eq!(state.phase(), Phase::Pending);
    assert_eq!(state.selection.anchors(), &[Point::new(9.0, 9.0)]);
}

#[test]
fn free_mode_distance_formula() {
    let mut state = AppState {
        snap_enabled: false,
        calibration: Calibration::new(0.25).expect("positive"),
        ..AppState::default()
    };
    state.handle(MeasureEvent::Clicked(Point::new(0.0, 0.0)));
    state.handle(MeasureEvent::Clicked(Point::new(300.0, 400.0)));
    // 500 px * 0.25 = 125 mm = 12.5 cm
    assert_eq!(state.readout().map(|r| r.to_string()), Some("12.5 cm".into()));
}

#[test]
fn hover_never_changes_phase() {
    let mut state = ruler_state();
    state.handle(MeasureEvent::PointerMoved(Point::new(2.0, 5.0)));
    assert_eq!(state.phase(), Phase::Idle);
    assert!(approx(state.hover.expect("snapped"), Point::new(2.0, 0.0)));

    state.handle(MeasureEvent::Clicked(Point::new(2.0, 5.0)));
    state.handle(MeasureEvent::PointerMoved(Point::new(6.0, 3.0)));
    assert_eq!(state.phase(), Phase::Pending);
    assert_eq!(state.selection.anchors().len(), 1);
}

#[test]
fn pending_preview_follows_hover() {
    let mut state = ruler_state();
    state.handle(MeasureEvent::Clicked(Point::new(0.0, 1.0)));
    state.handle(MeasureEvent::PointerMoved(Point::new(6.0, 3.0)));
    let live = state.live_measurement().expect("preview");
    assert!(approx(live.end, Point::new(6.0, 0.0)));
    // 6 px * 0.1 = 0.60 mm -> 0.06 cm -> "0.1 cm"
    assert_eq!(state.readout().map(|r| r.to_string()), Some("0.1 cm".into()));

    state.handle(MeasureEvent::PointerMoved(Point::new(4.0, -3.0)));
    // 4 px * 0.1 = 0.40 mm -> 0.04 cm -> "0.0 cm"
    assert_eq!(state.readout().map(|r| r.to_string()), Some("0.0 cm".into()));
}

#[test]
fn readout_uses_live_calibration() {
    let mut state = ruler_state();
    state.handle(MeasureEvent::Clicked(Point::new(3.0, 2.0)));
    state.handle(MeasureEvent::Clicked(Point::new(8.0, -5.0)));
    assert_eq!(state.readout().map(|r| r.to_string()), Some("0.1 cm".into()));

    state.handle(MeasureEvent::CalibrationLoaded(
        Calibration::new(2.0).expect("positive"),
    ));
    assert_eq!(state.phase(), Phase::Complete);
    assert_eq!(state.readout().map(|r| r.to_string()), Some("1.0 cm".into()));
}

#[test]
fn snap_toggle_keeps_anchors_and_reresolves_hover() {
    let mut state = ruler_state();
    state.handle(MeasureEvent::Clicked(Point::new(3.0, 2.0)));
    state.handle(MeasureEvent::PointerMoved(Point::new(7.0, 4.0)));
    assert!(approx(state.hover.expect("snapped"), Point::new(7.0, 0.0)));

    assert_eq!(
        state.handle(MeasureEvent::SnapToggled(false)),
        Transition::Updated
    );
    assert_eq!(state.phase(), Phase::Pending);
    assert!(approx(state.selection.anchors()[0], Point::new(3.0, 0.0)));
    assert_eq!(state.hover, Some(Point::new(7.0, 4.0)));

    // Next click uses the raw position.
    state.handle(MeasureEvent::Clicked(Point::new(7.0, 4.0)));
    assert_eq!(state.selection.anchors()[1], Point::new(7.0, 4.0));
}

#[test]
fn repeated_snap_toggle_is_unchanged() {
    let mut state = AppState::default();
    assert_eq!(
        state.handle(MeasureEvent::SnapToggled(true)),
        Transition::Unchanged
    );
}

#[test]
fn snap_click_without_boundary_is_ignored() {
    let mut state = AppState::default();
    assert!(state.snap_enabled);
    assert_eq!(
        state.handle(MeasureEvent::Clicked(Point::new(5.0, 5.0))),
        Transition::Unchanged
    );
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.hover, None);
}

#[test]
fn boundary_load_resizes_canvas_and_keeps_selection() {
    let mut state = AppState {
        snap_enabled: false,
        ..AppState::default()
    };
    state.handle(MeasureEvent::Clicked(Point::new(1.0, 1.0)));
    state.handle(MeasureEvent::BoundaryLoaded(Boundary::new(vec![Segment::new(
        Point::new(-5.0, 10.0),
        Point::new(95.0, 60.0),
    )])));
    assert_eq!(state.canvas_size, [100.0, 50.0]);
    assert_eq!(state.boundary.segments()[0].start, Point::new(0.0, 0.0));
    assert_eq!(state.phase(), Phase::Pending);
}

#[test]
fn empty_boundary_load_keeps_canvas_size() {
    let mut state = ruler_state();
    let size = state.canvas_size;
    state.handle(MeasureEvent::BoundaryLoaded(Boundary::default()));
    assert!(state.boundary.is_empty());
    assert_eq!(state.canvas_size, size);
}

#[test]
fn completed_measurement_survives_everything_but_a_click() {
    let mut state = ruler_state();
    state.handle(MeasureEvent::Clicked(Point::new(1.0, 0.0)));
    state.handle(MeasureEvent::Clicked(Point::new(6.0, 0.0)));
    let done = state.selection;
    assert!(matches!(done, Selection::Complete(_)));

    let events = [
        MeasureEvent::PointerMoved(Point::new(9.0, 4.0)),
        MeasureEvent::SnapToggled(false),
        MeasureEvent::SnapToggled(true),
        MeasureEvent::BoundaryLoaded(Boundary::new(vec![Segment::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 20.0),
        )])),
        MeasureEvent::ImageLoaded(BackgroundImage {
            size: [1, 1],
            rgba: vec![0, 0, 0, 255],
        }),
        MeasureEvent::CalibrationLoaded(Calibration::new(2.0).unwrap()),
        MeasureEvent::PointerMoved(Point::new(-3.0, 50.0)),
    ];
    for event in events {
        state.handle(event.clone());
        assert_eq!(state.selection, done, "selection changed after {event:?}");
    }
    assert_eq!(state.phase(), Phase::Complete);
    // 5 px at 2 mm/px.
    assert_eq!(state.readout().unwrap().to_string(), "1.0 cm");

    state.handle(MeasureEvent::Clicked(Point::new(3.0, 3.0)));
    assert_eq!(state.phase(), Phase::Pending);
}

#[test]
fn centimeters_are_rounded_once() {
    let mut state = AppState {
        snap_enabled: false,
        ..AppState::default()
    };
    state.handle(MeasureEvent::Clicked(Point::new(0.0, 0.0)));
    state.handle(MeasureEvent::Clicked(Point::new(4.951, 0.0)));
    // 0.4951 mm: two-decimal millimeters read 0.50, but the label is 0.0 cm.
    let reading = state.readout().unwrap();
    assert_eq!(reading.millimeters(), 0.5);
    assert_eq!(reading.to_string(), "0.0 cm");
}

#[test]
fn value_style_handle_matches_method() {
    let state = handle(
        AppState {
            snap_enabled: false,
            ..AppState::default()
        },
        MeasureEvent::Clicked(Point::new(2.0, 3.0)),
    );
    assert_eq!(state.selection.anchors(), &[Point::new(2.0, 3.0)]);
}
