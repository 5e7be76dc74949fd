//! End-to-end gesture sequences against the transform engine.

use pinchzoom_core::{GestureEvent, PinchZoomConfig, PinchZoomEngine};

fn pinch_change(scale_change: f64, focal_x: f64, focal_y: f64) -> GestureEvent {
    GestureEvent::PinchChange {
        number_of_pointers: 2,
        scale_change,
        focal_x,
        focal_y,
    }
}

// ============================================================================
// Scale clamping
// ============================================================================

#[test]
fn zoom_in_commit_then_zoom_out_clamps_at_the_floor() {
    let config = PinchZoomConfig {
        min_scale: 1.0,
        max_scale: 20.0,
        ..Default::default()
    };
    let mut engine = PinchZoomEngine::new(config);
    engine.set_center_of_view(400.0, 300.0);

    // Zoom to 3x and release.
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(3.0, 200.0, 150.0));
    assert_eq!(engine.state().pinch_scale, 3.0);
    assert_eq!(engine.state().total_scale(), 3.0);
    engine.handle(GestureEvent::PinchEnd);
    assert_eq!(engine.state().offset_scale, 3.0);
    assert_eq!(engine.state().pinch_scale, 1.0);

    // A hard zoom-out would land at 0.3 total; the floor catches it at
    // exactly the configured minimum.
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(0.1, 200.0, 150.0));
    assert_eq!(engine.state().pinch_scale, 1.0 / 3.0);
    assert!((engine.state().total_scale() - 1.0).abs() < 1e-12);
}

#[test]
fn total_scale_stays_in_bounds_across_arbitrary_pinch_streams() {
    let config = PinchZoomConfig {
        min_scale: 0.25,
        max_scale: 20.0,
        ..Default::default()
    };
    let mut engine = PinchZoomEngine::new(config.clone());
    engine.set_center_of_view(500.0, 500.0);
    engine.handle(GestureEvent::PinchStart);

    // Deterministic pseudo-random walk over scale changes and focal points.
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed % 10_000) as f64 / 10_000.0
    };

    for step in 0..2_000 {
        let scale_change = 0.5 + 1.2 * next();
        let focal_x = 1_000.0 * next();
        let focal_y = 1_000.0 * next();
        engine.handle(pinch_change(scale_change, focal_x, focal_y));

        let total = engine.state().total_scale();
        assert!(
            total >= config.min_scale - 1e-9 && total <= config.max_scale + 1e-9,
            "total scale {total} escaped bounds at step {step}"
        );

        // Occasionally commit and start a new session.
        if step % 97 == 0 {
            engine.handle(GestureEvent::PinchEnd);
            let at_rest = engine.state();
            assert!(at_rest.offset_scale >= config.min_scale - 1e-9);
            assert!(at_rest.offset_scale <= config.max_scale + 1e-9);
            assert_eq!(at_rest.pinch_scale, 1.0);
            engine.handle(GestureEvent::PinchStart);
        }
    }
}

// ============================================================================
// Pan integration
// ============================================================================

#[test]
fn many_small_pan_deltas_equal_one_large_delta() {
    let mut split = PinchZoomEngine::default();
    let mut whole = PinchZoomEngine::default();

    for _ in 0..1_000 {
        split.handle(GestureEvent::PanChange {
            change_x: 0.125,
            change_y: -0.0625,
        });
    }
    whole.handle(GestureEvent::PanChange {
        change_x: 125.0,
        change_y: -62.5,
    });

    assert_eq!(split.state().translate_x, whole.state().translate_x);
    assert_eq!(split.state().translate_y, whole.state().translate_y);
}

#[test]
fn pan_is_unbounded() {
    let mut engine = PinchZoomEngine::default();
    engine.handle(GestureEvent::PanChange {
        change_x: 1.0e7,
        change_y: -1.0e7,
    });
    assert_eq!(engine.state().translate_x, 1.0e7);
    assert_eq!(engine.state().translate_y, -1.0e7);
}

// ============================================================================
// Activation gating
// ============================================================================

#[test]
fn gated_wrapper_ignores_everything_until_a_growing_pinch() {
    let config = PinchZoomConfig {
        activate_only_after_pinch: true,
        ..Default::default()
    };
    let mut engine = PinchZoomEngine::new(config);
    engine.set_center_of_view(200.0, 200.0);
    let before = engine.state().clone();

    engine.handle(GestureEvent::PanChange {
        change_x: 40.0,
        change_y: 40.0,
    });
    engine.handle(GestureEvent::PanEnd);
    engine.handle(GestureEvent::DoubleTap);
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(0.9, 100.0, 100.0));
    engine.handle(GestureEvent::PinchEnd);

    // Only the pinch-session flag may differ; the pose is untouched.
    let mut after = engine.state().clone();
    after.new_pinch_session = before.new_pinch_session;
    assert_eq!(after, before);
    assert!(!engine.state().is_activated);

    // The first pinch that drives total scale above 1 activates, and the
    // latch holds for the rest of the session.
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(1.5, 100.0, 100.0));
    assert!(engine.state().is_activated);
    engine.handle(GestureEvent::PinchEnd);
    assert!(engine.state().is_activated);

    engine.handle(GestureEvent::PanChange {
        change_x: 10.0,
        change_y: 0.0,
    });
    assert_eq!(engine.state().translate_x, 10.0);
}

// ============================================================================
// Commit algebra
// ============================================================================

#[test]
fn committing_a_pinch_never_moves_the_picture() {
    let mut engine = PinchZoomEngine::default();
    engine.set_center_of_view(360.0, 240.0);

    engine.handle(GestureEvent::PanChange {
        change_x: -30.0,
        change_y: 18.0,
    });

    // Three pinch sessions at different focal points, each committed.
    for (scale_change, focal_x, focal_y) in
        [(2.0, 90.0, 60.0), (0.6, 300.0, 200.0), (1.7, 180.0, 120.0)]
    {
        engine.handle(GestureEvent::PinchStart);
        engine.handle(pinch_change(scale_change, focal_x, focal_y));

        let before = engine.matrix();
        engine.handle(GestureEvent::PinchEnd);
        let after = engine.matrix();
        assert!(
            before.approx_eq(&after, 1e-9),
            "commit moved the rendered transform"
        );
    }
}

#[test]
fn interleaved_pan_and_pinch_mutate_disjoint_fields() {
    let mut engine = PinchZoomEngine::default();
    engine.set_center_of_view(100.0, 100.0);
    engine.handle(GestureEvent::PinchStart);

    engine.handle(pinch_change(2.0, 100.0, 100.0));
    let scale_fields = (
        engine.state().pinch_scale,
        engine.state().focal_translate_x,
        engine.state().focal_translate_y,
    );

    engine.handle(GestureEvent::PanChange {
        change_x: 12.0,
        change_y: 7.0,
    });
    assert_eq!(
        (
            engine.state().pinch_scale,
            engine.state().focal_translate_x,
            engine.state().focal_translate_y,
        ),
        scale_fields
    );
    assert_eq!(engine.state().translate_x, 12.0);
    assert_eq!(engine.state().translate_y, 7.0);
}
