//! Reset trigger evaluation and the animated return to identity.

use pinchzoom_core::{GestureEvent, PinchZoomConfig, PinchZoomEngine, ResetTrigger};

fn pinch_change(scale_change: f64, focal_x: f64, focal_y: f64) -> GestureEvent {
    GestureEvent::PinchChange {
        number_of_pointers: 2,
        scale_change,
        focal_x,
        focal_y,
    }
}

/// Drive reset springs at 120 Hz until they settle.
fn settle(engine: &mut PinchZoomEngine) {
    for _ in 0..100_000 {
        if !engine.tick(1.0 / 120.0) {
            return;
        }
    }
    panic!("reset transition never settled");
}

fn assert_identity(engine: &PinchZoomEngine) {
    let state = engine.state();
    assert_eq!(state.translate_x, 0.0);
    assert_eq!(state.translate_y, 0.0);
    assert_eq!(state.offset_scale, engine.config().initial_scale());
    assert_eq!(state.pinch_scale, 1.0);
    assert_eq!(state.after_pinch_translate_x, 0.0);
    assert_eq!(state.after_pinch_translate_y, 0.0);
    assert_eq!(state.focal_translate_x, 0.0);
    assert_eq!(state.focal_translate_y, 0.0);
}

/// Build up a non-trivial pose: pan, then a committed pinch.
fn scramble(engine: &mut PinchZoomEngine) {
    engine.set_center_of_view(320.0, 240.0);
    engine.handle(GestureEvent::PanChange {
        change_x: 48.0,
        change_y: -20.0,
    });
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(2.5, 100.0, 180.0));
    engine.handle(GestureEvent::PinchEnd);
}

#[test]
fn double_tap_resets_regardless_of_current_scale() {
    let config = PinchZoomConfig {
        reset_on: vec![ResetTrigger::DoubleTap],
        ..Default::default()
    };

    // Zoomed far in.
    let mut engine = PinchZoomEngine::new(config.clone());
    scramble(&mut engine);
    assert!(engine.state().offset_scale > 1.0);
    engine.handle(GestureEvent::DoubleTap);
    settle(&mut engine);
    assert_identity(&engine);

    // Zoomed out below 1.
    let mut engine = PinchZoomEngine::new(config);
    engine.set_center_of_view(320.0, 240.0);
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(0.5, 160.0, 120.0));
    engine.handle(GestureEvent::PinchEnd);
    assert!(engine.state().offset_scale < 1.0);
    engine.handle(GestureEvent::DoubleTap);
    settle(&mut engine);
    assert_identity(&engine);
}

#[test]
fn release_trigger_resets_after_pan_and_after_pinch() {
    let config = PinchZoomConfig {
        reset_on: vec![ResetTrigger::Release],
        ..Default::default()
    };

    let mut engine = PinchZoomEngine::new(config.clone());
    engine.handle(GestureEvent::PanChange {
        change_x: 80.0,
        change_y: 0.0,
    });
    engine.handle(GestureEvent::PanEnd);
    assert!(engine.is_resetting());
    settle(&mut engine);
    assert_identity(&engine);

    let mut engine = PinchZoomEngine::new(config);
    scramble(&mut engine);
    // scramble's pinch end already fired the release trigger.
    assert!(engine.is_resetting());
    settle(&mut engine);
    assert_identity(&engine);
}

#[test]
fn release_below_one_resets_only_small_scales() {
    let config = PinchZoomConfig {
        reset_on: vec![ResetTrigger::ReleaseIfScaleLessThan1],
        ..Default::default()
    };

    // Ending at 0.8 total: full reset to identity.
    let mut engine = PinchZoomEngine::new(config.clone());
    engine.set_center_of_view(320.0, 240.0);
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(0.8, 160.0, 120.0));
    engine.handle(GestureEvent::PinchEnd);
    assert!(engine.is_resetting());
    settle(&mut engine);
    assert_identity(&engine);

    // Ending at 1.5 total: a normal commit, no reset.
    let mut engine = PinchZoomEngine::new(config);
    engine.set_center_of_view(320.0, 240.0);
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(1.5, 160.0, 120.0));
    engine.handle(GestureEvent::PinchEnd);
    assert!(!engine.is_resetting());
    assert_eq!(engine.state().offset_scale, 1.5);
    assert_eq!(engine.state().pinch_scale, 1.0);
}

#[test]
fn release_below_one_applies_to_pan_too() {
    let config = PinchZoomConfig {
        reset_on: vec![ResetTrigger::ReleaseIfScaleLessThan1],
        ..Default::default()
    };

    // At scale >= 1, releasing a pan keeps the pose.
    let mut engine = PinchZoomEngine::new(config.clone());
    engine.handle(GestureEvent::PanChange {
        change_x: 50.0,
        change_y: 0.0,
    });
    engine.handle(GestureEvent::PanEnd);
    assert!(!engine.is_resetting());
    assert_eq!(engine.state().translate_x, 50.0);

    // Below 1, releasing a pan snaps home.
    let mut engine = PinchZoomEngine::new(config);
    engine.set_center_of_view(320.0, 240.0);
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(0.5, 160.0, 120.0));
    engine.handle(GestureEvent::PinchEnd); // resets (0.5 < 1)
    settle(&mut engine);
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(0.9, 160.0, 120.0));
    engine.handle(GestureEvent::PanChange {
        change_x: 15.0,
        change_y: 0.0,
    });
    engine.handle(GestureEvent::PanEnd);
    assert!(engine.is_resetting());
    settle(&mut engine);
    assert_identity(&engine);
}

#[test]
fn no_triggers_means_the_pose_survives_every_gesture_end() {
    let mut engine = PinchZoomEngine::default();
    scramble(&mut engine);
    engine.handle(GestureEvent::PanEnd);
    engine.handle(GestureEvent::DoubleTap);
    assert!(!engine.is_resetting());
    assert_eq!(engine.state().translate_x, 48.0);
    assert_eq!(engine.state().offset_scale, 2.5);
}

#[test]
fn reset_with_narrow_scale_bounds_lands_on_the_clamped_identity() {
    let config = PinchZoomConfig {
        min_scale: 2.0,
        max_scale: 8.0,
        reset_on: vec![ResetTrigger::DoubleTap],
        ..Default::default()
    };
    let mut engine = PinchZoomEngine::new(config);
    engine.set_center_of_view(100.0, 100.0);
    engine.handle(GestureEvent::PinchStart);
    engine.handle(pinch_change(3.0, 50.0, 50.0));
    engine.handle(GestureEvent::PinchEnd);

    engine.handle(GestureEvent::DoubleTap);
    settle(&mut engine);
    // Identity scale is 1 pulled into [2, 8].
    assert_eq!(engine.state().offset_scale, 2.0);
}
