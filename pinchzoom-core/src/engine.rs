//! The gesture-driven transform engine.
//!
//! Gesture callbacks mutate a single owned [`TransformState`]; the
//! render-time matrix is derived from it as a pure function after every
//! mutation. Reset transitions animate fields back to identity with
//! per-field springs, so a gesture landing mid-reset takes over exactly the
//! fields it touches and the rest keep animating.
//!
//! All methods must be called from one ordered event stream; the engine
//! performs no locking. Hosts with parallel gesture dispatch have to
//! serialize calls around the owning instance.

use crate::config::{PinchZoomConfig, ResetTrigger};
use crate::events::GestureEvent;
use crate::points::Point;
use crate::spring::Spring;
use crate::state::TransformState;
use crate::transforms::{pose_matrix, pose_transform_ops, Mat3, TransformOp};

/// Maximum per-axis focal drift (in element-local units) under which the
/// focal anchor is recomputed. Larger drift between change events is
/// treated as reporting noise and leaves the anchor untouched.
const FOCAL_DRIFT_TOLERANCE: f64 = 5.0;

/// Which gesture is ending, for reset-policy evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EndingGesture {
    Pan,
    Pinch,
    DoubleTap,
}

/// In-flight reset transition: one spring per animated pose field. A slot
/// goes back to `None` once its spring settles or a gesture claims the
/// field.
#[derive(Default)]
struct ResetAnimation {
    translate_x: Option<Spring>,
    translate_y: Option<Spring>,
    offset_scale: Option<Spring>,
    pinch_scale: Option<Spring>,
    after_pinch_translate_x: Option<Spring>,
    after_pinch_translate_y: Option<Spring>,
    focal_translate_x: Option<Spring>,
    focal_translate_y: Option<Spring>,
}

impl ResetAnimation {
    fn is_idle(&self) -> bool {
        self.translate_x.is_none()
            && self.translate_y.is_none()
            && self.offset_scale.is_none()
            && self.pinch_scale.is_none()
            && self.after_pinch_translate_x.is_none()
            && self.after_pinch_translate_y.is_none()
            && self.focal_translate_x.is_none()
            && self.focal_translate_y.is_none()
    }
}

/// Install or retarget one field's spring. Retargeting an existing spring
/// keeps its velocity, so overlapping resets blend instead of restarting.
fn aim(slot: &mut Option<Spring>, current: f64, target: f64) {
    match slot {
        Some(spring) => spring.retarget(target),
        None => *slot = Some(Spring::new(current, target)),
    }
}

/// Advance one field's spring and write the result back, snapping exactly
/// to the target on settle.
fn advance(slot: &mut Option<Spring>, field: &mut f64, dt: f64) {
    if let Some(spring) = slot {
        *field = spring.tick(dt);
        if spring.is_settled() {
            *field = spring.target;
            *slot = None;
        }
    }
}

/// Transform state machine for one wrapped element.
pub struct PinchZoomEngine {
    config: PinchZoomConfig,
    state: TransformState,
    reset: Option<ResetAnimation>,
}

impl PinchZoomEngine {
    pub fn new(config: PinchZoomConfig) -> Self {
        let state = TransformState::new(&config);
        Self {
            config,
            state,
            reset: None,
        }
    }

    pub fn config(&self) -> &PinchZoomConfig {
        &self.config
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Record the element's measured extent. Scale operations anchor
    /// relative to this center point.
    pub fn set_center_of_view(&mut self, width: f64, height: f64) {
        self.state.center_of_view = Point::new(width / 2.0, height / 2.0);
    }

    /// Whether a reset transition is still animating.
    pub fn is_resetting(&self) -> bool {
        self.reset.is_some()
    }

    /// The render-time op list for the current pose, outermost first.
    pub fn transform_ops(&self) -> [TransformOp; 6] {
        pose_transform_ops(&self.state)
    }

    /// The composited render-time matrix for the current pose.
    pub fn matrix(&self) -> Mat3 {
        pose_matrix(&self.state)
    }

    /// Dispatch a typed gesture event to the matching handler.
    pub fn handle(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::PanStart => {}
            GestureEvent::PanChange { change_x, change_y } => {
                self.on_pan_change(change_x, change_y)
            }
            GestureEvent::PanEnd => self.on_pan_end(),
            GestureEvent::PinchStart => self.on_pinch_start(),
            GestureEvent::PinchChange {
                number_of_pointers,
                scale_change,
                focal_x,
                focal_y,
            } => self.on_pinch_change(number_of_pointers, scale_change, focal_x, focal_y),
            GestureEvent::PinchEnd => self.on_pinch_end(),
            GestureEvent::DoubleTap => self.on_double_tap(),
        }
    }

    /// Integrate a pan delta. Unbounded; only scale is clamped.
    pub fn on_pan_change(&mut self, change_x: f64, change_y: f64) {
        if !self.state.is_activated {
            return;
        }

        // The user takes these fields back from any reset in flight.
        if let Some(reset) = self.reset.as_mut() {
            reset.translate_x = None;
            reset.translate_y = None;
        }
        self.drop_reset_if_idle();

        self.state.translate_x += change_x;
        self.state.translate_y += change_y;
    }

    pub fn on_pan_end(&mut self) {
        if !self.state.is_activated {
            return;
        }
        self.apply_reset_policy(EndingGesture::Pan);
    }

    pub fn on_pinch_start(&mut self) {
        self.state.new_pinch_session = true;
    }

    /// Apply an incremental pinch update: activation check, total-scale
    /// clamping, focal anchoring.
    pub fn on_pinch_change(
        &mut self,
        number_of_pointers: u32,
        scale_change: f64,
        focal_x: f64,
        focal_y: f64,
    ) {
        // A single remaining pointer is a hold, not a scale change.
        if number_of_pointers < 2 {
            return;
        }

        let new_pinch_scale = self.state.pinch_scale * scale_change;
        let total_scale = self.state.offset_scale * new_pinch_scale;

        if self.config.activate_only_after_pinch && !self.state.is_activated && total_scale > 1.0 {
            self.state.is_activated = true;
            log::debug!("pinch crossed scale 1, wrapper activated");
        }
        if !self.state.is_activated {
            return;
        }

        if let Some(reset) = self.reset.as_mut() {
            reset.pinch_scale = None;
            reset.focal_translate_x = None;
            reset.focal_translate_y = None;
        }
        self.drop_reset_if_idle();

        // Clamp the total, not the raw multiplier: backing off a pinch past
        // a bound immediately reduces scale again instead of sticking.
        if total_scale >= self.config.min_scale && total_scale <= self.config.max_scale {
            self.state.pinch_scale = new_pinch_scale;
        } else {
            let clamped_total = self.config.clamp_scale(total_scale);
            self.state.pinch_scale = clamped_total / self.state.offset_scale;
        }

        // Re-anchor only when the focal point is fresh or has stayed put.
        // A focal point drifting across frames is reporting noise; chasing
        // it makes the zoom center jitter.
        let focal_is_stable = (focal_x - self.state.focal.x).abs() < FOCAL_DRIFT_TOLERANCE
            && (focal_y - self.state.focal.y).abs() < FOCAL_DRIFT_TOLERANCE;
        if self.state.new_pinch_session || focal_is_stable {
            let state = &mut self.state;
            state.focal_translate_x = focal_x / state.offset_scale
                - state.translate_x / state.offset_scale
                - state.after_pinch_translate_x
                - state.center_of_view.x / state.offset_scale;
            state.focal_translate_y = focal_y / state.offset_scale
                - state.translate_y / state.offset_scale
                - state.after_pinch_translate_y
                - state.center_of_view.y / state.offset_scale;
            state.focal = Point::new(focal_x, focal_y);
            state.new_pinch_session = false;
        }
    }

    pub fn on_pinch_end(&mut self) {
        if !self.state.is_activated {
            return;
        }
        if !self.apply_reset_policy(EndingGesture::Pinch) {
            self.commit_pinch();
        }
    }

    pub fn on_double_tap(&mut self) {
        if !self.state.is_activated {
            return;
        }
        self.apply_reset_policy(EndingGesture::DoubleTap);
    }

    /// Advance any reset transition by `dt` seconds. Returns true while
    /// fields are still animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(reset) = self.reset.as_mut() else {
            return false;
        };
        let state = &mut self.state;

        advance(&mut reset.translate_x, &mut state.translate_x, dt);
        advance(&mut reset.translate_y, &mut state.translate_y, dt);
        advance(&mut reset.offset_scale, &mut state.offset_scale, dt);
        advance(&mut reset.pinch_scale, &mut state.pinch_scale, dt);
        advance(
            &mut reset.after_pinch_translate_x,
            &mut state.after_pinch_translate_x,
            dt,
        );
        advance(
            &mut reset.after_pinch_translate_y,
            &mut state.after_pinch_translate_y,
            dt,
        );
        advance(
            &mut reset.focal_translate_x,
            &mut state.focal_translate_x,
            dt,
        );
        advance(
            &mut reset.focal_translate_y,
            &mut state.focal_translate_y,
            dt,
        );

        if reset.is_idle() {
            self.reset = None;
            log::debug!("reset transition settled");
            false
        } else {
            true
        }
    }

    /// Evaluate the configured reset triggers for a gesture that just
    /// ended. Returns true when a reset was started.
    fn apply_reset_policy(&mut self, ending: EndingGesture) -> bool {
        let fired = match ending {
            EndingGesture::DoubleTap => self.config.resets_on(ResetTrigger::DoubleTap),
            EndingGesture::Pan | EndingGesture::Pinch => {
                if self.config.resets_on(ResetTrigger::Release) {
                    true
                } else if self.config.resets_on(ResetTrigger::ReleaseIfScaleLessThan1) {
                    self.state.total_scale() < 1.0
                } else {
                    false
                }
            }
        };

        if fired {
            self.begin_reset();
        }
        fired
    }

    /// Start (or re-aim) the animated transition of every pose field back
    /// to identity. The activation latch is restored immediately.
    fn begin_reset(&mut self) {
        self.state.is_activated = !self.config.activate_only_after_pinch;

        let reset = self.reset.get_or_insert_with(ResetAnimation::default);
        let state = &self.state;
        aim(&mut reset.translate_x, state.translate_x, 0.0);
        aim(&mut reset.translate_y, state.translate_y, 0.0);
        aim(
            &mut reset.offset_scale,
            state.offset_scale,
            self.config.initial_scale(),
        );
        aim(&mut reset.pinch_scale, state.pinch_scale, 1.0);
        aim(
            &mut reset.after_pinch_translate_x,
            state.after_pinch_translate_x,
            0.0,
        );
        aim(
            &mut reset.after_pinch_translate_y,
            state.after_pinch_translate_y,
            0.0,
        );
        aim(
            &mut reset.focal_translate_x,
            state.focal_translate_x,
            0.0,
        );
        aim(
            &mut reset.focal_translate_y,
            state.focal_translate_y,
            0.0,
        );

        log::debug!("reset to identity begun");
    }

    /// Fold the finished pinch into committed state: the focal-anchored
    /// scale becomes an equivalent translate+scale pair, so the rendered
    /// matrix is unchanged once `pinch_scale` returns to 1.
    fn commit_pinch(&mut self) {
        if let Some(reset) = self.reset.as_mut() {
            reset.offset_scale = None;
            reset.pinch_scale = None;
            reset.after_pinch_translate_x = None;
            reset.after_pinch_translate_y = None;
            reset.focal_translate_x = None;
            reset.focal_translate_y = None;
        }
        self.drop_reset_if_idle();

        let state = &mut self.state;
        let final_scale = self
            .config
            .clamp_scale(state.offset_scale * state.pinch_scale);

        state.offset_scale = final_scale;
        state.after_pinch_translate_x = state.after_pinch_translate_x / state.pinch_scale
            + (-state.focal_translate_x + state.focal_translate_x / state.pinch_scale);
        state.after_pinch_translate_y = state.after_pinch_translate_y / state.pinch_scale
            + (-state.focal_translate_y + state.focal_translate_y / state.pinch_scale);
        state.pinch_scale = 1.0;
        state.focal_translate_x = 0.0;
        state.focal_translate_y = 0.0;
    }

    fn drop_reset_if_idle(&mut self) {
        if self.reset.as_ref().is_some_and(ResetAnimation::is_idle) {
            self.reset = None;
        }
    }
}

impl Default for PinchZoomEngine {
    fn default() -> Self {
        Self::new(PinchZoomConfig::default())
    }
}
