// pinchzoom-ui/src/hooks/use_pinch_zoom.rs
//!
//! Wires DOM pointer events into the core engine and exposes the resulting
//! transform reactively.
//!
//! The engine and recognizer state live in non-reactive stored values; only
//! the derived matrix is a signal, so pointer storms re-render exactly one
//! style binding. Reset springs are driven from a requestAnimationFrame
//! loop that idles (early-returns) while no transition is in flight.

use leptos::*;
use leptos_use::use_raf_fn;
use pinchzoom_core::{GestureArena, GestureEvent, Mat3, PinchZoomConfig, PinchZoomEngine, PointerInput};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Clamp raf deltas so a backgrounded tab does not integrate one huge step.
const MAX_FRAME_DT_S: f64 = 0.1;

/// Handle returned by [`use_pinch_zoom`].
pub struct PinchZoomHandle {
    /// CSS transform for the content element. Apply together with
    /// `transform-origin: 0 0`; anchoring is baked into the matrix.
    pub transform_css: Signal<String>,
    /// The raw composited matrix, for hosts that render through canvas or
    /// WebGL instead of CSS.
    pub matrix: ReadSignal<Mat3>,
    /// Whether at least one pointer is currently down on the wrapper.
    pub is_interacting: Signal<bool>,
}

/// Pinch/pan/double-tap interaction for the element behind `target`.
///
/// Attaches pointer listeners and a one-shot measurement to the node once
/// it mounts. All gesture processing is synchronous; only reset transitions
/// animate, on the raf loop.
pub fn use_pinch_zoom(
    target: NodeRef<leptos::html::Div>,
    config: PinchZoomConfig,
) -> PinchZoomHandle {
    let engine = store_value(PinchZoomEngine::new(config));
    let arena = store_value(GestureArena::new());

    let (matrix, set_matrix) = create_signal(Mat3::identity());
    let (pointer_count, set_pointer_count) = create_signal(0usize);

    // Feed one batch of recognizer output through the engine, then publish
    // the derived matrix.
    let apply_events = move |events: Vec<GestureEvent>| {
        set_pointer_count.set(arena.with_value(|a| a.pointer_count()));
        if events.is_empty() {
            return;
        }
        engine.update_value(|e| {
            for event in events {
                e.handle(event);
            }
        });
        set_matrix.set(engine.with_value(|e| e.matrix()));
    };

    // Reset springs tick here; gestures never do. Idle frames return before
    // touching any signal.
    let _raf = use_raf_fn(move |args| {
        if !engine.with_value(|e| e.is_resetting()) {
            return;
        }
        let dt = (args.delta / 1000.0).min(MAX_FRAME_DT_S);
        engine.update_value(|e| {
            e.tick(dt);
        });
        set_matrix.set(engine.with_value(|e| e.matrix()));
    });

    // Set up measurement and pointer listeners when the node mounts.
    create_effect(move |_| {
        let Some(div_el) = target.get() else {
            return;
        };
        let element = div_el.unchecked_ref::<web_sys::HtmlElement>().clone();

        // One-shot layout measurement; scale operations anchor relative to
        // this center point.
        let rect = element.get_bounding_client_rect();
        engine.update_value(|e| e.set_center_of_view(rect.width(), rect.height()));

        let local_input = |el: &web_sys::HtmlElement, ev: &web_sys::PointerEvent| {
            let rect = el.get_bounding_client_rect();
            PointerInput::new(
                ev.pointer_id() as i64,
                ev.client_x() as f64 - rect.left(),
                ev.client_y() as f64 - rect.top(),
                ev.time_stamp(),
            )
        };

        let el = element.clone();
        let down_handler = Closure::wrap(Box::new(move |ev: web_sys::PointerEvent| {
            ev.prevent_default();
            // Keep receiving moves when the pointer leaves the element.
            let _ = el.set_pointer_capture(ev.pointer_id());
            let input = local_input(&el, &ev);
            let events = arena
                .try_update_value(|a| a.pointer_down(input))
                .unwrap_or_default();
            apply_events(events);
        }) as Box<dyn Fn(web_sys::PointerEvent)>);
        element
            .add_event_listener_with_callback(
                "pointerdown",
                down_handler.as_ref().unchecked_ref(),
            )
            .expect("should add pointerdown listener");
        down_handler.forget();

        let el = element.clone();
        let move_handler = Closure::wrap(Box::new(move |ev: web_sys::PointerEvent| {
            let input = local_input(&el, &ev);
            let events = arena
                .try_update_value(|a| a.pointer_move(input))
                .unwrap_or_default();
            apply_events(events);
        }) as Box<dyn Fn(web_sys::PointerEvent)>);
        element
            .add_event_listener_with_callback(
                "pointermove",
                move_handler.as_ref().unchecked_ref(),
            )
            .expect("should add pointermove listener");
        move_handler.forget();

        let el = element.clone();
        let up_handler = Closure::wrap(Box::new(move |ev: web_sys::PointerEvent| {
            let input = local_input(&el, &ev);
            let events = arena
                .try_update_value(|a| a.pointer_up(input))
                .unwrap_or_default();
            apply_events(events);
        }) as Box<dyn Fn(web_sys::PointerEvent)>);
        element
            .add_event_listener_with_callback("pointerup", up_handler.as_ref().unchecked_ref())
            .expect("should add pointerup listener");
        up_handler.forget();

        let cancel_handler = Closure::wrap(Box::new(move |ev: web_sys::PointerEvent| {
            let events = arena
                .try_update_value(|a| a.pointer_cancel(ev.pointer_id() as i64))
                .unwrap_or_default();
            apply_events(events);
        }) as Box<dyn Fn(web_sys::PointerEvent)>);
        element
            .add_event_listener_with_callback(
                "pointercancel",
                cancel_handler.as_ref().unchecked_ref(),
            )
            .expect("should add pointercancel listener");
        cancel_handler.forget();
    });

    PinchZoomHandle {
        transform_css: Signal::derive(move || matrix.get().to_css()),
        matrix,
        is_interacting: Signal::derive(move || pointer_count.get() > 0),
    }
}
