// pinchzoom-ui/src/components/pinch_zoom_view.rs
use leptos::*;
use pinchzoom_core::PinchZoomConfig;

use crate::hooks::use_pinch_zoom;

/// Wraps arbitrary children in a pinch/pan/double-tap interaction surface.
///
/// The outer element owns the pointer listeners and the layout measurement;
/// the inner element carries the composited transform, so the hit area
/// stays put while the content scales.
///
/// # Example
///
/// ```rust,no_run
/// use leptos::*;
/// use pinchzoom_ui::{PinchZoomView, PinchZoomConfig, ResetTrigger};
///
/// #[component]
/// pub fn Photo() -> impl IntoView {
///     let config = PinchZoomConfig {
///         max_scale: 8.0,
///         reset_on: vec![ResetTrigger::DoubleTap],
///         ..Default::default()
///     };
///     view! {
///         <PinchZoomView config=config>
///             <img src="photo.jpg" />
///         </PinchZoomView>
///     }
/// }
/// ```
#[component]
pub fn PinchZoomView(
    /// Scale bounds, reset triggers, and activation gating.
    #[prop(optional)]
    config: PinchZoomConfig,
    children: Children,
) -> impl IntoView {
    let wrapper_ref = create_node_ref::<html::Div>();
    let handle = use_pinch_zoom(wrapper_ref, config);
    let transform = handle.transform_css;

    // touch-action: none keeps the browser from claiming the gestures for
    // scrolling and native page zoom.
    view! {
        <div node_ref=wrapper_ref style="touch-action: none; overflow: hidden;">
            <div style=move || {
                format!("transform: {}; transform-origin: 0 0;", transform.get())
            }>{children()}</div>
        </div>
    }
}
