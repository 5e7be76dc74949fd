mod components;
mod hooks;

pub use components::PinchZoomView;
pub use hooks::{use_pinch_zoom, PinchZoomHandle};

// Re-export the configuration surface so consumers rarely need to depend on
// the core crate directly.
pub use pinchzoom_core::{Mat3, PinchZoomConfig, ResetTrigger};

/// Install the console logger and panic hook. Call once from the host
/// application's entry point before mounting any wrapper.
pub fn init_console_logging() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
}
