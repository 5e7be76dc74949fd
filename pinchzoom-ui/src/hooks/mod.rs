mod use_pinch_zoom;

pub use use_pinch_zoom::{use_pinch_zoom, PinchZoomHandle};
