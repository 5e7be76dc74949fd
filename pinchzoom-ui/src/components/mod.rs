mod pinch_zoom_view;

pub use pinch_zoom_view::PinchZoomView;
