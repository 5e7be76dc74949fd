use serde::{Deserialize, Serialize};

/// Typed gesture callbacks consumed by the transform engine.
///
/// Events are produced by the recognizers in [`crate::gestures`], but any
/// host with its own gesture system can construct them directly.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type")]
pub enum GestureEvent {
    /// A pan gesture began. Carries no data; pan deltas arrive with each
    /// change event.
    PanStart,

    /// Incremental pan movement since the previous change event.
    PanChange { change_x: f64, change_y: f64 },

    /// The pan gesture ended (all pointers lifted).
    PanEnd,

    /// A pinch gesture began (a second pointer landed).
    PinchStart,

    /// Incremental pinch movement since the previous change event.
    ///
    /// `scale_change` is the ratio of the current pointer span to the span
    /// at the previous change event, not an absolute scale. Events with
    /// fewer than two pointers are treated as a hold and ignored.
    PinchChange {
        number_of_pointers: u32,
        scale_change: f64,
        focal_x: f64,
        focal_y: f64,
    },

    /// The pinch gesture ended (pointer count dropped below two).
    PinchEnd,

    /// Two taps in quick succession on roughly the same spot.
    DoubleTap,
}
