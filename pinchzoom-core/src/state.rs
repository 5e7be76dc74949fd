use crate::config::PinchZoomConfig;
use crate::points::Point;

/// The mutable pose of one wrapped element.
///
/// One instance exists per wrapper, created on mount and mutated only by
/// gesture callbacks and reset animations. The split between `offset_scale`
/// (committed by completed pinches) and `pinch_scale` (transient multiplier
/// for the pinch in flight) is what lets clamping operate on the product of
/// the two without ever rewriting committed state mid-gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformState {
    /// Accumulated pan offset. Unbounded; only scale is clamped.
    pub translate_x: f64,
    pub translate_y: f64,

    /// Scale committed by completed pinches. Always within the configured
    /// bounds while no pinch is in flight.
    pub offset_scale: f64,

    /// Transient multiplier applied during an in-progress pinch; 1.0 when
    /// idle.
    pub pinch_scale: f64,

    /// Translation folded out of completed pinches, in post-`offset_scale`
    /// coordinates.
    pub after_pinch_translate_x: f64,
    pub after_pinch_translate_y: f64,

    /// Offset that re-anchors the in-flight scale to the pinch focal point.
    /// Zero whenever no pinch is in flight.
    pub focal_translate_x: f64,
    pub focal_translate_y: f64,

    /// Last recorded focal point, element-local.
    pub focal: Point,

    /// Half-extent of the element, set once after layout.
    pub center_of_view: Point,

    /// Whether gestures currently affect the pose.
    pub is_activated: bool,

    /// True from pinch start until the focal point is first recorded.
    pub new_pinch_session: bool,
}

impl TransformState {
    /// Identity pose for the given configuration.
    pub fn new(config: &PinchZoomConfig) -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            offset_scale: config.initial_scale(),
            pinch_scale: 1.0,
            after_pinch_translate_x: 0.0,
            after_pinch_translate_y: 0.0,
            focal_translate_x: 0.0,
            focal_translate_y: 0.0,
            focal: Point::default(),
            center_of_view: Point::default(),
            is_activated: !config.activate_only_after_pinch,
            new_pinch_session: true,
        }
    }

    /// Effective magnification at this instant.
    pub fn total_scale(&self) -> f64 {
        self.offset_scale * self.pinch_scale
    }
}
