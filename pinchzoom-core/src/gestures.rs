//! Gesture recognition over raw pointer samples.
//!
//! [`GestureArena`] is an explicit dispatcher: every pointer sample is
//! fanned out to pan, pinch, and double-tap recognizers, and the typed
//! events they produce come back in one ordered batch. Pan and pinch
//! recognize simultaneously (a two-finger drag both pans and scales); the
//! engine keeps their state disjoint, so the batch order is fixed but not
//! observable.
//!
//! Timestamps are supplied by the caller (milliseconds, any monotonic
//! origin), which keeps recognition deterministic and testable.

use crate::events::GestureEvent;
use crate::points::Point;

/// Movement beyond this distance disqualifies a press as a tap, and two
/// taps further apart than this are not a double tap.
const TAP_SLOP_PX: f64 = 10.0;
/// A press held longer than this is not a tap.
const TAP_MAX_DURATION_MS: f64 = 250.0;
/// Maximum pause between a tap's release and the next press for the pair
/// to count as a double tap.
const DOUBLE_TAP_INTERVAL_MS: f64 = 300.0;
/// Pointer spans below this produce no scale ratio; the frame only
/// re-baselines.
const MIN_SPAN_PX: f64 = 1.0;

/// One raw pointer sample, element-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: f64,
}

impl PointerInput {
    pub fn new(id: i64, x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self {
            id,
            x,
            y,
            timestamp_ms,
        }
    }

    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug)]
struct TrackedPointer {
    id: i64,
    position: Point,
}

#[derive(Clone, Copy, Debug)]
struct TapCandidate {
    press: Point,
    pressed_at_ms: f64,
    moved_beyond_slop: bool,
}

#[derive(Clone, Copy, Debug)]
struct CompletedTap {
    position: Point,
    released_at_ms: f64,
}

/// Dispatcher plus recognizer state for one wrapped element.
#[derive(Default)]
pub struct GestureArena {
    pointers: Vec<TrackedPointer>,
    last_centroid: Point,
    last_span: f64,
    tap_candidate: Option<TapCandidate>,
    previous_tap: Option<CompletedTap>,
}

impl GestureArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pointers currently down.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_down(&mut self, input: PointerInput) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        if let Some(existing) = self.pointers.iter_mut().find(|p| p.id == input.id) {
            log::warn!("pointer {} went down while already tracked", input.id);
            existing.position = input.position();
            self.rebaseline();
            return events;
        }

        self.pointers.push(TrackedPointer {
            id: input.id,
            position: input.position(),
        });

        match self.pointers.len() {
            1 => {
                events.push(GestureEvent::PanStart);
                self.tap_candidate = Some(TapCandidate {
                    press: input.position(),
                    pressed_at_ms: input.timestamp_ms,
                    moved_beyond_slop: false,
                });
            }
            2 => {
                events.push(GestureEvent::PinchStart);
                // A second finger rules out tap recognition entirely.
                self.tap_candidate = None;
                self.previous_tap = None;
            }
            _ => {}
        }

        // Pointer count changed: re-anchor centroid and span so the next
        // move is measured against the new constellation, not against the
        // pre-touch one.
        self.rebaseline();
        events
    }

    pub fn pointer_move(&mut self, input: PointerInput) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        let Some(pointer) = self.pointers.iter_mut().find(|p| p.id == input.id) else {
            log::warn!("ignoring move for unknown pointer {}", input.id);
            return events;
        };
        pointer.position = input.position();

        if let Some(candidate) = self.tap_candidate.as_mut() {
            if candidate.press.distance_to(&input.position()) > TAP_SLOP_PX {
                candidate.moved_beyond_slop = true;
            }
        }

        let centroid = self.centroid();
        let change_x = centroid.x - self.last_centroid.x;
        let change_y = centroid.y - self.last_centroid.y;
        if change_x != 0.0 || change_y != 0.0 {
            events.push(GestureEvent::PanChange { change_x, change_y });
        }
        self.last_centroid = centroid;

        if self.pointers.len() >= 2 {
            let span = self.span(centroid);
            if self.last_span > MIN_SPAN_PX && span > MIN_SPAN_PX {
                events.push(GestureEvent::PinchChange {
                    number_of_pointers: self.pointers.len() as u32,
                    scale_change: span / self.last_span,
                    focal_x: centroid.x,
                    focal_y: centroid.y,
                });
            }
            self.last_span = span;
        }

        events
    }

    pub fn pointer_up(&mut self, input: PointerInput) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        let Some(index) = self.pointers.iter().position(|p| p.id == input.id) else {
            log::warn!("ignoring release of unknown pointer {}", input.id);
            return events;
        };

        if self.pointers.len() == 1 {
            if let Some(tap) = self.finish_tap(&input) {
                events.push(tap);
            }
        }
        self.tap_candidate = None;

        self.pointers.remove(index);
        match self.pointers.len() {
            1 => events.push(GestureEvent::PinchEnd),
            0 => events.push(GestureEvent::PanEnd),
            _ => {}
        }

        self.rebaseline();
        events
    }

    /// Cancellation ends gestures without tap recognition.
    pub fn pointer_cancel(&mut self, id: i64) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        let Some(index) = self.pointers.iter().position(|p| p.id == id) else {
            return events;
        };
        self.tap_candidate = None;

        self.pointers.remove(index);
        match self.pointers.len() {
            1 => events.push(GestureEvent::PinchEnd),
            0 => events.push(GestureEvent::PanEnd),
            _ => {}
        }

        self.rebaseline();
        events
    }

    /// Close out a single-pointer press: if it qualifies as a tap, pair it
    /// with a recent previous tap into a double tap.
    fn finish_tap(&mut self, input: &PointerInput) -> Option<GestureEvent> {
        let candidate = self.tap_candidate.take()?;
        let duration = input.timestamp_ms - candidate.pressed_at_ms;
        if candidate.moved_beyond_slop || duration > TAP_MAX_DURATION_MS {
            self.previous_tap = None;
            return None;
        }

        let tap = CompletedTap {
            position: input.position(),
            released_at_ms: input.timestamp_ms,
        };

        if let Some(previous) = self.previous_tap.take() {
            let pause = candidate.pressed_at_ms - previous.released_at_ms;
            let nearby = previous.position.distance_to(&tap.position) <= TAP_SLOP_PX;
            if pause <= DOUBLE_TAP_INTERVAL_MS && nearby {
                return Some(GestureEvent::DoubleTap);
            }
        }

        self.previous_tap = Some(tap);
        None
    }

    fn centroid(&self) -> Point {
        if self.pointers.is_empty() {
            return Point::default();
        }
        let n = self.pointers.len() as f64;
        let sum_x: f64 = self.pointers.iter().map(|p| p.position.x).sum();
        let sum_y: f64 = self.pointers.iter().map(|p| p.position.y).sum();
        Point::new(sum_x / n, sum_y / n)
    }

    /// Mean distance of the pointers from their centroid.
    fn span(&self, centroid: Point) -> f64 {
        if self.pointers.len() < 2 {
            return 0.0;
        }
        let n = self.pointers.len() as f64;
        let total: f64 = self
            .pointers
            .iter()
            .map(|p| centroid.distance_to(&p.position))
            .sum();
        total / n
    }

    fn rebaseline(&mut self) {
        self.last_centroid = self.centroid();
        self.last_span = self.span(self.last_centroid);
    }
}
