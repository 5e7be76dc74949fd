//! Wrapper configuration.
//!
//! All options are fixed for the lifetime of a wrapper instance; changing
//! them requires remounting with a new config.

use serde::{Deserialize, Serialize};

/// A condition that sends the pose back to identity when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResetTrigger {
    /// Reset whenever a pan or pinch gesture ends.
    Release,
    /// Reset when a double tap is recognized.
    DoubleTap,
    /// Reset on pan/pinch end, but only if total scale is below 1.
    ReleaseIfScaleLessThan1,
}

/// Options accepted when constructing a pinch-zoom wrapper.
///
/// `min_scale` must be strictly positive; the engine divides by the
/// committed scale and relies on the caller to supply sane bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchZoomConfig {
    /// Lower clamp for total scale.
    pub min_scale: f64,
    /// Upper clamp for total scale.
    pub max_scale: f64,
    /// Conditions that reset the pose to identity.
    pub reset_on: Vec<ResetTrigger>,
    /// When true, gestures have no effect until a pinch first drives
    /// total scale above 1.
    pub activate_only_after_pinch: bool,
}

impl Default for PinchZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.25,
            max_scale: 20.0,
            reset_on: Vec::new(),
            activate_only_after_pinch: false,
        }
    }
}

impl PinchZoomConfig {
    /// Whether the given trigger is configured.
    pub fn resets_on(&self, trigger: ResetTrigger) -> bool {
        self.reset_on.contains(&trigger)
    }

    /// The committed scale a fresh or reset wrapper starts at: 1, pulled
    /// into the configured bounds.
    pub fn initial_scale(&self) -> f64 {
        1.0_f64.clamp(self.min_scale, self.max_scale)
    }

    /// Clamp a total scale to the configured bounds.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
