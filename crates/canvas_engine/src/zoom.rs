//! Canvas zoom level

use serde::{Deserialize, Serialize};

/// Zoom factor for the canvas view, kept in [`Zoom::MIN`]..=[`Zoom::MAX`]
/// and snapped to [`Zoom::STEP`] increments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zoom(f64);

impl Zoom {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 2.0;
    pub const STEP: f64 = 0.1;

    /// Create a zoom level, clamping and snapping the value.
    /// Non-finite input resets to 1.0.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let snapped = (value / Self::STEP).round() * Self::STEP;
        // Round away float noise such as 1.2000000000000002
        let snapped = (snapped * 10.0).round() / 10.0;
        Self(snapped.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}
