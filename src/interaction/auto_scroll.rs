use serde::{Deserialize, Serialize};

/// Tuning for edge auto-scroll while resizing in the vertical layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoScrollConfig {
    /// Distance from the viewport edge, in px, where scrolling kicks in.
    pub edge_band_px: f64,
    /// Scroll speed with the pointer at the very edge.
    pub max_speed_px_per_sec: f64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            edge_band_px: 60.0,
            max_speed_px_per_sec: 600.0,
        }
    }
}

/// State the auto-scroll collaborator polls: a resizing flag and the latest
/// pointer Y pushed by the resize handler.
///
/// Scrolling only moves the viewport. Minutes keep deriving from the pointer
/// relative to the timeline rect the host reports after each scroll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutoScrollState {
    config: AutoScrollConfig,
    resizing: bool,
    pointer_y: Option<f64>,
}

impl AutoScrollState {
    #[must_use]
    pub fn new(config: AutoScrollConfig) -> Self {
        Self {
            config,
            resizing: false,
            pointer_y: None,
        }
    }

    #[must_use]
    pub fn config(self) -> AutoScrollConfig {
        self.config
    }

    #[must_use]
    pub fn is_resizing(self) -> bool {
        self.resizing
    }

    #[must_use]
    pub fn pointer_y(self) -> Option<f64> {
        self.pointer_y
    }

    pub fn set_resizing(&mut self, resizing: bool) {
        self.resizing = resizing;
        if !resizing {
            self.pointer_y = None;
        }
    }

    pub fn push_pointer_y(&mut self, y: f64) {
        if y.is_finite() {
            self.pointer_y = Some(y);
        }
    }

    /// Scroll delta in px for this frame; negative scrolls up.
    #[must_use]
    pub fn step(self, delta_seconds: f64, viewport_height: f64) -> f64 {
        let Some(y) = self.pointer_y else {
            return 0.0;
        };
        if !self.resizing || !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return 0.0;
        }
        let band = self.config.edge_band_px;
        if band <= 0.0 || viewport_height <= 0.0 {
            return 0.0;
        }
        let speed = self.config.max_speed_px_per_sec * delta_seconds;
        if y < band {
            -speed * ((band - y) / band).min(1.0)
        } else if y > viewport_height - band {
            speed * ((y - (viewport_height - band)) / band).min(1.0)
        } else {
            0.0
        }
    }
}
