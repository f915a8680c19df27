use serde::{Deserialize, Serialize};

use crate::core::TimelineRect;
use crate::interaction::AutoScrollConfig;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can ship it alongside the timeline definitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiaryEngineConfig {
    pub viewport_width_px: f64,
    /// Viewports narrower than this use the vertical layout.
    #[serde(default = "default_layout_breakpoint_px")]
    pub layout_breakpoint_px: f64,
    #[serde(default = "default_invalid_flash_seconds")]
    pub invalid_flash_seconds: f64,
    #[serde(default)]
    pub auto_scroll: AutoScrollConfig,
    /// Initial timeline geometry; hosts update it on scroll and resize.
    #[serde(default = "default_timeline_rect")]
    pub timeline_rect: TimelineRect,
}

impl DiaryEngineConfig {
    #[must_use]
    pub fn new(viewport_width_px: f64) -> Self {
        Self {
            viewport_width_px,
            layout_breakpoint_px: default_layout_breakpoint_px(),
            invalid_flash_seconds: default_invalid_flash_seconds(),
            auto_scroll: AutoScrollConfig::default(),
            timeline_rect: default_timeline_rect(),
        }
    }

    #[must_use]
    pub fn with_layout_breakpoint(mut self, breakpoint_px: f64) -> Self {
        self.layout_breakpoint_px = breakpoint_px;
        self
    }

    #[must_use]
    pub fn with_invalid_flash_seconds(mut self, seconds: f64) -> Self {
        self.invalid_flash_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_auto_scroll(mut self, auto_scroll: AutoScrollConfig) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }

    #[must_use]
    pub fn with_timeline_rect(mut self, rect: TimelineRect) -> Self {
        self.timeline_rect = rect;
        self
    }
}

fn default_layout_breakpoint_px() -> f64 {
    1440.0
}

fn default_invalid_flash_seconds() -> f64 {
    0.4
}

fn default_timeline_rect() -> TimelineRect {
    TimelineRect::new(0.0, 0.0, 1440.0, 1440.0)
}
