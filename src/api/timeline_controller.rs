use tracing::debug;

use crate::core::{Layout, TimelineRect};
use crate::error::{DiaryError, DiaryResult};
use crate::extensions::DiaryEvent;
use crate::render::Renderer;

use super::DiaryEngine;

impl<R: Renderer> DiaryEngine<R> {
    #[must_use]
    pub fn active_timeline_key(&self) -> &str {
        self.manager.active_key()
    }

    #[must_use]
    pub fn active_timeline_index(&self) -> usize {
        self.manager.active_index()
    }

    /// Navigates to timeline `key`. Records of every timeline are kept.
    pub fn set_active_timeline(&mut self, key: &str) -> DiaryResult<()> {
        if key == self.manager.active_key() {
            return Ok(());
        }
        self.cancel_interactions()?;
        self.manager.set_active(key)?;
        self.selection = None;
        self.keyboard.reset();
        self.emit_event(DiaryEvent::ActiveTimelineChanged {
            index: self.manager.active_index(),
        });
        self.render()
    }

    pub fn set_active_timeline_index(&mut self, index: usize) -> DiaryResult<()> {
        let key = self
            .manager
            .modules()
            .nth(index)
            .map(|module| module.key().to_owned())
            .ok_or_else(|| DiaryError::UnknownTimeline(format!("#{index}")))?;
        self.set_active_timeline(&key)
    }

    /// Re-evaluates the layout for a new viewport width.
    ///
    /// A layout flip mid-resize cancels the gesture; the edge being dragged
    /// does not exist in the other layout.
    pub fn set_viewport_width(&mut self, width_px: f64) -> DiaryResult<Layout> {
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(DiaryError::InvalidData(
                "viewport width must be finite and > 0".to_owned(),
            ));
        }
        self.config.viewport_width_px = width_px;
        let layout = Layout::for_viewport_width(width_px, self.config.layout_breakpoint_px);
        if layout != self.layout {
            debug!(from = ?self.layout, to = ?layout, "layout changed");
            self.cancel_interactions()?;
            self.layout = layout;
            self.emit_event(DiaryEvent::LayoutChanged { layout });
            self.render()?;
        }
        Ok(layout)
    }

    /// Host-reported timeline geometry, refreshed after scroll or resize.
    pub fn set_timeline_rect(&mut self, rect: TimelineRect) -> DiaryResult<()> {
        if !rect.is_valid() {
            return Err(DiaryError::InvalidViewport {
                length: rect.length(self.layout.axis()),
            });
        }
        self.timeline_rect = rect;
        Ok(())
    }

    #[must_use]
    pub fn coverage_minutes(&self) -> u32 {
        self.manager.coverage()
    }

    #[must_use]
    pub fn is_timeline_full(&self) -> bool {
        self.manager.is_module_full()
    }

    #[must_use]
    pub fn meets_minimum_coverage(&self) -> bool {
        self.manager.meets_minimum_coverage()
    }

    /// Checks every timeline before submission; lists the ones still short.
    pub fn validate_all_timelines(&self) -> DiaryResult<()> {
        let missing = self.manager.modules_below_minimum();
        if missing.is_empty() {
            return Ok(());
        }
        Err(DiaryError::InvalidData(format!(
            "timelines below minimum coverage: {}",
            missing.join(", ")
        )))
    }
}
