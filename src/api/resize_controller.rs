use crate::core::{ActivityId, Layout, PhysicalEdge, PointerPosition, TimeSpan};
use crate::error::DiaryResult;
use crate::extensions::DiaryEvent;
use crate::interaction::{
    FlashTarget, InteractionMode, InvalidFlash, ResizeEnd, ResizeSession, ResizeStep,
};
use crate::render::Renderer;

use super::DiaryEngine;

impl<R: Renderer> DiaryEngine<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.pointer.mode()
    }

    #[must_use]
    pub fn resize_session(&self) -> Option<ResizeSession> {
        self.pointer.session()
    }

    /// Grabs one edge of block `id`. Only the current layout's edges resize.
    pub fn resize_start(&mut self, id: ActivityId, edge: PhysicalEdge) -> DiaryResult<ResizeSession> {
        self.feedback.cancel();
        self.keyboard.abandon_selection();
        let session = self
            .pointer
            .begin_resize(&self.manager, id, edge, self.layout)?;
        self.auto_scroll.set_resizing(self.layout == Layout::Vertical);
        self.emit_event(DiaryEvent::ResizeStarted { id });
        self.render()?;
        Ok(session)
    }

    /// Pointer moved while an edge is held.
    pub fn resize_move(&mut self, pointer: PointerPosition) -> DiaryResult<ResizeStep> {
        if self.layout == Layout::Vertical {
            self.auto_scroll.push_pointer_y(pointer.y);
        }
        let percent = self
            .timeline_rect
            .pointer_to_percent(pointer, self.layout.axis())?;
        self.resize_to_percent(percent)
    }

    /// Moves the held edge to `percent` along the active time axis.
    pub fn resize_to_percent(&mut self, percent: f64) -> DiaryResult<ResizeStep> {
        let step = self.pointer.resize_to(&mut self.manager, percent)?;
        match step {
            ResizeStep::Resized(span) => {
                self.feedback.cancel();
                if let Some(session) = self.pointer.session() {
                    self.emit_event(DiaryEvent::ActivityResized {
                        id: session.id,
                        span,
                    });
                }
                self.render()?;
            }
            ResizeStep::Reverted { span, .. } => {
                if let Some(session) = self.pointer.session() {
                    self.feedback.show(InvalidFlash {
                        target: FlashTarget::Activity(session.id),
                        span,
                    });
                }
                self.render()?;
            }
            ResizeStep::Unchanged(_) => {}
        }
        Ok(step)
    }

    /// Releases the held edge and commits or rolls back the gesture.
    pub fn resize_end(&mut self) -> DiaryResult<ResizeEnd> {
        let id = self.pointer.session().map(|session| session.id);
        let end = self.pointer.end_resize(&mut self.manager)?;
        self.auto_scroll.set_resizing(false);
        if let Some(id) = id {
            self.emit_event(DiaryEvent::ResizeEnded {
                id,
                committed: matches!(end, ResizeEnd::Committed(_)),
            });
        }
        self.render()?;
        Ok(end)
    }

    /// Pointer capture was lost: restore the geometry from before the grab.
    pub fn resize_cancel(&mut self) -> DiaryResult<Option<TimeSpan>> {
        let id = self.pointer.session().map(|session| session.id);
        let restored = self.pointer.cancel_resize(&mut self.manager)?;
        self.auto_scroll.set_resizing(false);
        if let (Some(id), Some(span)) = (id, restored) {
            self.emit_event(DiaryEvent::ActivityResized { id, span });
            self.emit_event(DiaryEvent::ResizeEnded {
                id,
                committed: false,
            });
            self.render()?;
        }
        Ok(restored)
    }

    /// Polled by the auto-scroll collaborator each animation frame.
    ///
    /// Returns the scroll delta in px for the host to apply; the host then
    /// reports the moved timeline rect through `set_timeline_rect`.
    #[must_use]
    pub fn auto_scroll_step(&self, delta_seconds: f64, viewport_height: f64) -> f64 {
        self.auto_scroll.step(delta_seconds, viewport_height)
    }

    #[must_use]
    pub fn is_auto_scroll_active(&self) -> bool {
        self.auto_scroll.is_resizing()
    }
}
