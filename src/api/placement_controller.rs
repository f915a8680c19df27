use tracing::{debug, trace};

use crate::core::{ActivityRecord, PointerPosition, SelectionMode, SelectionState};
use crate::error::{DiaryError, DiaryResult};
use crate::extensions::DiaryEvent;
use crate::interaction::{
    ClickTarget, FlashTarget, InvalidFlash, PlacementOutcome, PlacementRequest,
};
use crate::render::Renderer;

use super::DiaryEngine;

impl<R: Renderer> DiaryEngine<R> {
    #[must_use]
    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    /// Accepts the chooser's pick for the next placement.
    ///
    /// Multiple-choice selections are refused on single-choice timelines.
    pub fn set_selection(&mut self, selection: SelectionState) -> DiaryResult<()> {
        if selection.is_empty() {
            return Err(DiaryError::InvalidData(
                "selection must name at least one activity".to_owned(),
            ));
        }
        if selection.is_multiple() && self.manager.active().mode() == SelectionMode::SingleChoice {
            return Err(DiaryError::InvalidData(format!(
                "timeline `{}` only accepts single-choice selections",
                self.manager.active_key()
            )));
        }
        trace!(activity = %selection.label(), "selection set");
        self.selection = Some(selection);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Handles a click on the timeline at client coordinates `pointer`.
    pub fn pointer_click(
        &mut self,
        pointer: PointerPosition,
        target: ClickTarget,
    ) -> DiaryResult<PlacementOutcome> {
        let percent = self
            .timeline_rect
            .pointer_to_percent(pointer, self.layout.axis())?;
        self.place_at_percent(percent, target)
    }

    /// Click-to-place at `percent` along the active time axis.
    pub fn place_at_percent(
        &mut self,
        percent: f64,
        target: ClickTarget,
    ) -> DiaryResult<PlacementOutcome> {
        self.feedback.cancel();
        let request = PlacementRequest { percent, target };
        let outcome = self
            .pointer
            .place(&mut self.manager, self.selection.as_ref(), request)?;
        match outcome {
            PlacementOutcome::Placed { id, span } => {
                self.selection = None;
                self.emit_event(DiaryEvent::ActivityPlaced { id, span });
            }
            PlacementOutcome::Rejected {
                candidate: Some(span),
                ..
            } => {
                self.feedback.show(InvalidFlash {
                    target: FlashTarget::Candidate,
                    span,
                });
            }
            PlacementOutcome::Rejected { .. } => {}
        }
        self.render()?;
        Ok(outcome)
    }

    /// Removes the most recently placed activity on the active timeline.
    pub fn undo(&mut self) -> DiaryResult<Option<ActivityRecord>> {
        self.cancel_interactions()?;
        let popped = self.manager.undo();
        if let Some(record) = &popped {
            self.emit_event(DiaryEvent::ActivityRemoved { id: record.id });
        }
        self.render()?;
        Ok(popped)
    }

    /// Empties the active timeline. Other timelines are untouched.
    pub fn clear_active_timeline(&mut self) -> DiaryResult<usize> {
        self.cancel_interactions()?;
        let removed = self.manager.clear_active();
        self.emit_event(DiaryEvent::TimelineCleared { removed });
        self.render()?;
        Ok(removed)
    }

    /// Advances transient feedback timers. Returns `true` when a flash expired
    /// and the frame was redrawn.
    pub fn step_feedback(&mut self, delta_seconds: f64) -> DiaryResult<bool> {
        if !delta_seconds.is_finite() {
            return Err(DiaryError::InvalidData(
                "feedback step must be finite".to_owned(),
            ));
        }
        if self.feedback.step(delta_seconds) {
            self.render()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Drops any live gesture so the store is back at a committed state.
    pub(super) fn cancel_interactions(&mut self) -> DiaryResult<()> {
        self.feedback.cancel();
        if let Some(span) = self.pointer.cancel_resize(&mut self.manager)? {
            debug!(start = span.start, end = span.end, "cancelled resize");
            self.auto_scroll.set_resizing(false);
        }
        self.keyboard.abandon_selection();
        Ok(())
    }
}
