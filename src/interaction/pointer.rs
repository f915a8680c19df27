use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{
    ActivityId, Layout, MINUTE_INCREMENT, PhysicalEdge, PlacementRejection, PlacementVerdict,
    SelectionState, SpanEdge, TIMELINE_END, TimeSpan, TimelineManager, position_to_minutes,
};
use crate::error::{DiaryError, DiaryResult};

use super::InteractionMode;

/// What the pointer landed on when the timeline was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    Empty,
    Block(ActivityId),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    /// Click position along the layout's time axis, in percent.
    pub percent: f64,
    pub target: ClickTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementOutcome {
    Placed { id: ActivityId, span: TimeSpan },
    /// `candidate` is the span the click would have produced, when one was
    /// computed, so the host can flash it.
    Rejected {
        reason: PlacementRejection,
        candidate: Option<TimeSpan>,
    },
}

/// Live edge-drag gesture on one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeSession {
    pub id: ActivityId,
    pub edge: PhysicalEdge,
    pub bound: SpanEdge,
    pub layout: Layout,
    /// Geometry when the edge was grabbed; restored on cancel.
    pub grab: TimeSpan,
    /// Most recent span that passed validation.
    pub last_good: TimeSpan,
    /// Whether the module passed `check_invariants` at grab time; release
    /// only re-validates modules that did.
    pub consistent_at_grab: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeStep {
    Unchanged(TimeSpan),
    Resized(TimeSpan),
    /// The move was refused; the block keeps `span`.
    Reverted {
        span: TimeSpan,
        reason: PlacementRejection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEnd {
    Committed(TimeSpan),
    RolledBack(TimeSpan),
}

/// Pointer state machine: `Idle` or `Resizing`. Click placement is a single
/// transition from `Idle` and never leaves a session behind.
///
/// One resize algorithm serves both layouts; the layout only decides which
/// physical edges map to the start and end bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerInteraction {
    session: Option<ResizeSession>,
}

impl PointerInteraction {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.session.is_some() {
            InteractionMode::Resizing
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<ResizeSession> {
        self.session
    }

    /// Click-to-place with the fixed 10-minute default length.
    pub fn place(
        &mut self,
        manager: &mut TimelineManager,
        selection: Option<&SelectionState>,
        request: PlacementRequest,
    ) -> DiaryResult<PlacementOutcome> {
        let rejected = |reason| PlacementOutcome::Rejected {
            reason,
            candidate: None,
        };
        if !request.percent.is_finite() {
            return Err(DiaryError::InvalidData(
                "click percent must be finite".to_owned(),
            ));
        }
        let Some(selection) = selection else {
            return Ok(rejected(PlacementRejection::NoSelection));
        };
        if self.session.is_some() {
            return Err(DiaryError::InvalidData(
                "cannot place while a resize is in progress".to_owned(),
            ));
        }
        if let ClickTarget::Block(_) = request.target {
            return Ok(rejected(PlacementRejection::InsideExistingBlock));
        }
        if manager.is_module_full() {
            return Ok(rejected(PlacementRejection::ModuleFull));
        }
        if request.percent >= 100.0 {
            return Ok(rejected(PlacementRejection::PastTimelineEnd));
        }

        // Clicks in the back half of the last slot round up to 04:00(+1).
        let start = position_to_minutes(request.percent)?.min(TIMELINE_END - MINUTE_INCREMENT);
        let span = TimeSpan::new(start, start + MINUTE_INCREMENT);
        match manager.place_activity(selection, span) {
            Ok(id) => Ok(PlacementOutcome::Placed { id, span }),
            Err(reason) => {
                trace!(?reason, start = span.start, "click placement rejected");
                Ok(PlacementOutcome::Rejected {
                    reason,
                    candidate: Some(span),
                })
            }
        }
    }

    /// Grabs `edge` of block `id`. The edge must be exposed by `layout`.
    pub fn begin_resize(
        &mut self,
        manager: &TimelineManager,
        id: ActivityId,
        edge: PhysicalEdge,
        layout: Layout,
    ) -> DiaryResult<ResizeSession> {
        if self.session.is_some() {
            return Err(DiaryError::InvalidData(
                "a resize is already in progress".to_owned(),
            ));
        }
        let bound = layout.logical_edge(edge).ok_or_else(|| {
            DiaryError::InvalidData(format!("edge {edge:?} is not resizable in {layout:?} layout"))
        })?;
        let record = manager
            .active_activities()
            .get(id)
            .ok_or(DiaryError::UnknownActivity(id.0))?;
        let session = ResizeSession {
            id,
            edge,
            bound,
            layout,
            grab: record.span(),
            last_good: record.span(),
            consistent_at_grab: manager.active_activities().check_invariants().is_ok(),
        };
        trace!(%id, ?edge, "resize started");
        self.session = Some(session);
        Ok(session)
    }

    /// Moves the grabbed bound to the pointer's percent, keeping the other.
    pub fn resize_to(
        &mut self,
        manager: &mut TimelineManager,
        percent: f64,
    ) -> DiaryResult<ResizeStep> {
        let mut session = self
            .session
            .ok_or_else(|| DiaryError::InvalidData("no resize in progress".to_owned()))?;
        let minutes = position_to_minutes(percent)?;
        let current = session.last_good;
        let candidate = match session.bound {
            SpanEdge::Start => TimeSpan::new(minutes, current.end),
            SpanEdge::End => TimeSpan::new(current.start, minutes),
        };
        if candidate == current {
            return Ok(ResizeStep::Unchanged(current));
        }
        // Stored spans never wrap; dragging one edge past the other is too short.
        if candidate.end <= candidate.start {
            return Ok(ResizeStep::Reverted {
                span: current,
                reason: PlacementRejection::TooShort,
            });
        }

        match manager.apply_resize(session.id, candidate)? {
            PlacementVerdict::Accepted(span) => {
                session.last_good = span;
                self.session = Some(session);
                Ok(ResizeStep::Resized(span))
            }
            PlacementVerdict::Rejected(reason) => Ok(ResizeStep::Reverted {
                span: current,
                reason,
            }),
        }
    }

    /// Releases the edge and re-validates the whole module.
    ///
    /// A module that fails validation is rolled back to the grab geometry.
    pub fn end_resize(&mut self, manager: &mut TimelineManager) -> DiaryResult<ResizeEnd> {
        let session = self
            .session
            .take()
            .ok_or_else(|| DiaryError::InvalidData("no resize in progress".to_owned()))?;
        let checked = if session.consistent_at_grab {
            manager.active_activities().check_invariants()
        } else {
            Ok(())
        };
        if let Err(err) = checked {
            warn!(error = %err, id = %session.id, "rolling back resize after failed validation");
            manager.set_span_unchecked(session.id, session.grab)?;
            return Ok(ResizeEnd::RolledBack(session.grab));
        }
        trace!(id = %session.id, start = session.last_good.start, end = session.last_good.end, "resize committed");
        Ok(ResizeEnd::Committed(session.last_good))
    }

    /// Abandons the gesture and restores the grab geometry.
    ///
    /// Returns the restored span, or `None` when no resize was active.
    pub fn cancel_resize(&mut self, manager: &mut TimelineManager) -> DiaryResult<Option<TimeSpan>> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };
        manager.set_span_unchecked(session.id, session.grab)?;
        trace!(id = %session.id, "resize cancelled");
        Ok(Some(session.grab))
    }
}
