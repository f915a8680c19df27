use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::time_math::{SLOT_COUNT, format_time, minutes_to_slot, slot_to_minutes};
use crate::core::{
    ActivityId, MINUTE_INCREMENT, PlacementRejection, SelectionState, TimeSpan, TimelineManager,
};

use super::announcer::LiveRegion;

/// Slots per hour; ArrowUp/ArrowDown jump this far.
pub const SLOTS_PER_HOUR: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardMode {
    Browsing,
    Selecting { anchor: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyOutcome {
    FocusMoved { slot: usize },
    SelectionStarted { anchor: usize },
    SelectionChanged { span: TimeSpan },
    Placed { id: ActivityId, span: TimeSpan },
    Rejected { reason: PlacementRejection, span: TimeSpan },
    SelectionCancelled,
    /// No activity is chosen; the host should focus the activity chooser.
    RedirectToChooser,
    /// Tab: the host lets focus leave the timeline.
    FocusReleased,
    Ignored,
}

/// Keyboard placement over the 144 ten-minute slots.
///
/// Produces the same store mutations as pointer placement by going through
/// `TimelineManager::place_activity`. Every transition writes an assertive
/// announcement into the supplied live region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardInteraction {
    focus: usize,
    mode: KeyboardMode,
}

impl Default for KeyboardInteraction {
    fn default() -> Self {
        Self {
            focus: 0,
            mode: KeyboardMode::Browsing,
        }
    }
}

impl KeyboardInteraction {
    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    /// Range between anchor and focus, both slots inclusive.
    #[must_use]
    pub fn selected_span(&self) -> Option<TimeSpan> {
        match self.mode {
            KeyboardMode::Browsing => None,
            KeyboardMode::Selecting { anchor } => Some(slot_range_span(anchor, self.focus)),
        }
    }

    /// Moves the roving focus without a transition, e.g. after a slot click.
    pub fn set_focus(&mut self, slot: usize) {
        self.focus = slot.min(SLOT_COUNT - 1);
    }

    /// Returns focus to slot 0 in `Browsing`, e.g. when the active timeline changes.
    pub fn reset(&mut self) {
        self.focus = 0;
        self.mode = KeyboardMode::Browsing;
    }

    /// Drops an in-progress selection silently, keeping the focused slot.
    pub fn abandon_selection(&mut self) -> bool {
        let was_selecting = matches!(self.mode, KeyboardMode::Selecting { .. });
        self.mode = KeyboardMode::Browsing;
        was_selecting
    }

    pub fn handle_key(
        &mut self,
        key: TimelineKey,
        manager: &mut TimelineManager,
        selection: Option<&SelectionState>,
        announcer: &mut LiveRegion,
    ) -> KeyOutcome {
        let outcome = match key {
            TimelineKey::ArrowLeft => self.move_focus(-1, manager, announcer),
            TimelineKey::ArrowRight => self.move_focus(1, manager, announcer),
            TimelineKey::ArrowUp => self.move_focus(-(SLOTS_PER_HOUR as isize), manager, announcer),
            TimelineKey::ArrowDown => self.move_focus(SLOTS_PER_HOUR as isize, manager, announcer),
            TimelineKey::Home => self.jump_focus(0, manager, announcer),
            TimelineKey::End => self.jump_focus(SLOT_COUNT - 1, manager, announcer),
            TimelineKey::Enter | TimelineKey::Space => self.confirm(manager, selection, announcer),
            TimelineKey::Escape => self.cancel(announcer),
            TimelineKey::Tab => {
                if matches!(self.mode, KeyboardMode::Selecting { .. }) {
                    self.cancel(announcer);
                }
                KeyOutcome::FocusReleased
            }
        };
        trace!(?key, ?outcome, focus = self.focus, "keyboard transition");
        outcome
    }

    fn move_focus(
        &mut self,
        delta: isize,
        manager: &TimelineManager,
        announcer: &mut LiveRegion,
    ) -> KeyOutcome {
        let target = self
            .focus
            .saturating_add_signed(delta)
            .min(SLOT_COUNT - 1);
        self.jump_focus(target, manager, announcer)
    }

    fn jump_focus(
        &mut self,
        slot: usize,
        manager: &TimelineManager,
        announcer: &mut LiveRegion,
    ) -> KeyOutcome {
        self.focus = slot.min(SLOT_COUNT - 1);
        match self.mode {
            KeyboardMode::Browsing => {
                announcer.info(describe_slot(self.focus, manager));
                KeyOutcome::FocusMoved { slot: self.focus }
            }
            KeyboardMode::Selecting { anchor } => {
                let span = slot_range_span(anchor, self.focus);
                announcer.info(format!(
                    "Selected {} to {}",
                    span.start_label(),
                    span.end_label()
                ));
                KeyOutcome::SelectionChanged { span }
            }
        }
    }

    fn confirm(
        &mut self,
        manager: &mut TimelineManager,
        selection: Option<&SelectionState>,
        announcer: &mut LiveRegion,
    ) -> KeyOutcome {
        let Some(selection) = selection else {
            self.mode = KeyboardMode::Browsing;
            announcer.error("Choose an activity before selecting a time range");
            return KeyOutcome::RedirectToChooser;
        };

        match self.mode {
            KeyboardMode::Browsing => {
                self.mode = KeyboardMode::Selecting { anchor: self.focus };
                announcer.info(format!(
                    "Selection started at {}. Use arrow keys to extend, Enter to place, Escape to cancel",
                    format_time(slot_to_minutes(self.focus), false)
                ));
                KeyOutcome::SelectionStarted { anchor: self.focus }
            }
            KeyboardMode::Selecting { anchor } => {
                let span = slot_range_span(anchor, self.focus);
                let label = selection.label();
                match manager.place_activity(selection, span) {
                    Ok(id) => {
                        self.mode = KeyboardMode::Browsing;
                        self.focus = minutes_to_slot(span.start);
                        announcer.info(format!(
                            "Placed {label} from {} to {}",
                            span.start_label(),
                            span.end_label()
                        ));
                        KeyOutcome::Placed { id, span }
                    }
                    Err(reason) => {
                        announcer.error(format!(
                            "Cannot place {label} from {} to {}: {}",
                            span.start_label(),
                            span.end_label(),
                            reason.describe()
                        ));
                        KeyOutcome::Rejected { reason, span }
                    }
                }
            }
        }
    }

    fn cancel(&mut self, announcer: &mut LiveRegion) -> KeyOutcome {
        match self.mode {
            KeyboardMode::Browsing => KeyOutcome::Ignored,
            KeyboardMode::Selecting { .. } => {
                self.mode = KeyboardMode::Browsing;
                announcer.info(format!(
                    "Selection cancelled. Focus at {}",
                    format_time(slot_to_minutes(self.focus), false)
                ));
                KeyOutcome::SelectionCancelled
            }
        }
    }
}

/// `[min, max]` slots mapped to `[start, end)` minutes.
#[must_use]
pub fn slot_range_span(anchor: usize, focus: usize) -> TimeSpan {
    let first = anchor.min(focus);
    let last = anchor.max(focus);
    TimeSpan::new(
        slot_to_minutes(first),
        slot_to_minutes(last) + MINUTE_INCREMENT,
    )
}

fn describe_slot(slot: usize, manager: &TimelineManager) -> String {
    let minutes = slot_to_minutes(slot);
    let time = format_time(minutes, false);
    match manager.active_activities().record_at(minutes) {
        Some(record) => format!(
            "{time}, {} from {} to {}",
            record.activity,
            record.start_time(),
            record.end_time()
        ),
        None => format!("{time}, empty"),
    }
}
