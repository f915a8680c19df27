use crate::error::DiaryResult;
use crate::extensions::DiaryEvent;
use crate::interaction::{KeyOutcome, KeyboardMode, TimelineKey};
use crate::render::Renderer;

use super::DiaryEngine;

impl<R: Renderer> DiaryEngine<R> {
    #[must_use]
    pub fn keyboard_focus(&self) -> usize {
        self.keyboard.focus()
    }

    #[must_use]
    pub fn keyboard_mode(&self) -> KeyboardMode {
        self.keyboard.mode()
    }

    /// Moves the roving focus to `slot`, e.g. when the host focuses a slot
    /// element directly.
    pub fn focus_slot(&mut self, slot: usize) -> DiaryResult<()> {
        self.keyboard.set_focus(slot);
        self.render()
    }

    /// Feeds one key press on the focused timeline to the keyboard machine.
    pub fn key_press(&mut self, key: TimelineKey) -> DiaryResult<KeyOutcome> {
        self.feedback.cancel();
        if self.pointer.session().is_some() {
            return Ok(KeyOutcome::Ignored);
        }
        let outcome = self.keyboard.handle_key(
            key,
            &mut self.manager,
            self.selection.as_ref(),
            &mut self.live_region,
        );
        if let KeyOutcome::Placed { id, span } = outcome {
            self.selection = None;
            self.emit_event(DiaryEvent::ActivityPlaced { id, span });
        }
        if outcome != KeyOutcome::Ignored {
            self.render()?;
        }
        Ok(outcome)
    }
}
