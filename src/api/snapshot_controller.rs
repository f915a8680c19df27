use crate::error::{DiaryError, DiaryResult};
use crate::extensions::DiaryEvent;
use crate::render::Renderer;

use super::{DiaryEngine, DiarySnapshot};

impl<R: Renderer> DiaryEngine<R> {
    /// Captures every timeline's records and the active index.
    #[must_use]
    pub fn snapshot(&self) -> DiarySnapshot {
        DiarySnapshot::capture(&self.manager)
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json_pretty(&self) -> DiaryResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| DiaryError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    /// Replaces the store wholesale, e.g. from autosave.
    ///
    /// Live gestures are dropped first; selection and keyboard focus reset.
    /// The store is committed before the frame is pushed, so an `Err` from the
    /// renderer still leaves the snapshot's records in place.
    pub fn restore(&mut self, snapshot: &DiarySnapshot) -> DiaryResult<()> {
        self.cancel_interactions()?;
        snapshot.apply_to(&mut self.manager)?;
        self.selection = None;
        self.keyboard.reset();
        self.emit_event(DiaryEvent::Restored);
        self.render()
    }
}
