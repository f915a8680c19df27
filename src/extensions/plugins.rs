use serde::{Deserialize, Serialize};

use crate::core::{ActivityId, Layout, TimeSpan};
use crate::interaction::{InteractionMode, KeyboardMode};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiaryContext {
    pub active_index: usize,
    pub layout: Layout,
    pub activities_len: usize,
    pub coverage_minutes: u32,
    pub interaction_mode: InteractionMode,
    pub keyboard_mode: KeyboardMode,
}

/// Event stream exposed to plugins such as autosave or analytics bridges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiaryEvent {
    ActivityPlaced { id: ActivityId, span: TimeSpan },
    ActivityResized { id: ActivityId, span: TimeSpan },
    ActivityRemoved { id: ActivityId },
    TimelineCleared { removed: usize },
    ActiveTimelineChanged { index: usize },
    LayoutChanged { layout: Layout },
    ResizeStarted { id: ActivityId },
    ResizeEnded { id: ActivityId, committed: bool },
    Restored,
    Rendered,
}

impl DiaryEvent {
    /// Whether the event changed persisted diary content.
    #[must_use]
    pub fn mutates_store(self) -> bool {
        matches!(
            self,
            Self::ActivityPlaced { .. }
                | Self::ActivityResized { .. }
                | Self::ActivityRemoved { .. }
                | Self::TimelineCleared { .. }
                | Self::Restored
        )
    }
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating the
/// activity store directly.
pub trait DiaryPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: DiaryEvent, context: DiaryContext);
}
