//! Input state machines that turn pointer and keyboard events into activity
//! store mutations.

use serde::{Deserialize, Serialize};

pub mod announcer;
pub mod auto_scroll;
pub mod feedback;
pub mod keyboard;
pub mod pointer;

pub use announcer::{LiveRegion, Politeness, Severity};
pub use auto_scroll::{AutoScrollConfig, AutoScrollState};
pub use feedback::{FeedbackHandle, FlashTarget, InvalidFlash, TransientFeedback};
pub use keyboard::{KeyOutcome, KeyboardInteraction, KeyboardMode, TimelineKey};
pub use pointer::{
    ClickTarget, PlacementOutcome, PlacementRequest, PointerInteraction, ResizeEnd,
    ResizeSession, ResizeStep,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Resizing,
}
