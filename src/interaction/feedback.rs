use serde::{Deserialize, Serialize};

use crate::core::{ActivityId, TimeSpan};

/// Where an invalid flash is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashTarget {
    /// A throwaway block at a rejected click position.
    Candidate,
    /// An existing block whose resize was refused.
    Activity(ActivityId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidFlash {
    pub target: FlashTarget,
    pub span: TimeSpan,
}

/// Handle for one shown flash; stale handles cancel nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedbackHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveFlash {
    flash: InvalidFlash,
    handle: FeedbackHandle,
    remaining_seconds: f64,
}

/// Short-lived "invalid" feedback as explicit, cancellable timed state.
///
/// At most one flash is visible. Showing a new one or any new interaction
/// replaces the previous flash instead of racing a detached timer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientFeedback {
    duration_seconds: f64,
    active: Option<ActiveFlash>,
    next_handle: u64,
}

impl TransientFeedback {
    #[must_use]
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            duration_seconds,
            active: None,
            next_handle: 0,
        }
    }

    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn show(&mut self, flash: InvalidFlash) -> FeedbackHandle {
        let handle = FeedbackHandle(self.next_handle);
        self.next_handle += 1;
        self.active = Some(ActiveFlash {
            flash,
            handle,
            remaining_seconds: self.duration_seconds,
        });
        handle
    }

    #[must_use]
    pub fn current(&self) -> Option<InvalidFlash> {
        self.active.map(|active| active.flash)
    }

    /// Advances the timer. Returns `true` when a flash expired in this step.
    pub fn step(&mut self, delta_seconds: f64) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        active.remaining_seconds -= delta_seconds.max(0.0);
        if active.remaining_seconds <= 0.0 {
            self.active = None;
            return true;
        }
        false
    }

    /// Clears whatever flash is visible. Returns `true` if one was.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Clears the flash only if `handle` is still the visible one.
    pub fn cancel_handle(&mut self, handle: FeedbackHandle) -> bool {
        match self.active {
            Some(active) if active.handle == handle => {
                self.active = None;
                true
            }
            _ => false,
        }
    }
}
