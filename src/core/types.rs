use serde::{Deserialize, Serialize};

use crate::core::layout::Axis;
use crate::core::time_math::{DAY_MINUTES, format_time};
use crate::error::{DiaryError, DiaryResult};

/// Half-open `[start, end)` interval in absolute timeline minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: u32,
    pub end: u32,
}

impl TimeSpan {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the span with `end` lifted by one day when it precedes `start`.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.end < self.start {
            Self::new(self.start, self.end.saturating_add(DAY_MINUTES))
        } else {
            self
        }
    }

    #[must_use]
    pub fn length(self) -> u32 {
        let span = self.normalized();
        span.end.saturating_sub(span.start)
    }

    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.start.max(b.start) < a.end.min(b.end)
    }

    #[must_use]
    pub fn start_label(self) -> String {
        format_time(self.start, false)
    }

    #[must_use]
    pub fn end_label(self) -> String {
        format_time(self.end, true)
    }
}

/// Host-reported geometry of the timeline element in client pixels.
///
/// The host refreshes this on scroll and resize, so the same pointer position
/// keeps mapping to the same minute while the viewport auto-scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl TimelineRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|value| value.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    #[must_use]
    pub fn origin(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    #[must_use]
    pub fn length(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Converts a pointer position into a percentage along `axis`.
    pub fn pointer_to_percent(self, pointer: PointerPosition, axis: Axis) -> DiaryResult<f64> {
        let length = self.length(axis);
        if !self.is_valid() {
            return Err(DiaryError::InvalidViewport { length });
        }
        let coord = pointer.along(axis);
        if !coord.is_finite() {
            return Err(DiaryError::InvalidData(
                "pointer coordinate must be finite".to_owned(),
            ));
        }
        Ok((coord - self.origin(axis)) / length * 100.0)
    }

    /// Pixel coordinate of a percentage along `axis`.
    #[must_use]
    pub fn percent_to_pixel(self, percent: f64, axis: Axis) -> f64 {
        self.origin(axis) + percent / 100.0 * self.length(axis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wrapped_span_is_normalized_before_comparison() {
        let span = TimeSpan::new(1670, 230);
        assert_eq!(span.normalized(), TimeSpan::new(1670, 1670));
        assert_eq!(span.length(), 0);
    }

    #[test]
    fn half_open_spans_touching_do_not_overlap() {
        let a = TimeSpan::new(240, 250);
        assert!(!a.overlaps(TimeSpan::new(250, 260)));
        assert!(a.overlaps(TimeSpan::new(245, 255)));
    }

    #[test]
    fn pointer_percent_uses_the_requested_axis() {
        let rect = TimelineRect::new(100.0, 50.0, 1000.0, 2000.0);
        let pointer = PointerPosition::new(350.0, 550.0);
        assert_abs_diff_eq!(
            rect.pointer_to_percent(pointer, Axis::X).expect("x"),
            25.0
        );
        assert_abs_diff_eq!(
            rect.pointer_to_percent(pointer, Axis::Y).expect("y"),
            25.0
        );
    }

    #[test]
    fn degenerate_rect_is_rejected() {
        let rect = TimelineRect::new(0.0, 0.0, 0.0, 10.0);
        let err = rect
            .pointer_to_percent(PointerPosition::new(1.0, 1.0), Axis::X)
            .expect_err("zero width");
        assert!(matches!(err, DiaryError::InvalidViewport { .. }));
    }
}
