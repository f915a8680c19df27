use serde::{Deserialize, Serialize};

use crate::core::activity::ActivityId;
use crate::core::activity_list::ActivityList;
use crate::core::time_math::{DAY_MINUTES, MINUTE_INCREMENT, TIMELINE_END, TIMELINE_START};
use crate::core::timeline_module::TimelineModule;
use crate::core::types::TimeSpan;
use crate::error::{DiaryError, DiaryResult};

/// Why a candidate interval was refused. Rejections are ordinary outcomes,
/// never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementRejection {
    NoSelection,
    InsideExistingBlock,
    ModuleFull,
    PastTimelineEnd,
    TooShort,
    OutOfBounds,
    Overlap { with: ActivityId },
    /// The store failed its own invariant check and the mutation was undone.
    Inconsistent,
}

impl PlacementRejection {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::NoSelection => "no activity selected",
            Self::InsideExistingBlock => "an activity is already placed here",
            Self::ModuleFull => "the timeline is already full",
            Self::PastTimelineEnd => "the timeline ends here",
            Self::TooShort => "activities must last at least 10 minutes",
            Self::OutOfBounds => "the time lies outside the timeline",
            Self::Overlap { .. } => "overlaps an existing activity",
            Self::Inconsistent => "the diary data is inconsistent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementVerdict {
    Accepted(TimeSpan),
    Rejected(PlacementRejection),
}

impl PlacementVerdict {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Full placement check for `[start, end)` against `list`.
///
/// `exclude` names the record being resized so it does not collide with
/// itself. An `end` before `start` is read as wrapping past midnight.
#[must_use]
pub fn placement_verdict(
    list: &ActivityList,
    start: u32,
    end: u32,
    exclude: Option<ActivityId>,
) -> PlacementVerdict {
    let span = TimeSpan::new(start, end).normalized();
    if span.length() < MINUTE_INCREMENT {
        return PlacementVerdict::Rejected(PlacementRejection::TooShort);
    }
    let in_bounds = |minutes: u32| (TIMELINE_START..=TIMELINE_END).contains(&minutes);
    if !in_bounds(span.start) || !in_bounds(span.end) {
        return PlacementVerdict::Rejected(PlacementRejection::OutOfBounds);
    }

    let collision = list
        .iter()
        .filter(|record| Some(record.id) != exclude)
        .find(|record| span.overlaps(record.span()));
    match collision {
        Some(record) => PlacementVerdict::Rejected(PlacementRejection::Overlap { with: record.id }),
        None => PlacementVerdict::Accepted(span),
    }
}

#[must_use]
pub fn can_place(list: &ActivityList, start: u32, end: u32, exclude: Option<ActivityId>) -> bool {
    placement_verdict(list, start, end, exclude).is_accepted()
}

#[must_use]
pub fn is_module_full(list: &ActivityList) -> bool {
    list.coverage() >= DAY_MINUTES
}

#[must_use]
pub fn meets_minimum_coverage(module: &TimelineModule) -> bool {
    module.activities().coverage() >= module.min_coverage()
}

/// Validates a configured minimum coverage, in minutes.
///
/// Accepts whole numbers in `[0, 1440]` divisible by 10.
pub fn validate_min_coverage(value: f64) -> DiaryResult<u32> {
    if !value.is_finite() {
        return Err(DiaryError::InvalidMinCoverage {
            value,
            reason: "must be a finite number",
        });
    }
    if !(0.0..=f64::from(DAY_MINUTES)).contains(&value) {
        return Err(DiaryError::InvalidMinCoverage {
            value,
            reason: "must be between 0 and 1440",
        });
    }
    if value.fract() != 0.0 || (value as u32) % MINUTE_INCREMENT != 0 {
        return Err(DiaryError::InvalidMinCoverage {
            value,
            reason: "must be divisible by 10",
        });
    }
    Ok(value as u32)
}
