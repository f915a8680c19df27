use serde::{Deserialize, Serialize};

use crate::core::activity::{ActivityId, ActivityRecord};
use crate::core::time_math::{MINUTE_INCREMENT, TIMELINE_END, TIMELINE_START};
use crate::core::types::TimeSpan;
use crate::error::{DiaryError, DiaryResult};

/// Activity store for one timeline module.
///
/// Records keep insertion order so `pop` undoes the most recent placement.
/// Overlap checks never depend on that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityList {
    records: Vec<ActivityRecord>,
}

impl ActivityList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<ActivityRecord>) -> Self {
        Self { records }
    }

    pub fn append(&mut self, record: ActivityRecord) {
        self.records.push(record);
    }

    /// Removes the most recently appended record.
    pub fn pop(&mut self) -> Option<ActivityRecord> {
        self.records.pop()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, id: ActivityId) -> Option<&ActivityRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn get_mut(&mut self, id: ActivityId) -> Option<&mut ActivityRecord> {
        self.records.iter_mut().find(|record| record.id == id)
    }

    /// Record whose span contains `minutes`, if any.
    #[must_use]
    pub fn record_at(&self, minutes: u32) -> Option<&ActivityRecord> {
        self.records.iter().find(|record| {
            let span = record.span().normalized();
            span.start <= minutes && minutes < span.end
        })
    }

    #[must_use]
    pub fn sorted_by_start(&self) -> Vec<&ActivityRecord> {
        let mut sorted: Vec<&ActivityRecord> = self.records.iter().collect();
        sorted.sort_by_key(|record| (record.start_minutes, record.end_minutes));
        sorted
    }

    #[must_use]
    pub fn max_id(&self) -> Option<ActivityId> {
        self.records.iter().map(|record| record.id).max()
    }

    /// Total covered minutes with overlapping spans merged.
    #[must_use]
    pub fn coverage(&self) -> u32 {
        let mut spans: Vec<TimeSpan> = self
            .records
            .iter()
            .map(|record| record.span().normalized())
            .collect();
        spans.sort_by_key(|span| span.start);

        let mut merged: Vec<TimeSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            if let Some(last) = merged.last_mut() {
                if span.start <= last.end {
                    last.end = last.end.max(span.end);
                    continue;
                }
            }
            merged.push(span);
        }
        merged.iter().map(|span| span.end.saturating_sub(span.start)).sum()
    }

    /// Verifies per-record and pairwise store invariants.
    pub fn check_invariants(&self) -> DiaryResult<()> {
        for record in &self.records {
            let span = record.span();
            if span.end <= span.start {
                return Err(DiaryError::InvariantViolation(format!(
                    "activity {} ends at or before its start",
                    record.id
                )));
            }
            if span.length() < MINUTE_INCREMENT || span.length() % MINUTE_INCREMENT != 0 {
                return Err(DiaryError::InvariantViolation(format!(
                    "activity {} has length {} off the 10-minute grid",
                    record.id,
                    span.length()
                )));
            }
            if span.start < TIMELINE_START || span.end > TIMELINE_END {
                return Err(DiaryError::InvariantViolation(format!(
                    "activity {} lies outside the timeline",
                    record.id
                )));
            }
        }

        for (index, record) in self.records.iter().enumerate() {
            for other in &self.records[index + 1..] {
                if record.id == other.id {
                    return Err(DiaryError::InvariantViolation(format!(
                        "duplicate activity id {}",
                        record.id
                    )));
                }
                if record.span().overlaps(other.span()) {
                    return Err(DiaryError::InvariantViolation(format!(
                        "activities {} and {} overlap",
                        record.id, other.id
                    )));
                }
            }
        }
        Ok(())
    }
}
