use indexmap::IndexMap;
use tracing::{debug, error, trace};

use crate::core::activity::{ActivityId, ActivityRecord, SelectionState};
use crate::core::activity_list::ActivityList;
use crate::core::placement::{
    PlacementRejection, PlacementVerdict, is_module_full, meets_minimum_coverage,
    placement_verdict,
};
use crate::core::timeline_module::TimelineModule;
use crate::core::types::TimeSpan;
use crate::error::{DiaryError, DiaryResult};

/// Owner of every timeline module and the single source of truth for placed
/// activities.
///
/// Both interaction state machines receive the manager explicitly and mutate
/// only the active module's list.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineManager {
    modules: IndexMap<String, TimelineModule>,
    active_key: String,
    next_id: u64,
}

impl TimelineManager {
    /// Builds a manager with the first module active.
    pub fn new(modules: Vec<TimelineModule>) -> DiaryResult<Self> {
        let mut map = IndexMap::with_capacity(modules.len());
        for module in modules {
            let key = module.key().to_owned();
            if map.insert(key.clone(), module).is_some() {
                return Err(DiaryError::InvalidConfig(format!(
                    "duplicate timeline key `{key}`"
                )));
            }
        }
        let active_key = map
            .keys()
            .next()
            .cloned()
            .ok_or_else(|| DiaryError::InvalidConfig("no timelines configured".to_owned()))?;
        let next_id = map
            .values()
            .filter_map(|module| module.activities().max_id())
            .map(|id| id.0 + 1)
            .max()
            .unwrap_or(1);
        Ok(Self {
            modules: map,
            active_key,
            next_id,
        })
    }

    #[must_use]
    pub fn active_key(&self) -> &str {
        &self.active_key
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.modules.get_index_of(&self.active_key).unwrap_or(0)
    }

    #[must_use]
    pub fn active(&self) -> &TimelineModule {
        // `active_key` always names a configured module.
        &self.modules[self.active_index()]
    }

    pub(crate) fn active_mut(&mut self) -> &mut TimelineModule {
        let index = self.active_index();
        &mut self.modules[index]
    }

    #[must_use]
    pub fn active_activities(&self) -> &ActivityList {
        self.active().activities()
    }

    #[must_use]
    pub fn module(&self, key: &str) -> Option<&TimelineModule> {
        self.modules.get(key)
    }

    pub fn modules(&self) -> impl Iterator<Item = &TimelineModule> {
        self.modules.values()
    }

    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Makes `key` the active module. Other modules keep their records.
    pub fn set_active(&mut self, key: &str) -> DiaryResult<()> {
        if !self.modules.contains_key(key) {
            return Err(DiaryError::UnknownTimeline(key.to_owned()));
        }
        debug!(from = %self.active_key, to = key, "switch active timeline");
        self.active_key = key.to_owned();
        Ok(())
    }

    pub fn set_active_index(&mut self, index: usize) -> DiaryResult<()> {
        let key = self
            .modules
            .get_index(index)
            .map(|(key, _)| key.clone())
            .ok_or_else(|| DiaryError::UnknownTimeline(format!("#{index}")))?;
        self.set_active(&key)
    }

    pub fn allocate_id(&mut self) -> ActivityId {
        let id = ActivityId(self.next_id);
        self.next_id += 1;
        id
    }

    #[must_use]
    pub fn placement_verdict(
        &self,
        start: u32,
        end: u32,
        exclude: Option<ActivityId>,
    ) -> PlacementVerdict {
        placement_verdict(self.active_activities(), start, end, exclude)
    }

    #[must_use]
    pub fn can_place(&self, start: u32, end: u32, exclude: Option<ActivityId>) -> bool {
        self.placement_verdict(start, end, exclude).is_accepted()
    }

    #[must_use]
    pub fn coverage(&self) -> u32 {
        self.active_activities().coverage()
    }

    #[must_use]
    pub fn is_module_full(&self) -> bool {
        is_module_full(self.active_activities())
    }

    #[must_use]
    pub fn meets_minimum_coverage(&self) -> bool {
        meets_minimum_coverage(self.active())
    }

    /// Keys of modules still short of their minimum coverage.
    #[must_use]
    pub fn modules_below_minimum(&self) -> Vec<&str> {
        self.modules
            .values()
            .filter(|module| !meets_minimum_coverage(module))
            .map(TimelineModule::key)
            .collect()
    }

    /// Places `selection` over `span` on the active module.
    ///
    /// This is the only insertion path; pointer and keyboard placement both
    /// end here so their effect on the store is identical.
    pub fn place_activity(
        &mut self,
        selection: &SelectionState,
        span: TimeSpan,
    ) -> Result<ActivityId, PlacementRejection> {
        if selection.is_empty() {
            return Err(PlacementRejection::NoSelection);
        }
        if self.is_module_full() {
            return Err(PlacementRejection::ModuleFull);
        }
        let span = match self.placement_verdict(span.start, span.end, None) {
            PlacementVerdict::Accepted(span) => span,
            PlacementVerdict::Rejected(reason) => return Err(reason),
        };

        let id = self.allocate_id();
        let record = selection.to_record(id, span);
        let list = self.active_mut().activities_mut();
        // Restored history may already break the record rules; only a list that
        // was consistent before the append is held to them afterwards.
        let was_consistent = list.check_invariants().is_ok();
        list.append(record);
        let checked = if was_consistent {
            list.check_invariants()
        } else {
            Ok(())
        };
        if let Err(err) = checked {
            list.pop();
            error!(error = %err, %id, "rolled back placement that broke store invariants");
            return Err(PlacementRejection::Inconsistent);
        }
        trace!(%id, start = span.start, end = span.end, "placed activity");
        Ok(id)
    }

    /// Moves one bound of an existing record after validating the new span.
    pub fn apply_resize(&mut self, id: ActivityId, span: TimeSpan) -> DiaryResult<PlacementVerdict> {
        if self.active_activities().get(id).is_none() {
            return Err(DiaryError::UnknownActivity(id.0));
        }
        let verdict = self.placement_verdict(span.start, span.end, Some(id));
        if let PlacementVerdict::Accepted(span) = verdict {
            self.set_span_unchecked(id, span)?;
            trace!(%id, start = span.start, end = span.end, "resized activity");
        }
        Ok(verdict)
    }

    /// Writes a span without validation. Used to restore known-good geometry.
    pub(crate) fn set_span_unchecked(&mut self, id: ActivityId, span: TimeSpan) -> DiaryResult<()> {
        let record = self
            .active_mut()
            .activities_mut()
            .get_mut(id)
            .ok_or(DiaryError::UnknownActivity(id.0))?;
        record.set_span(span);
        Ok(())
    }

    /// Undoes the most recent placement on the active module.
    pub fn undo(&mut self) -> Option<ActivityRecord> {
        let popped = self.active_mut().activities_mut().pop();
        if let Some(record) = &popped {
            debug!(id = %record.id, "undo activity");
        }
        popped
    }

    /// Removes every record from the active module and returns how many went.
    pub fn clear_active(&mut self) -> usize {
        let list = self.active_mut().activities_mut();
        let removed = list.len();
        list.clear();
        debug!(timeline = %self.active_key, removed, "cleared timeline");
        removed
    }

    /// Replaces a module's records wholesale without re-validating them.
    pub(crate) fn restore_module(&mut self, key: &str, activities: ActivityList) -> DiaryResult<()> {
        let module = self
            .modules
            .get_mut(key)
            .ok_or_else(|| DiaryError::UnknownTimeline(key.to_owned()))?;
        if let Some(max) = activities.max_id() {
            self.next_id = self.next_id.max(max.0 + 1);
        }
        module.replace_activities(activities);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timeline_module::SelectionMode;

    fn manager() -> TimelineManager {
        TimelineManager::new(vec![
            TimelineModule::new("primary", SelectionMode::SingleChoice, 0),
            TimelineModule::new("secondary", SelectionMode::MultipleChoice, 60),
        ])
        .expect("manager")
    }

    fn sleep() -> SelectionState {
        SelectionState::single("Personal", "Sleep", "#224466")
    }

    #[test]
    fn duplicate_keys_are_a_config_error() {
        let err = TimelineManager::new(vec![
            TimelineModule::new("a", SelectionMode::SingleChoice, 0),
            TimelineModule::new("a", SelectionMode::SingleChoice, 0),
        ])
        .expect_err("duplicate");
        assert!(matches!(err, DiaryError::InvalidConfig(_)));
        assert!(TimelineManager::new(Vec::new()).is_err());
    }

    #[test]
    fn switching_modules_preserves_inactive_records() {
        let mut manager = manager();
        manager
            .place_activity(&sleep(), TimeSpan::new(240, 300))
            .expect("placed");
        manager.set_active("secondary").expect("switch");
        assert!(manager.active_activities().is_empty());
        manager.set_active_index(0).expect("switch back");
        assert_eq!(manager.active_activities().len(), 1);
        assert_eq!(manager.coverage(), 60);
    }

    #[test]
    fn place_rejects_overlap_without_mutation() {
        let mut manager = manager();
        manager
            .place_activity(&sleep(), TimeSpan::new(240, 250))
            .expect("placed");
        let before = manager.clone();
        let rejection = manager
            .place_activity(&sleep(), TimeSpan::new(245, 255))
            .expect_err("overlap");
        assert!(matches!(rejection, PlacementRejection::Overlap { .. }));
        assert_eq!(manager, before);
    }

    #[test]
    fn full_module_refuses_further_placement() {
        let mut manager = manager();
        manager
            .place_activity(&sleep(), TimeSpan::new(240, 1680))
            .expect("full day");
        assert!(manager.is_module_full());
        assert_eq!(
            manager.place_activity(&sleep(), TimeSpan::new(240, 250)),
            Err(PlacementRejection::ModuleFull)
        );
    }

    #[test]
    fn modules_below_minimum_lists_unmet_requirements() {
        let manager = manager();
        assert_eq!(manager.modules_below_minimum(), vec!["secondary"]);
    }

    #[test]
    fn restore_bumps_the_id_allocator() {
        let mut manager = manager();
        let record = sleep().to_record(ActivityId(41), TimeSpan::new(240, 250));
        manager
            .restore_module("primary", ActivityList::from_records(vec![record]))
            .expect("restore");
        assert_eq!(manager.allocate_id(), ActivityId(42));
    }
}
