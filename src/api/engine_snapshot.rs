use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ActivityList, DAY_MINUTES, TIMELINE_END, TimelineManager};
use crate::error::{DiaryError, DiaryResult};

/// Records of one timeline, keyed by the configured timeline key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    pub key: String,
    pub activities: ActivityList,
}

/// Serializable diary state handed to a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiarySnapshot {
    pub modules: Vec<ModuleSnapshot>,
    pub active_index: usize,
}

impl DiarySnapshot {
    #[must_use]
    pub fn capture(manager: &TimelineManager) -> Self {
        Self {
            modules: manager
                .modules()
                .map(|module| ModuleSnapshot {
                    key: module.key().to_owned(),
                    activities: module.activities().clone(),
                })
                .collect(),
            active_index: manager.active_index(),
        }
    }

    /// Replaces stored records with the snapshot's.
    ///
    /// Keys and the active index are checked before anything is written, so a
    /// bad snapshot leaves `manager` untouched. Record bounds must lie within
    /// `[0, TIMELINE_END + DAY_MINUTES]`; length and overlap are trusted since
    /// historical data may predate current validation rules.
    pub fn apply_to(&self, manager: &mut TimelineManager) -> DiaryResult<()> {
        for module in &self.modules {
            if manager.module(&module.key).is_none() {
                return Err(DiaryError::UnknownTimeline(module.key.clone()));
            }
            check_record_bounds(module)?;
        }
        if self.active_index >= manager.module_count() {
            return Err(DiaryError::InvalidData(format!(
                "snapshot active index {} out of range for {} timelines",
                self.active_index,
                manager.module_count()
            )));
        }
        for module in &self.modules {
            manager.restore_module(&module.key, module.activities.clone())?;
        }
        manager.set_active_index(self.active_index)?;
        debug!(
            modules = self.modules.len(),
            active_index = self.active_index,
            "restored diary snapshot"
        );
        Ok(())
    }
}

fn check_record_bounds(module: &ModuleSnapshot) -> DiaryResult<()> {
    let limit = TIMELINE_END + DAY_MINUTES;
    for record in module.activities.iter() {
        if record.start_minutes > limit || record.end_minutes > limit {
            return Err(DiaryError::InvalidData(format!(
                "activity {} in timeline `{}` has bounds {}..{} outside 0..={limit}",
                record.id, module.key, record.start_minutes, record.end_minutes
            )));
        }
    }
    Ok(())
}
