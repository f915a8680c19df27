use serde::{Deserialize, Serialize};

use crate::core::TimelineManager;
use crate::error::{DiaryError, DiaryResult};
use crate::render::Renderer;

use super::DiaryEngine;

/// Flat export row, one per placed activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRow {
    pub timeline: String,
    pub activity: String,
    pub category: String,
    pub start_time: String,
    pub end_time: String,
}

/// Flattens every timeline in configuration order, each sorted by start.
#[must_use]
pub fn flatten_rows(manager: &TimelineManager) -> Vec<ActivityRow> {
    manager
        .modules()
        .flat_map(|module| {
            module
                .activities()
                .sorted_by_start()
                .into_iter()
                .map(move |record| ActivityRow {
                    timeline: module.key().to_owned(),
                    activity: record.activity.clone(),
                    category: record.category.clone(),
                    start_time: record.start_time(),
                    end_time: record.end_time(),
                })
        })
        .collect()
}

impl<R: Renderer> DiaryEngine<R> {
    #[must_use]
    pub fn export_rows(&self) -> Vec<ActivityRow> {
        flatten_rows(&self.manager)
    }

    pub fn export_rows_json_pretty(&self) -> DiaryResult<String> {
        serde_json::to_string_pretty(&self.export_rows())
            .map_err(|e| DiaryError::InvalidData(format!("failed to serialize export rows: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SelectionMode, SelectionState, TimeSpan, TimelineModule};

    #[test]
    fn rows_are_sorted_per_timeline_in_config_order() {
        let mut manager = TimelineManager::new(vec![
            TimelineModule::new("primary", SelectionMode::SingleChoice, 0),
            TimelineModule::new("secondary", SelectionMode::MultipleChoice, 0),
        ])
        .expect("manager");
        let work = SelectionState::single("Work", "Office", "#aa5500");
        let sleep = SelectionState::single("Personal", "Sleep", "#224466");
        manager
            .place_activity(&work, TimeSpan::new(600, 720))
            .expect("work");
        manager
            .place_activity(&sleep, TimeSpan::new(240, 420))
            .expect("sleep");
        manager.set_active("secondary").expect("switch");
        manager
            .place_activity(&sleep, TimeSpan::new(1440, 1500))
            .expect("late sleep");

        let rows = flatten_rows(&manager);
        let summary: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|row| (row.timeline.as_str(), row.start_time.as_str(), row.end_time.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("primary", "04:00", "07:00"),
                ("primary", "10:00", "12:00"),
                ("secondary", "00:00(+1)", "01:00(+1)"),
            ]
        );
        assert_eq!(rows[0].activity, "Sleep");
        assert_eq!(rows[1].category, "Work");
    }

    #[test]
    fn rows_serialize_with_camel_case_keys() {
        let row = ActivityRow {
            timeline: "primary".to_owned(),
            activity: "Sleep".to_owned(),
            category: "Personal".to_owned(),
            start_time: "04:00".to_owned(),
            end_time: "07:00".to_owned(),
        };
        let json = serde_json::to_string(&row).expect("json");
        assert!(json.contains("\"startTime\":\"04:00\""));
        assert!(json.contains("\"endTime\":\"07:00\""));
    }
}
