use serde::{Deserialize, Serialize};

use crate::core::activity::ActivityOption;
use crate::core::activity_list::ActivityList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    SingleChoice,
    MultipleChoice,
}

/// Chooser category offered on a timeline. The engine passes it through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCategory {
    pub name: String,
    #[serde(default)]
    pub activities: Vec<ActivityOption>,
}

/// One diary timeline and the activities placed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineModule {
    key: String,
    name: String,
    description: String,
    mode: SelectionMode,
    min_coverage: u32,
    categories: Vec<ActivityCategory>,
    activities: ActivityList,
}

impl TimelineModule {
    /// Creates an empty module. `min_coverage` is expected to be validated.
    #[must_use]
    pub fn new(key: impl Into<String>, mode: SelectionMode, min_coverage: u32) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            description: String::new(),
            mode,
            min_coverage,
            categories: Vec::new(),
            activities: ActivityList::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<ActivityCategory>) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn min_coverage(&self) -> u32 {
        self.min_coverage
    }

    #[must_use]
    pub fn categories(&self) -> &[ActivityCategory] {
        &self.categories
    }

    #[must_use]
    pub fn activities(&self) -> &ActivityList {
        &self.activities
    }

    pub fn activities_mut(&mut self) -> &mut ActivityList {
        &mut self.activities
    }

    pub(crate) fn replace_activities(&mut self, activities: ActivityList) {
        self.activities = activities;
    }
}
