use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{ActivityCategory, SelectionMode, TimelineModule};
use crate::error::{DiaryError, DiaryResult};

use super::validation::min_coverage_from_json;

/// One timeline definition from the study configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_selection_mode")]
    pub mode: SelectionMode,
    /// Kept as raw JSON so a non-numeric value is reported instead of being
    /// silently dropped by deserialization.
    #[serde(default, alias = "minCoverage")]
    pub min_coverage: Option<Value>,
    #[serde(default)]
    pub categories: Vec<ActivityCategory>,
}

impl TimelineConfig {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            description: String::new(),
            mode: default_selection_mode(),
            min_coverage: None,
            categories: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_min_coverage(mut self, minutes: u32) -> Self {
        self.min_coverage = Some(Value::from(minutes));
        self
    }

    /// Builds the module, failing fast on an invalid minimum coverage.
    pub fn to_module(&self) -> DiaryResult<TimelineModule> {
        if self.key.trim().is_empty() {
            return Err(DiaryError::InvalidConfig(
                "timeline key must not be empty".to_owned(),
            ));
        }
        let min_coverage = min_coverage_from_json(self.min_coverage.as_ref()).inspect_err(|err| {
            warn!(timeline = %self.key, error = %err, "timeline failed to load");
        })?;
        Ok(
            TimelineModule::new(self.key.clone(), self.mode, min_coverage)
                .with_name(self.name.clone().unwrap_or_else(|| self.key.clone()))
                .with_description(self.description.clone())
                .with_categories(self.categories.clone()),
        )
    }
}

fn default_selection_mode() -> SelectionMode {
    SelectionMode::SingleChoice
}

/// Study configuration: the ordered list of diary timelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryConfig {
    pub timelines: Vec<TimelineConfig>,
}

impl DiaryConfig {
    #[must_use]
    pub fn new(timelines: Vec<TimelineConfig>) -> Self {
        Self { timelines }
    }

    pub fn from_json_str(input: &str) -> DiaryResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DiaryError::InvalidConfig(format!("failed to parse diary config: {e}")))
    }

    pub fn build_modules(&self) -> DiaryResult<Vec<TimelineModule>> {
        if self.timelines.is_empty() {
            return Err(DiaryError::InvalidConfig(
                "diary config must define at least one timeline".to_owned(),
            ));
        }
        let modules = self
            .timelines
            .iter()
            .map(TimelineConfig::to_module)
            .collect::<DiaryResult<Vec<_>>>()?;
        debug!(count = modules.len(), "loaded timelines");
        Ok(modules)
    }
}
