use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::TimeSpan;

/// Separator used when a multiple-choice block combines several activities.
pub const MULTI_SELECTION_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub u64);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One chooser entry: an activity name and its block color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityOption {
    pub name: String,
    pub color: String,
}

impl ActivityOption {
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityChoice {
    Single {
        name: String,
        color: String,
        #[serde(default)]
        parent: Option<String>,
    },
    Multiple {
        selections: Vec<ActivityOption>,
    },
}

/// Activity picked in the chooser and waiting to be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub category: String,
    pub choice: ActivityChoice,
}

impl SelectionState {
    #[must_use]
    pub fn single(
        category: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            choice: ActivityChoice::Single {
                name: name.into(),
                color: color.into(),
                parent: None,
            },
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        if let ActivityChoice::Single { parent: slot, .. } = &mut self.choice {
            *slot = Some(parent.into());
        }
        self
    }

    #[must_use]
    pub fn multiple(category: impl Into<String>, selections: Vec<ActivityOption>) -> Self {
        Self {
            category: category.into(),
            choice: ActivityChoice::Multiple { selections },
        }
    }

    #[must_use]
    pub fn is_multiple(&self) -> bool {
        matches!(self.choice, ActivityChoice::Multiple { .. })
    }

    /// Label shown on the block and exported as the activity column.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.choice {
            ActivityChoice::Single { name, .. } => name.clone(),
            ActivityChoice::Multiple { selections } => selections
                .iter()
                .map(|option| option.name.as_str())
                .collect::<Vec<_>>()
                .join(MULTI_SELECTION_SEPARATOR),
        }
    }

    /// Block color. Multi selections take the first sub-selection's color.
    #[must_use]
    pub fn color(&self) -> String {
        match &self.choice {
            ActivityChoice::Single { color, .. } => color.clone(),
            ActivityChoice::Multiple { selections } => selections
                .first()
                .map(|option| option.color.clone())
                .unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn multiplicity(&self) -> usize {
        match &self.choice {
            ActivityChoice::Single { .. } => 1,
            ActivityChoice::Multiple { selections } => selections.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.choice {
            ActivityChoice::Single { name, .. } => name.trim().is_empty(),
            ActivityChoice::Multiple { selections } => selections.is_empty(),
        }
    }

    /// Builds the record placed for this selection over `span`.
    #[must_use]
    pub fn to_record(&self, id: ActivityId, span: TimeSpan) -> ActivityRecord {
        let (parent_name, child_names) = match &self.choice {
            ActivityChoice::Single { parent, .. } => (parent.clone(), Vec::new()),
            ActivityChoice::Multiple { selections } => (
                None,
                selections.iter().map(|option| option.name.clone()).collect(),
            ),
        };
        ActivityRecord {
            id,
            activity: self.label(),
            category: self.category.clone(),
            color: self.color(),
            start_minutes: span.start,
            end_minutes: span.end,
            parent_name,
            child_names,
            count: self.multiplicity(),
        }
    }
}

/// One placed block. Display strings are derived from the minute bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: ActivityId,
    pub activity: String,
    pub category: String,
    pub color: String,
    pub start_minutes: u32,
    pub end_minutes: u32,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub child_names: Vec<String>,
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    1
}

impl ActivityRecord {
    #[must_use]
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start_minutes, self.end_minutes)
    }

    pub fn set_span(&mut self, span: TimeSpan) {
        self.start_minutes = span.start;
        self.end_minutes = span.end;
    }

    #[must_use]
    pub fn length_minutes(&self) -> u32 {
        self.span().length()
    }

    #[must_use]
    pub fn start_time(&self) -> String {
        self.span().start_label()
    }

    #[must_use]
    pub fn end_time(&self) -> String {
        self.span().end_label()
    }
}
